use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Migrations record themselves there,
/// so it has to exist before anything else.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_days_and_stamps",
        description: "Created days and stamps tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS days (
            date             TEXT PRIMARY KEY,
            status           TEXT NOT NULL DEFAULT ''
                             CHECK(status IN ('', 'office', 'home', 'sick')),
            mode             TEXT NULL CHECK(mode IS NULL OR mode IN ('O', 'H')),
            expected_minutes INTEGER NOT NULL DEFAULT 0,
            total_minutes    INTEGER NOT NULL DEFAULT 0,
            balance_minutes  INTEGER NOT NULL DEFAULT 0,
            updated_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS stamps (
            date      TEXT NOT NULL REFERENCES days(date),
            position  INTEGER NOT NULL,
            arrival   TEXT NOT NULL,
            departure TEXT NULL,
            PRIMARY KEY (date, position)
        );
        "#,
    },
    Migration {
        version: "20250301_0002_index_stamps_date",
        description: "Added stamps(date) index",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_stamps_date ON stamps(date);
        "#,
    },
];

pub fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions not yet recorded in the log.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, each inside its own
/// transaction together with its `migration_applied` row.
/// Returns how many were applied.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        let batch = format!(
            "BEGIN;
             {}
             INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', '{}', '{}');
             COMMIT;",
            m.sql, m.version, m.description
        );

        if let Err(e) = conn.execute_batch(&batch) {
            let _ = conn.execute_batch("ROLLBACK;");
            return Err(AppError::Migration(format!("{}: {}", m.version, e)));
        }

        tracing::info!(version = m.version, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
