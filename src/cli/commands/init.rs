use crate::AppContext;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration directory and file (skipped in test mode)
///  - the SQLite database and its migrations
pub fn handle(ctx: &AppContext) -> AppResult<()> {
    let db_path = ctx.cfg.init_all(Some(&ctx.config_path), ctx.test)?;

    println!("⚙️  Initializing stempel…");
    println!("📄 Config file : {}", ctx.config_path.display());
    println!("🗄️  Database   : {}", db_path.display());

    let pool = DbPool::new(&ctx.cfg.database)?;
    let applied = init_db(&pool.conn)?;

    println!("✅ Database initialized at {}", db_path.display());

    if let Err(e) = ttlog(
        &pool.conn,
        "init",
        &ctx.cfg.database,
        &format!("Database initialized ({applied} migration(s) applied)"),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    println!("🎉 stempel initialization completed!");
    Ok(())
}
