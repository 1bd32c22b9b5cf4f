use crate::core::ledger::{LedgerEngine, RecomputeScope};
use crate::core::rules::LedgerRules;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_ledger, save_days};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono::NaiveDate;

pub struct UpdateLogic;

fn scope_bounds(scope: RecomputeScope) -> AppResult<(NaiveDate, NaiveDate)> {
    let bad = || AppError::InvalidDate(scope.label());
    match scope {
        RecomputeScope::Day(d) => Ok((d, d)),
        RecomputeScope::Month { year, month } => {
            let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(bad)?;
            let next = if month == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(year, month + 1, 1)
            };
            let last = next.and_then(|n| n.pred_opt()).ok_or_else(bad)?;
            Ok((first, last))
        }
        RecomputeScope::Year(year) => Ok((
            NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(bad)?,
            NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(bad)?,
        )),
    }
}

impl UpdateLogic {
    /// Recompute the stored days of `scope` and write them back in one
    /// transaction. Returns how many days were recomputed.
    pub fn run(pool: &mut DbPool, rules: &LedgerRules, scope: RecomputeScope) -> AppResult<usize> {
        let (from, to) = scope_bounds(scope)?;
        let mut ledger = load_ledger(&pool.conn, Some(from), Some(to))?;

        let engine = LedgerEngine::new(rules);
        let dates = engine.recompute(&mut ledger, scope);

        let records: Vec<_> = dates.iter().filter_map(|d| ledger.get(d)).collect();
        pool.with_conn(|conn| save_days(conn, records).map(|_| ()))?;

        ttlog(
            &pool.conn,
            "update",
            &scope.label(),
            &format!("Recomputed {} day(s)", dates.len()),
        )?;

        success(format!(
            "Recomputed {} day(s) for {}",
            dates.len(),
            scope.label()
        ));
        Ok(dates.len())
    }
}
