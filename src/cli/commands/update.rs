use crate::AppContext;
use crate::cli::parser::Commands;
use crate::core::ledger::RecomputeScope;
use crate::core::update::UpdateLogic;
use crate::errors::AppResult;
use crate::utils::date::{parse_date_arg, parse_month};
use chrono::Datelike;

/// `update --date D`, `update --month YYYY-MM`, or the current year.
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Update { date, month } = cmd {
        let scope = match (date, month) {
            (Some(d), _) => RecomputeScope::Day(parse_date_arg(d)?),
            (None, Some(m)) => {
                let (year, month) = parse_month(m)?;
                RecomputeScope::Month { year, month }
            }
            (None, None) => RecomputeScope::Year(ctx.today().year()),
        };

        let rules = ctx.rules()?;
        let mut pool = ctx.open_db()?;
        UpdateLogic::run(&mut pool, &rules, scope)?;
    }
    Ok(())
}
