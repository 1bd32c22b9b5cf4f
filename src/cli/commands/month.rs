use crate::AppContext;
use crate::cli::parser::Commands;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::utils::date::parse_month;
use chrono::Datelike;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Month { month } = cmd {
        let (year, month) = match month {
            Some(m) => parse_month(m)?,
            None => {
                let today = ctx.today();
                (today.year(), today.month())
            }
        };

        let rules = ctx.rules()?;
        let pool = ctx.open_db()?;
        let ledger = ReportLogic::load(&pool)?;
        ReportLogic::month(&ledger, &rules, ctx.clock.as_ref(), year, month)?;
    }
    Ok(())
}
