use crate::AppContext;
use crate::cli::parser::Commands;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::utils::date::parse_optional_date;

/// Balance accumulated before the given date (default: today).
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Balance { date } = cmd {
        let as_of = parse_optional_date(date.as_ref(), ctx.today())?;
        let rules = ctx.rules()?;
        let pool = ctx.open_db()?;
        let ledger = ReportLogic::load(&pool)?;
        ReportLogic::balance(&ledger, &rules, ctx.clock.as_ref(), as_of)?;
    }
    Ok(())
}
