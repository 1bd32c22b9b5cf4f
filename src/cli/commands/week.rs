use crate::AppContext;
use crate::cli::parser::Commands;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::utils::date::parse_optional_date;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Week { date } = cmd {
        let anchor = parse_optional_date(date.as_ref(), ctx.today())?;
        let rules = ctx.rules()?;
        let pool = ctx.open_db()?;
        let ledger = ReportLogic::load(&pool)?;
        ReportLogic::week(&ledger, &rules, ctx.clock.as_ref(), anchor)?;
    }
    Ok(())
}
