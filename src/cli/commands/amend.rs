use crate::AppContext;
use crate::cli::parser::Commands;
use crate::core::stamp::StampLogic;
use crate::errors::AppResult;
use crate::utils::date::parse_date_arg;
use crate::utils::time::parse_time_arg;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Amend {
        date,
        arrival,
        departure,
        home,
    } = cmd
    {
        let date = parse_date_arg(date)?;
        let arrival = parse_time_arg(arrival)?;
        let departure = parse_time_arg(departure)?;

        let rules = ctx.rules()?;
        let mut pool = ctx.open_db()?;
        StampLogic::amend(&mut pool, &rules, date, arrival, departure, *home)?;
    }
    Ok(())
}
