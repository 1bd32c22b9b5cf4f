use crate::AppContext;
use crate::cli::parser::Commands;
use crate::core::stamp::StampLogic;
use crate::errors::AppResult;
use crate::utils::date::parse_optional_date;
use crate::utils::time::parse_optional_time;

/// Handle `clock-in` and `clock-out`; date and time default to the clock.
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    match cmd {
        Commands::ClockIn { home, time, date } => {
            let date = parse_optional_date(date.as_ref(), ctx.today())?;
            let time = parse_optional_time(time.as_ref(), ctx.time_now())?;
            let rules = ctx.rules()?;
            let mut pool = ctx.open_db()?;
            StampLogic::clock_in(&mut pool, &rules, date, time, *home)?;
        }
        Commands::ClockOut { sick, time, date } => {
            let date = parse_optional_date(date.as_ref(), ctx.today())?;
            let time = parse_optional_time(time.as_ref(), ctx.time_now())?;
            let rules = ctx.rules()?;
            let mut pool = ctx.open_db()?;
            StampLogic::clock_out(&mut pool, &rules, date, time, *sick)?;
        }
        _ => {}
    }
    Ok(())
}
