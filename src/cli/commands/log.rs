use crate::AppContext;
use crate::cli::parser::Commands;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = ctx.open_db()?;
        LogLogic::print_log(&pool)?;
    }

    Ok(())
}
