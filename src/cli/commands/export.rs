use crate::AppContext;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::export::logic::ExportLogic;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let rules = ctx.rules()?;
        let pool = ctx.open_db()?;
        let rows = ExportLogic::export(
            &pool,
            &rules,
            ctx.clock.as_ref(),
            *format,
            file,
            range,
            *force,
        )?;
        if rows > 0 {
            info(format!("{rows} day(s) exported"));
        }
    }
    Ok(())
}
