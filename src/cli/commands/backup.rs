use crate::AppContext;
use crate::cli::parser::Commands;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let pool = ctx.open_db()?;
        BackupLogic::backup(&pool, file, *compress)?;
    }

    Ok(())
}
