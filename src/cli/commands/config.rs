use crate::AppContext;
use crate::cli::parser::Commands;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = &ctx.config_path;

        if *print_config {
            ConfigLogic::print(&ctx.cfg, path)?;
        }
        if *check {
            ConfigLogic::check(&ctx.cfg, path)?;
        }
        if *migrate {
            ConfigLogic::migrate(path)?;
        }
        if *edit_config {
            ConfigLogic::edit(path, editor)?;
        }
    }

    Ok(())
}
