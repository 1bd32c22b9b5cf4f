//! stempel library root.
//! Exposes the CLI parser, the high-level run() function and the ledger engine.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use chrono::{NaiveDate, NaiveTime};
use cli::parser::{Cli, Commands};
use config::Config;
use core::clock::{Clock, SystemClock, parse_now};
use core::rules::LedgerRules;
use db::pool::DbPool;
use errors::{AppError, AppResult};
use std::path::PathBuf;

/// Everything a command handler needs besides its own arguments.
pub struct AppContext {
    pub cfg: Config,
    pub config_path: PathBuf,
    pub clock: Box<dyn Clock>,
    pub test: bool,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> AppResult<Self> {
        let mut cfg = Config::load_from(cli.config.as_deref())?;
        if let Some(custom_db) = &cli.db {
            cfg.database = custom_db.clone();
        }

        let clock: Box<dyn Clock> = match &cli.now {
            Some(s) => Box::new(
                parse_now(s).ok_or_else(|| AppError::InvalidDate(format!("--now {s}")))?,
            ),
            None => Box::new(SystemClock),
        };

        Ok(Self {
            cfg,
            config_path: cli.config.clone().unwrap_or_else(Config::config_file),
            clock,
            test: cli.test,
        })
    }

    pub fn rules(&self) -> AppResult<LedgerRules> {
        self.cfg.rules()
    }

    /// Open the configured database, applying pending migrations.
    pub fn open_db(&self) -> AppResult<DbPool> {
        DbPool::open(&self.cfg.database)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn time_now(&self) -> NaiveTime {
        self.clock.now().time()
    }
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, ctx: &AppContext) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(ctx),
        Commands::ClockIn { .. } | Commands::ClockOut { .. } => {
            cli::commands::clock::handle(&cli.command, ctx)
        }
        Commands::Amend { .. } => cli::commands::amend::handle(&cli.command, ctx),
        Commands::Update { .. } => cli::commands::update::handle(&cli.command, ctx),
        Commands::Status { .. } => cli::commands::status::handle(&cli.command, ctx),
        Commands::Week { .. } => cli::commands::week::handle(&cli.command, ctx),
        Commands::Balance { .. } => cli::commands::balance::handle(&cli.command, ctx),
        Commands::Month { .. } => cli::commands::month::handle(&cli.command, ctx),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, ctx),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, ctx),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, ctx),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, ctx),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, ctx),
    }
}

/// Entry point used by main.rs once the CLI has been parsed.
pub fn run(cli: &Cli) -> AppResult<()> {
    let ctx = AppContext::from_cli(cli)?;
    tracing::debug!(
        database = %ctx.cfg.database,
        config = %ctx.config_path.display(),
        "context ready"
    );
    dispatch(cli, &ctx)
}
