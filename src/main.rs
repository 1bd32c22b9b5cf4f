//! stempel main entrypoint.

use clap::Parser;
use stempel::cli::parser::Cli;
use stempel::run;
use stempel::ui::messages::error;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let filter = if verbose > 0 {
        EnvFilter::new("stempel=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        error(e.kind(), &e);
        std::process::exit(1);
    }
}
