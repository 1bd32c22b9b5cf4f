use crate::export::ExportFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for stempel
/// Personal time clock: stamps, travel offsets, breaks and overtime balance
#[derive(Parser, Debug)]
#[command(
    name = "stempel",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal time clock: clock in/out, automatic breaks and travel offsets, cumulative overtime balance",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db", value_name = "FILE")]
    pub db: Option<String>,

    /// Use this configuration file instead of ~/.stempel/stempel.conf
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pin the clock ("YYYY-MM-DD HH:MM")
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    /// Run in test mode (no config file written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Verbose diagnostics on stderr
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Clock in (start a block) for today or the given date
    #[command(name = "clock-in", visible_alias = "ein")]
    ClockIn {
        #[arg(long, help = "Work from home (no travel offset); only used by the first clock-in of the day")]
        home: bool,

        #[arg(long, value_name = "HH:MM", help = "Stamp time (default: now)")]
        time: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Stamp date (default: today)")]
        date: Option<String>,
    },

    /// Clock out (close the open block)
    #[command(name = "clock-out", visible_alias = "aus")]
    ClockOut {
        #[arg(long, help = "Leaving due to illness: the day is credited with its expected hours")]
        sick: bool,

        #[arg(long, value_name = "HH:MM", help = "Stamp time (default: now)")]
        time: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Stamp date (default: today)")]
        date: Option<String>,
    },

    /// Record a complete day afterwards (day must have no stamps yet)
    #[command(visible_alias = "nachtrag")]
    Amend {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: String,

        #[arg(long = "in", value_name = "HH:MM", help = "Arrival time")]
        arrival: String,

        #[arg(long = "out", value_name = "HH:MM", help = "Departure time")]
        departure: String,

        #[arg(long, help = "Work from home (no travel offset)")]
        home: bool,
    },

    /// Recompute stored totals (default: current year)
    Update {
        #[arg(long, value_name = "YYYY-MM-DD", conflicts_with = "month")]
        date: Option<String>,

        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,
    },

    /// Show one day, with a live estimate while clocked in
    Status {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
    },

    /// Show the week (Monday to Sunday) containing the date
    #[command(visible_alias = "woche")]
    Week {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
    },

    /// Cumulative balance through the day before the date (default: today)
    #[command(visible_alias = "saldo")]
    Balance {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
    },

    /// Show a month with Total / Carry-over / Cumulative rows
    Month {
        /// Month to show (default: current month)
        #[arg(value_name = "YYYY-MM")]
        month: Option<String>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing or invalid fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export the ledger day by day
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range (a:b)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
