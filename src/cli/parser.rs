use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for timepunch
/// CLI punch clock: track working hours and breaks with SQLite
#[derive(Parser)]
#[command(
    name = "timepunch",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple punch-clock CLI: punch in/out, track breaks, and view a calendar of work sessions",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the user the timer belongs to
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CalendarFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Start a work day
    Start {
        #[arg(long, help = "Target work hours (defaults from config)")]
        hours: Option<u32>,

        #[arg(long, help = "Additional target work minutes")]
        minutes: Option<u32>,

        #[arg(long = "break-minutes", help = "Target break duration in minutes")]
        break_minutes: Option<u32>,

        #[arg(long = "at", help = "Entry time (HH:MM), defaults to now")]
        at: Option<String>,
    },

    /// Toggle between working and break
    Punch {
        #[arg(long = "at", help = "Punch time (HH:MM), defaults to now")]
        at: Option<String>,
    },

    /// Insert a historical break into the running day
    Break {
        #[arg(long = "from", help = "Break start (HH:MM)")]
        from: String,

        #[arg(long = "to", help = "Break end (HH:MM)")]
        to: String,
    },

    /// Show the current timer projection
    Status {
        #[arg(long = "logs", help = "Also print the snapshot action log")]
        logs: bool,
    },

    /// Live one-second countdown with periodic snapshot sync
    Watch {
        #[arg(
            long = "ticks",
            default_value_t = 0,
            help = "Stop after N ticks (0 = run until the day ends)"
        )]
        ticks: u64,
    },

    /// Derive and print work/break calendar events from the work log
    Calendar {
        #[arg(
            long,
            short,
            help = "Restrict to a day (YYYY-MM-DD) or range (start:end)"
        )]
        period: Option<String>,

        #[arg(long, value_enum, default_value = "table")]
        format: CalendarFormat,

        #[arg(long, value_name = "FILE", help = "Write output to a file instead of stdout")]
        file: Option<String>,
    },

    /// Delete a work interval or an implicit break
    Del {
        #[arg(long = "work", value_name = "ID", help = "Delete the work row with this id")]
        work: Option<i64>,

        #[arg(
            long = "break",
            num_args = 2,
            value_names = ["PREV_ID", "NEXT_ID"],
            help = "Delete the break bounded by these two row ids (merges them)"
        )]
        break_ids: Option<Vec<i64>>,
    },

    /// Merge two adjacent work rows into one
    Merge {
        /// Row id of the earlier session
        earlier: i64,

        /// Row id of the later session
        later: i64,
    },

    /// Reset the timer to idle (keeps the work log)
    Reset,

    /// Delete today's work log and the timer snapshot
    Clear,

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
