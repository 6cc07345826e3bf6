use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for PacePower
/// CLI running log backed by SQLite
#[derive(Parser)]
#[command(
    name = "pacepower",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small running log: record runs, keep your streak and hit your daily goal",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this identity instead of the configured user
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
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

    /// Log a run
    Add {
        /// Duration in minutes
        #[arg(allow_negative_numbers = true)]
        duration: String,

        /// Distance covered (optional)
        #[arg(long, short = 'd', allow_hyphen_values = true)]
        distance: Option<String>,

        /// Distance unit: km, mi or m (default from config)
        #[arg(long, short = 'u')]
        unit: Option<String>,

        /// Date of the run (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Start time of the run (HH:MM, default now)
        #[arg(long)]
        time: Option<String>,

        #[arg(long, short = 'n', help = "Free text notes (max 500 characters)")]
        notes: Option<String>,
    },

    /// List logged runs, newest first
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range (from:to)")]
        period: Option<String>,

        #[arg(long, short, help = "Maximum number of runs (default from config)")]
        limit: Option<usize>,

        #[arg(long, conflicts_with = "limit", help = "Show every run")]
        all: bool,
    },

    /// Show a single run with its pace
    Show {
        /// Run id (see `list`)
        id: String,
    },

    /// Delete a run by id
    Del {
        /// Run id (see `list`)
        id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Set, show or delete the daily goal
    Goal {
        #[arg(long, requires = "time", help = "Save a new daily goal")]
        set: bool,

        #[arg(long, allow_hyphen_values = true, help = "Target minutes per day")]
        time: Option<String>,

        #[arg(long, allow_hyphen_values = true, help = "Target distance per day")]
        distance: Option<String>,

        #[arg(long, help = "Unit of the target distance: km, mi or m")]
        unit: Option<String>,

        #[arg(long, help = "Show the current goal and today's progress")]
        show: bool,

        #[arg(long, help = "List every saved goal")]
        list: bool,

        #[arg(long, value_name = "IDX", help = "Delete the goal at position IDX (see --list)")]
        delete: Option<usize>,
    },

    /// List achievements, earned and locked
    Achievements {
        #[arg(long, help = "Only achievements unlocked in the last N days")]
        days: Option<i64>,
    },

    /// Today at a glance: streak, goal, motivation, reminder
    Dashboard,

    /// Print a motivational message
    Motivate,

    /// Manage the daily reminder
    Reminder {
        #[arg(long, help = "Show the reminder preferences")]
        show: bool,

        #[arg(long, conflicts_with = "disable", help = "Enable the reminder")]
        enable: bool,

        #[arg(long, help = "Disable the reminder")]
        disable: bool,

        #[arg(long, value_name = "HH:MM", help = "Reminder time of day")]
        time: Option<String>,
    },

    /// Display name and roles
    Profile {
        #[arg(long, help = "Set the display name (empty clears it)")]
        name: Option<String>,

        #[arg(long, help = "Show the profile")]
        show: bool,

        #[arg(
            long,
            num_args = 2,
            value_names = ["USER", "ROLE"],
            help = "Assign a role (admin, user) to USER (admins only)"
        )]
        role: Option<Vec<String>>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Export runs
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
