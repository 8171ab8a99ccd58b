use clap::{Parser, Subcommand};

/// Command-line interface definition for crewledger
/// CLI back office for contractor field crews over SQLite
#[derive(Parser)]
#[command(
    name = "crewledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Field-crew back office: clock sessions, supervisor approvals, material logs and an append-only activity trail",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

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

    /// Manage the configuration file
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
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

    /// Manage jobs (the identity entries attach to)
    Job {
        #[command(subcommand)]
        action: JobAction,
    },

    /// Manage registered crew members and supervisors
    Crew {
        #[command(subcommand)]
        action: CrewAction,
    },

    /// Open or close a clock session on a job
    Clock {
        #[command(subcommand)]
        action: ClockAction,
    },

    /// Time-entry approval workflow
    Time {
        #[command(subcommand)]
        action: TimeAction,
    },

    /// Material-usage log and approval workflow
    Material {
        #[command(subcommand)]
        action: MaterialAction,
    },

    /// Show the activity feed for a subject (newest first)
    Activity {
        /// Subject type: job, lead or template
        #[arg(long = "subject-type", default_value = "job")]
        subject_type: String,

        /// Subject id
        #[arg(long = "subject-id")]
        subject_id: i64,

        /// Page size (defaults to activity_page_size from the config file)
        #[arg(long)]
        limit: Option<i64>,

        /// Rows to skip (offset pagination)
        #[arg(long, default_value_t = 0)]
        offset: i64,
    },
}

#[derive(Subcommand)]
pub enum JobAction {
    /// Create a job
    Add {
        /// Job name
        name: String,
    },
    /// List jobs
    List,
    /// Archive a job (blocked while unsettled entries exist)
    Archive {
        /// Job id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum CrewAction {
    /// Register an actor
    Add {
        /// Actor name
        name: String,

        /// Role: crew or supervisor
        #[arg(long, default_value = "crew")]
        role: String,
    },
    /// List registered actors
    List,
}

#[derive(Subcommand)]
pub enum ClockAction {
    /// Clock in: open a session (at most one per user per job)
    In {
        #[arg(long)]
        job: i64,

        #[arg(long)]
        user: i64,

        /// GPS fix as "lat,lng" or "lat,lng,accuracy"
        #[arg(long)]
        location: Option<String>,

        /// Timestamp override (RFC3339 or "YYYY-MM-DD HH:MM", UTC)
        #[arg(long)]
        at: Option<String>,
    },
    /// Clock out: close the session and submit the entry for approval
    Out {
        #[arg(long)]
        entry: i64,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Timestamp override (RFC3339 or "YYYY-MM-DD HH:MM", UTC)
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TimeAction {
    /// Approve a submitted time entry (supervisors only)
    Approve {
        #[arg(long)]
        entry: i64,

        #[arg(long)]
        approver: i64,

        #[arg(long)]
        note: Option<String>,
    },
    /// Reject a submitted time entry; a reason is required
    Reject {
        #[arg(long)]
        entry: i64,

        #[arg(long)]
        approver: i64,

        #[arg(long)]
        reason: String,

        #[arg(long)]
        note: Option<String>,
    },
    /// Resubmit an entry after an adjustment request (owner only)
    Resubmit {
        #[arg(long)]
        entry: i64,

        #[arg(long)]
        user: i64,

        #[arg(long)]
        notes: Option<String>,
    },
    /// List a job's time entries
    List {
        #[arg(long)]
        job: i64,

        /// Filter by status (in_progress, submitted, approved, rejected,
        /// adjustment_requested)
        #[arg(long)]
        status: Option<String>,

        /// Emit JSON instead of the table view
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum MaterialAction {
    /// Record a material line against a job (always starts submitted)
    Record {
        #[arg(long)]
        job: i64,

        #[arg(long)]
        sku: String,

        #[arg(long = "qty")]
        quantity: f64,

        #[arg(long = "unit-cost", allow_negative_numbers = true)]
        unit_cost: f64,

        #[arg(long = "recorded-by")]
        recorded_by: i64,

        #[arg(long = "cost-code")]
        cost_code: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Approve a material line (supervisors only)
    Approve {
        #[arg(long)]
        entry: i64,

        #[arg(long)]
        approver: i64,

        #[arg(long)]
        note: Option<String>,
    },
    /// Reject a material line; a reason is required
    Reject {
        #[arg(long)]
        entry: i64,

        #[arg(long)]
        approver: i64,

        #[arg(long)]
        reason: String,

        #[arg(long)]
        note: Option<String>,
    },
    /// List a job's material lines
    List {
        #[arg(long)]
        job: i64,

        /// Filter by status (submitted, approved, rejected)
        #[arg(long)]
        status: Option<String>,

        /// Emit JSON instead of the table view
        #[arg(long)]
        json: bool,
    },
}
