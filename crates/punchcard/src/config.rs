use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "punchcard")]
#[command(about = "Punchcard Timesheet Authentication Server", long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum Command {
    /// Start the authentication server
    Serve(ServeConfig),

    /// Run database migrations
    Migrate {
        /// Database connection URL
        #[arg(
            long,
            env = "DATABASE_URL",
            default_value = "sqlite://./punchcard.db?mode=rwc"
        )]
        database_url: String,
    },

    /// Create a new employee record
    CreateEmployee {
        /// First name
        #[arg(short, long)]
        first_name: String,

        /// Last name
        #[arg(short, long)]
        last_name: String,
    },

    /// List all employees and whether they have a PIN set
    ListEmployees,

    /// Hide an employee from the sign-in picker
    DeactivateEmployee {
        /// Employee ID
        #[arg(short, long)]
        employee_id: i32,
    },

    /// Reset an employee's PIN (defaults to 0000, forcing a change at next sign-in)
    ResetPin {
        /// Employee ID
        #[arg(short, long)]
        employee_id: i32,

        /// New PIN (4 digits); omit to reset to the default
        #[arg(short, long)]
        pin: Option<String>,
    },
}

#[derive(Debug, Clone, Parser)]
pub struct ServeConfig {
    /// Database connection URL
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://./punchcard.db?mode=rwc"
    )]
    pub database_url: String,

    /// Server bind address
    #[arg(long, env = "BIND_ADDRESS", default_value = "127.0.0.1:8080")]
    pub bind_address: String,

    /// Allowed CORS origins (comma-separated)
    #[arg(
        long,
        env = "CORS_ORIGINS",
        default_value = "http://localhost:3000,http://localhost:5173"
    )]
    pub cors_origins: String,

    /// Wrong-PIN attempts allowed before an employee is locked out
    #[arg(long, env = "MAX_PIN_ATTEMPTS", default_value = "5")]
    pub max_pin_attempts: u32,

    /// Lockout duration in seconds once the attempt limit is reached
    #[arg(long, env = "PIN_LOCKOUT_SECS", default_value = "300")]
    pub pin_lockout_secs: u64,

    /// Log level
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl ServeConfig {
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .collect()
    }
}
