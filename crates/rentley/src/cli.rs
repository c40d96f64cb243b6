//! Clap derive structures for the `rentley` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};

use rentley_core::RentalStatus;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rentley -- command-line client for the vehicle rental platform
#[derive(Debug, Parser)]
#[command(
    name = "rentley",
    version,
    about = "Browse, price, and book rental vehicles from the command line",
    long_about = "A command-line client for the vehicle rental platform.\n\n\
        Public browsing works without an account; booking and the\n\
        back-office commands require a login. Price previews prefer the\n\
        server's computation and fall back to a local estimate.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "RENTLEY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 's', env = "RENTLEY_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "RENTLEY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "RENTLEY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "RENTLEY_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session token
    Login(LoginArgs),

    /// End the session and discard the stored token
    Logout,

    /// Show the authenticated user
    Whoami,

    /// Register a new customer account
    Register(RegisterArgs),

    /// Change the authenticated user's password
    ChangePassword,

    /// Browse and manage vehicles
    #[command(alias = "veh", alias = "v")]
    Vehicles(VehiclesArgs),

    /// List rental locations
    #[command(alias = "loc")]
    Locations(LocationsArgs),

    /// Price preview for a vehicle and date range
    Quote(QuoteArgs),

    /// Book a vehicle (preview, confirm, reserve)
    Book(BookArgs),

    /// View and manage rentals
    #[command(alias = "r")]
    Rentals(RentalsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (defaults to the profile's username)
    #[arg(long, short = 'u', env = "RENTLEY_USERNAME")]
    pub username: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(long, required = true)]
    pub username: String,

    /// Email address
    #[arg(long, required = true)]
    pub email: String,

    /// First name
    #[arg(long, required = true)]
    pub first_name: String,

    /// Last name
    #[arg(long, required = true)]
    pub last_name: String,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VEHICLES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VehiclesArgs {
    #[command(subcommand)]
    pub command: VehiclesCommand,
}

#[derive(Debug, Subcommand)]
pub enum VehiclesCommand {
    /// List vehicles
    #[command(alias = "ls")]
    List {
        /// Page number (0-based)
        #[arg(long, default_value = "0")]
        page: u32,

        /// Page size
        #[arg(long, default_value = "25")]
        size: u32,
    },

    /// Get vehicle details
    Get {
        /// Vehicle id
        id: i64,
    },

    /// List vehicles available in a date window
    Available {
        /// Pickup date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Return date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Search vehicles by criteria
    Search {
        /// Free-text search term
        #[arg(long, short = 't')]
        term: Option<String>,

        /// Filter by brand id
        #[arg(long)]
        brand: Option<i64>,

        /// Filter by category id
        #[arg(long)]
        category: Option<i64>,

        /// Filter by location id
        #[arg(long)]
        location: Option<i64>,

        /// Minimum daily rate
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum daily rate
        #[arg(long)]
        max_price: Option<f64>,
    },

    /// Create a vehicle from a JSON file (management roles)
    Create {
        /// JSON payload file
        #[arg(long, short = 'F', required = true)]
        from_file: PathBuf,
    },

    /// Update a vehicle from a JSON file (management roles)
    Update {
        /// Vehicle id
        id: i64,

        /// JSON payload file
        #[arg(long, short = 'F', required = true)]
        from_file: PathBuf,
    },

    /// Delete a vehicle (management roles)
    Delete {
        /// Vehicle id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOCATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LocationsArgs {
    #[command(subcommand)]
    pub command: LocationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LocationsCommand {
    /// List rental locations
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  QUOTE & BOOK
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Vehicle id
    #[arg(long, required = true)]
    pub vehicle: i64,

    /// Pickup date (YYYY-MM-DD)
    #[arg(long, required = true)]
    pub from: NaiveDate,

    /// Return date (YYYY-MM-DD)
    #[arg(long, required = true)]
    pub to: NaiveDate,
}

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Vehicle id
    #[arg(long, required = true)]
    pub vehicle: i64,

    /// Pickup date (YYYY-MM-DD)
    #[arg(long, required = true)]
    pub from: NaiveDate,

    /// Return date (YYYY-MM-DD)
    #[arg(long, required = true)]
    pub to: NaiveDate,

    /// Pickup time (HH:MM, default 10:00)
    #[arg(long, value_parser = parse_time)]
    pub pickup_time: Option<NaiveTime>,

    /// Return time (HH:MM, default 18:00)
    #[arg(long, value_parser = parse_time)]
    pub return_time: Option<NaiveTime>,

    /// Pickup location name (defaults to the vehicle's location)
    #[arg(long)]
    pub pickup_location: Option<String>,

    /// Return location name (defaults to the vehicle's location)
    #[arg(long)]
    pub return_location: Option<String>,

    /// Free-form notes for the reservation
    #[arg(long)]
    pub notes: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RENTALS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RentalsArgs {
    #[command(subcommand)]
    pub command: RentalsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RentalsCommand {
    /// List rentals (your own, or a user's with --user)
    #[command(alias = "ls")]
    List {
        /// List a specific user's rentals (staff roles)
        #[arg(long)]
        user: Option<i64>,
    },

    /// Get rental details
    Get {
        /// Rental id
        id: i64,
    },

    /// Cancel a rental
    Cancel {
        /// Rental id
        id: i64,
    },

    /// Complete a rental -- vehicle returned (staff roles)
    Complete {
        /// Rental id
        id: i64,
    },

    /// Move a rental to a new status (staff roles)
    SetStatus {
        /// Rental id
        id: i64,

        /// Target status: reserved, active, overdue, completed, cancelled
        #[arg(long, required = true, value_parser = parse_status)]
        status: RentalStatus,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// ── Value parsers ────────────────────────────────────────────────────

/// Accept `HH:MM` or `HH:MM:SS`.
fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| format!("invalid time '{raw}', expected HH:MM"))
}

/// Parse a rental status name, case-insensitively.
fn parse_status(raw: &str) -> Result<RentalStatus, String> {
    raw.parse().map_err(|_| {
        format!(
            "unknown status '{raw}', expected one of: reserved, active, overdue, completed, cancelled"
        )
    })
}
