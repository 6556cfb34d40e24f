//! Clap derive structures for the `jetquote` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.
//! Each booking "page" is a command: `book` stages an intent, `details`
//! runs the access check, `submit` sends the quotation request.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// jetquote -- request private charter quotations from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "jetquote",
    version,
    about = "Request private charter quotations from the command line",
    long_about = "Search airports, stage a one-way, round-trip or multi-leg booking,\n\
        review it, and submit a quotation request to the booking API.\n\n\
        A staged booking is kept in the state directory and expires after\n\
        an hour (configurable).",
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
    /// API profile to use
    #[arg(long, short = 'p', env = "JETQUOTE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Booking API base URL (overrides profile)
    #[arg(long, env = "JETQUOTE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Directory holding the staged booking
    #[arg(long, env = "JETQUOTE_STATE_DIR", global = true)]
    pub state_dir: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "JETQUOTE_OUTPUT",
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

    /// Never prompt; fail instead of asking for missing values
    #[arg(long, env = "JETQUOTE_NO_INPUT", global = true)]
    pub no_input: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "JETQUOTE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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
    /// Search the airport datasets
    #[command(alias = "ap")]
    Airports(AirportsArgs),

    /// Fill a booking form and stage the trip
    Book(BookArgs),

    /// Review the staged trip (expired or invalid trips are dropped)
    Details,

    /// Enter contact details and submit the quotation request
    Submit(SubmitArgs),

    /// Register interest in the staged trip with just an email address
    Interest(InterestArgs),

    /// Drop the staged trip
    Cancel,

    /// Subscribe an address to the newsletter
    Newsletter(NewsletterArgs),

    /// Account sign-up, login and password reset
    Account(AccountArgs),

    /// Show the approximate location of this machine
    Geo,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AIRPORTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AirportsArgs {
    #[command(subcommand)]
    pub command: AirportsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AirportsCommand {
    /// Ranked matches for a name, city, code or keyword
    #[command(alias = "s")]
    Search {
        /// Search text (at least two characters)
        query: String,

        /// Use the booking-form dataset and limit
        #[arg(long, short = 'b')]
        booking: bool,

        /// Maximum number of results
        #[arg(long, short = 'l')]
        limit: Option<usize>,
    },

    /// Show one airport by id, IATA code or ICAO ident
    Show {
        /// Airport id, code or ident
        airport: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOK
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BookArgs {
    #[command(subcommand)]
    pub command: BookCommand,
}

#[derive(Debug, Subcommand)]
pub enum BookCommand {
    /// Single leg from A to B
    #[command(alias = "ow")]
    OneWay(OneWayArgs),

    /// Outbound plus return leg
    #[command(alias = "rt")]
    RoundTrip(RoundTripArgs),

    /// Two or more chained legs
    #[command(alias = "ml")]
    MultiLeg(MultiLegArgs),
}

/// Traveller, pet and luggage counts, applied to every leg.
#[derive(Debug, Clone, Args)]
pub struct CountArgs {
    /// Adults (1-19)
    #[arg(long, default_value = "1", help_heading = "Passengers")]
    pub adults: u32,

    /// Children (0-18)
    #[arg(long, default_value = "0", help_heading = "Passengers")]
    pub children: u32,

    /// Infants (0-6)
    #[arg(long, default_value = "0", help_heading = "Passengers")]
    pub infants: u32,

    /// Small pets (0-6)
    #[arg(long, default_value = "0", help_heading = "Pets")]
    pub small_pets: u32,

    /// Large pets (0-6)
    #[arg(long, default_value = "0", help_heading = "Pets")]
    pub large_pets: u32,

    /// Carry-on bags (0-20)
    #[arg(long, default_value = "0", help_heading = "Luggage")]
    pub carry_on: u32,

    /// Hold bags (0-20)
    #[arg(long, default_value = "0", help_heading = "Luggage")]
    pub hold: u32,

    /// Ski bags (0-20)
    #[arg(long, default_value = "0", help_heading = "Luggage")]
    pub skis: u32,

    /// Golf bags (0-20)
    #[arg(long, default_value = "0", help_heading = "Luggage")]
    pub golf_bags: u32,

    /// Other oversized items (0-20)
    #[arg(long, default_value = "0", help_heading = "Luggage")]
    pub other_bags: u32,
}

#[derive(Debug, Args)]
pub struct OneWayArgs {
    /// Departure airport (code, ident, id or search text)
    #[arg(long)]
    pub from: Option<String>,

    /// Arrival airport (code, ident, id or search text)
    #[arg(long)]
    pub to: Option<String>,

    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Departure time (HH:MM, local)
    #[arg(long)]
    pub time: Option<String>,

    #[command(flatten)]
    pub counts: CountArgs,
}

#[derive(Debug, Args)]
pub struct RoundTripArgs {
    /// Departure airport (code, ident, id or search text)
    #[arg(long)]
    pub from: Option<String>,

    /// Arrival airport (code, ident, id or search text)
    #[arg(long)]
    pub to: Option<String>,

    /// Outbound date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Outbound time (HH:MM, local)
    #[arg(long)]
    pub time: Option<String>,

    /// Return date (YYYY-MM-DD)
    #[arg(long)]
    pub return_date: Option<String>,

    /// Return time (HH:MM, local)
    #[arg(long)]
    pub return_time: Option<String>,

    /// Return departure airport (defaults to the outbound arrival)
    #[arg(long)]
    pub return_from: Option<String>,

    /// Return arrival airport (defaults to the outbound departure)
    #[arg(long)]
    pub return_to: Option<String>,

    #[command(flatten)]
    pub counts: CountArgs,
}

#[derive(Debug, Args)]
pub struct MultiLegArgs {
    /// A leg as FROM,TO,DATE[,TIME]; repeat for each leg in order
    /// Example: --leg LBG,NCE,2026-11-02,09:30 --leg NCE,GVA,2026-11-05
    #[arg(long = "leg", value_name = "FROM,TO,DATE[,TIME]")]
    pub legs: Vec<String>,

    #[command(flatten)]
    pub counts: CountArgs,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SUBMIT / INTEREST / NEWSLETTER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Company (optional)
    #[arg(long)]
    pub company: Option<String>,

    /// Notes for the operator (optional)
    #[arg(long)]
    pub notes: Option<String>,

    /// Skip the pause before the confirmation is shown
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Debug, Args)]
pub struct InterestArgs {
    /// Email address to contact about the trip
    #[arg(long)]
    pub email: String,
}

#[derive(Debug, Args)]
pub struct NewsletterArgs {
    /// Email address to subscribe
    pub email: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ACCOUNT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Create an account
    Signup {
        /// Full name
        #[arg(long)]
        name: Option<String>,

        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "JETQUOTE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Log in and show the result (nothing is stored)
    Login {
        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "JETQUOTE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Request a password reset email
    ForgotPassword {
        /// Email address
        #[arg(long)]
        email: Option<String>,
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
    /// Interactive configuration wizard
    Init,

    /// Display the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Set the default profile
    SetDefault {
        /// Profile name
        name: String,
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
