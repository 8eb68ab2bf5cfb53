use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "fixstats", version, about = "Reporting backend for AI-assisted debugging runs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Store a debug report file
    Import(ImportArgs),
    /// Print per-configuration averages for a project
    Averages(AveragesArgs),
    /// Print per-configuration stability for a project
    Stability(StabilityArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address
    #[arg(long)]
    pub host: Option<String>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,
}

#[derive(Args, Clone)]
pub struct ImportArgs {
    /// Debug report (.json)
    pub file: String,

    /// System prompt the run was given
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,
}

#[derive(Args, Clone)]
pub struct AveragesArgs {
    /// Project ID
    pub project_id: i64,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct StabilityArgs {
    /// Project ID
    pub project_id: i64,

    /// Error signal: detected_errors (default) or false_positives
    #[arg(long)]
    pub signal: Option<String>,

    /// Leave out configurations with a single run instead of reporting 0
    #[arg(long)]
    pub omit_single_runs: bool,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
