mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "vdash", version, about = "Todo and project lists for a markdown vault")]
struct Cli {
    /// Path to config.toml (defaults to $XDG_CONFIG_HOME/vaultdash/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Profile to use instead of the config's default
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths
    Doctor,

    /// List todos grouped by status
    Todos(ListArgs),

    /// List projects grouped by status
    Projects(ListArgs),

    /// Parse a base file and print its filters and views
    Check(CheckArgs),

    /// Set the status of a note
    Status(StatusArgs),

    /// Link a note to a project, or unlink it
    Project(ProjectArgs),

    /// Set or clear a date field of a note
    Date(DateArgs),

    /// Create a new todo or project note
    New(NewArgs),

    /// Manage the scan cache
    #[command(subcommand)]
    Cache(CacheCommands),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// View to narrow the list with (overrides the profile)
    #[arg(long)]
    pub view: Option<String>,

    /// Case-insensitive substring of the title
    #[arg(long, short)]
    pub search: Option<String>,

    /// Walk the vault even if the cache is fresh
    #[arg(long)]
    pub rebuild: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Maximum number of notes (overrides the profile)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Base file to parse
    pub base: PathBuf,

    /// Also evaluate this view when counting matches
    #[arg(long)]
    pub view: Option<String>,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Note file to modify
    pub note: PathBuf,

    /// New status (e.g. "in-progress", "done")
    pub status: String,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Note file to modify
    pub note: PathBuf,

    /// Project name; written as a wiki link
    #[arg(required_unless_present = "clear")]
    pub name: Option<String>,

    /// Remove the project link
    #[arg(long, conflicts_with = "name")]
    pub clear: bool,
}

#[derive(Debug, Args)]
pub struct DateArgs {
    /// Note file to modify
    pub note: PathBuf,

    /// Which date to set: due, started or scheduled
    #[arg(long)]
    pub field: String,

    /// Date as YYYY-MM-DD
    #[arg(required_unless_present = "clear")]
    pub date: Option<String>,

    /// Remove the field
    #[arg(long, conflicts_with = "date")]
    pub clear: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NewKind {
    Todo,
    Project,
}

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Kind of note to create
    #[arg(value_enum)]
    pub kind: NewKind,

    /// Note title; also the file name
    pub title: String,
}

#[derive(Debug, Subcommand)]
enum CacheCommands {
    /// Drop the cached scan of the configured vault
    Clear {
        /// Drop every cached vault
        #[arg(long)]
        all: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::Todos(args) => cmd::list::run_todos(config, profile, &args),
        Commands::Projects(args) => cmd::list::run_projects(config, profile, &args),
        Commands::Check(args) => cmd::check::run(config, profile, &args),
        Commands::Status(args) => cmd::mutate::run_status(config, profile, &args),
        Commands::Project(args) => cmd::mutate::run_project(config, profile, &args),
        Commands::Date(args) => cmd::mutate::run_date(config, profile, &args),
        Commands::New(args) => cmd::new::run(config, profile, &args),
        Commands::Cache(CacheCommands::Clear { all }) => cmd::cache::clear(config, profile, all),
    }
}
