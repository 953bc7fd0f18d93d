use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hbnb",
    about = "HBnB console: a persistent record store driven by text commands",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (defaults to ./hbnb.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file, overriding the config
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the interactive console (default)
    Console(ConsoleArgs),
    /// Run a single console command and exit
    Exec(ExecArgs),
    /// Delete out-of-date deployment archives
    Clean(CleanArgs),
}

#[derive(Args, Default)]
pub struct ConsoleArgs {}

#[derive(Args)]
pub struct ExecArgs {
    /// The command line, e.g. `show User 1234` or `User.count()`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Number of archives to keep (0 keeps one)
    #[arg(short = 'n', long, default_value = "0")]
    pub number: u32,
    #[arg(long)]
    pub versions: Option<PathBuf>,
    #[arg(long)]
    pub releases: Option<String>,
    /// Remote host; repeat for several. Replaces the configured hosts.
    #[arg(long = "host")]
    pub hosts: Vec<String>,
}
