use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Pastes directory used when neither `--dir` nor a config file names one.
pub const DEFAULT_PASTES_DIR: &str = "./pastes";

#[derive(Parser)]
#[command(
    name = "pastebin",
    about = "Pastebin Lite — content-addressed text storage",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Pastes directory
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Refuse to resolve short ids that match more than one paste
    #[arg(long, global = true)]
    pub strict: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

impl Cli {
    pub fn pastes_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PASTES_DIR))
    }
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store a file (or stdin) and print its ids
    Put(PutArgs),
    /// Print a paste by full or short id
    Get(GetArgs),
    /// Print the ids a file (or stdin) would be stored under
    Id(IdArgs),
    /// List stored pastes
    List(ListArgs),
    /// Check every stored paste against its id
    Fsck(FsckArgs),
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct PutArgs {
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct GetArgs {
    /// 64-character full id or 8-character short id
    pub id: String,
}

#[derive(Args)]
pub struct IdArgs {
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct FsckArgs {}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
