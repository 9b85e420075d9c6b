use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "snip",
    about = "Share code snippets with versions, highlighted diffs and feedback",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Detect the language of a file
    Detect(DetectArgs),
    /// Render a file as highlighted HTML
    Highlight(HighlightArgs),
    /// Show a line diff between two files
    Diff(DiffArgs),
    /// Publish a file as a new snippet
    Create(CreateArgs),
    /// Publish a file as the next version of a snippet
    Publish(PublishArgs),
    /// Show a snippet's versions
    Show(ShowArgs),
    /// Compare two versions of a snippet
    Compare(CompareArgs),
    /// Add or list feedback on a version
    Feedback(FeedbackArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Listen address
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Persist snippets to this JSON file instead of memory
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(Args)]
pub struct DetectArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct HighlightArgs {
    pub file: PathBuf,
    /// Language id or alias; detected when omitted
    #[arg(short, long, default_value = "auto")]
    pub language: String,
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    #[arg(short, long, default_value = "auto")]
    pub language: String,
    /// Print a classic unified patch instead of numbered rows
    #[arg(short, long)]
    pub unified: bool,
    /// Context lines for --unified
    #[arg(long, default_value_t = snip_diff::DEFAULT_CONTEXT)]
    pub context: usize,
}

/// Location of the local snippet store.
#[derive(Args)]
pub struct StoreArgs {
    #[arg(long, global = true, default_value = "snippets.json")]
    pub store: PathBuf,
}

/// Secret for publishing; falls back to `ADMIN_PASSWORD`.
#[derive(Args)]
pub struct SecretArgs {
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct CreateArgs {
    pub file: PathBuf,
    #[arg(short, long, default_value = "auto")]
    pub language: String,
    #[command(flatten)]
    pub secret: SecretArgs,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct PublishArgs {
    pub public_id: String,
    pub file: PathBuf,
    #[arg(short, long, default_value = "auto")]
    pub language: String,
    #[command(flatten)]
    pub secret: SecretArgs,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct ShowArgs {
    pub public_id: String,
    /// Version to print; latest when omitted
    #[arg(long)]
    pub version: Option<u32>,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct CompareArgs {
    pub public_id: String,
    /// Older version; the predecessor of --to when omitted
    #[arg(long)]
    pub from: Option<u32>,
    /// Newer version; latest when omitted
    #[arg(long)]
    pub to: Option<u32>,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct FeedbackArgs {
    #[command(subcommand)]
    pub action: FeedbackAction,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Subcommand)]
pub enum FeedbackAction {
    /// Attach feedback to a version
    Add { version_id: String, content: String },
    /// List feedback on a version, newest first
    List { version_id: String },
}
