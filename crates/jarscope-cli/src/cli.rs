//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jarscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List an artifact's tree, descending into nested archives
    List(ListArgs),
    /// Resolve an address to its entry
    Locate(LocateArgs),
    /// Export entries to a directory
    Export(ExportArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the artifact (archive file or directory)
    #[arg(value_name = "ARTIFACT")]
    pub artifact: PathBuf,

    /// Maximum tree depth to descend
    #[arg(long, default_value = "16")]
    pub max_depth: usize,
}

#[derive(clap::Args)]
pub struct LocateArgs {
    /// Address to resolve, e.g. `jarscope:///x/app.ear!lib/a.jar!com/x/A.class`
    #[arg(value_name = "URI")]
    pub uri: String,
}

#[derive(clap::Args)]
pub struct ExportArgs {
    /// Path to the artifact (archive file or directory)
    #[arg(value_name = "ARTIFACT")]
    pub artifact: PathBuf,

    /// Output directory
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Restrict the export to these container-relative paths (repeatable);
    /// each keeps its whole subtree
    #[arg(long = "only", short = 'o', value_name = "PATH")]
    pub only: Vec<String>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
