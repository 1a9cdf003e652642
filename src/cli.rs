use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "asdoc-json")]
#[command(about = "Convert ASDoc HTML class pages into JSON records plus a content tree")]
pub struct Cli {
    /// ASDoc output folder containing the class listing page
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Folder receiving one JSON file per class and contentTree.json
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Empty a non-empty OUTPUT folder before writing
    #[arg(long)]
    pub clean: bool,

    /// Listing page name inside INPUT (default: all-classes.html)
    #[arg(long, value_name = "FILE")]
    pub listing: Option<String>,

    /// Worker threads used to extract class pages
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    #[arg(short = 'v', long, conflicts_with = "quiet")]
    pub verbose: bool,

    #[arg(short = 'q', long)]
    pub quiet: bool,
}
