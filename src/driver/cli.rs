//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

/// ウェアハウスのソーステーブルをCSV抽出として書き出すCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "bqsnap")]
#[command(about = "Export BigQuery source tables and derived views to CSV files", long_about = None)]
pub struct Args {
    /// Extract keys to run (default: all extracts)
    pub extracts: Vec<String>,

    /// List available extracts and exit
    #[arg(long)]
    pub list: bool,

    /// Dry run mode - print what would run without querying BigQuery
    #[arg(long)]
    pub dry_run: bool,

    /// Config file path (JSON). Falls back to environment variables when omitted
    #[arg(short, long)]
    pub config: Option<String>,
}
