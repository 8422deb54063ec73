//! Bqsnap - Warehouse CSV Extractor
//!
//! BigQueryのソーステーブルをローカルのCSV抽出として書き出す

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
// バイナリ側では全モジュールを再宣言するため未使用アイテムの警告を抑制
#![allow(dead_code)]

use anyhow::Result;
use clap::Parser;

// Clean Architecture layers
mod adapter;
mod application;
mod domain;
mod driver;

use adapter::config::Config;
use application::catalog;
use driver::{Args, ExtractWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    // .env があれば環境変数として読み込む
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    // --list は設定なしで応答できる
    if args.list {
        println!("Available extracts:");
        for extract in catalog::CATALOG {
            println!("  {:22} {}", extract.key, extract.description);
        }
        return Ok(());
    }

    // Load configuration (config file if given, environment otherwise)
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };

    // Create workflow with injected configuration
    let workflow = ExtractWorkflow::new(config);

    workflow.execute(args).await
}
