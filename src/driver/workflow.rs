//! Workflow Orchestration
//!
//! 抽出ワークフローのオーケストレーション

use anyhow::Result;
use log::info;

use std::sync::Arc;

use crate::adapter::auth::create_bigquery_client;
use crate::adapter::bigquery::client::BigQueryRunner;
use crate::adapter::config::Config;
use crate::adapter::repositories::csv_sink::CsvExtractSink;
use crate::application::catalog;
use crate::application::use_cases::run_extract::RunExtractUseCase;
use crate::domain::entities::extract::{DestinationCategory, ExtractDefinition};
use crate::domain::errors::{ExtractError, ExtractResult};

use super::cli::Args;

/// 出力先分類の表示用ラベル
fn category_label(category: DestinationCategory) -> &'static str {
    match category {
        DestinationCategory::Raw => "raw",
        DestinationCategory::Processed => "processed",
    }
}

/// CLIで指定されたキー列を抽出定義へ解決
///
/// 空の場合はカタログの全抽出を返す。未知のキーは
/// `ExtractError::Configuration` としてキー名つきで報告する
pub fn resolve_selection(keys: &[String]) -> ExtractResult<Vec<&'static ExtractDefinition>> {
    if keys.is_empty() {
        return Ok(catalog::CATALOG.iter().collect());
    }

    keys.iter()
        .map(|key| {
            catalog::find(key).ok_or_else(|| {
                ExtractError::Configuration(format!(
                    "unknown extract '{key}' (use --list to see available extracts)"
                ))
            })
        })
        .collect()
}

/// 抽出ワークフロー
///
/// 設定を1度だけ受け取り、選択された抽出を呼び出し順に逐次実行する。
/// 抽出同士にデータ依存はなく、失敗した時点で実行全体を中断する
pub struct ExtractWorkflow {
    config: Config,
}

impl ExtractWorkflow {
    /// 新しいワークフローを作成
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// ワークフローを実行
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting BigQuery CSV extraction...");
        info!("Dry run: {}", args.dry_run);

        let selection = resolve_selection(&args.extracts)?;

        println!("✓ Using configuration:");
        println!("  Project: {}", self.config.project_id);
        println!("  Dataset: {}", self.config.dataset);
        println!("  Raw output: {}", self.config.raw_dir.display());
        println!("  Processed output: {}", self.config.processed_dir.display());

        if args.dry_run {
            println!("✓ Dry-run mode (not querying BigQuery)");
            println!("  Would run {} extracts:", selection.len());
            for extract in &selection {
                println!(
                    "    - {} [{}] -> {}",
                    extract.key,
                    category_label(extract.category),
                    self.config
                        .paths()
                        .destination_for(extract.category, &extract.default_file_name())
                        .display()
                );
            }
            return Ok(());
        }

        // クライアントは1回だけ構築し、全抽出で共有する
        let client =
            create_bigquery_client(&self.config.service_account_key_path).await?;
        println!("✓ Created BigQuery client");

        let runner = Arc::new(BigQueryRunner::new(client, self.config.project_id.clone()));
        let sink = Arc::new(CsvExtractSink::new());
        let use_case = RunExtractUseCase::new(
            runner,
            sink,
            self.config.source(),
            self.config.paths(),
        );

        for extract in selection {
            let file_name = extract.default_file_name();
            let report = use_case.execute(extract, &file_name).await?;

            info!(
                "Extract '{}' wrote {} rows in {:?}",
                extract.key, report.rows_written, report.duration
            );
            println!(
                "✓ CSV file created. File name is {} and location is {}",
                report.file_name(),
                report.directory().display()
            );
        }

        println!("✓ Extraction complete!");

        Ok(())
    }
}
