//! # Run Extract Use Case
//!
//! 抽出実行ユースケース

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use log::info;

use crate::application::dto::extract_paths::ExtractPaths;
use crate::domain::entities::extract::{DatasetRef, ExtractDefinition};
use crate::domain::entities::extract_report::ExtractReport;
use crate::domain::errors::ExtractResult;
use crate::domain::repositories::extract_sink::ExtractSink;
use crate::domain::repositories::query_runner::QueryRunner;

/// 抽出実行ユースケース
///
/// 1つの抽出定義について、SQLの解決 → リモート実行 → 結果テーブルの
/// CSVシリアライズまでを行い、構造化されたレポートを返す。
/// 7種類の抽出はすべてこの同一パターンのインスタンスである
pub struct RunExtractUseCase<Q: QueryRunner, S: ExtractSink> {
    query_runner: Arc<Q>,
    sink: Arc<S>,
    source: DatasetRef,
    paths: ExtractPaths,
}

impl<Q: QueryRunner, S: ExtractSink> RunExtractUseCase<Q, S> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `query_runner` - クエリランナー
    /// * `sink` - 抽出シンク
    /// * `source` - ソーステーブルのデータセット参照
    /// * `paths` - 出力先パス設定
    pub fn new(
        query_runner: Arc<Q>,
        sink: Arc<S>,
        source: DatasetRef,
        paths: ExtractPaths,
    ) -> Self {
        Self {
            query_runner,
            sink,
            source,
            paths,
        }
    }

    /// 抽出を実行し、結果をCSVに書き出す
    ///
    /// # Arguments
    ///
    /// * `extract` - 実行する抽出定義
    /// * `file_name` - 出力CSVのファイル名
    ///
    /// # Returns
    ///
    /// 書き込み行数・出力パス・所要時間を含むレポート
    ///
    /// # Errors
    ///
    /// クエリ失敗時は `ExtractError::QueryExecution`、書き込み失敗時は
    /// `ExtractError::Io` を返す。どちらの場合も出力ファイルは作られない
    pub async fn execute(
        &self,
        extract: &ExtractDefinition,
        file_name: &str,
    ) -> ExtractResult<ExtractReport> {
        let started_at = Utc::now();
        let clock = Instant::now();

        let sql = extract.render_sql(&self.source);
        info!("Running extract '{}'", extract.key);

        let table = self.query_runner.run_query(&sql).await?;
        info!(
            "Extract '{}' returned {} rows x {} columns",
            extract.key,
            table.row_count(),
            table.column_count()
        );

        let destination = self.paths.destination_for(extract.category, file_name);
        let rows_written = self.sink.write(table, &destination).await?;

        Ok(ExtractReport {
            rows_written,
            destination,
            duration: clock.elapsed(),
            started_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use crate::application::catalog;
    use crate::domain::entities::result_table::ResultTable;
    use crate::domain::errors::ExtractError;
    use crate::domain::repositories::query_runner::MockQueryRunner;

    /// 書き込み先と行数を記録するだけのシンク
    struct RecordingSink {
        written: Mutex<Vec<(PathBuf, usize)>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                written: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ExtractSink for RecordingSink {
        async fn write(&self, table: ResultTable, destination: &Path) -> ExtractResult<u64> {
            let rows = table.row_count();
            self.written
                .lock()
                .unwrap()
                .push((destination.to_path_buf(), rows));
            Ok(rows as u64)
        }
    }

    fn test_use_case(
        runner: MockQueryRunner,
        sink: Arc<RecordingSink>,
    ) -> RunExtractUseCase<MockQueryRunner, RecordingSink> {
        RunExtractUseCase::new(
            Arc::new(runner),
            sink,
            DatasetRef::new("test-project".to_string(), "test_dataset".to_string()),
            ExtractPaths::new(PathBuf::from("/raw"), PathBuf::from("/processed")),
        )
    }

    #[tokio::test]
    async fn test_execute_writes_to_category_directory() {
        let mut runner = MockQueryRunner::new();
        runner.expect_run_query().returning(|_| {
            Ok(ResultTable::new(
                vec!["organization_id".to_string()],
                vec![vec![Some("org-a".into())], vec![Some("org-b".into())]],
            ))
        });
        let sink = Arc::new(RecordingSink::new());
        let use_case = test_use_case(runner, sink.clone());

        let extract = catalog::find("monthly_charges").unwrap();
        let report = use_case.execute(extract, "charges.csv").await.unwrap();

        assert_eq!(report.rows_written, 2);
        assert_eq!(report.destination, PathBuf::from("/raw/charges.csv"));

        let written = sink.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, PathBuf::from("/raw/charges.csv"));
    }

    #[tokio::test]
    async fn test_execute_processed_extract_uses_processed_dir() {
        let mut runner = MockQueryRunner::new();
        runner.expect_run_query().returning(|_| {
            Ok(ResultTable::new(vec!["plan".to_string()], vec![]))
        });
        let sink = Arc::new(RecordingSink::new());
        let use_case = test_use_case(runner, sink);

        let extract = catalog::find("groupby_plan").unwrap();
        let report = use_case.execute(extract, "by_plan.csv").await.unwrap();

        assert_eq!(report.rows_written, 0);
        assert_eq!(report.destination, PathBuf::from("/processed/by_plan.csv"));
    }

    #[tokio::test]
    async fn test_execute_renders_sql_before_submitting() {
        let mut runner = MockQueryRunner::new();
        runner
            .expect_run_query()
            .withf(|sql: &str| {
                sql.contains("test-project.test_dataset.monthly_charges_2021")
                    && !sql.contains("{project}")
            })
            .returning(|_| Ok(ResultTable::new(vec!["x".to_string()], vec![])));
        let sink = Arc::new(RecordingSink::new());
        let use_case = test_use_case(runner, sink);

        let extract = catalog::find("monthly_charges").unwrap();
        use_case.execute(extract, "out.csv").await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_propagates_query_failure_without_writing() {
        let mut runner = MockQueryRunner::new();
        runner.expect_run_query().returning(|_| {
            Err(ExtractError::QueryExecution("table not found".to_string()))
        });
        let sink = Arc::new(RecordingSink::new());
        let use_case = test_use_case(runner, sink.clone());

        let extract = catalog::find("churn_numbers").unwrap();
        let result = use_case.execute(extract, "churn.csv").await;

        assert!(matches!(result, Err(ExtractError::QueryExecution(_))));
        // クエリ失敗時は書き込みが一切行われない
        assert!(sink.written.lock().unwrap().is_empty());
    }
}
