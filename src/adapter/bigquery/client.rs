//! BigQuery Query Client
//!
//! QueryRunnerのBigQuery実装

use async_trait::async_trait;
use google_cloud_bigquery::client::Client;
use google_cloud_bigquery::http::job::query::QueryRequest;

use super::rows::response_to_table;
use crate::domain::entities::result_table::ResultTable;
use crate::domain::errors::{ExtractError, ExtractResult};
use crate::domain::repositories::query_runner::QueryRunner;

/// BigQueryクエリランナー
///
/// 認証済みクライアントを所有し、jobs.query で1文ずつ同期的に実行する。
/// タイムアウト・リトライ・ページングはSDKのネイティブな挙動に任せ、
/// この層では何も追加しない
pub struct BigQueryRunner {
    client: Client,
    project_id: String,
}

impl BigQueryRunner {
    /// 新しいランナーを作成
    pub fn new(client: Client, project_id: String) -> Self {
        Self { client, project_id }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl QueryRunner for BigQueryRunner {
    async fn run_query(&self, sql: &str) -> ExtractResult<ResultTable> {
        let request = QueryRequest {
            query: sql.to_string(),
            ..Default::default()
        };

        let response = self
            .client
            .job()
            .query(&self.project_id, &request)
            .await
            .map_err(|e| ExtractError::QueryExecution(e.to_string()))?;

        response_to_table(response)
    }
}
