//! # Query Runner Trait
//!
//! リモートウェアハウスへのクエリ実行を抽象化

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::result_table::ResultTable;
use crate::domain::errors::ExtractResult;

/// クエリランナー
///
/// SQLを同期的なリクエスト/レスポンス単位で実行し、結果セット全体を
/// 返すリポジトリ。テストではモックに差し替え、本番ではBigQuery実装を使う
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QueryRunner: Send + Sync {
    /// SQLを実行し、完全な結果セットを返す
    ///
    /// # Arguments
    ///
    /// * `sql` - 実行するSQL文
    ///
    /// # Errors
    ///
    /// リモートエンジンがSQLを拒否した場合やクエリが完了しなかった場合に
    /// `ExtractError::QueryExecution` を返す
    async fn run_query(&self, sql: &str) -> ExtractResult<ResultTable>;
}
