//! # Extract Sink Trait
//!
//! 結果テーブルのシリアライズ先を抽象化

use async_trait::async_trait;
use std::path::Path;

use crate::domain::entities::result_table::ResultTable;
use crate::domain::errors::ExtractResult;

/// 抽出シンク
///
/// 結果テーブルを出力先パスへ書き出すリポジトリ。テーブルは書き込み後に
/// 破棄されるため所有権ごと受け取る
#[async_trait]
pub trait ExtractSink: Send + Sync {
    /// テーブルを出力先へ書き込み、書き込んだデータ行数を返す
    ///
    /// 既存ファイルは全体が上書きされる。追記のセマンティクスはない
    ///
    /// # Errors
    ///
    /// 出力先ディレクトリが存在しない、または書き込み不可の場合に
    /// `ExtractError::Io` を返す
    async fn write(&self, table: ResultTable, destination: &Path) -> ExtractResult<u64>;
}
