//! Extraction Error Taxonomy
//!
//! 抽出処理のエラー分類

use thiserror::Error;

/// 抽出処理で発生しうるエラー
///
/// どのバリアントもリトライされない。失敗したルーチンはその場で中断し、
/// エラーは呼び出し元までそのまま伝播する。
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 必須の設定値や認証鍵ファイルが欠落・不正
    #[error("configuration error: {0}")]
    Configuration(String),

    /// 認証情報がリモートサービスに拒否された
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// リモートエンジンがSQLを拒否、またはクエリが完了しなかった
    #[error("query execution failed: {0}")]
    QueryExecution(String),

    /// 出力先ディレクトリの欠落・書き込み不可などのI/O失敗
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// 抽出処理の結果型
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
