//! # ExtractReport Entity
//!
//! 抽出結果レポートのバリューオブジェクト

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// 1回の抽出ルーチン実行の結果
///
/// 副作用としてのprintの代わりに、呼び出し元へ返される構造化された結果。
/// ログ出力の有無や形式は呼び出し元が決める
#[derive(Debug, Clone)]
pub struct ExtractReport {
    /// 書き込まれたデータ行数（ヘッダ行は含まない）
    pub rows_written: u64,
    /// 出力されたCSVファイルのフルパス
    pub destination: PathBuf,
    /// クエリ実行からCSV書き込み完了までの所要時間
    pub duration: Duration,
    /// 抽出を開始した時刻（UTC）
    pub started_at: DateTime<Utc>,
}

impl ExtractReport {
    /// 出力ファイル名（パスの最終要素）を返す
    pub fn file_name(&self) -> String {
        self.destination
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// 出力先ディレクトリを返す
    pub fn directory(&self) -> PathBuf {
        self.destination
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default()
    }
}
