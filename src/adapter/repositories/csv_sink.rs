//! CSV Extract Sink Implementation
//!
//! ExtractSinkのCSVファイル実装

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::entities::result_table::ResultTable;
use crate::domain::errors::{ExtractError, ExtractResult};
use crate::domain::repositories::extract_sink::ExtractSink;

/// CSVファイルベースの抽出シンク
///
/// ヘッダ行 + レコード行をデフォルトの区切り文字で書き出す。
/// クォートは必要なセルのみ（標準的なCSVエスケープ）。
/// 出力先に既存ファイルがあれば全体を上書きする
pub struct CsvExtractSink;

impl CsvExtractSink {
    /// 新しいシンクを作成
    pub fn new() -> Self {
        Self
    }

    /// テーブルをCSVへ書き出す（内部実装）
    fn write_internal(table: &ResultTable, destination: &Path) -> ExtractResult<u64> {
        let mut writer = csv::Writer::from_path(destination).map_err(csv_error_to_extract)?;

        writer
            .write_record(table.columns())
            .map_err(csv_error_to_extract)?;

        for row in table.rows() {
            // NULLセルは空フィールドとして出力
            writer
                .write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))
                .map_err(csv_error_to_extract)?;
        }

        writer.flush()?;

        Ok(table.row_count() as u64)
    }
}

impl Default for CsvExtractSink {
    fn default() -> Self {
        Self::new()
    }
}

/// csvクレートのエラーをドメインのI/Oエラーへ変換
fn csv_error_to_extract(e: csv::Error) -> ExtractError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => ExtractError::Io(io),
        other => ExtractError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("CSV serialization failed: {other:?}"),
        )),
    }
}

#[async_trait]
impl ExtractSink for CsvExtractSink {
    async fn write(&self, table: ResultTable, destination: &Path) -> ExtractResult<u64> {
        // 同期的なファイル書き込みなのでspawn_blockingでラップ
        let destination: PathBuf = destination.to_path_buf();
        tokio::task::spawn_blocking(move || Self::write_internal(&table, &destination))
            .await
            .map_err(|e| {
                ExtractError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("blocking write task failed: {e}"),
                ))
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_table() -> ResultTable {
        ResultTable::new(
            vec![
                "organization_id".to_string(),
                "total_revenue_2021".to_string(),
                "country".to_string(),
            ],
            vec![
                vec![Some("org-a".into()), Some("50".into()), Some("EE".into())],
                vec![Some("org-b".into()), Some("1200.5".into()), None],
            ],
        )
    }

    #[tokio::test]
    async fn test_write_creates_csv_with_header() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("paying_organizations.csv");

        let sink = CsvExtractSink::new();
        let rows = sink.write(sample_table(), &dest).await.unwrap();

        assert_eq!(rows, 2);
        let content = fs::read_to_string(&dest).unwrap();
        assert_eq!(
            content,
            "organization_id,total_revenue_2021,country\norg-a,50,EE\norg-b,1200.5,\n"
        );
    }

    #[tokio::test]
    async fn test_write_empty_table_is_header_only() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("empty.csv");

        let table = ResultTable::new(
            vec!["plan".to_string(), "total_count".to_string()],
            vec![],
        );

        let sink = CsvExtractSink::new();
        let rows = sink.write(table, &dest).await.unwrap();

        assert_eq!(rows, 0);
        let content = fs::read_to_string(&dest).unwrap();
        assert_eq!(content, "plan,total_count\n");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("extract.csv");

        let sink = CsvExtractSink::new();
        sink.write(sample_table(), &dest).await.unwrap();

        // 2回目は1行だけのテーブルで完全に上書きされる
        let smaller = ResultTable::new(
            vec!["organization_id".to_string()],
            vec![vec![Some("org-z".into())]],
        );
        sink.write(smaller, &dest).await.unwrap();

        let content = fs::read_to_string(&dest).unwrap();
        assert_eq!(content, "organization_id\norg-z\n");
        assert!(!content.contains("org-a"));
    }

    #[tokio::test]
    async fn test_write_quotes_fields_when_needed() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("quoted.csv");

        let table = ResultTable::new(
            vec!["industry".to_string()],
            vec![vec![Some("Software, SaaS".into())]],
        );

        let sink = CsvExtractSink::new();
        sink.write(table, &dest).await.unwrap();

        let content = fs::read_to_string(&dest).unwrap();
        assert_eq!(content, "industry\n\"Software, SaaS\"\n");
    }

    #[tokio::test]
    async fn test_write_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("does_not_exist").join("extract.csv");

        let sink = CsvExtractSink::new();
        let result = sink.write(sample_table(), &dest).await;

        assert!(matches!(result, Err(ExtractError::Io(_))));
        // 部分的なファイルも残らない
        assert!(!dest.exists());
    }
}
