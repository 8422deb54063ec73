//! # Extract Paths DTO
//!
//! 出力先ディレクトリ解決のData Transfer Object

use std::path::{Path, PathBuf};

use crate::domain::entities::extract::DestinationCategory;

/// 出力先パス設定
///
/// rawとprocessedのルートディレクトリを保持し、分類とファイル名から
/// 出力先のフルパスを解決する
#[derive(Debug, Clone)]
pub struct ExtractPaths {
    /// 生ダンプの出力ルート
    pub raw_dir: PathBuf,
    /// 加工済みビューの出力ルート
    pub processed_dir: PathBuf,
}

impl ExtractPaths {
    /// 新しいパス設定を作成
    pub fn new(raw_dir: PathBuf, processed_dir: PathBuf) -> Self {
        Self {
            raw_dir,
            processed_dir,
        }
    }

    /// 分類に対応する出力ディレクトリを返す
    pub fn dir_for(&self, category: DestinationCategory) -> &Path {
        match category {
            DestinationCategory::Raw => &self.raw_dir,
            DestinationCategory::Processed => &self.processed_dir,
        }
    }

    /// 分類とファイル名から出力先のフルパスを解決
    pub fn destination_for(&self, category: DestinationCategory, file_name: &str) -> PathBuf {
        self.dir_for(category).join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_paths() -> ExtractPaths {
        ExtractPaths::new(
            PathBuf::from("/data/raw"),
            PathBuf::from("/data/processed"),
        )
    }

    #[test]
    fn test_dir_for_category() {
        let paths = sample_paths();
        assert_eq!(
            paths.dir_for(DestinationCategory::Raw),
            Path::new("/data/raw")
        );
        assert_eq!(
            paths.dir_for(DestinationCategory::Processed),
            Path::new("/data/processed")
        );
    }

    #[test]
    fn test_destination_for_joins_file_name() {
        let paths = sample_paths();
        assert_eq!(
            paths.destination_for(DestinationCategory::Raw, "monthly_charges.csv"),
            PathBuf::from("/data/raw/monthly_charges.csv")
        );
        assert_eq!(
            paths.destination_for(DestinationCategory::Processed, "churn.csv"),
            PathBuf::from("/data/processed/churn.csv")
        );
    }
}
