//! Extraction Configuration
//!
//! 環境変数または設定ファイルからの設定読み込み

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::application::dto::extract_paths::ExtractPaths;
use crate::domain::entities::extract::DatasetRef;
use crate::domain::errors::{ExtractError, ExtractResult};

fn default_raw_dir() -> PathBuf {
    PathBuf::from("data/raw")
}

fn default_processed_dir() -> PathBuf {
    PathBuf::from("data/processed")
}

/// 実行時設定
///
/// 認証鍵ファイル・対象プロジェクト・出力ルートディレクトリを1回だけ
/// 解決し、以降は読み取り専用の値として各抽出に渡される
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// GCPプロジェクトID
    pub project_id: String,
    /// ソーステーブルを保持するBigQueryデータセット名
    pub dataset: String,
    /// サービスアカウント鍵ファイルのパス
    pub service_account_key_path: String,
    /// 生ダンプの出力ルート
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,
    /// 加工済みビューの出力ルート
    #[serde(default = "default_processed_dir")]
    pub processed_dir: PathBuf,
}

impl Config {
    /// JSON設定ファイルから読み込む
    ///
    /// # Errors
    ///
    /// ファイルが読めない、またはJSONとして不正な場合に
    /// `ExtractError::Configuration` を返す
    pub fn load(path: &str) -> ExtractResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ExtractError::Configuration(format!("failed to read config file {path}: {e}"))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ExtractError::Configuration(format!("invalid config file {path}: {e}"))
        })
    }

    /// プロセス環境変数から読み込む
    ///
    /// `SERVICE_ACCOUNT_FILE`・`PROJECT_ID`・`DATASET` は必須。
    /// `RAW_DIR` / `PROCESSED_DIR` は未設定なら `data/raw` / `data/processed`
    ///
    /// # Errors
    ///
    /// 必須の環境変数が未設定の場合に `ExtractError::Configuration` を返す
    pub fn from_env() -> ExtractResult<Self> {
        let require = |name: &str| {
            env::var(name).map_err(|_| {
                ExtractError::Configuration(format!("environment variable {name} is not set"))
            })
        };

        Ok(Self {
            service_account_key_path: require("SERVICE_ACCOUNT_FILE")?,
            project_id: require("PROJECT_ID")?,
            dataset: require("DATASET")?,
            raw_dir: env::var("RAW_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_raw_dir()),
            processed_dir: env::var("PROCESSED_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_processed_dir()),
        })
    }

    /// ソーステーブルのデータセット参照を返す
    pub fn source(&self) -> DatasetRef {
        DatasetRef::new(self.project_id.clone(), self.dataset.clone())
    }

    /// 出力先パス設定を返す
    pub fn paths(&self) -> ExtractPaths {
        ExtractPaths::new(self.raw_dir.clone(), self.processed_dir.clone())
    }
}
