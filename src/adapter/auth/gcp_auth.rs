//! GCP Authentication
//!
//! Google Cloud Platform認証機能

use google_cloud_bigquery::client::{Client, ClientConfig};

use crate::domain::errors::{ExtractError, ExtractResult};

/// Expands tilde in path and returns the full path
pub fn expand_key_path(key_path: &str) -> String {
    shellexpand::tilde(key_path).to_string()
}

/// Creates a BigQuery client with service account authentication
///
/// クライアントは1回の実行につき1度だけ構築され、以降は読み取り専用の
/// ハンドルとして全抽出で共有される。鍵ファイルが存在しない場合は
/// `Configuration`、認証情報がリモートに拒否された場合は `Authentication`。
/// どちらの失敗も致命的で、リトライは行わない
#[cfg_attr(coverage_nightly, coverage(off))]
pub async fn create_bigquery_client(key_path: &str) -> ExtractResult<Client> {
    let expanded_path = expand_key_path(key_path);

    if !std::path::Path::new(&expanded_path).is_file() {
        return Err(ExtractError::Configuration(format!(
            "service account key file not found: {expanded_path}"
        )));
    }

    std::env::set_var("GOOGLE_APPLICATION_CREDENTIALS", &expanded_path);

    let (config, _project_id) = ClientConfig::new_with_auth().await.map_err(|e| {
        ExtractError::Authentication(format!("service account authentication failed: {e}"))
    })?;

    let client = Client::new(config).await.map_err(|e| {
        ExtractError::Authentication(format!("failed to create BigQuery client: {e}"))
    })?;

    Ok(client)
}
