//! # Extract Definition Entity
//!
//! 抽出定義のドメインエンティティ

/// 出力先の分類
///
/// 生テーブルのダンプは `Raw`、結合・集計済みのビューは `Processed` に
/// 書き込まれる
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationCategory {
    /// 無加工のフルテーブルダンプ
    Raw,
    /// フィルタ・結合・集計済みの派生ビュー
    Processed,
}

/// ソーステーブルの参照情報
///
/// SQLテンプレート内の `{project}` / `{dataset}` プレースホルダを
/// 解決するための値オブジェクト
#[derive(Debug, Clone)]
pub struct DatasetRef {
    pub project_id: String,
    pub dataset: String,
}

impl DatasetRef {
    pub fn new(project_id: String, dataset: String) -> Self {
        Self {
            project_id,
            dataset,
        }
    }
}

/// 抽出定義
///
/// 1つの固定SQLと出力先分類のペア。SQL自体がCTE・結合・ウィンドウ集計を
/// 含むことがあるが、ルーチンからは単一のリクエスト/レスポンス単位として
/// 扱われる
#[derive(Debug, Clone)]
pub struct ExtractDefinition {
    /// CLIで指定する抽出キー
    pub key: &'static str,
    /// 抽出内容の説明（`--list` 表示用）
    pub description: &'static str,
    /// 出力先分類
    pub category: DestinationCategory,
    /// `{project}` / `{dataset}` プレースホルダを含むSQLテンプレート
    pub sql_template: &'static str,
}

impl ExtractDefinition {
    /// SQLテンプレートをデータセット参照で解決して実行可能なSQLを返す
    pub fn render_sql(&self, source: &DatasetRef) -> String {
        self.sql_template
            .replace("{project}", &source.project_id)
            .replace("{dataset}", &source.dataset)
    }

    /// デフォルトの出力ファイル名（`<key>.csv`）
    pub fn default_file_name(&self) -> String {
        format!("{}.csv", self.key)
    }
}
