//! BigQuery Response Conversion
//!
//! クエリレスポンスからドメインの結果テーブルへの変換

use google_cloud_bigquery::http::job::query::QueryResponse;
use google_cloud_bigquery::http::tabledata::list::Tuple;

use crate::domain::entities::result_table::ResultTable;
use crate::domain::errors::{ExtractError, ExtractResult};

/// セル値を `Option<String>` に変換
///
/// jobs.query のレスポンスはスカラー値をJSON文字列として返し、
/// SQLのNULLは `null` として返す。REPEATED/RECORD型のセルは
/// ネストしたJSONのままシリアライズして保持する
pub fn cell_to_value(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// 1行分のタプルをセル値の列に変換
pub fn tuple_to_row(tuple: Tuple) -> Vec<Option<String>> {
    tuple
        .f
        .into_iter()
        .map(|cell| {
            // SDKの `Value` 列挙をそのままJSON値へ直列化してから変換する
            // (untaggedなので Null→null, String(s)→"s", Array/Struct→入れ子JSON)
            let json = serde_json::to_value(cell.v).unwrap_or(serde_json::Value::Null);
            cell_to_value(json)
        })
        .collect()
}

/// jobs.query のレスポンス全体を結果テーブルへ変換
///
/// # Errors
///
/// ジョブが応答期限内に完了しなかった場合、またはレスポンスにスキーマが
/// 含まれない場合に `ExtractError::QueryExecution` を返す
pub fn response_to_table(response: QueryResponse) -> ExtractResult<ResultTable> {
    if !response.job_complete {
        return Err(ExtractError::QueryExecution(
            "query did not complete before the response deadline".to_string(),
        ));
    }

    let schema = response.schema.ok_or_else(|| {
        ExtractError::QueryExecution("query response did not include a schema".to_string())
    })?;

    let columns: Vec<String> = schema.fields.into_iter().map(|f| f.name).collect();

    // 0行の結果では rows フィールド自体が省略される
    let rows: Vec<Vec<Option<String>>> = response
        .rows
        .unwrap_or_default()
        .into_iter()
        .map(tuple_to_row)
        .collect();

    Ok(ResultTable::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_cloud_bigquery::http::tabledata::list::{Cell, Value};
    use serde_json::json;

    #[test]
    fn test_cell_to_value_null_is_none() {
        assert_eq!(cell_to_value(json!(null)), None);
    }

    #[test]
    fn test_cell_to_value_string_passthrough() {
        assert_eq!(cell_to_value(json!("org-a")), Some("org-a".to_string()));
        // 数値もAPIからは文字列で届く
        assert_eq!(cell_to_value(json!("1200.5")), Some("1200.5".to_string()));
    }

    #[test]
    fn test_cell_to_value_non_string_serialized() {
        assert_eq!(cell_to_value(json!(true)), Some("true".to_string()));
        assert_eq!(cell_to_value(json!(42)), Some("42".to_string()));
        assert_eq!(
            cell_to_value(json!({"v": "nested"})),
            Some(r#"{"v":"nested"}"#.to_string())
        );
    }

    #[test]
    fn test_tuple_to_row_preserves_order_and_nulls() {
        let tuple = Tuple {
            f: vec![
                Cell { v: Value::String("org-a".to_string()) },
                Cell { v: Value::Null },
                Cell { v: Value::String("50".to_string()) },
            ],
        };

        let row = tuple_to_row(tuple);
        assert_eq!(
            row,
            vec![Some("org-a".to_string()), None, Some("50".to_string())]
        );
    }

    #[test]
    fn test_tuple_to_row_empty() {
        let tuple = Tuple { f: vec![] };
        assert!(tuple_to_row(tuple).is_empty());
    }
}
