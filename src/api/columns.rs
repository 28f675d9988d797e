//! Column Endpoints

use serde::Serialize;

use super::ApiClient;
use crate::error::AppResult;
use crate::models::Column;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateColumnArgs<'a> {
    board_id: &'a str,
    title: &'a str,
}

#[derive(Serialize)]
struct RenameColumnArgs<'a> {
    title: &'a str,
}

pub async fn create_column(api: &ApiClient, board_id: &str, title: &str) -> AppResult<Column> {
    api.send_json(api.post(&["columns"]).json(&CreateColumnArgs { board_id, title })).await
}

pub async fn rename_column(api: &ApiClient, column_id: &str, title: &str) -> AppResult<()> {
    api.send_empty(api.put(&["columns", column_id]).json(&RenameColumnArgs { title })).await
}

pub async fn delete_column(api: &ApiClient, column_id: &str) -> AppResult<()> {
    api.send_empty(api.delete(&["columns", column_id])).await
}
