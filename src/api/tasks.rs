//! Task Endpoints

use serde::Serialize;

use super::ApiClient;
use crate::error::AppResult;
use crate::models::{Task, TaskInput};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveTaskArgs<'a> {
    column_id: &'a str,
    position: usize,
}

pub async fn create_task(api: &ApiClient, input: &TaskInput) -> AppResult<Task> {
    api.send_json(api.post(&["tasks"]).json(input)).await
}

pub async fn update_task(api: &ApiClient, task_id: &str, input: &TaskInput) -> AppResult<()> {
    api.send_empty(api.put(&["tasks", task_id]).json(input)).await
}

pub async fn delete_task(api: &ApiClient, task_id: &str) -> AppResult<()> {
    api.send_empty(api.delete(&["tasks", task_id])).await
}

pub async fn move_task(api: &ApiClient, task_id: &str, column_id: &str, position: usize) -> AppResult<()> {
    log::debug!("[API] move {} -> {}[{}]", task_id, column_id, position);
    api.send_empty(api.put(&["tasks", task_id, "move"]).json(&MoveTaskArgs { column_id, position })).await
}
