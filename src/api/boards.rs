//! Board Endpoints

use serde::Serialize;

use super::ApiClient;
use crate::error::AppResult;
use crate::models::{BoardSnapshot, BoardSummary};

#[derive(Serialize)]
struct CreateBoardArgs<'a> {
    title: &'a str,
}

pub async fn list_boards(api: &ApiClient) -> AppResult<Vec<BoardSummary>> {
    api.send_json(api.get(&["boards"])).await
}

pub async fn create_board(api: &ApiClient, title: &str) -> AppResult<BoardSummary> {
    api.send_json(api.post(&["boards"]).json(&CreateBoardArgs { title })).await
}

pub async fn fetch_board(api: &ApiClient, board_id: &str) -> AppResult<BoardSnapshot> {
    log::debug!("[API] GET board {}", board_id);
    api.send_json(api.get(&["boards", board_id])).await
}
