//! REST API Bindings
//!
//! `BoardApi` / `AuthApi` are the seams the board flows depend on;
//! `ApiClient` implements them over HTTP.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{BoardSnapshot, BoardSummary, Column, Credentials, Task, TaskInput};

mod auth;
mod boards;
mod client;
mod columns;
mod tasks;

pub use client::ApiClient;

/// Board, column and task endpoints
#[async_trait(?Send)]
pub trait BoardApi {
    async fn list_boards(&self) -> AppResult<Vec<BoardSummary>>;
    async fn create_board(&self, title: &str) -> AppResult<BoardSummary>;
    async fn fetch_board(&self, board_id: &str) -> AppResult<BoardSnapshot>;

    async fn create_column(&self, board_id: &str, title: &str) -> AppResult<Column>;
    async fn rename_column(&self, column_id: &str, title: &str) -> AppResult<()>;
    async fn delete_column(&self, column_id: &str) -> AppResult<()>;

    async fn create_task(&self, input: &TaskInput) -> AppResult<Task>;
    async fn update_task(&self, task_id: &str, input: &TaskInput) -> AppResult<()>;
    async fn delete_task(&self, task_id: &str) -> AppResult<()>;
    async fn move_task(&self, task_id: &str, column_id: &str, position: usize) -> AppResult<()>;
}

/// Session endpoints
#[async_trait(?Send)]
pub trait AuthApi {
    /// Exchange credentials for a token and store it
    async fn login(&self, credentials: &Credentials) -> AppResult<()>;
    fn logout(&self);
    fn is_signed_in(&self) -> bool;
}

#[async_trait(?Send)]
impl BoardApi for ApiClient {
    async fn list_boards(&self) -> AppResult<Vec<BoardSummary>> {
        boards::list_boards(self).await
    }

    async fn create_board(&self, title: &str) -> AppResult<BoardSummary> {
        boards::create_board(self, title).await
    }

    async fn fetch_board(&self, board_id: &str) -> AppResult<BoardSnapshot> {
        boards::fetch_board(self, board_id).await
    }

    async fn create_column(&self, board_id: &str, title: &str) -> AppResult<Column> {
        columns::create_column(self, board_id, title).await
    }

    async fn rename_column(&self, column_id: &str, title: &str) -> AppResult<()> {
        columns::rename_column(self, column_id, title).await
    }

    async fn delete_column(&self, column_id: &str) -> AppResult<()> {
        columns::delete_column(self, column_id).await
    }

    async fn create_task(&self, input: &TaskInput) -> AppResult<Task> {
        tasks::create_task(self, input).await
    }

    async fn update_task(&self, task_id: &str, input: &TaskInput) -> AppResult<()> {
        tasks::update_task(self, task_id, input).await
    }

    async fn delete_task(&self, task_id: &str) -> AppResult<()> {
        tasks::delete_task(self, task_id).await
    }

    async fn move_task(&self, task_id: &str, column_id: &str, position: usize) -> AppResult<()> {
        tasks::move_task(self, task_id, column_id, position).await
    }
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> AppResult<()> {
        let token = auth::login(self, credentials).await?;
        self.tokens().save(&token)
    }

    fn logout(&self) {
        self.tokens().clear();
    }

    fn is_signed_in(&self) -> bool {
        self.tokens().load().is_some()
    }
}
