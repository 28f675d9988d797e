//! Board Sync
//!
//! Load, persist and compensating-reload flows between the local board
//! state and the API. A failed write is never rolled back piecemeal: the
//! whole board is fetched again, and if that also fails the last board
//! that loaded successfully is shown.

use std::future::Future;

use crate::api::BoardApi;
use crate::board::{BoardState, TaskMove};
use crate::error::{AppError, AppResult};

/// Result of a write against the API
#[derive(Debug)]
pub enum Commit<T> {
    Done(T),
    /// The write failed and the board was replaced by `state`
    Recovered {
        error: AppError,
        state: BoardState,
        /// Set when the reload failed too and `state` is the fallback
        reload_error: Option<AppError>,
    },
}

/// Fetch and build a board
pub async fn load_board<A: BoardApi + ?Sized>(api: &A, board_id: &str) -> AppResult<BoardState> {
    let snapshot = api.fetch_board(board_id).await?;
    let state = BoardState::from_snapshot(snapshot);
    log::info!(
        "[BOARD] loaded {} ({} columns, {} tasks)",
        state.board_id,
        state.columns().len(),
        state.task_count()
    );
    Ok(state)
}

/// Persist a move that was already applied locally
pub async fn persist_move<A: BoardApi + ?Sized>(api: &A, mv: &TaskMove) -> AppResult<()> {
    api.move_task(&mv.task_id, &mv.to_column, mv.to_index).await
}

/// Reload the board after a failed write. Falls back to `last_loaded` when
/// the reload fails as well.
pub async fn recover<A: BoardApi + ?Sized>(
    api: &A,
    board_id: &str,
    last_loaded: &BoardState,
) -> (BoardState, Option<AppError>) {
    match load_board(api, board_id).await {
        Ok(state) => (state, None),
        Err(e) => {
            log::error!("[BOARD] reload after failed write failed: {}", e);
            (last_loaded.clone(), Some(e))
        }
    }
}

/// Run `write`; on failure, reload the board
pub async fn commit<A, T, F>(api: &A, board_id: &str, last_loaded: &BoardState, write: F) -> Commit<T>
where
    A: BoardApi + ?Sized,
    F: Future<Output = AppResult<T>>,
{
    match write.await {
        Ok(value) => Commit::Done(value),
        Err(error) => {
            log::warn!("[BOARD] write failed, reloading: {}", error);
            let (state, reload_error) = recover(api, board_id, last_loaded).await;
            Commit::Recovered { error, state, reload_error }
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::{Cell, RefCell};

    use async_trait::async_trait;

    use crate::api::BoardApi;
    use crate::error::{AppError, AppResult};
    use crate::models::{BoardSnapshot, BoardSummary, Column, Task, TaskInput};

    /// In-memory API
    pub struct FakeApi {
        pub snapshot: RefCell<BoardSnapshot>,
        pub fail_writes: Cell<bool>,
        pub fail_fetch: Cell<bool>,
        pub calls: RefCell<Vec<String>>,
        next_id: Cell<u32>,
    }

    impl FakeApi {
        pub fn new(snapshot: BoardSnapshot) -> Self {
            Self {
                snapshot: RefCell::new(snapshot),
                fail_writes: Cell::new(false),
                fail_fetch: Cell::new(false),
                calls: RefCell::new(Vec::new()),
                next_id: Cell::new(100),
            }
        }

        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }

        fn write_guard(&self) -> AppResult<()> {
            if self.fail_writes.get() {
                return Err(AppError::Network("connection reset".into()));
            }
            Ok(())
        }

        fn fresh_id(&self, prefix: &str) -> String {
            let n = self.next_id.get();
            self.next_id.set(n + 1);
            format!("{}{}", prefix, n)
        }
    }

    #[async_trait(?Send)]
    impl BoardApi for FakeApi {
        async fn list_boards(&self) -> AppResult<Vec<BoardSummary>> {
            let snap = self.snapshot.borrow();
            Ok(vec![BoardSummary { id: snap.board.id.clone(), title: snap.board.title.clone() }])
        }

        async fn create_board(&self, title: &str) -> AppResult<BoardSummary> {
            self.write_guard()?;
            Ok(BoardSummary { id: self.fresh_id("b"), title: title.to_string() })
        }

        async fn fetch_board(&self, board_id: &str) -> AppResult<BoardSnapshot> {
            self.record(format!("fetch {}", board_id));
            if self.fail_fetch.get() {
                return Err(AppError::Network("offline".into()));
            }
            Ok(self.snapshot.borrow().clone())
        }

        async fn create_column(&self, _board_id: &str, title: &str) -> AppResult<Column> {
            self.record(format!("create column {}", title));
            self.write_guard()?;
            let column = Column { id: self.fresh_id("c"), title: title.to_string(), task_ids: Some(vec![]), position: None };
            self.snapshot.borrow_mut().columns.push(column.clone());
            Ok(column)
        }

        async fn rename_column(&self, column_id: &str, title: &str) -> AppResult<()> {
            self.record(format!("rename column {}", column_id));
            self.write_guard()?;
            if let Some(c) = self.snapshot.borrow_mut().columns.iter_mut().find(|c| c.id == column_id) {
                c.title = title.to_string();
            }
            Ok(())
        }

        async fn delete_column(&self, column_id: &str) -> AppResult<()> {
            self.record(format!("delete column {}", column_id));
            self.write_guard()?;
            let mut snap = self.snapshot.borrow_mut();
            snap.columns.retain(|c| c.id != column_id);
            snap.tasks.retain(|t| t.column_id != column_id);
            Ok(())
        }

        async fn create_task(&self, input: &TaskInput) -> AppResult<Task> {
            self.record(format!("create task {}", input.title));
            self.write_guard()?;
            let task = input.clone().into_task(self.fresh_id("t"));
            let mut snap = self.snapshot.borrow_mut();
            if let Some(c) = snap.columns.iter_mut().find(|c| c.id == task.column_id) {
                c.task_ids.get_or_insert_with(Vec::new).push(task.id.clone());
            }
            snap.tasks.push(task.clone());
            Ok(task)
        }

        async fn update_task(&self, task_id: &str, input: &TaskInput) -> AppResult<()> {
            self.record(format!("update task {}", task_id));
            self.write_guard()?;
            if let Some(t) = self.snapshot.borrow_mut().tasks.iter_mut().find(|t| t.id == task_id) {
                t.title = input.title.clone();
            }
            Ok(())
        }

        async fn delete_task(&self, task_id: &str) -> AppResult<()> {
            self.record(format!("delete task {}", task_id));
            self.write_guard()?;
            let mut snap = self.snapshot.borrow_mut();
            snap.tasks.retain(|t| t.id != task_id);
            for c in snap.columns.iter_mut() {
                if let Some(ids) = c.task_ids.as_mut() {
                    ids.retain(|id| id != task_id);
                }
            }
            Ok(())
        }

        async fn move_task(&self, task_id: &str, column_id: &str, position: usize) -> AppResult<()> {
            self.record(format!("move {} {} {}", task_id, column_id, position));
            self.write_guard()?;
            let mut snap = self.snapshot.borrow_mut();
            for c in snap.columns.iter_mut() {
                if let Some(ids) = c.task_ids.as_mut() {
                    ids.retain(|id| id != task_id);
                }
            }
            if let Some(c) = snap.columns.iter_mut().find(|c| c.id == column_id) {
                let ids = c.task_ids.get_or_insert_with(Vec::new);
                let at = position.min(ids.len());
                ids.insert(at, task_id.to_string());
            }
            if let Some(t) = snap.tasks.iter_mut().find(|t| t.id == task_id) {
                t.column_id = column_id.to_string();
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeApi;
    use super::*;
    use crate::board::tests::snapshot;
    use crate::models::{Priority, TaskInput};
    use pretty_assertions::assert_eq;

    fn order(state: &BoardState, column_id: &str) -> Vec<String> {
        state.column(column_id).unwrap().task_ids.clone()
    }

    #[tokio::test]
    async fn test_load_replaces_state() {
        let api = FakeApi::new(snapshot(&[("a", &["t1", "t2"]), ("b", &[])]));
        let state = load_board(&api, "b1").await.unwrap();
        assert_eq!(order(&state, "a"), vec!["t1", "t2"]);
        assert_eq!(*api.calls.borrow(), vec!["fetch b1".to_string()]);
    }

    #[tokio::test]
    async fn test_load_failure_surfaces_error() {
        let api = FakeApi::new(snapshot(&[("a", &[])]));
        api.fail_fetch.set(true);
        let err = load_board(&api, "b1").await.unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
    }

    #[tokio::test]
    async fn test_move_persists_after_optimistic_update() {
        let api = FakeApi::new(snapshot(&[("a", &["t1", "t2"]), ("b", &[])]));
        let loaded = load_board(&api, "b1").await.unwrap();
        let mut state = loaded.clone();

        let mv = state.move_task("t1", "b", 0).unwrap();
        // Visible before the network call
        assert_eq!(order(&state, "b"), vec!["t1"]);

        let result = commit(&api, "b1", &loaded, persist_move(&api, &mv)).await;
        assert!(matches!(result, Commit::Done(())));
        assert_eq!(api.calls.borrow().last().map(String::as_str), Some("move t1 b 0"));

        // Server agrees with the optimistic state
        let reloaded = load_board(&api, "b1").await.unwrap();
        assert_eq!(order(&reloaded, "a"), order(&state, "a"));
        assert_eq!(order(&reloaded, "b"), order(&state, "b"));
    }

    #[tokio::test]
    async fn test_failed_move_reverts_to_server_state() {
        let api = FakeApi::new(snapshot(&[("a", &["t1", "t2"]), ("b", &[])]));
        let loaded = load_board(&api, "b1").await.unwrap();
        let mut state = loaded.clone();

        let mv = state.move_task("t1", "b", 0).unwrap();
        api.fail_writes.set(true);

        match commit(&api, "b1", &loaded, persist_move(&api, &mv)).await {
            Commit::Recovered { error, state: recovered, reload_error } => {
                assert!(matches!(error, AppError::Network(_)));
                assert!(reload_error.is_none());
                state = recovered;
            }
            Commit::Done(_) => panic!("write should fail"),
        }
        assert_eq!(order(&state, "a"), vec!["t1", "t2"]);
        assert!(order(&state, "b").is_empty());
        state.check_integrity().unwrap();
    }

    #[tokio::test]
    async fn test_failed_reload_falls_back_to_last_loaded() {
        let api = FakeApi::new(snapshot(&[("a", &["t1", "t2", "t3"])]));
        let loaded = load_board(&api, "b1").await.unwrap();
        let mut state = loaded.clone();
        let mv = state.reorder_within_column("t3", 0).unwrap();

        api.fail_writes.set(true);
        api.fail_fetch.set(true);
        match commit(&api, "b1", &loaded, persist_move(&api, &mv)).await {
            Commit::Recovered { state: recovered, reload_error, .. } => {
                assert!(reload_error.is_some());
                assert_eq!(recovered, loaded);
            }
            Commit::Done(_) => panic!("write should fail"),
        }
    }

    #[tokio::test]
    async fn test_create_task_returns_server_task() {
        let api = FakeApi::new(snapshot(&[("a", &["t1"])]));
        let loaded = load_board(&api, "b1").await.unwrap();
        let input = TaskInput {
            column_id: "a".into(),
            title: "Send quote".into(),
            description: String::new(),
            due_date: None,
            priority: Priority::High,
            labels: vec![],
            subtasks: vec![],
            assignees: vec![],
        };
        match commit(&api, "b1", &loaded, api.create_task(&input)).await {
            Commit::Done(task) => {
                assert_eq!(task.title, "Send quote");
                assert_eq!(task.column_id, "a");
            }
            Commit::Recovered { error, .. } => panic!("unexpected failure: {}", error),
        }
    }
}
