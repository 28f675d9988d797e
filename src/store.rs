//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Components read
//! from the store; only `BoardActions` writes the board fields.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::BoardState;
use crate::models::{is_transient, BoardSummary};
use crate::session::Route;
use crate::toast::{ToastKind, ToastQueue};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub route: Route,
    pub signed_in: bool,
    /// Boards visible to the user
    pub boards: Vec<BoardSummary>,
    /// Board on screen, including optimistic changes
    pub board: Option<BoardState>,
    /// Board as last confirmed by the server; restored when a failed write
    /// cannot be followed by a reload
    pub confirmed: Option<BoardState>,
    /// Writes sent and not yet answered
    pub pending_writes: u32,
    /// A load finished while writes were outstanding, so the loaded board
    /// may predate them
    pub reload_after_writes: bool,
    pub loading: bool,
    pub load_error: Option<String>,
    pub toasts: ToastQueue,
}

impl AppState {
    pub fn new(route: Route, signed_in: bool) -> Self {
        Self {
            route,
            signed_in,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a toast, returns its id
pub fn store_push_toast(store: &AppStore, kind: ToastKind, message: impl Into<String>) -> u64 {
    store.toasts().write().push(kind, message)
}

pub fn store_dismiss_toast(store: &AppStore, id: u64) {
    store.toasts().write().dismiss(id);
}

/// Id of the board on screen
pub fn store_board_id(store: &AppStore) -> Option<String> {
    store.board().with_untracked(|b| b.as_ref().map(|b| b.board_id.clone()))
}

/// True while `board_id` is the board on screen
pub fn store_is_showing(store: &AppStore, board_id: &str) -> bool {
    store_board_id(store).as_deref() == Some(board_id)
}

/// Mutate the board on screen; returns `None` when no board is loaded
pub fn store_update_board<R>(store: &AppStore, f: impl FnOnce(&mut BoardState) -> R) -> Option<R> {
    let field = store.board();
    let mut board = field.write();
    let state = board.as_mut()?;
    let result = f(&mut *state);
    if cfg!(debug_assertions) {
        if let Err(e) = state.check_integrity() {
            log::error!("[BOARD] integrity violated: {}", e);
        }
    }
    Some(result)
}

/// Replace both the visible and the confirmed board
pub fn store_set_loaded_board(store: &AppStore, state: BoardState) {
    let pending = store.pending_writes().get_untracked();
    if pending > 0 {
        log::warn!("[BOARD] board loaded with {} writes outstanding, reloading once they finish", pending);
        store.reload_after_writes().set(true);
    }
    store.confirmed().set(Some(state.clone()));
    store.board().set(Some(state));
}

/// Show the last confirmed board after a failed write and a failed reload.
/// The confirmed copy stays as it is.
pub fn store_show_fallback(store: &AppStore, state: BoardState) {
    store.board().set(Some(state));
}

/// Drop the open board and its bookkeeping
pub fn store_clear_board(store: &AppStore) {
    store.board().set(None);
    store.confirmed().set(None);
    store.reload_after_writes().set(false);
}

pub fn store_begin_write(store: &AppStore) {
    store.pending_writes().update(|n| *n += 1);
}

pub fn store_end_write(store: &AppStore) {
    store.pending_writes().update(|n| *n = n.saturating_sub(1));
}

/// What a finished write leaves to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// Other writes are still outstanding
    Pending,
    /// The visible board is now the confirmed one
    Confirmed,
    /// A load overlapped the writes; fetch the board again
    Reload,
}

/// Advance the confirmed board once no write is outstanding
pub fn store_settle(store: &AppStore) -> Settled {
    if store.pending_writes().get_untracked() > 0 {
        return Settled::Pending;
    }
    if store.reload_after_writes().get_untracked() {
        store.reload_after_writes().set(false);
        return Settled::Reload;
    }
    let current = store.board().get_untracked();
    store.confirmed().set(current);
    Settled::Confirmed
}

/// Toast and return true if any id still waits for the server
pub fn store_refuse_transient(store: &AppStore, ids: &[&str]) -> bool {
    if ids.iter().any(|id| is_transient(id)) {
        store_push_toast(store, ToastKind::Info, "Still saving, try again in a moment");
        return true;
    }
    false
}

/// Add a board summary, keeping titles unique by id
pub fn store_add_board(store: &AppStore, summary: BoardSummary) {
    let field = store.boards();
    let mut boards = field.write();
    match boards.iter_mut().find(|b| b.id == summary.id) {
        Some(existing) => *existing = summary,
        None => boards.push(summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::snapshot;
    use pretty_assertions::assert_eq;

    fn store_with_board() -> AppStore {
        let store = Store::new(AppState::new(Route::Board("b1".into()), true));
        store_set_loaded_board(&store, BoardState::from_snapshot(snapshot(&[("a", &["t1", "t2"]), ("b", &[])])));
        store
    }

    fn order(store: &AppStore, column_id: &str) -> Vec<String> {
        store
            .board()
            .with_untracked(|b| b.as_ref().unwrap().column(column_id).unwrap().task_ids.clone())
    }

    fn confirmed_order(store: &AppStore, column_id: &str) -> Vec<String> {
        store
            .confirmed()
            .with_untracked(|b| b.as_ref().unwrap().column(column_id).unwrap().task_ids.clone())
    }

    #[test]
    fn test_update_without_board_is_none() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(AppState::default());
        assert_eq!(store_update_board(&store, |b| b.task_count()), None);
    }

    #[test]
    fn test_update_mutates_visible_board_only() {
        let owner = Owner::new();
        owner.set();
        let store = store_with_board();

        let mv = store_update_board(&store, |b| b.move_task("t1", "b", 0)).flatten();
        assert!(mv.is_some());
        assert_eq!(order(&store, "b"), vec!["t1"]);
        assert!(confirmed_order(&store, "b").is_empty());
    }

    #[test]
    fn test_confirmed_waits_for_last_write() {
        let owner = Owner::new();
        owner.set();
        let store = store_with_board();

        store_begin_write(&store);
        store_update_board(&store, |b| b.move_task("t1", "b", 0));
        store_begin_write(&store);
        store_update_board(&store, |b| b.move_task("t2", "b", 1));

        store_end_write(&store);
        assert_eq!(store_settle(&store), Settled::Pending);
        assert!(confirmed_order(&store, "b").is_empty());

        store_end_write(&store);
        assert_eq!(store_settle(&store), Settled::Confirmed);
        assert_eq!(confirmed_order(&store, "b"), vec!["t1", "t2"]);
    }

    #[test]
    fn test_load_during_writes_requests_reload() {
        let owner = Owner::new();
        owner.set();
        let store = store_with_board();

        store_begin_write(&store);
        store_update_board(&store, |b| b.move_task("t1", "b", 0));
        // Server answered the refresh before the move landed
        store_set_loaded_board(&store, BoardState::from_snapshot(snapshot(&[("a", &["t1", "t2"]), ("b", &[])])));

        store_end_write(&store);
        assert_eq!(store_settle(&store), Settled::Reload);
        assert!(!store.reload_after_writes().get_untracked());
        // The pre-move board was not promoted
        assert!(confirmed_order(&store, "b").is_empty());
    }

    #[test]
    fn test_fallback_keeps_confirmed() {
        let owner = Owner::new();
        owner.set();
        let store = store_with_board();
        store_update_board(&store, |b| b.move_task("t1", "b", 0));

        let last = store.confirmed().get_untracked().unwrap();
        store_show_fallback(&store, last.clone());

        assert_eq!(order(&store, "a"), vec!["t1", "t2"]);
        assert_eq!(store.confirmed().get_untracked(), Some(last));
    }

    #[test]
    fn test_is_showing_follows_open_board() {
        let owner = Owner::new();
        owner.set();
        let store = store_with_board();
        assert!(store_is_showing(&store, "b1"));
        assert!(!store_is_showing(&store, "b2"));

        store_clear_board(&store);
        assert!(!store_is_showing(&store, "b1"));
    }

    #[test]
    fn test_transient_ids_refused_with_toast() {
        let owner = Owner::new();
        owner.set();
        let store = store_with_board();

        assert!(!store_refuse_transient(&store, &["t1", "a"]));
        assert!(store.toasts().with_untracked(|t| t.items().is_empty()));

        assert!(store_refuse_transient(&store, &["t1", "tmp-123"]));
        assert_eq!(store.toasts().with_untracked(|t| t.items().len()), 1);
    }

    #[test]
    fn test_add_board_replaces_same_id() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(AppState::default());
        store_add_board(&store, BoardSummary { id: "b1".into(), title: "Old".into() });
        store_add_board(&store, BoardSummary { id: "b1".into(), title: "New".into() });
        store_add_board(&store, BoardSummary { id: "b2".into(), title: "Other".into() });

        let titles: Vec<String> = store.boards().with_untracked(|b| b.iter().map(|b| b.title.clone()).collect());
        assert_eq!(titles, vec!["New", "Other"]);
    }
}
