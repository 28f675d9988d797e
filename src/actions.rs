//! Board Actions
//!
//! The only writer of the board state. Every change is applied to the
//! visible board first and persisted afterwards; a failed write replaces the
//! board with a fresh copy from the server.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::DropTarget;

use crate::api::{ApiClient, AuthApi, BoardApi};
use crate::board::TaskMove;
use crate::error::{AppError, AppResult};
use crate::models::{transient_id, Credentials, TaskInput};
use crate::session::{guard, Route};
use crate::store::{
    store_add_board, store_begin_write, store_board_id, store_clear_board, store_end_write, store_is_showing,
    store_push_toast, store_refuse_transient, store_set_loaded_board, store_settle, store_show_fallback,
    store_update_board, AppStateStoreFields, AppStore, Settled,
};
use crate::sync::{self, Commit};
use crate::toast::ToastKind;

#[derive(Clone, Copy)]
pub struct BoardActions {
    store: AppStore,
    api: StoredValue<ApiClient, LocalStorage>,
}

impl BoardActions {
    pub fn new(store: AppStore, api: ApiClient) -> Self {
        Self {
            store,
            api: StoredValue::new_local(api),
        }
    }

    fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn toast(&self, kind: ToastKind, message: impl Into<String>) {
        store_push_toast(&self.store, kind, message);
    }

    /// Toast the error; a rejected session also signs out
    pub fn report(&self, error: &AppError) {
        if error.is_unauthorized() {
            log::warn!("[BOARD] session rejected, back to login");
            self.sign_out();
        } else {
            log::error!("[BOARD] {}", error);
        }
        self.toast(ToastKind::Error, error.user_message());
    }

    // ========================
    // Navigation / session
    // ========================

    pub fn navigate(&self, requested: Route) {
        let signed_in = self.api().is_signed_in();
        self.store.signed_in().set(signed_in);
        let route = guard(requested, signed_in);
        if self.store.route().with_untracked(|r| *r == route) {
            return;
        }
        log::debug!("[APP] route {:?}", route);
        self.store.route().set(route.clone());
        match route {
            Route::Boards => self.load_boards(),
            Route::Board(board_id) => self.load_board(board_id),
            Route::Login => {}
        }
    }

    /// Sign in; `on_failed` gets a message for the form
    pub fn login(&self, credentials: Credentials, on_failed: impl FnOnce(String) + 'static) {
        let this = *self;
        spawn_local(async move {
            match this.api().login(&credentials).await {
                Ok(()) => {
                    log::info!("[APP] signed in as {}", credentials.email);
                    this.navigate(Route::Boards);
                }
                Err(AppError::Http { status: 401, .. }) | Err(AppError::Unauthorized) => {
                    on_failed("Wrong email or password".to_string());
                }
                Err(e) => {
                    log::error!("[APP] login failed: {}", e);
                    on_failed(e.user_message());
                }
            }
        });
    }

    pub fn logout(&self) {
        log::info!("[APP] signed out");
        self.sign_out();
    }

    fn sign_out(&self) {
        self.api().logout();
        self.store.signed_in().set(false);
        store_clear_board(&self.store);
        self.store.boards().write().clear();
        self.store.route().set(Route::Login);
    }

    // ========================
    // Boards
    // ========================

    pub fn load_boards(&self) {
        let this = *self;
        spawn_local(async move {
            match this.api().list_boards().await {
                Ok(boards) => this.store.boards().set(boards),
                Err(e) => this.report(&e),
            }
        });
    }

    pub fn create_board(&self, title: String) {
        let this = *self;
        spawn_local(async move {
            match this.api().create_board(&title).await {
                Ok(summary) => {
                    let board_id = summary.id.clone();
                    store_add_board(&this.store, summary);
                    this.toast(ToastKind::Success, format!("Board \"{}\" created", title));
                    this.navigate(Route::Board(board_id));
                }
                Err(e) => this.report(&e),
            }
        });
    }

    /// Fetch a board and replace whatever is shown
    pub fn load_board(&self, board_id: String) {
        let this = *self;
        if !store_is_showing(&self.store, &board_id) {
            store_clear_board(&self.store);
        }
        self.store.loading().set(true);
        self.store.load_error().set(None);

        spawn_local(async move {
            let result = sync::load_board(&this.api(), &board_id).await;
            this.store.loading().set(false);
            let still_open = this.store.route().with_untracked(|r| matches!(r, Route::Board(id) if *id == board_id));
            if !still_open {
                return;
            }
            match result {
                Ok(state) => store_set_loaded_board(&this.store, state),
                Err(e) => {
                    this.store.load_error().set(Some(e.user_message()));
                    this.report(&e);
                }
            }
        });
    }

    // ========================
    // Persistence
    // ========================

    /// Send `write` for the open board. On success `on_done` runs; on
    /// failure the board is reloaded, or restored to the last confirmed
    /// copy when the reload fails too.
    fn commit<T, W, Fut, D>(&self, write: W, on_done: D)
    where
        T: 'static,
        W: FnOnce(ApiClient) -> Fut + 'static,
        Fut: Future<Output = AppResult<T>> + 'static,
        D: FnOnce(BoardActions, T) + 'static,
    {
        let Some(board_id) = store_board_id(&self.store) else {
            return;
        };
        let fallback = self.store.confirmed().get_untracked().unwrap_or_default();
        let api = self.api();
        let this = *self;
        store_begin_write(&self.store);

        spawn_local(async move {
            let outcome = sync::commit(&api, &board_id, &fallback, write(api.clone())).await;
            store_end_write(&this.store);

            if !store_is_showing(&this.store, &board_id) {
                log::debug!("[BOARD] board {} closed before write finished", board_id);
                return;
            }
            match outcome {
                Commit::Done(value) => {
                    on_done(this, value);
                    this.reconcile(board_id);
                }
                Commit::Recovered { error, state, reload_error } => {
                    this.report(&error);
                    if error.is_unauthorized() {
                        return;
                    }
                    match reload_error {
                        None => store_set_loaded_board(&this.store, state),
                        Some(_) => {
                            store_show_fallback(&this.store, state);
                            this.toast(ToastKind::Info, "Showing the last saved version of this board");
                        }
                    }
                }
            }
        });
    }

    /// With no write outstanding the visible board matches the server,
    /// unless a load overlapped the writes
    fn reconcile(&self, board_id: String) {
        if store_settle(&self.store) == Settled::Reload {
            self.load_board(board_id);
        }
    }

    fn persist_move(&self, mv: TaskMove) {
        log::info!(
            "[BOARD] {} {} {}[{}] -> {}[{}]",
            if mv.is_within_column() { "reorder" } else { "move" },
            mv.task_id,
            mv.from_column,
            mv.from_index,
            mv.to_column,
            mv.to_index
        );
        self.commit(move |api| async move { sync::persist_move(&api, &mv).await }, |_, ()| {});
    }

    fn refuse_unsaved(&self, id: &str) -> bool {
        store_refuse_transient(&self.store, &[id])
    }

    // ========================
    // Tasks
    // ========================

    /// Drop from a drag gesture
    pub fn drop_task(&self, task_id: String, target: DropTarget) {
        let resolved = self
            .store
            .board()
            .with_untracked(|b| b.as_ref().and_then(|b| b.resolve_drop(&task_id, &target)));
        let Some((column_id, index)) = resolved else {
            log::debug!("[DND] drop of {} on {:?} changes nothing", task_id, target);
            return;
        };
        self.move_task(&task_id, &column_id, index);
    }

    pub fn move_task(&self, task_id: &str, column_id: &str, index: usize) {
        if store_refuse_transient(&self.store, &[task_id, column_id]) {
            return;
        }
        if let Some(Some(mv)) = store_update_board(&self.store, |b| b.move_task(task_id, column_id, index)) {
            self.persist_move(mv);
        }
    }

    pub fn reorder_task(&self, task_id: &str, index: usize) {
        if self.refuse_unsaved(task_id) {
            return;
        }
        if let Some(Some(mv)) = store_update_board(&self.store, |b| b.reorder_within_column(task_id, index)) {
            self.persist_move(mv);
        }
    }

    pub fn create_task(&self, input: TaskInput) {
        if self.refuse_unsaved(&input.column_id) {
            return;
        }
        let temp_id = transient_id();
        let inserted = store_update_board(&self.store, |b| b.insert_task(input.clone().into_task(temp_id.clone())));
        if inserted != Some(true) {
            return;
        }
        self.commit(
            move |api| async move { api.create_task(&input).await },
            move |this, task| {
                log::info!("[BOARD] task {} saved as {}", temp_id, task.id);
                store_update_board(&this.store, |b| {
                    if !b.confirm_task(&temp_id, task.clone()) {
                        // A reload dropped the placeholder
                        b.insert_task(task);
                    }
                });
            },
        );
    }

    pub fn update_task(&self, task_id: String, input: TaskInput) {
        if self.refuse_unsaved(&task_id) {
            return;
        }
        let current_column = self
            .store
            .board()
            .with_untracked(|b| b.as_ref().and_then(|b| b.task(&task_id).map(|t| t.column_id.clone())));
        let Some(current_column) = current_column else {
            return;
        };
        if current_column != input.column_id {
            self.move_task(&task_id, &input.column_id, usize::MAX);
        }
        store_update_board(&self.store, |b| b.replace_task(input.clone().into_task(task_id.clone())));
        self.commit(move |api| async move { api.update_task(&task_id, &input).await }, |_, ()| {});
    }

    pub fn delete_task(&self, task_id: String) {
        if self.refuse_unsaved(&task_id) {
            return;
        }
        if store_update_board(&self.store, |b| b.remove_task(&task_id)).flatten().is_none() {
            return;
        }
        self.commit(move |api| async move { api.delete_task(&task_id).await }, |_, ()| {});
    }

    // ========================
    // Columns
    // ========================

    pub fn create_column(&self, title: String) {
        let Some(board_id) = store_board_id(&self.store) else {
            return;
        };
        let temp_id = transient_id();
        if store_update_board(&self.store, |b| b.add_column(temp_id.clone(), title.clone())) != Some(true) {
            return;
        }
        self.commit(
            move |api| async move { api.create_column(&board_id, &title).await },
            move |this, column| {
                store_update_board(&this.store, |b| {
                    if !b.confirm_column(&temp_id, &column.id) {
                        b.add_column(column.id.clone(), column.title.clone());
                    }
                });
            },
        );
    }

    pub fn rename_column(&self, column_id: String, title: String) {
        if self.refuse_unsaved(&column_id) {
            return;
        }
        if store_update_board(&self.store, |b| b.rename_column(&column_id, title.clone())) != Some(true) {
            return;
        }
        self.commit(move |api| async move { api.rename_column(&column_id, &title).await }, |_, ()| {});
    }

    pub fn delete_column(&self, column_id: String) {
        if self.refuse_unsaved(&column_id) {
            return;
        }
        let removed = store_update_board(&self.store, |b| b.remove_column(&column_id)).flatten();
        let Some((column, tasks)) = removed else {
            return;
        };
        log::info!("[BOARD] deleting column {} with {} tasks", column.id, tasks.len());
        self.commit(move |api| async move { api.delete_column(&column_id).await }, |_, ()| {});
    }
}
