//! Board View Component
//!
//! One board: header, the columns, the add-column form, the drag ghost and
//! the task modal. Owns the drag-and-drop signals for its lifetime.

use leptos::prelude::*;
use leptos_dragdrop::{bind_global_handlers, create_dnd_signals};

use crate::actions::BoardActions;
use crate::components::{ColumnForm, DragGhost, KanbanColumn, TaskModal};
use crate::context::AppContext;
use crate::session::Route;
use crate::store::{use_app_store, AppStateStoreFields};

const RECENT_LOG_LINES: usize = 20;

#[component]
pub fn BoardView(#[prop(into)] board_id: String) -> impl IntoView {
    let store = use_app_store();
    let actions = expect_context::<BoardActions>();
    let ctx = expect_context::<AppContext>();

    let dnd = create_dnd_signals();
    provide_context(dnd);
    bind_global_handlers(dnd, move |task_id, target| actions.drop_task(task_id, target));

    let board_id = StoredValue::new(board_id);
    let column_ids = Memo::new(move |_| {
        store.board().with(|b| {
            b.as_ref()
                .map(|b| b.columns().iter().map(|c| c.id.clone()).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    });
    let title = move || store.board().with(|b| b.as_ref().map(|b| b.title.clone()).unwrap_or_default());
    let has_board = move || store.board().with(Option::is_some);
    let saving = move || store.pending_writes().get() > 0;

    view! {
        <div class=move || if dnd.is_dragging() { "board-screen is-dragging" } else { "board-screen" }>
            <header class="board-header">
                <button type="button" class="link-btn" on:click=move |_| actions.navigate(Route::Boards)>
                    "← Boards"
                </button>
                <h1>{title}</h1>
                <Show when=saving>
                    <span class="saving-indicator">"Saving…"</span>
                </Show>
                <button
                    type="button"
                    class="link-btn"
                    title="Reload board"
                    on:click=move |_| actions.load_board(board_id.get_value())
                >
                    "⟳"
                </button>
                <button type="button" class="link-btn" on:click=move |_| actions.logout()>"Sign out"</button>
            </header>

            <Show when=move || !has_board()>
                {move || {
                    if store.loading().get() {
                        view! { <p class="board-status">"Loading board…"</p> }.into_any()
                    } else if let Some(message) = store.load_error().get() {
                        view! {
                            <div class="board-status error">
                                <p>{message}</p>
                                <details class="board-log">
                                    <summary>"Details"</summary>
                                    <pre>{recent_log()}</pre>
                                </details>
                                <button type="button" on:click=move |_| actions.load_board(board_id.get_value())>
                                    "Try again"
                                </button>
                            </div>
                        }
                            .into_any()
                    } else {
                        ().into_any()
                    }
                }}
            </Show>

            <Show when=has_board>
                <div class="board-columns" data-dnd-bounds="">
                    <For
                        each=move || column_ids.get()
                        key=|column_id| column_id.clone()
                        children=move |column_id| view! { <KanbanColumn column_id=column_id /> }
                    />
                    <ColumnForm />
                </div>
            </Show>

            <DragGhost />
            {move || ctx.editing.get().map(|target| view! { <TaskModal target=target /> })}
        </div>
    }
}

/// Last lines of the in-memory log, shown next to a load error
fn recent_log() -> String {
    let lines = rolling_logger::recent_lines();
    lines[lines.len().saturating_sub(RECENT_LOG_LINES)..].join("\n")
}
