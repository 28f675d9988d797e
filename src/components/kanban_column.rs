//! Kanban Column Component
//!
//! Column header (rename by double click, delete) and the lane holding the
//! task cards. The lane is a drop target of its own so empty columns and
//! the space below the last card accept drops.

use leptos::prelude::*;
use leptos_dragdrop::{DndSignals, DropTarget};

use crate::actions::BoardActions;
use crate::components::{DeleteConfirmButton, TaskCard};
use crate::context::AppContext;
use crate::models::is_transient;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::validation::validate_column_title;

#[component]
pub fn KanbanColumn(#[prop(into)] column_id: String) -> impl IntoView {
    let store = use_app_store();
    let actions = expect_context::<BoardActions>();
    let ctx = expect_context::<AppContext>();
    let dnd = expect_context::<DndSignals>();

    let id = StoredValue::new(column_id.clone());
    let column = Memo::new(move |_| {
        id.with_value(|id| store.board().with(|b| b.as_ref().and_then(|b| b.column(id).cloned())))
    });
    let title = move || column.with(|c| c.as_ref().map(|c| c.title.clone()).unwrap_or_default());
    let task_ids = move || column.with(|c| c.as_ref().map(|c| c.task_ids.clone()).unwrap_or_default());
    let count = move || column.with(|c| c.as_ref().map(|c| c.task_ids.len()).unwrap_or(0));

    let (renaming, set_renaming) = signal(false);
    let (draft_title, set_draft_title) = signal(String::new());
    let (rename_error, set_rename_error) = signal::<Option<String>>(None);

    let start_rename = move |_| {
        if id.with_value(|id| is_transient(id)) {
            return;
        }
        set_draft_title.set(title());
        set_rename_error.set(None);
        set_renaming.set(true);
    };
    let finish_rename = move || {
        if !renaming.get_untracked() {
            return;
        }
        match validate_column_title(&draft_title.get_untracked()) {
            Ok(new_title) => {
                set_renaming.set(false);
                if new_title != title() {
                    actions.rename_column(id.get_value(), new_title);
                }
            }
            Err(errors) => set_rename_error.set(errors.first().map(str::to_string)),
        }
    };

    let lane_target = DropTarget::Lane(column_id.clone());
    let lane_class = move || {
        if dnd.is_target(&lane_target) { "column-lane drop-target" } else { "column-lane" }
    };

    view! {
        <section class="kanban-column">
            <header class="column-header">
                <Show
                    when=move || renaming.get()
                    fallback=move || view! {
                        <h2 class="column-title" on:dblclick=start_rename>{title}</h2>
                    }
                >
                    <input
                        class="column-title-input"
                        type="text"
                        prop:value=move || draft_title.get()
                        on:input=move |ev| set_draft_title.set(event_target_value(&ev))
                        on:blur=move |_| finish_rename()
                        on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                            "Enter" => finish_rename(),
                            "Escape" => set_renaming.set(false),
                            _ => {}
                        }
                    />
                </Show>
                <span class="column-count">{count}</span>
                <DeleteConfirmButton
                    button_class="column-delete-btn"
                    prompt="Delete column and its tasks?"
                    on_confirm=move |_| actions.delete_column(id.get_value())
                />
            </header>
            {move || rename_error.get().map(|m| view! { <span class="field-error">{m}</span> })}

            <div class=lane_class data-droppable="lane" data-droppable-id=column_id>
                <For
                    each=task_ids
                    key=|task_id| task_id.clone()
                    children=move |task_id| view! { <TaskCard task_id=task_id /> }
                />
            </div>

            <button
                type="button"
                class="add-task-btn"
                disabled=move || id.with_value(|id| is_transient(id))
                on:click=move |_| ctx.open_new_task(id.get_value())
            >
                "+ Add task"
            </button>
        </section>
    }
}
