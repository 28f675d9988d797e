//! Task Modal Component
//!
//! Create/edit form for a task with a Markdown preview of the description.

use leptos::prelude::*;

use crate::actions::BoardActions;
use crate::components::{DeleteConfirmButton, EditTarget};
use crate::context::AppContext;
use crate::markdown::parse_markdown;
use crate::models::{is_transient, Priority, Subtask, TaskInput};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::validation::{FieldErrors, TaskDraft};

#[component]
pub fn TaskModal(target: EditTarget) -> impl IntoView {
    let store = use_app_store();
    let actions = expect_context::<BoardActions>();
    let ctx = expect_context::<AppContext>();

    let initial = match &target {
        EditTarget::NewTask { column_id } => Some(TaskDraft { column_id: column_id.clone(), ..Default::default() }),
        EditTarget::Task(task_id) => store.board().with_untracked(|b| {
            b.as_ref()?.task(task_id).map(|t| TaskDraft::from_input(&TaskInput::from(t)))
        }),
    };
    let Some(initial) = initial else {
        // Task vanished (deleted or reloaded away)
        ctx.close_editor();
        return ().into_any();
    };

    let draft = RwSignal::new(initial);
    let errors = RwSignal::new(FieldErrors::default());
    let (preview, set_preview) = signal(false);
    let subtask_count = Memo::new(move |_| draft.with(|d| d.subtasks.len()));
    let existing_id = match &target {
        EditTarget::Task(id) => Some(id.clone()),
        EditTarget::NewTask { .. } => None,
    };
    let heading = if existing_id.is_some() { "Edit task" } else { "New task" };
    let target = StoredValue::new(target);

    let columns = move || {
        store.board().with(|b| {
            b.as_ref()
                .map(|b| {
                    b.columns()
                        .iter()
                        .filter(|c| !is_transient(&c.id))
                        .map(|c| (c.id.clone(), c.title.clone()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match draft.with_untracked(TaskDraft::validate) {
            Ok(input) => {
                match target.get_value() {
                    EditTarget::NewTask { .. } => actions.create_task(input),
                    EditTarget::Task(task_id) => actions.update_task(task_id, input),
                }
                ctx.close_editor();
            }
            Err(field_errors) => errors.set(field_errors),
        }
    };

    let field_error = move |field: &'static str| {
        move || errors.with(|e| e.get(field).map(|m| view! { <span class="field-error">{m.to_string()}</span> }))
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| ctx.close_editor()>
            <form
                class="modal task-modal"
                on:submit=save
                on:click=|ev| ev.stop_propagation()
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Escape" {
                        ctx.close_editor();
                    }
                }
            >
                <h2>{heading}</h2>

                <label>
                    "Title"
                    <input
                        type="text"
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                </label>
                {field_error("title")}

                <div class="modal-row">
                    <label>
                        "Column"
                        <select
                            prop:value=move || draft.with(|d| d.column_id.clone())
                            on:change=move |ev| draft.update(|d| d.column_id = event_target_value(&ev))
                        >
                            {move || {
                                columns()
                                    .into_iter()
                                    .map(|(id, title)| {
                                        let selected = draft.with_untracked(|d| d.column_id == id);
                                        view! { <option value=id selected=selected>{title}</option> }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </label>
                    <label>
                        "Priority"
                        <select
                            prop:value=move || draft.with(|d| d.priority.as_str())
                            on:change=move |ev| {
                                if let Some(priority) = Priority::parse(&event_target_value(&ev)) {
                                    draft.update(|d| d.priority = priority);
                                }
                            }
                        >
                            {Priority::all()
                                .into_iter()
                                .map(|p| {
                                    let selected = draft.with_untracked(|d| d.priority == p);
                                    view! { <option value=p.as_str() selected=selected>{p.label()}</option> }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label>
                        "Due"
                        <input
                            type="date"
                            prop:value=move || draft.with(|d| d.due_date.clone())
                            on:input=move |ev| draft.update(|d| d.due_date = event_target_value(&ev))
                        />
                    </label>
                </div>
                {field_error("column")}
                {field_error("due_date")}

                <label>
                    "Labels"
                    <input
                        type="text"
                        placeholder="design, urgent"
                        prop:value=move || draft.with(|d| d.labels.clone())
                        on:input=move |ev| draft.update(|d| d.labels = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Assignees"
                    <input
                        type="text"
                        placeholder="comma separated"
                        prop:value=move || draft.with(|d| d.assignees.clone())
                        on:input=move |ev| draft.update(|d| d.assignees = event_target_value(&ev))
                    />
                </label>

                <fieldset class="subtasks">
                    <legend>"Subtasks"</legend>
                    {move || {
                        (0..subtask_count.get())
                            .map(|i| {
                                view! {
                                    <div class="subtask-row">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || draft.with(|d| d.subtasks.get(i).is_some_and(|s| s.done))
                                            on:change=move |ev| {
                                                let done = event_target_checked(&ev);
                                                draft.update(|d| if let Some(s) = d.subtasks.get_mut(i) { s.done = done; });
                                            }
                                        />
                                        <input
                                            type="text"
                                            prop:value=move || draft.with(|d| d.subtasks.get(i).map(|s| s.title.clone()).unwrap_or_default())
                                            on:input=move |ev| {
                                                let title = event_target_value(&ev);
                                                draft.update(|d| if let Some(s) = d.subtasks.get_mut(i) { s.title = title; });
                                            }
                                        />
                                        <button
                                            type="button"
                                            class="subtask-remove"
                                            on:click=move |_| draft.update(|d| {
                                                if i < d.subtasks.len() {
                                                    d.subtasks.remove(i);
                                                }
                                            })
                                        >
                                            "×"
                                        </button>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                    <button
                        type="button"
                        class="subtask-add"
                        on:click=move |_| draft.update(|d| d.subtasks.push(Subtask { title: String::new(), done: false }))
                    >
                        "+ Subtask"
                    </button>
                    {field_error("subtasks")}
                </fieldset>

                <div class="description">
                    <div class="tabs">
                        <button
                            type="button"
                            class=move || if preview.get() { "tab" } else { "tab active" }
                            on:click=move |_| set_preview.set(false)
                        >
                            "Write"
                        </button>
                        <button
                            type="button"
                            class=move || if preview.get() { "tab active" } else { "tab" }
                            on:click=move |_| set_preview.set(true)
                        >
                            "Preview"
                        </button>
                    </div>
                    <Show
                        when=move || preview.get()
                        fallback=move || view! {
                            <textarea
                                rows="8"
                                placeholder="Markdown supported"
                                prop:value=move || draft.with(|d| d.description.clone())
                                on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                            ></textarea>
                        }
                    >
                        <div class="markdown-preview" inner_html=move || draft.with(|d| parse_markdown(&d.description))></div>
                    </Show>
                </div>

                <footer class="modal-actions">
                    {existing_id.clone().map(|task_id| {
                        let task_id = StoredValue::new(task_id);
                        view! {
                            <DeleteConfirmButton
                                button_class="task-delete-btn"
                                prompt="Delete task?"
                                on_confirm=move |_| {
                                    actions.delete_task(task_id.get_value());
                                    ctx.close_editor();
                                }
                            />
                        }
                    })}
                    <button type="button" class="cancel-btn" on:click=move |_| ctx.close_editor()>"Cancel"</button>
                    <button type="submit" class="primary-btn">"Save"</button>
                </footer>
            </form>
        </div>
    }
    .into_any()
}
