//! Task Card Component
//!
//! Draggable card. Mousedown arms a drag; a click that follows a drop is
//! ignored. Arrow keys move the focused card (up/down within the column,
//! left/right across columns).

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mousedown, DndSignals, DropTarget};

use crate::actions::BoardActions;
use crate::context::AppContext;
use crate::markdown::excerpt;
use crate::models::{is_transient, Task};
use crate::store::{use_app_store, AppStateStoreFields};

const EXCERPT_CHARS: usize = 90;

#[component]
pub fn TaskCard(#[prop(into)] task_id: String) -> impl IntoView {
    let store = use_app_store();
    let actions = expect_context::<BoardActions>();
    let ctx = expect_context::<AppContext>();
    let dnd = expect_context::<DndSignals>();

    let id = StoredValue::new(task_id.clone());
    let task = Memo::new(move |_| {
        id.with_value(|id| store.board().with(|b| b.as_ref().and_then(|b| b.task(id).cloned())))
    });

    let card_target = DropTarget::Card(task_id.clone());
    let class = move || {
        let mut class = String::from("task-card");
        if id.with_value(|id| dnd.dragging_id().as_deref() == Some(id.as_str())) {
            class.push_str(" dragging");
        }
        if dnd.is_target(&card_target) {
            class.push_str(" drop-target");
        }
        if id.with_value(|id| is_transient(id)) {
            class.push_str(" unsaved");
        }
        class
    };

    let on_click = move |_| {
        if dnd.drag_just_ended.get_untracked() {
            return;
        }
        ctx.open_task(id.get_value());
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let task_id = id.get_value();
        let neighbours = store.board().with_untracked(|b| {
            let b = b.as_ref()?;
            let (ci, index) = b.locate(&task_id)?;
            let column_at = |i: Option<usize>| i.and_then(|i| b.columns().get(i)).map(|c| c.id.clone());
            Some((index, column_at(ci.checked_sub(1)), column_at(ci.checked_add(1))))
        });
        let Some((index, left, right)) = neighbours else {
            return;
        };
        match ev.key().as_str() {
            "Enter" => ctx.open_task(task_id),
            "ArrowUp" if index > 0 => {
                ev.prevent_default();
                actions.reorder_task(&task_id, index - 1);
            }
            "ArrowDown" => {
                ev.prevent_default();
                actions.reorder_task(&task_id, index + 1);
            }
            "ArrowLeft" | "ArrowRight" => {
                ev.prevent_default();
                let target = if ev.key() == "ArrowLeft" { left } else { right };
                if let Some(column_id) = target {
                    actions.move_task(&task_id, &column_id, index);
                }
            }
            _ => {}
        }
    };

    let on_mousedown = make_on_mousedown(dnd, task_id.clone());

    view! {
        <div
            class=class
            tabindex="0"
            data-droppable="card"
            data-droppable-id=task_id
            on:mousedown=on_mousedown
            on:click=on_click
            on:keydown=on_keydown
        >
            {move || task.get().map(card_body)}
        </div>
    }
}

fn card_body(task: Task) -> impl IntoView {
    let today = chrono::Local::now().date_naive();
    let due_class = if task.is_overdue(today) { "due overdue" } else { "due" };
    let due = task.due_date.map(|d| d.format("%b %-d").to_string());
    let progress = (!task.subtasks.is_empty())
        .then(|| format!("☑ {}/{}", task.completed_subtasks(), task.subtasks.len()));
    let summary = excerpt(&task.description, EXCERPT_CHARS);
    let assignees = (!task.assignees.is_empty()).then(|| task.assignees.join(", "));

    view! {
        <div class="task-card-header">
            <span class=format!("priority priority-{}", task.priority.as_str()) title=task.priority.label()></span>
            <span class="task-title">{task.title}</span>
        </div>
        {(!summary.is_empty()).then(|| view! { <p class="task-excerpt">{summary}</p> })}
        <div class="task-labels">
            {task.labels.into_iter().map(|label| view! { <span class="label">{label}</span> }).collect_view()}
        </div>
        <div class="task-meta">
            {due.map(|d| view! { <span class=due_class>{d}</span> })}
            {progress.map(|p| view! { <span class="subtask-progress">{p}</span> })}
            {assignees.map(|a| view! { <span class="assignees">{a}</span> })}
        </div>
    }
}
