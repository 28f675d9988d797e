//! Drag Ghost Component
//!
//! Copy of the dragged card that follows the pointer.

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn DragGhost() -> impl IntoView {
    let store = use_app_store();
    let dnd = expect_context::<DndSignals>();

    let title = Memo::new(move |_| {
        let id = dnd.dragging_id()?;
        store.board().with(|b| b.as_ref()?.task(&id).map(|t| t.title.clone()))
    });

    move || {
        let rect = dnd.ghost_rect()?;
        let title = title.get()?;
        let style = format!(
            "position: fixed; left: {}px; top: {}px; width: {}px; pointer-events: none;",
            rect.left, rect.top, rect.width
        );
        Some(view! {
            <div class="task-card drag-ghost" style=style>
                <span class="task-title">{title}</span>
            </div>
        })
    }
}
