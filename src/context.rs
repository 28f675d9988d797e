//! Application Context
//!
//! UI-level shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::components::EditTarget;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Task open in the modal - read
    pub editing: ReadSignal<Option<EditTarget>>,
    /// Task open in the modal - write
    set_editing: WriteSignal<Option<EditTarget>>,
    /// Auto-dismiss delay for toasts
    pub toast_timeout_ms: u32,
}

impl AppContext {
    pub fn new(editing: (ReadSignal<Option<EditTarget>>, WriteSignal<Option<EditTarget>>), toast_timeout_ms: u32) -> Self {
        Self {
            editing: editing.0,
            set_editing: editing.1,
            toast_timeout_ms,
        }
    }

    pub fn open_new_task(&self, column_id: String) {
        self.set_editing.set(Some(EditTarget::NewTask { column_id }));
    }

    pub fn open_task(&self, task_id: String) {
        self.set_editing.set(Some(EditTarget::Task(task_id)));
    }

    pub fn close_editor(&self) {
        self.set_editing.set(None);
    }
}
