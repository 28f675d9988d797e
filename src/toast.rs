//! Toast Queue
//!
//! Short-lived notifications. The queue is plain data; timers live in the
//! `ToastHost` component.

/// Most toasts visible at once
pub const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Info => "toast toast-info",
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    /// Push a toast, dropping the oldest past [`MAX_TOASTS`]. Returns its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, kind, message: message.into() });
        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    /// Dismissing an unknown id is a no-op
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_keeps_newest_four() {
        let mut queue = ToastQueue::default();
        for i in 0..6 {
            queue.push(ToastKind::Info, format!("msg {}", i));
        }
        let messages: Vec<&str> = queue.items().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["msg 2", "msg 3", "msg 4", "msg 5"]);
    }

    #[test]
    fn test_dismiss() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastKind::Error, "a");
        let b = queue.push(ToastKind::Success, "b");
        assert_ne!(a, b);
        assert!(queue.dismiss(a));
        assert!(!queue.dismiss(a));
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].kind, ToastKind::Success);
    }
}
