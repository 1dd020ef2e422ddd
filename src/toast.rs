//! Toast notifications
//!
//! A queue of transient messages. The UI pushes a toast, renders the queue
//! and schedules `dismiss` after the toast's duration.

/// Visual variant of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
            ToastKind::Warning => "⚠",
            ToastKind::Info => "ℹ",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
            ToastKind::Warning => "toast-warning",
            ToastKind::Info => "toast-info",
        }
    }

    /// How long the toast stays on screen
    pub fn duration_ms(&self) -> u32 {
        match self {
            ToastKind::Error => 5000,
            _ => 3000,
        }
    }
}

/// One queued notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub duration_ms: u32,
}

/// Maximum toasts on screen; older ones are dropped first
pub const MAX_VISIBLE_TOASTS: usize = 4;

/// Active toasts, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    active: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a toast and return its id for the dismiss timer
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.active.push(Toast {
            id,
            kind,
            message: message.into(),
            duration_ms: kind.duration_ms(),
        });

        if self.active.len() > MAX_VISIBLE_TOASTS {
            let excess = self.active.len() - MAX_VISIBLE_TOASTS;
            self.active.drain(..excess);
        }

        id
    }

    /// Remove a toast; unknown ids (already dropped) are ignored
    pub fn dismiss(&mut self, id: u64) {
        self.active.retain(|t| t.id != id);
    }

    pub fn active(&self) -> &[Toast] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut queue = ToastQueue::new();
        let a = queue.push(ToastKind::Success, "Saved");
        let b = queue.push(ToastKind::Error, "Failed");
        assert_ne!(a, b);
        assert_eq!(queue.active().len(), 2);
        assert_eq!(queue.active()[1].duration_ms, 5000);

        queue.dismiss(a);
        assert_eq!(queue.active().len(), 1);
        assert_eq!(queue.active()[0].message, "Failed");

        queue.dismiss(a);
        queue.dismiss(b);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let mut queue = ToastQueue::new();
        for i in 0..6 {
            queue.push(ToastKind::Info, format!("toast {}", i));
        }
        let messages: Vec<_> = queue.active().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["toast 2", "toast 3", "toast 4", "toast 5"]);
    }
}
