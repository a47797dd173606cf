// ============================================================================
// NOTIFICATIONS - Toasts de éxito/error
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::errors::AppError;
use crate::state::reactivity::Listeners;

/// Máximo de toasts visibles a la vez; los más antiguos se descartan
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Default)]
pub struct Notifications {
    items: Rc<RefCell<Vec<Toast>>>,
    next_id: Rc<Cell<u64>>,
    listeners: Listeners<Vec<Toast>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message.into())
    }

    /// Muestra el mensaje de usuario de un `AppError`
    pub fn app_error(&self, error: &AppError) -> u64 {
        self.error(error.user_message())
    }

    fn push(&self, kind: ToastKind, message: String) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        {
            let mut items = self.items.borrow_mut();
            items.push(Toast { id, kind, message });
            let overflow = items.len().saturating_sub(MAX_VISIBLE);
            items.drain(..overflow);
        }
        self.notify();
        id
    }

    pub fn dismiss(&self, id: u64) {
        let removed = {
            let mut items = self.items.borrow_mut();
            let before = items.len();
            items.retain(|toast| toast.id != id);
            items.len() != before
        };
        if removed {
            self.notify();
        }
    }

    pub fn list(&self) -> Vec<Toast> {
        self.items.borrow().clone()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&Vec<Toast>) + 'static,
    {
        self.listeners.subscribe(callback);
    }

    fn notify(&self) {
        let items = self.list();
        self.listeners.notify(&items);
    }
}
