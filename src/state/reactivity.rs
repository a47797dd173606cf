// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Lista de subscribers compartida. Clonar comparte la misma lista.
pub struct Listeners<T> {
    callbacks: Rc<RefCell<Vec<Callback<T>>>>,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            callbacks: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + 'static,
    {
        self.callbacks.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers.
    /// Se itera sobre una copia: un callback puede suscribir o notificar de nuevo.
    pub fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = self.callbacks.borrow().clone();
        for callback in callbacks {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn clones_share_subscribers() {
        let listeners: Listeners<u32> = Listeners::new();
        let total = Rc::new(Cell::new(0));
        let sink = total.clone();
        listeners.clone().subscribe(move |value| sink.set(sink.get() + *value));

        listeners.notify(&5);
        listeners.notify(&2);
        assert_eq!(total.get(), 7);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn callback_may_subscribe_while_notifying() {
        let listeners: Listeners<()> = Listeners::new();
        let inner = listeners.clone();
        listeners.subscribe(move |_| inner.subscribe(|_| {}));
        listeners.notify(&());
        assert_eq!(listeners.len(), 2);
    }
}
