// ============================================================================
// DEBOUNCE - Tareas diferidas cancelables
// ============================================================================
// Cada `call` cancela la tarea pendiente antes de programar la nueva: solo el
// último keystroke dispara la búsqueda.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle de una tarea programada
pub trait TaskHandle {
    fn cancel(self: Box<Self>);
}

/// Programador de tareas diferidas (setTimeout en el browser)
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Box<dyn TaskHandle>;
}

pub struct Debouncer {
    scheduler: Rc<dyn Scheduler>,
    delay_ms: u32,
    handle: RefCell<Option<Box<dyn TaskHandle>>>,
    pending: Rc<Cell<bool>>,
}

impl Debouncer {
    pub fn new(scheduler: Rc<dyn Scheduler>, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            handle: RefCell::new(None),
            pending: Rc::new(Cell::new(false)),
        }
    }

    /// Reprograma `task`, descartando la anterior si aún no se ejecutó
    pub fn call<F>(&self, task: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();

        let pending = self.pending.clone();
        pending.set(true);
        let handle = self.scheduler.schedule(
            self.delay_ms,
            Box::new(move || {
                pending.set(false);
                task();
            }),
        );
        *self.handle.borrow_mut() = Some(handle);
    }

    pub fn cancel(&self) {
        // El handle se suelta fuera del borrow por si cancel() reentra
        let previous = self.handle.borrow_mut().take();
        if let Some(handle) = previous {
            handle.cancel();
        }
        self.pending.set(false);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::TimeoutScheduler;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{Scheduler, TaskHandle};
    use gloo_timers::callback::Timeout;

    /// Scheduler basado en `setTimeout`
    pub struct TimeoutScheduler;

    struct TimeoutHandle(Timeout);

    impl TaskHandle for TimeoutHandle {
        fn cancel(self: Box<Self>) {
            // cancel() evita ejecutar el callback; si ya se ejecutó es un no-op
            let _ = self.0.cancel();
        }
    }

    impl Scheduler for TimeoutScheduler {
        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Box<dyn TaskHandle> {
            Box::new(TimeoutHandle(Timeout::new(delay_ms, task)))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ManualScheduler;
    use super::*;

    fn typed_queries(scheduler: &Rc<ManualScheduler>) -> (Debouncer, Rc<RefCell<Vec<String>>>) {
        let debouncer = Debouncer::new(scheduler.clone(), 300);
        (debouncer, Rc::new(RefCell::new(Vec::new())))
    }

    #[test]
    fn only_the_last_keystroke_fires() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (debouncer, fired) = typed_queries(&scheduler);

        for (query, gap) in [("ri", 100), ("ric", 150), ("rice", 0)] {
            let fired = fired.clone();
            let query = query.to_string();
            debouncer.call(move || fired.borrow_mut().push(query));
            scheduler.advance(gap);
        }
        assert!(debouncer.is_pending());
        assert!(fired.borrow().is_empty());

        scheduler.advance(300);
        assert_eq!(*fired.borrow(), vec!["rice".to_string()]);
        assert!(!debouncer.is_pending());
        assert_eq!(scheduler.pending_tasks(), 0);
    }

    #[test]
    fn separate_pauses_fire_separately() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (debouncer, fired) = typed_queries(&scheduler);

        let first = fired.clone();
        debouncer.call(move || first.borrow_mut().push("egg".to_string()));
        scheduler.advance(300);
        let second = fired.clone();
        debouncer.call(move || second.borrow_mut().push("eggs".to_string()));
        scheduler.advance(299);
        assert_eq!(fired.borrow().len(), 1);
        scheduler.advance(1);
        assert_eq!(*fired.borrow(), vec!["egg".to_string(), "eggs".to_string()]);
    }

    #[test]
    fn cancel_drops_the_pending_task() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (debouncer, fired) = typed_queries(&scheduler);

        let task = fired.clone();
        debouncer.call(move || task.borrow_mut().push("x".to_string()));
        debouncer.cancel();
        scheduler.advance(1_000);

        assert!(fired.borrow().is_empty());
        assert!(!debouncer.is_pending());
    }
}
