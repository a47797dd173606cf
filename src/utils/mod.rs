// Utils compartidos

pub mod chart;
pub mod dates;
pub mod debounce;
pub mod nutrition;
pub mod storage;
pub mod units;
pub mod validation;

pub use debounce::{Debouncer, Scheduler, TaskHandle};
pub use storage::{load_json, save_json, KeyValueStore, MemoryStore};
