// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod notifications;
pub mod reactivity;
pub mod session_store;

pub use app_state::AppState;
pub use notifications::{Notifications, Toast, ToastKind};
pub use reactivity::Listeners;
pub use session_store::{SessionSnapshot, SessionStatus, SessionStore};
