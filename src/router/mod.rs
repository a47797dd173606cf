// ============================================================================
// ROUTER - Rutas, navegación explícita y guards
// ============================================================================

pub mod guards;
pub mod navigator;
pub mod route;

pub use guards::{evaluate, guard_for, resolve, GuardKind, GuardOutcome};
pub use navigator::{MemoryNavigator, Navigator};
pub use route::Route;
