pub mod add_food;
pub mod app;
pub mod auth;
pub mod bottom_nav;
pub mod calorie_ring;
pub mod dashboard;
pub mod not_found;
pub mod onboarding;
pub mod progress;
pub mod settings;
pub mod spinner;
pub mod toasts;
pub mod widgets;

pub use add_food::render_add_food;
pub use app::render_app;
pub use auth::render_auth;
pub use bottom_nav::render_bottom_nav;
pub use calorie_ring::render_calorie_ring;
pub use dashboard::render_dashboard;
pub use not_found::render_not_found;
pub use onboarding::render_onboarding;
pub use progress::render_progress;
pub use settings::render_settings;
pub use spinner::render_spinner;
pub use toasts::{render_toasts, schedule_auto_dismiss};
