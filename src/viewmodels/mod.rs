pub mod auth_viewmodel;
pub mod dashboard_viewmodel;
pub mod food_search_viewmodel;
pub mod onboarding_viewmodel;
pub mod progress_viewmodel;
pub mod session_viewmodel;
pub mod settings_viewmodel;

pub use auth_viewmodel::{AuthField, AuthMode, AuthViewModel};
pub use dashboard_viewmodel::DashboardViewModel;
pub use food_search_viewmodel::{CustomFoodField, FoodSearchViewModel};
pub use onboarding_viewmodel::{OnboardingField, OnboardingStep, OnboardingViewModel};
pub use progress_viewmodel::ProgressViewModel;
pub use session_viewmodel::SessionViewModel;
pub use settings_viewmodel::{SettingsField, SettingsViewModel};
