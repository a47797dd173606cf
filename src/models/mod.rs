pub mod auth;
pub mod dashboard;
pub mod food;
pub mod stats;
pub mod user;
pub mod water;
pub mod weight;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use dashboard::{Dashboard, MacroProgress, Meals, WaterProgress};
pub use food::{CustomFoodCreate, Food, FoodLog, FoodLogCreate, MealType, RecentFood};
pub use stats::{DailyStat, WeeklyStats};
pub use user::{ActivityLevel, Gender, ProfileUpdate, UnitSystem, UserProfile};
pub use water::{WaterEntry, WaterLog, WaterLogAdd};
pub use weight::{WeightLog, WeightLogCreate};
