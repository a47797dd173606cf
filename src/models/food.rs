use serde::{Deserialize, Serialize};

use crate::utils::dates::now_timestamp;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    #[default]
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|meal| meal.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snacks",
        }
    }
}

/// Alimento de la base de datos (`GET /foods`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Food {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub serving: String,
    #[serde(default)]
    pub category: String,
}

impl Food {
    /// Body de `POST /food-logs` para este alimento
    pub fn to_log(&self, quantity: f64, meal_type: MealType) -> FoodLogCreate {
        FoodLogCreate {
            food_name: self.name.clone(),
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
            serving: self.serving.clone(),
            quantity,
            meal_type,
            logged_at: Some(now_timestamp()),
        }
    }
}

/// Alimento reciente (`GET /food-logs/recent-foods`).
/// Los macros ya vienen multiplicados por la cantidad del último registro.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RecentFood {
    pub food_name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub serving: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub last_logged: Option<String>,
}

impl RecentFood {
    /// Vuelve a registrar el alimento: se normaliza a una unidad porque el
    /// backend multiplica otra vez por `quantity`
    pub fn to_log(&self, meal_type: MealType) -> FoodLogCreate {
        let per_unit = if self.quantity > 0.0 { self.quantity } else { 1.0 };
        FoodLogCreate {
            food_name: self.food_name.clone(),
            calories: self.calories / per_unit,
            protein: self.protein / per_unit,
            carbs: self.carbs / per_unit,
            fat: self.fat / per_unit,
            fiber: 0.0,
            serving: self.serving.clone(),
            quantity: per_unit,
            meal_type,
            logged_at: Some(now_timestamp()),
        }
    }
}

fn default_quantity() -> f64 {
    1.0
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct FoodLogCreate {
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub serving: String,
    pub quantity: f64,
    pub meal_type: MealType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<String>,
}

/// Registro de comida guardado
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct FoodLog {
    pub id: String,
    pub food_name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub serving: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub meal_type: MealType,
    #[serde(default)]
    pub logged_at: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Body de `POST /foods/custom` (quick add)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct CustomFoodCreate {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub serving: String,
    pub category: String,
}

impl Default for CustomFoodCreate {
    fn default() -> Self {
        Self {
            name: String::new(),
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            fiber: 0.0,
            serving: "1 serving".to_string(),
            category: "custom".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_type_round_trips_through_query_value() {
        for meal in MealType::ALL {
            assert_eq!(MealType::from_str_opt(meal.as_str()), Some(meal));
        }
        assert_eq!(MealType::from_str_opt("brunch"), None);
    }

    #[test]
    fn recent_food_is_normalised_to_one_unit() {
        let recent = RecentFood {
            food_name: "Banana".to_string(),
            calories: 210.0,
            protein: 2.6,
            carbs: 54.0,
            fat: 0.8,
            serving: "1 medium".to_string(),
            quantity: 2.0,
            last_logged: None,
        };
        let log = recent.to_log(MealType::Breakfast);
        assert_eq!(log.calories, 105.0);
        assert_eq!(log.quantity, 2.0);
        assert_eq!(log.meal_type, MealType::Breakfast);
        assert!(log.logged_at.is_some());
    }

    #[test]
    fn food_log_create_carries_the_local_day() {
        let food = Food {
            id: "f1".to_string(),
            name: "Brown Rice".to_string(),
            calories: 216.0,
            protein: 5.0,
            carbs: 45.0,
            fat: 1.8,
            fiber: 3.5,
            serving: "1 cup cooked".to_string(),
            category: "grains".to_string(),
        };
        let value = serde_json::to_value(food.to_log(1.5, MealType::Lunch)).unwrap();
        assert_eq!(value["meal_type"], "lunch");
        assert_eq!(value["quantity"], 1.5);
        let logged_at = value["logged_at"].as_str().unwrap();
        assert_eq!(&logged_at[..10], crate::utils::dates::format_date(crate::utils::dates::today()));
    }
}
