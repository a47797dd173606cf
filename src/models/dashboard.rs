use serde::{Deserialize, Serialize};

use super::food::{FoodLog, MealType};

#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct MacroProgress {
    pub consumed: f64,
    pub target: f64,
}

#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct WaterProgress {
    pub consumed_ml: u32,
    pub goal_ml: u32,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct Meals {
    #[serde(default)]
    pub breakfast: Vec<FoodLog>,
    #[serde(default)]
    pub lunch: Vec<FoodLog>,
    #[serde(default)]
    pub dinner: Vec<FoodLog>,
    #[serde(default)]
    pub snack: Vec<FoodLog>,
}

impl Meals {
    pub fn for_meal(&self, meal: MealType) -> &[FoodLog] {
        match meal {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
            MealType::Snack => &self.snack,
        }
    }

    /// Calorías totales de una comida (cabecera de cada sección)
    pub fn calories_for(&self, meal: MealType) -> f64 {
        self.for_meal(meal).iter().map(|log| log.calories).sum()
    }
}

/// Resumen diario (`GET /dashboard?date=`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Dashboard {
    pub date: String,
    pub calories: MacroProgress,
    pub protein: MacroProgress,
    pub carbs: MacroProgress,
    pub fat: MacroProgress,
    pub water: WaterProgress,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub meals: Meals,
    #[serde(default)]
    pub food_logs: Vec<FoodLog>,
}

impl Dashboard {
    pub fn contains_log(&self, log_id: &str) -> bool {
        self.food_logs.iter().any(|log| log.id == log_id)
    }
}
