use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[serde(other)]
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::Light => "Light (1-3 days/week)",
            ActivityLevel::Moderate => "Moderate (3-5 days/week)",
            ActivityLevel::Active => "Active (6-7 days/week)",
            ActivityLevel::VeryActive => "Very active (physical job)",
        }
    }
}

fn default_calorie_target() -> u32 {
    2000
}
fn default_protein_target() -> u32 {
    150
}
fn default_carbs_target() -> u32 {
    200
}
fn default_fat_target() -> u32 {
    67
}
fn default_water_goal() -> u32 {
    2000
}

/// Perfil del usuario tal como lo devuelve `/profile`.
/// Pesos en kg y altura en cm: la conversión a imperial es solo de presentación.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub current_weight: Option<f64>,
    #[serde(default)]
    pub goal_weight: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub weight_loss_rate: Option<f64>,
    #[serde(default)]
    pub units: UnitSystem,
    #[serde(default = "default_calorie_target")]
    pub calorie_target: u32,
    #[serde(default = "default_protein_target")]
    pub protein_target: u32,
    #[serde(default = "default_carbs_target")]
    pub carbs_target: u32,
    #[serde(default = "default_fat_target")]
    pub fat_target: u32,
    #[serde(default = "default_water_goal")]
    pub water_goal: u32,
    #[serde(default)]
    pub bmr: Option<u32>,
    #[serde(default)]
    pub tdee: Option<u32>,
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UserProfile {
    /// Mezcla un update parcial sobre el perfil (solo campos presentes)
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(height) = update.height_cm {
            self.height_cm = Some(height);
        }
        if let Some(weight) = update.current_weight {
            self.current_weight = Some(weight);
        }
        if let Some(goal) = update.goal_weight {
            self.goal_weight = Some(goal);
        }
        if let Some(level) = update.activity_level {
            self.activity_level = Some(level);
        }
        if let Some(rate) = update.weight_loss_rate {
            self.weight_loss_rate = Some(rate);
        }
        if let Some(units) = update.units {
            self.units = units;
        }
        if let Some(target) = update.calorie_target {
            self.calorie_target = target;
        }
        if let Some(target) = update.protein_target {
            self.protein_target = target;
        }
        if let Some(target) = update.carbs_target {
            self.carbs_target = target;
        }
        if let Some(target) = update.fat_target {
            self.fat_target = target;
        }
        if let Some(goal) = update.water_goal {
            self.water_goal = goal;
        }
        if let Some(done) = update.onboarding_completed {
            self.onboarding_completed = done;
        }
    }

    /// Primer nombre para saludos en el dashboard
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// Body de `PUT /profile`: los `None` no se serializan
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_loss_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<UnitSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_target: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_target: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_target: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_target: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_goal: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,
}
