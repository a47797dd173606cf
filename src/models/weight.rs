use serde::{Deserialize, Serialize};

/// Registro de peso en kg
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct WeightLog {
    pub id: String,
    pub weight: f64,
    #[serde(default)]
    pub note: String,
    pub logged_at: String,
    #[serde(default)]
    pub date: Option<String>,
}

impl WeightLog {
    /// Fecha `YYYY-MM-DD` del registro
    pub fn day(&self) -> &str {
        match &self.date {
            Some(date) => date,
            None => self.logged_at.get(..10).unwrap_or(&self.logged_at),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct WeightLogCreate {
    pub weight: f64,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<String>,
}
