use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct DailyStat {
    pub date: String,
    pub day: String,
    pub calories: f64,
    #[serde(default)]
    pub water_ml: u32,
}

/// Estadísticas de los últimos 7 días (`GET /stats/weekly`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct WeeklyStats {
    pub daily_stats: Vec<DailyStat>,
    pub avg_daily_calories: f64,
    pub days_on_track: u32,
    pub weight_change: f64,
    pub total_calories: f64,
}

impl WeeklyStats {
    /// Máximo de calorías de la semana, para escalar el gráfico de barras
    pub fn max_calories(&self) -> f64 {
        self.daily_stats
            .iter()
            .map(|day| day.calories)
            .fold(0.0, f64::max)
    }
}
