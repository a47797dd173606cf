// ============================================================================
// PROGRESS VIEWMODEL - Historial de peso + estadísticas semanales
// ============================================================================
// Las dos requests salen en paralelo; la página solo está "cargada" cuando
// ambas resolvieron bien.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::errors::AppError;
use crate::models::{ProfileUpdate, UnitSystem, WeeklyStats, WeightLog, WeightLogCreate};
use crate::state::AppState;
use crate::utils::chart::{bar_heights, project_series, ChartArea, ChartPoint};
use crate::utils::dates::{now_timestamp, short_label};
use crate::utils::units::{round1, weight_for_display, weight_input_range, weight_input_to_kg};
use crate::utils::validation::parse_in_range;

#[derive(Clone)]
pub struct ProgressViewModel {
    state: AppState,
    /// Más reciente primero (orden del backend)
    weights: Rc<RefCell<Vec<WeightLog>>>,
    stats: Rc<RefCell<Option<WeeklyStats>>>,
    loading: Rc<Cell<bool>>,
    loaded: Rc<Cell<bool>>,
    saving: Rc<Cell<bool>>,
}

impl ProgressViewModel {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            weights: Rc::new(RefCell::new(Vec::new())),
            stats: Rc::new(RefCell::new(None)),
            loading: Rc::new(Cell::new(false)),
            loaded: Rc::new(Cell::new(false)),
            saving: Rc::new(Cell::new(false)),
        }
    }

    pub fn weights(&self) -> Vec<WeightLog> {
        self.weights.borrow().clone()
    }

    pub fn stats(&self) -> Option<WeeklyStats> {
        self.stats.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.get()
    }

    fn units(&self) -> UnitSystem {
        self.state
            .session
            .profile()
            .map(|profile| profile.units)
            .unwrap_or_default()
    }

    pub async fn load(&self) -> Result<(), AppError> {
        self.loading.set(true);
        self.state.notify_changes();

        let api = &self.state.api;
        let (weights, stats) = futures::join!(
            api.weight_logs(self.state.config.weight_history_limit),
            api.weekly_stats()
        );
        self.loading.set(false);

        match (weights, stats) {
            (Ok(weights), Ok(stats)) => {
                log::info!("📈 [PROGRESS] {} registros de peso", weights.len());
                *self.weights.borrow_mut() = weights;
                *self.stats.borrow_mut() = Some(stats);
                self.loaded.set(true);
                self.state.notify_changes();
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                log::error!("❌ [PROGRESS] Error cargando progreso: {}", e);
                self.state.notifications.app_error(&e);
                self.state.notify_changes();
                Err(e)
            }
        }
    }

    /// Registra un peso introducido en las unidades del usuario
    pub async fn log_weight(&self, raw: &str, note: &str) -> Result<(), AppError> {
        let units = self.units();
        let (min, max) = weight_input_range(units);
        let value = match parse_in_range(raw, "Weight", min, max) {
            Ok(value) => value,
            Err(e) => {
                self.state.notifications.app_error(&e);
                return Err(e);
            }
        };
        let entry = WeightLogCreate {
            weight: round1(weight_input_to_kg(value, units)),
            note: note.trim().to_string(),
            logged_at: Some(now_timestamp()),
        };

        self.saving.set(true);
        self.state.notify_changes();
        let result = self.state.api.create_weight_log(&entry).await;
        self.saving.set(false);

        match result {
            Ok(log) => {
                // El backend también actualiza current_weight del perfil
                self.state.session.merge_profile(&ProfileUpdate {
                    current_weight: Some(log.weight),
                    ..Default::default()
                });
                self.state.notifications.success("Weight logged");
                self.load().await
            }
            Err(e) => {
                log::error!("❌ [PROGRESS] Error registrando peso: {}", e);
                self.state.notifications.app_error(&e);
                self.state.notify_changes();
                Err(e)
            }
        }
    }

    pub async fn delete_weight(&self, log_id: &str) -> Result<(), AppError> {
        if let Err(e) = self.state.api.delete_weight_log(log_id).await {
            self.state.notifications.app_error(&e);
            self.state.notify_changes();
            return Err(e);
        }
        self.state.notifications.success("Entry removed");
        self.load().await
    }

    // ------------------------------------------------------------------------
    // Presentación
    // ------------------------------------------------------------------------

    /// Serie cronológica (más antiguo primero) en las unidades del usuario
    pub fn weight_series(&self) -> Vec<(String, f64)> {
        let units = self.units();
        self.weights
            .borrow()
            .iter()
            .rev()
            .map(|log| (short_label(log.day()), round1(weight_for_display(log.weight, units))))
            .collect()
    }

    pub fn weight_chart(&self, area: ChartArea) -> Vec<ChartPoint> {
        project_series(&self.weight_series(), area)
    }

    /// Cambio entre el primer y el último registro, en kg
    pub fn weight_change_kg(&self) -> Option<f64> {
        let weights = self.weights.borrow();
        let latest = weights.first()?;
        let oldest = weights.last()?;
        Some(latest.weight - oldest.weight)
    }

    /// % recorrido hacia el peso objetivo desde el primer registro (0..=100)
    pub fn goal_progress_percent(&self) -> Option<f64> {
        let goal = self.state.session.profile()?.goal_weight?;
        let weights = self.weights.borrow();
        let start = weights.last()?.weight;
        let current = weights.first()?.weight;
        let total = start - goal;
        if total.abs() < f64::EPSILON {
            return Some(100.0);
        }
        Some(((start - current) / total * 100.0).clamp(0.0, 100.0))
    }

    /// (etiqueta del día, altura de barra) para el gráfico semanal de calorías
    pub fn calorie_bars(&self, max_height: f64) -> Vec<(String, f64)> {
        let stats = self.stats.borrow();
        let Some(stats) = stats.as_ref() else {
            return Vec::new();
        };
        let values: Vec<f64> = stats.daily_stats.iter().map(|day| day.calories).collect();
        stats
            .daily_stats
            .iter()
            .map(|day| day.day.clone())
            .zip(bar_heights(&values, max_height))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::fixtures::onboarded_user;
    use crate::services::HttpMethod;
    use crate::state::app_state::testing::TestApp;
    use futures::executor::block_on;
    use serde_json::{json, Value};

    fn weight(id: &str, kg: f64, date: &str) -> Value {
        json!({ "id": id, "weight": kg, "note": "", "logged_at": format!("{date}T08:00:00+00:00"), "date": date })
    }

    fn weekly() -> Value {
        json!({
            "daily_stats": [
                { "date": "2026-10-13", "day": "Tue", "calories": 1600.0, "water_ml": 1500 },
                { "date": "2026-10-14", "day": "Wed", "calories": 2000.0, "water_ml": 2000 }
            ],
            "avg_daily_calories": 1800.0,
            "days_on_track": 1,
            "weight_change": -1.0,
            "total_calories": 3600.0
        })
    }

    fn route_both(app: &TestApp, weights: Value) {
        app.transport.route(HttpMethod::Get, "/weight-logs", 200, weights);
        app.transport.route(HttpMethod::Get, "/stats/weekly", 200, weekly());
    }

    #[test]
    fn loads_history_and_stats_together() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = ProgressViewModel::new(&app.state);
        route_both(
            &app,
            json!([weight("w2", 69.0, "2026-10-14"), weight("w1", 70.0, "2026-10-07")]),
        );

        block_on(vm.load()).unwrap();

        assert!(vm.is_loaded());
        assert_eq!(app.transport.count(HttpMethod::Get, "/weight-logs"), 1);
        assert_eq!(app.transport.count(HttpMethod::Get, "/stats/weekly"), 1);
        assert!(app
            .transport
            .requests()
            .iter()
            .any(|r| r.url.ends_with("/api/weight-logs?limit=90")));
        assert_eq!(vm.stats().unwrap().days_on_track, 1);
        // Imperial: cronológico y en libras
        let series = vm.weight_series();
        assert_eq!(series[0], ("Oct 7".to_string(), 154.3));
        assert_eq!(series[1].0, "Oct 14");
        assert_eq!(vm.weight_change_kg(), Some(-1.0));
    }

    #[test]
    fn one_failed_request_leaves_the_page_unloaded() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = ProgressViewModel::new(&app.state);
        app.transport.route(HttpMethod::Get, "/weight-logs", 200, json!([]));
        app.transport
            .route(HttpMethod::Get, "/stats/weekly", 500, json!({ "detail": "boom" }));

        assert!(block_on(vm.load()).is_err());
        assert!(!vm.is_loaded());
        assert!(vm.stats().is_none());
        assert_eq!(app.state.notifications.list().len(), 1);
    }

    #[test]
    fn logging_weight_converts_units_and_refetches_both() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = ProgressViewModel::new(&app.state);
        app.transport.route(HttpMethod::Post, "/weight-logs", 200, weight("w3", 68.9, "2026-10-15"));
        route_both(&app, json!([weight("w3", 68.9, "2026-10-15")]));

        block_on(vm.log_weight("152", " after run ")).unwrap();

        let post = app
            .transport
            .requests()
            .into_iter()
            .find(|r| r.method == HttpMethod::Post)
            .unwrap();
        let body: Value = serde_json::from_str(post.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["weight"], 68.9);
        assert_eq!(body["note"], "after run");
        let logged_at = body["logged_at"].as_str().unwrap();
        assert_eq!(&logged_at[..10], crate::utils::dates::format_date(crate::utils::dates::today()));
        assert_eq!(app.transport.count(HttpMethod::Get, "/weight-logs"), 1);
        assert_eq!(app.transport.count(HttpMethod::Get, "/stats/weekly"), 1);
        assert_eq!(app.state.session.profile().unwrap().current_weight, Some(68.9));
    }

    #[test]
    fn out_of_range_weight_is_rejected_locally() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = ProgressViewModel::new(&app.state);
        assert!(block_on(vm.log_weight("20", "")).is_err());
        assert!(app.transport.requests().is_empty());
    }

    #[test]
    fn deleting_weight_refetches() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = ProgressViewModel::new(&app.state);
        app.transport
            .route(HttpMethod::Delete, "/weight-logs", 200, json!({ "status": "deleted" }));
        route_both(&app, json!([]));

        block_on(vm.delete_weight("w1")).unwrap();
        assert_eq!(app.transport.count(HttpMethod::Delete, "/weight-logs/w1"), 1);
        assert!(vm.is_loaded());
        assert!(vm.weights().is_empty());
    }

    #[test]
    fn goal_progress_and_bars() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = ProgressViewModel::new(&app.state);
        route_both(
            &app,
            json!([weight("w2", 66.0, "2026-10-14"), weight("w1", 70.0, "2026-10-01")]),
        );
        block_on(vm.load()).unwrap();

        // 70 → 66 con objetivo 62: mitad del camino
        assert_eq!(vm.goal_progress_percent(), Some(50.0));
        let bars = vm.calorie_bars(100.0);
        assert_eq!(bars, vec![("Tue".to_string(), 80.0), ("Wed".to_string(), 100.0)]);
        assert_eq!(vm.weight_chart(ChartArea::default()).len(), 2);
    }
}
