// ============================================================================
// DASHBOARD VIEWMODEL - Resumen diario (calorías, macros, agua, comidas)
// ============================================================================
// Toda mutación (agua, borrar comida) vuelve a pedir el dashboard completo:
// nunca se parchea el estado local.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::NaiveDate;

use crate::errors::AppError;
use crate::models::{Dashboard, WaterLogAdd};
use crate::state::AppState;
use crate::utils::dates;

/// Tamaño de un vaso en el botón rápido de agua
pub const GLASS_ML: u32 = 250;

#[derive(Clone)]
pub struct DashboardViewModel {
    state: AppState,
    today: NaiveDate,
    date: Rc<Cell<NaiveDate>>,
    dashboard: Rc<RefCell<Option<Dashboard>>>,
    loading: Rc<Cell<bool>>,
    busy: Rc<Cell<bool>>,
}

impl DashboardViewModel {
    pub fn new(state: &AppState) -> Self {
        Self::new_at(state, dates::today())
    }

    pub fn new_at(state: &AppState, today: NaiveDate) -> Self {
        Self {
            state: state.clone(),
            today,
            date: Rc::new(Cell::new(today)),
            dashboard: Rc::new(RefCell::new(None)),
            loading: Rc::new(Cell::new(false)),
            busy: Rc::new(Cell::new(false)),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date.get()
    }

    pub fn date_label(&self) -> String {
        dates::day_label(self.date.get(), self.today)
    }

    pub fn is_today(&self) -> bool {
        self.date.get() == self.today
    }

    pub fn can_go_next(&self) -> bool {
        self.date.get() < self.today
    }

    pub fn dashboard(&self) -> Option<Dashboard> {
        self.dashboard.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Hay una mutación en curso (deshabilita botones)
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub async fn show_previous_day(&self) -> Result<(), AppError> {
        self.date.set(dates::previous_day(self.date.get()));
        self.load().await
    }

    /// No avanza más allá de hoy
    pub async fn show_next_day(&self) -> Result<(), AppError> {
        let next = dates::next_day(self.date.get(), self.today);
        if next == self.date.get() {
            return Ok(());
        }
        self.date.set(next);
        self.load().await
    }

    pub async fn load(&self) -> Result<(), AppError> {
        let date = dates::format_date(self.date.get());
        self.loading.set(true);
        self.state.notify_changes();

        let result = self.state.api.dashboard(&date).await;
        self.loading.set(false);

        match result {
            Ok(dashboard) => {
                // Respuesta de otro día (el usuario cambió de fecha mientras tanto)
                if dashboard.date == dates::format_date(self.date.get()) {
                    *self.dashboard.borrow_mut() = Some(dashboard);
                } else {
                    log::debug!("📅 [DASHBOARD] Respuesta de {} descartada", dashboard.date);
                }
                self.state.notify_changes();
                Ok(())
            }
            Err(e) => {
                log::error!("❌ [DASHBOARD] Error cargando {}: {}", date, e);
                self.state.notifications.app_error(&e);
                self.state.notify_changes();
                Err(e)
            }
        }
    }

    pub async fn add_water(&self, amount_ml: u32) -> Result<(), AppError> {
        let entry = WaterLogAdd {
            amount_ml,
            date: Some(dates::format_date(self.date.get())),
        };
        self.mutate("agua +", async { self.state.api.add_water(&entry).await.map(|_| ()) })
            .await
    }

    pub async fn remove_last_water(&self) -> Result<(), AppError> {
        let date = dates::format_date(self.date.get());
        self.mutate("agua -", async {
            self.state.api.remove_last_water(&date).await.map(|_| ())
        })
        .await
    }

    pub async fn delete_food_log(&self, log_id: &str) -> Result<(), AppError> {
        self.mutate("borrar comida", async {
            self.state.api.delete_food_log(log_id).await
        })
        .await?;
        self.state.notifications.success("Entry removed");
        Ok(())
    }

    /// Ejecuta una mutación y refresca el dashboard
    async fn mutate<F>(&self, label: &str, call: F) -> Result<(), AppError>
    where
        F: std::future::Future<Output = Result<(), AppError>>,
    {
        self.busy.set(true);
        self.state.notify_changes();
        let result = call.await;
        self.busy.set(false);

        if let Err(e) = result {
            log::warn!("⚠️ [DASHBOARD] {} falló: {}", label, e);
            self.state.notifications.app_error(&e);
            self.state.notify_changes();
            return Err(e);
        }
        log::info!("✅ [DASHBOARD] {} ok, refrescando", label);
        self.load().await
    }
}
