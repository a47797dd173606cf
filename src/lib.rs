// ============================================================================
// DIET TRACKER APP - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI
// - Services: SOLO comunicación API
// - State: Sesión, toasts y cambios con Rc<RefCell>
// - Router: Rutas + guards de autenticación/onboarding
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod config;
pub mod errors;
pub mod models;
pub mod pages;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

#[cfg(target_arch = "wasm32")]
pub use browser::{main, rerender_app_wasm};
#[cfg(target_arch = "wasm32")]
pub(crate) use browser::schedule_render;

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::{Cell, RefCell};

    use gloo_timers::callback::Timeout;
    use wasm_bindgen::prelude::*;

    use crate::app::App;
    use crate::config::CONFIG;

    // Variable estática global para mantener la instancia de App
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
        static RENDER_PENDING: Cell<bool> = Cell::new(false);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        // Inicializar panic hook para mejor debugging
        console_error_panic_hook::set_once();

        let level = if CONFIG.is_logging_enabled() {
            log::Level::Info
        } else {
            log::Level::Warn
        };
        wasm_logger::init(wasm_logger::Config::new(level));
        log::info!("🚀 Diet Tracker App - Rust Puro + MVVM");

        crate::services::service_worker::register_service_worker();

        let app = App::new()?;
        APP.with(|cell| *cell.borrow_mut() = Some(app));

        // start() puede disparar notificaciones: la App ya debe estar guardada
        APP.with(|cell| {
            if let Some(app) = cell.borrow().as_ref() {
                app.start();
            }
        });
        render_now();
        Ok(())
    }

    /// Agrupa todos los cambios de un tick en un único re-render
    pub(crate) fn schedule_render() {
        if RENDER_PENDING.with(|pending| pending.replace(true)) {
            return;
        }
        Timeout::new(0, || {
            RENDER_PENDING.with(|pending| pending.set(false));
            render_now();
        })
        .forget();
    }

    fn render_now() {
        APP.with(|cell| match cell.borrow().as_ref() {
            Some(app) => {
                if let Err(e) = app.render() {
                    log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                }
            }
            None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
        });
    }

    /// Re-render completo (llamable desde JavaScript)
    #[wasm_bindgen]
    pub fn rerender_app_wasm() {
        schedule_render();
    }
}
