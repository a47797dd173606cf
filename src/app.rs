// ============================================================================
// APP - Aplicación principal: monta #app y re-renderiza en cada cambio
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use futures::future::LocalFutureObj;
use futures::task::{LocalSpawn, SpawnError};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{append_child, focused_input, get_element_by_id, restore_focus, set_inner_html};
use crate::pages::PageHost;
use crate::router::navigator::BrowserNavigator;
use crate::router::{Navigator, Route};
use crate::services::GlooTransport;
use crate::state::AppState;
use crate::utils::debounce::TimeoutScheduler;
use crate::utils::storage::LocalStore;
use crate::views::{render_app, schedule_auto_dismiss};

/// Tareas async sobre el event loop del browser
struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}

/// Aplicación principal
pub struct App {
    host: PageHost,
    root: Element,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let config = CONFIG.clone();
        log::info!(
            "⚙️ [APP] API {} ({})",
            config.api_base_url,
            config.environment
        );
        let transport = Rc::new(GlooTransport::new(config.request_timeout_ms));
        let state = AppState::new(
            config,
            transport,
            Rc::new(LocalStore),
            Rc::new(BrowserNavigator::new()?),
            Rc::new(TimeoutScheduler),
            Rc::new(BrowserSpawner),
        );

        Ok(Self {
            host: PageHost::new(state),
            root,
        })
    }

    pub fn state(&self) -> &AppState {
        self.host.state()
    }

    /// Suscripciones de re-render + carga inicial del perfil
    pub fn start(&self) {
        let state = self.state();

        state.navigator.subscribe(Box::new(|_: &Route| crate::schedule_render()));
        state.session.subscribe(|_| crate::schedule_render());
        state.subscribe_to_changes(crate::schedule_render);

        // Cada toast nuevo se cierra solo
        let last_seen = Rc::new(Cell::new(0u64));
        let toast_state = state.clone();
        state.notifications.subscribe(move |toasts| {
            for toast in toasts.iter().filter(|toast| toast.id > last_seen.get()) {
                schedule_auto_dismiss(&toast_state, toast.id);
            }
            if let Some(newest) = toasts.iter().map(|toast| toast.id).max() {
                last_seen.set(last_seen.get().max(newest));
            }
            crate::schedule_render();
        });

        self.host.start();
    }

    /// Re-render completo de la pantalla actual
    pub fn render(&self) -> Result<(), JsValue> {
        let screen = self.host.sync();

        // El DOM se reconstruye entero: el input con foco se recupera después
        let focused = focused_input();
        set_inner_html(&self.root, "");
        let view = render_app(self.state(), &screen)?;
        append_child(&self.root, &view)?;
        if let Some(focused) = focused {
            restore_focus(&focused);
        }
        Ok(())
    }
}
