// ============================================================================
// NAVIGATOR - Navegación explícita (nunca se muta `location` directamente)
// ============================================================================

use std::cell::RefCell;

use super::route::Route;
use crate::state::reactivity::Listeners;

/// Comandos de navegación de la SPA
pub trait Navigator {
    fn current(&self) -> Route;
    /// Nueva entrada de historial
    fn navigate(&self, route: Route);
    /// Reemplaza la entrada actual (redirects, limpieza de query)
    fn replace(&self, route: Route);
    fn subscribe(&self, callback: Box<dyn Fn(&Route)>);
}

/// Navigator en memoria (tests)
pub struct MemoryNavigator {
    history: RefCell<Vec<Route>>,
    listeners: Listeners<Route>,
}

impl MemoryNavigator {
    pub fn new(initial: Route) -> Self {
        Self {
            history: RefCell::new(vec![initial]),
            listeners: Listeners::new(),
        }
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.borrow().clone()
    }

    /// Simula el botón "atrás"
    pub fn back(&self) {
        let current = {
            let mut history = self.history.borrow_mut();
            if history.len() > 1 {
                history.pop();
            }
            history.last().cloned()
        };
        if let Some(route) = current {
            self.listeners.notify(&route);
        }
    }
}

impl Navigator for MemoryNavigator {
    fn current(&self) -> Route {
        self.history
            .borrow()
            .last()
            .cloned()
            .unwrap_or(Route::Dashboard)
    }

    fn navigate(&self, route: Route) {
        self.history.borrow_mut().push(route.clone());
        self.listeners.notify(&route);
    }

    fn replace(&self, route: Route) {
        {
            let mut history = self.history.borrow_mut();
            history.pop();
            history.push(route.clone());
        }
        self.listeners.notify(&route);
    }

    fn subscribe(&self, callback: Box<dyn Fn(&Route)>) {
        self.listeners.subscribe(move |route| callback(route));
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserNavigator;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{Navigator, Route};
    use crate::state::reactivity::Listeners;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    /// Navigator sobre History API (`pushState` / `popstate`)
    pub struct BrowserNavigator {
        listeners: Listeners<Route>,
    }

    impl BrowserNavigator {
        /// Registra el listener global de `popstate`.
        /// Solo debe crearse UNA VEZ al iniciar la app.
        pub fn new() -> Result<Self, JsValue> {
            let listeners: Listeners<Route> = Listeners::new();
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

            let on_pop = listeners.clone();
            let closure = Closure::wrap(Box::new(move |_e: web_sys::PopStateEvent| {
                let route = current_route();
                log::info!("🔙 [ROUTER] popstate → {}", route.path());
                on_pop.notify(&route);
            }) as Box<dyn FnMut(web_sys::PopStateEvent)>);
            window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
            // Listener global registrado una sola vez: forget() no acumula
            closure.forget();

            Ok(Self { listeners })
        }
    }

    fn current_route() -> Route {
        let location = web_sys::window().map(|w| w.location());
        let path = location
            .as_ref()
            .and_then(|l| l.pathname().ok())
            .unwrap_or_else(|| "/".to_string());
        let search = location
            .as_ref()
            .and_then(|l| l.search().ok())
            .unwrap_or_default();
        Route::parse(&format!("{}{}", path, search))
    }

    fn write_history(route: &Route, replace: bool) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            log::error!("❌ [ROUTER] History API no disponible");
            return;
        };
        let path = route.path();
        let result = if replace {
            history.replace_state_with_url(&JsValue::NULL, "", Some(&path))
        } else {
            history.push_state_with_url(&JsValue::NULL, "", Some(&path))
        };
        if let Err(e) = result {
            log::error!("❌ [ROUTER] Error actualizando historial: {:?}", e);
        }
    }

    impl Navigator for BrowserNavigator {
        fn current(&self) -> Route {
            current_route()
        }

        fn navigate(&self, route: Route) {
            log::info!("🧭 [ROUTER] navigate → {}", route.path());
            write_history(&route, false);
            self.listeners.notify(&route);
        }

        fn replace(&self, route: Route) {
            log::info!("🧭 [ROUTER] replace → {}", route.path());
            write_history(&route, true);
            self.listeners.notify(&route);
        }

        fn subscribe(&self, callback: Box<dyn Fn(&Route)>) {
            self.listeners.subscribe(move |route| callback(route));
        }
    }
}
