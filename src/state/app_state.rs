// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================
// Contenedor de dependencias compartidas por los ViewModels. Se construye una
// vez en el arranque con las implementaciones del browser (o dobles en tests).
// ============================================================================

use std::rc::Rc;

use futures::task::LocalSpawn;

use crate::config::AppConfig;
use crate::router::Navigator;
use crate::services::{ApiClient, HttpTransport};
use crate::state::notifications::Notifications;
use crate::state::reactivity::Listeners;
use crate::state::session_store::SessionStore;
use crate::utils::debounce::Scheduler;
use crate::utils::storage::KeyValueStore;

/// Estado global de la aplicación (clonar comparte todo)
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub api: ApiClient,
    pub session: SessionStore,
    pub navigator: Rc<dyn Navigator>,
    pub scheduler: Rc<dyn Scheduler>,
    /// Lanza tareas async en el hilo de UI (spawn_local en el browser)
    pub spawner: Rc<dyn LocalSpawn>,
    pub notifications: Notifications,

    // Reactivity: cambios de estado de cualquier ViewModel
    changes: Listeners<()>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        transport: Rc<dyn HttpTransport>,
        storage: Rc<dyn KeyValueStore>,
        navigator: Rc<dyn Navigator>,
        scheduler: Rc<dyn Scheduler>,
        spawner: Rc<dyn LocalSpawn>,
    ) -> Self {
        let session = SessionStore::new(storage);
        let api = ApiClient::new(
            &config.api_base_url,
            transport,
            session.clone(),
            navigator.clone(),
        );

        Self {
            config,
            api,
            session,
            navigator,
            scheduler,
            spawner,
            notifications: Notifications::new(),
            changes: Listeners::new(),
        }
    }

    /// Suscribirse a cambios de estado de los ViewModels
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.changes.subscribe(move |_| callback());
    }

    /// Notificar a todos los subscribers de cambios
    pub fn notify_changes(&self) {
        self.changes.notify(&());
    }

    /// Lanza una tarea async sin esperar su resultado
    pub fn spawn<F>(&self, future: F)
    where
        F: std::future::Future<Output = ()> + 'static,
    {
        use futures::task::LocalSpawnExt;
        if let Err(e) = self.spawner.spawn_local(future) {
            log::error!("❌ [APP] No se pudo lanzar la tarea: {}", e);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::router::{MemoryNavigator, Route};
    use crate::services::http::testing::MockTransport;
    use crate::utils::debounce::testing::ManualScheduler;
    use crate::utils::storage::MemoryStore;
    use futures::executor::LocalPool;
    use std::cell::RefCell;

    /// AppState sobre dobles en memoria, con acceso a cada doble
    pub struct TestApp {
        pub state: AppState,
        pub transport: Rc<MockTransport>,
        pub storage: Rc<MemoryStore>,
        pub navigator: Rc<MemoryNavigator>,
        pub scheduler: Rc<ManualScheduler>,
        pool: RefCell<LocalPool>,
    }

    impl TestApp {
        pub fn new(initial: Route) -> Self {
            let transport = Rc::new(MockTransport::new());
            let storage = Rc::new(MemoryStore::new());
            let navigator = Rc::new(MemoryNavigator::new(initial));
            let scheduler = Rc::new(ManualScheduler::new());
            let pool = LocalPool::new();
            let config = AppConfig {
                api_base_url: "http://api.test".to_string(),
                ..AppConfig::default()
            };
            let state = AppState::new(
                config,
                transport.clone(),
                storage.clone(),
                navigator.clone(),
                scheduler.clone(),
                Rc::new(pool.spawner()),
            );
            Self {
                state,
                transport,
                storage,
                navigator,
                scheduler,
                pool: RefCell::new(pool),
            }
        }

        /// Ejecuta las tareas lanzadas con `spawn` hasta que no avancen más
        pub fn run_tasks(&self) {
            self.pool.borrow_mut().run_until_stalled();
        }

        pub fn signed_in(profile: crate::models::UserProfile) -> Self {
            let app = Self::new(Route::Dashboard);
            app.state.session.set_session("tok-123".to_string(), profile);
            app
        }
    }
}
