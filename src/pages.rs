// ============================================================================
// PAGES - Qué página está montada y con qué ViewModel
// ============================================================================
// Cada render pasa por los guards. Al entrar en una ruta distinta se crea un
// ViewModel nuevo y se lanzan sus cargas iniciales (el "mount" de la página).
// ============================================================================

use std::cell::RefCell;

use crate::router::{resolve, GuardOutcome, Route};
use crate::state::AppState;
use crate::viewmodels::{
    AuthViewModel, DashboardViewModel, FoodSearchViewModel, OnboardingViewModel,
    ProgressViewModel, SessionViewModel, SettingsViewModel,
};

/// Página montada
#[derive(Clone)]
pub enum Page {
    Auth(AuthViewModel),
    Onboarding(OnboardingViewModel),
    Dashboard(DashboardViewModel),
    AddFood(FoodSearchViewModel),
    Progress(ProgressViewModel),
    Settings(SettingsViewModel),
    NotFound(String),
}

/// Resultado de sincronizar ruta + sesión
#[derive(Clone)]
pub enum Screen {
    Spinner,
    /// Se pidió un `replace`; el navigator volverá a notificar
    Redirecting,
    Page(Route, Page),
}

pub struct PageHost {
    state: AppState,
    mounted: RefCell<Option<(Route, Page)>>,
}

impl PageHost {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            mounted: RefCell::new(None),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Arranque: con credencial guardada se refresca el perfil.
    /// El spinner se activa antes del primer render.
    pub fn start(&self) {
        let session = SessionViewModel::new(self.state.api.clone());
        if !session.store().has_credential() {
            return;
        }
        session.store().set_loading(true);
        self.state.spawn(async move {
            if let Err(e) = session.load_user().await {
                log::warn!("⚠️ [APP] Perfil no refrescado: {}", e);
            }
        });
    }

    /// Evalúa el guard de la ruta actual y monta la página si cambió
    pub fn sync(&self) -> Screen {
        let route = self.state.navigator.current();
        match resolve(&route, &self.state.session.snapshot()) {
            GuardOutcome::Spinner => Screen::Spinner,
            GuardOutcome::Redirect(target) => {
                log::info!("🛡️ [GUARD] {} → {}", route.path(), target.path());
                // La página montada ya no es válida
                *self.mounted.borrow_mut() = None;
                self.state.navigator.replace(target);
                Screen::Redirecting
            }
            GuardOutcome::Render => Screen::Page(route.clone(), self.mount(route)),
        }
    }

    fn mount(&self, route: Route) -> Page {
        let key = route.without_query();
        if let Some((mounted, page)) = self.mounted.borrow().as_ref() {
            if *mounted == key {
                return page.clone();
            }
        }

        log::debug!("📄 [APP] Montando {}", key.path());
        let page = self.create_page(&route);
        *self.mounted.borrow_mut() = Some((key, page.clone()));
        self.on_mount(&route, &page);
        page
    }

    fn create_page(&self, route: &Route) -> Page {
        let state = &self.state;
        match route {
            Route::Auth => Page::Auth(AuthViewModel::new(state)),
            Route::Onboarding => Page::Onboarding(OnboardingViewModel::new(state)),
            Route::Dashboard => Page::Dashboard(DashboardViewModel::new(state)),
            Route::AddFood { .. } => Page::AddFood(FoodSearchViewModel::new(state)),
            Route::Progress => Page::Progress(ProgressViewModel::new(state)),
            Route::Settings => Page::Settings(SettingsViewModel::new(state)),
            Route::NotFound(path) => Page::NotFound(path.clone()),
        }
    }

    /// Cargas iniciales de cada página; los errores ya acaban en un toast
    fn on_mount(&self, route: &Route, page: &Page) {
        match page {
            Page::Dashboard(vm) => {
                let vm = vm.clone();
                self.state.spawn(async move {
                    let _ = vm.load().await;
                });
            }
            Page::AddFood(vm) => {
                if let Route::AddFood { meal } = route {
                    vm.consume_route_meal(*meal);
                }
                let vm = vm.clone();
                self.state.spawn(async move {
                    let _ = vm.load_recent().await;
                });
            }
            Page::Progress(vm) => {
                let vm = vm.clone();
                self.state.spawn(async move {
                    let _ = vm.load().await;
                });
            }
            Page::Auth(_) | Page::Onboarding(_) | Page::Settings(_) | Page::NotFound(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TOKEN_STORAGE_KEY, USER_STORAGE_KEY};
    use crate::models::user::fixtures::{new_user, onboarded_user};
    use crate::models::MealType;
    use crate::router::Navigator;
    use crate::services::HttpMethod;
    use crate::state::app_state::testing::TestApp;
    use crate::state::SessionStatus;
    use crate::utils::storage::KeyValueStore;
    use serde_json::json;

    #[test]
    fn anonymous_visitor_is_sent_to_auth() {
        let app = TestApp::new(Route::Progress);
        let host = PageHost::new(app.state.clone());

        assert!(matches!(host.sync(), Screen::Redirecting));
        assert_eq!(app.navigator.current(), Route::Auth);
        assert_eq!(app.navigator.history().len(), 1);
        assert!(matches!(host.sync(), Screen::Page(Route::Auth, Page::Auth(_))));
    }

    #[test]
    fn dashboard_mount_fetches_once() {
        let app = TestApp::signed_in(onboarded_user());
        app.transport
            .route(HttpMethod::Get, "/dashboard", 500, json!({ "detail": "down" }));
        let host = PageHost::new(app.state.clone());

        assert!(matches!(host.sync(), Screen::Page(_, Page::Dashboard(_))));
        host.sync();
        app.run_tasks();

        assert_eq!(app.transport.count(HttpMethod::Get, "/dashboard"), 1);
    }

    #[test]
    fn add_food_consumes_the_meal_query_without_remounting() {
        let app = TestApp::signed_in(onboarded_user());
        app.transport.route(HttpMethod::Get, "/food-logs/recent-foods", 200, json!([]));
        app.navigator.navigate(Route::AddFood { meal: Some(MealType::Breakfast) });
        let host = PageHost::new(app.state.clone());

        let first = host.sync();
        assert_eq!(app.navigator.current(), Route::AddFood { meal: None });
        let Screen::Page(_, Page::AddFood(vm)) = first else {
            panic!("add-food no montada");
        };
        assert_eq!(vm.meal(), MealType::Breakfast);

        host.sync();
        app.run_tasks();
        assert_eq!(app.transport.count(HttpMethod::Get, "/food-logs/recent-foods"), 1);
    }

    #[test]
    fn stored_credential_shows_spinner_until_profile_arrives() {
        let app = TestApp::new(Route::Dashboard);
        app.storage.set_item(TOKEN_STORAGE_KEY, "tok").unwrap();
        // Sesión rehidratada desde storage: nuevo AppState sobre el mismo storage
        let state = crate::state::AppState::new(
            app.state.config.clone(),
            app.transport.clone(),
            app.storage.clone(),
            app.navigator.clone(),
            app.scheduler.clone(),
            app.state.spawner.clone(),
        );
        app.transport.route(HttpMethod::Get, "/profile", 200, serde_json::to_value(new_user()).unwrap());
        let host = PageHost::new(state.clone());

        host.start();
        assert!(matches!(host.sync(), Screen::Spinner));

        app.run_tasks();
        assert_eq!(state.session.status(), SessionStatus::AuthenticatedIncomplete);
        assert!(app.storage.get_item(USER_STORAGE_KEY).unwrap().is_some());
        assert!(matches!(host.sync(), Screen::Redirecting));
        assert_eq!(app.navigator.current(), Route::Onboarding);
    }

    #[test]
    fn not_found_renders_for_everyone() {
        let app = TestApp::new(Route::NotFound("/nope".to_string()));
        let host = PageHost::new(app.state.clone());
        assert!(matches!(host.sync(), Screen::Page(_, Page::NotFound(path)) if path == "/nope"));
    }
}
