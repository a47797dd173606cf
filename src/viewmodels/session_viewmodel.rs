// ============================================================================
// SESSION VIEWMODEL - LÓGICA DE SESIÓN
// ============================================================================
// Operaciones de sesión sobre el SessionStore: carga del perfil, login,
// registro, actualización local del perfil y logout.
// ============================================================================

use crate::errors::AppError;
use crate::models::{LoginRequest, ProfileUpdate, RegisterRequest, UserProfile};
use crate::services::ApiClient;
use crate::state::session_store::SessionStore;

/// ViewModel de sesión - SOLO lógica de negocio
#[derive(Clone)]
pub struct SessionViewModel {
    api: ApiClient,
}

impl SessionViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn store(&self) -> &SessionStore {
        self.api.session()
    }

    /// Refresca el perfil desde `/profile`.
    /// `Ok(None)` sin credencial o si el servidor la rechazó (ya purgada).
    pub async fn load_user(&self) -> Result<Option<UserProfile>, AppError> {
        let store = self.store();
        if !store.has_credential() {
            return Ok(None);
        }

        let generation = store.generation();
        store.set_loading(true);
        log::info!("👤 [SESSION] Cargando perfil...");

        let result = self.api.get_profile().await;

        // Hubo login/logout mientras tanto: la respuesta es de otra sesión
        if store.generation() != generation {
            log::warn!("⚠️ [SESSION] Respuesta de perfil obsoleta, descartada");
            return Ok(store.profile());
        }

        match result {
            Ok(profile) => {
                store.set_profile(profile.clone());
                store.set_loading(false);
                log::info!("✅ [SESSION] Perfil cargado (onboarding: {})", profile.onboarding_completed);
                Ok(Some(profile))
            }
            Err(AppError::Auth(_)) => {
                // El ApiClient ya purgó la sesión; clear() es idempotente
                store.clear();
                Ok(None)
            }
            Err(e) => {
                // Se mantiene el perfil cacheado
                store.set_loading(false);
                log::error!("❌ [SESSION] Error cargando perfil: {}", e);
                Err(e)
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AppError> {
        log::info!("🔐 [SESSION] Login para {}", email);
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await?;
        self.store().set_session(response.token, response.user.clone());
        log::info!("✅ [SESSION] Login exitoso");
        Ok(response.user)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, AppError> {
        log::info!("📝 [SESSION] Registro para {}", email);
        let request = RegisterRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = self.api.register(&request).await?;
        self.store().set_session(response.token, response.user.clone());
        log::info!("✅ [SESSION] Registro exitoso");
        Ok(response.user)
    }

    /// Mezcla un update parcial en el perfil local, sin red
    pub fn update_user(&self, update: &ProfileUpdate) -> Option<UserProfile> {
        self.store().merge_profile(update)
    }

    /// Reemplaza el perfil local por el que devolvió el servidor
    pub fn store_profile(&self, profile: UserProfile) -> bool {
        self.store().set_profile(profile)
    }

    /// Purga la sesión local. Sin llamada de red.
    pub fn logout(&self) {
        log::info!("👋 [SESSION] Logout");
        self.store().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::fixtures::{new_user, onboarded_user};
    use crate::router::{resolve, GuardOutcome, MemoryNavigator, Navigator, Route};
    use crate::services::api_client::testing::Harness;
    use crate::services::http::testing::MockTransport;
    use crate::services::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
    use crate::state::session_store::SessionStatus;
    use crate::utils::storage::MemoryStore;
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn auth_body(user: &UserProfile) -> serde_json::Value {
        json!({ "token": "tok-abc", "user": user })
    }

    #[test]
    fn login_scenario_leads_to_onboarding() {
        let harness = Harness::new(Route::Auth);
        let vm = SessionViewModel::new(harness.api.clone());
        harness.transport.push(200, auth_body(&new_user()));

        let profile = block_on(vm.login("a@b.com", "secret1")).unwrap();

        assert_eq!(profile, new_user());
        assert_eq!(vm.store().credential().as_deref(), Some("tok-abc"));
        assert_eq!(vm.store().profile(), Some(new_user()));
        assert_eq!(vm.store().status(), SessionStatus::AuthenticatedIncomplete);
        let body = harness.transport.last_request().unwrap().body.unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            json!({ "email": "a@b.com", "password": "secret1" })
        );

        let outcome = resolve(&Route::Dashboard, &vm.store().snapshot());
        assert_eq!(outcome, GuardOutcome::Redirect(Route::Onboarding));
    }

    #[test]
    fn rejected_login_propagates_server_message() {
        let harness = Harness::new(Route::Auth);
        let vm = SessionViewModel::new(harness.api.clone());
        harness
            .transport
            .push(401, json!({ "detail": "Invalid email or password" }));

        let err = block_on(vm.login("a@b.com", "nope")).unwrap_err();
        assert_eq!(err, AppError::Auth("Invalid email or password".to_string()));
        assert_eq!(vm.store().status(), SessionStatus::Unauthenticated);
    }

    #[test]
    fn duplicate_registration_is_a_validation_error() {
        let harness = Harness::new(Route::Auth);
        let vm = SessionViewModel::new(harness.api.clone());
        harness
            .transport
            .push(400, json!({ "detail": "Email already registered" }));

        let err = block_on(vm.register("Ana", "a@b.com", "secret1")).unwrap_err();
        assert_eq!(err, AppError::Validation("Email already registered".to_string()));
        assert!(vm.store().credential().is_none());
    }

    #[test]
    fn load_user_without_credential_skips_the_network() {
        let harness = Harness::new(Route::Auth);
        let vm = SessionViewModel::new(harness.api.clone());
        assert_eq!(block_on(vm.load_user()), Ok(None));
        assert!(harness.transport.requests().is_empty());
    }

    #[test]
    fn onboarding_completion_scenario() {
        let harness = Harness::signed_in(new_user());
        let vm = SessionViewModel::new(harness.api.clone());

        let update = ProfileUpdate {
            onboarding_completed: Some(true),
            ..Default::default()
        };
        harness.transport.route(HttpMethod::Put, "/profile", 200, json!(onboarded_user()));
        harness.transport.route(HttpMethod::Get, "/profile", 200, json!(onboarded_user()));
        block_on(harness.api.update_profile(&update)).unwrap();
        let reloaded = block_on(vm.load_user()).unwrap();

        assert_eq!(reloaded, Some(onboarded_user()));
        assert!(!vm.store().snapshot().loading);
        assert_eq!(
            resolve(&Route::Onboarding, &vm.store().snapshot()),
            GuardOutcome::Redirect(Route::Dashboard)
        );
    }

    #[test]
    fn load_user_401_resolves_to_unauthenticated_once() {
        let harness = Harness::signed_in(onboarded_user());
        let vm = SessionViewModel::new(harness.api.clone());
        harness.transport.push(401, json!({ "detail": "Invalid token" }));

        assert_eq!(block_on(vm.load_user()), Ok(None));
        assert_eq!(vm.store().status(), SessionStatus::Unauthenticated);
        assert_eq!(harness.navigator.current(), Route::Auth);
        assert_eq!(harness.navigator.history(), vec![Route::Dashboard, Route::Auth]);
    }

    #[test]
    fn load_user_network_failure_keeps_cached_profile() {
        let harness = Harness::signed_in(onboarded_user());
        let vm = SessionViewModel::new(harness.api.clone());
        harness.transport.push_error(AppError::Network("offline".to_string()));

        assert!(block_on(vm.load_user()).is_err());
        assert_eq!(vm.store().status(), SessionStatus::AuthenticatedComplete);
    }

    /// Transporte que retiene la respuesta hasta que se abre la compuerta
    struct GatedTransport {
        gate: RefCell<Option<oneshot::Receiver<()>>>,
        inner: MockTransport,
    }

    #[async_trait(?Send)]
    impl HttpTransport for GatedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.inner.send(request).await
        }
    }

    #[test]
    fn stale_profile_response_is_dropped() {
        let (open, gate) = oneshot::channel();
        let transport = Rc::new(GatedTransport {
            gate: RefCell::new(Some(gate)),
            inner: MockTransport::new(),
        });
        transport.inner.push(200, json!(onboarded_user()));

        let session = SessionStore::new(Rc::new(MemoryStore::new()));
        session.set_session("old".to_string(), onboarded_user());
        let navigator = Rc::new(MemoryNavigator::new(Route::Dashboard));
        let api = ApiClient::new("http://api.test", transport, session.clone(), navigator);
        let vm = SessionViewModel::new(api);

        // Otro usuario inicia sesión mientras la request está en vuelo
        let switch_user = async move {
            session.clear();
            session.set_session("new".to_string(), new_user());
            let _ = open.send(());
        };
        let (result, ()) = block_on(futures::future::join(vm.load_user(), switch_user));

        assert_eq!(result, Ok(Some(new_user())));
        assert_eq!(vm.store().credential().as_deref(), Some("new"));
        assert_eq!(vm.store().profile(), Some(new_user()));
    }

    #[test]
    fn update_user_merges_locally_and_logout_clears() {
        let harness = Harness::signed_in(new_user());
        let vm = SessionViewModel::new(harness.api.clone());

        let merged = vm
            .update_user(&ProfileUpdate {
                water_goal: Some(3000),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(merged.water_goal, 3000);
        assert!(harness.transport.requests().is_empty());

        vm.logout();
        vm.logout();
        assert_eq!(vm.store().status(), SessionStatus::Unauthenticated);
        assert!(vm.update_user(&ProfileUpdate::default()).is_none());
    }
}
