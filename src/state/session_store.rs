// ============================================================================
// SESSION STORE - Credencial + perfil, persistidos en localStorage
// ============================================================================
// Invariante: si no hay credencial, tampoco hay perfil (ni en memoria ni en
// storage). `clear()` purga ambos en una sola operación; la usan tanto el
// logout explícito como el ApiClient al recibir un 401.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{TOKEN_STORAGE_KEY, USER_STORAGE_KEY};
use crate::models::{ProfileUpdate, UserProfile};
use crate::state::reactivity::Listeners;
use crate::utils::storage::{load_json, save_json, KeyValueStore};

/// Estado de sesión derivado (no se guarda)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Unauthenticated,
    AuthenticatedIncomplete,
    AuthenticatedComplete,
}

/// Foto inmutable de la sesión para guards y vistas
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub loading: bool,
    pub has_credential: bool,
    pub profile: Option<UserProfile>,
}

impl SessionSnapshot {
    pub fn status(&self) -> SessionStatus {
        if self.loading {
            return SessionStatus::Loading;
        }
        match (&self.profile, self.has_credential) {
            (Some(profile), true) if profile.onboarding_completed => {
                SessionStatus::AuthenticatedComplete
            }
            (Some(_), true) => SessionStatus::AuthenticatedIncomplete,
            // Credencial sin perfil y sin carga en curso: no hay sesión usable
            _ => SessionStatus::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(
            self.status(),
            SessionStatus::AuthenticatedIncomplete | SessionStatus::AuthenticatedComplete
        )
    }
}

#[derive(Default)]
struct SessionInner {
    credential: Option<String>,
    profile: Option<UserProfile>,
    loading: bool,
    /// Se incrementa en cada login/clear; detecta respuestas de otra sesión
    generation: u64,
}

/// Handle compartido (clonar es barato y comparte el estado)
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<RefCell<SessionInner>>,
    storage: Rc<dyn KeyValueStore>,
    listeners: Listeners<SessionSnapshot>,
}

impl SessionStore {
    /// Crea el store hidratando credencial y perfil desde storage
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        let credential = storage
            .get_item(TOKEN_STORAGE_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.trim().is_empty());
        let mut profile: Option<UserProfile> = load_json(storage.as_ref(), USER_STORAGE_KEY);

        if credential.is_none() && profile.is_some() {
            log::warn!("⚠️ [SESSION] Perfil cacheado sin credencial, descartado");
            profile = None;
            if let Err(e) = storage.remove_item(USER_STORAGE_KEY) {
                log::error!("❌ [SESSION] Error eliminando perfil huérfano: {}", e);
            }
        }

        if credential.is_some() {
            log::info!(
                "💾 [SESSION] Sesión restaurada desde storage (perfil cacheado: {})",
                profile.is_some()
            );
        }

        Self {
            inner: Rc::new(RefCell::new(SessionInner {
                credential,
                profile,
                loading: false,
                generation: 0,
            })),
            storage,
            listeners: Listeners::new(),
        }
    }

    pub fn credential(&self) -> Option<String> {
        self.inner.borrow().credential.clone()
    }

    pub fn has_credential(&self) -> bool {
        self.inner.borrow().credential.is_some()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.inner.borrow().profile.clone()
    }

    pub fn generation(&self) -> u64 {
        self.inner.borrow().generation
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.borrow();
        SessionSnapshot {
            loading: inner.loading,
            has_credential: inner.credential.is_some(),
            profile: inner.profile.clone(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.snapshot().status()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&SessionSnapshot) + 'static,
    {
        self.listeners.subscribe(callback);
    }

    pub fn set_loading(&self, loading: bool) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let changed = inner.loading != loading;
            inner.loading = loading;
            changed
        };
        if changed {
            self.notify();
        }
    }

    /// Login/registro exitoso: guarda credencial y perfil juntos
    pub fn set_session(&self, credential: String, profile: UserProfile) {
        if let Err(e) = self.storage.set_item(TOKEN_STORAGE_KEY, &credential) {
            log::error!("❌ [SESSION] Error guardando credencial: {}", e);
        }
        if let Err(e) = save_json(self.storage.as_ref(), USER_STORAGE_KEY, &profile) {
            log::error!("❌ [SESSION] Error guardando perfil: {}", e);
        }
        {
            let mut inner = self.inner.borrow_mut();
            inner.credential = Some(credential);
            inner.profile = Some(profile);
            inner.loading = false;
            inner.generation += 1;
        }
        self.notify();
    }

    /// Reemplaza el perfil. Sin credencial no se guarda nada (ni en memoria
    /// ni en storage) y devuelve `false`.
    pub fn set_profile(&self, profile: UserProfile) -> bool {
        if !self.has_credential() {
            log::warn!("⚠️ [SESSION] set_profile sin credencial, ignorado");
            return false;
        }
        if let Err(e) = save_json(self.storage.as_ref(), USER_STORAGE_KEY, &profile) {
            log::error!("❌ [SESSION] Error guardando perfil: {}", e);
        }
        self.inner.borrow_mut().profile = Some(profile);
        self.notify();
        true
    }

    /// Mezcla un update parcial en el perfil en memoria y en caché
    pub fn merge_profile(&self, update: &ProfileUpdate) -> Option<UserProfile> {
        let mut profile = self.profile()?;
        profile.apply(update);
        if self.set_profile(profile.clone()) {
            Some(profile)
        } else {
            None
        }
    }

    /// Purga credencial y perfil. Idempotente: sin sesión no notifica.
    pub fn clear(&self) {
        let had_session = {
            let mut inner = self.inner.borrow_mut();
            let had_session =
                inner.credential.is_some() || inner.profile.is_some() || inner.loading;
            inner.credential = None;
            inner.profile = None;
            inner.loading = false;
            inner.generation += 1;
            had_session
        };

        // Primero el perfil: si falla el borrado del token queda una credencial
        // sin perfil, nunca un perfil huérfano
        if let Err(e) = self.storage.remove_item(USER_STORAGE_KEY) {
            log::error!("❌ [SESSION] Error eliminando perfil de storage: {}", e);
        }
        if let Err(e) = self.storage.remove_item(TOKEN_STORAGE_KEY) {
            log::error!("❌ [SESSION] Error eliminando credencial de storage: {}", e);
        }

        if had_session {
            log::info!("🗑️ [SESSION] Sesión purgada");
            self.notify();
        }
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        self.listeners.notify(&snapshot);
    }
}
