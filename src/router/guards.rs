// ============================================================================
// ROUTE GUARDS - Decisión de render/redirect según el estado de sesión
// ============================================================================
// Se re-evalúan en cada navegación y en cada cambio de sesión. Son funciones
// puras sobre un `SessionSnapshot`: el App decide qué hacer con el resultado.
// ============================================================================

use super::route::Route;
use crate::state::session_store::{SessionSnapshot, SessionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// Requiere sesión con onboarding completado
    Protected,
    /// Requiere sesión con onboarding pendiente
    OnboardingOnly,
    /// Solo sin sesión (login/registro)
    AuthOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    Spinner,
    Redirect(Route),
    Render,
}

pub fn evaluate(kind: GuardKind, session: &SessionSnapshot) -> GuardOutcome {
    use SessionStatus::*;

    match (kind, session.status()) {
        (_, Loading) => GuardOutcome::Spinner,

        (GuardKind::Protected, Unauthenticated) => GuardOutcome::Redirect(Route::Auth),
        (GuardKind::Protected, AuthenticatedIncomplete) => GuardOutcome::Redirect(Route::Onboarding),
        (GuardKind::Protected, AuthenticatedComplete) => GuardOutcome::Render,

        (GuardKind::OnboardingOnly, Unauthenticated) => GuardOutcome::Redirect(Route::Auth),
        (GuardKind::OnboardingOnly, AuthenticatedComplete) => GuardOutcome::Redirect(Route::Dashboard),
        (GuardKind::OnboardingOnly, AuthenticatedIncomplete) => GuardOutcome::Render,

        (GuardKind::AuthOnly, AuthenticatedComplete) => GuardOutcome::Redirect(Route::Dashboard),
        (GuardKind::AuthOnly, AuthenticatedIncomplete) => GuardOutcome::Redirect(Route::Onboarding),
        (GuardKind::AuthOnly, Unauthenticated) => GuardOutcome::Render,
    }
}

/// Guard que protege cada ruta. `NotFound` no tiene guard.
pub fn guard_for(route: &Route) -> Option<GuardKind> {
    match route {
        Route::Auth => Some(GuardKind::AuthOnly),
        Route::Onboarding => Some(GuardKind::OnboardingOnly),
        Route::NotFound(_) => None,
        Route::Dashboard | Route::AddFood { .. } | Route::Progress | Route::Settings => {
            Some(GuardKind::Protected)
        }
    }
}

pub fn resolve(route: &Route, session: &SessionSnapshot) -> GuardOutcome {
    match guard_for(route) {
        Some(kind) => evaluate(kind, session),
        None => GuardOutcome::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::fixtures::{new_user, onboarded_user};
    use crate::models::MealType;

    fn loading() -> SessionSnapshot {
        SessionSnapshot { loading: true, has_credential: true, profile: None }
    }

    fn anonymous() -> SessionSnapshot {
        SessionSnapshot { loading: false, has_credential: false, profile: None }
    }

    fn incomplete() -> SessionSnapshot {
        SessionSnapshot { loading: false, has_credential: true, profile: Some(new_user()) }
    }

    fn complete() -> SessionSnapshot {
        SessionSnapshot { loading: false, has_credential: true, profile: Some(onboarded_user()) }
    }

    #[test]
    fn loading_always_shows_spinner() {
        for kind in [GuardKind::Protected, GuardKind::OnboardingOnly, GuardKind::AuthOnly] {
            assert_eq!(evaluate(kind, &loading()), GuardOutcome::Spinner);
        }
    }

    #[test]
    fn protected_routes() {
        let route = Route::AddFood { meal: Some(MealType::Lunch) };
        assert_eq!(resolve(&route, &anonymous()), GuardOutcome::Redirect(Route::Auth));
        assert_eq!(resolve(&Route::Dashboard, &incomplete()), GuardOutcome::Redirect(Route::Onboarding));
        assert_eq!(resolve(&Route::Progress, &complete()), GuardOutcome::Render);
        assert_eq!(resolve(&Route::Settings, &complete()), GuardOutcome::Render);
    }

    #[test]
    fn onboarding_route() {
        assert_eq!(resolve(&Route::Onboarding, &anonymous()), GuardOutcome::Redirect(Route::Auth));
        assert_eq!(resolve(&Route::Onboarding, &incomplete()), GuardOutcome::Render);
        assert_eq!(resolve(&Route::Onboarding, &complete()), GuardOutcome::Redirect(Route::Dashboard));
    }

    #[test]
    fn auth_route() {
        assert_eq!(resolve(&Route::Auth, &anonymous()), GuardOutcome::Render);
        assert_eq!(resolve(&Route::Auth, &incomplete()), GuardOutcome::Redirect(Route::Onboarding));
        assert_eq!(resolve(&Route::Auth, &complete()), GuardOutcome::Redirect(Route::Dashboard));
    }

    #[test]
    fn credential_without_profile_is_not_a_session() {
        let snapshot = SessionSnapshot { loading: false, has_credential: true, profile: None };
        assert_eq!(resolve(&Route::Dashboard, &snapshot), GuardOutcome::Redirect(Route::Auth));
        assert_eq!(resolve(&Route::Auth, &snapshot), GuardOutcome::Render);
    }

    #[test]
    fn unknown_paths_render_for_everyone() {
        let route = Route::NotFound("/nope".to_string());
        assert_eq!(guard_for(&route), None);
        for snapshot in [anonymous(), incomplete(), complete()] {
            assert_eq!(resolve(&route, &snapshot), GuardOutcome::Render);
        }
    }
}
