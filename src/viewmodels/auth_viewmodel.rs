// ============================================================================
// AUTH VIEWMODEL - Formulario de login / registro
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::errors::AppError;
use crate::models::UserProfile;
use crate::router::Route;
use crate::state::AppState;
use crate::utils::validation::{require_email, require_non_empty, require_password};
use crate::viewmodels::session_viewmodel::SessionViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Clone)]
pub struct AuthViewModel {
    state: AppState,
    session: SessionViewModel,
    mode: Rc<Cell<AuthMode>>,
    form: Rc<RefCell<AuthForm>>,
    submitting: Rc<Cell<bool>>,
    error: Rc<RefCell<Option<String>>>,
}

impl AuthViewModel {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            session: SessionViewModel::new(state.api.clone()),
            mode: Rc::new(Cell::new(AuthMode::Login)),
            form: Rc::new(RefCell::new(AuthForm::default())),
            submitting: Rc::new(Cell::new(false)),
            error: Rc::new(RefCell::new(None)),
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode.get()
    }

    pub fn form(&self) -> AuthForm {
        self.form.borrow().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    /// Cambia entre login y registro; conserva el email
    pub fn toggle_mode(&self) {
        let next = match self.mode.get() {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.mode.set(next);
        {
            let mut form = self.form.borrow_mut();
            form.password.clear();
            form.confirm_password.clear();
        }
        *self.error.borrow_mut() = None;
        self.state.notify_changes();
    }

    /// Input del usuario: no re-renderiza (el DOM ya tiene el valor)
    pub fn set_field(&self, field: AuthField, value: &str) {
        let mut form = self.form.borrow_mut();
        let target = match field {
            AuthField::Name => &mut form.name,
            AuthField::Email => &mut form.email,
            AuthField::Password => &mut form.password,
            AuthField::ConfirmPassword => &mut form.confirm_password,
        };
        *target = value.to_string();
    }

    /// Validación en cliente, antes de cualquier request
    pub fn validate(&self) -> Result<(), AppError> {
        let form = self.form.borrow();
        if self.mode.get() == AuthMode::Register {
            require_non_empty(&form.name, "Name")?;
        }
        require_email(&form.email)?;
        require_password(&form.password)?;
        if self.mode.get() == AuthMode::Register && form.password != form.confirm_password {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }
        Ok(())
    }

    pub async fn submit(&self) -> Result<UserProfile, AppError> {
        if self.submitting.get() {
            return Err(AppError::Validation("Already submitting".to_string()));
        }
        if let Err(e) = self.validate() {
            self.fail(&e);
            return Err(e);
        }

        let form = self.form();
        self.submitting.set(true);
        *self.error.borrow_mut() = None;
        self.state.notify_changes();

        let result = match self.mode.get() {
            AuthMode::Login => self.session.login(&form.email, &form.password).await,
            AuthMode::Register => {
                self.session
                    .register(&form.name, &form.email, &form.password)
                    .await
            }
        };
        self.submitting.set(false);

        match result {
            Ok(profile) => {
                {
                    let mut form = self.form.borrow_mut();
                    form.password.clear();
                    form.confirm_password.clear();
                }
                let destination = if profile.onboarding_completed {
                    Route::Dashboard
                } else {
                    Route::Onboarding
                };
                if self.mode.get() == AuthMode::Register {
                    self.state.notifications.success("Account created!");
                } else {
                    self.state
                        .notifications
                        .success(format!("Welcome back, {}!", profile.first_name()));
                }
                self.state.navigator.replace(destination);
                self.state.notify_changes();
                Ok(profile)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    fn fail(&self, error: &AppError) {
        log::warn!("⚠️ [AUTH] {}", error);
        *self.error.borrow_mut() = Some(error.user_message());
        self.state.notifications.app_error(error);
        self.state.notify_changes();
    }
}
