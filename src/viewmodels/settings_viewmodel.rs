// ============================================================================
// SETTINGS VIEWMODEL - Edición del perfil + logout
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::errors::AppError;
use crate::models::{ActivityLevel, Gender, ProfileUpdate, UnitSystem, UserProfile};
use crate::router::Route;
use crate::state::AppState;
use crate::utils::units::{cm_to_feet_inches, round1, weight_for_display};
use crate::utils::validation::{parse_in_range, require_non_empty};
use crate::viewmodels::onboarding_viewmodel::OnboardingForm;
use crate::viewmodels::session_viewmodel::SessionViewModel;

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    pub name: String,
    pub water_goal: String,
    /// Datos físicos: mismas reglas que el onboarding
    pub body: OnboardingForm,
}

impl SettingsForm {
    pub fn from_profile(profile: Option<&UserProfile>) -> Self {
        Self {
            name: profile.map(|p| p.name.clone()).unwrap_or_default(),
            water_goal: profile.map(|p| p.water_goal.to_string()).unwrap_or_default(),
            body: OnboardingForm::from_profile(profile),
        }
    }

    pub fn to_update(&self) -> Result<ProfileUpdate, AppError> {
        require_non_empty(&self.name, "Name")?;
        let water_goal = parse_in_range(&self.water_goal, "Water goal", 500.0, 6000.0)?;
        let body = self.body.to_update()?;
        Ok(ProfileUpdate {
            name: Some(self.name.trim().to_string()),
            water_goal: Some(water_goal.round() as u32),
            onboarding_completed: None,
            ..body
        })
    }

    /// Cambia de unidades convirtiendo lo que ya sea válido
    fn convert_units(&mut self, units: UnitSystem) {
        let body = &mut self.body;
        if body.units == units {
            return;
        }
        let height = body.parse_height_cm().ok();
        let current = body.parse_weight_kg(&body.current_weight, "Current weight").ok();
        let goal = body.parse_weight_kg(&body.goal_weight, "Goal weight").ok();

        body.units = units;
        if let Some(cm) = height {
            let (feet, inches) = cm_to_feet_inches(cm);
            body.height_cm = format!("{:.0}", cm);
            body.height_ft = feet.to_string();
            body.height_in = inches.to_string();
        }
        let display = |kg: f64| format!("{}", round1(weight_for_display(kg, units)));
        if let Some(kg) = current {
            body.current_weight = display(kg);
        }
        if let Some(kg) = goal {
            body.goal_weight = display(kg);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Name,
    WaterGoal,
    Age,
    HeightCm,
    HeightFt,
    HeightIn,
    CurrentWeight,
    GoalWeight,
}

#[derive(Clone)]
pub struct SettingsViewModel {
    state: AppState,
    session: SessionViewModel,
    form: Rc<RefCell<SettingsForm>>,
    saving: Rc<Cell<bool>>,
    error: Rc<RefCell<Option<String>>>,
}

impl SettingsViewModel {
    pub fn new(state: &AppState) -> Self {
        let form = SettingsForm::from_profile(state.session.profile().as_ref());
        Self {
            state: state.clone(),
            session: SessionViewModel::new(state.api.clone()),
            form: Rc::new(RefCell::new(form)),
            saving: Rc::new(Cell::new(false)),
            error: Rc::new(RefCell::new(None)),
        }
    }

    pub fn form(&self) -> SettingsForm {
        self.form.borrow().clone()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.get()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    /// Descarta cambios y vuelve a lo que tiene la sesión
    pub fn reset(&self) {
        *self.form.borrow_mut() = SettingsForm::from_profile(self.state.session.profile().as_ref());
        *self.error.borrow_mut() = None;
        self.state.notify_changes();
    }

    pub fn set_field(&self, field: SettingsField, value: &str) {
        let mut form = self.form.borrow_mut();
        let target = match field {
            SettingsField::Name => &mut form.name,
            SettingsField::WaterGoal => &mut form.water_goal,
            SettingsField::Age => &mut form.body.age,
            SettingsField::HeightCm => &mut form.body.height_cm,
            SettingsField::HeightFt => &mut form.body.height_ft,
            SettingsField::HeightIn => &mut form.body.height_in,
            SettingsField::CurrentWeight => &mut form.body.current_weight,
            SettingsField::GoalWeight => &mut form.body.goal_weight,
        };
        *target = value.to_string();
    }

    pub fn set_gender(&self, gender: Gender) {
        self.form.borrow_mut().body.gender = Some(gender);
        self.state.notify_changes();
    }

    pub fn set_activity_level(&self, level: ActivityLevel) {
        self.form.borrow_mut().body.activity_level = level;
        self.state.notify_changes();
    }

    pub fn set_weight_loss_rate(&self, rate: f64) {
        self.form.borrow_mut().body.weight_loss_rate = rate;
        self.state.notify_changes();
    }

    pub fn set_units(&self, units: UnitSystem) {
        self.form.borrow_mut().convert_units(units);
        self.state.notify_changes();
    }

    pub async fn save(&self) -> Result<UserProfile, AppError> {
        let update = match self.form.borrow().to_update() {
            Ok(update) => update,
            Err(e) => {
                *self.error.borrow_mut() = Some(e.user_message());
                self.state.notifications.app_error(&e);
                self.state.notify_changes();
                return Err(e);
            }
        };

        self.saving.set(true);
        *self.error.borrow_mut() = None;
        self.state.notify_changes();
        let result = self.state.api.update_profile(&update).await;
        self.saving.set(false);

        match result {
            Ok(profile) => {
                // El servidor recalcula objetivos: se guarda su copia
                self.session.store_profile(profile.clone());
                *self.form.borrow_mut() = SettingsForm::from_profile(Some(&profile));
                log::info!("💾 [SETTINGS] Perfil guardado ({} kcal)", profile.calorie_target);
                self.state.notifications.success("Settings saved");
                self.state.notify_changes();
                Ok(profile)
            }
            Err(e) => {
                log::error!("❌ [SETTINGS] Error guardando perfil: {}", e);
                *self.error.borrow_mut() = Some(e.user_message());
                self.state.notifications.app_error(&e);
                self.state.notify_changes();
                Err(e)
            }
        }
    }

    pub fn logout(&self) {
        self.session.logout();
        self.state.navigator.navigate(Route::Auth);
        self.state.notify_changes();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::fixtures::onboarded_user;
    use crate::router::Navigator;
    use crate::services::HttpMethod;
    use crate::state::app_state::testing::TestApp;
    use crate::state::SessionStatus;
    use crate::config::{TOKEN_STORAGE_KEY, USER_STORAGE_KEY};
    use crate::utils::storage::KeyValueStore;
    use futures::executor::block_on;
    use serde_json::{json, Value};

    #[test]
    fn form_is_seeded_from_the_session_profile() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = SettingsViewModel::new(&app.state);
        let form = vm.form();
        assert_eq!(form.name, "Ana Lopez");
        assert_eq!(form.water_goal, "2000");
        assert_eq!(form.body.units, UnitSystem::Imperial);
        assert_eq!(form.body.height_ft, "5");
        assert_eq!(form.body.height_in, "5");
        assert_eq!(form.body.current_weight, "154.3");
    }

    #[test]
    fn switching_units_converts_the_values() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = SettingsViewModel::new(&app.state);
        vm.set_units(UnitSystem::Metric);
        let body = vm.form().body;
        assert_eq!(body.units, UnitSystem::Metric);
        assert_eq!(body.height_cm, "165");
        assert_eq!(body.current_weight, "70");
        assert_eq!(body.goal_weight, "62");
    }

    #[test]
    fn save_sends_the_profile_and_keeps_the_server_copy() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = SettingsViewModel::new(&app.state);
        let mut server = onboarded_user();
        server.name = "Ana María".to_string();
        server.calorie_target = 1650;
        app.transport.push(200, serde_json::to_value(&server).unwrap());

        vm.set_field(SettingsField::Name, "Ana María");
        let saved = block_on(vm.save()).unwrap();

        let request = app.transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Ana María");
        assert_eq!(body["water_goal"], 2000);
        assert!(body.get("onboarding_completed").is_none());
        assert_eq!(saved.calorie_target, 1650);
        assert_eq!(app.state.session.profile().unwrap().calorie_target, 1650);
        assert_eq!(app.state.notifications.list()[0].message, "Settings saved");
    }

    #[test]
    fn invalid_form_is_not_sent() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = SettingsViewModel::new(&app.state);
        vm.set_field(SettingsField::Name, "  ");
        assert!(block_on(vm.save()).is_err());
        assert_eq!(vm.error().as_deref(), Some("Name is required"));
        assert!(app.transport.requests().is_empty());
    }

    #[test]
    fn failed_save_keeps_local_profile() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = SettingsViewModel::new(&app.state);
        app.transport.push(422, json!({ "detail": "Invalid profile" }));
        vm.set_field(SettingsField::Name, "Other");
        assert!(block_on(vm.save()).is_err());
        assert_eq!(app.state.session.profile().unwrap().name, "Ana Lopez");
        assert_eq!(vm.form().name, "Other");
    }

    #[test]
    fn logout_clears_everything_and_goes_to_auth() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = SettingsViewModel::new(&app.state);
        vm.logout();
        assert_eq!(app.state.session.status(), SessionStatus::Unauthenticated);
        assert_eq!(app.storage.get_item(TOKEN_STORAGE_KEY).unwrap(), None);
        assert_eq!(app.storage.get_item(USER_STORAGE_KEY).unwrap(), None);
        assert_eq!(app.navigator.current(), Route::Auth);
        assert!(app.transport.requests().is_empty());
    }
}
