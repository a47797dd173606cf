// ============================================================================
// ONBOARDING VIEWMODEL - Asistente de perfil en 5 pasos
// ============================================================================
// basics (edad + género) → body (altura + peso) → goal (peso objetivo +
// ritmo) → activity → review. Cada paso valida sus propios campos; la
// conversión a métrico se hace solo al enviar.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::errors::AppError;
use crate::models::{ActivityLevel, Gender, ProfileUpdate, UnitSystem, UserProfile};
use crate::router::Route;
use crate::state::AppState;
use crate::utils::units::{
    cm_to_feet_inches, feet_inches_to_cm, round1, weight_for_display, weight_input_range,
    weight_input_to_kg,
};
use crate::utils::validation::parse_in_range;
use crate::viewmodels::session_viewmodel::SessionViewModel;

/// Ritmos de pérdida ofrecidos (lb/semana; el backend resta 500 kcal por lb)
pub const WEIGHT_LOSS_RATES: [f64; 4] = [0.5, 1.0, 1.5, 2.0];
const MIN_WEIGHT_LOSS_RATE: f64 = WEIGHT_LOSS_RATES[0];
const MAX_WEIGHT_LOSS_RATE: f64 = WEIGHT_LOSS_RATES[WEIGHT_LOSS_RATES.len() - 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    Basics,
    Body,
    Goal,
    Activity,
    Review,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 5] = [
        OnboardingStep::Basics,
        OnboardingStep::Body,
        OnboardingStep::Goal,
        OnboardingStep::Activity,
        OnboardingStep::Review,
    ];

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|step| step == self).unwrap_or(0)
    }

    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::Basics => "About you",
            OnboardingStep::Body => "Your body",
            OnboardingStep::Goal => "Your goal",
            OnboardingStep::Activity => "Activity level",
            OnboardingStep::Review => "Review",
        }
    }

    fn next(&self) -> Self {
        Self::ALL.get(self.index() + 1).copied().unwrap_or(*self)
    }

    fn previous(&self) -> Self {
        match self.index() {
            0 => *self,
            i => Self::ALL[i - 1],
        }
    }
}

/// Valores crudos de los inputs, en las unidades elegidas
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingForm {
    pub units: UnitSystem,
    pub age: String,
    pub gender: Option<Gender>,
    pub height_cm: String,
    pub height_ft: String,
    pub height_in: String,
    pub current_weight: String,
    pub goal_weight: String,
    pub weight_loss_rate: f64,
    pub activity_level: ActivityLevel,
}

impl OnboardingForm {
    /// Formulario precargado con lo que ya tenga el perfil
    pub fn from_profile(profile: Option<&UserProfile>) -> Self {
        let units = profile.map(|p| p.units).unwrap_or_default();
        let weight_text = |kg: Option<f64>| {
            kg.map(|kg| format!("{}", round1(weight_for_display(kg, units))))
                .unwrap_or_default()
        };
        let height = profile.and_then(|p| p.height_cm);
        let (feet, inches) = height.map(cm_to_feet_inches).unwrap_or((0, 0));

        Self {
            units,
            age: profile.and_then(|p| p.age).map(|a| a.to_string()).unwrap_or_default(),
            gender: profile.and_then(|p| p.gender),
            height_cm: height.map(|cm| format!("{:.0}", cm)).unwrap_or_default(),
            height_ft: height.map(|_| feet.to_string()).unwrap_or_default(),
            height_in: height.map(|_| inches.to_string()).unwrap_or_default(),
            current_weight: weight_text(profile.and_then(|p| p.current_weight)),
            goal_weight: weight_text(profile.and_then(|p| p.goal_weight)),
            weight_loss_rate: profile.and_then(|p| p.weight_loss_rate).unwrap_or(1.0),
            activity_level: profile.and_then(|p| p.activity_level).unwrap_or_default(),
        }
    }

    fn parse_age(&self) -> Result<u32, AppError> {
        let age = parse_in_range(&self.age, "Age", 13.0, 120.0)?;
        Ok(age.round() as u32)
    }

    pub(crate) fn parse_height_cm(&self) -> Result<f64, AppError> {
        match self.units {
            UnitSystem::Metric => parse_in_range(&self.height_cm, "Height", 100.0, 250.0),
            UnitSystem::Imperial => {
                let feet = parse_in_range(&self.height_ft, "Feet", 3.0, 8.0)?;
                let inches = if self.height_in.trim().is_empty() {
                    0.0
                } else {
                    self.height_in
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|i| (0.0..12.0).contains(i))
                        .ok_or_else(|| {
                            AppError::Validation("Inches must be between 0 and 11".to_string())
                        })?
                };
                Ok(feet_inches_to_cm(feet, inches))
            }
        }
    }

    pub(crate) fn parse_weight_kg(&self, raw: &str, field: &str) -> Result<f64, AppError> {
        let (min, max) = weight_input_range(self.units);
        let value = parse_in_range(raw, field, min, max)?;
        Ok(weight_input_to_kg(value, self.units))
    }

    fn validate_step(&self, step: OnboardingStep) -> Result<(), AppError> {
        match step {
            OnboardingStep::Basics => {
                self.parse_age()?;
                if self.gender.is_none() {
                    return Err(AppError::Validation("Please select your gender".to_string()));
                }
            }
            OnboardingStep::Body => {
                self.parse_height_cm()?;
                self.parse_weight_kg(&self.current_weight, "Current weight")?;
            }
            OnboardingStep::Goal => {
                self.parse_weight_kg(&self.goal_weight, "Goal weight")?;
                let (min, max) = (MIN_WEIGHT_LOSS_RATE, MAX_WEIGHT_LOSS_RATE);
                if !(min..=max).contains(&self.weight_loss_rate) {
                    return Err(AppError::Validation(format!(
                        "Choose a weekly rate between {} and {}",
                        min, max
                    )));
                }
            }
            OnboardingStep::Activity | OnboardingStep::Review => {}
        }
        Ok(())
    }

    /// Body de `PUT /profile` en métrico, con `onboarding_completed = true`
    pub fn to_update(&self) -> Result<ProfileUpdate, AppError> {
        for step in OnboardingStep::ALL {
            self.validate_step(step)?;
        }
        Ok(ProfileUpdate {
            age: Some(self.parse_age()?),
            gender: self.gender,
            height_cm: Some(round1(self.parse_height_cm()?)),
            current_weight: Some(round1(self.parse_weight_kg(&self.current_weight, "Current weight")?)),
            goal_weight: Some(round1(self.parse_weight_kg(&self.goal_weight, "Goal weight")?)),
            activity_level: Some(self.activity_level),
            weight_loss_rate: Some(self.weight_loss_rate),
            units: Some(self.units),
            onboarding_completed: Some(true),
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingField {
    Age,
    HeightCm,
    HeightFt,
    HeightIn,
    CurrentWeight,
    GoalWeight,
}

#[derive(Clone)]
pub struct OnboardingViewModel {
    state: AppState,
    session: SessionViewModel,
    step: Rc<Cell<OnboardingStep>>,
    form: Rc<RefCell<OnboardingForm>>,
    error: Rc<RefCell<Option<String>>>,
    submitting: Rc<Cell<bool>>,
}

impl OnboardingViewModel {
    pub fn new(state: &AppState) -> Self {
        let form = OnboardingForm::from_profile(state.session.profile().as_ref());
        Self {
            state: state.clone(),
            session: SessionViewModel::new(state.api.clone()),
            step: Rc::new(Cell::new(OnboardingStep::Basics)),
            form: Rc::new(RefCell::new(form)),
            error: Rc::new(RefCell::new(None)),
            submitting: Rc::new(Cell::new(false)),
        }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step.get()
    }

    pub fn form(&self) -> OnboardingForm {
        self.form.borrow().clone()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    pub fn set_field(&self, field: OnboardingField, value: &str) {
        let mut form = self.form.borrow_mut();
        let target = match field {
            OnboardingField::Age => &mut form.age,
            OnboardingField::HeightCm => &mut form.height_cm,
            OnboardingField::HeightFt => &mut form.height_ft,
            OnboardingField::HeightIn => &mut form.height_in,
            OnboardingField::CurrentWeight => &mut form.current_weight,
            OnboardingField::GoalWeight => &mut form.goal_weight,
        };
        *target = value.to_string();
    }

    pub fn set_gender(&self, gender: Gender) {
        self.form.borrow_mut().gender = Some(gender);
        self.state.notify_changes();
    }

    /// Cambiar de unidades vacía los campos dependientes de la unidad
    pub fn set_units(&self, units: UnitSystem) {
        {
            let mut form = self.form.borrow_mut();
            if form.units == units {
                return;
            }
            form.units = units;
            form.height_cm.clear();
            form.height_ft.clear();
            form.height_in.clear();
            form.current_weight.clear();
            form.goal_weight.clear();
        }
        self.state.notify_changes();
    }

    pub fn set_weight_loss_rate(&self, rate: f64) {
        self.form.borrow_mut().weight_loss_rate = rate;
        self.state.notify_changes();
    }

    pub fn set_activity_level(&self, level: ActivityLevel) {
        self.form.borrow_mut().activity_level = level;
        self.state.notify_changes();
    }

    /// Avanza si el paso actual es válido
    pub fn next(&self) -> Result<OnboardingStep, AppError> {
        let current = self.step.get();
        let validation = self.form.borrow().validate_step(current);
        match validation {
            Ok(()) => {
                self.step.set(current.next());
                *self.error.borrow_mut() = None;
                self.state.notify_changes();
                Ok(self.step.get())
            }
            Err(e) => {
                *self.error.borrow_mut() = Some(e.user_message());
                self.state.notify_changes();
                Err(e)
            }
        }
    }

    pub fn back(&self) {
        self.step.set(self.step.get().previous());
        *self.error.borrow_mut() = None;
        self.state.notify_changes();
    }

    pub async fn submit(&self) -> Result<UserProfile, AppError> {
        let update = match self.form.borrow().to_update() {
            Ok(update) => update,
            Err(e) => {
                *self.error.borrow_mut() = Some(e.user_message());
                self.state.notify_changes();
                return Err(e);
            }
        };

        self.submitting.set(true);
        self.state.notify_changes();
        log::info!("🎯 [ONBOARDING] Enviando perfil completo");
        let result = self.state.api.update_profile(&update).await;
        self.submitting.set(false);

        match result {
            Ok(profile) => {
                self.session.store_profile(profile.clone());
                log::info!(
                    "✅ [ONBOARDING] Completado (objetivo {} kcal)",
                    profile.calorie_target
                );
                self.state.notifications.success("Your plan is ready!");
                self.state.navigator.navigate(Route::Dashboard);
                self.state.notify_changes();
                Ok(profile)
            }
            Err(e) => {
                *self.error.borrow_mut() = Some(e.user_message());
                self.state.notifications.app_error(&e);
                self.state.notify_changes();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::fixtures::{new_user, onboarded_user};
    use crate::router::{resolve, GuardOutcome, Navigator};
    use crate::services::HttpMethod;
    use crate::state::app_state::testing::TestApp;
    use futures::executor::block_on;
    use serde_json::json;

    fn fill_imperial(vm: &OnboardingViewModel) {
        vm.set_field(OnboardingField::Age, "34");
        vm.set_gender(Gender::Female);
        vm.next().unwrap();
        vm.set_field(OnboardingField::HeightFt, "5");
        vm.set_field(OnboardingField::HeightIn, "5");
        vm.set_field(OnboardingField::CurrentWeight, "154");
        vm.next().unwrap();
        vm.set_field(OnboardingField::GoalWeight, "137");
        vm.set_weight_loss_rate(1.0);
        vm.next().unwrap();
        vm.set_activity_level(ActivityLevel::Light);
        vm.next().unwrap();
    }

    #[test]
    fn each_step_validates_its_own_fields() {
        let app = TestApp::signed_in(new_user());
        let vm = OnboardingViewModel::new(&app.state);

        vm.set_field(OnboardingField::Age, "34");
        assert!(vm.next().is_err());
        assert_eq!(vm.error().as_deref(), Some("Please select your gender"));
        assert_eq!(vm.step(), OnboardingStep::Basics);

        vm.set_gender(Gender::Male);
        assert_eq!(vm.next().unwrap(), OnboardingStep::Body);
        assert_eq!(vm.error(), None);

        vm.set_field(OnboardingField::HeightFt, "5");
        vm.set_field(OnboardingField::HeightIn, "14");
        vm.set_field(OnboardingField::CurrentWeight, "180");
        assert!(vm.next().is_err());

        vm.back();
        assert_eq!(vm.step(), OnboardingStep::Basics);
    }

    #[test]
    fn weekly_rate_must_be_one_of_the_offered_range() {
        let app = TestApp::signed_in(new_user());
        let vm = OnboardingViewModel::new(&app.state);
        vm.set_field(OnboardingField::Age, "34");
        vm.set_gender(Gender::Female);
        vm.next().unwrap();
        vm.set_field(OnboardingField::HeightFt, "5");
        vm.set_field(OnboardingField::HeightIn, "5");
        vm.set_field(OnboardingField::CurrentWeight, "154");
        vm.next().unwrap();
        vm.set_field(OnboardingField::GoalWeight, "137");

        vm.set_weight_loss_rate(0.25);
        assert!(vm.next().is_err());
        assert_eq!(vm.error().as_deref(), Some("Choose a weekly rate between 0.5 and 2"));

        vm.set_weight_loss_rate(0.5);
        assert_eq!(vm.next().unwrap(), OnboardingStep::Activity);
    }

    #[test]
    fn imperial_input_is_sent_in_metric() {
        let app = TestApp::signed_in(new_user());
        let vm = OnboardingViewModel::new(&app.state);
        fill_imperial(&vm);
        assert_eq!(vm.step(), OnboardingStep::Review);

        let update = vm.form().to_update().unwrap();
        assert_eq!(update.height_cm, Some(165.1));
        assert_eq!(update.current_weight, Some(69.9));
        assert_eq!(update.goal_weight, Some(62.1));
        assert_eq!(update.units, Some(UnitSystem::Imperial));
        assert_eq!(update.onboarding_completed, Some(true));
    }

    #[test]
    fn submit_completes_onboarding_and_goes_home() {
        let app = TestApp::signed_in(new_user());
        app.navigator.navigate(Route::Onboarding);
        let vm = OnboardingViewModel::new(&app.state);
        fill_imperial(&vm);
        app.transport
            .route(HttpMethod::Put, "/profile", 200, json!(onboarded_user()));

        let profile = block_on(vm.submit()).unwrap();

        assert!(profile.onboarding_completed);
        assert_eq!(app.state.session.profile(), Some(onboarded_user()));
        assert_eq!(app.navigator.current(), Route::Dashboard);
        assert_eq!(
            resolve(&Route::Onboarding, &app.state.session.snapshot()),
            GuardOutcome::Redirect(Route::Dashboard)
        );
        let body = app.transport.last_request().unwrap().body.unwrap();
        let sent: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(sent["onboarding_completed"], true);
        assert_eq!(sent["gender"], "female");
        assert_eq!(sent["activity_level"], "light");
    }

    #[test]
    fn failed_submit_keeps_the_wizard_open() {
        let app = TestApp::signed_in(new_user());
        app.navigator.navigate(Route::Onboarding);
        let vm = OnboardingViewModel::new(&app.state);
        fill_imperial(&vm);
        app.transport.push(500, json!({ "detail": "Database error" }));

        assert!(block_on(vm.submit()).is_err());
        assert_eq!(vm.step(), OnboardingStep::Review);
        assert_eq!(app.navigator.current(), Route::Onboarding);
        assert!(!app.state.session.profile().unwrap().onboarding_completed);
    }

    #[test]
    fn switching_units_clears_unit_fields() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = OnboardingViewModel::new(&app.state);
        assert_eq!(vm.form().current_weight, "154.3");
        assert_eq!(vm.form().height_ft, "5");

        vm.set_units(UnitSystem::Metric);
        let form = vm.form();
        assert!(form.current_weight.is_empty());
        assert!(form.height_ft.is_empty());
        assert_eq!(form.age, "34");
    }
}
