// ============================================================================
// FOOD SEARCH VIEWMODEL - Búsqueda con debounce + registro de comidas
// ============================================================================
// Cada tecla reprograma la búsqueda (300 ms): solo dispara la última. Una
// respuesta cuya query ya no es la actual se descarta.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::errors::AppError;
use crate::models::{CustomFoodCreate, Food, FoodLogCreate, MealType, RecentFood};
use crate::router::Route;
use crate::state::AppState;
use crate::utils::debounce::Debouncer;
use crate::utils::validation::{parse_positive, require_non_empty};

/// Campos crudos del formulario de quick-add
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFoodForm {
    pub name: String,
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    pub serving: String,
}

impl Default for CustomFoodForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            calories: String::new(),
            protein: String::new(),
            carbs: String::new(),
            fat: String::new(),
            serving: "1 serving".to_string(),
        }
    }
}

impl CustomFoodForm {
    fn grams(value: &str, field: &str) -> Result<f64, AppError> {
        if value.trim().is_empty() {
            return Ok(0.0);
        }
        match value.trim().parse::<f64>() {
            Ok(grams) if grams.is_finite() && grams >= 0.0 => Ok(grams),
            _ => Err(AppError::Validation(format!("{} must be 0 or more", field))),
        }
    }

    pub fn to_create(&self) -> Result<CustomFoodCreate, AppError> {
        require_non_empty(&self.name, "Food name")?;
        let defaults = CustomFoodCreate::default();
        Ok(CustomFoodCreate {
            name: self.name.trim().to_string(),
            calories: parse_positive(&self.calories, "Calories")?,
            protein: Self::grams(&self.protein, "Protein")?,
            carbs: Self::grams(&self.carbs, "Carbs")?,
            fat: Self::grams(&self.fat, "Fat")?,
            serving: if self.serving.trim().is_empty() {
                defaults.serving
            } else {
                self.serving.trim().to_string()
            },
            ..defaults
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomFoodField {
    Name,
    Calories,
    Protein,
    Carbs,
    Fat,
    Serving,
}

/// Estado compartido con la tarea diferida (sin el debouncer: evita ciclos)
struct SearchInner {
    state: AppState,
    query: RefCell<String>,
    results: RefCell<Vec<Food>>,
    searching: Cell<bool>,
    recent: RefCell<Vec<RecentFood>>,
    selected: RefCell<Option<Food>>,
    quantity: Cell<f64>,
    quantity_input: RefCell<String>,
    quantity_error: RefCell<Option<String>>,
    meal: Cell<MealType>,
    custom: RefCell<CustomFoodForm>,
    saving: Cell<bool>,
}

#[derive(Clone)]
pub struct FoodSearchViewModel {
    inner: Rc<SearchInner>,
    debouncer: Rc<Debouncer>,
}

impl FoodSearchViewModel {
    pub fn new(state: &AppState) -> Self {
        let debouncer = Debouncer::new(state.scheduler.clone(), state.config.search_debounce_ms);
        Self {
            inner: Rc::new(SearchInner {
                state: state.clone(),
                query: RefCell::new(String::new()),
                results: RefCell::new(Vec::new()),
                searching: Cell::new(false),
                recent: RefCell::new(Vec::new()),
                selected: RefCell::new(None),
                quantity: Cell::new(1.0),
                quantity_input: RefCell::new("1".to_string()),
                quantity_error: RefCell::new(None),
                meal: Cell::new(MealType::default()),
                custom: RefCell::new(CustomFoodForm::default()),
                saving: Cell::new(false),
            }),
            debouncer: Rc::new(debouncer),
        }
    }

    // ------------------------------------------------------------------------
    // Lectura
    // ------------------------------------------------------------------------

    pub fn query(&self) -> String {
        self.inner.query.borrow().clone()
    }

    pub fn results(&self) -> Vec<Food> {
        self.inner.results.borrow().clone()
    }

    pub fn recent(&self) -> Vec<RecentFood> {
        self.inner.recent.borrow().clone()
    }

    pub fn is_searching(&self) -> bool {
        self.inner.searching.get() || self.debouncer.is_pending()
    }

    pub fn selected(&self) -> Option<Food> {
        self.inner.selected.borrow().clone()
    }

    pub fn quantity(&self) -> f64 {
        self.inner.quantity.get()
    }

    /// Texto tal cual lo escribió el usuario
    pub fn quantity_input(&self) -> String {
        self.inner.quantity_input.borrow().clone()
    }

    pub fn quantity_error(&self) -> Option<String> {
        self.inner.quantity_error.borrow().clone()
    }

    pub fn meal(&self) -> MealType {
        self.inner.meal.get()
    }

    pub fn custom_form(&self) -> CustomFoodForm {
        self.inner.custom.borrow().clone()
    }

    pub fn is_saving(&self) -> bool {
        self.inner.saving.get()
    }

    // ------------------------------------------------------------------------
    // Búsqueda
    // ------------------------------------------------------------------------

    /// `?meal=` de la URL: se aplica una vez y se limpia con `replace`
    pub fn consume_route_meal(&self, meal: Option<MealType>) {
        if let Some(meal) = meal {
            self.inner.meal.set(meal);
            self.inner
                .state
                .navigator
                .replace(Route::AddFood { meal: None });
        }
    }

    /// Input del buscador. Query vacía limpia resultados sin request.
    pub fn set_query(&self, query: &str) {
        *self.inner.query.borrow_mut() = query.to_string();
        let trimmed = query.trim().to_string();

        if trimmed.is_empty() {
            self.debouncer.cancel();
            self.inner.results.borrow_mut().clear();
            self.inner.searching.set(false);
            self.inner.state.notify_changes();
            return;
        }

        let inner = self.inner.clone();
        self.debouncer.call(move || {
            let task = inner.clone();
            inner.state.spawn(async move {
                let _ = task.search(&trimmed).await;
            });
        });
        self.inner.state.notify_changes();
    }

    /// Búsqueda inmediata (sin debounce)
    pub async fn search_now(&self, query: &str) -> Result<(), AppError> {
        self.debouncer.cancel();
        *self.inner.query.borrow_mut() = query.to_string();
        self.inner.search(query.trim()).await
    }

    pub async fn load_recent(&self) -> Result<(), AppError> {
        match self.inner.state.api.recent_foods().await {
            Ok(recent) => {
                *self.inner.recent.borrow_mut() = recent;
                self.inner.state.notify_changes();
                Ok(())
            }
            Err(e) => {
                log::warn!("⚠️ [FOOD] Error cargando recientes: {}", e);
                self.inner.state.notifications.app_error(&e);
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Selección + registro
    // ------------------------------------------------------------------------

    pub fn select(&self, food: Food) {
        *self.inner.selected.borrow_mut() = Some(food);
        self.inner.quantity.set(1.0);
        *self.inner.quantity_input.borrow_mut() = "1".to_string();
        *self.inner.quantity_error.borrow_mut() = None;
        self.inner.state.notify_changes();
    }

    pub fn clear_selection(&self) {
        *self.inner.selected.borrow_mut() = None;
        self.inner.state.notify_changes();
    }

    /// Input del usuario. Un valor inválido queda en el campo con su error;
    /// solo se re-renderiza cuando el error aparece o desaparece.
    pub fn set_quantity(&self, raw: &str) -> Result<f64, AppError> {
        *self.inner.quantity_input.borrow_mut() = raw.to_string();
        let parsed = parse_positive(raw, "Quantity");
        let error = parsed.as_ref().err().map(AppError::user_message);
        if let Ok(quantity) = parsed {
            self.inner.quantity.set(quantity);
        }

        let changed = *self.inner.quantity_error.borrow() != error;
        *self.inner.quantity_error.borrow_mut() = error;
        if changed {
            self.inner.state.notify_changes();
        }
        parsed
    }

    pub fn set_meal(&self, meal: MealType) {
        self.inner.meal.set(meal);
        self.inner.state.notify_changes();
    }

    /// Registra el alimento seleccionado con la cantidad y comida actuales
    pub async fn log_selected(&self) -> Result<(), AppError> {
        let food = self.selected().ok_or_else(|| {
            AppError::Validation("Select a food first".to_string())
        })?;
        let raw = self.quantity_input();
        let quantity = match parse_positive(&raw, "Quantity") {
            Ok(quantity) => quantity,
            Err(e) => {
                *self.inner.quantity_error.borrow_mut() = Some(e.user_message());
                self.inner.state.notifications.app_error(&e);
                self.inner.state.notify_changes();
                return Err(e);
            }
        };
        let entry = food.to_log(quantity, self.meal());
        self.log_entry(entry).await?;
        *self.inner.selected.borrow_mut() = None;
        Ok(())
    }

    /// Registra otra vez un alimento reciente
    pub async fn log_recent(&self, recent: &RecentFood) -> Result<(), AppError> {
        self.log_entry(recent.to_log(self.meal())).await
    }

    pub fn set_custom_field(&self, field: CustomFoodField, value: &str) {
        let mut form = self.inner.custom.borrow_mut();
        let target = match field {
            CustomFoodField::Name => &mut form.name,
            CustomFoodField::Calories => &mut form.calories,
            CustomFoodField::Protein => &mut form.protein,
            CustomFoodField::Carbs => &mut form.carbs,
            CustomFoodField::Fat => &mut form.fat,
            CustomFoodField::Serving => &mut form.serving,
        };
        *target = value.to_string();
    }

    /// Quick add: crea el alimento propio y lo registra (1 ración)
    pub async fn add_custom_food(&self) -> Result<(), AppError> {
        let create = match self.inner.custom.borrow().to_create() {
            Ok(create) => create,
            Err(e) => {
                self.inner.state.notifications.app_error(&e);
                return Err(e);
            }
        };

        self.inner.saving.set(true);
        self.inner.state.notify_changes();
        let created = self.inner.state.api.create_custom_food(&create).await;
        self.inner.saving.set(false);

        let food = match created {
            Ok(food) => food,
            Err(e) => {
                log::error!("❌ [FOOD] Error creando alimento: {}", e);
                self.inner.state.notifications.app_error(&e);
                self.inner.state.notify_changes();
                return Err(e);
            }
        };
        log::info!("🆕 [FOOD] Alimento propio creado: {}", food.name);
        self.log_entry(food.to_log(1.0, self.meal())).await?;
        *self.inner.custom.borrow_mut() = CustomFoodForm::default();
        Ok(())
    }

    async fn log_entry(&self, entry: FoodLogCreate) -> Result<(), AppError> {
        let state = &self.inner.state;
        self.inner.saving.set(true);
        state.notify_changes();
        let result = state.api.create_food_log(&entry).await;
        self.inner.saving.set(false);

        match result {
            Ok(log) => {
                log::info!("🍽️ [FOOD] {} → {}", log.food_name, log.meal_type.as_str());
                state.notifications.success(format!(
                    "Added {} to {}",
                    log.food_name,
                    log.meal_type.label()
                ));
                // El dashboard vuelve a pedir sus datos al montarse
                state.navigator.navigate(Route::Dashboard);
                state.notify_changes();
                Ok(())
            }
            Err(e) => {
                log::error!("❌ [FOOD] Error registrando comida: {}", e);
                state.notifications.app_error(&e);
                state.notify_changes();
                Err(e)
            }
        }
    }
}

impl SearchInner {
    async fn search(&self, query: &str) -> Result<(), AppError> {
        if query.is_empty() {
            return Ok(());
        }
        self.searching.set(true);
        self.state.notify_changes();
        log::debug!("🔍 [FOOD] Buscando '{}'", query);

        let result = self
            .state
            .api
            .search_foods(query, self.state.config.search_limit)
            .await;

        if self.query.borrow().trim() != query {
            log::debug!("🔍 [FOOD] Resultado obsoleto para '{}', descartado", query);
            return Ok(());
        }
        self.searching.set(false);

        match result {
            Ok(foods) => {
                *self.results.borrow_mut() = foods;
                self.state.notify_changes();
                Ok(())
            }
            Err(e) => {
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
    use crate::models::user::fixtures::onboarded_user;
    use crate::router::Navigator;
    use crate::services::http::testing::api_path;
    use crate::services::HttpMethod;
    use crate::state::app_state::testing::TestApp;
    use futures::executor::block_on;
    use serde_json::{json, Value};

    fn rice() -> Value {
        json!({
            "id": "f-rice", "name": "Brown Rice", "calories": 216.0, "protein": 5.0,
            "carbs": 45.0, "fat": 1.8, "fiber": 3.5, "serving": "1 cup cooked", "category": "grains"
        })
    }

    fn logged(name: &str, meal: &str) -> Value {
        json!({ "id": "l-1", "food_name": name, "calories": 216.0, "meal_type": meal })
    }

    fn search_requests(app: &TestApp) -> Vec<String> {
        app.transport
            .requests()
            .into_iter()
            .filter(|r| api_path(&r.url) == "/foods")
            .map(|r| r.url)
            .collect()
    }

    #[test]
    fn typing_quickly_sends_a_single_search() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = FoodSearchViewModel::new(&app.state);
        app.transport.route(HttpMethod::Get, "/foods", 200, json!([rice()]));

        vm.set_query("ri");
        app.scheduler.advance(100);
        vm.set_query("ric");
        app.scheduler.advance(150);
        vm.set_query("rice");
        app.run_tasks();
        assert!(search_requests(&app).is_empty());
        assert!(vm.is_searching());

        app.scheduler.advance(300);
        app.run_tasks();

        let urls = search_requests(&app);
        assert_eq!(urls.len(), 1);
        assert!(urls[0].ends_with("/api/foods?q=rice&limit=20"));
        assert_eq!(vm.results()[0].name, "Brown Rice");
        assert!(!vm.is_searching());
    }

    #[test]
    fn clearing_the_query_cancels_and_empties_results() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = FoodSearchViewModel::new(&app.state);
        app.transport.route(HttpMethod::Get, "/foods", 200, json!([rice()]));

        block_on(vm.search_now("rice")).unwrap();
        assert_eq!(vm.results().len(), 1);

        vm.set_query("egg");
        vm.set_query("   ");
        app.scheduler.advance(1_000);
        app.run_tasks();

        assert!(vm.results().is_empty());
        assert_eq!(search_requests(&app).len(), 1);
    }

    #[test]
    fn out_of_date_response_is_dropped() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = FoodSearchViewModel::new(&app.state);
        app.transport.route(HttpMethod::Get, "/foods", 200, json!([rice()]));

        *vm.inner.query.borrow_mut() = "eggs".to_string();
        block_on(vm.inner.search("rice")).unwrap();
        assert!(vm.results().is_empty());
    }

    #[test]
    fn route_meal_is_applied_and_stripped_from_the_url() {
        let app = TestApp::signed_in(onboarded_user());
        app.navigator.navigate(Route::AddFood { meal: Some(MealType::Lunch) });
        let vm = FoodSearchViewModel::new(&app.state);

        vm.consume_route_meal(Some(MealType::Lunch));

        assert_eq!(vm.meal(), MealType::Lunch);
        assert_eq!(app.navigator.current(), Route::AddFood { meal: None });
        assert_eq!(app.navigator.current().path(), "/add-food");
        assert_eq!(app.navigator.history().len(), 2);
    }

    #[test]
    fn logging_a_selection_posts_and_returns_home() {
        let app = TestApp::signed_in(onboarded_user());
        app.navigator.navigate(Route::AddFood { meal: None });
        let vm = FoodSearchViewModel::new(&app.state);
        app.transport.push(200, logged("Brown Rice", "dinner"));

        vm.select(serde_json::from_value(rice()).unwrap());
        vm.set_quantity("1.5").unwrap();
        vm.set_meal(MealType::Dinner);
        block_on(vm.log_selected()).unwrap();

        let request = app.transport.last_request().unwrap();
        let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["quantity"], 1.5);
        assert_eq!(body["meal_type"], "dinner");
        // El backend toma el día de `logged_at`: debe ser el día local del dashboard
        let logged_at = body["logged_at"].as_str().unwrap();
        assert_eq!(&logged_at[..10], crate::utils::dates::format_date(crate::utils::dates::today()));
        assert!(vm.selected().is_none());
        assert_eq!(app.navigator.current(), Route::Dashboard);
        assert_eq!(app.state.notifications.list()[0].message, "Added Brown Rice to Dinner");
    }

    #[test]
    fn log_without_selection_is_rejected() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = FoodSearchViewModel::new(&app.state);
        assert!(matches!(block_on(vm.log_selected()), Err(AppError::Validation(_))));
        assert!(vm.set_quantity("0").is_err());
        assert_eq!(vm.quantity(), 1.0);
    }

    #[test]
    fn invalid_quantity_blocks_logging_and_is_reported() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = FoodSearchViewModel::new(&app.state);
        vm.select(serde_json::from_value(rice()).unwrap());

        assert!(vm.set_quantity("0").is_err());
        assert_eq!(vm.quantity_input(), "0");
        assert!(vm.quantity_error().is_some());

        assert!(matches!(block_on(vm.log_selected()), Err(AppError::Validation(_))));
        assert_eq!(app.transport.count(HttpMethod::Post, "/food-logs"), 0);
        assert_eq!(app.state.notifications.list().len(), 1);
        assert!(vm.selected().is_some());

        vm.set_quantity("2").unwrap();
        assert!(vm.quantity_error().is_none());
    }

    #[test]
    fn quick_add_creates_then_logs_the_custom_food() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = FoodSearchViewModel::new(&app.state);
        app.transport.push(200, json!({ "id": "c-1", "name": "Granola bar", "calories": 190.0, "serving": "1 bar" }));
        app.transport.push(200, logged("Granola bar", "snack"));

        vm.set_custom_field(CustomFoodField::Name, "Granola bar");
        vm.set_custom_field(CustomFoodField::Calories, "190");
        vm.set_custom_field(CustomFoodField::Protein, "4");
        vm.set_custom_field(CustomFoodField::Serving, "1 bar");
        block_on(vm.add_custom_food()).unwrap();

        let requests = app.transport.requests();
        assert_eq!(api_path(&requests[0].url), "/foods/custom");
        let created: Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(created["protein"], 4.0);
        assert_eq!(created["category"], "custom");
        assert_eq!(api_path(&requests[1].url), "/food-logs");
        assert_eq!(vm.custom_form(), CustomFoodForm::default());
    }

    #[test]
    fn quick_add_validates_before_sending() {
        let app = TestApp::signed_in(onboarded_user());
        let vm = FoodSearchViewModel::new(&app.state);
        vm.set_custom_field(CustomFoodField::Name, "Mystery");
        vm.set_custom_field(CustomFoodField::Calories, "abc");
        assert!(block_on(vm.add_custom_food()).is_err());
        assert!(app.transport.requests().is_empty());
    }
}
