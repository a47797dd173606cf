// ============================================================================
// API CLIENT - Comunicación HTTP con el backend
// ============================================================================
// Todas las requests pasan por `request()`: URL base + `/api`, Content-Type
// JSON y Bearer si hay credencial. Un 401 de cualquier endpoint purga la
// sesión y navega a /auth antes de devolver el error al llamador.
// ============================================================================

use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::AppError;
use crate::models::{
    AuthResponse, CustomFoodCreate, Dashboard, Food, FoodLog, FoodLogCreate, LoginRequest,
    ProfileUpdate, RecentFood, RegisterRequest, UserProfile, WaterLog, WaterLogAdd, WeeklyStats,
    WeightLog, WeightLogCreate,
};
use crate::router::{Navigator, Route};
use crate::services::http::{HttpMethod, HttpRequest, HttpTransport};
use crate::state::session_store::SessionStore;

/// Cliente API compartido (clonar comparte transporte y sesión)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    session: SessionStore,
    navigator: Rc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        transport: Rc<dyn HttpTransport>,
        session: SessionStore,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
            navigator,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn navigator(&self) -> Rc<dyn Navigator> {
        self.navigator.clone()
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Envía una request y parsea el body JSON. Un body vacío se lee como `null`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<T, AppError> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.session.credential() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let request = HttpRequest {
            method,
            url: self.build_url(path),
            headers,
            body,
        };

        log::debug!("🌐 [API] {} {}", method.as_str(), path);
        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("❌ [API] {} {} falló: {}", method.as_str(), path, e);
            e
        })?;

        if response.status == 401 {
            log::warn!("🔒 [API] 401 en {} {}: purgando sesión", method.as_str(), path);
            self.session.clear();
            if self.navigator.current() != Route::Auth {
                self.navigator.navigate(Route::Auth);
            }
            return Err(AppError::from_status(response.status, &response.body));
        }

        if !response.is_success() {
            let error = AppError::from_status(response.status, &response.body);
            log::warn!("⚠️ [API] {} {} → {}", method.as_str(), path, error);
            return Err(error);
        }

        let raw = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(raw)
            .map_err(|e| AppError::Parse(format!("Respuesta inválida de {}: {}", path, e)))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request(HttpMethod::Get, path, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.request(HttpMethod::Post, path, Some(encode(body)?)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.request(HttpMethod::Put, path, Some(encode(body)?)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request(HttpMethod::Delete, path, None).await
    }

    // ------------------------------------------------------------------------
    // Auth + perfil
    // ------------------------------------------------------------------------

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AppError> {
        self.post("/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
        self.post("/auth/register", request).await
    }

    pub async fn get_profile(&self) -> Result<UserProfile, AppError> {
        self.get("/profile").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, AppError> {
        self.put("/profile", update).await
    }

    // ------------------------------------------------------------------------
    // Comidas
    // ------------------------------------------------------------------------

    pub async fn dashboard(&self, date: &str) -> Result<Dashboard, AppError> {
        self.get(&with_query("/dashboard", &[("date", date)])).await
    }

    pub async fn search_foods(&self, query: &str, limit: u32) -> Result<Vec<Food>, AppError> {
        let limit = limit.to_string();
        self.get(&with_query("/foods", &[("q", query), ("limit", &limit)]))
            .await
    }

    pub async fn create_custom_food(&self, food: &CustomFoodCreate) -> Result<Food, AppError> {
        self.post("/foods/custom", food).await
    }

    pub async fn recent_foods(&self) -> Result<Vec<RecentFood>, AppError> {
        self.get("/food-logs/recent-foods").await
    }

    pub async fn food_logs(&self, date: &str) -> Result<Vec<FoodLog>, AppError> {
        self.get(&with_query("/food-logs", &[("date", date)])).await
    }

    pub async fn create_food_log(&self, entry: &FoodLogCreate) -> Result<FoodLog, AppError> {
        self.post("/food-logs", entry).await
    }

    pub async fn delete_food_log(&self, log_id: &str) -> Result<(), AppError> {
        let path = format!("/food-logs/{}", urlencoding::encode(log_id));
        self.delete::<serde_json::Value>(&path).await.map(|_| ())
    }

    // ------------------------------------------------------------------------
    // Agua
    // ------------------------------------------------------------------------

    pub async fn water_log(&self, date: &str) -> Result<WaterLog, AppError> {
        self.get(&with_query("/water-logs", &[("date", date)])).await
    }

    pub async fn add_water(&self, entry: &WaterLogAdd) -> Result<WaterLog, AppError> {
        self.post("/water-logs", entry).await
    }

    pub async fn remove_last_water(&self, date: &str) -> Result<WaterLog, AppError> {
        self.delete(&with_query("/water-logs/last", &[("date", date)]))
            .await
    }

    // ------------------------------------------------------------------------
    // Peso + estadísticas
    // ------------------------------------------------------------------------

    pub async fn weight_logs(&self, limit: u32) -> Result<Vec<WeightLog>, AppError> {
        let limit = limit.to_string();
        self.get(&with_query("/weight-logs", &[("limit", &limit)])).await
    }

    pub async fn create_weight_log(&self, entry: &WeightLogCreate) -> Result<WeightLog, AppError> {
        self.post("/weight-logs", entry).await
    }

    pub async fn delete_weight_log(&self, log_id: &str) -> Result<(), AppError> {
        let path = format!("/weight-logs/{}", urlencoding::encode(log_id));
        self.delete::<serde_json::Value>(&path).await.map(|_| ())
    }

    pub async fn weekly_stats(&self) -> Result<WeeklyStats, AppError> {
        self.get("/stats/weekly").await
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String, AppError> {
    serde_json::to_string(body)
        .map_err(|e| AppError::Serialization(format!("Error serializando body: {}", e)))
}

/// `path?k=v&...` con valores url-encoded
fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}


#[cfg(test)]
mod tests {
    use super::testing::Harness;
    use super::*;
    use crate::config::{TOKEN_STORAGE_KEY, USER_STORAGE_KEY};
    use crate::models::user::fixtures::{new_user, onboarded_user};
    use crate::services::http::testing::api_path;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn attaches_bearer_only_when_signed_in() {
        let anonymous = Harness::new(Route::Auth);
        anonymous.transport.push(200, json!([]));
        block_on(anonymous.api.get::<serde_json::Value>("/foods")).unwrap();
        let request = anonymous.transport.last_request().unwrap();
        assert_eq!(request.url, "http://api.test/api/foods");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("authorization"), None);

        let signed_in = Harness::signed_in(onboarded_user());
        signed_in.transport.push(200, json!([]));
        block_on(signed_in.api.get::<serde_json::Value>("/foods")).unwrap();
        let request = signed_in.transport.last_request().unwrap();
        assert_eq!(request.header("Authorization"), Some("Bearer tok-123"));
    }

    #[test]
    fn unauthorized_purges_session_and_redirects_to_auth() {
        let harness = Harness::signed_in(onboarded_user());
        harness.navigator.navigate(Route::Progress);
        harness.transport.push(401, json!({ "detail": "Token expired" }));

        let result = block_on(harness.api.weekly_stats());

        assert_eq!(result, Err(AppError::Auth("Token expired".to_string())));
        assert!(harness.session().credential().is_none());
        assert!(harness.session().profile().is_none());
        assert!(!harness.storage.contains(TOKEN_STORAGE_KEY));
        assert!(!harness.storage.contains(USER_STORAGE_KEY));
        assert_eq!(harness.navigator.current(), Route::Auth);
    }

    #[test]
    fn unauthorized_on_auth_page_does_not_push_history() {
        let harness = Harness::new(Route::Auth);
        harness
            .transport
            .push(401, json!({ "detail": "Invalid email or password" }));

        let result = block_on(harness.api.login(&LoginRequest {
            email: "a@b.com".to_string(),
            password: "wrong".to_string(),
        }));

        assert_eq!(result.unwrap_err().user_message(), "Invalid email or password");
        assert_eq!(harness.navigator.history(), vec![Route::Auth]);
    }

    #[test]
    fn other_errors_leave_the_session_alone() {
        let harness = Harness::signed_in(new_user());
        harness.transport.push(404, json!({ "detail": "Food log not found" }));
        harness.transport.push(500, json!({ "detail": "boom" }));

        let missing = block_on(harness.api.delete_food_log("nope"));
        assert_eq!(missing, Err(AppError::Validation("Food log not found".to_string())));
        let failed = block_on(harness.api.weekly_stats());
        assert!(matches!(failed, Err(AppError::Http { status: 500, .. })));

        assert!(harness.session().credential().is_some());
        assert_eq!(harness.navigator.current(), Route::Dashboard);
        // Sin reintentos
        assert_eq!(harness.transport.requests().len(), 2);
    }

    #[test]
    fn network_errors_propagate_unchanged() {
        let harness = Harness::signed_in(new_user());
        harness.transport.push_error(AppError::Network("offline".to_string()));
        let result = block_on(harness.api.get_profile());
        assert_eq!(result, Err(AppError::Network("offline".to_string())));
        assert!(harness.session().credential().is_some());
    }

    #[test]
    fn query_values_are_url_encoded() {
        let harness = Harness::signed_in(onboarded_user());
        harness.transport.push(200, json!([]));
        block_on(harness.api.search_foods("mac & cheese", 20)).unwrap();

        let request = harness.transport.last_request().unwrap();
        assert_eq!(request.url, "http://api.test/api/foods?q=mac%20%26%20cheese&limit=20");
        assert_eq!(api_path(&request.url), "/foods");
    }

    #[test]
    fn empty_success_body_parses_as_null() {
        let harness = Harness::signed_in(onboarded_user());
        harness.transport.push_raw(204, "");
        let value: Option<serde_json::Value> =
            block_on(harness.api.delete("/weight-logs/w1")).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn update_profile_sends_partial_body() {
        let harness = Harness::signed_in(new_user());
        let mut updated = new_user();
        updated.onboarding_completed = true;
        harness
            .transport
            .push(200, serde_json::to_value(&updated).unwrap());

        let update = ProfileUpdate {
            onboarding_completed: Some(true),
            ..Default::default()
        };
        let profile = block_on(harness.api.update_profile(&update)).unwrap();

        assert!(profile.onboarding_completed);
        let request = harness.transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.body.as_deref(), Some(r#"{"onboarding_completed":true}"#));
    }
}
