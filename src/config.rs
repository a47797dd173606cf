// ============================================================================
// CONFIG - Configuración de la app (build-time + override en runtime)
// ============================================================================
// Los valores vienen de `option_env!` (rellenados por build.rs desde .env) y
// se pueden sobrescribir en runtime con `window.DIET_TRACKER_CONFIG`, así un
// despliegue estático cambia de backend sin recompilar.
// ============================================================================

use serde::{Deserialize, Serialize};

/// Clave de localStorage para el token bearer
pub const TOKEN_STORAGE_KEY: &str = "diet_tracker_token";
/// Clave de localStorage para el perfil cacheado
pub const USER_STORAGE_KEY: &str = "diet_tracker_user";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8001";
const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;
const DEFAULT_SEARCH_DEBOUNCE_MS: u32 = 300;
const DEFAULT_SEARCH_LIMIT: u32 = 20;
const DEFAULT_WEIGHT_HISTORY_LIMIT: u32 = 90;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub request_timeout_ms: u32,
    pub search_debounce_ms: u32,
    pub search_limit: u32,
    pub weight_history_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            search_limit: DEFAULT_SEARCH_LIMIT,
            weight_history_limit: DEFAULT_WEIGHT_HISTORY_LIMIT,
        }
    }
}

impl AppConfig {
    /// Carga la configuración de compilación y aplica overrides de runtime
    pub fn load() -> Self {
        let mut config = Self::from_env();
        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }
        config
    }

    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: option_env!("DIET_API_BASE_URL")
                .and_then(normalize_runtime_value)
                .unwrap_or(defaults.api_base_url),
            environment: option_env!("DIET_ENVIRONMENT")
                .and_then(normalize_runtime_value)
                .unwrap_or(defaults.environment),
            enable_logging: parse_or(option_env!("DIET_ENABLE_LOGGING"), defaults.enable_logging),
            request_timeout_ms: parse_or(
                option_env!("DIET_REQUEST_TIMEOUT_MS"),
                defaults.request_timeout_ms,
            ),
            search_debounce_ms: parse_or(
                option_env!("DIET_SEARCH_DEBOUNCE_MS"),
                defaults.search_debounce_ms,
            ),
            search_limit: parse_or(option_env!("DIET_SEARCH_LIMIT"), defaults.search_limit),
            weight_history_limit: parse_or(
                option_env!("DIET_WEIGHT_HISTORY_LIMIT"),
                defaults.weight_history_limit,
            ),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(default)
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    environment: Option<String>,
    search_debounce_ms: Option<u32>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.environment {
        config.environment = value;
    }
    if let Some(value) = runtime.search_debounce_ms {
        config.search_debounce_ms = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::Reflect;
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let object = Reflect::get(&window, &JsValue::from_str("DIET_TRACKER_CONFIG")).ok()?;
    if object.is_null() || object.is_undefined() {
        return None;
    }

    let read = |key: &str| -> Option<String> {
        Reflect::get(&object, &JsValue::from_str(key))
            .ok()?
            .as_string()
            .and_then(|value| normalize_runtime_value(&value))
    };

    Some(RuntimeConfig {
        api_base_url: read("api_base_url"),
        environment: read("environment"),
        search_debounce_ms: read("search_debounce_ms").and_then(|v| v.parse().ok()),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::load();
}
