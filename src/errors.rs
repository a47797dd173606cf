// ============================================================================
// ERRORS - Taxonomía de errores de la app
// ============================================================================

use thiserror::Error;

/// Máximo de caracteres del body de error que se muestran al usuario
const MAX_ERROR_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// 401 de cualquier endpoint: la sesión ya fue purgada
    #[error("Authentication error: {0}")]
    Auth(String),
    /// 4xx distinto de 401, o validación de formulario en cliente
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl AppError {
    /// Clasifica una respuesta no-2xx según su status
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_detail(body);
        match status {
            401 => AppError::Auth(message),
            400..=499 => AppError::Validation(message),
            _ => AppError::Http { status, message },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }

    /// Mensaje legible para mostrar en una notificación
    pub fn user_message(&self) -> String {
        match self {
            AppError::Auth(message) | AppError::Validation(message) => message.clone(),
            AppError::Network(_) => "Unable to reach the server. Check your connection.".to_string(),
            AppError::Timeout(_) => "Request timed out. Please try again.".to_string(),
            AppError::Http { message, .. } => message.clone(),
            AppError::Parse(_) | AppError::Serialization(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            AppError::Storage(message) | AppError::Config(message) => message.clone(),
        }
    }
}

/// Extrae `detail` de un body FastAPI-style; si no, recorta el texto crudo
fn extract_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return truncate(detail),
            // Errores de validación 422: lista de {loc, msg, ...}
            Some(serde_json::Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
                    .collect();
                if !messages.is_empty() {
                    return truncate(&messages.join("; "));
                }
            }
            _ => {}
        }
    }
    truncate(body)
}

fn truncate(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
