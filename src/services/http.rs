// ============================================================================
// HTTP TRANSPORT - Envío de requests (gloo-net en el browser)
// ============================================================================
// El transporte no sabe nada de sesión ni de errores de negocio: envía la
// request y devuelve status + body. La lógica vive en ApiClient.
// ============================================================================

use async_trait::async_trait;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transporte HTTP. Solo falla por errores de red/timeout; cualquier status
/// HTTP llega como `Ok(HttpResponse)`.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError>;
}

/// Body de la respuesta ya leído. Un fallo de lectura es un error de red,
/// no un body vacío.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn response_body<E: std::fmt::Display>(read: Result<String, E>) -> Result<String, AppError> {
    read.map_err(|e| AppError::Network(format!("Error leyendo la respuesta: {}", e)))
}

#[cfg(target_arch = "wasm32")]
pub use browser::GlooTransport;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{response_body, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
    use crate::errors::AppError;
    use async_trait::async_trait;
    use gloo_net::http::{Request, RequestBuilder};
    use gloo_timers::callback::Timeout;
    use web_sys::AbortController;

    /// Transporte fetch() con timeout por AbortController
    pub struct GlooTransport {
        timeout_ms: u32,
    }

    impl GlooTransport {
        pub fn new(timeout_ms: u32) -> Self {
            Self { timeout_ms }
        }
    }

    fn builder_for(method: HttpMethod, url: &str) -> RequestBuilder {
        match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Delete => Request::delete(url),
        }
    }

    fn map_request_error(err: gloo_net::Error) -> AppError {
        let message = err.to_string();
        let lowered = message.to_lowercase();
        if lowered.contains("timeout") || lowered.contains("abort") {
            AppError::Timeout("Request timed out".to_string())
        } else {
            AppError::Network(message)
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for GlooTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
            let controller = AbortController::new()
                .map_err(|_| AppError::Config("No se pudo crear AbortController".to_string()))?;
            let signal = controller.signal();
            let timeout_controller = controller.clone();
            // Se cancela al salir de scope si la respuesta llega antes
            let _timeout = Timeout::new(self.timeout_ms, move || timeout_controller.abort());

            let mut builder = builder_for(request.method, &request.url).abort_signal(Some(&signal));
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let built = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| AppError::Serialization(format!("Error construyendo request: {}", e)))?;

            let response = built.send().await.map_err(map_request_error)?;
            let status = response.status();
            let body = response_body(response.text().await)?;
            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Transporte con respuestas programadas; registra cada request enviada
    #[derive(Default)]
    pub struct MockTransport {
        responses: RefCell<VecDeque<Result<HttpResponse, AppError>>>,
        routes: RefCell<Vec<(HttpMethod, String, u16, String)>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Encola una respuesta para la próxima request sin ruta registrada
        pub fn push(&self, status: u16, body: serde_json::Value) {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
        }

        /// Encola un body crudo (p.ej. vacío)
        pub fn push_raw(&self, status: u16, body: &str) {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
        }

        pub fn push_error(&self, error: AppError) {
            self.responses.borrow_mut().push_back(Err(error));
        }

        /// Respuesta fija para un método + prefijo de path (tras `/api`)
        pub fn route(&self, method: HttpMethod, path_prefix: &str, status: u16, body: serde_json::Value) {
            self.routes.borrow_mut().retain(|(m, p, _, _)| !(*m == method && p == path_prefix));
            self.routes
                .borrow_mut()
                .push((method, path_prefix.to_string(), status, body.to_string()));
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.borrow().clone()
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.requests.borrow().last().cloned()
        }

        /// Cuántas requests se enviaron a un path concreto (sin query)
        pub fn count(&self, method: HttpMethod, path: &str) -> usize {
            self.requests
                .borrow()
                .iter()
                .filter(|request| request.method == method && api_path(&request.url) == path)
                .count()
        }
    }

    /// Path tras `/api`, sin query string
    pub fn api_path(url: &str) -> &str {
        let after_api = url.split_once("/api").map(|(_, rest)| rest).unwrap_or(url);
        after_api.split('?').next().unwrap_or(after_api)
    }

    #[async_trait(?Send)]
    impl HttpTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
            let path = api_path(&request.url).to_string();
            self.requests.borrow_mut().push(request.clone());

            let routed = self
                .routes
                .borrow()
                .iter()
                .filter(|(method, prefix, _, _)| *method == request.method && path.starts_with(prefix.as_str()))
                .max_by_key(|(_, prefix, _, _)| prefix.len())
                .map(|(_, _, status, body)| HttpResponse {
                    status: *status,
                    body: body.clone(),
                });
            if let Some(response) = routed {
                return Ok(response);
            }

            self.responses.borrow_mut().pop_front().unwrap_or_else(|| {
                Err(AppError::Network(format!(
                    "MockTransport sin respuesta para {} {}",
                    request.method.as_str(),
                    request.url
                )))
            })
        }
    }
}
