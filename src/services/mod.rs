// ============================================================================
// SERVICES - Comunicación con el exterior (HTTP, service worker)
// ============================================================================

pub mod api_client;
pub mod http;
#[cfg(target_arch = "wasm32")]
pub mod service_worker;

pub use api_client::ApiClient;
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
#[cfg(target_arch = "wasm32")]
pub use http::GlooTransport;
