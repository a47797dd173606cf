// ============================================================================
// SERVICE WORKER - Registro del SW para uso offline (PWA)
// ============================================================================
// Fire-and-forget: un fallo solo se loguea, la app funciona igual sin SW.
// ============================================================================

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

const SERVICE_WORKER_URL: &str = "/sw.js";

/// Lanza el registro en segundo plano
pub fn register_service_worker() {
    wasm_bindgen_futures::spawn_local(async {
        match register().await {
            Ok(()) => log::info!("📦 [SW] Service worker registrado ({})", SERVICE_WORKER_URL),
            Err(e) => log::warn!("⚠️ [SW] Registro fallido: {:?}", e),
        }
    });
}

async fn register() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let navigator = window.navigator();

    // Navegadores sin soporte: `navigator.serviceWorker` no existe
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker"))?;
    if !supported {
        log::info!("ℹ️ [SW] Service workers no soportados");
        return Ok(());
    }

    let promise = navigator.service_worker().register(SERVICE_WORKER_URL);
    JsFuture::from(promise).await?;
    Ok(())
}
