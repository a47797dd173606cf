// ============================================================================
// TOASTS - Pila de notificaciones
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::{AppState, ToastKind};

const TOAST_DURATION_MS: u32 = 4_000;

pub fn render_toasts(state: &AppState) -> Result<Element, JsValue> {
    let stack = ElementBuilder::new("div")?
        .class("toast-stack")?
        .attr("aria-live", "polite")?
        .build();

    for toast in state.notifications.list() {
        let class = match toast.kind {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        };
        let dismiss = {
            let state = state.clone();
            let id = toast.id;
            move |_| {
                state.notifications.dismiss(id);
                state.notify_changes();
            }
        };
        let item = ElementBuilder::new("div")?
            .class(class)?
            .attr("role", "status")?
            .text(&toast.message)
            .on_click(dismiss)?
            .build();
        stack.append_child(&item)?;
    }
    Ok(stack)
}

/// Cierre automático: cada toast nuevo programa su propio dismiss
pub fn schedule_auto_dismiss(state: &AppState, toast_id: u64) {
    let state = state.clone();
    Timeout::new(TOAST_DURATION_MS, move || {
        state.notifications.dismiss(toast_id);
        state.notify_changes();
    })
    .forget();
}
