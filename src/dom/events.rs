// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// Los listeners de elementos se sueltan con forget(): al reconstruir el DOM
// (set_inner_html("")) el browser los libera junto con el elemento.
// Listeners globales (window/document) solo se registran UNA VEZ al inicio.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, HtmlSelectElement, MouseEvent};

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Input de texto: el handler recibe el valor actual del `<input>`
pub fn on_input<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: Event| {
        if let Some(input) = e
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        {
            handler(input.value());
        }
    }) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Cambio de un `<select>`: el handler recibe el `value` elegido
pub fn on_select<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: Event| {
        if let Some(select) = e
            .target()
            .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok())
        {
            handler(select.value());
        }
    }) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Submit de un `<form>` sin recargar la página
pub fn on_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: Event| {
        e.prevent_default();
        handler();
    }) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
