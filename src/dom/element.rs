// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, Window};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Crear elemento SVG (necesita namespace para que el browser lo dibuje)
pub fn create_svg_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element_ns(Some(SVG_NS), tag))
}

/// Establecer text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Establecer inner HTML
pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

/// Agregar hijo
pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Establecer atributo
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Input con foco antes de un re-render: id + posición del cursor
#[derive(Debug, Clone, PartialEq)]
pub struct FocusedInput {
    pub id: String,
    pub cursor: Option<u32>,
}

/// Captura el input enfocado (solo si tiene id, si no no se puede recuperar)
pub fn focused_input() -> Option<FocusedInput> {
    let active = document()?.active_element()?;
    let input = active.dyn_into::<HtmlInputElement>().ok()?;
    let id = input.id();
    if id.is_empty() {
        return None;
    }
    Some(FocusedInput {
        id,
        cursor: input.selection_start().ok().flatten(),
    })
}

/// Devuelve el foco (y el cursor) al input tras reconstruir el DOM
pub fn restore_focus(focused: &FocusedInput) {
    let Some(input) = get_element_by_id(&focused.id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    if let Err(e) = input.focus() {
        log::warn!("⚠️ [DOM] No se pudo restaurar el foco: {:?}", e);
        return;
    }
    if let Some(cursor) = focused.cursor {
        // Inputs type=number no soportan selección: se ignora el error
        let _ = input.set_selection_range(cursor, cursor);
    }
}
