// ============================================================================
// WIDGETS - Piezas de formulario reutilizadas por las vistas
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_input, ElementBuilder};

/// `<label>` + `<input>`; el handler recibe cada cambio de valor
pub fn text_field<F>(
    id: &str,
    label: &str,
    input_type: &str,
    value: &str,
    on_change: F,
) -> Result<Element, JsValue>
where
    F: FnMut(String) + 'static,
{
    let input = ElementBuilder::new("input")?
        .id(id)?
        .class("input")?
        .attr("type", input_type)?
        .attr("value", value)?
        .build();
    if input_type == "number" {
        input.set_attribute("inputmode", "decimal")?;
        input.set_attribute("step", "any")?;
    }
    on_input(&input, on_change)?;

    Ok(ElementBuilder::new("div")?
        .class("field")?
        .child(
            ElementBuilder::new("label")?
                .attr("for", id)?
                .text(label)
                .build(),
        )?
        .child(input)?
        .build())
}

/// Botón con handler de click
pub fn button<F>(label: &str, class: &str, disabled: bool, mut on_click: F) -> Result<Element, JsValue>
where
    F: FnMut() + 'static,
{
    Ok(ElementBuilder::new("button")?
        .class(class)?
        .attr("type", "button")?
        .flag("disabled", disabled)?
        .text(label)
        .on_click(move |_| on_click())?
        .build())
}

/// Opción seleccionable (género, actividad, ritmo, unidades...)
pub fn chip<F>(label: &str, selected: bool, on_click: F) -> Result<Element, JsValue>
where
    F: FnMut() + 'static,
{
    let class = if selected { "chip chip-selected" } else { "chip" };
    button(label, class, false, on_click)
}

/// Mensaje de error inline bajo un formulario
pub fn error_text(error: Option<&str>) -> Result<Option<Element>, JsValue> {
    match error {
        Some(message) => Ok(Some(
            ElementBuilder::new("p")?
                .class("form-error")?
                .attr("role", "alert")?
                .text(message)
                .build(),
        )),
        None => Ok(None),
    }
}
