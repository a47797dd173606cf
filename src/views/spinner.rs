use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;

/// Pantalla de carga mientras se resuelve la sesión
pub fn render_spinner() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("spinner-screen")?
        .attr("aria-busy", "true")?
        .child(ElementBuilder::new("div")?.class("spinner")?.build())?
        .build())
}
