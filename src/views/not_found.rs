use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::router::Route;
use crate::state::AppState;
use crate::views::widgets::button;

pub fn render_not_found(state: &AppState, path: &str) -> Result<Element, JsValue> {
    let navigator = state.navigator.clone();
    Ok(ElementBuilder::new("main")?
        .class("page not-found")?
        .child(ElementBuilder::new("h1")?.text("404").build())?
        .child(
            ElementBuilder::new("p")?
                .text(&format!("Nothing lives at {}", path))
                .build(),
        )?
        .child(button("Go home", "btn btn-primary", false, move || {
            navigator.navigate(Route::Dashboard)
        })?)?
        .build())
}
