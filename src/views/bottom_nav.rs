use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::router::Route;
use crate::state::AppState;

pub fn render_bottom_nav(state: &AppState, current: &Route) -> Result<Element, JsValue> {
    let items = [
        ("🏠", "Today", Route::Dashboard),
        ("➕", "Add", Route::AddFood { meal: None }),
        ("📈", "Progress", Route::Progress),
        ("⚙️", "Settings", Route::Settings),
    ];

    let nav = ElementBuilder::new("nav")?.class("bottom-nav")?.build();
    for (icon, label, route) in items {
        let active = current.without_query() == route;
        let class = if active { "nav-item nav-item-active" } else { "nav-item" };
        let navigator = state.navigator.clone();
        let item = ElementBuilder::new("button")?
            .class(class)?
            .attr("type", "button")?
            .child(ElementBuilder::new("span")?.class("nav-icon")?.text(icon).build())?
            .child(ElementBuilder::new("span")?.class("nav-label")?.text(label).build())?
            .on_click(move |_| {
                if !active {
                    navigator.navigate(route.clone());
                }
            })?
            .build();
        nav.append_child(&item)?;
    }
    Ok(nav)
}
