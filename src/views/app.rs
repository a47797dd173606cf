// ============================================================================
// APP VIEW - Composición de la pantalla actual
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::pages::{Page, Screen};
use crate::state::AppState;
use crate::views::{
    render_add_food, render_auth, render_bottom_nav, render_dashboard, render_not_found,
    render_onboarding, render_progress, render_settings, render_spinner, render_toasts,
};

/// Renderiza la pantalla resuelta por los guards + toasts
pub fn render_app(state: &AppState, screen: &Screen) -> Result<Element, JsValue> {
    let shell = ElementBuilder::new("div")?.class("app-shell")?.build();

    match screen {
        // El redirect ya está en marcha: spinner hasta el siguiente render
        Screen::Spinner | Screen::Redirecting => {
            shell.append_child(&render_spinner()?)?;
        }
        Screen::Page(route, page) => {
            let content = match page {
                Page::Auth(vm) => render_auth(state, vm)?,
                Page::Onboarding(vm) => render_onboarding(state, vm)?,
                Page::Dashboard(vm) => render_dashboard(state, vm)?,
                Page::AddFood(vm) => render_add_food(state, vm)?,
                Page::Progress(vm) => render_progress(state, vm)?,
                Page::Settings(vm) => render_settings(state, vm)?,
                Page::NotFound(path) => render_not_found(state, path)?,
            };
            shell.append_child(&content)?;
            if route.shows_bottom_nav() {
                shell.append_child(&render_bottom_nav(state, route)?)?;
            }
        }
    }

    shell.append_child(&render_toasts(state)?)?;
    Ok(shell)
}
