// ============================================================================
// DASHBOARD VIEW - Resumen del día
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::{Dashboard, MacroProgress, MealType};
use crate::router::Route;
use crate::state::AppState;
use crate::utils::nutrition::{macro_percent, water_glasses, water_percent};
use crate::viewmodels::dashboard_viewmodel::GLASS_ML;
use crate::viewmodels::DashboardViewModel;
use crate::views::calorie_ring::render_calorie_ring;
use crate::views::spinner::render_spinner;
use crate::views::widgets::button;

pub fn render_dashboard(state: &AppState, vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let greeting = state
        .session
        .profile()
        .map(|profile| format!("Hi, {} 👋", profile.first_name()))
        .unwrap_or_default();

    let page = ElementBuilder::new("main")?
        .class("page dashboard")?
        .child(ElementBuilder::new("h1")?.class("page-title")?.text(&greeting).build())?
        .child(render_date_bar(state, vm)?)?
        .build();

    match vm.dashboard() {
        Some(dashboard) => {
            page.append_child(&render_summary(&dashboard)?)?;
            page.append_child(&render_water(state, vm, &dashboard)?)?;
            for meal in MealType::ALL {
                page.append_child(&render_meal(state, vm, &dashboard, meal)?)?;
            }
        }
        None if vm.is_loading() => {
            page.append_child(&render_spinner()?)?;
        }
        None => {
            let vm = vm.clone();
            let state = state.clone();
            page.append_child(&button("Retry", "btn btn-secondary", false, move || {
                let vm = vm.clone();
                state.spawn(async move {
                    let _ = vm.load().await;
                });
            })?)?;
        }
    }
    Ok(page)
}

fn render_date_bar(state: &AppState, vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let previous = {
        let vm = vm.clone();
        let state = state.clone();
        button("‹", "btn btn-icon", vm.is_loading(), move || {
            let vm = vm.clone();
            state.spawn(async move {
                let _ = vm.show_previous_day().await;
            });
        })?
    };
    let next = {
        let vm = vm.clone();
        let state = state.clone();
        let disabled = !vm.can_go_next() || vm.is_loading();
        button("›", "btn btn-icon", disabled, move || {
            let vm = vm.clone();
            state.spawn(async move {
                let _ = vm.show_next_day().await;
            });
        })?
    };

    Ok(ElementBuilder::new("div")?
        .class("date-bar")?
        .child(previous)?
        .child(ElementBuilder::new("span")?.class("date-label")?.text(&vm.date_label()).build())?
        .child(next)?
        .build())
}

fn render_summary(dashboard: &Dashboard) -> Result<Element, JsValue> {
    let macros = ElementBuilder::new("div")?
        .class("macro-list")?
        .child(render_macro("Protein", &dashboard.protein)?)?
        .child(render_macro("Carbs", &dashboard.carbs)?)?
        .child(render_macro("Fat", &dashboard.fat)?)?
        .build();

    let streak = if dashboard.streak > 0 {
        format!("🔥 {} day streak", dashboard.streak)
    } else {
        "Log a meal to start a streak".to_string()
    };

    Ok(ElementBuilder::new("section")?
        .class("card summary-card")?
        .child(render_calorie_ring(dashboard.calories.consumed, dashboard.calories.target)?)?
        .child(
            ElementBuilder::new("p")?
                .class("summary-totals")?
                .text(&format!(
                    "{:.0} / {:.0} kcal",
                    dashboard.calories.consumed, dashboard.calories.target
                ))
                .build(),
        )?
        .child(macros)?
        .child(ElementBuilder::new("p")?.class("streak")?.text(&streak).build())?
        .build())
}

fn render_macro(label: &str, progress: &MacroProgress) -> Result<Element, JsValue> {
    let bar = ElementBuilder::new("div")?
        .class("macro-bar")?
        .child(
            ElementBuilder::new("div")?
                .class("macro-bar-fill")?
                .attr("style", &format!("width: {:.0}%", macro_percent(progress)))?
                .build(),
        )?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("macro")?
        .child(
            ElementBuilder::new("span")?
                .class("macro-label")?
                .text(&format!("{} {:.0}/{:.0} g", label, progress.consumed, progress.target))
                .build(),
        )?
        .child(bar)?
        .build())
}

fn render_water(state: &AppState, vm: &DashboardViewModel, dashboard: &Dashboard) -> Result<Element, JsValue> {
    let water = dashboard.water;
    let busy = vm.is_busy();

    let remove = {
        let vm = vm.clone();
        let state = state.clone();
        button("−", "btn btn-icon", busy || water.consumed_ml == 0, move || {
            let vm = vm.clone();
            state.spawn(async move {
                let _ = vm.remove_last_water().await;
            });
        })?
    };
    let add = {
        let vm = vm.clone();
        let state = state.clone();
        button(&format!("+ {} ml", GLASS_ML), "btn btn-primary", busy, move || {
            let vm = vm.clone();
            state.spawn(async move {
                let _ = vm.add_water(GLASS_ML).await;
            });
        })?
    };

    Ok(ElementBuilder::new("section")?
        .class("card water-card")?
        .child(ElementBuilder::new("h2")?.text("💧 Water").build())?
        .child(
            ElementBuilder::new("p")?
                .text(&format!(
                    "{} glasses · {} / {} ml",
                    water_glasses(water.consumed_ml),
                    water.consumed_ml,
                    water.goal_ml
                ))
                .build(),
        )?
        .child(
            ElementBuilder::new("div")?
                .class("water-bar")?
                .child(
                    ElementBuilder::new("div")?
                        .class("water-bar-fill")?
                        .attr("style", &format!("width: {:.0}%", water_percent(&water)))?
                        .build(),
                )?
                .build(),
        )?
        .child(
            ElementBuilder::new("div")?
                .class("water-actions")?
                .child(remove)?
                .child(add)?
                .build(),
        )?
        .build())
}

fn render_meal(
    state: &AppState,
    vm: &DashboardViewModel,
    dashboard: &Dashboard,
    meal: MealType,
) -> Result<Element, JsValue> {
    let add = {
        let navigator = state.navigator.clone();
        button("+ Add", "btn btn-link", false, move || {
            navigator.navigate(Route::AddFood { meal: Some(meal) });
        })?
    };
    let header = ElementBuilder::new("div")?
        .class("meal-header")?
        .child(ElementBuilder::new("h3")?.text(meal.label()).build())?
        .child(
            ElementBuilder::new("span")?
                .class("meal-calories")?
                .text(&format!("{:.0} kcal", dashboard.meals.calories_for(meal)))
                .build(),
        )?
        .child(add)?
        .build();

    let list = ElementBuilder::new("ul")?.class("meal-items")?.build();
    for log in dashboard.meals.for_meal(meal) {
        let delete = {
            let vm = vm.clone();
            let state = state.clone();
            let log_id = log.id.clone();
            button("🗑", "btn btn-icon", vm.is_busy(), move || {
                let vm = vm.clone();
                let log_id = log_id.clone();
                state.spawn(async move {
                    let _ = vm.delete_food_log(&log_id).await;
                });
            })?
        };
        let item = ElementBuilder::new("li")?
            .class("meal-item")?
            .child(
                ElementBuilder::new("div")?
                    .child(ElementBuilder::new("strong")?.text(&log.food_name).build())?
                    .child(
                        ElementBuilder::new("small")?
                            .text(&format!("{} × {}", log.quantity, log.serving))
                            .build(),
                    )?
                    .build(),
            )?
            .child(ElementBuilder::new("span")?.text(&format!("{:.0} kcal", log.calories)).build())?
            .child(delete)?
            .build();
        list.append_child(&item)?;
    }

    Ok(ElementBuilder::new("section")?
        .class("card meal-card")?
        .child(header)?
        .child(list)?
        .build())
}
