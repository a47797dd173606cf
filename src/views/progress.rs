// ============================================================================
// PROGRESS VIEW - Gráfico de peso, estadísticas semanales, historial
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::UnitSystem;
use crate::state::AppState;
use crate::utils::chart::{polyline_points, ChartArea};
use crate::utils::dates::short_label;
use crate::utils::units::{format_weight, format_weight_change, weight_unit_label};
use crate::viewmodels::ProgressViewModel;
use crate::views::spinner::render_spinner;
use crate::views::widgets::{button, text_field};

const BAR_MAX_HEIGHT: f64 = 100.0;

pub fn render_progress(state: &AppState, vm: &ProgressViewModel) -> Result<Element, JsValue> {
    let units = state
        .session
        .profile()
        .map(|profile| profile.units)
        .unwrap_or_default();

    let page = ElementBuilder::new("main")?
        .class("page progress")?
        .child(ElementBuilder::new("h1")?.class("page-title")?.text("Progress").build())?
        .build();

    if !vm.is_loaded() {
        if vm.is_loading() {
            page.append_child(&render_spinner()?)?;
        } else {
            let vm = vm.clone();
            let state = state.clone();
            page.append_child(&button("Retry", "btn btn-secondary", false, move || {
                let vm = vm.clone();
                state.spawn(async move {
                    let _ = vm.load().await;
                });
            })?)?;
        }
        return Ok(page);
    }

    page.append_child(&render_weight_form(state, vm, units)?)?;
    page.append_child(&render_weight_chart(vm, units)?)?;
    page.append_child(&render_weekly(vm)?)?;
    page.append_child(&render_history(state, vm, units)?)?;
    Ok(page)
}

fn render_weight_form(state: &AppState, vm: &ProgressViewModel, units: UnitSystem) -> Result<Element, JsValue> {
    // Inputs locales del formulario: se leen al pulsar "Log"
    let weight = Rc::new(RefCell::new(String::new()));
    let note = Rc::new(RefCell::new(String::new()));

    let weight_field = {
        let weight = weight.clone();
        text_field(
            "progress-weight",
            &format!("Today's weight ({})", weight_unit_label(units)),
            "number",
            "",
            move |value| *weight.borrow_mut() = value,
        )?
    };
    let note_field = {
        let note = note.clone();
        text_field("progress-note", "Note", "text", "", move |value| *note.borrow_mut() = value)?
    };
    let submit = {
        let vm = vm.clone();
        let state = state.clone();
        button("Log weight", "btn btn-primary", vm.is_saving(), move || {
            let vm = vm.clone();
            let weight = weight.borrow().clone();
            let note = note.borrow().clone();
            state.spawn(async move {
                let _ = vm.log_weight(&weight, &note).await;
            });
        })?
    };

    Ok(ElementBuilder::new("section")?
        .class("card weight-form")?
        .child(weight_field)?
        .child(note_field)?
        .child(submit)?
        .build())
}

fn render_weight_chart(vm: &ProgressViewModel, units: UnitSystem) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?
        .class("card weight-chart")?
        .child(ElementBuilder::new("h2")?.text("Weight").build())?
        .build();

    let area = ChartArea::default();
    let points = vm.weight_chart(area);
    if points.len() < 2 {
        section.append_child(
            &ElementBuilder::new("p")?
                .class("empty")?
                .text("Log your weight on two different days to see a trend")
                .build(),
        )?;
        return Ok(section);
    }

    let svg = ElementBuilder::svg("svg")?
        .class("chart")?
        .attr("viewBox", &format!("0 0 {} {}", area.width, area.height))?
        .child(
            ElementBuilder::svg("polyline")?
                .class("chart-line")?
                .attr("fill", "none")?
                .attr("points", &polyline_points(&points))?
                .build(),
        )?
        .build();
    for point in &points {
        let dot = ElementBuilder::svg("circle")?
            .class("chart-dot")?
            .attr("cx", &format!("{:.1}", point.x))?
            .attr("cy", &format!("{:.1}", point.y))?
            .attr("r", "3")?
            .child(
                ElementBuilder::svg("title")?
                    .text(&format!("{}: {}", point.label, point.value))
                    .build(),
            )?
            .build();
        svg.append_child(&dot)?;
    }
    section.append_child(&svg)?;

    let mut facts = Vec::new();
    if let Some(change) = vm.weight_change_kg() {
        facts.push(format!("Change: {}", format_weight_change(change, units)));
    }
    if let Some(percent) = vm.goal_progress_percent() {
        facts.push(format!("{:.0}% of the way to your goal", percent));
    }
    for fact in facts {
        section.append_child(&ElementBuilder::new("p")?.class("chart-fact")?.text(&fact).build())?;
    }
    Ok(section)
}

fn render_weekly(vm: &ProgressViewModel) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?
        .class("card weekly-stats")?
        .child(ElementBuilder::new("h2")?.text("This week").build())?
        .build();
    let Some(stats) = vm.stats() else {
        return Ok(section);
    };

    let bars = ElementBuilder::new("div")?.class("bar-chart")?.build();
    for (day, height) in vm.calorie_bars(BAR_MAX_HEIGHT) {
        let bar = ElementBuilder::new("div")?
            .class("bar")?
            .child(
                ElementBuilder::new("div")?
                    .class("bar-fill")?
                    .attr("style", &format!("height: {:.0}%", height))?
                    .build(),
            )?
            .child(ElementBuilder::new("span")?.class("bar-label")?.text(&day).build())?
            .build();
        bars.append_child(&bar)?;
    }

    section.append_child(&bars)?;
    section.append_child(
        &ElementBuilder::new("p")?
            .text(&format!(
                "Avg {:.0} kcal/day · {} of 7 days on track",
                stats.avg_daily_calories, stats.days_on_track
            ))
            .build(),
    )?;
    Ok(section)
}

fn render_history(state: &AppState, vm: &ProgressViewModel, units: UnitSystem) -> Result<Element, JsValue> {
    let list = ElementBuilder::new("ul")?.class("weight-history")?.build();
    for log in vm.weights() {
        let delete = {
            let vm = vm.clone();
            let state = state.clone();
            let log_id = log.id.clone();
            button("🗑", "btn btn-icon", false, move || {
                let vm = vm.clone();
                let log_id = log_id.clone();
                state.spawn(async move {
                    let _ = vm.delete_weight(&log_id).await;
                });
            })?
        };
        let mut text = format!("{} · {}", short_label(log.day()), format_weight(log.weight, units));
        if !log.note.is_empty() {
            text.push_str(&format!(" · {}", log.note));
        }
        let item = ElementBuilder::new("li")?
            .child(ElementBuilder::new("span")?.text(&text).build())?
            .child(delete)?
            .build();
        list.append_child(&item)?;
    }

    Ok(ElementBuilder::new("section")?
        .class("card")?
        .child(ElementBuilder::new("h2")?.text("History").build())?
        .child(list)?
        .build())
}
