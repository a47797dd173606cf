// ============================================================================
// SETTINGS VIEW - Perfil, objetivos y logout
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_select, ElementBuilder};
use crate::models::{ActivityLevel, Gender, UnitSystem};
use crate::state::AppState;
use crate::utils::units::weight_unit_label;
use crate::viewmodels::onboarding_viewmodel::WEIGHT_LOSS_RATES;
use crate::viewmodels::{SettingsField, SettingsViewModel};
use crate::views::widgets::{button, chip, error_text, text_field};

pub fn render_settings(state: &AppState, vm: &SettingsViewModel) -> Result<Element, JsValue> {
    let form = vm.form();
    let body = &form.body;
    let field = |id: &str, label: &str, input_type: &str, value: &str, which: SettingsField| {
        let vm = vm.clone();
        text_field(id, label, input_type, value, move |value| vm.set_field(which, &value))
    };

    let units = ElementBuilder::new("div")?.class("chip-row")?.build();
    for (label, system) in [("Imperial", UnitSystem::Imperial), ("Metric", UnitSystem::Metric)] {
        let vm = vm.clone();
        units.append_child(&chip(label, body.units == system, move || vm.set_units(system))?)?;
    }

    let genders = ElementBuilder::new("div")?.class("chip-row")?.build();
    for gender in [Gender::Male, Gender::Female, Gender::Other] {
        let vm = vm.clone();
        genders.append_child(&chip(gender.label(), body.gender == Some(gender), move || {
            vm.set_gender(gender)
        })?)?;
    }

    let height = match body.units {
        UnitSystem::Metric => field("set-height-cm", "Height (cm)", "number", &body.height_cm, SettingsField::HeightCm)?,
        UnitSystem::Imperial => ElementBuilder::new("div")?
            .class("field-row")?
            .child(field("set-height-ft", "Height (ft)", "number", &body.height_ft, SettingsField::HeightFt)?)?
            .child(field("set-height-in", "(in)", "number", &body.height_in, SettingsField::HeightIn)?)?
            .build(),
    };
    let unit = weight_unit_label(body.units);

    let profile = ElementBuilder::new("section")?
        .class("card settings-profile")?
        .child(ElementBuilder::new("h2")?.text("Profile").build())?
        .child(field("set-name", "Name", "text", &form.name, SettingsField::Name)?)?
        .child(field("set-age", "Age", "number", &body.age, SettingsField::Age)?)?
        .child(genders)?
        .child(units)?
        .child(height)?
        .child(field(
            "set-weight",
            &format!("Current weight ({})", unit),
            "number",
            &body.current_weight,
            SettingsField::CurrentWeight,
        )?)?
        .child(field(
            "set-goal",
            &format!("Goal weight ({})", unit),
            "number",
            &body.goal_weight,
            SettingsField::GoalWeight,
        )?)?
        .build();

    let goals = ElementBuilder::new("section")?
        .class("card settings-goals")?
        .child(ElementBuilder::new("h2")?.text("Goals").build())?
        .child(render_activity_select(vm, body.activity_level)?)?
        .child(render_rate_select(vm, body.weight_loss_rate)?)?
        .child(field("set-water", "Water goal (ml)", "number", &form.water_goal, SettingsField::WaterGoal)?)?
        .build();
    if let Some(profile) = state.session.profile() {
        goals.append_child(
            &ElementBuilder::new("p")?
                .class("targets")?
                .text(&format!(
                    "Daily target: {} kcal · P {} g · C {} g · F {} g",
                    profile.calorie_target, profile.protein_target, profile.carbs_target, profile.fat_target
                ))
                .build(),
        )?;
    }

    let actions = ElementBuilder::new("div")?.class("form-actions")?.build();
    {
        let vm = vm.clone();
        actions.append_child(&button("Discard", "btn btn-secondary", vm.is_saving(), move || vm.reset())?)?;
    }
    {
        let vm = vm.clone();
        let state = state.clone();
        let label = if vm.is_saving() { "Saving..." } else { "Save" };
        actions.append_child(&button(label, "btn btn-primary", vm.is_saving(), move || {
            let vm = vm.clone();
            state.spawn(async move {
                let _ = vm.save().await;
            });
        })?)?;
    }

    let page = ElementBuilder::new("main")?
        .class("page settings")?
        .child(ElementBuilder::new("h1")?.class("page-title")?.text("Settings").build())?
        .child(profile)?
        .child(goals)?
        .build();
    if let Some(error) = error_text(vm.error().as_deref())? {
        page.append_child(&error)?;
    }
    page.append_child(&actions)?;

    let logout = {
        let vm = vm.clone();
        button("Log out", "btn btn-danger btn-block", false, move || vm.logout())?
    };
    page.append_child(&logout)?;
    Ok(page)
}

fn render_activity_select(vm: &SettingsViewModel, current: ActivityLevel) -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?.id("set-activity")?.class("input")?.build();
    for level in ActivityLevel::ALL {
        let option = ElementBuilder::new("option")?
            .attr("value", level.as_str())?
            .flag("selected", level == current)?
            .text(level.label())
            .build();
        select.append_child(&option)?;
    }
    let vm = vm.clone();
    on_select(&select, move |value| {
        if let Some(level) = ActivityLevel::from_str_opt(&value) {
            vm.set_activity_level(level);
        }
    })?;
    labelled("set-activity", "Activity level", select)
}

fn render_rate_select(vm: &SettingsViewModel, current: f64) -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?.id("set-rate")?.class("input")?.build();
    for rate in WEIGHT_LOSS_RATES {
        let option = ElementBuilder::new("option")?
            .attr("value", &rate.to_string())?
            .flag("selected", (rate - current).abs() < f64::EPSILON)?
            .text(&format!("{} lb/week", rate))
            .build();
        select.append_child(&option)?;
    }
    let vm = vm.clone();
    on_select(&select, move |value| {
        if let Ok(rate) = value.parse::<f64>() {
            vm.set_weight_loss_rate(rate);
        }
    })?;
    labelled("set-rate", "Weekly pace", select)
}

fn labelled(id: &str, label: &str, control: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("field")?
        .child(ElementBuilder::new("label")?.attr("for", id)?.text(label).build())?
        .child(control)?
        .build())
}
