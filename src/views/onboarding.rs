// ============================================================================
// ONBOARDING VIEW - Wizard de 5 pasos
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::{ActivityLevel, Gender, UnitSystem};
use crate::state::AppState;
use crate::utils::units::{format_height, format_weight, weight_unit_label};
use crate::viewmodels::onboarding_viewmodel::{OnboardingForm, WEIGHT_LOSS_RATES};
use crate::viewmodels::{OnboardingField, OnboardingStep, OnboardingViewModel};
use crate::views::widgets::{button, chip, error_text, text_field};

pub fn render_onboarding(state: &AppState, vm: &OnboardingViewModel) -> Result<Element, JsValue> {
    let step = vm.step();
    let form = vm.form();

    let progress = ElementBuilder::new("div")?.class("wizard-progress")?.build();
    for candidate in OnboardingStep::ALL {
        let class = if candidate.index() <= step.index() {
            "wizard-dot wizard-dot-done"
        } else {
            "wizard-dot"
        };
        progress.append_child(&ElementBuilder::new("span")?.class(class)?.build())?;
    }

    let body = match step {
        OnboardingStep::Basics => render_basics(vm, &form)?,
        OnboardingStep::Body => render_body(vm, &form)?,
        OnboardingStep::Goal => render_goal(vm, &form)?,
        OnboardingStep::Activity => render_activity(vm, &form)?,
        OnboardingStep::Review => render_review(&form)?,
    };

    let actions = ElementBuilder::new("div")?.class("wizard-actions")?.build();
    if step != OnboardingStep::Basics {
        let vm = vm.clone();
        actions.append_child(&button("Back", "btn btn-secondary", false, move || vm.back())?)?;
    }
    let primary = if step == OnboardingStep::Review {
        let vm = vm.clone();
        let state = state.clone();
        let label = if vm.is_submitting() { "Saving..." } else { "Start my plan" };
        button(label, "btn btn-primary", vm.is_submitting(), move || {
            let vm = vm.clone();
            state.spawn(async move {
                let _ = vm.submit().await;
            });
        })?
    } else {
        let vm = vm.clone();
        button("Continue", "btn btn-primary", false, move || {
            let _ = vm.next();
        })?
    };
    actions.append_child(&primary)?;

    let card = ElementBuilder::new("section")?
        .class("wizard-card")?
        .child(progress)?
        .child(ElementBuilder::new("h2")?.text(step.title()).build())?
        .child(body)?
        .build();
    if let Some(error) = error_text(vm.error().as_deref())? {
        card.append_child(&error)?;
    }
    card.append_child(&actions)?;

    Ok(ElementBuilder::new("main")?
        .class("onboarding-screen")?
        .child(card)?
        .build())
}

fn input(
    vm: &OnboardingViewModel,
    id: &str,
    label: &str,
    value: &str,
    field: OnboardingField,
) -> Result<Element, JsValue> {
    let vm = vm.clone();
    text_field(id, label, "number", value, move |value| vm.set_field(field, &value))
}

fn render_basics(vm: &OnboardingViewModel, form: &OnboardingForm) -> Result<Element, JsValue> {
    let genders = ElementBuilder::new("div")?.class("chip-row")?.build();
    for gender in [Gender::Male, Gender::Female, Gender::Other] {
        let vm = vm.clone();
        genders.append_child(&chip(gender.label(), form.gender == Some(gender), move || {
            vm.set_gender(gender)
        })?)?;
    }

    Ok(ElementBuilder::new("div")?
        .class("wizard-step")?
        .child(input(vm, "onb-age", "Age", &form.age, OnboardingField::Age)?)?
        .child(ElementBuilder::new("p")?.class("field-label")?.text("Gender").build())?
        .child(genders)?
        .build())
}

fn render_body(vm: &OnboardingViewModel, form: &OnboardingForm) -> Result<Element, JsValue> {
    let units = ElementBuilder::new("div")?.class("chip-row")?.build();
    for (label, system) in [("lb / ft", UnitSystem::Imperial), ("kg / cm", UnitSystem::Metric)] {
        let vm = vm.clone();
        units.append_child(&chip(label, form.units == system, move || vm.set_units(system))?)?;
    }

    let step = ElementBuilder::new("div")?
        .class("wizard-step")?
        .child(units)?
        .build();

    match form.units {
        UnitSystem::Metric => {
            step.append_child(&input(vm, "onb-height-cm", "Height (cm)", &form.height_cm, OnboardingField::HeightCm)?)?;
        }
        UnitSystem::Imperial => {
            let row = ElementBuilder::new("div")?
                .class("field-row")?
                .child(input(vm, "onb-height-ft", "Height (ft)", &form.height_ft, OnboardingField::HeightFt)?)?
                .child(input(vm, "onb-height-in", "(in)", &form.height_in, OnboardingField::HeightIn)?)?
                .build();
            step.append_child(&row)?;
        }
    }
    let label = format!("Current weight ({})", weight_unit_label(form.units));
    step.append_child(&input(vm, "onb-weight", &label, &form.current_weight, OnboardingField::CurrentWeight)?)?;
    Ok(step)
}

fn render_goal(vm: &OnboardingViewModel, form: &OnboardingForm) -> Result<Element, JsValue> {
    let label = format!("Goal weight ({})", weight_unit_label(form.units));
    let rates = ElementBuilder::new("div")?.class("chip-row")?.build();
    for rate in WEIGHT_LOSS_RATES {
        let vm = vm.clone();
        let selected = (form.weight_loss_rate - rate).abs() < f64::EPSILON;
        rates.append_child(&chip(&format!("{} lb/week", rate), selected, move || {
            vm.set_weight_loss_rate(rate)
        })?)?;
    }

    Ok(ElementBuilder::new("div")?
        .class("wizard-step")?
        .child(input(vm, "onb-goal", &label, &form.goal_weight, OnboardingField::GoalWeight)?)?
        .child(ElementBuilder::new("p")?.class("field-label")?.text("Weekly pace").build())?
        .child(rates)?
        .build())
}

fn render_activity(vm: &OnboardingViewModel, form: &OnboardingForm) -> Result<Element, JsValue> {
    let list = ElementBuilder::new("div")?.class("option-list")?.build();
    for level in ActivityLevel::ALL {
        let vm = vm.clone();
        list.append_child(&chip(level.label(), form.activity_level == level, move || {
            vm.set_activity_level(level)
        })?)?;
    }
    Ok(list)
}

fn render_review(form: &OnboardingForm) -> Result<Element, JsValue> {
    let list = ElementBuilder::new("dl")?.class("review-list")?.build();
    let mut rows = vec![
        ("Age", form.age.clone()),
        ("Gender", form.gender.map(|g| g.label().to_string()).unwrap_or_default()),
        ("Activity", form.activity_level.label().to_string()),
        ("Pace", format!("{} lb/week", form.weight_loss_rate)),
    ];
    // Valores ya validados en pasos anteriores: se muestran normalizados
    if let Ok(update) = form.to_update() {
        if let Some(cm) = update.height_cm {
            rows.push(("Height", format_height(cm, form.units)));
        }
        if let Some(kg) = update.current_weight {
            rows.push(("Current weight", format_weight(kg, form.units)));
        }
        if let Some(kg) = update.goal_weight {
            rows.push(("Goal weight", format_weight(kg, form.units)));
        }
    }
    for (term, value) in rows {
        list.append_child(&ElementBuilder::new("dt")?.text(term).build())?;
        list.append_child(&ElementBuilder::new("dd")?.text(&value).build())?;
    }
    Ok(list)
}
