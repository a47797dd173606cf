// ============================================================================
// ADD FOOD VIEW - Buscador, recientes, detalle y quick add
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_input, ElementBuilder};
use crate::models::{Food, MealType};
use crate::state::AppState;
use crate::viewmodels::{CustomFoodField, FoodSearchViewModel};
use crate::views::widgets::{button, chip, error_text, text_field};

pub fn render_add_food(state: &AppState, vm: &FoodSearchViewModel) -> Result<Element, JsValue> {
    let page = ElementBuilder::new("main")?
        .class("page add-food")?
        .child(ElementBuilder::new("h1")?.class("page-title")?.text("Add food").build())?
        .child(render_meal_picker(vm)?)?
        .build();

    if let Some(food) = vm.selected() {
        page.append_child(&render_selected(state, vm, &food)?)?;
        return Ok(page);
    }

    page.append_child(&render_search_box(vm)?)?;

    let query = vm.query();
    if query.trim().is_empty() {
        page.append_child(&render_recent(state, vm)?)?;
        page.append_child(&render_quick_add(state, vm)?)?;
    } else {
        page.append_child(&render_results(vm)?)?;
    }
    Ok(page)
}

fn render_meal_picker(vm: &FoodSearchViewModel) -> Result<Element, JsValue> {
    let row = ElementBuilder::new("div")?.class("chip-row")?.build();
    for meal in MealType::ALL {
        let vm = vm.clone();
        row.append_child(&chip(meal.label(), vm.meal() == meal, move || vm.set_meal(meal))?)?;
    }
    Ok(row)
}

fn render_search_box(vm: &FoodSearchViewModel) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .id("food-search")?
        .class("input search-input")?
        .attr("type", "search")?
        .attr("placeholder", "Search foods...")?
        .attr("autocomplete", "off")?
        .attr("value", &vm.query())?
        .build();
    {
        let vm = vm.clone();
        on_input(&input, move |value| vm.set_query(&value))?;
    }
    Ok(input)
}

fn render_results(vm: &FoodSearchViewModel) -> Result<Element, JsValue> {
    let results = vm.results();
    let list = ElementBuilder::new("ul")?.class("food-results")?.build();

    if results.is_empty() {
        let message = if vm.is_searching() { "Searching..." } else { "No foods found" };
        list.append_child(&ElementBuilder::new("li")?.class("empty")?.text(message).build())?;
        return Ok(list);
    }

    for food in results {
        let detail = format!("{} · {:.0} kcal", food.serving, food.calories);
        let name = food.name.clone();
        let vm = vm.clone();
        let item = ElementBuilder::new("li")?
            .class("food-result")?
            .child(ElementBuilder::new("strong")?.text(&name).build())?
            .child(ElementBuilder::new("small")?.text(&detail).build())?
            .on_click(move |_| vm.select(food.clone()))?
            .build();
        list.append_child(&item)?;
    }
    Ok(list)
}

fn render_recent(state: &AppState, vm: &FoodSearchViewModel) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?
        .class("card recent-foods")?
        .child(ElementBuilder::new("h2")?.text("Recent").build())?
        .build();

    let recent = vm.recent();
    if recent.is_empty() {
        section.append_child(
            &ElementBuilder::new("p")?
                .class("empty")?
                .text("Foods you log will show up here")
                .build(),
        )?;
        return Ok(section);
    }

    for item in recent {
        let label = format!("{} · {:.0} kcal", item.food_name, item.calories);
        let vm = vm.clone();
        let state = state.clone();
        section.append_child(&button(&label, "recent-item", vm.is_saving(), move || {
            let vm = vm.clone();
            let item = item.clone();
            state.spawn(async move {
                let _ = vm.log_recent(&item).await;
            });
        })?)?;
    }
    Ok(section)
}

fn render_selected(state: &AppState, vm: &FoodSearchViewModel, food: &Food) -> Result<Element, JsValue> {
    let totals = format!(
        "Per serving: {:.0} kcal · P {:.1} g · C {:.1} g · F {:.1} g",
        food.calories, food.protein, food.carbs, food.fat
    );

    let quantity_field = {
        let vm = vm.clone();
        text_field(
            "food-quantity",
            &format!("Servings ({})", food.serving),
            "number",
            &vm.quantity_input(),
            move |value| {
                // El error queda en el ViewModel y se muestra bajo el campo
                let _ = vm.set_quantity(&value);
            },
        )?
    };

    let cancel = {
        let vm = vm.clone();
        button("Cancel", "btn btn-secondary", false, move || vm.clear_selection())?
    };
    let add = {
        let vm = vm.clone();
        let state = state.clone();
        let label = format!("Add to {}", vm.meal().label());
        button(&label, "btn btn-primary", vm.is_saving(), move || {
            let vm = vm.clone();
            state.spawn(async move {
                let _ = vm.log_selected().await;
            });
        })?
    };

    let section = ElementBuilder::new("section")?
        .class("card food-detail")?
        .child(ElementBuilder::new("h2")?.text(&food.name).build())?
        .child(ElementBuilder::new("p")?.class("food-totals")?.text(&totals).build())?
        .child(quantity_field)?
        .build();
    if let Some(error) = error_text(vm.quantity_error().as_deref())? {
        section.append_child(&error)?;
    }
    let actions = ElementBuilder::new("div")?
        .class("form-actions")?
        .child(cancel)?
        .child(add)?
        .build();
    section.append_child(&actions)?;
    Ok(section)
}

fn render_quick_add(state: &AppState, vm: &FoodSearchViewModel) -> Result<Element, JsValue> {
    let form = vm.custom_form();
    let field = |id: &str, label: &str, input_type: &str, value: &str, which: CustomFoodField| {
        let vm = vm.clone();
        text_field(id, label, input_type, value, move |value| vm.set_custom_field(which, &value))
    };

    let save = {
        let vm = vm.clone();
        let state = state.clone();
        button("Quick add", "btn btn-primary", vm.is_saving(), move || {
            let vm = vm.clone();
            state.spawn(async move {
                let _ = vm.add_custom_food().await;
            });
        })?
    };

    Ok(ElementBuilder::new("section")?
        .class("card quick-add")?
        .child(ElementBuilder::new("h2")?.text("Quick add").build())?
        .child(field("qa-name", "Name", "text", &form.name, CustomFoodField::Name)?)?
        .child(field("qa-calories", "Calories", "number", &form.calories, CustomFoodField::Calories)?)?
        .child(
            ElementBuilder::new("div")?
                .class("field-row")?
                .child(field("qa-protein", "Protein (g)", "number", &form.protein, CustomFoodField::Protein)?)?
                .child(field("qa-carbs", "Carbs (g)", "number", &form.carbs, CustomFoodField::Carbs)?)?
                .child(field("qa-fat", "Fat (g)", "number", &form.fat, CustomFoodField::Fat)?)?
                .build(),
        )?
        .child(field("qa-serving", "Serving", "text", &form.serving, CustomFoodField::Serving)?)?
        .child(save)?
        .build())
}
