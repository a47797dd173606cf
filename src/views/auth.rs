// ============================================================================
// AUTH VIEW - Login / registro
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_submit, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::{AuthField, AuthMode, AuthViewModel};
use crate::views::widgets::{button, error_text, text_field};

pub fn render_auth(state: &AppState, vm: &AuthViewModel) -> Result<Element, JsValue> {
    let mode = vm.mode();
    let form_state = vm.form();
    let registering = mode == AuthMode::Register;

    let header = ElementBuilder::new("div")?
        .class("auth-header")?
        .child(ElementBuilder::new("div")?.class("auth-logo")?.text("🥗").build())?
        .child(
            ElementBuilder::new("h1")?
                .text(if registering { "Create your account" } else { "Welcome back" })
                .build(),
        )?
        .child(
            ElementBuilder::new("p")?
                .text("Track meals, water and weight in one place")
                .build(),
        )?
        .build();

    let form = ElementBuilder::new("form")?.class("auth-form")?.build();
    form.set_attribute("novalidate", "")?;

    let field = |id: &str, label: &str, input_type: &str, value: &str, which: AuthField| {
        let vm = vm.clone();
        text_field(id, label, input_type, value, move |value| vm.set_field(which, &value))
    };

    if registering {
        form.append_child(&field("auth-name", "Name", "text", &form_state.name, AuthField::Name)?)?;
    }
    form.append_child(&field("auth-email", "Email", "email", &form_state.email, AuthField::Email)?)?;
    form.append_child(&field(
        "auth-password",
        "Password",
        "password",
        &form_state.password,
        AuthField::Password,
    )?)?;
    if registering {
        form.append_child(&field(
            "auth-confirm",
            "Confirm password",
            "password",
            &form_state.confirm_password,
            AuthField::ConfirmPassword,
        )?)?;
    }
    if let Some(error) = error_text(vm.error().as_deref())? {
        form.append_child(&error)?;
    }

    let submit_label = match (registering, vm.is_submitting()) {
        (_, true) => "Please wait...",
        (true, false) => "Create account",
        (false, false) => "Log in",
    };
    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary btn-block")?
        .attr("type", "submit")?
        .flag("disabled", vm.is_submitting())?
        .text(submit_label)
        .build();
    form.append_child(&submit)?;

    {
        let vm = vm.clone();
        let state = state.clone();
        on_submit(&form, move || {
            let vm = vm.clone();
            state.spawn(async move {
                let _ = vm.submit().await;
            });
        })?;
    }

    let toggle = {
        let vm = vm.clone();
        button(
            if registering {
                "Already have an account? Log in"
            } else {
                "New here? Create an account"
            },
            "btn btn-link",
            vm.is_submitting(),
            move || vm.toggle_mode(),
        )?
    };

    Ok(ElementBuilder::new("main")?
        .class("auth-screen")?
        .child(
            ElementBuilder::new("div")?
                .class("auth-card")?
                .child(header)?
                .child(form)?
                .child(toggle)?
                .build(),
        )?
        .build())
}
