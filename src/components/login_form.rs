//! Login Form Component

use leptos::prelude::*;

use crate::actions::BoardActions;
use crate::validation::{validate_login, FieldErrors};

#[component]
pub fn LoginForm() -> impl IntoView {
    let actions = expect_context::<BoardActions>();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let errors = RwSignal::new(FieldErrors::default());
    let (failure, set_failure) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_failure.set(None);
        match validate_login(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => {
                errors.set(FieldErrors::default());
                set_submitting.set(true);
                actions.login(credentials, move |message| {
                    set_submitting.set(false);
                    set_failure.set(Some(message));
                });
            }
            Err(field_errors) => errors.set(field_errors),
        }
    };

    let field_error = move |field: &'static str| {
        move || errors.with(|e| e.get(field).map(|m| view! { <span class="field-error">{m.to_string()}</span> }))
    };

    view! {
        <div class="login-screen">
            <form class="login-form" on:submit=on_submit novalidate=true>
                <h1>"Sign in"</h1>
                <label>
                    "Email"
                    <input
                        type="email"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                {field_error("email")}
                <label>
                    "Password"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                {field_error("password")}
                {move || failure.get().map(|m| view! { <p class="form-error">{m}</p> })}
                <button type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in…" } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
