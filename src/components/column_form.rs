//! Column Form Component
//!
//! Inline form at the end of the board for adding a column.

use leptos::prelude::*;

use crate::actions::BoardActions;
use crate::validation::validate_column_title;

#[component]
pub fn ColumnForm() -> impl IntoView {
    let actions = expect_context::<BoardActions>();
    let (title, set_title) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match validate_column_title(&title.get_untracked()) {
            Ok(valid) => {
                set_error.set(None);
                set_title.set(String::new());
                actions.create_column(valid);
            }
            Err(errors) => set_error.set(errors.first().map(str::to_string)),
        }
    };

    view! {
        <form class="column-form" on:submit=submit>
            <input
                type="text"
                placeholder="Add column…"
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <button type="submit">"Add"</button>
            {move || error.get().map(|m| view! { <span class="field-error">{m}</span> })}
        </form>
    }
}
