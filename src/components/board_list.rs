//! Board List Component
//!
//! Boards visible to the user plus a form to start a new one.

use leptos::prelude::*;

use crate::actions::BoardActions;
use crate::session::Route;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::validation::validate_board_title;

#[component]
pub fn BoardList() -> impl IntoView {
    let store = use_app_store();
    let actions = expect_context::<BoardActions>();

    let (new_title, set_new_title) = signal(String::new());
    let (title_error, set_title_error) = signal::<Option<String>>(None);

    let create_board = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match validate_board_title(&new_title.get_untracked()) {
            Ok(title) => {
                set_title_error.set(None);
                set_new_title.set(String::new());
                actions.create_board(title);
            }
            Err(errors) => set_title_error.set(errors.first().map(str::to_string)),
        }
    };

    view! {
        <div class="board-list-screen">
            <header class="board-header">
                <h1>"Boards"</h1>
                <button type="button" class="link-btn" on:click=move |_| actions.logout()>"Sign out"</button>
            </header>

            <ul class="board-list">
                <For
                    each=move || store.boards().get()
                    key=|board| (board.id.clone(), board.title.clone())
                    children=move |board| {
                        let board_id = board.id.clone();
                        view! {
                            <li>
                                <a
                                    href=Route::Board(board.id.clone()).to_hash()
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        actions.navigate(Route::Board(board_id.clone()));
                                    }
                                >
                                    {board.title}
                                </a>
                            </li>
                        }
                    }
                />
            </ul>
            <Show when=move || store.boards().with(|b| b.is_empty())>
                <p class="empty-hint">"No boards yet."</p>
            </Show>

            <form class="new-board-form" on:submit=create_board>
                <input
                    type="text"
                    placeholder="New board title…"
                    prop:value=move || new_title.get()
                    on:input=move |ev| set_new_title.set(event_target_value(&ev))
                />
                <button type="submit">"Create"</button>
                {move || title_error.get().map(|m| view! { <span class="field-error">{m}</span> })}
            </form>
        </div>
    }
}
