//! Freelance Board App
//!
//! Root component: provides the store, the board actions and the UI
//! context, keeps the route in sync with the location hash and renders the
//! screen the route guard allows.

use leptos::ev;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::actions::BoardActions;
use crate::api::{ApiClient, AuthApi};
use crate::components::{BoardList, BoardView, EditTarget, LoginForm, ToastHost};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::session::Route;
use crate::store::{AppState, AppStateStoreFields};

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

fn set_hash(hash: &str) {
    if current_hash() == hash {
        return;
    }
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(hash);
    }
}

#[component]
pub fn App(config: AppConfig, api: ApiClient) -> impl IntoView {
    let store = Store::new(AppState::new(Route::Login, api.is_signed_in()));
    provide_context(store);

    let actions = BoardActions::new(store, api);
    provide_context(actions);

    let (editing, set_editing) = signal::<Option<EditTarget>>(None);
    provide_context(AppContext::new((editing, set_editing), config.toast_timeout_ms));

    actions.navigate(Route::from_hash(&current_hash()));

    // Route -> location hash
    Effect::new(move |_| {
        let hash = store.route().with(Route::to_hash);
        set_hash(&hash);
    });

    // Location hash -> route (back/forward, edited URL)
    let hash_listener = window_event_listener(ev::hashchange, move |_| {
        actions.navigate(Route::from_hash(&current_hash()));
    });
    on_cleanup(move || hash_listener.remove());

    // Leaving a board closes its modal
    Effect::new(move |_| {
        if !matches!(store.route().get(), Route::Board(_)) {
            set_editing.set(None);
        }
    });

    view! {
        <div class="app-layout">
            {move || match store.route().get() {
                Route::Login => view! { <LoginForm /> }.into_any(),
                Route::Boards => view! { <BoardList /> }.into_any(),
                Route::Board(board_id) => view! { <BoardView board_id=board_id /> }.into_any(),
            }}
            <ToastHost />
        </div>
    }
}
