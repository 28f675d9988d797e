//! Toast Host Component
//!
//! Renders the toast queue. Each toast schedules its own dismissal when it
//! is first rendered.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::store::{store_dismiss_toast, use_app_store, AppStateStoreFields};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_store();
    let ctx = expect_context::<AppContext>();

    view! {
        <div class="toast-host" role="status" aria-live="polite">
            <For
                each=move || store.toasts().with(|q| q.items().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let timeout = ctx.toast_timeout_ms;
                    spawn_local(async move {
                        TimeoutFuture::new(timeout).await;
                        store_dismiss_toast(&store, id);
                    });
                    view! {
                        <div class=toast.kind.class() on:click=move |_| store_dismiss_toast(&store, id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
