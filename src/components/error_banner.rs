//! Error Banner Component
//!
//! Page-level message for failed remote calls.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <Show when=move || ctx.error.get().is_some()>
            <div class="error-banner" role="alert">
                <span class="error-text">{move || ctx.error.get().unwrap_or_default()}</span>
                <button class="error-dismiss" on:click=move |_| ctx.clear_error()>"×"</button>
            </div>
        </Show>
    }
}
