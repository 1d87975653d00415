//! Load Status Component
//!
//! Placeholder shown while a list is loading, or the reason it failed.

use leptos::prelude::*;

use crate::store::LoadState;

#[component]
pub fn LoadStatus(#[prop(into)] state: Signal<LoadState>, what: &'static str) -> impl IntoView {
    move || match state.get() {
        LoadState::Failed(message) => view! {
            <p class="load-error" role="alert">{format!("Error: {}", message)}</p>
        }.into_any(),
        _ => view! { <p class="loading">{format!("Loading {}...", what)}</p> }.into_any(),
    }
}
