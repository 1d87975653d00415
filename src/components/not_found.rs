//! Not Found Page

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"Page not found"</h1>
            <p>"Nothing lives at this address."</p>
            <A href="/boards">"Back to boards"</A>
        </section>
    }
}
