//! Navigation Bar Component
//!
//! Top bar linking the board list and the all-tasks page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::EditTarget;
use crate::context::use_app_context;

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="nav-bar">
            <span class="nav-brand">"Kanban"</span>
            <A href="/boards">"Boards"</A>
            <A href="/tasks">"All tasks"</A>
            <button
                class="nav-new-task"
                on:click=move |_| ctx.open_editor(EditTarget::Create { board_id: None })
            >
                "+ New task"
            </button>
        </nav>
    }
}
