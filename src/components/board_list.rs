//! Board List Page
//!
//! `/boards`: every board with its server-reported task count.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::{board_path, LoadStatus};
use crate::store::{boards_load_state, use_app_store, AppStateStoreFields};

#[component]
pub fn BoardsPage() -> impl IntoView {
    let store = use_app_store();

    view! {
        <section class="boards-page">
            <h1>"Boards"</h1>

            <Show
                when=move || boards_load_state(&store).is_ready()
                fallback=move || view! {
                    <LoadStatus state=Signal::derive(move || boards_load_state(&store)) what="boards" />
                }
            >
                {move || if store.boards().with(Vec::is_empty) {
                    view! { <p class="empty-message">"No boards yet"</p> }.into_any()
                } else {
                    view! {
                        <div class="board-grid">
                            <For
                                each=move || store.boards().get()
                                key=|board| (board.id, board.task_count, board.name.clone())
                                children=move |board| {
                                    view! {
                                        <A href=board_path(board.id)>
                                            <div class="board-tile">
                                                <h2>{board.name.clone()}</h2>
                                                <p class="board-description">{board.description.clone()}</p>
                                                <span class="board-count">
                                                    {format!("{} tasks", board.task_count)}
                                                </span>
                                            </div>
                                        </A>
                                    }
                                }
                            />
                        </div>
                    }.into_any()
                }}
            </Show>
        </section>
    }
}
