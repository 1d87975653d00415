//! All Tasks Page
//!
//! `/tasks`: every task in one table, narrowed by status, board, title and
//! assignee filters. Picking a row jumps to its board and opens the task.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::components::{board_path, AssigneeBadge, LoadStatus};
use crate::context::use_app_context;
use crate::filter::TaskFilter;
use crate::models::TaskStatus;
use crate::store::{board_name, tasks_load_state, use_app_store, AppStateStoreFields};

/// Empty select value meaning "any"
const ANY: &str = "";

fn optional_text(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

#[component]
fn FilterBar(filter: RwSignal<TaskFilter>) -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="filter-bar">
            <select
                class="filter-status"
                on:change=move |ev| {
                    let status = TaskStatus::from_str(&event_target_value(&ev));
                    filter.update(|f| f.status = status);
                }
                prop:value=move || filter.with(|f| f.status.map(|s| s.as_str()).unwrap_or(ANY).to_string())
            >
                <option value=ANY>"Any status"</option>
                {TaskStatus::ALL.into_iter().map(|status| view! {
                    <option value=status.as_str()>{status.label()}</option>
                }).collect_view()}
            </select>

            <select
                class="filter-board"
                on:change=move |ev| {
                    let board_id = event_target_value(&ev).parse::<u32>().ok();
                    filter.update(|f| f.board_id = board_id);
                }
                prop:value=move || filter.with(|f| f.board_id.map(|id| id.to_string()).unwrap_or_default())
            >
                <option value=ANY>"Any board"</option>
                <For
                    each=move || store.boards().get()
                    key=|board| board.id
                    children=move |board| view! {
                        <option value=board.id.to_string()>{board.name}</option>
                    }
                />
            </select>

            <input
                type="search"
                class="filter-title"
                placeholder="Search title..."
                prop:value=move || filter.with(|f| f.title.clone().unwrap_or_default())
                on:input=move |ev| {
                    let title = optional_text(event_target_value(&ev));
                    filter.update(|f| f.title = title);
                }
            />

            <input
                type="search"
                class="filter-assignee"
                placeholder="Search assignee..."
                prop:value=move || filter.with(|f| f.assignee.clone().unwrap_or_default())
                on:input=move |ev| {
                    let assignee = optional_text(event_target_value(&ev));
                    filter.update(|f| f.assignee = assignee);
                }
            />

            <button
                class="filter-clear"
                disabled=move || filter.with(TaskFilter::is_empty)
                on:click=move |_| filter.set(TaskFilter::default())
            >
                "Clear"
            </button>
        </div>
    }
}

#[component]
pub fn TasksPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let navigate = use_navigate();

    let filter = RwSignal::new(TaskFilter::default());
    let visible = Memo::new(move |_| {
        let tasks = store.tasks().get();
        filter.with(|f| f.apply(&tasks))
    });

    let open_task = move |task_id: u32, board_id: u32| {
        ctx.hint_open_task(task_id);
        navigate(&board_path(board_id), NavigateOptions::default());
    };

    view! {
        <section class="tasks-page">
            <h1>"All tasks"</h1>
            <FilterBar filter=filter />

            <Show
                when=move || tasks_load_state(&store).is_ready()
                fallback=move || view! {
                    <LoadStatus state=Signal::derive(move || tasks_load_state(&store)) what="tasks" />
                }
            >
                <p class="result-count">
                    {move || format!("{} of {} tasks", visible.with(Vec::len), store.tasks().with(Vec::len))}
                </p>
                <table class="task-table">
                    <thead>
                        <tr>
                            <th>"#"</th>
                            <th>"Title"</th>
                            <th>"Status"</th>
                            <th>"Priority"</th>
                            <th>"Board"</th>
                            <th>"Assignee"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || visible.get()
                            key=|task| (task.id, task.title.clone(), task.status, task.priority, task.board_id, task.assignee.as_ref().map(|u| u.full_name.clone()))
                            children={
                                let open_task = open_task.clone();
                                move |task| {
                                    let open_task = open_task.clone();
                                    let (task_id, board_id) = (task.id, task.board_id);
                                    let board = move || store.boards().with(|boards| board_name(boards, board_id));
                                    view! {
                                        <tr class="task-row" on:click=move |_| open_task(task_id, board_id)>
                                            <td>{task.id}</td>
                                            <td>{task.title.clone()}</td>
                                            <td>{task.status.label()}</td>
                                            <td>{task.priority.as_str()}</td>
                                            <td>{board}</td>
                                            <td><AssigneeBadge user=task.assignee.clone() /></td>
                                        </tr>
                                    }
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || visible.with(Vec::is_empty)>
                    <p class="empty-message">"No tasks match these filters"</p>
                </Show>
            </Show>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_means_no_filter() {
        assert_eq!(optional_text("  ".into()), None);
        assert_eq!(optional_text("ana".into()), Some("ana".into()));
    }
}
