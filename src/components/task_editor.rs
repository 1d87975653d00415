//! Task Editor Modal
//!
//! Create and edit form for tasks. The create form writes through to the
//! persisted draft on every keystroke; the edit form works on a local copy.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::api::TaskBackend;
use crate::components::{board_path, AssigneeAutocomplete, EditTarget, PrioritySelector};
use crate::context::use_app_context;
use crate::draft::{DraftPatch, TaskDraft};
use crate::markdown::parse_markdown;
use crate::models::{Priority, Task, TaskStatus};
use crate::query::QueryKey;
use crate::store::{store_upsert_task, use_app_store, AppStateStoreFields};

/// Modal host: renders the editor while a target is set
#[component]
pub fn TaskEditor() -> impl IntoView {
    let ctx = use_app_context();
    move || ctx.editing.get().map(|target| view! { <TaskEditorModal target=target /> })
}

#[component]
fn TaskEditorModal(target: EditTarget) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let navigate = use_navigate();
    let heading = target.title();
    let linked_board = target.board_id();
    let editing_task = StoredValue::new(match &target {
        EditTarget::Edit(task) => Some(task.clone()),
        EditTarget::Create { .. } => None,
    });
    let is_create = editing_task.with_value(Option::is_none);

    let local = RwSignal::new(match &target {
        EditTarget::Edit(task) => TaskDraft::from_task(task),
        EditTarget::Create { .. } => TaskDraft::default(),
    });
    if let EditTarget::Create { board_id: Some(board_id) } = target {
        ctx.update_draft(DraftPatch::board(Some(board_id)));
    }

    let draft = Signal::derive(move || if is_create { ctx.draft() } else { local.get() });
    let update = move |patch: DraftPatch| {
        if is_create {
            ctx.update_draft(patch);
        } else {
            local.update(|d| d.merge(patch));
        }
    };

    let (submitting, set_submitting) = signal(false);
    let (form_error, set_form_error) = signal(None::<String>);
    let (preview, set_preview) = signal(false);

    let finish = move |task: Task| {
        log::info!("saved task {} on board {}", task.id, task.board_id);
        store_upsert_task(&store, task);
        if is_create {
            ctx.reset_draft();
        }
        // Counts per board can change too
        ctx.cache.invalidate(QueryKey::Tasks);
        ctx.cache.invalidate(QueryKey::Boards);
        ctx.close_editor();
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let users = store.users().get_untracked();
        let values = draft.get_untracked();
        let api = ctx.api();

        match editing_task.get_value() {
            None => {
                let body = match values.to_new_task(&users) {
                    Ok(body) => body,
                    Err(e) => return set_form_error.set(Some(e.to_string())),
                };
                set_form_error.set(None);
                set_submitting.set(true);
                spawn_local(async move {
                    match api.create_task(&body).await {
                        Ok(task) => finish(task),
                        Err(e) => {
                            let _ = set_submitting.try_set(false);
                            ctx.report_error(format!("Could not create task: {}", e));
                        }
                    }
                });
            }
            Some(original) => {
                let task = match values.apply_to(&original, &users) {
                    Ok(task) => task,
                    Err(e) => return set_form_error.set(Some(e.to_string())),
                };
                set_form_error.set(None);
                set_submitting.set(true);
                spawn_local(async move {
                    match api.update_task(&task).await {
                        Ok(saved) => finish(saved),
                        Err(e) => {
                            let _ = set_submitting.try_set(false);
                            ctx.report_error(format!("Could not update task: {}", e));
                        }
                    }
                });
            }
        }
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| ctx.close_editor()>
            <form
                class="task-editor"
                on:click=move |ev| ev.stop_propagation()
                on:submit=on_submit
            >
                <div class="task-editor-header">
                    <h2>{heading}</h2>
                    <button type="button" class="close-btn" on:click=move |_| ctx.close_editor()>"×"</button>
                </div>

                <label class="field">
                    <span>"Title"</span>
                    <input
                        type="text"
                        placeholder="What needs doing?"
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| update(DraftPatch::title(event_target_value(&ev)))
                    />
                </label>

                <div class="field">
                    <div class="field-label-row">
                        <span>"Description"</span>
                        <button type="button" class="preview-toggle" on:click=move |_| set_preview.update(|p| *p = !*p)>
                            {move || if preview.get() { "Edit" } else { "Preview" }}
                        </button>
                    </div>
                    {move || if preview.get() {
                        view! {
                            <div class="markdown-preview" inner_html=move || draft.with(|d| parse_markdown(&d.description))></div>
                        }.into_any()
                    } else {
                        view! {
                            <textarea
                                rows="6"
                                placeholder="Markdown supported"
                                prop:value=move || draft.with(|d| d.description.clone())
                                on:input=move |ev| update(DraftPatch::description(event_target_value(&ev)))
                            />
                        }.into_any()
                    }}
                </div>

                <div class="field-row">
                    <label class="field">
                        <span>"Status"</span>
                        <select
                            prop:value=move || draft.with(|d| d.status.as_str().to_string())
                            on:change=move |ev| {
                                if let Some(status) = TaskStatus::from_str(&event_target_value(&ev)) {
                                    update(DraftPatch::status(status));
                                }
                            }
                        >
                            {TaskStatus::ALL.into_iter().map(|status| view! {
                                <option value=status.as_str()>{status.label()}</option>
                            }).collect_view()}
                        </select>
                    </label>

                    <label class="field">
                        <span>"Board"</span>
                        <select
                            prop:value=move || draft.with(|d| d.board_id.map(|id| id.to_string()).unwrap_or_default())
                            on:change=move |ev| update(DraftPatch::board(event_target_value(&ev).parse::<u32>().ok()))
                        >
                            <option value="">"Choose a board"</option>
                            <For
                                each=move || store.boards().get()
                                key=|board| board.id
                                children=move |board| view! {
                                    <option value=board.id.to_string()>{board.name}</option>
                                }
                            />
                        </select>
                    </label>
                </div>

                <div class="field">
                    <span>"Priority"</span>
                    <PrioritySelector
                        current=Signal::derive(move || draft.with(|d| d.priority))
                        on_change=move |priority: Priority| update(DraftPatch::priority(priority))
                    />
                </div>

                <div class="field">
                    <span>"Assignee"</span>
                    <AssigneeAutocomplete
                        users=Signal::derive(move || store.users().get())
                        value=Signal::derive(move || draft.with(|d| d.assignee.clone()))
                        on_change=move |name: String| update(DraftPatch::assignee(name))
                    />
                </div>

                {move || form_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

                <div class="task-editor-actions">
                    {linked_board.map(|board_id| view! {
                        <button
                            type="button"
                            class="go-to-board-btn"
                            on:click=move |_| {
                                ctx.close_editor();
                                navigate(&board_path(board_id), NavigateOptions::default());
                            }
                        >
                            "Go to board"
                        </button>
                    })}
                    {is_create.then(|| view! {
                        <button type="button" class="discard-btn" on:click=move |_| ctx.reset_draft()>
                            "Discard draft"
                        </button>
                    })}
                    <button type="button" class="cancel-btn" on:click=move |_| ctx.close_editor()>"Cancel"</button>
                    <button type="submit" class="save-btn" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Saving..." } else if is_create { "Create" } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
