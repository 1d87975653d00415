//! Board Page
//!
//! `/boards/{id}`: the board's tasks in status columns with drag-and-drop.
//! Uses leptos-dragdrop with explicit DropZones between cards.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

use crate::board::BoardState;
use crate::components::{EditTarget, LoadStatus, NotFound, TaskCard};
use crate::context::{use_app_context, AppContext};
use crate::drag::{persist_move, DragEvent, DragHandler, Settlement};
use crate::models::TaskStatus;
use crate::query::QueryKey;
use crate::store::{board_name, tasks_load_state, use_app_store, AppStateStoreFields};

use leptos_dragdrop::*;

/// Route of a board page
pub fn board_path(board_id: u32) -> String {
    format!("/boards/{}", board_id)
}

#[component]
pub fn BoardPage() -> impl IntoView {
    let params = use_params_map();
    let board_id = Memo::new(move |_| params.read().get("id").and_then(|id| id.parse::<u32>().ok()));

    move || match board_id.get() {
        Some(id) => view! { <BoardColumns board_id=id /> }.into_any(),
        None => view! { <NotFound /> }.into_any(),
    }
}

/// Wire a finished gesture to the handler and the server
fn on_drag_end(ctx: AppContext, handler: RwSignal<DragHandler>, end: DragEnd) {
    let event = match DragEvent::from_gesture(&end) {
        Ok(event) => event,
        Err(e) => {
            log::warn!("rejected drag of task {}: {}", end.item_id, e);
            return;
        }
    };
    let Some(pending) = handler.try_update(|h| h.handle(event)).flatten() else {
        return;
    };

    let api = ctx.api();
    spawn_local(async move {
        let result = persist_move(&api, &pending).await;
        let settlement = match handler.try_update(|h| h.settle(&pending, &result)) {
            Some(settlement) => settlement,
            // Board page is gone; the list still has to follow a stored move
            None => Settlement::Superseded { saved: result.is_ok() },
        };
        if settlement.needs_refetch() {
            ctx.cache.invalidate(QueryKey::Tasks);
        }
        if let Settlement::RolledBack(e) = settlement {
            ctx.report_error(format!("Could not move \"{}\": {}", pending.task.title, e));
        }
    });
}

#[component]
fn BoardColumns(board_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let handler = RwSignal::new(DragHandler::new(BoardState::new(&[], board_id)));

    // Rebuild from every published task list
    Effect::new(move |_| {
        let tasks = store.tasks().get();
        handler.update(|h| h.reconcile(&tasks));
    });

    // Open the task requested by the previous page, once
    Effect::new(move |_| {
        if !store.tasks_loaded().get() {
            return;
        }
        let Some(task_id) = ctx.take_open_task_hint() else { return };
        let task = store
            .tasks()
            .with_untracked(|tasks| tasks.iter().find(|t| t.id == task_id && t.board_id == board_id).cloned());
        match task {
            Some(task) => ctx.open_editor(EditTarget::Edit(task)),
            None => log::warn!("task {} is not on board {}", task_id, board_id),
        }
    });

    let dnd = create_dnd_signals();
    bind_global_mouseup(dnd, move |end| on_drag_end(ctx, handler, end));

    let title = move || store.boards().with(|boards| board_name(boards, board_id));
    let known = move || !store.boards_loaded().get() || store.boards().with(|b| b.iter().any(|b| b.id == board_id));

    view! {
        <section class="board-page">
            <Show when=known fallback=|| view! { <NotFound /> }>
                <div class="board-header">
                    <h1>{title}</h1>
                    <span class="board-total">{move || format!("{} tasks", handler.with(|h| h.board().len()))}</span>
                    <button
                        class="add-task-btn"
                        on:click=move |_| ctx.open_editor(EditTarget::Create { board_id: Some(board_id) })
                    >
                        "+ Add task"
                    </button>
                </div>

                <Show
                    when=move || tasks_load_state(&store).is_ready()
                    fallback=move || view! {
                        <LoadStatus state=Signal::derive(move || tasks_load_state(&store)) what="tasks" />
                    }
                >
                    <div class=move || if dnd.dragging_read.get().is_some() { "board-columns dragging" } else { "board-columns" }>
                        {TaskStatus::ALL.into_iter().map(|status| view! {
                            <StatusColumn status=status handler=handler dnd=dnd />
                        }).collect_view()}
                    </div>
                </Show>
            </Show>
        </section>
    }
}

/// One status column
#[component]
fn StatusColumn(status: TaskStatus, handler: RwSignal<DragHandler>, dnd: DndSignals) -> impl IntoView {
    let ctx = use_app_context();
    let column = status.column();

    let cards = move || handler.with(|h| h.board().column(status).iter().cloned().enumerate().collect::<Vec<_>>());
    let count = move || handler.with(|h| h.board().column(status).len());

    // Empty space under the last card drops at the end
    let on_tail_mouseenter = move |ev: web_sys::MouseEvent| {
        let len = handler.with_untracked(|h| h.board().column(status).len());
        make_on_slot_mouseenter(dnd, DropSlot::new(column, len))(ev);
    };

    view! {
        <div class=format!("status-column status-{}", status.as_str().to_lowercase()) on:mouseleave=make_on_mouseleave(dnd)>
            <div class="status-column-header">
                <span class="status-column-title">{status.label()}</span>
                <span class="status-column-count">{count}</span>
            </div>

            <DropZone dnd=dnd slot=DropSlot::new(column, 0) />

            <For
                each=cards
                key=|(index, task)| (*index, task.id, task.title.clone(), task.description.clone(), task.priority, task.assignee.as_ref().map(|u| u.full_name.clone()))
                children=move |(index, task)| {
                    let id = task.id;
                    let slot = DropSlot::new(column, index);
                    let pending = Signal::derive(move || handler.with(|h| h.is_pending(id)));

                    let is_dragging = move || dnd.dragging_read.get().map(|s| s.item_id) == Some(id);
                    let card_class = move || {
                        let mut c = String::from("task-card-wrapper");
                        if is_dragging() { c.push_str(" dragging"); }
                        c
                    };

                    let clicked = task.clone();
                    view! {
                        <div
                            class=card_class
                            on:mousedown=make_on_mousedown(dnd, id, slot)
                            on:mouseenter=make_on_slot_mouseenter(dnd, slot)
                            on:click=move |_| {
                                // The mouseup of a drop is followed by a click
                                if !dnd.drag_just_ended_read.get_untracked() {
                                    ctx.open_editor(EditTarget::Edit(clicked.clone()));
                                }
                            }
                        >
                            <TaskCard task=task pending=pending />
                        </div>

                        // Drop zone after this card
                        <DropZone dnd=dnd slot=DropSlot::new(column, index + 1) />
                    }
                }
            />

            <div class="status-column-tail" on:mouseenter=on_tail_mouseenter />
        </div>
    }
}

/// Drop zone component - a horizontal separator for dropping cards
#[component]
pub fn DropZone(dnd: DndSignals, slot: DropSlot) -> impl IntoView {
    let on_mouseenter = make_on_slot_mouseenter(dnd, slot);

    // Is this zone the current drop target?
    let is_active = move || dnd.drop_target_read.get() == Some(slot);

    // Only show when dragging
    let is_dragging = move || dnd.dragging_read.get().is_some();

    let zone_class = move || {
        let mut c = String::from("drop-zone");
        if !is_dragging() { c.push_str(" hidden"); }
        if is_active() { c.push_str(" active"); }
        c
    };

    view! {
        <div class=zone_class on:mouseenter=on_mouseenter />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_routes_carry_the_id() {
        assert_eq!(board_path(12), "/boards/12");
    }
}
