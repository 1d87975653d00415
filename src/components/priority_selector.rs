//! Priority Selector Component
//!
//! Reusable task priority buttons.

use leptos::prelude::*;

use crate::models::Priority;

/// Priority buttons for the task editor
#[component]
pub fn PrioritySelector(
    #[prop(into)] current: Signal<Priority>,
    on_change: impl Fn(Priority) + Copy + 'static,
) -> impl IntoView {
    view! {
        <div class="priority-selector">
            {Priority::ALL.iter().map(|priority| {
                let priority = *priority;
                let is_selected = move || current.get() == priority;
                view! {
                    <button
                        type="button"
                        class=move || {
                            let base = format!("priority-btn priority-{}", priority.as_str().to_lowercase());
                            if is_selected() { format!("{} active", base) } else { base }
                        }
                        on:click=move |_| on_change(priority)
                    >
                        {priority.as_str()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
