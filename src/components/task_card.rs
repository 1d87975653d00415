//! Task Card Component
//!
//! A single card in a status column.

use leptos::prelude::*;

use crate::markdown::summary_line;
use crate::models::{Task, User};

/// Initials shown when a user has no avatar image
fn initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[component]
pub fn AssigneeBadge(user: Option<User>) -> impl IntoView {
    match user {
        Some(user) if !user.avatar_url.is_empty() => view! {
            <img class="assignee-avatar" src=user.avatar_url title=user.full_name.clone() alt=user.full_name />
        }.into_any(),
        Some(user) => view! {
            <span class="assignee-initials" title=user.full_name.clone()>{initials(&user.full_name)}</span>
        }.into_any(),
        None => view! { <span class="assignee-none">"Unassigned"</span> }.into_any(),
    }
}

/// Card body; drag handling lives on the wrapper in the column
#[component]
pub fn TaskCard(
    task: Task,
    /// Update sent, waiting for the server
    #[prop(into)] pending: Signal<bool>,
) -> impl IntoView {
    let priority_class = format!("priority-tag priority-{}", task.priority.as_str().to_lowercase());
    let summary = summary_line(&task.description, 80);

    view! {
        <div class=move || if pending.get() { "task-card pending" } else { "task-card" }>
            <div class="task-card-header">
                <span class="task-card-id">{format!("#{}", task.id)}</span>
                <span class=priority_class>{task.priority.as_str()}</span>
            </div>
            <div class="task-card-title">{task.title.clone()}</div>
            {(!summary.is_empty()).then(|| view! { <div class="task-card-summary">{summary}</div> })}
            <div class="task-card-footer">
                <AssigneeBadge user=task.assignee.clone() />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_use_first_two_words() {
        assert_eq!(initials("ana maria lima"), "AM");
        assert_eq!(initials("Bo"), "B");
        assert_eq!(initials(""), "");
    }
}
