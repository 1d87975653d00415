//! Assignee Autocomplete Component
//!
//! Free-form assignee input with fuzzy suggestions from the user list.
//! Whatever is typed is kept; it is resolved to a user when the form submits.

use leptos::prelude::*;

use crate::models::User;

/// Simple fuzzy match: check if query chars appear in order in the target
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    let mut target_chars = target.chars();
    for query_char in query.chars() {
        loop {
            match target_chars.next() {
                Some(c) if c == query_char => break,
                Some(_) => continue,
                None => return false,
            }
        }
    }
    true
}

/// Up to `limit` users matching `query`, skipping an exact match
pub fn suggest(users: &[User], query: &str, limit: usize) -> Vec<User> {
    let query = query.trim();
    if query.is_empty() {
        return vec![];
    }
    users
        .iter()
        .filter(|u| u.full_name != query && fuzzy_match(query, &u.full_name))
        .take(limit)
        .cloned()
        .collect()
}

/// Assignee input with suggestions
///
/// Props:
/// - users: all known users
/// - value: current input text
/// - on_change: called with the new text on every edit or pick
#[component]
pub fn AssigneeAutocomplete(
    #[prop(into)] users: Signal<Vec<User>>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    let (selected_idx, set_selected_idx) = signal(0usize);

    let suggestions = move || suggest(&users.get(), &value.get(), 5);

    let pick = move |name: String| {
        on_change.run(name);
        set_selected_idx.set(0);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let sugg = suggestions();
        if sugg.is_empty() {
            return;
        }
        match ev.key().as_str() {
            "Tab" | "Enter" => {
                ev.prevent_default();
                if let Some(user) = sugg.get(selected_idx.get()) {
                    pick(user.full_name.clone());
                }
            }
            "ArrowDown" => {
                ev.prevent_default();
                let sel = selected_idx.get();
                if sel + 1 < sugg.len() {
                    set_selected_idx.set(sel + 1);
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                set_selected_idx.update(|sel| *sel = sel.saturating_sub(1));
            }
            _ => {}
        }
    };

    view! {
        <div class="assignee-input-wrapper">
            <input
                type="text"
                placeholder="Assignee name"
                autocomplete="off"
                prop:value=move || value.get()
                on:input=move |ev| {
                    on_change.run(event_target_value(&ev));
                    set_selected_idx.set(0);
                }
                on:keydown=on_keydown
            />

            {move || {
                let sugg = suggestions();
                if sugg.is_empty() {
                    view! { <div></div> }.into_any()
                } else {
                    let selected = selected_idx.get();
                    view! {
                        <div class="autocomplete-list">
                            {sugg.into_iter().enumerate().map(|(i, user)| {
                                let name = user.full_name.clone();
                                view! {
                                    <button
                                        type="button"
                                        class=if i == selected { "autocomplete-item selected" } else { "autocomplete-item" }
                                        on:click=move |ev| {
                                            ev.prevent_default();
                                            pick(name.clone());
                                        }
                                    >
                                        {user.full_name}
                                        <span class="autocomplete-email">{user.email}</span>
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
