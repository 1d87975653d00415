//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Loaders publish
//! fetched lists here; pages subscribe to the fields they render.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Board, Task, User};

/// Last published answer of every query
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub boards: Vec<Board>,
    /// Tasks of every board
    pub tasks: Vec<Task>,
    pub users: Vec<User>,
    /// Set once the first task list arrived
    pub tasks_loaded: bool,
    pub boards_loaded: bool,
    /// Last failed load, cleared by the next successful one
    pub tasks_error: Option<String>,
    pub boards_error: Option<String>,
}

/// What a page shows for a list: the data, a spinner, or the failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed(String),
    Ready,
}

impl LoadState {
    /// Data already shown stays visible when a later refetch fails
    pub fn of(loaded: bool, error: Option<String>) -> Self {
        match (loaded, error) {
            (true, _) => LoadState::Ready,
            (false, Some(message)) => LoadState::Failed(message),
            (false, None) => LoadState::Loading,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Insert or replace a task by ID with the server's copy
pub fn store_upsert_task(store: &AppStore, task: Task) {
    let field = store.tasks();
    let mut tasks = field.write();
    match tasks.iter_mut().find(|t| t.id == task.id) {
        Some(existing) => *existing = task,
        None => tasks.push(task),
    }
}

/// Tracked load state of the task list
pub fn tasks_load_state(store: &AppStore) -> LoadState {
    LoadState::of(store.tasks_loaded().get(), store.tasks_error().get())
}

/// Tracked load state of the board list
pub fn boards_load_state(store: &AppStore) -> LoadState {
    LoadState::of(store.boards_loaded().get(), store.boards_error().get())
}

pub fn board_name(boards: &[Board], board_id: u32) -> String {
    boards
        .iter()
        .find(|b| b.id == board_id)
        .map(|b| b.name.clone())
        .unwrap_or_else(|| format!("Board #{}", board_id))
}
