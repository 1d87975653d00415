//! Task Form State
//!
//! Draft values of the create/edit task form. The create draft survives page
//! reloads through a [`DraftStorage`] boundary (browser `localStorage`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DraftError;
use crate::models::{NewTask, Priority, Task, TaskStatus, User};

/// Form values, also the JSON shape of the stored draft
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    /// Free-form display name, resolved to a user on submit
    pub assignee: String,
    pub board_id: Option<u32>,
}

/// Partial update of a draft; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub board_id: Option<Option<u32>>,
}

impl DraftPatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self { title: Some(value.into()), ..Default::default() }
    }

    pub fn description(value: impl Into<String>) -> Self {
        Self { description: Some(value.into()), ..Default::default() }
    }

    pub fn status(value: TaskStatus) -> Self {
        Self { status: Some(value), ..Default::default() }
    }

    pub fn priority(value: Priority) -> Self {
        Self { priority: Some(value), ..Default::default() }
    }

    pub fn assignee(value: impl Into<String>) -> Self {
        Self { assignee: Some(value.into()), ..Default::default() }
    }

    pub fn board(value: Option<u32>) -> Self {
        Self { board_id: Some(value), ..Default::default() }
    }
}

/// Reasons a draft cannot be submitted yet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Choose a board")]
    MissingBoard,
}

impl TaskDraft {
    /// Seed the edit form from an existing task
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            assignee: task.assignee.as_ref().map(|u| u.full_name.clone()).unwrap_or_default(),
            board_id: Some(task.board_id),
        }
    }

    pub fn merge(&mut self, patch: DraftPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = assignee;
        }
        if let Some(board_id) = patch.board_id {
            self.board_id = board_id;
        }
    }

    fn validate(&self) -> Result<u32, SubmitError> {
        if self.title.trim().is_empty() {
            return Err(SubmitError::MissingTitle);
        }
        self.board_id.ok_or(SubmitError::MissingBoard)
    }

    /// Body of a create request
    pub fn to_new_task(&self, users: &[User]) -> Result<NewTask, SubmitError> {
        let board_id = self.validate()?;
        Ok(NewTask {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            assignee: resolve_assignee(&self.assignee, users),
            board_id,
        })
    }

    /// Full task for an update request, keeping the id of `task`
    pub fn apply_to(&self, task: &Task, users: &[User]) -> Result<Task, SubmitError> {
        let board_id = self.validate()?;
        Ok(Task {
            id: task.id,
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            assignee: resolve_assignee(&self.assignee, users),
            board_id,
            board_name: task.board_name.clone(),
        })
    }
}

/// Exact full-name lookup; unknown names become an id-0 placeholder
pub fn resolve_assignee(name: &str, users: &[User]) -> Option<User> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let user = users
        .iter()
        .find(|u| u.full_name == name)
        .cloned()
        .unwrap_or_else(|| User::placeholder(name));
    Some(user)
}

/// Durable key-value storage for drafts
pub trait DraftStorage {
    fn read(&self, key: &str) -> Result<Option<String>, DraftError>;
    fn write(&self, key: &str, value: &str) -> Result<(), DraftError>;
    fn remove(&self, key: &str) -> Result<(), DraftError>;
}

/// Browser `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, DraftError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(DraftError::Unavailable)
    }
}

impl DraftStorage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, DraftError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| DraftError::Storage(format!("{:?}", e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), DraftError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| DraftError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), DraftError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| DraftError::Storage(format!("{:?}", e)))
    }
}

/// Owned draft plus the storage it is mirrored to
#[derive(Debug, Clone)]
pub struct DraftStore<S> {
    draft: TaskDraft,
    storage: S,
    key: String,
}

impl<S: DraftStorage> DraftStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self { draft: TaskDraft::default(), storage, key: key.into() }
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// Restore the stored draft; missing or unreadable drafts keep defaults
    pub fn load_persisted(&mut self) {
        match self.read_stored() {
            Ok(Some(draft)) => {
                log::debug!("restored task draft \"{}\"", draft.title);
                self.draft = draft;
            }
            Ok(None) => {}
            Err(e) => log::warn!("ignoring stored task draft: {}", e),
        }
    }

    fn read_stored(&self) -> Result<Option<TaskDraft>, DraftError> {
        match self.storage.read(&self.key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Merge `patch` and mirror the result to storage
    pub fn update_field(&mut self, patch: DraftPatch) {
        self.draft.merge(patch);
        if let Err(e) = self.persist() {
            log::warn!("task draft kept in memory only: {}", e);
        }
    }

    fn persist(&self) -> Result<(), DraftError> {
        let json = serde_json::to_string(&self.draft)?;
        self.storage.write(&self.key, &json)
    }

    /// Back to defaults, dropping the stored draft
    pub fn reset(&mut self) {
        self.draft = TaskDraft::default();
        if let Err(e) = self.storage.remove(&self.key) {
            log::warn!("could not clear stored task draft: {}", e);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Shared in-memory storage; clones see the same entries
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStorage {
        entries: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MemoryStorage {
        pub fn insert(&self, key: &str, value: &str) {
            self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        }

        pub fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }
    }

    impl DraftStorage for MemoryStorage {
        fn read(&self, key: &str) -> Result<Option<String>, DraftError> {
            Ok(self.get(key))
        }

        fn write(&self, key: &str, value: &str) -> Result<(), DraftError> {
            self.insert(key, value);
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), DraftError> {
            self.entries.borrow_mut().remove(key);
            Ok(())
        }
    }

    /// Storage that rejects everything
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrokenStorage;

    impl DraftStorage for BrokenStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, DraftError> {
            Err(DraftError::Unavailable)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), DraftError> {
            Err(DraftError::Unavailable)
        }

        fn remove(&self, _key: &str) -> Result<(), DraftError> {
            Err(DraftError::Unavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{BrokenStorage, MemoryStorage};
    use super::*;
    use crate::models::fixtures::{task, user};

    const KEY: &str = "test.draft";

    #[test]
    fn updated_title_survives_reload() {
        let storage = MemoryStorage::default();
        let mut store = DraftStore::new(storage.clone(), KEY);
        store.update_field(DraftPatch::title("x"));

        let mut reloaded = DraftStore::new(storage, KEY);
        reloaded.load_persisted();
        assert_eq!(reloaded.draft().title, "x");
    }

    #[test]
    fn reset_clears_stored_draft() {
        let storage = MemoryStorage::default();
        let mut store = DraftStore::new(storage.clone(), KEY);
        store.update_field(DraftPatch::title("x"));
        store.update_field(DraftPatch::priority(Priority::High));
        store.reset();
        assert_eq!(store.draft(), &TaskDraft::default());
        assert!(storage.get(KEY).is_none());

        let mut reloaded = DraftStore::new(storage, KEY);
        reloaded.load_persisted();
        assert_eq!(reloaded.draft(), &TaskDraft::default());
    }

    #[test]
    fn patches_merge_field_by_field() {
        let mut store = DraftStore::new(MemoryStorage::default(), KEY);
        store.update_field(DraftPatch::title("Ship it"));
        store.update_field(DraftPatch::status(TaskStatus::InProgress));
        store.update_field(DraftPatch::board(Some(3)));
        store.update_field(DraftPatch::assignee("Ana"));

        let draft = store.draft();
        assert_eq!(draft.title, "Ship it");
        assert_eq!(draft.status, TaskStatus::InProgress);
        assert_eq!(draft.board_id, Some(3));
        assert_eq!(draft.assignee, "Ana");
        assert_eq!(draft.priority, Priority::Medium);
    }

    #[test]
    fn missing_draft_keeps_defaults() {
        let mut store = DraftStore::new(MemoryStorage::default(), KEY);
        store.load_persisted();
        assert_eq!(store.draft(), &TaskDraft::default());
    }

    #[test]
    fn corrupt_draft_keeps_defaults() {
        let storage = MemoryStorage::default();
        storage.insert(KEY, "{not json");
        let mut store = DraftStore::new(storage, KEY);
        store.load_persisted();
        assert_eq!(store.draft(), &TaskDraft::default());
    }

    #[test]
    fn partial_stored_draft_fills_defaults() {
        let storage = MemoryStorage::default();
        storage.insert(KEY, r#"{"title":"half","boardId":2}"#);
        let mut store = DraftStore::new(storage, KEY);
        store.load_persisted();
        assert_eq!(store.draft().title, "half");
        assert_eq!(store.draft().board_id, Some(2));
        assert_eq!(store.draft().status, TaskStatus::Backlog);
    }

    #[test]
    fn unavailable_storage_still_updates_memory() {
        let mut store = DraftStore::new(BrokenStorage, KEY);
        store.load_persisted();
        store.update_field(DraftPatch::title("offline"));
        assert_eq!(store.draft().title, "offline");
        store.reset();
        assert_eq!(store.draft(), &TaskDraft::default());
    }

    #[test]
    fn assignee_resolves_by_exact_name() {
        let users = vec![user(1, "Ana Lima"), user(2, "Bo Chen")];
        assert_eq!(resolve_assignee("Bo Chen", &users).unwrap().id, 2);
        assert_eq!(resolve_assignee("  Ana Lima ", &users).unwrap().id, 1);
    }

    #[test]
    fn unknown_assignee_becomes_placeholder() {
        let users = vec![user(1, "Ana Lima")];
        let placeholder = resolve_assignee("ana lima", &users).unwrap();
        assert_eq!(placeholder.id, 0);
        assert_eq!(placeholder.full_name, "ana lima");
        assert!(resolve_assignee("", &users).is_none());
    }

    #[test]
    fn submit_requires_title_and_board() {
        let mut draft = TaskDraft::default();
        assert_eq!(draft.to_new_task(&[]), Err(SubmitError::MissingTitle));
        draft.title = "Do it".into();
        assert_eq!(draft.to_new_task(&[]), Err(SubmitError::MissingBoard));
        draft.board_id = Some(4);
        let body = draft.to_new_task(&[]).unwrap();
        assert_eq!(body.board_id, 4);
        assert!(body.assignee.is_none());
    }

    #[test]
    fn edit_form_round_trips_task() {
        let mut original = task(8, 2, TaskStatus::InProgress);
        original.assignee = Some(user(5, "Ana Lima"));
        let users = vec![user(5, "Ana Lima")];

        let mut draft = TaskDraft::from_task(&original);
        assert_eq!(draft.apply_to(&original, &users).unwrap(), original);

        draft.merge(DraftPatch::status(TaskStatus::Done));
        let updated = draft.apply_to(&original, &users).unwrap();
        assert_eq!(updated.id, 8);
        assert_eq!(updated.status, TaskStatus::Done);
    }
}
