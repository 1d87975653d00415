//! Application Context
//!
//! Shared state provided via Leptos Context API: configuration, the query
//! cache, the create-task draft, the page error banner and the one-shot
//! "open this task" hint carried across navigation.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::components::EditTarget;
use crate::config::AppConfig;
use crate::draft::{DraftPatch, DraftStore, LocalStorage, TaskDraft};
use crate::query::{FetchGenerations, QueryKey};

/// Version counters per query key; bumping one makes its loader refetch
#[derive(Clone, Copy)]
pub struct QueryCache {
    versions: [RwSignal<u32>; 3],
    generations: StoredValue<[FetchGenerations; 3]>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            versions: [RwSignal::new(0), RwSignal::new(0), RwSignal::new(0)],
            generations: StoredValue::new(Default::default()),
        }
    }

    /// Tracked read, for loader effects
    pub fn version(&self, key: QueryKey) -> u32 {
        self.versions[key.index()].get()
    }

    /// Mark a key stale
    pub fn invalidate(&self, key: QueryKey) {
        log::debug!("invalidating {:?}", key);
        self.generations.update_value(|g| g[key.index()].invalidate());
        self.versions[key.index()].update(|v| *v += 1);
    }

    pub fn begin_fetch(&self, key: QueryKey) -> u64 {
        let mut generation = 0;
        self.generations.update_value(|g| generation = g[key.index()].issue());
        generation
    }

    /// False when a newer answer for `key` was already published
    pub fn accept(&self, key: QueryKey, generation: u64) -> bool {
        let mut accepted = false;
        self.generations.update_value(|g| accepted = g[key.index()].accept(generation));
        accepted
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<AppConfig>,
    pub cache: QueryCache,
    /// Create-task form draft, mirrored to local storage
    draft: RwSignal<DraftStore<LocalStorage>>,
    /// Page-level error message
    pub error: ReadSignal<Option<String>>,
    set_error: WriteSignal<Option<String>>,
    /// Task to open once its board page is shown
    open_task_hint: RwSignal<Option<u32>>,
    /// Target of the task editor modal, if open
    pub editing: ReadSignal<Option<EditTarget>>,
    set_editing: WriteSignal<Option<EditTarget>>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let mut draft = DraftStore::new(LocalStorage, config.draft_storage_key.clone());
        draft.load_persisted();
        let (error, set_error) = signal(None::<String>);
        let (editing, set_editing) = signal(None::<EditTarget>);
        Self {
            config: StoredValue::new(config),
            cache: QueryCache::new(),
            draft: RwSignal::new(draft),
            error,
            set_error,
            open_task_hint: RwSignal::new(None),
            editing,
            set_editing,
        }
    }

    /// Client for the configured API origin
    pub fn api(&self) -> ApiClient {
        self.config.with_value(ApiClient::new)
    }

    /// Tracked snapshot of the create-task draft
    pub fn draft(&self) -> TaskDraft {
        self.draft.with(|store| store.draft().clone())
    }

    pub fn update_draft(&self, patch: DraftPatch) {
        self.draft.update(|store| store.update_field(patch));
    }

    pub fn reset_draft(&self) {
        self.draft.update(|store| store.reset());
    }

    /// Show an error banner; it clears itself after the configured delay
    pub fn report_error(&self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{}", message);
        self.set_error.set(Some(message.clone()));

        let set_error = self.set_error;
        let error = self.error;
        let delay = self.config.with_value(|c| c.error_banner_ms);
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(delay).await;
            // A newer message keeps its own timer
            if error.try_get_untracked().flatten().as_deref() == Some(message.as_str()) {
                set_error.set(None);
            }
        });
    }

    pub fn clear_error(&self) {
        self.set_error.set(None);
    }

    pub fn open_editor(&self, target: EditTarget) {
        self.set_editing.set(Some(target));
    }

    pub fn close_editor(&self) {
        self.set_editing.set(None);
    }

    /// Ask the board page to open `task_id` after navigation
    pub fn hint_open_task(&self, task_id: u32) {
        self.open_task_hint.set(Some(task_id));
    }

    /// Consume the open-task hint
    pub fn take_open_task_hint(&self) -> Option<u32> {
        let hint = self.open_task_hint.get_untracked();
        if hint.is_some() {
            self.open_task_hint.set(None);
        }
        hint
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
