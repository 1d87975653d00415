//! Kanban Frontend App
//!
//! Root component: provides context, runs the list loaders and routes
//! between the board list, a single board and the task table.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;

use crate::api::{ApiClient, TaskBackend};
use crate::components::{BoardPage, BoardsPage, ErrorBanner, NavBar, NotFound, TaskEditor, TasksPage};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::ApiResult;
use crate::models::{Board, Task, User};
use crate::query::QueryKey;
use crate::store::{AppState, AppStateStoreFields, AppStore};

/// Run one fetch for `key` and publish its outcome unless it is stale
fn load<T, Fut>(
    ctx: AppContext,
    key: QueryKey,
    fetch: impl FnOnce(ApiClient) -> Fut,
    publish: impl FnOnce(ApiResult<T>) + 'static,
) where
    T: 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    let generation = ctx.cache.begin_fetch(key);
    let request = fetch(ctx.api());
    spawn_local(async move {
        let result = request.await;
        if !ctx.cache.accept(key, generation) {
            log::debug!("dropping stale {:?} answer (generation {})", key, generation);
            return;
        }
        if let Err(e) = &result {
            log::error!("loading {:?} failed: {}", key, e);
            ctx.report_error(format!("Could not load {}: {}", key.label(), e));
        }
        publish(result);
    });
}

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(AppConfig::from_build_env());
    let store: AppStore = Store::new(AppState::default());
    provide_context(ctx);
    provide_context(store);

    // One loader per list; invalidating a key reruns its effect
    Effect::new(move |_| {
        ctx.cache.version(QueryKey::Boards);
        load(ctx, QueryKey::Boards, |api| async move { api.list_boards().await }, move |result: ApiResult<Vec<Board>>| match result {
            Ok(boards) => {
                log::info!("loaded {} boards", boards.len());
                *store.boards().write() = boards;
                store.boards_error().set(None);
                store.boards_loaded().set(true);
            }
            Err(e) => store.boards_error().set(Some(e.to_string())),
        });
    });

    Effect::new(move |_| {
        ctx.cache.version(QueryKey::Tasks);
        load(ctx, QueryKey::Tasks, |api| async move { api.list_tasks(None).await }, move |result: ApiResult<Vec<Task>>| match result {
            Ok(tasks) => {
                log::info!("loaded {} tasks", tasks.len());
                *store.tasks().write() = tasks;
                store.tasks_error().set(None);
                store.tasks_loaded().set(true);
            }
            Err(e) => store.tasks_error().set(Some(e.to_string())),
        });
    });

    Effect::new(move |_| {
        ctx.cache.version(QueryKey::Users);
        load(ctx, QueryKey::Users, |api| async move { api.list_users().await }, move |result: ApiResult<Vec<User>>| {
            // Without users the assignee box just offers no suggestions
            if let Ok(users) = result {
                log::info!("loaded {} users", users.len());
                *store.users().write() = users;
            }
        });
    });

    view! {
        <Router>
            <div class="app-layout">
                <NavBar />
                <ErrorBanner />
                <main class="main-content">
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=path!("/") view=|| view! { <Redirect path="/boards" /> } />
                        <Route path=path!("/boards") view=BoardsPage />
                        <Route path=path!("/boards/:id") view=BoardPage />
                        <Route path=path!("/tasks") view=TasksPage />
                    </Routes>
                </main>
                <TaskEditor />
            </div>
        </Router>
    }
}
