//! Kanban Frontend Entry Point

mod api;
mod app;
mod board;
mod components;
mod config;
mod context;
mod draft;
mod drag;
mod error;
mod filter;
mod logging;
mod markdown;
mod models;
mod query;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(config::AppConfig::from_build_env().log_level);
    mount_to_body(App);
}
