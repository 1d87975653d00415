//! UI Components
//!
//! Pages and reusable Leptos components.

mod assignee_autocomplete;
mod board_list;
mod board_view;
mod editor_target;
mod error_banner;
mod load_status;
mod nav_bar;
mod not_found;
mod priority_selector;
mod task_card;
mod task_editor;
mod task_list;

pub use assignee_autocomplete::AssigneeAutocomplete;
pub use board_list::BoardsPage;
pub use board_view::{board_path, BoardPage};
pub use editor_target::EditTarget;
pub use error_banner::ErrorBanner;
pub use load_status::LoadStatus;
pub use nav_bar::NavBar;
pub use not_found::NotFound;
pub use priority_selector::PrioritySelector;
pub use task_card::{AssigneeBadge, TaskCard};
pub use task_editor::TaskEditor;
pub use task_list::TasksPage;
