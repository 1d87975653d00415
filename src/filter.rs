//! Task List Filter
//!
//! Client-side filtering for the all-tasks page.

use crate::models::{Task, TaskStatus};

/// Active filters; `None` or an empty search matches everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub board_id: Option<u32>,
    pub title: Option<String>,
    pub assignee: Option<String>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.board_id.is_none()
            && search_term(&self.title).is_none()
            && search_term(&self.assignee).is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|s| s != task.status) {
            return false;
        }
        if self.board_id.is_some_and(|b| b != task.board_id) {
            return false;
        }
        if let Some(term) = search_term(&self.title) {
            if !contains_ignore_case(&task.title, &term) {
                return false;
            }
        }
        if let Some(term) = search_term(&self.assignee) {
            match &task.assignee {
                Some(user) if contains_ignore_case(&user.full_name, &term) => {}
                _ => return false,
            }
        }
        true
    }

    /// Tasks matching every active filter, in input order
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

/// Lowercased, trimmed search term, if any
fn search_term(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
