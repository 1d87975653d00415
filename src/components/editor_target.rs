//! Edit Target Type
//!
//! What the task editor modal is working on.

use crate::models::Task;

/// Editor target - a new task (optionally on a preset board) or an existing one
#[derive(Clone, Debug, PartialEq)]
pub enum EditTarget {
    /// Create form backed by the persisted draft
    Create { board_id: Option<u32> },
    /// Edit form seeded from the task, never persisted
    Edit(Task),
}

impl EditTarget {
    pub fn title(&self) -> &'static str {
        match self {
            EditTarget::Create { .. } => "New task",
            EditTarget::Edit(_) => "Edit task",
        }
    }

    /// Board of the task being edited
    pub fn board_id(&self) -> Option<u32> {
        match self {
            EditTarget::Create { .. } => None,
            EditTarget::Edit(task) => Some(task.board_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::task;
    use crate::models::TaskStatus;

    #[test]
    fn only_edits_link_to_a_board() {
        assert_eq!(EditTarget::Edit(task(4, 9, TaskStatus::Done)).board_id(), Some(9));
        assert_eq!(EditTarget::Create { board_id: Some(9) }.board_id(), None);
    }
}
