//! Board View State
//!
//! Ordered partition of one board's tasks into status columns.
//! Always a projection of `Task::status`: every task of the board sits in
//! exactly the column matching its status.

use crate::models::{Task, TaskStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    board_id: u32,
    /// Indexed by `TaskStatus::column()`
    columns: [Vec<Task>; 3],
}

impl BoardState {
    /// Partition `tasks` belonging to `board_id` by status, keeping input order
    pub fn new(tasks: &[Task], board_id: u32) -> Self {
        let mut columns: [Vec<Task>; 3] = Default::default();
        for task in tasks.iter().filter(|t| t.board_id == board_id) {
            columns[task.status.column()].push(task.clone());
        }
        Self { board_id, columns }
    }

    pub fn board_id(&self) -> u32 {
        self.board_id
    }

    pub fn column(&self, status: TaskStatus) -> &[Task] {
        &self.columns[status.column()]
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tasks in column order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flatten()
    }

    /// Column and index currently holding `task_id`
    pub fn find(&self, task_id: u32) -> Option<(TaskStatus, usize)> {
        TaskStatus::ALL.into_iter().find_map(|status| {
            self.column(status)
                .iter()
                .position(|t| t.id == task_id)
                .map(|index| (status, index))
        })
    }

    pub fn task(&self, task_id: u32) -> Option<&Task> {
        self.tasks().find(|t| t.id == task_id)
    }

    /// Move a task between (or within) columns, retagging its status.
    ///
    /// `to_index` is the final index in the destination column and is clamped
    /// to its length. Returns the moved task, or `None` when nothing changed:
    /// same slot, source index out of range, or the card at the source index
    /// is not `task_id`.
    pub fn apply_local_move(
        &mut self,
        task_id: u32,
        from: TaskStatus,
        from_index: usize,
        to: TaskStatus,
        to_index: usize,
    ) -> Option<Task> {
        if from == to && from_index == to_index {
            return None;
        }
        let source = &mut self.columns[from.column()];
        if source.get(from_index).map(|t| t.id) != Some(task_id) {
            return None;
        }

        let mut task = source.remove(from_index);
        task.status = to;

        let target = &mut self.columns[to.column()];
        let index = to_index.min(target.len());
        target.insert(index, task.clone());
        Some(task)
    }

    /// Replace the whole partition with freshly fetched tasks
    pub fn reconcile(&mut self, fresh: &[Task]) {
        *self = Self::new(fresh, self.board_id);
    }

    /// Put `previous` back at `index` of its own status column, replacing the
    /// current copy of that task. Returns false if the task left the board.
    pub fn rollback(&mut self, previous: &Task, index: usize) -> bool {
        let Some((status, current)) = self.find(previous.id) else {
            return false;
        };
        self.columns[status.column()].remove(current);

        let target = &mut self.columns[previous.status.column()];
        let index = index.min(target.len());
        target.insert(index, previous.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::task;
    use std::collections::HashSet;

    fn ids(state: &BoardState, status: TaskStatus) -> Vec<u32> {
        state.column(status).iter().map(|t| t.id).collect()
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, 1, TaskStatus::Backlog),
            task(2, 1, TaskStatus::InProgress),
            task(3, 2, TaskStatus::Backlog),
            task(4, 1, TaskStatus::Backlog),
            task(5, 1, TaskStatus::Done),
            task(6, 1, TaskStatus::Backlog),
        ]
    }

    #[test]
    fn partitions_only_the_requested_board() {
        let tasks = sample();
        let state = BoardState::new(&tasks, 1);

        assert_eq!(ids(&state, TaskStatus::Backlog), vec![1, 4, 6]);
        assert_eq!(ids(&state, TaskStatus::InProgress), vec![2]);
        assert_eq!(ids(&state, TaskStatus::Done), vec![5]);

        let expected: HashSet<u32> = tasks.iter().filter(|t| t.board_id == 1).map(|t| t.id).collect();
        let got: Vec<u32> = state.tasks().map(|t| t.id).collect();
        assert_eq!(got.len(), expected.len());
        assert_eq!(got.into_iter().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn every_task_sits_in_its_status_column() {
        let state = BoardState::new(&sample(), 1);
        for status in TaskStatus::ALL {
            assert!(state.column(status).iter().all(|t| t.status == status));
        }
    }

    #[test]
    fn unknown_board_is_empty() {
        let state = BoardState::new(&sample(), 99);
        assert!(state.is_empty());
        assert_eq!(state.board_id(), 99);
    }

    #[test]
    fn same_slot_move_is_a_no_op() {
        let mut state = BoardState::new(&sample(), 1);
        let before = state.clone();
        assert!(state.apply_local_move(4, TaskStatus::Backlog, 1, TaskStatus::Backlog, 1).is_none());
        assert!(state.apply_local_move(4, TaskStatus::Backlog, 1, TaskStatus::Backlog, 1).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn out_of_range_source_is_a_no_op() {
        let mut state = BoardState::new(&sample(), 1);
        let before = state.clone();
        assert!(state.apply_local_move(2, TaskStatus::InProgress, 5, TaskStatus::Done, 0).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn mismatched_task_id_is_a_no_op() {
        let mut state = BoardState::new(&sample(), 1);
        let before = state.clone();
        assert!(state.apply_local_move(6, TaskStatus::Backlog, 0, TaskStatus::Done, 0).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn drag_backlog_to_done_scenario() {
        let tasks = vec![task(1, 1, TaskStatus::Backlog), task(2, 1, TaskStatus::InProgress)];
        let mut state = BoardState::new(&tasks, 1);

        let moved = state.apply_local_move(1, TaskStatus::Backlog, 0, TaskStatus::Done, 0).unwrap();
        assert_eq!(moved.status, TaskStatus::Done);

        assert!(state.column(TaskStatus::Backlog).is_empty());
        assert_eq!(ids(&state, TaskStatus::InProgress), vec![2]);
        assert_eq!(ids(&state, TaskStatus::Done), vec![1]);
        assert_eq!(state.column(TaskStatus::Done)[0].status, TaskStatus::Done);
    }

    #[test]
    fn cross_column_move_keeps_relative_order_of_others() {
        let mut state = BoardState::new(&sample(), 1);
        state.apply_local_move(4, TaskStatus::Backlog, 1, TaskStatus::Done, 1).unwrap();

        assert_eq!(ids(&state, TaskStatus::Backlog), vec![1, 6]);
        assert_eq!(ids(&state, TaskStatus::Done), vec![5, 4]);
        assert_eq!(ids(&state, TaskStatus::InProgress), vec![2]);
    }

    #[test]
    fn destination_index_is_clamped() {
        let mut state = BoardState::new(&sample(), 1);
        state.apply_local_move(1, TaskStatus::Backlog, 0, TaskStatus::InProgress, 40).unwrap();
        assert_eq!(ids(&state, TaskStatus::InProgress), vec![2, 1]);
    }

    #[test]
    fn reorder_within_column_preserves_status() {
        let mut state = BoardState::new(&sample(), 1);
        let moved = state.apply_local_move(1, TaskStatus::Backlog, 0, TaskStatus::Backlog, 2).unwrap();
        assert_eq!(moved.status, TaskStatus::Backlog);
        assert_eq!(ids(&state, TaskStatus::Backlog), vec![4, 6, 1]);
    }

    #[test]
    fn reconcile_replaces_local_state() {
        let mut state = BoardState::new(&sample(), 1);
        state.apply_local_move(1, TaskStatus::Backlog, 0, TaskStatus::Done, 0).unwrap();

        let fresh = vec![task(1, 1, TaskStatus::Backlog), task(7, 1, TaskStatus::InProgress), task(8, 3, TaskStatus::Done)];
        state.reconcile(&fresh);

        assert_eq!(ids(&state, TaskStatus::Backlog), vec![1]);
        assert_eq!(ids(&state, TaskStatus::InProgress), vec![7]);
        assert!(state.column(TaskStatus::Done).is_empty());
    }

    #[test]
    fn rollback_restores_previous_slot_and_status() {
        let mut state = BoardState::new(&sample(), 1);
        let original = state.column(TaskStatus::Backlog)[1].clone();
        state.apply_local_move(4, TaskStatus::Backlog, 1, TaskStatus::Done, 0).unwrap();

        assert!(state.rollback(&original, 1));
        assert_eq!(state, BoardState::new(&sample(), 1));
    }

    #[test]
    fn rollback_of_vanished_task_reports_false() {
        let mut state = BoardState::new(&sample(), 1);
        let ghost = task(42, 1, TaskStatus::Backlog);
        assert!(!state.rollback(&ghost, 0));
    }
}
