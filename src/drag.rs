//! Drag Transition Handler
//!
//! Turns a finished drag gesture into an optimistic board move plus the
//! remote update that persists it. Each update is tagged with a per-task
//! sequence number so late answers for superseded moves never touch the
//! board; only their outcome decides whether the task list is refetched.

use std::collections::HashMap;

use leptos_dragdrop::DragEnd;
use thiserror::Error;

use crate::api::TaskBackend;
use crate::board::BoardState;
use crate::error::{ApiError, ApiResult};
use crate::models::{Task, TaskStatus};

/// A drag-end event validated against the board's columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// Released outside every column
    Cancelled { task_id: u32 },
    /// Released on a slot; indices are final positions
    Dropped {
        task_id: u32,
        from: TaskStatus,
        from_index: usize,
        to: TaskStatus,
        to_index: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDrag {
    #[error("drag references unknown column {0}")]
    UnknownColumn(usize),
}

impl DragEvent {
    /// Validate a gesture from the drag-and-drop layer.
    ///
    /// Gesture destinations are gaps between cards; within one column a gap
    /// below the source card shifts up by one once the card is lifted out.
    pub fn from_gesture(end: &DragEnd) -> Result<Self, InvalidDrag> {
        let from = column_status(end.source.column)?;
        let Some(dest) = end.destination else {
            return Ok(DragEvent::Cancelled { task_id: end.item_id });
        };
        let to = column_status(dest.column)?;

        let to_index = if from == to && dest.index > end.source.index {
            dest.index - 1
        } else {
            dest.index
        };
        Ok(DragEvent::Dropped {
            task_id: end.item_id,
            from,
            from_index: end.source.index,
            to,
            to_index,
        })
    }
}

fn column_status(column: usize) -> Result<TaskStatus, InvalidDrag> {
    TaskStatus::from_column(column).ok_or(InvalidDrag::UnknownColumn(column))
}

/// An optimistic move waiting for the server
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    /// Task as sent in the update request
    pub task: Task,
    /// Task before the move, with its column index
    pub previous: Task,
    pub previous_index: usize,
    pub seq: u64,
}

/// How a finished update request was applied
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// Server accepted the latest move; refetch tasks
    Confirmed,
    /// Server rejected the latest move; the card went back
    RolledBack(ApiError),
    /// A newer move of the same task was issued; the board is left alone.
    /// `saved` is true when the server still stored this older move.
    Superseded { saved: bool },
}

impl Settlement {
    /// Whether the server state changed and the task list must be refetched
    pub fn needs_refetch(&self) -> bool {
        matches!(self, Settlement::Confirmed | Settlement::Superseded { saved: true })
    }
}

/// Board state together with the moves awaiting confirmation
#[derive(Debug, Clone, Default)]
pub struct DragHandler {
    board: BoardState,
    pending: HashMap<u32, PendingMove>,
    next_seq: u64,
}

impl DragHandler {
    pub fn new(board: BoardState) -> Self {
        Self { board, ..Default::default() }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn is_pending(&self, task_id: u32) -> bool {
        self.pending.contains_key(&task_id)
    }

    /// Apply a drop locally. Returns the update to send, or `None` when the
    /// gesture changes nothing.
    pub fn handle(&mut self, event: DragEvent) -> Option<PendingMove> {
        let DragEvent::Dropped { task_id, from, from_index, to, to_index } = event else {
            log::debug!("drag cancelled outside the board");
            return None;
        };
        if from == to && from_index == to_index {
            return None;
        }

        let previous = self.board.column(from).get(from_index).cloned()?;
        let Some(task) = self.board.apply_local_move(task_id, from, from_index, to, to_index) else {
            log::warn!("ignoring stale drag of task {} from {}[{}]", task_id, from.as_str(), from_index);
            return None;
        };
        log::info!("task {} moved {}[{}] -> {}[{}]", task_id, from.as_str(), from_index, to.as_str(), to_index);

        self.next_seq += 1;
        // Rolling back a chain of moves returns the card to where it was
        // before the first unconfirmed one
        let (previous, previous_index) = match self.pending.get(&task_id) {
            Some(earlier) => (earlier.previous.clone(), earlier.previous_index),
            None => (previous, from_index),
        };
        let pending = PendingMove { task, previous, previous_index, seq: self.next_seq };
        self.pending.insert(task_id, pending.clone());
        Some(pending)
    }

    /// Record the answer to an update request
    pub fn settle(&mut self, sent: &PendingMove, result: &ApiResult<Task>) -> Settlement {
        let task_id = sent.task.id;
        match self.pending.get(&task_id) {
            Some(latest) if latest.seq == sent.seq => {}
            _ => {
                log::debug!("dropping answer for superseded move {} of task {}", sent.seq, task_id);
                return Settlement::Superseded { saved: result.is_ok() };
            }
        }
        self.pending.remove(&task_id);

        match result {
            Ok(_) => Settlement::Confirmed,
            Err(e) => {
                log::warn!("update of task {} failed, rolling back: {}", task_id, e);
                if !self.board.rollback(&sent.previous, sent.previous_index) {
                    log::debug!("task {} no longer on board {}", task_id, self.board.board_id());
                }
                Settlement::RolledBack(e.clone())
            }
        }
    }

    /// Rebuild from fresh server data, keeping unconfirmed moves visible
    pub fn reconcile(&mut self, fresh: &[Task]) {
        if self.pending.is_empty() {
            self.board.reconcile(fresh);
            return;
        }
        let overlaid: Vec<Task> = fresh
            .iter()
            .map(|t| match self.pending.get(&t.id) {
                Some(p) => Task { status: p.task.status, ..t.clone() },
                None => t.clone(),
            })
            .collect();
        self.board.reconcile(&overlaid);
    }
}

/// Send the update for a pending move
pub async fn persist_move<B>(backend: &B, pending: &PendingMove) -> ApiResult<Task>
where
    B: TaskBackend + ?Sized,
{
    backend.update_task(&pending.task).await
}
