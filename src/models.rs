//! Frontend Models
//!
//! Data structures matching the REST API payloads (camelCase on the wire).

use serde::{Deserialize, Serialize};

/// Status column a task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[default]
    Backlog,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Column order on the board
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Backlog, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "Backlog",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Done => "Done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "Backlog",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Backlog" => Some(TaskStatus::Backlog),
            "InProgress" => Some(TaskStatus::InProgress),
            "Done" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    /// Position of this status in [`TaskStatus::ALL`]
    pub fn column(&self) -> usize {
        match self {
            TaskStatus::Backlog => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Done => 2,
        }
    }

    pub fn from_column(column: usize) -> Option<Self> {
        Self::ALL.get(column).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(Priority::Low),
            "Medium" => Some(Priority::Medium),
            "High" => Some(Priority::High),
            _ => None,
        }
    }
}

/// User data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl User {
    /// Reference for an assignee name that matches no known user
    pub fn placeholder(full_name: &str) -> Self {
        Self {
            id: 0,
            full_name: full_name.to_string(),
            email: String::new(),
            avatar_url: String::new(),
        }
    }
}

/// Board data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub task_count: u32,
}

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default)]
    pub assignee: Option<User>,
    pub board_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_name: Option<String>,
}

/// Create request body: a task without its server-assigned id
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee: Option<User>,
    pub board_id: u32,
}

/// Response envelope used by every endpoint
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_reads_camel_case_payload() {
        let json = r#"{
            "id": 4,
            "title": "Write docs",
            "description": "",
            "status": "InProgress",
            "priority": "High",
            "assignee": { "id": 2, "fullName": "Ana Lima", "email": "ana@x.io", "avatarUrl": "" },
            "boardId": 1,
            "boardName": "Roadmap"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.board_id, 1);
        assert_eq!(task.assignee.unwrap().full_name, "Ana Lima");
    }

    #[test]
    fn task_without_assignee_is_accepted() {
        let json = r#"{"id":1,"title":"t","status":"Done","priority":"Low","assignee":null,"boardId":3}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.assignee.is_none());
        assert_eq!(task.description, "");
    }

    #[test]
    fn new_task_serializes_without_id() {
        let body = NewTask {
            title: "x".into(),
            description: String::new(),
            status: TaskStatus::Backlog,
            priority: Priority::Low,
            assignee: None,
            board_id: 9,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["boardId"], 9);
        assert_eq!(value["status"], "Backlog");
    }

    #[test]
    fn columns_map_back_to_statuses() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_column(status.column()), Some(status));
        }
        assert_eq!(TaskStatus::from_column(3), None);
    }
}
