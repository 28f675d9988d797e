//! Frontend Models
//!
//! Data structures matching the REST API payloads (camelCase JSON).
//! The API names identifiers either `id` or `_id`; both are accepted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Prefix of client-generated ids that have not been confirmed by the server
pub const TRANSIENT_PREFIX: &str = "tmp-";

/// New transient id for an optimistic insert
pub fn transient_id() -> String {
    format!("{}{}", TRANSIENT_PREFIX, uuid::Uuid::new_v4())
}

pub fn is_transient(id: &str) -> bool {
    id.starts_with(TRANSIENT_PREFIX)
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }

    pub fn all() -> [Priority; 4] {
        [Priority::Low, Priority::Medium, Priority::High, Priority::Critical]
    }

    pub fn parse(value: &str) -> Option<Priority> {
        Priority::all().into_iter().find(|p| p.as_str() == value)
    }
}

/// Checklist entry inside a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(alias = "_id")]
    pub id: String,
    pub column_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub assignees: Vec<String>,
    /// Ordering hint from the server; the column sequence is authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl Task {
    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.done).count()
    }

    /// Due before `today` with subtasks left open
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        let open = self.subtasks.is_empty() || self.completed_subtasks() < self.subtasks.len();
        open && self.due_date.is_some_and(|due| due < today)
    }
}

/// Column data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    /// Explicit task order; when absent it is derived from task positions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

/// Board header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub column_ids: Vec<String>,
}

/// Entry of the board list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
}

/// `GET /boards/:id` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub board: Board,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Body of task create/update requests
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub column_id: String,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub labels: Vec<String>,
    pub subtasks: Vec<Subtask>,
    pub assignees: Vec<String>,
}

impl TaskInput {
    /// Local task built from this input, used for optimistic rendering
    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            column_id: self.column_id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            priority: self.priority,
            labels: self.labels,
            subtasks: self.subtasks,
            assignees: self.assignees,
            position: None,
        }
    }
}

impl From<&Task> for TaskInput {
    fn from(task: &Task) -> Self {
        Self {
            column_id: task.column_id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            priority: task.priority,
            labels: task.labels.clone(),
            subtasks: task.subtasks.clone(),
            assignees: task.assignees.clone(),
        }
    }
}

/// Login form payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// `POST /auth/login` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken")]
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_accepts_mongo_style_id_and_defaults() {
        let json = r#"{"_id":"t1","columnId":"c1","title":"Write invoice"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "t1");
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.labels.is_empty());
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_task_full_payload() {
        let json = r#"{
            "id": "t2", "columnId": "c1", "title": "Logo",
            "description": "v2", "dueDate": "2026-11-01", "priority": "critical",
            "labels": ["design"], "assignees": ["ana"],
            "subtasks": [{"title": "sketch", "done": true}, {"title": "vector"}]
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::Critical);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 11, 1));
        assert_eq!(task.completed_subtasks(), 1);

        let today = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        assert!(task.is_overdue(today));
        assert!(!task.is_overdue(NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()));
    }

    #[test]
    fn test_task_input_serializes_camel_case() {
        let input = TaskInput {
            column_id: "c1".into(),
            title: "x".into(),
            description: String::new(),
            due_date: None,
            priority: Priority::High,
            labels: vec![],
            subtasks: vec![],
            assignees: vec![],
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["columnId"], "c1");
        assert_eq!(value["priority"], "high");
    }

    #[test]
    fn test_transient_ids() {
        let id = transient_id();
        assert!(is_transient(&id));
        assert!(!is_transient("64f1c0"));
    }

    #[test]
    fn test_login_response_alias() {
        let resp: LoginResponse = serde_json::from_str(r#"{"accessToken":"abc"}"#).unwrap();
        assert_eq!(resp.token, "abc");
    }
}
