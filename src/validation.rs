//! Form Validation
//!
//! Field-level checks run before any request is sent. An empty
//! [`FieldErrors`] means the form may be submitted.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Credentials, Priority, Subtask, TaskInput};

pub const TASK_TITLE_MAX: usize = 200;
pub const COLUMN_TITLE_MAX: usize = 80;
pub const BOARD_TITLE_MAX: usize = 120;

/// field name -> message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First message, for a single-line summary
    pub fn first(&self) -> Option<&str> {
        self.0.values().next().map(String::as_str)
    }
}

/// Split a comma-separated list, trimmed, deduplicated and without empties
pub fn split_list(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !out.iter().any(|existing| existing == part) {
            out.push(part.to_string());
        }
    }
    out
}

fn check_title(errors: &mut FieldErrors, field: &'static str, title: &str, max: usize) -> String {
    let title = title.trim();
    if title.is_empty() {
        errors.add(field, "Title is required");
    } else if title.chars().count() > max {
        errors.add(field, format!("Title must be at most {} characters", max));
    }
    title.to_string()
}

/// Raw task form values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub column_id: String,
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD` as produced by a date input, or empty
    pub due_date: String,
    pub priority: Priority,
    pub labels: String,
    pub assignees: String,
    pub subtasks: Vec<Subtask>,
}

impl TaskDraft {
    pub fn from_input(input: &TaskInput) -> Self {
        Self {
            column_id: input.column_id.clone(),
            title: input.title.clone(),
            description: input.description.clone(),
            due_date: input.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            priority: input.priority,
            labels: input.labels.join(", "),
            assignees: input.assignees.join(", "),
            subtasks: input.subtasks.clone(),
        }
    }

    pub fn validate(&self) -> Result<TaskInput, FieldErrors> {
        let mut errors = FieldErrors::default();
        let title = check_title(&mut errors, "title", &self.title, TASK_TITLE_MAX);

        let due_date = match self.due_date.trim() {
            "" => None,
            raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("due_date", "Due date must be a valid date");
                    None
                }
            },
        };

        let mut subtasks = Vec::with_capacity(self.subtasks.len());
        for subtask in &self.subtasks {
            let title = subtask.title.trim();
            if title.is_empty() {
                errors.add("subtasks", "Subtasks need a title");
            }
            subtasks.push(Subtask { title: title.to_string(), done: subtask.done });
        }

        if self.column_id.is_empty() {
            errors.add("column", "Pick a column");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(TaskInput {
            column_id: self.column_id.clone(),
            title,
            description: self.description.trim_end().to_string(),
            due_date,
            priority: self.priority,
            labels: split_list(&self.labels),
            subtasks,
            assignees: split_list(&self.assignees),
        })
    }
}

pub fn validate_column_title(title: &str) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::default();
    let title = check_title(&mut errors, "title", title, COLUMN_TITLE_MAX);
    if errors.is_empty() { Ok(title) } else { Err(errors) }
}

pub fn validate_board_title(title: &str) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::default();
    let title = check_title(&mut errors, "title", title, BOARD_TITLE_MAX);
    if errors.is_empty() { Ok(title) } else { Err(errors) }
}

pub fn validate_login(email: &str, password: &str) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::default();
    let email = email.trim();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !email.contains('@') {
        errors.add("email", "Enter a valid email address");
    }
    if password.is_empty() {
        errors.add("password", "Password is required");
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(Credentials { email: email.to_string(), password: password.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft { column_id: "a".into(), title: title.into(), ..Default::default() }
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" design, ,copy,design ,  "), vec!["design", "copy"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_task_title_rules() {
        let errors = draft("   ").validate().unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required"));

        let long = "x".repeat(TASK_TITLE_MAX + 1);
        assert!(draft(&long).validate().unwrap_err().get("title").is_some());

        let ok = draft("  Invoice client  ").validate().unwrap();
        assert_eq!(ok.title, "Invoice client");
    }

    #[test]
    fn test_task_draft_normalizes_lists_and_dates() {
        let mut d = draft("Logo");
        d.labels = "brand, urgent,brand".into();
        d.assignees = "ana,".into();
        d.due_date = "2026-03-01".into();
        let input = d.validate().unwrap();
        assert_eq!(input.labels, vec!["brand", "urgent"]);
        assert_eq!(input.assignees, vec!["ana"]);
        assert_eq!(input.due_date, NaiveDate::from_ymd_opt(2026, 3, 1));
    }

    #[test]
    fn test_task_draft_rejects_bad_date_and_blank_subtask() {
        let mut d = draft("Logo");
        d.due_date = "tomorrow".into();
        d.subtasks = vec![Subtask { title: " ".into(), done: false }];
        let errors = d.validate().unwrap_err();
        assert!(errors.get("due_date").is_some());
        assert!(errors.get("subtasks").is_some());
    }

    #[test]
    fn test_draft_from_input_roundtrips_lists() {
        let input = draft("Logo").validate().unwrap();
        let mut with_labels = input.clone();
        with_labels.labels = vec!["a".into(), "b".into()];
        assert_eq!(TaskDraft::from_input(&with_labels).labels, "a, b");
    }

    #[test]
    fn test_column_and_board_titles() {
        assert!(validate_column_title("").is_err());
        assert!(validate_column_title(&"c".repeat(COLUMN_TITLE_MAX + 1)).is_err());
        assert_eq!(validate_column_title(" Done ").unwrap(), "Done");
        assert!(validate_board_title(&"b".repeat(BOARD_TITLE_MAX)).is_ok());
    }

    #[test]
    fn test_login_rules() {
        let errors = validate_login("nobody", "").unwrap_err();
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
        let creds = validate_login(" me@example.com ", "pw").unwrap();
        assert_eq!(creds.email, "me@example.com");
    }
}
