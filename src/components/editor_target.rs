//! Edit Target Type
//!
//! What the task modal is showing.

#[derive(Clone, Debug, PartialEq)]
pub enum EditTarget {
    /// Blank form for a new task in this column
    NewTask { column_id: String },
    /// Existing task by id
    Task(String),
}
