//! Board State Store
//!
//! In-memory mapping of column id -> ordered task ids, plus the task data.
//! Every mutation of a loaded board goes through the methods here; each
//! keeps the invariant that a task sits in exactly one column sequence and
//! that its `column_id` names that column.

use std::collections::{HashMap, HashSet};

use leptos_dragdrop::DropTarget;

use crate::models::{BoardSnapshot, Column, Task};

/// One column and its ordered task ids
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnState {
    pub id: String,
    pub title: String,
    pub task_ids: Vec<String>,
}

/// A move that was applied locally and still has to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    pub task_id: String,
    pub from_column: String,
    pub from_index: usize,
    pub to_column: String,
    pub to_index: usize,
}

impl TaskMove {
    pub fn is_within_column(&self) -> bool {
        self.from_column == self.to_column
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardState {
    pub board_id: String,
    pub title: String,
    columns: Vec<ColumnState>,
    tasks: HashMap<String, Task>,
}

/// Order columns by the board's explicit list, then by `position`, then by
/// payload order. Stable throughout.
fn order_columns(column_ids: &[String], mut columns: Vec<Column>) -> Vec<Column> {
    if column_ids.is_empty() {
        columns.sort_by_key(|c| c.position.unwrap_or(i64::MAX));
        return columns;
    }
    let rank: HashMap<&str, usize> = column_ids.iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect();
    let mut ranked: Vec<(usize, Column)> = columns
        .into_iter()
        .map(|c| (rank.get(c.id.as_str()).copied().unwrap_or(usize::MAX), c))
        .collect();
    ranked.sort_by_key(|(r, _)| *r);
    ranked.into_iter().map(|(_, c)| c).collect()
}

impl BoardState {
    /// Build local state from a server snapshot
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Self {
        let BoardSnapshot { board, columns, tasks } = snapshot;
        let columns = order_columns(&board.column_ids, columns);

        let mut by_id: HashMap<String, Task> = HashMap::with_capacity(tasks.len());
        // Payload order, used for tasks without explicit ordering
        let mut arrival: Vec<String> = Vec::with_capacity(tasks.len());
        for task in tasks {
            if by_id.contains_key(&task.id) {
                log::warn!("[BOARD] duplicate task {} in payload, keeping first", task.id);
                continue;
            }
            arrival.push(task.id.clone());
            by_id.insert(task.id.clone(), task);
        }

        let mut placed: HashSet<String> = HashSet::new();
        let mut states: Vec<ColumnState> = Vec::with_capacity(columns.len());
        for column in &columns {
            let mut ids = Vec::new();
            if let Some(listed) = &column.task_ids {
                for id in listed {
                    if by_id.contains_key(id) && placed.insert(id.clone()) {
                        ids.push(id.clone());
                    }
                }
            }
            states.push(ColumnState {
                id: column.id.clone(),
                title: column.title.clone(),
                task_ids: ids,
            });
        }

        // Tasks not listed by any column fall back to their own column_id,
        // ordered by position hint
        let mut leftovers: Vec<&Task> = arrival
            .iter()
            .filter(|id| !placed.contains(*id))
            .filter_map(|id| by_id.get(id))
            .collect();
        leftovers.sort_by_key(|t| t.position.unwrap_or(i64::MAX));
        let mut dropped = Vec::new();
        for task in leftovers {
            match states.iter_mut().find(|c| c.id == task.column_id) {
                Some(column) => column.task_ids.push(task.id.clone()),
                None => dropped.push(task.id.clone()),
            }
        }
        for id in dropped {
            log::warn!("[BOARD] task {} references an unknown column, dropping", id);
            by_id.remove(&id);
        }

        let mut state = BoardState {
            board_id: board.id,
            title: board.title,
            columns: states,
            tasks: by_id,
        };
        state.sync_task_fields();
        state
    }

    /// Refresh `column_id` and `position` of every task from the sequences
    fn sync_task_fields(&mut self) {
        for column in &self.columns {
            for (pos, id) in column.task_ids.iter().enumerate() {
                if let Some(task) = self.tasks.get_mut(id) {
                    task.column_id = column.id.clone();
                    task.position = Some(pos as i64);
                }
            }
        }
    }

    fn sync_column_positions(&mut self, column_index: usize) {
        let column = &self.columns[column_index];
        for (pos, id) in column.task_ids.iter().enumerate() {
            if let Some(task) = self.tasks.get_mut(id) {
                task.column_id = column.id.clone();
                task.position = Some(pos as i64);
            }
        }
    }

    pub fn columns(&self) -> &[ColumnState] {
        &self.columns
    }

    pub fn column(&self, column_id: &str) -> Option<&ColumnState> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// (column index, position) of a task
    pub fn locate(&self, task_id: &str) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(ci, c)| {
            c.task_ids.iter().position(|id| id == task_id).map(|pos| (ci, pos))
        })
    }

    /// Move a task to `target_index` of `target_column` (index clamped).
    ///
    /// Returns None when nothing changed: unknown task or column, or the
    /// task is already at that place.
    pub fn move_task(&mut self, task_id: &str, target_column: &str, target_index: usize) -> Option<TaskMove> {
        let (from_ci, from_index) = self.locate(task_id)?;
        let to_ci = self.column_index(target_column)?;

        if from_ci == to_ci {
            let last = self.columns[from_ci].task_ids.len() - 1;
            if target_index.min(last) == from_index {
                return None;
            }
        }

        let id = self.columns[from_ci].task_ids.remove(from_index);
        let to_index = target_index.min(self.columns[to_ci].task_ids.len());
        self.columns[to_ci].task_ids.insert(to_index, id);

        self.sync_column_positions(from_ci);
        if to_ci != from_ci {
            self.sync_column_positions(to_ci);
        }

        Some(TaskMove {
            task_id: task_id.to_string(),
            from_column: self.columns[from_ci].id.clone(),
            from_index,
            to_column: self.columns[to_ci].id.clone(),
            to_index,
        })
    }

    /// Splice a task to `new_index` inside its own column
    pub fn reorder_within_column(&mut self, task_id: &str, new_index: usize) -> Option<TaskMove> {
        let (ci, _) = self.locate(task_id)?;
        let column_id = self.columns[ci].id.clone();
        self.move_task(task_id, &column_id, new_index)
    }

    /// Where a drop on `target` would put the dragged task
    pub fn resolve_drop(&self, task_id: &str, target: &DropTarget) -> Option<(String, usize)> {
        match target {
            DropTarget::Card(over_id) if over_id == task_id => None,
            DropTarget::Card(over_id) => {
                let (ci, pos) = self.locate(over_id)?;
                Some((self.columns[ci].id.clone(), pos))
            }
            DropTarget::Lane(column_id) => {
                let column = self.column(column_id)?;
                Some((column.id.clone(), column.task_ids.len()))
            }
        }
    }

    /// Apply a finished drag gesture
    pub fn apply_drop(&mut self, task_id: &str, target: &DropTarget) -> Option<TaskMove> {
        let (column_id, index) = self.resolve_drop(task_id, target)?;
        self.move_task(task_id, &column_id, index)
    }

    /// Insert a task at the end of its column. False if the column is
    /// unknown or the id is taken.
    pub fn insert_task(&mut self, task: Task) -> bool {
        if self.tasks.contains_key(&task.id) {
            return false;
        }
        let Some(ci) = self.column_index(&task.column_id) else {
            return false;
        };
        self.columns[ci].task_ids.push(task.id.clone());
        self.tasks.insert(task.id.clone(), task);
        self.sync_column_positions(ci);
        true
    }

    /// Replace a task's data, keeping its place on the board
    pub fn replace_task(&mut self, mut task: Task) -> bool {
        let Some(current) = self.tasks.get(&task.id) else {
            return false;
        };
        task.column_id = current.column_id.clone();
        task.position = current.position;
        self.tasks.insert(task.id.clone(), task);
        true
    }

    /// Swap a transient id for the server's task, same place on the board
    pub fn confirm_task(&mut self, transient_id: &str, mut task: Task) -> bool {
        let Some((ci, pos)) = self.locate(transient_id) else {
            return false;
        };
        self.tasks.remove(transient_id);
        task.column_id = self.columns[ci].id.clone();
        task.position = Some(pos as i64);
        self.columns[ci].task_ids[pos] = task.id.clone();
        self.tasks.insert(task.id.clone(), task);
        true
    }

    pub fn remove_task(&mut self, task_id: &str) -> Option<Task> {
        let (ci, pos) = self.locate(task_id)?;
        self.columns[ci].task_ids.remove(pos);
        self.sync_column_positions(ci);
        self.tasks.remove(task_id)
    }

    /// Append a column. False if the id is taken.
    pub fn add_column(&mut self, id: impl Into<String>, title: impl Into<String>) -> bool {
        let id = id.into();
        if self.column_index(&id).is_some() {
            return false;
        }
        self.columns.push(ColumnState { id, title: title.into(), task_ids: Vec::new() });
        true
    }

    pub fn rename_column(&mut self, column_id: &str, title: impl Into<String>) -> bool {
        match self.columns.iter_mut().find(|c| c.id == column_id) {
            Some(column) => {
                column.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Swap a transient column id for the server's
    pub fn confirm_column(&mut self, transient_id: &str, id: &str) -> bool {
        let Some(ci) = self.column_index(transient_id) else {
            return false;
        };
        self.columns[ci].id = id.to_string();
        self.sync_column_positions(ci);
        true
    }

    /// Remove a column together with its tasks
    pub fn remove_column(&mut self, column_id: &str) -> Option<(ColumnState, Vec<Task>)> {
        let ci = self.column_index(column_id)?;
        let column = self.columns.remove(ci);
        let tasks = column.task_ids.iter().filter_map(|id| self.tasks.remove(id)).collect();
        Some((column, tasks))
    }

    /// Check that every task sits in exactly one column and every column
    /// entry refers to a known task
    pub fn check_integrity(&self) -> Result<(), String> {
        let mut seen: HashSet<&str> = HashSet::new();
        for column in &self.columns {
            for (pos, id) in column.task_ids.iter().enumerate() {
                if !seen.insert(id.as_str()) {
                    return Err(format!("task {} appears more than once", id));
                }
                let task = self.tasks.get(id).ok_or_else(|| format!("column {} lists unknown task {}", column.id, id))?;
                if task.column_id != column.id {
                    return Err(format!("task {} sits in {} but claims {}", id, column.id, task.column_id));
                }
                if task.position != Some(pos as i64) {
                    return Err(format!("task {} has stale position", id));
                }
            }
        }
        if seen.len() != self.tasks.len() {
            return Err(format!("{} tasks are in no column", self.tasks.len() - seen.len()));
        }
        Ok(())
    }
}
