use std::collections::HashMap;

use chrono::DateTime;
use chrono_tz::Tz;
use log::debug;

use crate::error::TaskError;
use crate::model::task::{Status, Task, TaskId};

/// In-memory task collection keyed by id. Iteration follows insertion order.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: HashMap<TaskId, Task>,
    order: Vec<TaskId>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Inserts a task, rejecting duplicate ids. `now` fixes the point at
    /// which the insertion-time priority score is taken; the score is
    /// recorded once here and never refreshed.
    pub fn add(&mut self, task: Task, now: DateTime<Tz>) -> Result<(), TaskError> {
        if self.tasks.contains_key(&task.id) {
            return Err(TaskError::DuplicateTaskId(task.id.clone()));
        }
        debug!(
            "add {}: due {}, score {} at insertion",
            task.id,
            task.due_at,
            task.priority_score(now)
        );
        self.order.push(task.id.clone());
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    /// Removes and returns the task, or reports it missing.
    pub fn remove(&mut self, id: &TaskId) -> Result<Task, TaskError> {
        match self.tasks.remove(id) {
            Some(task) => {
                self.order.retain(|existing| existing != id);
                debug!("removed {}", id);
                Ok(task)
            }
            None => Err(TaskError::TaskNotFound(id.clone())),
        }
    }

    /// Overwrites a task's status and returns the previous value.
    pub fn update_status(&mut self, id: &TaskId, status: Status) -> Result<Status, TaskError> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| TaskError::TaskNotFound(id.clone()))?;
        Ok(task.update_status(status))
    }

    /// All tasks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> + '_ {
        self.order.iter().filter_map(|id| self.tasks.get(id))
    }

    /// Tasks whose due time has passed and which are not completed,
    /// in insertion order.
    pub fn overdue(&self, now: DateTime<Tz>) -> Vec<&Task> {
        self.iter().filter(|task| task.is_overdue(now)).collect()
    }
}
