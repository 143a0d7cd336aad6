use super::fetch_task::{FetchTask, TaskId, TaskKind};
use crate::modules::catalog::CatalogPayload;
use crate::shared::errors::AppError;

#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    Done(CatalogPayload),
    Failed(AppError),
}

impl TaskOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, TaskOutcome::Done(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResult {
    pub task: TaskId,
    pub kind: TaskKind,
    pub outcome: TaskOutcome,
}

/// Settled results of one batch of tasks, one slot per task in plan order.
/// A failed task still owns its slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpstreamResults {
    slots: Vec<UpstreamResult>,
}

impl UpstreamResults {
    /// Pair each task with its outcome. A task without an outcome is recorded
    /// as failed so the shape always matches the plan.
    pub fn settle(tasks: &[FetchTask], outcomes: Vec<Option<TaskOutcome>>) -> Self {
        let mut outcomes = outcomes.into_iter();
        let slots = tasks
            .iter()
            .map(|task| UpstreamResult {
                task: task.id,
                kind: task.kind,
                outcome: outcomes.next().flatten().unwrap_or_else(|| {
                    TaskOutcome::Failed(AppError::InternalError(format!(
                        "{} never settled",
                        task.describe()
                    )))
                }),
            })
            .collect();

        Self { slots }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UpstreamResult> {
        self.slots.iter()
    }

    /// First slot of the given kind
    pub fn get(&self, kind: TaskKind) -> Option<&UpstreamResult> {
        self.slots.iter().find(|slot| slot.kind == kind)
    }

    /// Remove and return the first slot of the given kind
    pub fn take(&mut self, kind: TaskKind) -> Option<UpstreamResult> {
        let index = self.slots.iter().position(|slot| slot.kind == kind)?;
        Some(self.slots.remove(index))
    }
}

impl IntoIterator for UpstreamResults {
    type Item = UpstreamResult;
    type IntoIter = std::vec::IntoIter<UpstreamResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}
