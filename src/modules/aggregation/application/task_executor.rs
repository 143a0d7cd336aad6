//! Runs planned fetch tasks concurrently and collects their outcomes.
//!
//! Launch order follows the plan; completion order is whatever the network
//! gives. Outcomes are stored by task position, so the result shape never
//! depends on arrival order.

use crate::modules::aggregation::domain::entities::{
    FetchTask, TaskOutcome, TaskState, UpstreamResults,
};
use crate::modules::aggregation::domain::errors::AggregationError;
use crate::modules::catalog::{CatalogPayload, RetryPolicy, TmdbAdapter};
use crate::shared::errors::{AppError, AppResult};
use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Clone)]
pub struct TaskExecutor {
    adapter: TmdbAdapter,
    timeout: Duration,
    primary_retry: RetryPolicy,
}

impl TaskExecutor {
    pub fn new(adapter: TmdbAdapter, timeout: Duration, primary_retry: RetryPolicy) -> Self {
        Self {
            adapter,
            timeout,
            primary_retry,
        }
    }

    /// Run every task to completion unless `token` fires first. Task states
    /// are updated in place as outcomes arrive.
    pub async fn run_all(
        &self,
        tasks: &mut [FetchTask],
        token: &CancellationToken,
    ) -> Result<UpstreamResults, AggregationError> {
        if token.is_cancelled() {
            return Err(AggregationError::Cancelled);
        }

        let mut pending: FuturesUnordered<_> = tasks
            .iter()
            .enumerate()
            .map(|(index, task)| {
                let task = task.clone();
                async move { (index, self.run_one(&task).await) }
            })
            .collect();

        let mut outcomes: Vec<Option<TaskOutcome>> = (0..tasks.len()).map(|_| None).collect();

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Cancelled with {} task(s) still in flight", pending.len());
                    return Err(AggregationError::Cancelled);
                }
                next = pending.next() => match next {
                    Some((index, outcome)) => {
                        tasks[index].state = if outcome.is_done() {
                            TaskState::Done
                        } else {
                            TaskState::Failed
                        };
                        outcomes[index] = Some(outcome);
                    }
                    None => break,
                }
            }
        }

        Ok(UpstreamResults::settle(tasks, outcomes))
    }

    async fn run_one(&self, task: &FetchTask) -> TaskOutcome {
        let name = task.describe();
        let result = if task.is_primary() {
            self.primary_retry
                .run(|| self.attempt(task), &name)
                .await
        } else {
            self.attempt(task).await
        };

        match result {
            Ok(payload) => TaskOutcome::Done(payload),
            Err(err) => {
                debug!("{} failed: {}", name, err);
                TaskOutcome::Failed(err)
            }
        }
    }

    /// One bounded attempt
    async fn attempt(&self, task: &FetchTask) -> AppResult<CatalogPayload> {
        match tokio::time::timeout(self.timeout, self.adapter.fetch(&task.endpoint)).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(format!(
                "{} request timed out after {}s",
                task.kind.label(),
                self.timeout.as_secs_f32()
            ))),
        }
    }
}
