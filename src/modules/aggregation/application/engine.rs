use super::task_executor::TaskExecutor;
use crate::modules::aggregation::domain::entities::{
    Request, TaskKind, TaskOutcome, UpstreamResults,
};
use crate::modules::aggregation::domain::errors::AggregationError;
use crate::modules::aggregation::domain::services::{DependentRule, FetchPlanner, JoinSelect};
use crate::modules::catalog::{CatalogPayload, ImageResolver, RetryPolicy, TmdbAdapter};
use crate::shared::config::AppConfig;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Settled results of one request: the independent batch, then the batch
/// planned from it (empty when the plan has no dependent rule).
#[derive(Debug, Clone, PartialEq)]
pub struct Gathered {
    pub independent: UpstreamResults,
    pub dependent: UpstreamResults,
}

/// Planner, executor and join wired together. Shared by every view service.
#[derive(Clone)]
pub struct AggregationEngine {
    planner: FetchPlanner,
    executor: TaskExecutor,
    join: JoinSelect,
}

impl AggregationEngine {
    pub fn new(adapter: TmdbAdapter, images: ImageResolver, config: &AppConfig) -> Self {
        Self {
            planner: FetchPlanner::new(adapter.region()),
            executor: TaskExecutor::new(
                adapter,
                config.request_timeout,
                RetryPolicy::primary(config.primary_retries),
            ),
            join: JoinSelect::new(images),
        }
    }

    pub fn join(&self) -> &JoinSelect {
        &self.join
    }

    /// Plan the request and run every task it needs. Dependent tasks start
    /// only once their parents are known, and still run concurrently.
    pub async fn gather(
        &self,
        request: &Request,
        token: &CancellationToken,
    ) -> Result<Gathered, AggregationError> {
        let plan = self.planner.plan(request);
        let mut tasks = plan.independent;
        let independent = self.executor.run_all(&mut tasks, token).await?;

        let dependent = match plan.dependent {
            Some(rule) => {
                let parents = parent_ids(&independent, &rule);
                if parents.is_empty() {
                    UpstreamResults::empty()
                } else {
                    let mut deps = self.planner.plan_dependents(&rule, &parents, tasks.len());
                    debug!(
                        "{}: issuing {} dependent task(s)",
                        request.label(),
                        deps.len()
                    );
                    self.executor.run_all(&mut deps, token).await?
                }
            }
            None => UpstreamResults::empty(),
        };

        Ok(Gathered {
            independent,
            dependent,
        })
    }
}

/// Ids of the listing items a dependent rule applies to, in listing order
fn parent_ids(results: &UpstreamResults, rule: &DependentRule) -> Vec<u64> {
    let DependentRule::VideosPerItem { cap, .. } = rule;
    match results.get(TaskKind::Listing).map(|slot| &slot.outcome) {
        Some(TaskOutcome::Done(CatalogPayload::Page(page))) => {
            page.results.iter().take(*cap).map(|item| item.id).collect()
        }
        _ => Vec::new(),
    }
}
