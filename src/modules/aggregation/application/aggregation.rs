use crate::modules::aggregation::domain::entities::Request;
use crate::modules::aggregation::domain::errors::{AggregationError, Outcome};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// One view context's aggregation: runs a request to a settled outcome.
///
/// Implementations must return `AggregationError::Cancelled` (or anything,
/// it is discarded) once `token` fires; the lifecycle controller never
/// applies a result whose token was cancelled.
#[async_trait]
pub trait Aggregation: Send + Sync + 'static {
    type Output: Send + Sync + 'static;

    fn name(&self) -> &'static str;

    async fn aggregate(
        &self,
        request: &Request,
        token: &CancellationToken,
    ) -> Result<Outcome<Self::Output>, AggregationError>;
}
