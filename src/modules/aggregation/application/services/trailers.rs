use crate::modules::aggregation::application::aggregation::Aggregation;
use crate::modules::aggregation::application::engine::AggregationEngine;
use crate::modules::aggregation::domain::entities::{Request, TrailerListView};
use crate::modules::aggregation::domain::errors::{AggregationError, Outcome};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Trailer carousel: a category listing, then one videos lookup per item
#[derive(Clone)]
pub struct TrailersAggregation {
    engine: AggregationEngine,
}

impl TrailersAggregation {
    pub fn new(engine: AggregationEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Aggregation for TrailersAggregation {
    type Output = TrailerListView;

    fn name(&self) -> &'static str {
        "trailers"
    }

    async fn aggregate(
        &self,
        request: &Request,
        token: &CancellationToken,
    ) -> Result<Outcome<TrailerListView>, AggregationError> {
        let Request::Trailers { category } = request else {
            return Err(AggregationError::InvalidRequest(format!(
                "{} request sent to the trailer carousel",
                request.label()
            )));
        };

        let gathered = self.engine.gather(request, token).await?;
        self.engine
            .join()
            .join_trailers(*category, gathered.independent, gathered.dependent)
    }
}
