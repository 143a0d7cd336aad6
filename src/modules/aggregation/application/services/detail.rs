use crate::modules::aggregation::application::aggregation::Aggregation;
use crate::modules::aggregation::application::engine::AggregationEngine;
use crate::modules::aggregation::domain::entities::{DetailView, Request};
use crate::modules::aggregation::domain::errors::{AggregationError, Outcome};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Details, credits and videos of one title, joined into a `DetailView`
#[derive(Clone)]
pub struct DetailAggregation {
    engine: AggregationEngine,
}

impl DetailAggregation {
    pub fn new(engine: AggregationEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Aggregation for DetailAggregation {
    type Output = DetailView;

    fn name(&self) -> &'static str {
        "detail"
    }

    async fn aggregate(
        &self,
        request: &Request,
        token: &CancellationToken,
    ) -> Result<Outcome<DetailView>, AggregationError> {
        let Request::Detail { kind, .. } = request else {
            return Err(AggregationError::InvalidRequest(format!(
                "{} request sent to the detail view",
                request.label()
            )));
        };

        let gathered = self.engine.gather(request, token).await?;
        self.engine
            .join()
            .join_detail(*kind, gathered.independent)
            .map(Outcome::Loaded)
    }
}
