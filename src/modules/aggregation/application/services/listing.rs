use crate::modules::aggregation::application::aggregation::Aggregation;
use crate::modules::aggregation::application::engine::AggregationEngine;
use crate::modules::aggregation::domain::entities::{CardListView, Request};
use crate::modules::aggregation::domain::errors::{AggregationError, Outcome};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Card lists: popular, trending, trending people and similar titles
#[derive(Clone)]
pub struct ListingAggregation {
    engine: AggregationEngine,
}

impl ListingAggregation {
    pub fn new(engine: AggregationEngine) -> Self {
        Self { engine }
    }

    /// The request for `page` of the same list, if `view` says it exists.
    /// Lists without paging return `None`.
    pub fn page_request(current: &Request, view: &CardListView, page: u32) -> Option<Request> {
        if !view.cards.can_go_to(page) {
            return None;
        }
        match current {
            Request::Popular { kind, .. } => Some(Request::Popular { kind: *kind, page }),
            Request::Similar { id, kind, .. } => Some(Request::Similar {
                id: *id,
                kind: *kind,
                page,
            }),
            _ => None,
        }
    }
}

#[async_trait]
impl Aggregation for ListingAggregation {
    type Output = CardListView;

    fn name(&self) -> &'static str {
        "listing"
    }

    async fn aggregate(
        &self,
        request: &Request,
        token: &CancellationToken,
    ) -> Result<Outcome<CardListView>, AggregationError> {
        match request {
            Request::Popular { .. }
            | Request::Similar { .. }
            | Request::Trending { .. }
            | Request::TrendingPeople => {}
            other => {
                return Err(AggregationError::InvalidRequest(format!(
                    "{} request sent to a card list",
                    other.label()
                )))
            }
        }

        let gathered = self.engine.gather(request, token).await?;
        self.engine.join().join_listing(request, gathered.independent)
    }
}
