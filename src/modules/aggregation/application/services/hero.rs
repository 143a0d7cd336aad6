use crate::modules::aggregation::application::aggregation::Aggregation;
use crate::modules::aggregation::application::engine::AggregationEngine;
use crate::modules::aggregation::domain::entities::{HeroView, Request};
use crate::modules::aggregation::domain::errors::{AggregationError, Outcome};
use crate::modules::genre::GenreStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Home hero slides. Genre names come from the shared genre store; ids it
/// cannot resolve read as "Unknown".
#[derive(Clone)]
pub struct HeroAggregation {
    engine: AggregationEngine,
    genres: Arc<GenreStore>,
}

impl HeroAggregation {
    pub fn new(engine: AggregationEngine, genres: Arc<GenreStore>) -> Self {
        Self { engine, genres }
    }
}

#[async_trait]
impl Aggregation for HeroAggregation {
    type Output = HeroView;

    fn name(&self) -> &'static str {
        "hero"
    }

    async fn aggregate(
        &self,
        request: &Request,
        token: &CancellationToken,
    ) -> Result<Outcome<HeroView>, AggregationError> {
        if *request != Request::Hero {
            return Err(AggregationError::InvalidRequest(format!(
                "{} request sent to the hero carousel",
                request.label()
            )));
        }

        let (gathered, genres) = tokio::join!(
            self.engine.gather(request, token),
            self.genres.ensure_loaded()
        );
        let gathered = gathered?;
        if genres.is_none() {
            debug!("Hero slides built without genre names");
        }

        self.engine
            .join()
            .join_hero(gathered.independent, self.genres.name_lookup())
    }
}
