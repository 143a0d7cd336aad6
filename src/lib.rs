pub mod modules;
pub mod shared;

use modules::{
    aggregation::{
        AggregationEngine, DetailAggregation, HeroAggregation, LifecycleController,
        ListingAggregation, TrailersAggregation,
    },
    catalog::{CatalogTransport, ImageResolver, RateLimitClient, TmdbAdapter},
    genre::{GenreStore, LoadOutcome},
    player::TrailerPlayer,
};
use shared::{utils::init_logger, AppConfig, AppResult};
use std::sync::Arc;

/// Process-scoped composition root. Owns the shared pieces (transport,
/// genre store, trailer player) and hands out one lifecycle controller per
/// view instance.
pub struct MarqueeApp {
    config: AppConfig,
    images: ImageResolver,
    engine: AggregationEngine,
    genres: Arc<GenreStore>,
    player: Arc<TrailerPlayer>,
}

impl MarqueeApp {
    /// Load `.env`, read configuration and start logging
    pub fn from_env() -> AppResult<Self> {
        init_logger();
        let config = AppConfig::from_env()?;
        Self::new(config)
    }

    /// Wire the real rate-limited HTTP transport
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let transport = RateLimitClient::for_tmdb(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: AppConfig, transport: Arc<dyn CatalogTransport>) -> Self {
        let adapter = TmdbAdapter::new(transport, &config);
        let images = ImageResolver::new(&config.image_base_url);
        let engine = AggregationEngine::new(adapter.clone(), images.clone(), &config);

        log::info!(
            "Marquee ready (api: {}, region: {}, timeout: {}s)",
            config.api_url,
            config.region,
            config.request_timeout.as_secs()
        );

        Self {
            config,
            images,
            engine,
            genres: Arc::new(GenreStore::new(adapter)),
            player: Arc::new(TrailerPlayer::new()),
        }
    }

    pub fn detail_view(&self) -> LifecycleController<DetailAggregation> {
        LifecycleController::new(Arc::new(DetailAggregation::new(self.engine.clone())))
    }

    pub fn trailers_view(&self) -> LifecycleController<TrailersAggregation> {
        LifecycleController::new(Arc::new(TrailersAggregation::new(self.engine.clone())))
    }

    /// Popular, trending, trending-people and similar lists
    pub fn listing_view(&self) -> LifecycleController<ListingAggregation> {
        LifecycleController::new(Arc::new(ListingAggregation::new(self.engine.clone())))
    }

    pub fn hero_view(&self) -> LifecycleController<HeroAggregation> {
        LifecycleController::new(Arc::new(HeroAggregation::new(
            self.engine.clone(),
            Arc::clone(&self.genres),
        )))
    }

    /// Populate the genre cache. Safe to call from every view on startup.
    pub async fn load_genres(&self) -> LoadOutcome {
        self.genres.load().await
    }

    pub fn genres(&self) -> &Arc<GenreStore> {
        &self.genres
    }

    pub fn player(&self) -> &Arc<TrailerPlayer> {
        &self.player
    }

    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
