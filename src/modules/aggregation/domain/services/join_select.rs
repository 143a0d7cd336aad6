//! Join & select: folds the settled results of one request into its view.
//!
//! Every join receives the complete, fixed-shape result set. The primary slot
//! decides success; secondary slots that failed degrade to empty defaults
//! and are only logged.

use super::fetch_planner::{HERO_SLIDE_CAP, TRAILER_ITEM_CAP};
use super::projector::{ItemHint, MediaProjector};
use super::selection::{creators, directors, display_image, display_title, select_trailer, year_of};
use crate::modules::aggregation::domain::entities::{
    CardListView, CastCard, DetailView, HeroSlide, HeroView, MediaItem, Request, ResolvedTrailer,
    TaskKind, TaskOutcome, TrailerCard, TrailerListView, UpstreamResults,
};
use crate::modules::aggregation::domain::errors::{AggregationError, Outcome};
use crate::modules::catalog::models::{CreditsResponse, TmdbMediaItem, TmdbPage, Video};
use crate::modules::catalog::{CatalogPayload, EntityKind, ImageResolver, ImageSize, MediaKind};
use crate::shared::application::PaginatedResult;
use crate::shared::errors::AppError;
use std::collections::HashMap;
use tracing::{error, warn};

#[derive(Debug, Clone)]
pub struct JoinSelect {
    projector: MediaProjector,
}

impl JoinSelect {
    pub fn new(images: ImageResolver) -> Self {
        Self {
            projector: MediaProjector::new(images),
        }
    }

    pub fn projector(&self) -> &MediaProjector {
        &self.projector
    }

    fn images(&self) -> &ImageResolver {
        self.projector.images()
    }

    // =============================================================================
    // DETAIL
    // =============================================================================

    pub fn join_detail(
        &self,
        kind: EntityKind,
        mut results: UpstreamResults,
    ) -> Result<DetailView, AggregationError> {
        let fallback = format!("Failed to load {} details.", kind.media_kind());

        let media = match results.take(TaskKind::Details).map(|slot| slot.outcome) {
            Some(TaskOutcome::Done(CatalogPayload::Details(details))) => details,
            Some(TaskOutcome::Failed(err)) => {
                return Err(primary_failure("details", &err, fallback))
            }
            Some(TaskOutcome::Done(_)) | None => {
                error!("Detail join received no details payload");
                return Err(AggregationError::primary("details", fallback));
            }
        };

        let credits = match results.take(TaskKind::Credits).map(|slot| slot.outcome) {
            Some(TaskOutcome::Done(CatalogPayload::Credits(credits))) => credits,
            other => {
                degraded("credits", other.as_ref());
                CreditsResponse::default()
            }
        };

        let videos = match results.take(TaskKind::Videos).map(|slot| slot.outcome) {
            Some(TaskOutcome::Done(CatalogPayload::Videos(videos))) => videos.results,
            other => {
                degraded("videos", other.as_ref());
                Vec::new()
            }
        };

        let images = self.images();
        let cast = credits
            .cast
            .iter()
            .map(|member| CastCard {
                id: member.id,
                name: member.name.clone(),
                character: member.character.clone(),
                profile_url: images.profile_url(member.profile_path.as_deref()),
            })
            .collect();

        Ok(DetailView {
            display_title: display_title(media.title(), media.name()),
            display_image_url: images.full_url(
                display_image(media.backdrop_path(), media.poster_path()),
                ImageSize::Original,
            ),
            poster_url: images.full_url(media.poster_path(), ImageSize::W500),
            year: year_of(media.date()),
            directors: directors(&credits.crew),
            creators: creators(&credits.crew),
            trailer: select_trailer(&videos).map(ResolvedTrailer::from_video),
            cast,
            credits,
            media,
        })
    }

    // =============================================================================
    // TRAILER CAROUSEL
    // =============================================================================

    /// `listing` holds the primary listing slot, `item_videos` one slot per
    /// item that got a videos lookup.
    pub fn join_trailers(
        &self,
        category: EntityKind,
        mut listing: UpstreamResults,
        item_videos: UpstreamResults,
    ) -> Result<Outcome<TrailerListView>, AggregationError> {
        let page = match listing.take(TaskKind::Listing).map(|slot| slot.outcome) {
            Some(TaskOutcome::Done(CatalogPayload::Page(page))) => page,
            Some(TaskOutcome::Failed(err)) => {
                return Err(primary_failure(
                    "listing",
                    &err,
                    format!("Failed to load {} trailers.", category),
                ))
            }
            Some(TaskOutcome::Done(_)) | None => {
                error!("Trailer join received no listing payload");
                return Err(AggregationError::primary(
                    "listing",
                    format!("Failed to load {} trailers.", category),
                ));
            }
        };

        let items: Vec<TmdbMediaItem> = page.results.into_iter().take(TRAILER_ITEM_CAP).collect();
        let mut videos_by_parent = collect_item_videos(&items, item_videos);

        let images = self.images();
        let cards: Vec<TrailerCard> = items
            .into_iter()
            .filter_map(|item| {
                let videos = videos_by_parent.remove(&item.id).unwrap_or_default();
                let trailer = select_trailer(&videos).map(ResolvedTrailer::from_video)?;
                let image_path =
                    display_image(item.backdrop_path.as_deref(), item.poster_path.as_deref())
                        .map(str::to_string);

                Some(TrailerCard {
                    id: item.id,
                    title: display_title(item.title.as_deref(), item.name.as_deref()),
                    image_url: images.full_url(image_path.as_deref(), ImageSize::W780),
                    image_path,
                    trailer,
                    category,
                    release_date: item.release_date.or(item.first_air_date),
                })
            })
            .collect();

        if cards.is_empty() {
            return Ok(Outcome::empty(format!("No {} trailers found.", category)));
        }

        Ok(Outcome::Loaded(TrailerListView { category, cards }))
    }

    // =============================================================================
    // CARD LISTS
    // =============================================================================

    /// Popular, trending, trending-people and similar lists
    pub fn join_listing(
        &self,
        request: &Request,
        mut results: UpstreamResults,
    ) -> Result<Outcome<CardListView>, AggregationError> {
        let (task_kind, hint) = listing_shape(request);

        let page = match results.take(task_kind).map(|slot| slot.outcome) {
            Some(TaskOutcome::Done(CatalogPayload::Page(page))) => page,
            Some(TaskOutcome::Failed(err)) if task_kind == TaskKind::Listing => {
                return Err(primary_failure("listing", &err, failure_message(request)))
            }
            other if task_kind == TaskKind::Listing => {
                error!("{} join received no listing payload: {:?}", request.label(), other);
                return Err(AggregationError::primary("listing", failure_message(request)));
            }
            other => {
                degraded(task_kind.label(), other.as_ref());
                TmdbPage::default()
            }
        };

        let projector = &self.projector;
        let cards = PaginatedResult::new(
            page.results,
            page.page,
            page.total_pages,
            page.total_results,
        )
        .map(|raw| projector.card(&projector.project(raw, hint)));

        if cards.is_empty() {
            return Ok(Outcome::empty(empty_message(request)));
        }

        Ok(Outcome::Loaded(CardListView { cards }))
    }

    // =============================================================================
    // HERO
    // =============================================================================

    pub fn join_hero<F>(
        &self,
        mut results: UpstreamResults,
        genre_name: F,
    ) -> Result<Outcome<HeroView>, AggregationError>
    where
        F: Fn(u32) -> String,
    {
        let fallback = "Failed to load trending movies.";
        let page = match results.take(TaskKind::Listing).map(|slot| slot.outcome) {
            Some(TaskOutcome::Done(CatalogPayload::Page(page))) => page,
            Some(TaskOutcome::Failed(err)) => {
                return Err(primary_failure("listing", &err, fallback))
            }
            Some(TaskOutcome::Done(_)) | None => {
                return Err(AggregationError::primary("listing", fallback))
            }
        };

        let images = self.images();
        let slides: Vec<HeroSlide> = page
            .results
            .into_iter()
            .take(HERO_SLIDE_CAP)
            .map(|raw| self.projector.project(raw, ItemHint::Movie))
            .map(|item| HeroSlide {
                id: item.id(),
                title: item.display_title().to_string(),
                overview: match &item {
                    MediaItem::Movie(m) => m.overview.clone(),
                    MediaItem::Tv(t) => t.overview.clone(),
                    MediaItem::Person(_) => None,
                },
                image_url: images.full_url(
                    display_image(item.backdrop_path(), item.poster_path()),
                    ImageSize::Original,
                ),
                release_date: item.date().map(str::to_string),
                vote_average: item.vote_average(),
                genre_names: item.genre_ids().iter().map(|&id| genre_name(id)).collect(),
            })
            .collect();

        if slides.is_empty() {
            warn!("No movies available for hero section");
            return Ok(Outcome::empty("No movies available."));
        }

        Ok(Outcome::Loaded(HeroView { slides }))
    }
}

/// Index item videos by parent id. A slot whose parent is not among the
/// listing items, or whose payload names another id, is dropped.
fn collect_item_videos(
    items: &[TmdbMediaItem],
    item_videos: UpstreamResults,
) -> HashMap<u64, Vec<Video>> {
    let mut by_parent = HashMap::new();

    for slot in item_videos {
        let TaskKind::ItemVideos { parent } = slot.kind else {
            error!("Unexpected {} slot among item videos", slot.kind.label());
            continue;
        };
        if !items.iter().any(|item| item.id == parent) {
            error!("Videos for {} have no matching listing item; dropped", parent);
            continue;
        }

        match slot.outcome {
            TaskOutcome::Done(CatalogPayload::Videos(videos)) => {
                if let Some(id) = videos.id.filter(|&id| id != parent) {
                    error!(
                        "Videos payload for {} reports id {}; treating item as trailerless",
                        parent, id
                    );
                    continue;
                }
                by_parent.insert(parent, videos.results);
            }
            other => degraded("item-videos", Some(&other)),
        }
    }

    by_parent
}

fn listing_shape(request: &Request) -> (TaskKind, ItemHint) {
    match request {
        Request::Similar { kind, .. } => (TaskKind::Similar, ItemHint::from(*kind)),
        Request::Popular { kind, .. } => (TaskKind::Listing, ItemHint::from(*kind)),
        Request::TrendingPeople => (TaskKind::Listing, ItemHint::Person),
        Request::Trending { .. } | Request::Hero | Request::Trailers { .. } => {
            (TaskKind::Listing, ItemHint::Movie)
        }
        Request::Detail { kind, .. } => (TaskKind::Listing, ItemHint::from(kind.media_kind())),
    }
}

fn failure_message(request: &Request) -> String {
    match request {
        Request::Popular { kind, .. } => format!("Failed to load {}s.", kind),
        Request::Similar { kind, .. } => format!("Failed to load similar {}s.", kind),
        Request::TrendingPeople => "Failed to load trending people.".to_string(),
        Request::Trending { .. } | Request::Hero => "Failed to load trending movies.".to_string(),
        Request::Trailers { category } => format!("Failed to load {} trailers.", category),
        Request::Detail { kind, .. } => format!("Failed to load {} details.", kind.media_kind()),
    }
}

fn empty_message(request: &Request) -> String {
    match request {
        Request::Popular { kind, .. } => format!("No {}s found.", kind),
        Request::Similar { kind, .. } => match kind {
            MediaKind::Movie => "No similar movies found.".to_string(),
            MediaKind::Tv => "No similar shows found.".to_string(),
        },
        Request::TrendingPeople => "No trending people found.".to_string(),
        Request::Trending { .. } | Request::Hero => "No trending movies found.".to_string(),
        Request::Trailers { category } => format!("No {} trailers found.", category),
        Request::Detail { .. } => "Nothing found.".to_string(),
    }
}

/// Upstream message when it has one, else the view's generic fallback
fn primary_failure(task: &str, err: &AppError, fallback: impl Into<String>) -> AggregationError {
    warn!("Primary {} task failed: {}", task, err);
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| fallback.into());
    AggregationError::primary(task, message)
}

fn degraded(task: &str, outcome: Option<&TaskOutcome>) {
    match outcome {
        Some(TaskOutcome::Failed(err)) => {
            warn!("Secondary {} task degraded to empty default: {}", task, err)
        }
        Some(TaskOutcome::Done(_)) => {
            error!("Secondary {} task returned an unexpected payload", task)
        }
        None => error!("Secondary {} task has no slot", task),
    }
}
