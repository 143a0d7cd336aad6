//! Fully resolved records handed to the presentation layer.
//!
//! A view is built in one piece after every task of its request settled and
//! is never mutated afterwards.

use crate::modules::catalog::models::{CreditsResponse, CrewMember, MediaDetails, Video};
use crate::modules::catalog::EntityKind;
use crate::modules::player::domain::youtube;
use crate::shared::application::PaginatedResult;
use serde::Serialize;

/// The trailer picked for a title, with its playback URLs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTrailer {
    pub key: String,
    pub name: String,
    pub official: bool,
    pub embed_url: String,
    pub watch_url: String,
    pub thumbnail_url: String,
}

impl ResolvedTrailer {
    pub fn from_video(video: &Video) -> Self {
        Self {
            key: video.key.clone(),
            name: video.name.clone(),
            official: video.official,
            embed_url: youtube::embed_url(&video.key),
            watch_url: youtube::watch_url(&video.key),
            thumbnail_url: youtube::thumbnail_url(Some(&video.key)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastCard {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub media: MediaDetails,
    pub display_title: String,
    /// Backdrop, else poster, else placeholder
    pub display_image_url: String,
    pub poster_url: String,
    pub year: Option<String>,
    pub credits: CreditsResponse,
    pub cast: Vec<CastCard>,
    pub directors: Vec<CrewMember>,
    pub creators: Vec<CrewMember>,
    pub trailer: Option<ResolvedTrailer>,
}

impl DetailView {
    pub fn has_trailer(&self) -> bool {
        self.trailer.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailerCard {
    pub id: u64,
    pub title: String,
    /// Backdrop path, else poster path
    pub image_path: Option<String>,
    pub image_url: String,
    pub trailer: ResolvedTrailer,
    pub category: EntityKind,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailerListView {
    pub category: EntityKind,
    pub cards: Vec<TrailerCard>,
}

/// Compact card used by every list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaCard {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub poster_url: String,
    pub release_date: Option<String>,
    pub vote_average: Option<f32>,
    pub media_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardListView {
    pub cards: PaginatedResult<MediaCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroSlide {
    pub id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub image_url: String,
    pub release_date: Option<String>,
    pub vote_average: Option<f32>,
    pub genre_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroView {
    pub slides: Vec<HeroSlide>,
}

/// Slide index arithmetic for the hero carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroCarousel {
    len: usize,
    index: usize,
}

impl HeroCarousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    pub fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    /// Jump to a slide. Returns false when nothing changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len || index == self.index {
            return false;
        }
        self.index = index;
        true
    }
}
