use super::selection::display_title;
use crate::modules::aggregation::domain::entities::{
    MediaCard, MediaItem, MovieSummary, PersonSummary, TvSummary,
};
use crate::modules::catalog::models::TmdbMediaItem;
use crate::modules::catalog::{ImageResolver, ImageSize, MediaKind};

/// What kind of entries a listing holds when items do not say so themselves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemHint {
    Movie,
    Tv,
    Person,
}

impl From<MediaKind> for ItemHint {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Movie => ItemHint::Movie,
            MediaKind::Tv => ItemHint::Tv,
        }
    }
}

/// Turns duck-typed listing entries into tagged [`MediaItem`]s and cards
#[derive(Debug, Clone)]
pub struct MediaProjector {
    images: ImageResolver,
}

impl MediaProjector {
    pub fn new(images: ImageResolver) -> Self {
        Self { images }
    }

    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    /// `media_type` on the item wins over the listing's hint
    pub fn project(&self, item: TmdbMediaItem, hint: ItemHint) -> MediaItem {
        let kind = match item.media_type.as_deref() {
            Some("movie") => ItemHint::Movie,
            Some("tv") => ItemHint::Tv,
            Some("person") => ItemHint::Person,
            _ => hint,
        };
        let title = display_title(item.title.as_deref(), item.name.as_deref());

        match kind {
            ItemHint::Movie => MediaItem::Movie(MovieSummary {
                id: item.id,
                title,
                overview: item.overview,
                poster_path: item.poster_path,
                backdrop_path: item.backdrop_path,
                release_date: item.release_date.or(item.first_air_date),
                vote_average: item.vote_average,
                genre_ids: item.genre_ids,
            }),
            ItemHint::Tv => MediaItem::Tv(TvSummary {
                id: item.id,
                name: title,
                overview: item.overview,
                poster_path: item.poster_path,
                backdrop_path: item.backdrop_path,
                first_air_date: item.first_air_date.or(item.release_date),
                vote_average: item.vote_average,
                genre_ids: item.genre_ids,
            }),
            ItemHint::Person => MediaItem::Person(PersonSummary {
                id: item.id,
                name: title,
                profile_path: item.profile_path,
                known_for_department: item.known_for_department,
            }),
        }
    }

    pub fn card(&self, item: &MediaItem) -> MediaCard {
        let poster_url = match item {
            MediaItem::Person(p) => self.images.profile_url(p.profile_path.as_deref()),
            MediaItem::Movie(_) | MediaItem::Tv(_) => {
                self.images.full_url(item.poster_path(), ImageSize::W500)
            }
        };

        MediaCard {
            id: item.id(),
            title: item.display_title().to_string(),
            poster_path: item.poster_path().map(str::to_string),
            poster_url,
            release_date: item.date().map(str::to_string),
            vote_average: item.vote_average(),
            media_type: item.kind_label().to_string(),
        }
    }
}
