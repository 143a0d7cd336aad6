//! Deterministic selection and projection rules shared by every join

use crate::modules::catalog::models::{CrewMember, Video};
use chrono::{Datelike, NaiveDate};

const SITE_YOUTUBE: &str = "YouTube";
const TYPE_TRAILER: &str = "Trailer";

/// Pick the trailer to show for a title.
///
/// Two-tier search in upstream order: the first official YouTube trailer,
/// else the first YouTube trailer of any kind. Teasers, clips and other
/// hosts never qualify.
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
    let is_youtube_trailer = |v: &&Video| v.site == SITE_YOUTUBE && v.r#type == TYPE_TRAILER;

    videos
        .iter()
        .filter(is_youtube_trailer)
        .find(|v| v.official)
        .or_else(|| videos.iter().find(is_youtube_trailer))
}

/// `title` when present and non-empty, else `name`
pub fn display_title(title: Option<&str>, name: Option<&str>) -> String {
    title
        .filter(|t| !t.is_empty())
        .or(name)
        .unwrap_or_default()
        .to_string()
}

/// Backdrop when present, else poster. No further fallback.
pub fn display_image<'a>(backdrop: Option<&'a str>, poster: Option<&'a str>) -> Option<&'a str> {
    backdrop.filter(|p| !p.is_empty()).or(poster.filter(|p| !p.is_empty()))
}

/// Four-digit year of a catalog date (`YYYY-MM-DD`)
pub fn year_of(date: Option<&str>) -> Option<String> {
    let date = date?.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year().to_string())
}

pub fn directors(crew: &[CrewMember]) -> Vec<CrewMember> {
    crew.iter()
        .filter(|c| c.job.as_deref() == Some("Director"))
        .cloned()
        .collect()
}

/// Creators and writers
pub fn creators(crew: &[CrewMember]) -> Vec<CrewMember> {
    crew.iter()
        .filter(|c| {
            c.job.as_deref() == Some("Creator") || c.department.as_deref() == Some("Writing")
        })
        .cloned()
        .collect()
}
