mod support;

use marquee_lib::modules::aggregation::{Request, ViewState};
use marquee_lib::modules::catalog::EntityKind;
use marquee_lib::shared::AppError;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use support::{app, ScriptedTransport};

fn listing(ids: impl IntoIterator<Item = u64>) -> Value {
    let results: Vec<Value> = ids
        .into_iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Movie {}", id),
                "backdrop_path": format!("/b{}.jpg", id)
            })
        })
        .collect();
    let total = results.len();
    json!({ "page": 1, "results": results, "total_pages": 1, "total_results": total })
}

fn trailer_videos(id: u64) -> Value {
    json!({
        "id": id,
        "results": [{
            "key": format!("key{}", id),
            "site": "YouTube",
            "type": "Trailer",
            "official": true
        }]
    })
}

fn no_videos(id: u64) -> Value {
    json!({ "id": id, "results": [] })
}

#[tokio::test]
async fn test_keeps_only_items_with_trailers() {
    let mut transport = ScriptedTransport::new().on("/movie/now_playing", listing(1..=12));
    for id in 1..=12u64 {
        transport = if id % 2 == 0 {
            transport.on(&format!("/movie/{}/videos", id), trailer_videos(id))
        } else {
            transport.on(&format!("/movie/{}/videos", id), no_videos(id))
        };
    }
    let transport = Arc::new(transport);
    let app = app(&transport);
    let view = app.trailers_view();

    view.activate(Request::trailers(EntityKind::Movie)).unwrap();
    let state = view.settled().await;
    let carousel = state.loaded().expect("carousel should load");

    // first ten items only, and of those the five with a trailer
    let ids: Vec<u64> = carousel.cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 4, 6, 8, 10]);
    assert_eq!(carousel.cards[0].trailer.key, "key2");
    assert_eq!(
        carousel.cards[0].image_url,
        "https://image.tmdb.org/t/p/w780/b2.jpg"
    );
    assert_eq!(transport.count("/movie/11/videos"), 0);
    assert_eq!(transport.count("/movie/12/videos"), 0);

    let query = transport.query_of("/movie/now_playing").unwrap();
    assert!(query.contains(&("region".to_string(), "IN".to_string())));
    assert!(query.contains(&("page".to_string(), "1".to_string())));
}

#[tokio::test]
async fn test_item_video_failures_drop_the_item() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .on("/tv/airing_today", listing([7, 8]))
            .fail("/tv/7/videos", AppError::ExternalServiceError("Server error: 502".into()))
            .on("/tv/8/videos", trailer_videos(8)),
    );
    let app = app(&transport);
    let view = app.trailers_view();

    view.activate(Request::trailers(EntityKind::Tv)).unwrap();
    let state = view.settled().await;
    let ids: Vec<u64> = state.loaded().unwrap().cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![8]);
}

#[tokio::test]
async fn test_no_trailers_settles_empty() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .on("/movie/upcoming", listing([1, 2]))
            .on("/movie/1/videos", no_videos(1))
            .on("/movie/2/videos", no_videos(2)),
    );
    let app = app(&transport);
    let view = app.trailers_view();

    view.activate(Request::trailers(EntityKind::Upcoming)).unwrap();
    assert_eq!(
        view.settled().await,
        ViewState::Empty {
            message: "No upcoming trailers found.".into()
        }
    );
}

#[tokio::test]
async fn test_empty_listing_issues_no_video_lookups() {
    let transport = Arc::new(ScriptedTransport::new().on("/tv/airing_today", listing(Vec::new())));
    let app = app(&transport);
    let view = app.trailers_view();

    view.activate(Request::trailers(EntityKind::Tv)).unwrap();
    assert_eq!(view.settled().await.message(), Some("No tv trailers found."));
    assert_eq!(transport.calls(), vec!["/tv/airing_today".to_string()]);
}

#[tokio::test]
async fn test_listing_failure_errors_with_upstream_message() {
    let transport = Arc::new(
        ScriptedTransport::new().fail(
            "/movie/now_playing",
            AppError::Unauthorized("Invalid API key: You must be granted a valid key.".into()),
        ),
    );
    let app = app(&transport);
    let view = app.trailers_view();

    view.activate(Request::trailers(EntityKind::Movie)).unwrap();
    assert_eq!(
        view.settled().await,
        ViewState::Errored {
            message: "Invalid API key: You must be granted a valid key.".into()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_switching_category_discards_the_old_carousel() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .on_delayed("/movie/now_playing", Duration::from_millis(400), listing([1]))
            .on("/movie/1/videos", trailer_videos(1))
            .on("/tv/airing_today", listing([2]))
            .on("/tv/2/videos", trailer_videos(2)),
    );
    let app = app(&transport);
    let view = app.trailers_view();

    view.activate(Request::trailers(EntityKind::Movie)).unwrap();
    view.activate(Request::trailers(EntityKind::Tv)).unwrap();

    let state = view.settled().await;
    assert_eq!(state.loaded().unwrap().category, EntityKind::Tv);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(view.state().loaded().unwrap().category, EntityKind::Tv);
    assert_eq!(transport.count("/movie/1/videos"), 0);
}
