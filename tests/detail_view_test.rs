mod support;

use marquee_lib::modules::aggregation::{Request, ViewState};
use marquee_lib::modules::catalog::EntityKind;
use marquee_lib::shared::AppError;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use support::{app, ScriptedTransport};

fn fight_club() -> Value {
    json!({
        "id": 550,
        "title": "Fight Club",
        "release_date": "1999-10-15",
        "poster_path": "/poster.jpg",
        "backdrop_path": "/backdrop.jpg",
        "genres": [{ "id": 18, "name": "Drama" }]
    })
}

fn fight_club_credits() -> Value {
    json!({
        "id": 550,
        "cast": [{
            "id": 819,
            "name": "Edward Norton",
            "character": "The Narrator",
            "profile_path": null
        }],
        "crew": [{
            "id": 7467,
            "name": "David Fincher",
            "job": "Director",
            "department": "Directing"
        }]
    })
}

fn fight_club_videos() -> Value {
    json!({
        "id": 550,
        "results": [
            { "key": "teaser1", "site": "YouTube", "type": "Teaser", "official": true },
            { "key": "BdJKm16Co6M", "site": "YouTube", "type": "Trailer", "official": true }
        ]
    })
}

fn movie(id: u64, title: &str) -> Value {
    json!({ "id": id, "title": title, "release_date": "2001-01-01" })
}

#[tokio::test]
async fn test_detail_joins_all_three_payloads() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .on("/movie/550", fight_club())
            .on("/movie/550/credits", fight_club_credits())
            .on("/movie/550/videos", fight_club_videos()),
    );
    let app = app(&transport);
    let view = app.detail_view();

    view.submit(Request::detail(Some("550"), EntityKind::Movie)).unwrap();
    let state = view.settled().await;

    let detail = state.loaded().expect("detail should load");
    assert_eq!(detail.display_title, "Fight Club");
    assert_eq!(detail.year.as_deref(), Some("1999"));
    let directors: Vec<&str> = detail.directors.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(directors, vec!["David Fincher"]);
    assert_eq!(detail.cast.len(), 1);
    assert_eq!(
        detail.display_image_url,
        "https://image.tmdb.org/t/p/original/backdrop.jpg"
    );
    let trailer = detail.trailer.as_ref().expect("official trailer");
    assert_eq!(trailer.key, "BdJKm16Co6M");
    assert_eq!(trailer.watch_url, "https://www.youtube.com/watch?v=BdJKm16Co6M");
    assert_eq!(transport.calls().len(), 3);
}

#[tokio::test]
async fn test_upcoming_uses_movie_endpoints() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .on("/movie/550", fight_club())
            .on("/movie/550/credits", fight_club_credits())
            .on("/movie/550/videos", fight_club_videos()),
    );
    let app = app(&transport);
    let view = app.detail_view();

    view.submit(Request::detail(Some("550"), EntityKind::Upcoming)).unwrap();
    assert!(view.settled().await.loaded().is_some());
    assert_eq!(transport.count("/movie/550"), 1);
}

#[tokio::test]
async fn test_secondary_failures_degrade_to_defaults() {
    let show = json!({ "id": 1399, "name": "Game of Thrones", "first_air_date": "2011-04-17" });
    let transport = Arc::new(
        ScriptedTransport::new()
            .on("/tv/1399", show)
            .fail("/tv/1399/credits", AppError::ExternalServiceError("Server error: 500".into()))
            .fail("/tv/1399/videos", AppError::Timeout("videos request timed out".into())),
    );
    let app = app(&transport);
    let view = app.detail_view();

    view.submit(Request::detail(Some("1399"), EntityKind::Tv)).unwrap();
    let state = view.settled().await;

    let detail = state.loaded().expect("secondary failures never error the view");
    assert_eq!(detail.display_title, "Game of Thrones");
    assert!(detail.cast.is_empty());
    assert!(detail.trailer.is_none());
    assert!(!detail.has_trailer());
}

#[tokio::test(start_paused = true)]
async fn test_primary_failure_errors_after_all_tasks_settle() {
    let not_found = AppError::NotFound("The resource you requested could not be found.".into());
    let transport = Arc::new(
        ScriptedTransport::new()
            .fail("/movie/550", not_found)
            .on_delayed("/movie/550/credits", Duration::from_millis(300), fight_club_credits())
            .on_delayed("/movie/550/videos", Duration::from_millis(600), fight_club_videos()),
    );
    let app = app(&transport);
    let view = app.detail_view();
    let started = tokio::time::Instant::now();

    view.submit(Request::detail(Some("550"), EntityKind::Movie)).unwrap();
    let state = view.settled().await;

    assert_eq!(
        state,
        ViewState::Errored {
            message: "The resource you requested could not be found.".into()
        }
    );
    assert!(started.elapsed() >= Duration::from_millis(600));
    assert_eq!(transport.calls().len(), 3);
}

#[tokio::test]
async fn test_invalid_id_short_circuits() {
    let transport = Arc::new(ScriptedTransport::new());
    let app = app(&transport);
    let view = app.detail_view();

    view.submit(Request::detail(Some("abc"), EntityKind::Movie)).unwrap();
    assert_eq!(
        view.state(),
        ViewState::Errored {
            message: "Invalid ID.".into()
        }
    );

    view.submit(Request::detail(None, EntityKind::Tv)).unwrap();
    assert_eq!(view.state().message(), Some("Invalid ID."));
    assert!(transport.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_only_latest_activation_is_delivered() {
    let slow = Duration::from_millis(800);
    let transport = Arc::new(
        ScriptedTransport::new()
            .on_delayed("/movie/1", slow, movie(1, "First"))
            .on_delayed("/movie/1/credits", slow, json!({ "id": 1 }))
            .on_delayed("/movie/1/videos", slow, json!({ "id": 1, "results": [] }))
            .on("/movie/2", movie(2, "Second"))
            .on("/movie/2/credits", json!({ "id": 2 }))
            .on("/movie/2/videos", json!({ "id": 2, "results": [] })),
    );
    let app = app(&transport);
    let view = app.detail_view();
    let mut rx = view.subscribe();

    view.submit(Request::detail(Some("1"), EntityKind::Movie)).unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    view.submit(Request::detail(Some("2"), EntityKind::Movie)).unwrap();

    let state = view.settled().await;
    assert_eq!(state.loaded().map(|d| d.display_title.as_str()), Some("Second"));
    rx.borrow_and_update();

    // the first request would have resolved by now
    tokio::time::sleep(slow * 2).await;
    assert!(!rx.has_changed().unwrap());
    assert_eq!(
        view.state().loaded().map(|d| d.display_title.clone()),
        Some("Second".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_deactivate_discards_late_results() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .on_delayed("/movie/550", Duration::from_millis(500), fight_club())
            .on_delayed("/movie/550/credits", Duration::from_millis(500), fight_club_credits())
            .on_delayed("/movie/550/videos", Duration::from_millis(500), fight_club_videos()),
    );
    let app = app(&transport);
    let view = app.detail_view();
    let mut rx = view.subscribe();

    view.submit(Request::detail(Some("550"), EntityKind::Movie)).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    view.deactivate();
    rx.borrow_and_update();

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!rx.has_changed().unwrap());
    assert_eq!(view.state(), ViewState::Idle);
    assert!(!view.is_active());
}

#[tokio::test(start_paused = true)]
async fn test_slow_primary_times_out() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .on_delayed("/movie/550", Duration::from_secs(30), fight_club())
            .on("/movie/550/credits", fight_club_credits())
            .on("/movie/550/videos", fight_club_videos()),
    );
    let app = app(&transport);
    let view = app.detail_view();

    view.submit(Request::detail(Some("550"), EntityKind::Movie)).unwrap();
    let state = view.settled().await;

    assert!(matches!(state, ViewState::Errored { .. }));
    assert!(state.message().unwrap().contains("timed out"));
}
