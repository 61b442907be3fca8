use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use tournament_clock::{
    api::create_router,
    clock::{
        JsonFileStore, LevelIndexPersistence, LevelStore, ManualTimeSource, RecordingSink,
        TournamentClock,
    },
    levels::{BlindLevel, LevelSequence},
    services::NoopWakeLock,
    state::AppState,
};

const KEY: &str = "tournamentClock.currentLevel";

struct Harness {
    router: Router,
    state: Arc<AppState>,
    time: Arc<ManualTimeSource>,
    sink: RecordingSink,
    _dir: tempfile::TempDir,
    store: Arc<JsonFileStore>,
}

fn structure() -> LevelSequence {
    LevelSequence::new(vec![
        BlindLevel::new(25, 50, 0, 5.0),
        BlindLevel::new(50, 100, 0, 5.0),
        BlindLevel::new(100, 200, 25, 10.0),
    ])
    .unwrap()
}

fn harness_with_saved(saved: Option<usize>) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("state.json")));
    if let Some(index) = saved {
        store.save(KEY, index).unwrap();
    }

    let sink = RecordingSink::new();
    let clock = TournamentClock::new(
        structure(),
        LevelIndexPersistence::new(store.clone(), KEY),
        Arc::new(sink.clone()),
    );
    let time = Arc::new(ManualTimeSource::new(
        Utc.with_ymd_and_hms(2026, 5, 2, 18, 30, 0).unwrap(),
    ));
    let state = Arc::new(AppState::new(
        clock,
        time.clone(),
        Arc::new(NoopWakeLock),
        Duration::from_millis(500),
        20554,
        "127.0.0.1".to_string(),
    ));

    Harness {
        router: create_router(Arc::clone(&state)),
        state,
        time,
        sink,
        _dir: dir,
        store,
    }
}

async fn call(router: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn fresh_clock_shows_first_level_paused() {
    let h = harness_with_saved(None);
    let (status, body) = call(&h.router, "GET", "/clock").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["remaining"], "5:00");
    assert_eq!(body["level"], "Level 1");
    assert_eq!(body["running"], false);
    assert_eq!(body["current"]["blinds"], "25 / 50");
    assert_eq!(body["next"]["blinds"], "50 / 100");
    assert_eq!(body["fullscreen"], false);
}

#[tokio::test]
async fn restored_level_starts_at_full_duration() {
    let h = harness_with_saved(Some(2));
    let (_, body) = call(&h.router, "GET", "/clock").await;

    assert_eq!(body["level_index"], 2);
    assert_eq!(body["remaining"], "10:00");
    assert_eq!(body["current"]["ante"], "25");
    assert!(body["next"].is_null());
}

#[tokio::test]
async fn run_through_a_level_boundary() {
    let h = harness_with_saved(None);

    let (status, body) = call(&h.router, "POST", "/clock/toggle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "toggle-start-pause");
    assert_eq!(body["running"], true);

    h.time.advance_ms(295_000);
    h.state.tick().unwrap();
    h.time.advance_ms(5_000);
    h.state.tick().unwrap();

    let (_, body) = call(&h.router, "GET", "/clock").await;
    assert_eq!(body["level_index"], 1);
    assert_eq!(body["running"], true);
    assert_eq!(body["remaining"], "5:00");

    let tones: Vec<f32> = h.sink.played().iter().map(|t| t.frequency_hz).collect();
    assert_eq!(tones, [494.0, 659.0]);
    assert_eq!(h.store.load(KEY).unwrap(), Some(1));
}

#[tokio::test]
async fn minute_adjustments_cancel_out() {
    let h = harness_with_saved(None);

    let (_, added) = call(&h.router, "POST", "/clock/add-minute").await;
    assert_eq!(added["remaining"], "6:00");
    let (_, restored) = call(&h.router, "POST", "/clock/subtract-minute").await;
    assert_eq!(restored["remaining_ms"], 300_000);

    for _ in 0..6 {
        call(&h.router, "POST", "/clock/subtract-minute").await;
    }
    let (_, body) = call(&h.router, "GET", "/clock").await;
    assert_eq!(body["remaining"], "0:00");
    assert_eq!(body["level_index"], 0);
}

#[tokio::test]
async fn stepping_stops_at_the_ends() {
    let h = harness_with_saved(None);

    let (_, body) = call(&h.router, "POST", "/clock/previous").await;
    assert_eq!(body["level_index"], 0);

    call(&h.router, "POST", "/clock/next").await;
    call(&h.router, "POST", "/clock/next").await;
    let (_, body) = call(&h.router, "POST", "/clock/next").await;
    assert_eq!(body["level_index"], 2);
    assert_eq!(body["running"], false);
    assert_eq!(h.store.load(KEY).unwrap(), Some(2));
}

#[tokio::test]
async fn fullscreen_and_status() {
    let h = harness_with_saved(None);

    let (_, body) = call(&h.router, "POST", "/display/fullscreen").await;
    assert_eq!(body["fullscreen"], true);

    let (status, body) = call(&h.router, "GET", "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fullscreen"], true);
    assert_eq!(body["last_action"], "toggle-fullscreen");
    assert_eq!(body["port"], 20554);
    assert_eq!(body["level"], "Level 1");
}

#[tokio::test]
async fn health_is_ok() {
    let h = harness_with_saved(None);
    let (status, body) = call(&h.router, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
