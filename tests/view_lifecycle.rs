//! Integration tests for the news view lifecycle: mount, load, settle, remount.
//!
//! Each test runs its own wiremock server and drives `App` the way the UI
//! loop does: mount, wait for the load event, apply it.

use isonews::app::{App, AppEvent, ViewState};
use isonews::config::Config;
use isonews::feed::{CACHE_BUST_PARAM, LOAD_FAILED_MESSAGE};
use isonews::ui::{render_plain, EMPTY_MESSAGE, HEADING};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCENARIO: &str = r#"{"daily_news":[
    {"id":1,"title":"A"},
    {"id":2,"title":"B","text":"Body\nLine2","image_url":"http://x/y.png"},
    {"id":1,"title":"A-dup"}
]}"#;

fn app_for(server: &MockServer) -> App {
    let config = Config {
        feed_url: format!("{}/news.json", server.uri()),
        ..Config::default()
    };
    App::new(config).unwrap()
}

async fn mount_server(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news.json"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;
    server
}

async fn next_event(rx: &mut mpsc::Receiver<AppEvent>) -> AppEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("load did not finish in time")
        .expect("event channel closed")
}

/// Apply an event the way the UI loop does. Returns whether it changed the view.
fn apply(app: &mut App, event: AppEvent) -> bool {
    match event {
        AppEvent::FeedLoaded { generation, result } => app.apply_load(generation, result),
        AppEvent::TaskPanicked {
            generation,
            task,
            error,
        } => app.apply_panic(generation, task, &error),
    }
}

// ============================================================================
// Settling
// ============================================================================

#[tokio::test]
async fn test_mount_settles_ready_with_deduplicated_cards() {
    let server = mount_server(200, SCENARIO).await;
    let mut app = app_for(&server);
    let (tx, mut rx) = mpsc::channel(4);

    app.mount(&tx);
    assert_eq!(app.view_state, ViewState::Loading);

    let event = next_event(&mut rx).await;
    assert!(apply(&mut app, event));

    let titles: Vec<_> = app
        .view_state
        .articles()
        .iter()
        .map(|a| a.title.as_str())
        .collect();
    assert_eq!(titles, vec!["A", "B"]);

    let text = render_plain(&app.view_state);
    assert!(text.starts_with(HEADING));
    assert!(text.contains("Body\nLine2"));
    assert!(!text.contains("A-dup"));
}

#[tokio::test]
async fn test_empty_feed_settles_ready_empty() {
    let server = mount_server(200, r#"{"daily_news":[]}"#).await;
    let mut app = app_for(&server);
    let (tx, mut rx) = mpsc::channel(4);

    app.mount(&tx);
    let event = next_event(&mut rx).await;
    apply(&mut app, event);

    assert!(matches!(&app.view_state, ViewState::Ready(a) if a.is_empty()));
    assert_eq!(render_plain(&app.view_state), format!("{}\n", EMPTY_MESSAGE));
}

#[tokio::test]
async fn test_server_error_settles_error_message() {
    let server = mount_server(500, SCENARIO).await;
    let mut app = app_for(&server);
    let (tx, mut rx) = mpsc::channel(4);

    app.mount(&tx);
    let event = next_event(&mut rx).await;
    apply(&mut app, event);

    assert_eq!(
        app.view_state,
        ViewState::Error(LOAD_FAILED_MESSAGE.to_string())
    );
    assert!(app.view_state.articles().is_empty());
}

#[tokio::test]
async fn test_mount_sends_exactly_one_cache_busted_request() {
    let server = mount_server(200, SCENARIO).await;
    let mut app = app_for(&server);
    let (tx, mut rx) = mpsc::channel(4);

    app.mount(&tx);
    let event = next_event(&mut rx).await;
    apply(&mut app, event);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .url
        .query_pairs()
        .any(|(k, v)| k == CACHE_BUST_PARAM && v.parse::<i64>().is_ok()));
}

// ============================================================================
// Remount and unmount
// ============================================================================

#[tokio::test]
async fn test_remount_discards_previous_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SCENARIO))
        .mount(&server)
        .await;
    let config = Config {
        feed_url: server.uri(),
        ..Config::default()
    };
    let mut app = App::new(config).unwrap();
    let (tx, mut rx) = mpsc::channel(4);

    let first = app.mount(&tx);
    let second = app.mount(&tx);
    assert_ne!(first, second);

    // The first load was aborted; whatever arrives must belong to the second.
    let event = next_event(&mut rx).await;
    if let AppEvent::FeedLoaded { generation, .. } = &event {
        assert_eq!(*generation, second);
    }
    assert!(apply(&mut app, event));
    assert_eq!(app.view_state.articles().len(), 2);
}

#[tokio::test]
async fn test_unmount_leaves_view_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SCENARIO)
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    let config = Config {
        feed_url: server.uri(),
        ..Config::default()
    };
    let mut app = App::new(config).unwrap();
    let (tx, mut rx) = mpsc::channel(4);

    app.mount(&tx);
    app.unmount();

    let late = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
    assert!(late.is_err(), "aborted load still delivered a result");
    assert_eq!(app.view_state, ViewState::Loading);
}
