use std::sync::Arc;
use std::time::Duration;

use goguide_booking_widget::config::WidgetConfig;
use goguide_booking_widget::preview::{PreviewHost, PreviewOutcome};
use serde_json::json;
use wiremock::MockServer;

use crate::common::{form_for, mount_catalog, TOUR_FRAGMENT};

async fn tour_server() -> MockServer {
    let server = MockServer::start().await;
    mount_catalog(
        &server,
        json!([{"id": 2, "title": "Old Town", "price": 2500, "tour_widget": TOUR_FRAGMENT}]),
    )
    .await;
    server
}

#[tokio::test]
async fn test_two_widgets_share_one_container() {
    let server = tour_server().await;
    let host = Arc::new(PreviewHost::default());

    let mut first = form_for(&server, WidgetConfig::default(), &host);
    let mut second = form_for(&server, WidgetConfig::default(), &host);
    first.attach().await;
    second.attach().await;

    assert!(matches!(first.open_preview(), PreviewOutcome::Shown { .. }));
    assert!(matches!(second.open_preview(), PreviewOutcome::Shown { .. }));
    assert_eq!(host.creations(), 1);

    let page = host.render().unwrap().unwrap();
    assert_eq!(page.matches("<iframe").count(), 1);

    first.close_preview();
    assert!(!second.preview().is_open());
}

#[tokio::test]
async fn test_auto_open_preview_on_attach() {
    let server = tour_server().await;
    let host = Arc::new(PreviewHost::default());
    let mut config = WidgetConfig::default();
    config.options.auto_open_preview = true;

    let mut form = form_for(&server, config, &host);
    form.attach().await;
    assert!(form.preview().is_open());
}

#[tokio::test]
async fn test_stale_auto_close_does_not_hit_reopened_preview() {
    let server = tour_server().await;
    let host = Arc::new(PreviewHost::default());
    let mut config = WidgetConfig::default();
    config.options.preview_auto_close_ms = 2000;

    let mut form = form_for(&server, config, &host);
    form.attach().await;

    // The mock server needs real time, so the clock is paused only now.
    tokio::time::pause();

    form.open_preview();
    tokio::time::sleep(Duration::from_millis(500)).await;
    form.close_preview();

    tokio::time::sleep(Duration::from_millis(500)).await;
    form.open_preview();

    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert!(form.preview().is_open(), "closed by the first open's timer");

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!form.preview().is_open());
}
