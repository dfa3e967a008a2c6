use std::sync::Arc;

use goguide_booking_widget::config::WidgetConfig;
use goguide_booking_widget::form::{BookingFormController, FormState, InputField, PAID_COPY};
use goguide_booking_widget::preview::PreviewHost;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{fill_contact, form_for, mount_catalog, BUSINESS_UNIT, TOUR_FRAGMENT};

#[tokio::test]
async fn test_service_without_tour_books_without_preview() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/services/"))
        .and(query_param("business_unit", BUSINESS_UNIT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "title": "City Tour", "price": 1500, "tour_widget": ""}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let host = Arc::new(PreviewHost::default());
    let mut form = form_for(&server, WidgetConfig::default(), &host);
    assert!(form.attach().await);

    let view = form.view();
    assert_eq!(view.state, FormState::Ready);
    assert_eq!(view.options.len(), 1);
    assert_eq!(view.options[0].label, "City Tour — 1500 ₽");
    assert!(view.options[0].selected);
    assert!(!view.show_preview_link);
    assert!(!form.render().unwrap().contains("openPreview"));
}

#[tokio::test]
async fn test_element_without_api_base_loads_from_page_origin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/services/"))
        .and(query_param("business_unit", BUSINESS_UNIT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 4, "title": "Harbour Walk", "price": "900.00"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let attrs = vec![("data-bu-id".to_string(), BUSINESS_UNIT.to_string())];
    let mut form = BookingFormController::from_element(
        &attrs,
        "",
        &server.uri(),
        Arc::new(PreviewHost::default()),
    )
    .unwrap();
    assert_eq!(form.connection().api_base, format!("{}/api", server.uri()));

    assert!(form.attach().await);
    assert_eq!(form.state(), &FormState::Ready);
    assert_eq!(form.view().options[0].label, "Harbour Walk — 900 ₽");
}

#[tokio::test]
async fn test_catalog_failure_shows_load_banner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/services/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let host = Arc::new(PreviewHost::default());
    let mut form = form_for(&server, WidgetConfig::default(), &host);
    form.attach().await;

    assert_eq!(form.state(), &FormState::LoadFailed);
    assert!(form.view().banner.is_some());
    assert!(form.submit().await.is_err());
}

#[tokio::test]
async fn test_hidden_end_sends_start_time() {
    let server = MockServer::start().await;
    mount_catalog(&server, json!([{"id": 1, "title": "Kayak", "price": "990.00"}])).await;
    Mock::given(method("POST"))
        .and(path("/api/appointments/"))
        .and(body_partial_json(json!({
            "business_unit": BUSINESS_UNIT,
            "service": "1",
            "start_at": "2026-05-01T10:00",
            "end_at": "2026-05-01T10:00"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = WidgetConfig::default();
    config.options.hide_end = true;
    let host = Arc::new(PreviewHost::default());
    let mut form = form_for(&server, config, &host);
    form.attach().await;
    fill_contact(&mut form);

    assert!(form.submit().await.unwrap());
    assert!(matches!(form.state(), FormState::Success(_)));

    let requests = server.received_requests().await.unwrap();
    let posted: serde_json::Value = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .unwrap();
    assert!(posted.get("client_email").is_none());
}

#[tokio::test]
async fn test_validation_message_is_displayed() {
    let server = MockServer::start().await;
    mount_catalog(&server, json!([{"id": 1, "title": "Kayak", "price": 990}])).await;
    Mock::given(method("POST"))
        .and(path("/api/appointments/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"client_phone": ["invalid"]})),
        )
        .mount(&server)
        .await;

    let host = Arc::new(PreviewHost::default());
    let mut form = form_for(&server, WidgetConfig::default(), &host);
    form.attach().await;
    fill_contact(&mut form);
    form.edit(InputField::EndAt, "2026-05-01T12:00");
    form.submit().await.unwrap();

    let view = form.view();
    assert_eq!(view.banner.unwrap().text, "invalid");
    assert!(!view.submit_disabled);

    // The form is reusable after a failure.
    form.edit(InputField::Phone, "+79991112233");
    assert_eq!(form.state(), &FormState::Ready);
}

#[tokio::test]
async fn test_malformed_error_body_shows_generic_copy() {
    let server = MockServer::start().await;
    mount_catalog(&server, json!([{"id": 1, "title": "Kayak", "price": 990}])).await;
    Mock::given(method("POST"))
        .and(path("/api/appointments/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let host = Arc::new(PreviewHost::default());
    let mut form = form_for(&server, WidgetConfig::default(), &host);
    form.attach().await;
    fill_contact(&mut form);
    form.edit(InputField::EndAt, "2026-05-01T12:00");
    form.submit().await.unwrap();

    let html = form.render().unwrap();
    assert!(html.contains(goguide_booking_widget::form::SUBMIT_FAILED_COPY));
    assert!(!html.contains("Bad Gateway"));
}

#[tokio::test]
async fn test_paid_and_pending_copy_differ() {
    let mut messages = Vec::new();
    for status in ["paid", "pending"] {
        let server = MockServer::start().await;
        mount_catalog(&server, json!([{"id": 1, "title": "Kayak", "price": 990}])).await;
        Mock::given(method("POST"))
            .and(path("/api/appointments/"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"id": 10, "payment_status": status})),
            )
            .mount(&server)
            .await;

        let host = Arc::new(PreviewHost::default());
        let mut form = form_for(&server, WidgetConfig::default(), &host);
        form.attach().await;
        fill_contact(&mut form);
        form.edit(InputField::EndAt, "2026-05-01T12:00");
        form.submit().await.unwrap();

        messages.push(form.state().message().unwrap().to_string());
    }

    assert_eq!(messages[0], PAID_COPY);
    assert_eq!(messages[1], WidgetConfig::default().labels.success);
    assert_ne!(messages[0], messages[1]);
}

#[tokio::test]
async fn test_tour_is_previewed_in_isolation() {
    let server = MockServer::start().await;
    mount_catalog(
        &server,
        json!([
            {"id": 1, "title": "Kayak", "price": 990, "tour_widget": ""},
            {"id": 2, "title": "Old Town", "price": "2500.00", "tour_widget": TOUR_FRAGMENT}
        ]),
    )
    .await;

    let host = Arc::new(PreviewHost::default());
    let mut form = form_for(&server, WidgetConfig::default(), &host);
    form.attach().await;

    assert!(form.select_service("2"));
    assert!(form.view().show_preview_link);
    form.open_preview();

    let surface = host.get_or_create().surface().expect("surface mounted");
    assert!(surface.srcdoc().unwrap().contains(TOUR_FRAGMENT));

    let page = host.render().unwrap().unwrap();
    let widget = form.render().unwrap();
    for markup in [&page, &widget] {
        assert!(!markup.contains("<script"));
        assert!(!markup.contains(r#"<div id="pano-42">"#));
    }
    assert!(page.contains("<iframe"));
    assert!(!page.contains("allow-same-origin"));
}
