use std::sync::Arc;

use goguide_booking_widget::config::embed::Connection;
use goguide_booking_widget::config::WidgetConfig;
use goguide_booking_widget::form::{BookingFormController, InputField};
use goguide_booking_widget::preview::PreviewHost;
use goguide_widget_api::BookingApiClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BUSINESS_UNIT: &str = "7";

/// A fragment that would run in the host page if it were ever inserted there.
pub const TOUR_FRAGMENT: &str =
    r#"<div id="pano-42"></div><script>document.cookie="stolen=1"</script>"#;

pub fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

pub async fn mount_catalog(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/services/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// A form wired to `server`, sharing `host`.
pub fn form_for(
    server: &MockServer,
    config: WidgetConfig,
    host: &Arc<PreviewHost>,
) -> BookingFormController {
    let connection = Connection::new(api_base(server), Some(BUSINESS_UNIT.to_string()));
    let api = BookingApiClient::new(api_base(server)).expect("valid API base");
    BookingFormController::new(config, connection, api, Arc::clone(host))
}

pub fn fill_contact(form: &mut BookingFormController) {
    form.edit(InputField::Name, "Анна");
    form.edit(InputField::Phone, "+79990000000");
    form.edit(InputField::StartAt, "2026-05-01T10:00");
}
