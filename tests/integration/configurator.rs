use goguide_booking_widget::config::embed;
use goguide_booking_widget::config::{resolve, ConfigField, WidgetConfig};
use goguide_booking_widget::ConfiguratorController;

/// A snippet in the shape the first configurator generation produced.
const LEGACY_SNIPPET: &str = r##"<script src="https://go-guide.example/static/widget/booking-widget.js" defer></script>
<booking-widget data-bu-id="15" data-api-base="https://go-guide.example/api" data-primary="#0f172a" data-panel="#0b1324" data-accent="#64ffda" data-text="#e2e8f0" data-muted="#94a3b8" data-border="#1e293b" data-radius="12px" data-shadow="0 10px 40px rgba(0,0,0,0.25)" data-width="520px" data-label-submit="Забронировать сейчас" data-hide-email="false" data-auto-open-preview="true" data-lang="ru"></booking-widget>"##;

const LEGACY_BLOB: &str =
    r##"{"primary":"#000000","title":"Бронирование туров","width":"100%","hideEnd":true}"##;

#[test]
fn test_legacy_snippet_and_flat_blob_load() {
    let mut configurator = ConfiguratorController::new();
    configurator.load(LEGACY_SNIPPET, LEGACY_BLOB);
    let form = configurator.form();

    // attributes beat the blob
    assert_eq!(form.theme.primary, "#0f172a");
    assert_eq!(form.theme.card_width, "520px");
    // blob fills what the snippet does not mention
    assert_eq!(form.labels.title, "Бронирование туров");
    assert!(form.options.hide_end);
    assert!(form.options.auto_open_preview);
    assert_eq!(form.labels.submit, "Забронировать сейчас");

    assert_eq!(configurator.connection().business_unit_id.as_deref(), Some("15"));
    assert_eq!(configurator.unknown_attrs().get("data-lang"), Some("ru"));
}

#[test]
fn test_save_then_reload_is_stable() {
    let mut configurator = ConfiguratorController::new();
    configurator.load(LEGACY_SNIPPET, LEGACY_BLOB);
    configurator.apply_preset("light");
    configurator.set_field(ConfigField::PreviewAutoCloseMs, 2000u64);
    let first = configurator.save();

    let mut reloaded = ConfiguratorController::new();
    reloaded.load(&first.snippet, &first.persisted_blob);
    assert_eq!(reloaded.form(), configurator.form());

    let second = reloaded.save();
    assert_eq!(second, first);
}

#[test]
fn test_round_trip_preserves_every_field() {
    let mut config = WidgetConfig::default();
    config.theme.font_family = r#""PT Sans", 'Inter', sans-serif"#.to_string();
    config.theme.preview_height = "480px".to_string();
    config.labels.preview = "Тур 360° & фото".to_string();
    config.options.scroll_into_view = true;
    config.options.email_optional = false;
    config.options.phone_placeholder = "+7 (___) ___-__-__".to_string();

    let connection = embed::Connection::new("https://go-guide.example/api", None);
    let snippet = embed::encode(&config, &connection, &embed::UnknownAttrs::new());
    let decoded = embed::decode(&snippet);

    assert_eq!(decoded.config, config);
    assert_eq!(decoded.connection, connection);
    assert_eq!(resolve::deserialize(&resolve::serialize(&config)), config);
}

#[test]
fn test_presets_only_touch_theme() {
    let mut configurator = ConfiguratorController::new();
    configurator.load(LEGACY_SNIPPET, "");
    let before = configurator.form().clone();

    for name in configurator.preset_names() {
        let mut copy = configurator.clone();
        assert!(copy.apply_preset(name));
        assert_eq!(copy.form().labels, before.labels, "{name}");
        assert_eq!(copy.form().options, before.options, "{name}");
    }
}
