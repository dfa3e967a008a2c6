//! Embedded preview templates.

use std::sync::LazyLock;

use minijinja::{AutoEscape, Environment, Error};

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();

    env.set_auto_escape_callback(|name| {
        if name.ends_with(".html") {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });

    for (name, source) in [
        ("surface.html", include_str!("../templates/surface.html")),
        ("preview_modal.html", include_str!("../templates/preview_modal.html")),
    ] {
        if let Err(err) = env.add_template(name, source) {
            tracing::error!(template = name, error = %err, "Failed to load embedded template");
        }
    }

    env
});

pub(crate) fn render_template<T: serde::Serialize>(name: &str, ctx: T) -> Result<String, Error> {
    let tpl = ENV.get_template(name)?;
    tpl.render(ctx)
}
