//! Settings Routes
//!
//! - GET /settings - Theme switch
//! - POST /settings/theme - Toggle the visitor's theme cookie and redirect back

use axum::{
    extract::{Form, State},
    http::Uri,
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;

use crate::web::error::{render, WebResult};
use crate::web::state::{AppState, THEME_COOKIE};
use crate::web::templates::SettingsTemplate;

#[derive(Debug, Default, Deserialize)]
pub struct ToggleForm {
    #[serde(default)]
    pub return_to: Option<String>,
}

/// GET /settings
pub async fn show(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    jar: CookieJar,
) -> WebResult<Html<String>> {
    render(SettingsTemplate {
        shell: state.shell(uri.path(), &jar),
    })
}

/// POST /settings/theme
///
/// Flips this visitor's theme only; the site default is left alone.
pub async fn toggle_theme(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ToggleForm>,
) -> (CookieJar, Redirect) {
    let next = state.theme_for(&jar).toggled();
    tracing::debug!(theme = %next, "Visitor theme toggled");

    let cookie = Cookie::build((THEME_COOKIE, next.as_str()))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(true)
        .permanent();

    (
        jar.add(cookie),
        Redirect::to(redirect_target(form.return_to.as_deref())),
    )
}

/// Only same-site paths built from URL-safe characters are followed
fn redirect_target(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if is_local_path(path) => path,
        _ => "/settings",
    }
}

fn is_local_path(path: &str) -> bool {
    let mut chars = path.chars();
    chars.next() == Some('/')
        && !matches!(chars.next(), Some('/'))
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-._~/?=&%+#".contains(c))
}
