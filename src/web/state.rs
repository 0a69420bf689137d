//! Application State
//!
//! Shared state accessible by all page handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use axum_extra::extract::CookieJar;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::StaticCatalog;
use crate::config::{CatalogMode, SiteConfig};
use crate::content::ContentService;
use crate::pages::CatalogSource;
use crate::shell::{ShellView, Theme, ThemeService};

/// Cookie holding a visitor's theme choice
pub const THEME_COOKIE: &str = "folio_theme";

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Named queries over the content store
    pub content: ContentService,
    /// Source for subjects, courses and activities
    pub catalog: CatalogSource,
    /// Site default theme, used when a visitor has not chosen one
    pub theme: Arc<ThemeService>,
    /// Site chrome settings
    pub site: Arc<SiteConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        content: ContentService,
        catalog: CatalogMode,
        theme: Arc<ThemeService>,
        site: SiteConfig,
    ) -> Self {
        let catalog = match catalog {
            CatalogMode::Remote => CatalogSource::Remote(content.clone()),
            CatalogMode::Static => CatalogSource::Static(StaticCatalog::builtin()),
        };

        Self {
            content,
            catalog,
            theme,
            site: Arc::new(site),
            start_time: Instant::now(),
        }
    }

    /// The visitor's theme, or the site default when the cookie is absent or unreadable
    pub fn theme_for(&self, jar: &CookieJar) -> Theme {
        jar.get(THEME_COOKIE)
            .and_then(|cookie| cookie.value().parse().ok())
            .unwrap_or_else(|| self.theme.current())
    }

    /// Chrome for the page at `path`
    pub fn shell(&self, path: &str, jar: &CookieJar) -> ShellView {
        ShellView::new(
            &self.site.title,
            self.site.footer_email.as_deref(),
            self.theme_for(jar),
            path,
        )
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
