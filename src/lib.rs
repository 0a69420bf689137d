//! # Folio
//!
//! A personal academic portfolio site: hero and about text, subjects →
//! courses → assignments, activities and a contact form, all read from a
//! hosted content store and rendered on the server.
//!
//! ## Modules
//!
//! - [`gateway`]: Query client for the content store (REST and in-memory)
//! - [`content`]: Named queries, one per page data need
//! - [`pages`]: Page controllers and their loaders
//! - [`catalog`]: Built-in catalog used instead of the store when configured
//! - [`shell`]: Navigation, theme and view formatting
//! - [`web`]: HTTP server with Axum and Askama
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use folio::config::Config;
//! use folio::content::ContentService;
//! use folio::gateway::RestGateway;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     config.validate()?;
//!
//!     let content = ContentService::new(Arc::new(RestGateway::new(&config.store)?));
//!     for subject in content.subjects().await? {
//!         println!("{} ({})", subject.name, subject.course_count_label());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod content;
pub mod gateway;
pub mod pages;
pub mod shell;
pub mod web;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export top-level types for convenience
pub use catalog::{CatalogCourse, CatalogSubject, StaticCatalog};

pub use config::{CatalogMode, Config, ConfigError, LoggingConfig, ServerConfig, StoreConfig};

pub use content::{preferred_links, ContentService};

pub use gateway::{Gateway, GatewayError, GatewayResult, MemoryGateway, Query, RestGateway};

pub use pages::{CatalogSource, NotFound, PageController, PageState};

pub use shell::{FileThemeStore, Theme, ThemeError, ThemeService};

pub use web::{build_router, serve, AppState, WebError};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `logging.level`; `logging.format = "json"` selects
/// structured output.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("folio={},tower_http=info", config.level))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
