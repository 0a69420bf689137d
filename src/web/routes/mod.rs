//! Page Routes
//!
//! Route handlers organized by page.

pub mod contact;
pub mod health;
pub mod pages;
pub mod settings;

use std::future::Future;

use crate::gateway::GatewayResult;
use crate::pages::{PageController, PageState};

/// Mount a page controller and wait for it to settle.
///
/// If the request is dropped first, the controller is dropped with it and
/// the late result is discarded.
pub(crate) async fn run_page<T, F>(name: &'static str, load: F) -> PageState<T>
where
    T: Clone + Send + Sync + 'static,
    F: Future<Output = GatewayResult<T>> + Send + 'static,
{
    let mut page = PageController::new(name);
    page.mount(load);
    let state = page.settled().await;

    if let PageState::Error(message) = &state {
        tracing::warn!(page = name, error = %message, "Page failed to load");
    }
    state
}
