//! Page Controllers
//!
//! Every page with remote data follows the same lifecycle:
//!
//! ```text
//! Loading ──┬──► Error(message)   (terminal for this mount)
//!           └──► Ready(data)      (terminal for this mount)
//! ```
//!
//! [`PageController::mount`] starts the page's loader and resets the state to
//! `Loading`. The loader joins all of its content calls and reports the first
//! error in a fixed order, so sibling data is never partially rendered. A
//! mounted flag, flipped under the state channel's lock, guarantees that a
//! loader finishing after [`PageController::unmount`] changes nothing.
//!
//! "Not found" is not a state: it is a `Ready` page whose target record is
//! absent, and the view branches on it.

pub mod about;
pub mod academic;
pub mod activities;
pub mod contact;
pub mod home;

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::catalog::StaticCatalog;
use crate::content::ContentService;
use crate::gateway::GatewayResult;

/// Fetch lifecycle of a page
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Loading,
    /// Raw gateway message, shown verbatim
    Error(String),
    Ready(T),
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PageState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            PageState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

impl<T> From<GatewayResult<T>> for PageState<T> {
    fn from(result: GatewayResult<T>) -> Self {
        match result {
            Ok(data) => PageState::Ready(data),
            Err(e) => PageState::Error(e.message()),
        }
    }
}

/// Owns one page's state and its mounted guard
pub struct PageController<T> {
    name: &'static str,
    state: Arc<watch::Sender<PageState<T>>>,
    mounted: Arc<AtomicBool>,
}

impl<T> PageController<T> {
    pub fn new(name: &'static str) -> Self {
        let (tx, _) = watch::channel(PageState::Loading);
        Self {
            name,
            state: Arc::new(tx),
            mounted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Stop accepting results from the current mount.
    ///
    /// In-flight loads keep running; their results are discarded.
    pub fn unmount(&self) {
        let mounted = &self.mounted;
        self.state.send_if_modified(|_| {
            mounted.store(false, Ordering::Release);
            false
        });
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<PageState<T>> {
        self.state.subscribe()
    }
}

impl<T> PageController<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Current state snapshot
    pub fn state(&self) -> PageState<T> {
        self.state.borrow().clone()
    }

    /// Start a new mount: reset to `Loading` and run `load` in the background.
    ///
    /// Any earlier mount is unmounted first, so only the latest load can
    /// settle the page.
    pub fn mount<F>(&mut self, load: F) -> JoinHandle<()>
    where
        F: Future<Output = GatewayResult<T>> + Send + 'static,
    {
        self.unmount();

        let mounted = Arc::new(AtomicBool::new(true));
        self.mounted = Arc::clone(&mounted);
        self.state.send_replace(PageState::Loading);

        let state = Arc::clone(&self.state);
        let name = self.name;
        tracing::debug!(page = name, "Page mounted");

        tokio::spawn(async move {
            let outcome = load.await;

            let applied = state.send_if_modified(|current| {
                if !mounted.load(Ordering::Acquire) {
                    return false;
                }
                *current = PageState::from(outcome);
                true
            });

            if applied {
                tracing::debug!(page = name, "Page settled");
            } else {
                tracing::debug!(page = name, "Discarding result for unmounted page");
            }
        })
    }

    /// Wait for the current mount to leave `Loading`
    pub async fn settled(&self) -> PageState<T> {
        let mut rx = self.state.subscribe();
        let settled = rx.wait_for(|s| !s.is_loading()).await.map(|s| s.clone());
        match settled {
            Ok(state) => state,
            Err(_) => self.state(),
        }
    }
}

impl<T> Drop for PageController<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Where catalog-backed pages read subjects, courses and activities from
#[derive(Clone)]
pub enum CatalogSource {
    Remote(ContentService),
    Static(&'static StaticCatalog),
}

impl CatalogSource {
    pub fn label(&self) -> &'static str {
        match self {
            CatalogSource::Remote(_) => "remote",
            CatalogSource::Static(_) => "static",
        }
    }
}

/// Dedicated view for a missing record
#[derive(Debug, Clone, PartialEq)]
pub struct NotFound {
    pub title: &'static str,
    pub back_href: &'static str,
    pub back_label: &'static str,
}

/// Trim a route id; `None` when nothing is left
pub(crate) fn clean_id(id: &str) -> Option<&str> {
    let id = id.trim();
    (!id.is_empty()).then_some(id)
}
