//! Navigation
//!
//! Active-item highlighting is a pure function of the current path.

use serde::Serialize;

/// How a nav item decides it is active
#[derive(Debug, Clone, Copy)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    /// Additional section prefixes that highlight this item
    pub prefixes: &'static [&'static str],
}

/// Top-level navigation, in display order
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Home",
        href: "/",
        prefixes: &[],
    },
    NavItem {
        label: "About",
        href: "/about",
        prefixes: &[],
    },
    NavItem {
        label: "Academic Work",
        href: "/academic-work",
        prefixes: &["/subject", "/course"],
    },
    NavItem {
        label: "Activities",
        href: "/activities",
        prefixes: &["/activities", "/activity"],
    },
    NavItem {
        label: "Contact",
        href: "/contact",
        prefixes: &[],
    },
    NavItem {
        label: "Settings",
        href: "/settings",
        prefixes: &[],
    },
];

impl NavItem {
    /// Exact match on `href`, or a segment-aware match on any prefix
    pub fn is_active(&self, path: &str) -> bool {
        let path = normalize(path);
        path == self.href || self.prefixes.iter().any(|p| under_prefix(path, p))
    }
}

/// A rendered navigation link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Navigation links for the page at `path`
pub fn nav_links(path: &str) -> Vec<NavLink> {
    NAV_ITEMS
        .iter()
        .map(|item| NavLink {
            label: item.label,
            href: item.href,
            active: item.is_active(path),
        })
        .collect()
}

/// Drop a trailing slash (except for the root)
fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

fn under_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .map(|rest| rest.starts_with('/'))
            .unwrap_or(false)
}
