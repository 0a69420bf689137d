//! Site Shell
//!
//! Cross-cutting chrome wrapped around every page: navigation, footer and
//! the light/dark theme.

pub mod format;
pub mod nav;
pub mod theme;

pub use format::{date_range, icon_for, LinkIcon, EMPTY_VALUE};
pub use nav::{nav_links, NavItem, NavLink, NAV_ITEMS};
pub use theme::{FileThemeStore, MemoryThemeStore, Theme, ThemeError, ThemeService, ThemeStore};

use chrono::Datelike;

/// Chrome data rendered around a page
#[derive(Debug, Clone)]
pub struct ShellView {
    pub site_title: String,
    pub theme: Theme,
    pub nav: Vec<NavLink>,
    /// Path of the page being rendered
    pub path: String,
    pub footer_email: Option<String>,
    pub year: i32,
}

impl ShellView {
    pub fn new(site_title: &str, footer_email: Option<&str>, theme: Theme, path: &str) -> Self {
        Self {
            site_title: site_title.to_string(),
            theme,
            nav: nav_links(path),
            path: path.to_string(),
            footer_email: footer_email.map(str::to_string),
            year: chrono::Utc::now().year(),
        }
    }

    pub fn theme_class(&self) -> &'static str {
        self.theme.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_view() {
        let shell = ShellView::new("Portfolio", Some("me@example.edu"), Theme::Dark, "/course/cs101");

        assert_eq!(shell.theme_class(), "dark");
        assert!(shell.year >= 2024);
        let active: Vec<_> = shell.nav.iter().filter(|l| l.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].href, "/academic-work");
    }
}
