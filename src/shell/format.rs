//! View Formatting
//!
//! Small pure helpers shared by every page.

/// Placeholder for values that are not set
pub const EMPTY_VALUE: &str = "—";

/// Format an optional date range.
///
/// Blank strings count as absent.
pub fn date_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    let start = start.map(str::trim).filter(|s| !s.is_empty());
    let end = end.map(str::trim).filter(|s| !s.is_empty());

    match (start, end) {
        (None, None) => None,
        (Some(s), None) => Some(format!("From {}", s)),
        (None, Some(e)) => Some(format!("Until {}", e)),
        (Some(s), Some(e)) => Some(format!("{} – {}", s, e)),
    }
}

/// Icon shown next to a social or contact link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkIcon {
    LinkedIn,
    GitHub,
    Handshake,
    External,
}

impl LinkIcon {
    pub fn css_class(&self) -> &'static str {
        match self {
            LinkIcon::LinkedIn => "icon icon-linkedin",
            LinkIcon::GitHub => "icon icon-github",
            LinkIcon::Handshake => "icon icon-handshake",
            LinkIcon::External => "icon icon-external",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            LinkIcon::LinkedIn => "in",
            LinkIcon::GitHub => "gh",
            LinkIcon::Handshake => "hs",
            LinkIcon::External => "↗",
        }
    }
}

/// Pick an icon from the icon tag, or the label when no tag is set
pub fn icon_for(icon: Option<&str>, label: &str) -> LinkIcon {
    let key = icon.unwrap_or(label).to_lowercase();

    if key.contains("linkedin") {
        LinkIcon::LinkedIn
    } else if key.contains("github") {
        LinkIcon::GitHub
    } else if key.contains("handshake") {
        LinkIcon::Handshake
    } else {
        LinkIcon::External
    }
}
