//! Content Records
//!
//! Rows returned by the content store. All records are passive: invariants
//! such as visibility and ordering are enforced by the queries, not here.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::shell::format::{self, LinkIcon};

/// Accept string or numeric ids, normalized to a string
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

/// Optional foreign key: string or number, `null` when unset
fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

fn default_visible() -> bool {
    true
}

/// Image stored in the media assets table
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MediaAsset {
    pub public_url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// The singleton site owner profile
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub hero_title: Option<String>,
    #[serde(default)]
    pub hero_description: Option<String>,
    #[serde(default)]
    pub about_title: Option<String>,
    #[serde(default)]
    pub about_paragraph_1: Option<String>,
    #[serde(default)]
    pub about_paragraph_2: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub profile_image: Option<MediaAsset>,
}

/// External profile link (LinkedIn, GitHub, ...)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SocialLink {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

impl SocialLink {
    pub fn icon_kind(&self) -> LinkIcon {
        format::icon_for(self.icon.as_deref(), &self.label)
    }

    /// True for LinkedIn and Handshake links
    pub fn is_professional(&self) -> bool {
        let key = format!("{} {}", self.icon.as_deref().unwrap_or(""), self.label).to_lowercase();
        key.contains("linkedin") || key.contains("handshake")
    }
}

/// A subject area grouping courses
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Subject {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub course_count: Option<i64>,
}

impl Subject {
    pub fn glyph(&self) -> &str {
        self.icon.as_deref().unwrap_or("📘")
    }

    /// "1 course available" / "N courses available"
    pub fn course_count_label(&self) -> String {
        match self.course_count.unwrap_or(0) {
            1 => "1 course available".to_string(),
            n => format!("{} courses available", n),
        }
    }
}

/// A course within a subject
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Course {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub subject_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assignment_count: Option<i64>,
}

/// A tool used in a course
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CourseTool {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub course_id: Option<String>,
    #[serde(alias = "tool_name")]
    pub name: String,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

/// A graded piece of work with a repository link
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Assignment {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub course_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "github_url", alias = "github_link")]
    pub repo_url: Option<String>,
}

/// Work outside coursework: volunteering, events, hobbies
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Activity {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub story: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

impl Activity {
    pub fn date_range(&self) -> Option<String> {
        format::date_range(self.start_date.as_deref(), self.end_date.as_deref())
    }

    pub fn summary(&self) -> &str {
        self.description.as_deref().unwrap_or("View details")
    }

    /// Full story, falling back to the short description
    pub fn story_text(&self) -> &str {
        non_blank(&self.story)
            .or_else(|| non_blank(&self.description))
            .unwrap_or("Story not added yet.")
    }

    pub fn organization_or_dash(&self) -> &str {
        non_blank(&self.organization).unwrap_or(format::EMPTY_VALUE)
    }

    pub fn location_or_dash(&self) -> &str {
        non_blank(&self.location).unwrap_or(format::EMPTY_VALUE)
    }

    pub fn dates_or_dash(&self) -> String {
        self.date_range()
            .unwrap_or_else(|| format::EMPTY_VALUE.to_string())
    }
}

/// A titled block on the about page
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AboutSection {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

/// Aggregate row of the activities count view
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ActivitiesCount {
    #[serde(default)]
    pub total: i64,
}

/// A message submitted through the contact form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    /// Serialized as `null` when absent
    pub subject: Option<String>,
    pub message: String,
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
