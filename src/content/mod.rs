//! Content Service
//!
//! One function per page data need. Each is a fixed composition of gateway
//! parameters: no conditional logic, no caching, no retry.
//!
//! Single-record lookups treat the store's "not single" condition as an
//! absent record so pages can render their not-found view; every other
//! gateway error is passed through untouched.

pub mod models;

pub use models::{
    AboutSection, ActivitiesCount, Activity, Assignment, Course, CourseTool, MediaAsset,
    NewContactMessage, Profile, SocialLink, Subject,
};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::gateway::{Direction, Filter, Gateway, GatewayError, GatewayResult, Query};

/// Default number of subjects on the home page
pub const SUBJECTS_PREVIEW_LIMIT: usize = 6;

/// Default number of activities on the home page
pub const ACTIVITIES_PREVIEW_LIMIT: usize = 4;

const PROFILE_COLUMNS: &str =
    "*,profile_image:media_assets!profile_image_asset_id(public_url,alt_text)";
const ACTIVITY_LIST_COLUMNS: &str =
    "id,title,description,organization,location,start_date,end_date,sort_order,is_visible";
const ACTIVITY_PREVIEW_COLUMNS: &str =
    "id,title,description,organization,location,start_date,end_date";
const ACTIVITY_DETAIL_COLUMNS: &str =
    "id,title,description,story,organization,location,cover_image_url,start_date,end_date";

/// Named queries over a [`Gateway`]
#[derive(Clone)]
pub struct ContentService {
    gateway: Arc<dyn Gateway>,
}

impl ContentService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<dyn Gateway> {
        &self.gateway
    }

    // ============================================
    // Profile & links
    // ============================================

    pub async fn profile(&self) -> GatewayResult<Option<Profile>> {
        let query = Query::table("profile").select(PROFILE_COLUMNS).single();
        self.fetch_one(&query).await
    }

    pub async fn social_links(&self) -> GatewayResult<Vec<SocialLink>> {
        let query = Query::table("social_links")
            .eq("is_visible", true)
            .order("sort_order", Direction::Asc);
        self.fetch_all(&query).await
    }

    /// LinkedIn and Handshake links, filtered by the store
    pub async fn professional_links(&self) -> GatewayResult<Vec<SocialLink>> {
        let patterns = ["*linkedin*", "*handshake*"];
        let filters = ["icon", "label"]
            .iter()
            .flat_map(|column| patterns.iter().map(move |p| Filter::ilike(*column, *p)))
            .collect();

        let query = Query::table("social_links")
            .eq("is_visible", true)
            .any(filters)
            .order("sort_order", Direction::Asc);
        self.fetch_all(&query).await
    }

    // ============================================
    // Subjects, courses & assignments
    // ============================================

    pub async fn subjects(&self) -> GatewayResult<Vec<Subject>> {
        self.fetch_all(&subjects_query()).await
    }

    pub async fn subjects_preview(&self, limit: usize) -> GatewayResult<Vec<Subject>> {
        self.fetch_all(&subjects_query().limit(limit)).await
    }

    pub async fn subject_by_id(&self, subject_id: &str) -> GatewayResult<Option<Subject>> {
        let query = Query::table("subjects_with_counts")
            .eq("id", subject_id)
            .single();
        self.fetch_one(&query).await
    }

    pub async fn courses_by_subject(&self, subject_id: &str) -> GatewayResult<Vec<Course>> {
        let query = Query::table("courses_with_counts")
            .eq("subject_id", subject_id)
            .order("sort_order", Direction::Asc);
        self.fetch_all(&query).await
    }

    pub async fn course_by_id(&self, course_id: &str) -> GatewayResult<Option<Course>> {
        let query = Query::table("courses").eq("id", course_id).single();
        self.fetch_one(&query).await
    }

    pub async fn course_tools(&self, course_id: &str) -> GatewayResult<Vec<CourseTool>> {
        let query = Query::table("course_tools")
            .eq("course_id", course_id)
            .order("sort_order", Direction::Asc);
        self.fetch_all(&query).await
    }

    pub async fn assignments_by_course(&self, course_id: &str) -> GatewayResult<Vec<Assignment>> {
        let query = Query::table("assignments")
            .eq("course_id", course_id)
            .eq("is_visible", true)
            .order("sort_order", Direction::Asc);
        self.fetch_all(&query).await
    }

    // ============================================
    // Activities
    // ============================================

    pub async fn activities(&self) -> GatewayResult<Vec<Activity>> {
        let query = visible_activities(ACTIVITY_LIST_COLUMNS);
        self.fetch_all(&query).await
    }

    pub async fn activities_preview(&self, limit: usize) -> GatewayResult<Vec<Activity>> {
        let query = visible_activities(ACTIVITY_PREVIEW_COLUMNS).limit(limit);
        self.fetch_all(&query).await
    }

    pub async fn activity_by_id(&self, activity_id: &str) -> GatewayResult<Option<Activity>> {
        let query = Query::table("activities")
            .select(ACTIVITY_DETAIL_COLUMNS)
            .eq("id", activity_id)
            .eq("is_visible", true)
            .single();
        self.fetch_one(&query).await
    }

    /// Total of visible activities; zero when the view has no row
    pub async fn activities_count(&self) -> GatewayResult<i64> {
        let query = Query::table("activities_count").select("total").single();
        let count: Option<ActivitiesCount> = self.fetch_one(&query).await?;
        Ok(count.map(|c| c.total).unwrap_or(0))
    }

    // ============================================
    // About & contact
    // ============================================

    pub async fn about_sections(&self) -> GatewayResult<Vec<AboutSection>> {
        let query = Query::table("about_page")
            .select("id,title,content,sort_order")
            .order("sort_order", Direction::Asc);
        self.fetch_all(&query).await
    }

    pub async fn insert_contact_message(&self, message: &NewContactMessage) -> GatewayResult<()> {
        let record =
            serde_json::to_value(message).map_err(|e| GatewayError::Decode(e.to_string()))?;
        self.gateway.insert("contact_messages", record).await
    }

    // ============================================
    // Helpers
    // ============================================

    async fn fetch_all<T: DeserializeOwned>(&self, query: &Query) -> GatewayResult<Vec<T>> {
        let value = self.gateway.select(query).await?;
        rows_from(value)
    }

    async fn fetch_one<T: DeserializeOwned>(&self, query: &Query) -> GatewayResult<Option<T>> {
        match self.gateway.select(query).await {
            Ok(Value::Null) => Ok(None),
            Ok(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| GatewayError::Decode(e.to_string())),
            Err(e) if e.is_not_single() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn subjects_query() -> Query {
    Query::table("subjects_with_counts").order("sort_order", Direction::Asc)
}

fn visible_activities(columns: &str) -> Query {
    Query::table("activities")
        .select(columns)
        .eq("is_visible", true)
        .order("sort_order", Direction::Asc)
}

/// Decode a row array; a null payload is an empty list
fn rows_from<T: DeserializeOwned>(value: Value) -> GatewayResult<Vec<T>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => {
            serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))
        }
        other => Err(GatewayError::Decode(format!(
            "expected a list of rows, got {}",
            other
        ))),
    }
}

/// Links shown where only professional profiles belong.
///
/// With `fallback_to_all`, an empty match returns every link instead.
pub fn preferred_links(links: &[SocialLink], fallback_to_all: bool) -> Vec<SocialLink> {
    let preferred: Vec<SocialLink> = links
        .iter()
        .filter(|l| l.is_professional())
        .cloned()
        .collect();

    if preferred.is_empty() && fallback_to_all {
        links.to_vec()
    } else {
        preferred
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Seed data shared by page and route tests

    use crate::gateway::MemoryGateway;
    use serde_json::json;

    pub fn seeded_gateway() -> MemoryGateway {
        MemoryGateway::new()
            .with_table(
                "profile",
                vec![json!({
                    "full_name": "Ada Lovelace",
                    "hero_title": "Hi, I'm Ada",
                    "hero_description": "Student of analytical engines.",
                    "about_title": "About Me",
                    "about_paragraph_1": "I write notes on engines.",
                    "about_paragraph_2": null,
                    "email": "ada@example.edu",
                    "resume_url": "https://example.edu/ada.pdf",
                    "profile_image": {"public_url": "https://cdn.example/ada.png", "alt_text": null}
                })],
            )
            .with_table(
                "social_links",
                vec![
                    json!({"id": "l1", "label": "GitHub", "url": "https://github.com/ada", "icon": "github", "sort_order": 1, "is_visible": true}),
                    json!({"id": "l2", "label": "LinkedIn", "url": "https://linkedin.com/in/ada", "icon": "linkedin", "sort_order": 2, "is_visible": true}),
                    json!({"id": "l3", "label": "Handshake", "url": "https://joinhandshake.com/ada", "icon": null, "sort_order": 3, "is_visible": true}),
                    json!({"id": "l4", "label": "Old blog", "url": "https://blog.example", "icon": null, "sort_order": 4, "is_visible": false}),
                ],
            )
            .with_table(
                "subjects_with_counts",
                vec![
                    json!({"id": "math", "name": "Mathematics", "description": "Calculus", "icon": "📐", "sort_order": 2, "course_count": 1}),
                    json!({"id": "cs", "name": "Computer Science", "description": "Programming", "icon": "💻", "sort_order": 1, "course_count": 2}),
                ],
            )
            .with_table(
                "courses_with_counts",
                vec![
                    json!({"id": "cs201", "subject_id": "cs", "name": "CS 201: Data Structures", "description": "Trees", "sort_order": 2, "assignment_count": 1}),
                    json!({"id": "cs101", "subject_id": "cs", "name": "CS 101: Intro", "description": "Python", "sort_order": 1, "assignment_count": 2}),
                    json!({"id": "math201", "subject_id": "math", "name": "MATH 201: Calculus II", "description": "Integrals", "sort_order": 1, "assignment_count": 0}),
                ],
            )
            .with_table(
                "courses",
                vec![
                    json!({"id": "cs101", "subject_id": "cs", "name": "CS 101: Intro", "description": "Python"}),
                    json!({"id": "cs201", "subject_id": "cs", "name": "CS 201: Data Structures", "description": "Trees"}),
                ],
            )
            .with_table(
                "course_tools",
                vec![
                    json!({"course_id": "cs101", "name": "Git", "sort_order": 2}),
                    json!({"course_id": "cs101", "name": "Python", "sort_order": 1}),
                ],
            )
            .with_table(
                "assignments",
                vec![
                    json!({"id": "a1", "course_id": "cs101", "title": "Hello World", "description": "Print things", "repo_url": "https://github.com/ada/a1", "sort_order": 1, "is_visible": true}),
                    json!({"id": "a2", "course_id": "cs101", "title": "Draft", "description": "Hidden", "repo_url": null, "sort_order": 2, "is_visible": false}),
                ],
            )
            .with_table(
                "activities",
                vec![
                    json!({"id": "act1", "title": "Photography Club", "description": "Campus photo walks", "story": "We walked.", "organization": "Photo Society", "location": "Sacramento", "start_date": "2023-01", "end_date": "2023-05", "cover_image_url": null, "sort_order": 1, "is_visible": true}),
                    json!({"id": "act2", "title": "Volunteering", "description": null, "story": null, "organization": null, "location": null, "start_date": "2024-02", "end_date": null, "cover_image_url": null, "sort_order": 2, "is_visible": true}),
                    json!({"id": "act3", "title": "Secret", "description": "Hidden", "sort_order": 0, "is_visible": false}),
                ],
            )
            .with_table("activities_count", vec![json!({"total": 2})])
            .with_table(
                "about_page",
                vec![
                    json!({"id": "s2", "title": "What I Do", "content": "Engines.", "sort_order": 2}),
                    json!({"id": "s1", "title": "Who I Am", "content": "Ada.", "sort_order": 1}),
                ],
            )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::seeded_gateway;
    use super::*;
    use crate::gateway::MemoryGateway;

    fn service(gateway: MemoryGateway) -> ContentService {
        ContentService::new(Arc::new(gateway))
    }

    #[tokio::test]
    async fn test_profile_with_image() {
        let content = service(seeded_gateway());
        let profile = content.profile().await.unwrap().unwrap();

        assert_eq!(profile.full_name, "Ada Lovelace");
        assert_eq!(
            profile.profile_image.unwrap().public_url,
            "https://cdn.example/ada.png"
        );
    }

    #[tokio::test]
    async fn test_missing_profile_is_absent() {
        let content = service(MemoryGateway::new());
        assert_eq!(content.profile().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_social_links_visible_and_ordered() {
        let content = service(seeded_gateway());
        let links = content.social_links().await.unwrap();

        let labels: Vec<&str> = links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["GitHub", "LinkedIn", "Handshake"]);
    }

    #[tokio::test]
    async fn test_professional_links_filtered_by_store() {
        let content = service(seeded_gateway());
        let links = content.professional_links().await.unwrap();

        let labels: Vec<&str> = links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["LinkedIn", "Handshake"]);
    }

    #[tokio::test]
    async fn test_preview_differs_only_by_limit() {
        let content = service(seeded_gateway());

        let all = content.subjects().await.unwrap();
        let preview = content.subjects_preview(1).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(preview, all[..1].to_vec());
        assert_eq!(all[0].id, "cs");

        let activities = content.activities().await.unwrap();
        let activities_preview = content.activities_preview(1).await.unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities_preview.len(), 1);
        assert_eq!(activities_preview[0].id, activities[0].id);
    }

    #[tokio::test]
    async fn test_course_lookups() {
        let content = service(seeded_gateway());

        let courses = content.courses_by_subject("cs").await.unwrap();
        assert_eq!(courses[0].id, "cs101");

        assert!(content.course_by_id("cs101").await.unwrap().is_some());
        assert!(content.course_by_id("nope").await.unwrap().is_none());

        let tools = content.course_tools("cs101").await.unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Python", "Git"]);

        let assignments = content.assignments_by_course("cs101").await.unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].title, "Hello World");
    }

    #[tokio::test]
    async fn test_hidden_activity_is_absent() {
        let content = service(seeded_gateway());
        assert!(content.activity_by_id("act3").await.unwrap().is_none());

        let activity = content.activity_by_id("act1").await.unwrap().unwrap();
        assert_eq!(activity.story.as_deref(), Some("We walked."));
    }

    #[tokio::test]
    async fn test_activities_count() {
        let content = service(seeded_gateway());
        assert_eq!(content.activities_count().await.unwrap(), 2);

        let empty = service(MemoryGateway::new());
        assert_eq!(empty.activities_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_about_sections_ordered() {
        let content = service(seeded_gateway());
        let sections = content.about_sections().await.unwrap();
        assert_eq!(sections[0].title, "Who I Am");
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let content = service(MemoryGateway::new().with_failure("profile", "JWT expired"));
        let err = content.profile().await.unwrap_err();
        assert_eq!(err.message(), "JWT expired");
    }

    #[tokio::test]
    async fn test_insert_contact_message() {
        let gateway = Arc::new(MemoryGateway::new());
        let content = ContentService::new(gateway.clone());

        let message = NewContactMessage {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            subject: Some("Hello".to_string()),
            message: "Nice site".to_string(),
        };
        content.insert_contact_message(&message).await.unwrap();

        let rows = gateway.rows("contact_messages").await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["subject"], "Hello");
    }

    #[test]
    fn test_preferred_links_fallback() {
        let github: SocialLink = serde_json::from_value(serde_json::json!({
            "id": "1", "label": "GitHub", "url": "https://github.com/ada", "icon": "github"
        }))
        .unwrap();
        let links = vec![github];

        assert!(preferred_links(&links, false).is_empty());
        assert_eq!(preferred_links(&links, true).len(), 1);
    }
}
