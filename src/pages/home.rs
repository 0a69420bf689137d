//! Home page: hero, about teaser, subject and activity previews

use crate::content::{
    preferred_links, Activity, ContentService, Profile, SocialLink, Subject,
    ACTIVITIES_PREVIEW_LIMIT, SUBJECTS_PREVIEW_LIMIT,
};
use crate::content::models::non_blank;
use crate::gateway::GatewayResult;

const DEFAULT_HERO_TITLE: &str = "Welcome to My Academic Portfolio";
const DEFAULT_HERO_DESCRIPTION: &str =
    "This portfolio showcases my academic journey, projects, and skills.";
const DEFAULT_ABOUT_TITLE: &str = "About Me";

#[derive(Debug, Clone, PartialEq)]
pub struct HomeData {
    pub profile: Option<Profile>,
    pub social_links: Vec<SocialLink>,
    pub subjects: Vec<Subject>,
    pub activities: Vec<Activity>,
    pub activities_count: i64,
}

pub async fn load(content: &ContentService) -> GatewayResult<HomeData> {
    let (profile, social_links, subjects, activities, activities_count) = tokio::join!(
        content.profile(),
        content.social_links(),
        content.subjects_preview(SUBJECTS_PREVIEW_LIMIT),
        content.activities_preview(ACTIVITIES_PREVIEW_LIMIT),
        content.activities_count(),
    );

    // Field order is the error check order
    Ok(HomeData {
        profile: profile?,
        social_links: social_links?,
        subjects: subjects?,
        activities: activities?,
        activities_count: activities_count?,
    })
}

impl HomeData {
    fn profile_text(&self, pick: impl Fn(&Profile) -> &Option<String>) -> Option<&str> {
        self.profile.as_ref().and_then(|p| non_blank(pick(p)))
    }

    pub fn hero_title(&self) -> &str {
        self.profile_text(|p| &p.hero_title)
            .unwrap_or(DEFAULT_HERO_TITLE)
    }

    pub fn hero_description(&self) -> &str {
        self.profile_text(|p| &p.hero_description)
            .unwrap_or(DEFAULT_HERO_DESCRIPTION)
    }

    pub fn about_title(&self) -> &str {
        self.profile_text(|p| &p.about_title)
            .unwrap_or(DEFAULT_ABOUT_TITLE)
    }

    pub fn about_paragraphs(&self) -> Vec<&str> {
        [
            self.profile_text(|p| &p.about_paragraph_1),
            self.profile_text(|p| &p.about_paragraph_2),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn resume_url(&self) -> Option<&str> {
        self.profile_text(|p| &p.resume_url)
    }

    pub fn image_url(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.profile_image.as_ref())
            .map(|img| img.public_url.as_str())
    }

    pub fn image_alt(&self) -> &str {
        let profile = self.profile.as_ref();
        profile
            .and_then(|p| p.profile_image.as_ref())
            .and_then(|img| non_blank(&img.alt_text))
            .or_else(|| profile.map(|p| p.full_name.as_str()).filter(|n| !n.is_empty()))
            .unwrap_or("Profile photo")
    }

    /// LinkedIn and Handshake only, no fallback
    pub fn contact_links(&self) -> Vec<SocialLink> {
        preferred_links(&self.social_links, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::seeded_gateway;
    use crate::gateway::MemoryGateway;
    use crate::pages::{PageController, PageState};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_loads_all_sections() {
        let content = ContentService::new(Arc::new(seeded_gateway()));
        let home = load(&content).await.unwrap();

        assert_eq!(home.hero_title(), "Hi, I'm Ada");
        assert_eq!(home.social_links.len(), 3);
        assert_eq!(home.subjects.len(), 2);
        assert_eq!(home.activities.len(), 2);
        assert_eq!(home.activities_count, 2);
        assert_eq!(home.about_paragraphs(), vec!["I write notes on engines."]);
        assert_eq!(home.image_alt(), "Ada Lovelace");

        let contact: Vec<_> = home.contact_links().into_iter().map(|l| l.label).collect();
        assert_eq!(contact, vec!["LinkedIn", "Handshake"]);
    }

    #[tokio::test]
    async fn test_empty_store_uses_fallbacks() {
        let content = ContentService::new(Arc::new(MemoryGateway::new()));
        let home = load(&content).await.unwrap();

        assert_eq!(home.hero_title(), "Welcome to My Academic Portfolio");
        assert_eq!(home.about_title(), "About Me");
        assert!(home.resume_url().is_none());
        assert!(home.subjects.is_empty());
        assert_eq!(home.activities_count, 0);
    }

    #[tokio::test]
    async fn test_any_error_withholds_all_data() {
        let gateway = seeded_gateway().with_failure("activities_count", "permission denied");
        let content = ContentService::new(Arc::new(gateway));

        let mut page = PageController::new("home");
        page.mount(async move { load(&content).await });

        assert_eq!(
            page.settled().await,
            PageState::Error("permission denied".to_string())
        );
    }

    #[tokio::test]
    async fn test_first_error_in_check_order_wins() {
        let gateway = seeded_gateway()
            .with_failure("profile", "profile failed")
            .with_failure("activities", "activities failed");
        let content = ContentService::new(Arc::new(gateway));

        let err = load(&content).await.unwrap_err();
        assert_eq!(err.message(), "profile failed");
    }

    #[tokio::test]
    async fn test_loading_until_gateway_resolves() {
        let gateway = Arc::new(seeded_gateway().gated());
        let content = ContentService::new(gateway.clone());

        let mut page = PageController::new("home");
        page.mount(async move { load(&content).await });
        assert!(page.state().is_loading());

        gateway.release(5);
        let state = page.settled().await;
        assert_eq!(state.data().map(|d| d.activities_count), Some(2));
    }
}
