//! Activities listing and the per-activity story page

use super::{clean_id, CatalogSource, NotFound};
use crate::content::Activity;
use crate::gateway::GatewayResult;

pub const ACTIVITY_NOT_FOUND: NotFound = NotFound {
    title: "Activity Not Found",
    back_href: "/activities",
    back_label: "Back to Activities",
};

#[derive(Debug, Clone, PartialEq)]
pub struct ActivitiesData {
    pub activities: Vec<Activity>,
}

/// `None` renders the not-found view
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityData {
    pub activity: Option<Activity>,
}

pub async fn load_list(source: &CatalogSource) -> GatewayResult<ActivitiesData> {
    let activities = match source {
        CatalogSource::Remote(content) => content.activities().await?,
        CatalogSource::Static(catalog) => catalog.activities().to_vec(),
    };
    Ok(ActivitiesData { activities })
}

/// A blank id is treated as missing without querying
pub async fn load_detail(source: &CatalogSource, activity_id: &str) -> GatewayResult<ActivityData> {
    let Some(activity_id) = clean_id(activity_id) else {
        return Ok(ActivityData { activity: None });
    };

    let activity = match source {
        CatalogSource::Remote(content) => content.activity_by_id(activity_id).await?,
        CatalogSource::Static(catalog) => catalog.activity(activity_id).cloned(),
    };
    Ok(ActivityData { activity })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::content::fixtures::seeded_gateway;
    use crate::content::ContentService;
    use crate::gateway::MemoryGateway;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list_remote_and_static() {
        let content = ContentService::new(Arc::new(seeded_gateway()));
        let remote = load_list(&CatalogSource::Remote(content)).await.unwrap();
        assert_eq!(remote.activities[0].title, "Photography Club");
        assert_eq!(
            remote.activities[0].date_range().as_deref(),
            Some("2023-01 – 2023-05")
        );

        let fixed = load_list(&CatalogSource::Static(StaticCatalog::builtin()))
            .await
            .unwrap();
        assert_eq!(fixed.activities.len(), 4);
    }

    #[tokio::test]
    async fn test_detail_fallbacks() {
        let content = ContentService::new(Arc::new(seeded_gateway()));
        let page = load_detail(&CatalogSource::Remote(content), "act2")
            .await
            .unwrap();
        let activity = page.activity.unwrap();

        assert_eq!(activity.story_text(), "Story not added yet.");
        assert_eq!(activity.location_or_dash(), "—");
        assert_eq!(activity.dates_or_dash(), "From 2024-02");
    }

    #[tokio::test]
    async fn test_blank_id_skips_fetch() {
        let gateway = Arc::new(MemoryGateway::new().gated());
        let source = CatalogSource::Remote(ContentService::new(gateway));

        // Would hang on the gate if a query were issued
        let page = load_detail(&source, "   ").await.unwrap();
        assert!(page.activity.is_none());
    }

    #[tokio::test]
    async fn test_hidden_activity_not_found() {
        let content = ContentService::new(Arc::new(seeded_gateway()));
        let page = load_detail(&CatalogSource::Remote(content), "act3")
            .await
            .unwrap();
        assert!(page.activity.is_none());
        assert_eq!(ACTIVITY_NOT_FOUND.back_href, "/activities");
    }
}
