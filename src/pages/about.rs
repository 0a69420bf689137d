//! About page: ordered free-form sections

use crate::content::{AboutSection, ContentService};
use crate::gateway::GatewayResult;

#[derive(Debug, Clone, PartialEq)]
pub struct AboutData {
    pub sections: Vec<AboutSection>,
}

impl AboutData {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

pub async fn load(content: &ContentService) -> GatewayResult<AboutData> {
    let sections = content.about_sections().await?;
    Ok(AboutData { sections })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::seeded_gateway;
    use crate::gateway::MemoryGateway;
    use crate::pages::{PageController, PageState};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_sections_in_order() {
        let content = ContentService::new(Arc::new(seeded_gateway()));
        let about = load(&content).await.unwrap();

        let titles: Vec<&str> = about.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Who I Am", "What I Do"]);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let content = ContentService::new(Arc::new(MemoryGateway::new()));
        assert!(load(&content).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_late_result_after_unmount_is_ignored() {
        let gateway = Arc::new(seeded_gateway().gated());
        let content = ContentService::new(gateway.clone());

        let mut page = PageController::new("about");
        let task = page.mount(async move { load(&content).await });
        let observer = page.subscribe();

        page.unmount();
        gateway.release(1);
        task.await.unwrap();

        assert_eq!(page.state(), PageState::Loading);
        assert!(!observer.has_changed().unwrap());
    }
}
