//! Folio Web Server
//!
//! Server-rendered pages built with Axum and Askama.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /` - Home
//! - `GET /about` - About
//! - `GET /academic-work` - Subjects
//! - `GET /subject/:subjectId` - Subject detail
//! - `GET /course/:courseId` - Course detail
//! - `GET /activities` - Activities
//! - `GET /activities/:activityId` - Activity detail
//! - `GET /contact`, `POST /contact` - Contact page and form
//! - `GET /settings`, `POST /settings/theme` - Theme switch
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! Missing records render their not-found view with status 200; unknown
//! paths render a 404 page.

pub mod error;
pub mod routes;
pub mod state;
pub mod templates;

pub use error::{WebError, WebResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route("/", get(routes::pages::home))
        .route("/about", get(routes::pages::about))
        .route("/academic-work", get(routes::pages::academic_work))
        .route("/subject/:subject_id", get(routes::pages::subject))
        .route("/course/:course_id", get(routes::pages::course))
        .route("/activities", get(routes::pages::activity_list))
        .route("/activities/:activity_id", get(routes::pages::activity))
        .route(
            "/contact",
            get(routes::contact::show).post(routes::contact::submit),
        )
        .route("/settings", get(routes::settings::show))
        .route("/settings/theme", post(routes::settings::toggle_theme));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .merge(page_routes)
        .nest("/health", health_routes)
        .fallback(routes::pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the web server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), WebError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Folio listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WebError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Folio shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogMode, SiteConfig};
    use crate::content::fixtures::seeded_gateway;
    use crate::content::ContentService;
    use crate::gateway::MemoryGateway;
    use crate::shell::{MemoryThemeStore, Theme, ThemeService};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    struct TestApp {
        router: Router,
        gateway: Arc<MemoryGateway>,
        theme: Arc<ThemeService>,
    }

    fn create_test_app_with(gateway: MemoryGateway, catalog: CatalogMode) -> TestApp {
        let gateway = Arc::new(gateway);
        let theme = Arc::new(ThemeService::init(MemoryThemeStore::default()));
        let site = SiteConfig {
            title: "Ada's Portfolio".to_string(),
            footer_email: Some("ada@example.edu".to_string()),
        };

        let state = AppState::new(
            ContentService::new(gateway.clone()),
            catalog,
            Arc::clone(&theme),
            site,
        );

        TestApp {
            router: build_router(state),
            gateway,
            theme,
        }
    }

    fn create_test_app() -> TestApp {
        create_test_app_with(seeded_gateway(), CatalogMode::Remote)
    }

    async fn get(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_form(router: Router, uri: &str, body: &str) -> Response {
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_test_app();

        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = get(app.router.clone(), uri).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_home_renders_profile() {
        let app = create_test_app();
        let response = get(app.router, "/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("Student of analytical engines."));
        assert!(body.contains("View all (2)"));
        assert!(body.contains("Photography Club"));
    }

    #[tokio::test]
    async fn test_home_error_withholds_content() {
        let app = create_test_app_with(
            seeded_gateway().with_failure("subjects_with_counts", "permission denied for view"),
            CatalogMode::Remote,
        );
        let body = body_text(get(app.router, "/").await).await;

        assert!(body.contains("error-banner"));
        assert!(body.contains("permission denied for view"));
        assert!(!body.contains("Student of analytical engines."));
    }

    #[tokio::test]
    async fn test_unknown_course_renders_not_found_remote() {
        let app = create_test_app();
        let response = get(app.router, "/course/cs999").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("Course Not Found"));
        assert!(body.contains("Back to Academic Work"));
    }

    #[tokio::test]
    async fn test_unknown_course_renders_not_found_static() {
        let app = create_test_app_with(MemoryGateway::new(), CatalogMode::Static);
        let body = body_text(get(app.router, "/course/cs999").await).await;
        assert!(body.contains("Course Not Found"));
    }

    #[tokio::test]
    async fn test_static_catalog_pages() {
        let app = create_test_app_with(MemoryGateway::new(), CatalogMode::Static);

        let body = body_text(get(app.router.clone(), "/subject/math").await).await;
        assert!(body.contains("MATH 301: Linear Algebra"));
        assert!(body.contains(r#"class="nav-link active">Academic Work"#));
        assert!(!body.contains(r#"class="nav-link active">Home"#));

        let body = body_text(get(app.router, "/course/cs201").await).await;
        assert!(body.contains("Binary Search Tree"));
        assert!(body.contains("Back to Computer Science"));
    }

    #[tokio::test]
    async fn test_activity_detail_and_missing() {
        let app = create_test_app();

        let body = body_text(get(app.router.clone(), "/activities/act1").await).await;
        assert!(body.contains("We walked."));
        assert!(body.contains("Photo Society"));

        let body = body_text(get(app.router, "/activities/act3").await).await;
        assert!(body.contains("Activity Not Found"));
    }

    #[tokio::test]
    async fn test_about_page() {
        let app = create_test_app();
        let body = body_text(get(app.router, "/about").await).await;
        assert!(body.contains("Who I Am"));

        let empty = create_test_app_with(MemoryGateway::new(), CatalogMode::Remote);
        let body = body_text(get(empty.router, "/about").await).await;
        assert!(body.contains("No about content yet."));
    }

    #[tokio::test]
    async fn test_contact_submit_success_clears_form() {
        let app = create_test_app();
        let response = post_form(
            app.router,
            "/contact",
            "name=Grace&email=grace%40example.com&subject=&message=Hello+there",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("Thank you for your message!"));
        assert!(!body.contains("Hello there"));

        let rows = app.gateway.rows("contact_messages").await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Grace");
        assert!(rows[0]["subject"].is_null());
    }

    #[tokio::test]
    async fn test_contact_failure_keeps_input() {
        let app = create_test_app_with(
            seeded_gateway().with_failure("contact_messages", "insert blocked"),
            CatalogMode::Remote,
        );
        let body = body_text(
            post_form(
                app.router,
                "/contact",
                "name=Grace&email=grace%40example.com&subject=Hi&message=Hello+there",
            )
            .await,
        )
        .await;

        assert!(body.contains("insert blocked"));
        assert!(body.contains("Hello there"));
        assert!(body.contains(r#"value="Grace""#));
    }

    #[tokio::test]
    async fn test_contact_validation() {
        let app = create_test_app();
        let body = body_text(post_form(app.router, "/contact", "name=Grace").await).await;

        assert!(body.contains("Please fill in: email, message."));
        assert!(app.gateway.rows("contact_messages").await.is_empty());
    }

    fn theme_cookie(response: &Response) -> String {
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_theme_toggle_is_per_visitor() {
        let app = create_test_app();
        let response = post_form(app.router.clone(), "/settings/theme", "return_to=%2Fabout").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/about");
        let cookie = theme_cookie(&response);
        assert_eq!(cookie, "folio_theme=dark");

        let with_cookie = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/settings")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(body_text(with_cookie).await.contains(r#"<html lang="en" class="dark">"#));

        // Other visitors and the site default are unaffected
        let body = body_text(get(app.router.clone(), "/settings").await).await;
        assert!(body.contains(r#"<html lang="en" class="light">"#));
        assert_eq!(app.theme.current(), Theme::Light);

        let back = app
            .router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/settings/theme")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .header(header::COOKIE, &cookie)
                    .body(Body::from("return_to=%2Fsettings"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(theme_cookie(&back), "folio_theme=light");
    }

    #[tokio::test]
    async fn test_theme_toggle_rejects_unsafe_return_to() {
        let app = create_test_app();

        for body in [
            "return_to=%2Fabout%0Aevil",
            "return_to=%2Fabout%0D%0ASet-Cookie%3A+x%3D1",
            "return_to=%2F%5Cevil.example",
            "return_to=%2F%2Fevil.example",
        ] {
            let response = post_form(app.router.clone(), "/settings/theme", body).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", body);
            assert_eq!(response.headers()[header::LOCATION], "/settings", "{}", body);
        }
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let app = create_test_app();
        let response = get(app.router, "/no-such-page").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Page Not Found"));
    }
}
