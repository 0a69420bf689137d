//! Read-only pages
//!
//! - GET / - Home
//! - GET /about - About sections
//! - GET /academic-work - Subject listing
//! - GET /subject/:subjectId - Subject with its courses
//! - GET /course/:courseId - Course with tools and assignments
//! - GET /activities - Activity listing
//! - GET /activities/:activityId - Activity story

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::Html,
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use super::run_page;
use crate::pages::{about, academic, activities, home};
use crate::web::error::{render, WebResult};
use crate::web::state::AppState;
use crate::web::templates::{
    AboutTemplate, AcademicWorkTemplate, ActivitiesTemplate, ActivityTemplate, CourseTemplate,
    HomeTemplate, NotFoundTemplate, SubjectTemplate,
};

/// GET /
pub async fn home(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    jar: CookieJar,
) -> WebResult<Html<String>> {
    let content = state.content.clone();
    let page = run_page("home", async move { home::load(&content).await }).await;

    render(HomeTemplate {
        shell: state.shell(uri.path(), &jar),
        state: page,
    })
}

/// GET /about
pub async fn about(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    jar: CookieJar,
) -> WebResult<Html<String>> {
    let content = state.content.clone();
    let page = run_page("about", async move { about::load(&content).await }).await;

    render(AboutTemplate {
        shell: state.shell(uri.path(), &jar),
        state: page,
    })
}

/// GET /academic-work
pub async fn academic_work(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    jar: CookieJar,
) -> WebResult<Html<String>> {
    let source = state.catalog.clone();
    let page = run_page("academic-work", async move {
        academic::load_subjects(&source).await
    })
    .await;

    render(AcademicWorkTemplate {
        shell: state.shell(uri.path(), &jar),
        state: page,
    })
}

/// GET /subject/:subjectId
pub async fn subject(
    State(state): State<Arc<AppState>>,
    Path(subject_id): Path<String>,
    uri: Uri,
    jar: CookieJar,
) -> WebResult<Html<String>> {
    let source = state.catalog.clone();
    let page = run_page("subject", async move {
        academic::load_subject(&source, &subject_id).await
    })
    .await;

    render(SubjectTemplate {
        shell: state.shell(uri.path(), &jar),
        state: page,
        not_found: academic::SUBJECT_NOT_FOUND,
    })
}

/// GET /course/:courseId
pub async fn course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
    uri: Uri,
    jar: CookieJar,
) -> WebResult<Html<String>> {
    let source = state.catalog.clone();
    let page = run_page("course", async move {
        academic::load_course(&source, &course_id).await
    })
    .await;

    render(CourseTemplate {
        shell: state.shell(uri.path(), &jar),
        state: page,
        not_found: academic::COURSE_NOT_FOUND,
    })
}

/// GET /activities
pub async fn activity_list(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    jar: CookieJar,
) -> WebResult<Html<String>> {
    let source = state.catalog.clone();
    let page = run_page("activities", async move {
        activities::load_list(&source).await
    })
    .await;

    render(ActivitiesTemplate {
        shell: state.shell(uri.path(), &jar),
        state: page,
    })
}

/// GET /activities/:activityId
pub async fn activity(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<String>,
    uri: Uri,
    jar: CookieJar,
) -> WebResult<Html<String>> {
    let source = state.catalog.clone();
    let page = run_page("activity", async move {
        activities::load_detail(&source, &activity_id).await
    })
    .await;

    render(ActivityTemplate {
        shell: state.shell(uri.path(), &jar),
        state: page,
        not_found: activities::ACTIVITY_NOT_FOUND,
    })
}

/// Fallback for unknown paths
pub async fn not_found(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    jar: CookieJar,
) -> WebResult<(StatusCode, Html<String>)> {
    tracing::debug!(path = %uri.path(), "No route matched");
    let body = render(NotFoundTemplate {
        shell: state.shell(uri.path(), &jar),
    })?;
    Ok((StatusCode::NOT_FOUND, body))
}
