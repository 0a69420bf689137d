//! Web Error Types
//!
//! Failures that prevent a page from being produced at all. Content store
//! errors never reach this type: they are rendered inside the page.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use super::templates::ErrorTemplate;

/// Web layer error types
#[derive(Error, Debug)]
pub enum WebError {
    /// A template failed to render
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WebError {
    fn code(&self) -> &'static str {
        match self {
            WebError::Template(_) => "TEMPLATE_ERROR",
            WebError::Io(_) => "IO_ERROR",
            WebError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let code = self.code();
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "Page error occurred"
        );

        let page = ErrorTemplate {
            code,
            request_id: request_id.clone(),
        };
        let body = match page.render() {
            Ok(body) => Html(body),
            Err(_) => Html(format!(
                "<h1>Something went wrong</h1><p>Request id: {}</p>",
                request_id
            )),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type for page handlers
pub type WebResult<T> = Result<T, WebError>;

/// Render a template into an HTML response body
pub fn render<T: Template>(template: T) -> WebResult<Html<String>> {
    Ok(Html(template.render()?))
}
