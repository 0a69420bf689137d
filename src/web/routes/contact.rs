//! Contact Routes
//!
//! - GET /contact - Contact details and message form
//! - POST /contact - Submit a message

use axum::{
    extract::{Form, State},
    http::Uri,
    response::Html,
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use super::run_page;
use crate::pages::contact::{self, ContactForm, SubmitOutcome};
use crate::pages::PageState;
use crate::web::error::{render, WebResult};
use crate::web::state::AppState;
use crate::web::templates::ContactTemplate;

const THANK_YOU: &str = "Thank you for your message! I'll get back to you soon.";

async fn load(state: &AppState) -> PageState<contact::ContactData> {
    let content = state.content.clone();
    run_page("contact", async move { contact::load(&content).await }).await
}

/// GET /contact
pub async fn show(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    jar: CookieJar,
) -> WebResult<Html<String>> {
    let page = load(&state).await;

    render(ContactTemplate {
        shell: state.shell(uri.path(), &jar),
        state: page,
        form: ContactForm::default(),
        notice: None,
        form_error: None,
    })
}

/// POST /contact
///
/// A successful send clears the form; any failure keeps what was typed.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    jar: CookieJar,
    Form(form): Form<ContactForm>,
) -> WebResult<Html<String>> {
    let outcome = contact::submit(&state.content, &form).await;
    let page = load(&state).await;

    let (form, notice, form_error) = match outcome {
        SubmitOutcome::Sent => (ContactForm::default(), Some(THANK_YOU.to_string()), None),
        SubmitOutcome::Invalid(message) | SubmitOutcome::Failed(message) => {
            (form, None, Some(message))
        }
    };

    render(ContactTemplate {
        shell: state.shell(uri.path(), &jar),
        state: page,
        form,
        notice,
        form_error,
    })
}
