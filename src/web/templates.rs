//! Page templates
//!
//! Every page template extends `base.html` and carries a [`ShellView`] for
//! the navigation bar, theme class and footer.

use askama::Template;

use crate::pages::about::AboutData;
use crate::pages::academic::{AcademicWorkData, CoursePageData, SubjectPageData};
use crate::pages::activities::{ActivitiesData, ActivityData};
use crate::pages::contact::{ContactData, ContactForm};
use crate::pages::home::HomeData;
use crate::pages::{NotFound, PageState};
use crate::shell::ShellView;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub shell: ShellView,
    pub state: PageState<HomeData>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub shell: ShellView,
    pub state: PageState<AboutData>,
}

#[derive(Template)]
#[template(path = "academic_work.html")]
pub struct AcademicWorkTemplate {
    pub shell: ShellView,
    pub state: PageState<AcademicWorkData>,
}

#[derive(Template)]
#[template(path = "subject.html")]
pub struct SubjectTemplate {
    pub shell: ShellView,
    pub state: PageState<SubjectPageData>,
    pub not_found: NotFound,
}

#[derive(Template)]
#[template(path = "course.html")]
pub struct CourseTemplate {
    pub shell: ShellView,
    pub state: PageState<CoursePageData>,
    pub not_found: NotFound,
}

#[derive(Template)]
#[template(path = "activities.html")]
pub struct ActivitiesTemplate {
    pub shell: ShellView,
    pub state: PageState<ActivitiesData>,
}

#[derive(Template)]
#[template(path = "activity.html")]
pub struct ActivityTemplate {
    pub shell: ShellView,
    pub state: PageState<ActivityData>,
    pub not_found: NotFound,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub shell: ShellView,
    pub state: PageState<ContactData>,
    pub form: ContactForm,
    /// Shown after a successful submission
    pub notice: Option<String>,
    /// Validation or write failure, shown above the form
    pub form_error: Option<String>,
}

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub shell: ShellView,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub shell: ShellView,
}

/// Standalone 500 page; does not extend the base layout
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub code: &'static str,
    pub request_id: String,
}
