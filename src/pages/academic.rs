//! Academic work: subject listing, subject detail and course detail.
//!
//! Each loader reads either from the content store or from the static
//! catalog, depending on the configured [`CatalogSource`].

use super::{clean_id, CatalogSource, NotFound};
use crate::content::{Assignment, Course, Subject};
use crate::gateway::GatewayResult;

pub const SUBJECT_NOT_FOUND: NotFound = NotFound {
    title: "Subject Not Found",
    back_href: "/academic-work",
    back_label: "Back to Academic Work",
};

pub const COURSE_NOT_FOUND: NotFound = NotFound {
    title: "Course Not Found",
    back_href: "/academic-work",
    back_label: "Back to Academic Work",
};

#[derive(Debug, Clone, PartialEq)]
pub struct AcademicWorkData {
    pub subjects: Vec<Subject>,
}

/// A course card on a subject page
#[derive(Debug, Clone, PartialEq)]
pub struct CourseCard {
    pub course: Course,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectDetail {
    pub subject: Subject,
    pub courses: Vec<CourseCard>,
}

/// `None` renders the not-found view
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectPageData {
    pub detail: Option<SubjectDetail>,
}

/// Link back to the subject a course belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct ParentSubject {
    pub id: String,
    pub name: String,
}

impl ParentSubject {
    pub fn href(&self) -> String {
        format!("/subject/{}", urlencoding::encode(&self.id))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseDetail {
    pub course: Course,
    pub parent: Option<ParentSubject>,
    pub tools: Vec<String>,
    pub assignments: Vec<Assignment>,
}

/// `None` renders the not-found view
#[derive(Debug, Clone, PartialEq)]
pub struct CoursePageData {
    pub detail: Option<CourseDetail>,
}

pub async fn load_subjects(source: &CatalogSource) -> GatewayResult<AcademicWorkData> {
    let subjects = match source {
        CatalogSource::Remote(content) => content.subjects().await?,
        CatalogSource::Static(catalog) => catalog
            .subjects()
            .iter()
            .map(|s| s.subject.clone())
            .collect(),
    };
    Ok(AcademicWorkData { subjects })
}

pub async fn load_subject(source: &CatalogSource, subject_id: &str) -> GatewayResult<SubjectPageData> {
    let Some(subject_id) = clean_id(subject_id) else {
        return Ok(SubjectPageData { detail: None });
    };

    let detail = match source {
        CatalogSource::Remote(content) => {
            let (subject, courses) = tokio::join!(
                content.subject_by_id(subject_id),
                content.courses_by_subject(subject_id),
            );
            let (subject, courses) = (subject?, courses?);

            subject.map(|subject| SubjectDetail {
                subject,
                courses: courses
                    .into_iter()
                    .map(|course| CourseCard {
                        course,
                        tools: Vec::new(),
                    })
                    .collect(),
            })
        }
        CatalogSource::Static(catalog) => catalog.subject(subject_id).map(|s| SubjectDetail {
            subject: s.subject.clone(),
            courses: s
                .courses
                .iter()
                .map(|c| CourseCard {
                    course: c.course.clone(),
                    tools: c.tools.clone(),
                })
                .collect(),
        }),
    };

    Ok(SubjectPageData { detail })
}

pub async fn load_course(source: &CatalogSource, course_id: &str) -> GatewayResult<CoursePageData> {
    let Some(course_id) = clean_id(course_id) else {
        return Ok(CoursePageData { detail: None });
    };

    let detail = match source {
        CatalogSource::Remote(content) => {
            let (course, tools, assignments) = tokio::join!(
                content.course_by_id(course_id),
                content.course_tools(course_id),
                content.assignments_by_course(course_id),
            );
            let (course, tools, assignments) = (course?, tools?, assignments?);

            match course {
                Some(course) => {
                    let parent = match course.subject_id.as_deref() {
                        Some(subject_id) => content
                            .subject_by_id(subject_id)
                            .await?
                            .map(|s| ParentSubject {
                                id: s.id,
                                name: s.name,
                            }),
                        None => None,
                    };

                    Some(CourseDetail {
                        course,
                        parent,
                        tools: tools.into_iter().map(|t| t.name).collect(),
                        assignments,
                    })
                }
                None => None,
            }
        }
        CatalogSource::Static(catalog) => catalog.course(course_id).map(|(subject, c)| CourseDetail {
            course: c.course.clone(),
            parent: Some(ParentSubject {
                id: subject.subject.id.clone(),
                name: subject.subject.name.clone(),
            }),
            tools: c.tools.clone(),
            assignments: c.assignments.clone(),
        }),
    };

    Ok(CoursePageData { detail })
}
