//! Static Catalog
//!
//! Built-in subjects → courses → assignments hierarchy and activity list,
//! used when the site runs with `content.catalog = "static"`. Lookups are
//! linear scans by id.

use std::sync::OnceLock;

use crate::content::{Activity, Assignment, Course, Subject};

/// A course with its tools and assignments
#[derive(Debug, Clone)]
pub struct CatalogCourse {
    pub course: Course,
    pub tools: Vec<String>,
    pub assignments: Vec<Assignment>,
}

/// A subject with its courses
#[derive(Debug, Clone)]
pub struct CatalogSubject {
    pub subject: Subject,
    pub courses: Vec<CatalogCourse>,
}

/// In-memory catalog held for the life of the process
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    subjects: Vec<CatalogSubject>,
    activities: Vec<Activity>,
}

impl StaticCatalog {
    pub fn new(subjects: Vec<CatalogSubject>, activities: Vec<Activity>) -> Self {
        Self {
            subjects,
            activities,
        }
    }

    /// The catalog compiled into the binary
    pub fn builtin() -> &'static StaticCatalog {
        static CATALOG: OnceLock<StaticCatalog> = OnceLock::new();
        CATALOG.get_or_init(builtin_catalog)
    }

    pub fn subjects(&self) -> &[CatalogSubject] {
        &self.subjects
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn subject(&self, id: &str) -> Option<&CatalogSubject> {
        self.subjects.iter().find(|s| s.subject.id == id)
    }

    /// Find a course and its parent subject
    pub fn course(&self, id: &str) -> Option<(&CatalogSubject, &CatalogCourse)> {
        self.subjects.iter().find_map(|subject| {
            subject
                .courses
                .iter()
                .find(|c| c.course.id == id)
                .map(|course| (subject, course))
        })
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }
}

fn subject(id: &str, name: &str, description: &str, icon: &str, courses: Vec<CatalogCourse>) -> CatalogSubject {
    let courses: Vec<CatalogCourse> = courses
        .into_iter()
        .map(|mut c| {
            c.course.subject_id = Some(id.to_string());
            c
        })
        .collect();

    CatalogSubject {
        subject: Subject {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: Some(icon.to_string()),
            course_count: Some(courses.len() as i64),
        },
        courses,
    }
}

fn course(
    id: &str,
    name: &str,
    description: &str,
    tools: &[&str],
    assignments: Vec<Assignment>,
) -> CatalogCourse {
    let assignments: Vec<Assignment> = assignments
        .into_iter()
        .map(|mut a| {
            a.course_id = Some(id.to_string());
            a
        })
        .collect();

    CatalogCourse {
        course: Course {
            id: id.to_string(),
            subject_id: None,
            name: name.to_string(),
            description: description.to_string(),
            assignment_count: Some(assignments.len() as i64),
        },
        tools: tools.iter().map(|t| t.to_string()).collect(),
        assignments,
    }
}

fn assignment(id: &str, title: &str, description: &str, repo_url: &str) -> Assignment {
    Assignment {
        id: id.to_string(),
        course_id: None,
        title: title.to_string(),
        description: description.to_string(),
        repo_url: Some(repo_url.to_string()),
    }
}

fn activity(id: &str, title: &str, description: &str) -> Activity {
    Activity {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        ..Default::default()
    }
}

fn builtin_catalog() -> StaticCatalog {
    let subjects = vec![
        subject(
            "cs",
            "Computer Science",
            "Programming, algorithms, and software development",
            "💻",
            vec![
                course(
                    "cs101",
                    "CS 101: Introduction to Programming",
                    "Fundamentals of programming using Python",
                    &["Python", "Git", "VS Code"],
                    vec![
                        assignment(
                            "a1",
                            "Assignment 1: Hello World Program",
                            "Create a basic Python program that prints \"Hello World\" and demonstrates variable usage",
                            "https://github.com/example/cs101-assignment1",
                        ),
                        assignment(
                            "a2",
                            "Assignment 2: Calculator Application",
                            "Build a command-line calculator with basic arithmetic operations",
                            "https://github.com/example/cs101-assignment2",
                        ),
                        assignment(
                            "a3",
                            "Assignment 3: Text File Parser",
                            "Develop a program to read and analyze text files",
                            "https://github.com/example/cs101-assignment3",
                        ),
                    ],
                ),
                course(
                    "cs201",
                    "CS 201: Data Structures",
                    "Arrays, linked lists, trees, and graphs",
                    &["Java", "JUnit", "IntelliJ"],
                    vec![
                        assignment(
                            "a1",
                            "Assignment 1: Linked List Implementation",
                            "Implement a singly linked list with add, remove, and search operations",
                            "https://github.com/example/cs201-assignment1",
                        ),
                        assignment(
                            "a2",
                            "Assignment 2: Binary Search Tree",
                            "Create a BST with insertion, deletion, and traversal methods",
                            "https://github.com/example/cs201-assignment2",
                        ),
                    ],
                ),
                course(
                    "cs301",
                    "CS 301: Algorithms",
                    "Algorithm design and analysis techniques",
                    &["C++", "CMake", "GDB"],
                    vec![assignment(
                        "a1",
                        "Assignment 1: Sorting Algorithms",
                        "Implement and compare quicksort, mergesort, and heapsort",
                        "https://github.com/example/cs301-assignment1",
                    )],
                ),
            ],
        ),
        subject(
            "math",
            "Mathematics",
            "Calculus, linear algebra, and statistics",
            "📐",
            vec![
                course(
                    "math201",
                    "MATH 201: Calculus II",
                    "Integration techniques and applications",
                    &["MATLAB", "Wolfram Alpha"],
                    vec![assignment(
                        "a1",
                        "Problem Set 1: Integration Techniques",
                        "Solve integration problems using substitution and integration by parts",
                        "https://github.com/example/math201-problemset1",
                    )],
                ),
                course(
                    "math301",
                    "MATH 301: Linear Algebra",
                    "Vector spaces and matrix theory",
                    &["Python", "NumPy", "Jupyter"],
                    vec![assignment(
                        "a1",
                        "Problem Set 1: Matrix Operations",
                        "Perform matrix multiplication and compute eigenvalues",
                        "https://github.com/example/math301-problemset1",
                    )],
                ),
            ],
        ),
        subject(
            "english",
            "English",
            "Literature analysis and academic writing",
            "📚",
            vec![
                course(
                    "eng201",
                    "ENG 201: Literary Analysis",
                    "Critical reading and interpretation",
                    &["MLA Format", "Google Docs"],
                    vec![assignment(
                        "a1",
                        "Essay 1: Shakespearean Tragedy",
                        "Analyze the themes of power and ambition in Macbeth",
                        "https://github.com/example/eng201-essay1",
                    )],
                ),
                course(
                    "eng301",
                    "ENG 301: Academic Writing",
                    "Research and argumentation skills",
                    &["APA Format", "Zotero", "Grammarly"],
                    vec![assignment(
                        "a1",
                        "Research Paper: Climate Change Communication",
                        "Examine rhetorical strategies in climate change discourse",
                        "https://github.com/example/eng301-research",
                    )],
                ),
            ],
        ),
    ];

    let activities = vec![
        activity(
            "1",
            "Research Assistant",
            "Machine Learning lab, working on neural network optimization",
        ),
        activity(
            "2",
            "Teaching Assistant",
            "CS 101, helping students with programming fundamentals",
        ),
        activity(
            "3",
            "Hackathon Organizer",
            "Annual university hackathon with 200+ participants",
        ),
        activity(
            "4",
            "Student Government",
            "Technology committee member, improving campus IT infrastructure",
        ),
    ];

    StaticCatalog::new(subjects, activities)
}
