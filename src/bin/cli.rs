//! Folio CLI
//!
//! Command-line interface for Folio operations:
//! - Inspect content in the store (profile, links, subjects, activities)
//! - Send a contact message
//! - Show the built-in catalog
//! - Show or toggle the site default theme
//! - Generate a config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use folio::config::Config;
use folio::content::{ContentService, SUBJECTS_PREVIEW_LIMIT};
use folio::gateway::RestGateway;
use folio::pages::contact::{ContactForm, SubmitOutcome};
use folio::shell::{FileThemeStore, ThemeService, EMPTY_VALUE};
use folio::StaticCatalog;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "folio-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage and inspect a Folio portfolio site")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the site owner profile
    Profile,

    /// List visible social links
    Links {
        /// Only LinkedIn and Handshake links, filtered by the store
        #[arg(long)]
        professional: bool,
    },

    /// List subjects with their course counts
    Subjects {
        /// Only the first N, as on the home page
        #[arg(long)]
        preview: bool,
    },

    /// List visible activities
    Activities,

    /// Show one activity
    Activity {
        /// Activity id
        id: String,
    },

    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        message: String,
    },

    /// Print the built-in catalog
    Catalog,

    /// Show or toggle the site default theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    folio::init_logging(&config.logging);

    match cli.command {
        Commands::Profile => {
            let content = connect(&config)?;
            match content.profile().await? {
                Some(profile) if cli.format == OutputFormat::Json => print_json(&profile)?,
                Some(profile) => {
                    println!("{}", or_dash(&profile.full_name));
                    println!();
                    println!("Hero:   {}", profile.hero_title.as_deref().unwrap_or(EMPTY_VALUE));
                    println!("Email:  {}", profile.email.as_deref().unwrap_or(EMPTY_VALUE));
                    println!("Resume: {}", profile.resume_url.as_deref().unwrap_or(EMPTY_VALUE));
                }
                None => println!("No profile found."),
            }
        }

        Commands::Links { professional } => {
            let content = connect(&config)?;
            let links = if professional {
                content.professional_links().await?
            } else {
                content.social_links().await?
            };

            if cli.format == OutputFormat::Json {
                print_json(&links)?;
            } else if links.is_empty() {
                println!("No links yet.");
            } else {
                for link in &links {
                    println!("{:<16} {}", link.label, link.url);
                }
            }
        }

        Commands::Subjects { preview } => {
            let content = connect(&config)?;
            let subjects = if preview {
                content.subjects_preview(SUBJECTS_PREVIEW_LIMIT).await?
            } else {
                content.subjects().await?
            };

            if cli.format == OutputFormat::Json {
                print_json(&subjects)?;
            } else if subjects.is_empty() {
                println!("No subjects yet.");
            } else {
                println!("{:<12} {:<32} {}", "ID", "Name", "Courses");
                println!("{}", "-".repeat(60));
                for subject in &subjects {
                    println!(
                        "{:<12} {:<32} {}",
                        subject.id,
                        subject.name,
                        subject.course_count_label()
                    );
                }
            }
        }

        Commands::Activities => {
            let content = connect(&config)?;
            let activities = content.activities().await?;

            if cli.format == OutputFormat::Json {
                print_json(&activities)?;
            } else if activities.is_empty() {
                println!("No activities yet.");
            } else {
                println!("{:<10} {:<32} {}", "ID", "Title", "Dates");
                println!("{}", "-".repeat(70));
                for activity in &activities {
                    println!(
                        "{:<10} {:<32} {}",
                        activity.id,
                        activity.title,
                        activity.dates_or_dash()
                    );
                }
            }
        }

        Commands::Activity { id } => {
            let content = connect(&config)?;
            match content.activity_by_id(id.trim()).await? {
                Some(activity) if cli.format == OutputFormat::Json => print_json(&activity)?,
                Some(activity) => {
                    println!("{}", activity.title);
                    println!();
                    println!("Organization: {}", activity.organization_or_dash());
                    println!("Location:     {}", activity.location_or_dash());
                    println!("Dates:        {}", activity.dates_or_dash());
                    println!();
                    println!("{}", activity.story_text());
                }
                None => bail!("Activity '{}' not found", id),
            }
        }

        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let content = connect(&config)?;
            let form = ContactForm {
                name,
                email,
                subject: subject.unwrap_or_default(),
                message,
            };

            match folio::pages::contact::submit(&content, &form).await {
                SubmitOutcome::Sent => println!("Message sent."),
                SubmitOutcome::Invalid(reason) => bail!("{}", reason),
                SubmitOutcome::Failed(reason) => bail!("Failed to send message: {}", reason),
            }
        }

        Commands::Catalog => print_catalog(StaticCatalog::builtin(), cli.format)?,

        Commands::Theme { action } => {
            let service = ThemeService::init(FileThemeStore::new(&config.theme.file));
            let theme = match action {
                ThemeAction::Show => service.current(),
                ThemeAction::Toggle => service.toggle().await?,
            };
            println!("{}", theme);
        }

        Commands::Config { output } => {
            let config = folio::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Content service over the configured store
fn connect(config: &Config) -> anyhow::Result<ContentService> {
    config
        .validate()
        .context("Set FOLIO_STORE_URL and FOLIO_STORE_KEY, or add a [store] section")?;
    let gateway = RestGateway::new(&config.store)?;
    Ok(ContentService::new(Arc::new(gateway)))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        EMPTY_VALUE
    } else {
        value
    }
}

fn print_catalog(catalog: &StaticCatalog, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        let subjects: Vec<serde_json::Value> = catalog
            .subjects()
            .iter()
            .map(|s| {
                serde_json::json!({
                    "subject": s.subject,
                    "courses": s.courses.iter().map(|c| serde_json::json!({
                        "course": c.course,
                        "tools": c.tools,
                        "assignments": c.assignments,
                    })).collect::<Vec<_>>(),
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "subjects": subjects,
            "activities": catalog.activities(),
        }));
    }

    for subject in catalog.subjects() {
        println!("{} {} [{}]", subject.subject.glyph(), subject.subject.name, subject.subject.id);
        for course in &subject.courses {
            println!("  {} [{}]", course.course.name, course.course.id);
            if !course.tools.is_empty() {
                println!("    Tools: {}", course.tools.join(", "));
            }
            for assignment in &course.assignments {
                println!("    - {}", assignment.title);
            }
        }
        println!();
    }

    println!("Activities:");
    for activity in catalog.activities() {
        println!("  [{}] {}", activity.id, activity.title);
    }
    Ok(())
}
