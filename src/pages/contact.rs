//! Contact page and message submission

use serde::Deserialize;

use crate::content::models::non_blank;
use crate::content::{preferred_links, ContentService, NewContactMessage, Profile, SocialLink};
use crate::gateway::GatewayResult;

const EMAIL_NOT_SET: &str = "Email not set";

#[derive(Debug, Clone, PartialEq)]
pub struct ContactData {
    pub profile: Option<Profile>,
    pub social_links: Vec<SocialLink>,
}

impl ContactData {
    pub fn email(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| non_blank(&p.email))
    }

    pub fn email_label(&self) -> &str {
        self.email().unwrap_or(EMAIL_NOT_SET)
    }

    /// Professional links, or every link when none are professional
    pub fn links(&self) -> Vec<SocialLink> {
        preferred_links(&self.social_links, true)
    }
}

pub async fn load(content: &ContentService) -> GatewayResult<ContactData> {
    let (profile, social_links) = tokio::join!(content.profile(), content.social_links());
    Ok(ContactData {
        profile: profile?,
        social_links: social_links?,
    })
}

/// Submitted form fields, kept verbatim for re-display
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Check required fields and build the record to insert
    pub fn validate(&self) -> Result<NewContactMessage, String> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push("name");
        }
        if email.is_empty() {
            missing.push("email");
        }
        if message.is_empty() {
            missing.push("message");
        }
        if !missing.is_empty() {
            return Err(format!("Please fill in: {}.", missing.join(", ")));
        }
        if !email.contains('@') {
            return Err("Please enter a valid email address.".to_string());
        }

        let subject = self.subject.trim();
        Ok(NewContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            subject: (!subject.is_empty()).then(|| subject.to_string()),
            message: message.to_string(),
        })
    }
}

/// Result of a form submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Sent,
    /// Validation message; nothing was written
    Invalid(String),
    /// Raw gateway message from the insert
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Sent)
    }
}

pub async fn submit(content: &ContentService, form: &ContactForm) -> SubmitOutcome {
    let message = match form.validate() {
        Ok(message) => message,
        Err(reason) => return SubmitOutcome::Invalid(reason),
    };

    match content.insert_contact_message(&message).await {
        Ok(()) => {
            tracing::info!("Contact message stored");
            SubmitOutcome::Sent
        }
        Err(e) => {
            tracing::warn!("Failed to store contact message: {}", e);
            SubmitOutcome::Failed(e.message())
        }
    }
}
