//! Editable site copy.
//!
//! Section types name the fields the server reads. Any other key an editor
//! sends lands in `extra` and is written back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Availability pill shown over the reel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_badge: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    /// Free-form; editors send either `"8+"` or a plain number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<Value>,
    /// URL of the uploaded portrait.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One offered service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `site-content.json` document. Every section is optional; the front end
/// falls back to its built-in copy for anything missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<AboutSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<ServiceItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<SocialLinks>,
}

/// Error replacing a section.
#[derive(Error, Debug)]
pub enum SectionError {
    #[error("Unknown section: {0}")]
    UnknownSection(String),
    #[error("Invalid data for section {section}: {source}")]
    InvalidData {
        section: &'static str,
        source: serde_json::Error,
    },
}

impl SiteContent {
    pub const SECTIONS: [&'static str; 6] =
        ["hero", "about", "services", "clients", "contact", "social"];

    /// Replace one section wholesale with new JSON data.
    pub fn set_section(&mut self, section: &str, data: Value) -> Result<(), SectionError> {
        fn parse<T: serde::de::DeserializeOwned>(
            section: &'static str,
            data: Value,
        ) -> Result<Option<T>, SectionError> {
            serde_json::from_value(data)
                .map(Some)
                .map_err(|source| SectionError::InvalidData { section, source })
        }

        match section {
            "hero" => self.hero = parse("hero", data)?,
            "about" => self.about = parse("about", data)?,
            "services" => self.services = parse("services", data)?,
            "clients" => self.clients = parse("clients", data)?,
            "contact" => self.contact = parse("contact", data)?,
            "social" => self.social = parse("social", data)?,
            other => return Err(SectionError::UnknownSection(other.to_string())),
        }
        Ok(())
    }
}
