//! Portfolio project models.

use serde::{Deserialize, Serialize};

use crate::video::VideoSource;

/// Which gallery a project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectKind {
    LongForm,
    ShortForm,
}

impl ProjectKind {
    pub const ALL: [ProjectKind; 2] = [ProjectKind::LongForm, ProjectKind::ShortForm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LongForm => "longForm",
            Self::ShortForm => "shortForm",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "longForm" => Some(Self::LongForm),
            "shortForm" => Some(Self::ShortForm),
            _ => None,
        }
    }

    /// Prefix used for generated project IDs.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::LongForm => "lf",
            Self::ShortForm => "sf",
        }
    }
}

/// A project shown in the portfolio gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default)]
    pub video_source: Option<VideoSource>,
    /// Legacy Drive-only ID kept for records written before YouTube support.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_video_id: Option<String>,
}

impl Project {
    /// The stored video ID, falling back to the legacy Drive field.
    pub fn current_video_id(&self) -> Option<&str> {
        self.video_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.drive_video_id.as_deref().filter(|id| !id.is_empty()))
    }
}

/// The `projects.json` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsData {
    #[serde(default)]
    pub long_form: Vec<Project>,
    #[serde(default)]
    pub short_form: Vec<Project>,
}

impl ProjectsData {
    pub fn list(&self, kind: ProjectKind) -> &[Project] {
        match kind {
            ProjectKind::LongForm => &self.long_form,
            ProjectKind::ShortForm => &self.short_form,
        }
    }

    pub fn list_mut(&mut self, kind: ProjectKind) -> &mut Vec<Project> {
        match kind {
            ProjectKind::LongForm => &mut self.long_form,
            ProjectKind::ShortForm => &mut self.short_form,
        }
    }

    /// Iterate over all projects, long form first.
    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.long_form.iter().chain(self.short_form.iter())
    }

    pub fn len(&self) -> usize {
        self.long_form.len() + self.short_form.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.iter().any(|p| p.id == id)
    }

    /// Find a project by ID in either list.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Project> {
        let Self {
            long_form,
            short_form,
        } = self;
        long_form
            .iter_mut()
            .chain(short_form.iter_mut())
            .find(|p| p.id == id)
    }

    /// Remove a project by ID from whichever list holds it.
    pub fn remove(&mut self, id: &str) -> Option<(ProjectKind, Project)> {
        for kind in ProjectKind::ALL {
            let list = self.list_mut(kind);
            if let Some(index) = list.iter().position(|p| p.id == id) {
                return Some((kind, list.remove(index)));
            }
        }
        None
    }
}
