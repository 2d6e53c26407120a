//! Service layer for portfolio business logic.
//!
//! Services operate on in-memory documents and are driven by the HTTP
//! handlers through the repository's read-modify-write helpers.

pub mod projects;

pub use projects::{
    create_project, delete_project, resolve_links, update_project, NewProject, ProjectError,
    ProjectUpdate, DEFAULT_CATEGORY, PLACEHOLDER_THUMBNAIL,
};
