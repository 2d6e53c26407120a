//! Repository layer for site content persistence.
//!
//! Site data lives in two JSON documents in the blob store. Reads degrade to
//! the default document on any failure; writes go through a read-modify-write
//! cycle serialized per document within this process.

mod content;

pub use content::{ContentRepository, RepositoryError, PROJECTS_KEY, SITE_CONTENT_KEY};
