//! HTTP request handlers for the web server.

mod api;
mod blobs;
mod brief;
mod projects;
mod site_content;
mod upload;

// Re-export handlers for use by the router
pub use api::{health, resolve_link};
pub use blobs::serve_blob;
pub use brief::generate_brief;
pub use projects::{
    admin_list_projects, create_project, delete_project, list_projects, update_project,
};
pub use site_content::{get_site_content, update_site_content};
pub use upload::{upload_asset, MAX_UPLOAD_BYTES};
