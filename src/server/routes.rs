//! Router configuration for the web server.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::auth;
use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Admin routes (require the shared secret)
    let admin = Router::new()
        .route(
            "/api/admin/projects",
            get(handlers::admin_list_projects)
                .post(handlers::create_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route(
            "/api/admin/upload",
            post(handlers::upload_asset)
                .layer(DefaultBodyLimit::max(handlers::MAX_UPLOAD_BYTES)),
        )
        .route("/api/site-content", put(handlers::update_site_content))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/projects", get(handlers::list_projects))
        .route("/api/site-content", get(handlers::get_site_content))
        .route("/api/brief", post(handlers::generate_brief))
        .route("/api/resolve", get(handlers::resolve_link))
        .route("/blobs/*key", get(handlers::serve_blob))
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
