//! Shared-secret authentication for admin routes.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;
use tracing::warn;

use super::error::ApiError;
use super::AppState;

/// Reject requests without `Authorization: Bearer <admin password>`.
///
/// With no admin password configured every admin request is rejected.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.admin_password.as_deref() else {
        warn!(
            "Admin request to {} rejected: no admin password configured",
            request.uri().path()
        );
        return Err(ApiError::Unauthorized);
    };

    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match provided {
        Some(token) if secrets_match(token, expected) => {
            Ok(next.run(request).await)
        }
        _ => {
            warn!("Unauthorized admin request to {}", request.uri().path());
            Err(ApiError::Unauthorized)
        }
    }
}

fn secrets_match(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_match() {
        assert!(secrets_match("secret", "secret"));
        assert!(!secrets_match("secret", "secreT"));
        assert!(!secrets_match("secret", "secret2"));
        assert!(!secrets_match("", "secret"));
    }
}
