//! Token authentication for protected handlers

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use domain::{Actor, DomainError};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, resolved from `Authorization: Token <key>`
/// (or `Bearer <key>`)
pub struct Caller(pub Actor);

impl FromRequestParts<Arc<AppState>> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(DomainError::Unauthenticated)?;

        let Some(token) = token_from_header(header) else {
            debug!(uri = %parts.uri, "Malformed authorization header");
            return Err(DomainError::Unauthenticated.into());
        };

        let actor = state.auth.authenticate(token).await?;
        Ok(Caller(actor))
    }
}

fn token_from_header(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    (scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer")).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_schemes() {
        assert_eq!(token_from_header("Token abc123"), Some("abc123"));
        assert_eq!(token_from_header("Bearer abc123"), Some("abc123"));
        assert_eq!(token_from_header("bearer  abc123 "), Some("abc123"));
        assert_eq!(token_from_header("Basic abc123"), None);
        assert_eq!(token_from_header("Token"), None);
        assert_eq!(token_from_header("Token "), None);
    }
}
