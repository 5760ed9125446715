//! Session authentication extractor

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::session::{Session, SessionToken};

/// Extractor that requires a live session.
///
/// Reads the session token from the `Authorization: Bearer <token>` header
/// and rejects the request with 401 when it is missing, unknown, or
/// expired. Protected handlers take this as an argument instead of being
/// wrapped in guard middleware, so the check is explicit at each call site.
#[derive(Debug, Clone)]
pub struct RequireSession(pub Session);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers);

        let session = state
            .sessions
            .require_authenticated(token.as_ref())
            .await?;

        Ok(RequireSession(session))
    }
}

/// Extract the session token from the Authorization header, if present
pub fn bearer_token(headers: &axum::http::HeaderMap) -> Option<SessionToken> {
    let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(SessionToken::from(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc123".parse().unwrap());

        assert_eq!(bearer_token(&headers), Some(SessionToken::from("abc123")));
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_blank_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer    ".parse().unwrap());

        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_token_is_trimmed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer   token-1   ".parse().unwrap(),
        );

        assert_eq!(bearer_token(&headers), Some(SessionToken::from("token-1")));
    }
}
