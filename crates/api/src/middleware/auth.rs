//! Caller authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use seoflow_core::api_keys::{hash_api_key, looks_like_api_key};
use seoflow_core::error::CoreError;
use seoflow_core::types::DbId;
use seoflow_db::repositories::ApiKeyRepo;

use crate::auth::jwt::validate_token;
use crate::auth::SESSION_COOKIE;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller.
///
/// Accepted credentials, in order:
///
/// 1. `Authorization: Bearer <api key>` -- a 48-character key, looked up by hash.
/// 2. `Authorization: Bearer <access token>` -- an HS256 JWT.
/// 3. `Cookie: session=<access token>`.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The API key used, when the caller authenticated with one.
    pub api_key_id: Option<DbId>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(header) = parts.headers.get(AUTHORIZATION) {
            let token = header
                .to_str()
                .ok()
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::trim)
                .ok_or_else(|| {
                    unauthorized("Invalid Authorization format. Expected: Bearer <token>")
                })?;

            if looks_like_api_key(token) {
                return authenticate_api_key(state, token).await;
            }
            return authenticate_jwt(state, token);
        }

        match session_token(&parts.headers) {
            Some(token) => authenticate_jwt(state, token),
            None => Err(unauthorized("Missing credentials")),
        }
    }
}

async fn authenticate_api_key(state: &AppState, key: &str) -> Result<AuthUser, AppError> {
    let api_key = ApiKeyRepo::find_active_by_hash(&state.pool, &hash_api_key(key))
        .await?
        .ok_or_else(|| unauthorized("Invalid or revoked API key"))?;

    ApiKeyRepo::touch_last_used(&state.pool, api_key.id).await?;
    tracing::debug!(user_id = api_key.user_id, api_key_id = api_key.id, "API key authenticated");

    Ok(AuthUser {
        user_id: api_key.user_id,
        api_key_id: Some(api_key.id),
    })
}

fn authenticate_jwt(state: &AppState, token: &str) -> Result<AuthUser, AppError> {
    let claims = validate_token(token, &state.config.jwt)
        .map_err(|_| unauthorized("Invalid or expired token"))?;
    Ok(AuthUser {
        user_id: claims.sub,
        api_key_id: None,
    })
}

/// Value of the session cookie, if the request carries one.
fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_cookies(values: &[&'static str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(COOKIE, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn session_cookie_is_found_among_others() {
        let headers = with_cookies(&["theme=dark; session=abc.def.ghi; lang=en"]);
        assert_eq!(session_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn session_cookie_in_second_header() {
        let headers = with_cookies(&["theme=dark", "session=tok"]);
        assert_eq!(session_token(&headers), Some("tok"));
    }

    #[test]
    fn similarly_named_cookies_are_ignored() {
        let headers = with_cookies(&["session_hint=1; xsession=2"]);
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn empty_session_cookie_is_missing() {
        let headers = with_cookies(&["session="]);
        assert_eq!(session_token(&headers), None);
    }
}
