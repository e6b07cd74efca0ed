use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{ApiError, AppState};

/// Proof that the request carries the admin bearer token. Add it as a handler
/// argument to restrict the route to the admin dashboard.
#[derive(Debug)]
pub struct AdminSession;

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(abi::Error::Unauthorized)?;

        if state.admin_token.is_empty() || !same_token(token, &state.admin_token) {
            return Err(abi::Error::Forbidden.into());
        }
        Ok(AdminSession)
    }
}

// compares every byte so the time taken does not leak the matching prefix
fn same_token(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}
