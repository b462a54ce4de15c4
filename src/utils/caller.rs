// src/utils/caller.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the user making the request.
///
/// Extracted from the `X-User-Id` header and handed to the services explicitly;
/// nothing below the handlers reads identity from ambient state. The header is
/// trusted as-is: authenticating it is the job of whatever sits in front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::ValidationError("Missing X-User-Id header".to_string()))?;

        Ok(Caller {
            user_id: user_id.to_string(),
        })
    }
}
