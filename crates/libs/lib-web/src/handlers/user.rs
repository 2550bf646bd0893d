//! # User Handlers
//!
//! Endpoints behind the `x-auth-token` gate. The caller's identity comes from
//! [`CtxUser`], injected by [`require_auth`](crate::middleware::require_auth).

use axum::{extract::State, Extension, Json};
use lib_core::dto::ProfileResponse;
use lib_core::Result;
use tracing::{debug, instrument};

use crate::middleware::CtxUser;
use crate::services::AuthService;

/// `GET /api/user/profile` - id and email of the authenticated user.
///
/// Answers `404 {"message": "User not found"}` when the token is valid but its
/// account has since been deleted.
#[instrument(skip_all, fields(user_id = ctx.user_id))]
pub async fn get_profile(
    State(auth): State<AuthService>,
    Extension(ctx): Extension<CtxUser>,
) -> Result<Json<ProfileResponse>> {
    debug!("[PROFILE] Loading profile");

    let profile = auth.get_profile(ctx.user_id).await?;

    Ok(Json(profile))
}
