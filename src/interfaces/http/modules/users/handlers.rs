//! User profile API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::UserProfileWithRoles;
use crate::interfaces::http::common::{domain_error_response, AuthStatus};
use crate::interfaces::http::modules::IdentityState;

#[utoipa::path(
    get,
    path = "/api/v1/authentication/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile with roles", body = UserProfileWithRoles),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found", body = AuthStatus)
    )
)]
pub async fn get_user_profile(
    State(state): State<IdentityState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfileWithRoles>, (StatusCode, Json<AuthStatus>)> {
    match state.identity.get_profile(&id).await {
        Ok(profile) => Ok(Json(UserProfileWithRoles::from(profile))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/authentication/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = AuthStatus),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found", body = AuthStatus)
    )
)]
pub async fn delete_user(
    State(state): State<IdentityState>,
    Path(id): Path<String>,
) -> Result<Json<AuthStatus>, (StatusCode, Json<AuthStatus>)> {
    match state.identity.delete_user(&id).await {
        Ok(()) => Ok(Json(AuthStatus::success("User deleted successfully!"))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/authentication/listall",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users with their roles", body = [UserProfileWithRoles]),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_all(
    State(state): State<IdentityState>,
) -> Result<Json<Vec<UserProfileWithRoles>>, (StatusCode, Json<AuthStatus>)> {
    match state.identity.list_all().await {
        Ok(users) => Ok(Json(
            users.into_iter().map(UserProfileWithRoles::from).collect(),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}
