//! Role management API handlers
//!
//! Admin-only endpoints: role creation and per-user role assignment.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::CreateRoleParams;
use crate::interfaces::http::common::{domain_error_response, AuthStatus};
use crate::interfaces::http::modules::users::dto::UserProfileWithRoles;
use crate::interfaces::http::modules::IdentityState;

#[utoipa::path(
    post,
    path = "/api/v1/authentication/roles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(CreateRoleParams),
    responses(
        (status = 200, description = "Role created", body = AuthStatus),
        (status = 400, description = "Blank role name", body = AuthStatus),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Role already exists", body = AuthStatus)
    )
)]
pub async fn create_role(
    State(state): State<IdentityState>,
    Query(params): Query<CreateRoleParams>,
) -> Result<Json<AuthStatus>, (StatusCode, Json<AuthStatus>)> {
    match state.identity.create_role(&params.role_name).await {
        Ok(role) => Ok(Json(AuthStatus::success(format!(
            "Role '{}' created successfully!",
            role.name
        )))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/authentication/roles/{id}/addroles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = Vec<String>,
    responses(
        (status = 200, description = "Updated profile with refreshed roles", body = UserProfileWithRoles),
        (status = 400, description = "Unknown role name", body = AuthStatus),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found", body = AuthStatus)
    )
)]
pub async fn add_roles(
    State(state): State<IdentityState>,
    Path(id): Path<String>,
    Json(role_names): Json<Vec<String>>,
) -> Result<Json<UserProfileWithRoles>, (StatusCode, Json<AuthStatus>)> {
    match state.identity.add_roles(&id, &role_names).await {
        Ok(profile) => Ok(Json(UserProfileWithRoles::from(profile))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/authentication/roles/{id}/removeroles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = Vec<String>,
    responses(
        (status = 200, description = "Updated profile with refreshed roles", body = UserProfileWithRoles),
        (status = 400, description = "Unknown role name", body = AuthStatus),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found", body = AuthStatus)
    )
)]
pub async fn remove_roles(
    State(state): State<IdentityState>,
    Path(id): Path<String>,
    Json(role_names): Json<Vec<String>>,
) -> Result<Json<UserProfileWithRoles>, (StatusCode, Json<AuthStatus>)> {
    match state.identity.remove_roles(&id, &role_names).await {
        Ok(profile) => Ok(Json(UserProfileWithRoles::from(profile))),
        Err(e) => Err(domain_error_response(e)),
    }
}
