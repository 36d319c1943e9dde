//! Authentication API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};

use super::dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::application::RegisterInput;
use crate::domain::DomainError;
use crate::interfaces::http::common::{domain_error_response, AuthStatus, ValidatedJson};
use crate::interfaces::http::modules::users::dto::UserProfile;
use crate::interfaces::http::modules::IdentityState;

#[utoipa::path(
    post,
    path = "/api/v1/authentication/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created", body = AuthStatus),
        (status = 400, description = "Validation error", body = AuthStatus),
        (status = 409, description = "Username already taken", body = AuthStatus)
    )
)]
pub async fn register(
    State(state): State<IdentityState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<Json<AuthStatus>, (StatusCode, Json<AuthStatus>)> {
    let input = RegisterInput {
        username: request.username,
        email: request.email,
        password: request.password,
        first_name: request.first_name,
        last_name: request.last_name,
    };

    match state.identity.register(input).await {
        Ok(_) => Ok(Json(AuthStatus::success("User created successfully!"))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/authentication/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<IdentityState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, Response> {
    match state.identity.login(&request.username, &request.password).await {
        Ok(result) => Ok(Json(LoginResponse {
            token: result.token,
            expiration: result.expiration,
            user_profile: UserProfile::from(result.user),
        })),
        // One undifferentiated 401 for bad username and bad password alike.
        Err(DomainError::Unauthorized(_)) => Err(StatusCode::UNAUTHORIZED.into_response()),
        Err(e) => Err(domain_error_response(e).into_response()),
    }
}
