//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    handler::Handler,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::IdentityService;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::{RoleRepository, UserRepository};
use crate::interfaces::http::common::AuthStatus;
use crate::interfaces::http::metrics::{http_metrics_middleware, metrics_handler};
use crate::interfaces::http::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::interfaces::http::modules::{auth, health, roles, users, IdentityState};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        // Users
        users::handlers::get_user_profile,
        users::handlers::delete_user,
        users::handlers::list_all,
        // Roles
        roles::handlers::create_role,
        roles::handlers::add_roles,
        roles::handlers::remove_roles,
    ),
    components(
        schemas(
            AuthStatus,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::LoginResponse,
            users::UserProfile,
            users::UserProfileWithRoles,
            health::handlers::HealthResponse,
            health::handlers::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "User registration and JWT login"),
        (name = "Users", description = "User profile retrieval, deletion and listing"),
        (name = "Roles", description = "Role creation and per-user role assignment"),
    ),
    info(
        title = "Identity Service API",
        version = "1.0.0",
        description = "User authentication and role management backend",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    identity: Arc<IdentityService<UserRepository, RoleRepository>>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let identity_state = IdentityState { identity };
    let auth_state = AuthState { jwt_config };

    // Public: register + login
    let public_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .with_state(identity_state.clone());

    // Bearer-protected, with the admin policy layered onto the
    // admin-only handlers ("SuperUser" or "Admin" role claim).
    let admin = || middleware::from_fn(admin_middleware);
    let protected_routes = Router::new()
        .route("/listall", get(users::list_all.layer(admin())))
        .route(
            "/{id}",
            get(users::get_user_profile).delete(users::delete_user.layer(admin())),
        )
        .route("/roles", post(roles::create_role.layer(admin())))
        .route(
            "/roles/{id}/addroles",
            post(roles::add_roles.layer(admin())),
        )
        .route(
            "/roles/{id}/removeroles",
            post(roles::remove_roles.layer(admin())),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(identity_state);

    let authentication_routes = public_routes.merge(protected_routes);

    // Health + metrics
    let health_state = health::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    // CORS configuration for the SPA dev server
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1/authentication", authentication_routes)
        .route(
            "/health",
            get(health::health_check).with_state(health_state),
        )
        .route(
            "/metrics",
            get(metrics_handler).with_state(prometheus_handle),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
