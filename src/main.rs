//!
//! Identity service entry point.
//! Reads configuration from TOML file (~/.config/identity-service/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use identity_service::application::{IdentityService, RegisterInput};
use identity_service::config::AppConfig;
use identity_service::infrastructure::crypto::jwt::JwtConfig;
use identity_service::infrastructure::database::migrator::Migrator;
use identity_service::infrastructure::database::repositories::{RoleRepository, UserRepository};
use identity_service::{create_api_router, default_config_path, init_database, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("IDENTITY_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting identity service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("Prometheus metrics recorder installed");

    // ── Build sub-configs from AppConfig ───────────────────────
    let db_config = DatabaseConfig {
        url: std::env::var("DATABASE_URL").unwrap_or_else(|_| app_cfg.database.url.clone()),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        issuer: app_cfg.security.jwt_issuer.clone(),
        audience: app_cfg.security.jwt_audience.clone(),
    };

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Identity service over the SeaORM repositories ──────────
    let users = Arc::new(UserRepository::new(db.clone()));
    let roles = Arc::new(RoleRepository::new(db.clone()));
    let identity = Arc::new(IdentityService::new(users, roles, jwt_config.clone()));

    // Seed admin account and built-in roles if the store is empty
    seed_default_admin(&db, &identity, &app_cfg).await;

    // ── REST API server ────────────────────────────────────────
    let router = create_api_router(identity, db.clone(), jwt_config, prometheus_handle);

    let addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    // Perform final cleanup
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Identity service shutdown complete");
    Ok(())
}

/// Create the default admin user and built-in roles if no users exist
async fn seed_default_admin(
    db: &sea_orm::DatabaseConnection,
    identity: &IdentityService<UserRepository, RoleRepository>,
    app_cfg: &AppConfig,
) {
    use identity_service::infrastructure::database::entities::user;
    use sea_orm::{EntityTrait, PaginatorTrait};

    let users_count = user::Entity::find().count(db).await.unwrap_or(0);
    if users_count > 0 {
        return;
    }

    info!("Creating default admin user...");

    for role in ["SuperUser", "Admin"] {
        if let Err(e) = identity.create_role(role).await {
            error!("Failed to create built-in role {}: {}", role, e);
            return;
        }
    }

    let admin = match identity
        .register(RegisterInput {
            username: app_cfg.admin.username.clone(),
            email: app_cfg.admin.email.clone(),
            password: app_cfg.admin.password.clone(),
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
        })
        .await
    {
        Ok(user) => user,
        Err(e) => {
            error!("Failed to create admin user: {}", e);
            return;
        }
    };

    match identity
        .add_roles(&admin.id, &["SuperUser".to_string(), "Admin".to_string()])
        .await
    {
        Ok(_) => {
            info!("Default admin created: {}", app_cfg.admin.email);
            info!("Please change the admin password immediately!");
        }
        Err(e) => {
            error!("Failed to assign admin roles: {}", e);
        }
    }
}
