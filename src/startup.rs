//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    GlobalService, GlobalServiceImpl, Repositories, Services,
};
use crate::config::Settings;
use crate::domain::GlobalId;
use crate::infrastructure::database;
use crate::infrastructure::gateways::LoggingEmailGateway;
use crate::infrastructure::repositories::{
    PgAccessTokenRepository, PgCommunityMembershipRepository, PgCommunityRepository,
    PgEmailRepository, PgGlobalRepository, PgPostRepository, PgSessionRepository,
    PgUserRepository,
};
use crate::presentation::http::handlers::health::{self, ReadinessCheck};
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub settings: Arc<Settings>,
    pub health: Arc<dyn ReadinessCheck>,
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

/// PostgreSQL implementations of every repository, sharing one pool.
pub fn pg_repositories(pool: &PgPool) -> Repositories {
    Repositories {
        globals: Arc::new(PgGlobalRepository::new(pool.clone())),
        users: Arc::new(PgUserRepository::new(pool.clone())),
        emails: Arc::new(PgEmailRepository::new(pool.clone())),
        sessions: Arc::new(PgSessionRepository::new(pool.clone())),
        access_tokens: Arc::new(PgAccessTokenRepository::new(pool.clone())),
        communities: Arc::new(PgCommunityRepository::new(pool.clone())),
        community_memberships: Arc::new(PgCommunityMembershipRepository::new(pool.clone())),
        posts: Arc::new(PgPostRepository::new(pool.clone())),
    }
}

/// Build the full router with tracing and CORS layers
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);
    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors)
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        // Create database pool
        let db = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db).await?;
            tracing::info!("Database migrations applied");
        }

        let repos = pg_repositories(&db);

        // Load (or seed) the process-wide globals row
        let global_id: GlobalId = settings.globals.id.parse()?;
        let global = GlobalServiceImpl::new(repos.globals.clone())
            .load_or_create(global_id, settings.globals.values())
            .await?;
        tracing::info!(global_id = %global.id, site_name = %global.values.site_name, "Globals loaded");

        // Create snowflake generator
        let id_generator = Arc::new(SnowflakeGenerator::new(
            settings.snowflake.machine_id,
            settings.snowflake.epoch,
        ));

        let services = Services::new(
            repos,
            Arc::new(LoggingEmailGateway),
            id_generator,
            Arc::new(global.values),
            settings.auth.token_length,
        );

        // Create app state
        let state = AppState {
            services,
            settings: Arc::new(settings.clone()),
            health: Arc::new(db),
        };

        let router = build_router(state);

        // Bind to address
        let addr: SocketAddr = settings.server_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        let service = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(self.listener, service)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
