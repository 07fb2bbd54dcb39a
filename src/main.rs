pub mod modules;
pub use modules::identity;
pub use modules::moderation;
pub use modules::onboarding;
pub mod api;
pub mod health;
pub mod shared;

// Test helpers module - only compiled with feature flag
#[cfg(feature = "test-helpers")]
mod test_helpers;

use crate::identity::adapter::incoming::web::webhook_config::IdentityWebhookConfig;
use crate::identity::adapter::outgoing::identity_repository_postgres::IdentityRepositoryPostgres;
use crate::identity::application::use_cases::ingest_identity_result::{
    IIngestIdentityResultUseCase, IngestIdentityResultUseCase,
};
use crate::moderation::adapter::incoming::web::webhook_config::ModerationWebhookConfig;
use crate::moderation::adapter::outgoing::moderation_repository_postgres::ModerationRepositoryPostgres;
use crate::moderation::application::use_cases::ingest_moderation_result::{
    IIngestModerationResultUseCase, IngestModerationResultUseCase,
};
use crate::onboarding::adapter::outgoing::profile_relations_postgres::ProfileRelationsPostgres;
use crate::onboarding::adapter::outgoing::profile_store_postgres::ProfileStorePostgres;
use crate::onboarding::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::onboarding::application::use_cases::{
    auto_approve::{AutoApproveUseCase, IAutoApproveUseCase},
    onboarding_status::{IOnboardingStatusUseCase, OnboardingStatusUseCase},
    submit_profile::{ISubmitProfileUseCase, SubmitProfileUseCase},
};
use crate::shared::api::json_config::custom_json_config;

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub auto_approve_use_case: Arc<dyn IAutoApproveUseCase + Send + Sync>,
    pub submit_profile_use_case: Arc<dyn ISubmitProfileUseCase + Send + Sync>,
    pub onboarding_status_use_case: Arc<dyn IOnboardingStatusUseCase + Send + Sync>,
    pub ingest_identity_use_case: Arc<dyn IIngestIdentityResultUseCase + Send + Sync>,
    pub ingest_moderation_use_case: Arc<dyn IIngestModerationResultUseCase + Send + Sync>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Refuse to ship seeding routes to production
    #[cfg(feature = "test-helpers")]
    {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        if env == "production" {
            panic!("FATAL: test-helpers feature enabled in production environment!");
        }
        tracing::warn!("Test helper routes are ENABLED for environment: {}", env);
    }

    // Environment variable loading
    let env_name = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env_name);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");

    let identity_webhook_config = IdentityWebhookConfig::from_env();
    let moderation_webhook_config = ModerationWebhookConfig::from_env();

    let server_url = format!("{host}:{port}");
    println!("Server run on: {}", server_url);

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");

    let db_arc = Arc::new(conn);

    // Outgoing adapters
    let profile_store = ProfileStorePostgres::new(Arc::clone(&db_arc));
    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));
    let relations = ProfileRelationsPostgres::new(Arc::clone(&db_arc));
    let identity_repo = IdentityRepositoryPostgres::new(Arc::clone(&db_arc));
    let moderation_repo = ModerationRepositoryPostgres::new(Arc::clone(&db_arc));

    // The evaluator is shared: webhook ingestion flows invoke it after
    // recording their outcome
    let auto_approve_use_case: Arc<dyn IAutoApproveUseCase + Send + Sync> = Arc::new(
        AutoApproveUseCase::new(profile_store.clone(), user_query.clone()),
    );

    let submit_profile_use_case = SubmitProfileUseCase::new(
        profile_store.clone(),
        user_query.clone(),
        relations.clone(),
    );
    let onboarding_status_use_case =
        OnboardingStatusUseCase::new(profile_store.clone(), user_query, relations);
    let ingest_identity_use_case = IngestIdentityResultUseCase::new(
        identity_repo,
        profile_store.clone(),
        Arc::clone(&auto_approve_use_case),
    );
    let ingest_moderation_use_case = IngestModerationResultUseCase::new(
        moderation_repo,
        profile_store,
        Arc::clone(&auto_approve_use_case),
    );

    let state = AppState {
        auto_approve_use_case,
        submit_profile_use_case: Arc::new(submit_profile_use_case),
        onboarding_status_use_case: Arc::new(onboarding_status_use_case),
        ingest_identity_use_case: Arc::new(ingest_identity_use_case),
        ingest_moderation_use_case: Arc::new(ingest_moderation_use_case),
    };

    // Clone db_arc for use in HttpServer closure
    let db_for_server = Arc::clone(&db_arc);

    HttpServer::new(move || {
        let mut app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(identity_webhook_config.clone()))
            .app_data(web::Data::new(moderation_webhook_config.clone()))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(custom_json_config())
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", crate::api::openapi::ApiDoc::openapi()),
            );

        // Conditionally add test routes
        #[cfg(feature = "test-helpers")]
        {
            app = app.configure(test_helpers::configure_routes);
        }

        app
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Onboarding
    cfg.service(crate::onboarding::adapter::incoming::web::routes::onboarding_status_handler);
    cfg.service(crate::onboarding::adapter::incoming::web::routes::submit_profile_handler);
    // Webhooks
    cfg.service(crate::identity::adapter::incoming::web::routes::identity_webhook_handler);
    cfg.service(crate::moderation::adapter::incoming::web::routes::moderation_webhook_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
