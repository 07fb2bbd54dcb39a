//! Seeding and cleanup routes for end-to-end test environments. Compiled
//! only with the `test-helpers` feature; `start()` refuses to boot with it
//! in production.

use actix_web::{web, HttpResponse, Result};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::onboarding::adapter::outgoing::sea_orm_entity::{profiles, users};
use crate::AppState;

#[derive(Deserialize)]
pub struct SeedUserRequest {
    pub identity_status: Option<String>,
}

#[derive(Serialize)]
pub struct SeedUserResponse {
    user_id: Uuid,
}

#[derive(Deserialize)]
pub struct SeedProfileRequest {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub onboarding_stage: Option<String>,
    pub auto_moderation: Option<String>,
    pub admin_status: Option<String>,
    pub publication_status: Option<String>,
}

#[derive(Serialize)]
pub struct SeedProfileResponse {
    profile_id: Uuid,
}

#[derive(Serialize)]
pub struct CleanupResponse {
    deleted_profiles: u64,
    deleted_users: u64,
}

/// Create a user row
/// POST /test/seed/user
pub async fn seed_user(
    body: web::Json<SeedUserRequest>,
    db: web::Data<Arc<DatabaseConnection>>,
) -> Result<HttpResponse> {
    let user_id = Uuid::new_v4();

    let user = users::ActiveModel {
        id: Set(user_id),
        identity_status: Set(body
            .identity_status
            .clone()
            .unwrap_or_else(|| "pending".to_string())),
        role: Set("user".to_string()),
        created_at: NotSet,
        updated_at: NotSet,
    };

    user.insert(&**db)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(SeedUserResponse { user_id }))
}

/// Create a profile row in a chosen gate state
/// POST /test/seed/profile
pub async fn seed_profile(
    body: web::Json<SeedProfileRequest>,
    db: web::Data<Arc<DatabaseConnection>>,
) -> Result<HttpResponse> {
    let profile_id = Uuid::new_v4();

    let profile = profiles::ActiveModel {
        id: Set(profile_id),
        user_id: Set(body.user_id),
        onboarding_stage: Set(body
            .onboarding_stage
            .clone()
            .unwrap_or_else(|| "waiting_admin".to_string())),
        auto_moderation: Set(body
            .auto_moderation
            .clone()
            .unwrap_or_else(|| "auto_passed".to_string())),
        admin_status: Set(body
            .admin_status
            .clone()
            .unwrap_or_else(|| "pending_admin".to_string())),
        publication_status: Set(body
            .publication_status
            .clone()
            .unwrap_or_else(|| "private".to_string())),
        display_name: Set(body.display_name.clone()),
        city_slug: Set(Some("austin".to_string())),
        phone_public_e164: Set(Some("+15125550100".to_string())),
        incall_enabled: Set(true),
        outcall_enabled: Set(false),
        admin_notes: Set(None),
        submitted_at: NotSet,
        approved_at: NotSet,
        created_at: NotSet,
        updated_at: NotSet,
    };

    profile
        .insert(&**db)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(SeedProfileResponse { profile_id }))
}

/// Run the auto-approval evaluator directly
/// POST /test/auto-approve/{profile_id}
pub async fn run_auto_approve(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    let decision = data.auto_approve_use_case.execute(path.into_inner()).await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "approved": decision.approved,
        "reason": decision.reason.map(|r| r.as_str()),
    })))
}

/// Wipe seeded data (profiles cascade from users)
/// POST /test/cleanup
pub async fn cleanup(db: web::Data<Arc<DatabaseConnection>>) -> Result<HttpResponse> {
    let deleted_profiles = profiles::Entity::delete_many()
        .exec(&**db)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?
        .rows_affected;

    let deleted_users = users::Entity::delete_many()
        .exec(&**db)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?
        .rows_affected;

    Ok(HttpResponse::Ok().json(CleanupResponse {
        deleted_profiles,
        deleted_users,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/test/seed/user", web::post().to(seed_user));
    cfg.route("/test/seed/profile", web::post().to(seed_profile));
    cfg.route("/test/auto-approve/{profile_id}", web::post().to(run_auto_approve));
    cfg.route("/test/cleanup", web::post().to(cleanup));
}
