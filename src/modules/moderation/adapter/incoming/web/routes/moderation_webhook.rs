use crate::modules::moderation::adapter::incoming::web::webhook_config::ModerationWebhookConfig;
use crate::modules::moderation::application::use_cases::ingest_moderation_result::{
    IngestModerationError, ModerationResult,
};
use crate::modules::onboarding::application::domain::entities::AutoModeration;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{web, HttpRequest, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

#[derive(Debug, Deserialize, ToSchema)]
pub struct ModerationWebhookRequest {
    pub profile_id: Uuid,
    #[schema(value_type = String)]
    pub verdict: AutoModeration,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModerationWebhookResponse {
    pub received: bool,
    pub verdict: String,
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_approval: Option<ModerationApprovalSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModerationApprovalSummary {
    pub approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Ingest an automated content-screening verdict.
#[utoipa::path(
    post,
    path = "/api/moderation/webhook",
    request_body = ModerationWebhookRequest,
    responses(
        (status = 200, description = "Verdict recorded"),
        (status = 401, description = "Missing or wrong webhook secret"),
        (status = 404, description = "Profile not found"),
        (status = 500, description = "Storage failure"),
    ),
    tag = "webhooks"
)]
#[actix_web::post("/api/moderation/webhook")]
pub async fn moderation_webhook_handler(
    req: HttpRequest,
    body: web::Json<ModerationWebhookRequest>,
    config: web::Data<ModerationWebhookConfig>,
    data: web::Data<AppState>,
) -> impl Responder {
    let presented = req
        .headers()
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|v| v.to_str().ok());

    if presented != Some(config.secret.as_str()) {
        return ApiResponse::unauthorized("UNAUTHORIZED", "Invalid webhook secret");
    }

    let use_case = &data.ingest_moderation_use_case;

    match use_case
        .execute(ModerationResult {
            profile_id: body.profile_id,
            verdict: body.verdict,
        })
        .await
    {
        Ok(outcome) => ApiResponse::success(ModerationWebhookResponse {
            received: true,
            verdict: outcome.verdict.as_str().to_string(),
            stage: outcome.stage.as_str().to_string(),
            auto_approval: outcome
                .auto_approval
                .map(|decision| ModerationApprovalSummary {
                    approved: decision.approved,
                    reason: decision.reason.map(|r| r.as_str().to_string()),
                }),
        }),
        Err(IngestModerationError::ProfileNotFound) => {
            ApiResponse::not_found("NOT_FOUND", "Profile not found")
        }
        Err(IngestModerationError::DatabaseError) => ApiResponse::internal_error(),
    }
}
