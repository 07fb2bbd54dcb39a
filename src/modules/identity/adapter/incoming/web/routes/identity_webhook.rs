use crate::modules::identity::adapter::incoming::web::webhook_config::IdentityWebhookConfig;
use crate::modules::identity::application::use_cases::ingest_identity_result::{
    IdentityOutcome, IdentityResult, IngestIdentityError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{web, HttpRequest, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

#[derive(Debug, Deserialize, ToSchema)]
pub struct IdentityWebhookRequest {
    pub user_id: Uuid,
    #[schema(value_type = String)]
    pub outcome: IdentityOutcome,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IdentityWebhookResponse {
    pub received: bool,
    pub identity_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_approval: Option<AutoApprovalSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AutoApprovalSummary {
    pub approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Ingest a verification outcome from the identity provider.
#[utoipa::path(
    post,
    path = "/api/identity/webhook",
    request_body = IdentityWebhookRequest,
    responses(
        (status = 200, description = "Outcome recorded"),
        (status = 401, description = "Missing or wrong webhook secret"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Storage failure"),
    ),
    tag = "webhooks"
)]
#[actix_web::post("/api/identity/webhook")]
pub async fn identity_webhook_handler(
    req: HttpRequest,
    body: web::Json<IdentityWebhookRequest>,
    config: web::Data<IdentityWebhookConfig>,
    data: web::Data<AppState>,
) -> impl Responder {
    let presented = req
        .headers()
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|v| v.to_str().ok());

    if presented != Some(config.secret.as_str()) {
        return ApiResponse::unauthorized("UNAUTHORIZED", "Invalid webhook secret");
    }

    let use_case = &data.ingest_identity_use_case;

    match use_case
        .execute(IdentityResult {
            user_id: body.user_id,
            outcome: body.outcome,
        })
        .await
    {
        Ok(outcome) => ApiResponse::success(IdentityWebhookResponse {
            received: true,
            identity_status: outcome.identity_status.as_str().to_string(),
            auto_approval: outcome.auto_approval.map(|decision| AutoApprovalSummary {
                approved: decision.approved,
                reason: decision.reason.map(|r| r.as_str().to_string()),
            }),
        }),
        Err(IngestIdentityError::UserNotFound) => {
            ApiResponse::not_found("NOT_FOUND", "User not found")
        }
        Err(IngestIdentityError::DatabaseError) => ApiResponse::internal_error(),
    }
}
