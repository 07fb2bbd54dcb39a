use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::identity::adapter::incoming::web::routes::{
    AutoApprovalSummary, IdentityWebhookRequest, IdentityWebhookResponse,
};
use crate::moderation::adapter::incoming::web::routes::{
    ModerationApprovalSummary, ModerationWebhookRequest, ModerationWebhookResponse,
};
use crate::onboarding::adapter::incoming::web::routes::{
    SubmitProfileRequest, SubmitProfileResponse, SubmittedProfile,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MasseurMatch Onboarding API",
        version = "1.0.0",
        description = "Profile onboarding, auto-approval and webhook ingestion",
        contact(
            name = "API Support",
            email = "dev@masseurmatch.com"
        )
    ),
    paths(
        crate::modules::onboarding::adapter::incoming::web::routes::onboarding_status::onboarding_status_handler,
        crate::modules::onboarding::adapter::incoming::web::routes::submit_profile::submit_profile_handler,
        crate::modules::identity::adapter::incoming::web::routes::identity_webhook::identity_webhook_handler,
        crate::modules::moderation::adapter::incoming::web::routes::moderation_webhook::moderation_webhook_handler,
    ),
    components(
        schemas(
            SuccessResponse,
            ErrorResponse,
            ErrorDetail,
            SubmitProfileRequest,
            SubmitProfileResponse,
            SubmittedProfile,
            IdentityWebhookRequest,
            IdentityWebhookResponse,
            AutoApprovalSummary,
            ModerationWebhookRequest,
            ModerationWebhookResponse,
            ModerationApprovalSummary,
        )
    ),
    modifiers(&WebhookSecurity),
    tags(
        (name = "onboarding", description = "Profile onboarding flow"),
        (name = "webhooks", description = "Provider callback ingestion"),
    )
)]
pub struct ApiDoc;

/// Webhook routes authenticate with a shared secret header.
pub struct WebhookSecurity;

impl Modify for WebhookSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "webhook_secret",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-webhook-secret"))),
            );
        }
    }
}
