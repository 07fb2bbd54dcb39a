use crate::modules::onboarding::application::use_cases::submit_profile::SubmitProfileError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{http::StatusCode, web, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitProfileRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitProfileResponse {
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub next_stage: String,
    pub estimated_review_time: String,
    pub profile: SubmittedProfile,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmittedProfile {
    pub id: Uuid,
    pub admin_status: String,
    pub onboarding_stage: String,
}

/// Submit a profile for admin review.
#[utoipa::path(
    post,
    path = "/api/onboarding/profile/submit",
    request_body = SubmitProfileRequest,
    responses(
        (status = 200, description = "Profile queued for admin review"),
        (status = 400, description = "Already under review or incomplete"),
        (status = 404, description = "User or profile not found"),
        (status = 500, description = "Storage failure"),
    ),
    tag = "onboarding"
)]
#[actix_web::post("/api/onboarding/profile/submit")]
pub async fn submit_profile_handler(
    body: web::Json<SubmitProfileRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let use_case = &data.submit_profile_use_case;

    match use_case.execute(body.user_id).await {
        Ok(output) => ApiResponse::success(SubmitProfileResponse {
            submitted_at: output.submitted_at,
            next_stage: output.next_stage.as_str().to_string(),
            estimated_review_time: "24-48 hours".to_string(),
            profile: SubmittedProfile {
                id: output.profile_id,
                admin_status: output.admin_status.as_str().to_string(),
                onboarding_stage: output.next_stage.as_str().to_string(),
            },
        }),
        Err(SubmitProfileError::UserNotFound) => {
            ApiResponse::not_found("NOT_FOUND", "User not found")
        }
        Err(SubmitProfileError::ProfileNotFound) => {
            ApiResponse::not_found("NOT_FOUND", "Profile not found")
        }
        Err(SubmitProfileError::AlreadySubmitted) => {
            ApiResponse::bad_request("ALREADY_SUBMITTED", "Profile is already under review")
        }
        Err(SubmitProfileError::ProfileIncomplete(missing)) => ApiResponse::error_with_details(
            StatusCode::BAD_REQUEST,
            "PROFILE_INCOMPLETE",
            "Profile does not meet submission requirements",
            serde_json::json!({ "missing": missing }),
        ),
        Err(SubmitProfileError::DatabaseError) => ApiResponse::internal_error(),
    }
}
