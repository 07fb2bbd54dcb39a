use crate::modules::onboarding::application::use_cases::onboarding_status::OnboardingStatusError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{web, Responder};
use uuid::Uuid;

/// Current onboarding status, requirements, and next steps for a user.
#[utoipa::path(
    get,
    path = "/api/onboarding/status/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Owner of the profile"),
    ),
    responses(
        (status = 200, description = "Current stage, blockers and progress"),
        (status = 404, description = "User or profile not found"),
        (status = 500, description = "Storage failure"),
    ),
    tag = "onboarding"
)]
#[actix_web::get("/api/onboarding/status/{user_id}")]
pub async fn onboarding_status_handler(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();
    let use_case = &data.onboarding_status_use_case;

    match use_case.execute(user_id).await {
        Ok(status) => ApiResponse::success(status),
        Err(OnboardingStatusError::UserNotFound) => {
            ApiResponse::not_found("NOT_FOUND", "User not found")
        }
        Err(OnboardingStatusError::ProfileNotFound) => {
            ApiResponse::not_found("NOT_FOUND", "Profile not found")
        }
        Err(OnboardingStatusError::DatabaseError) => ApiResponse::internal_error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::onboarding::application::domain::entities::{
        AdminStatus, AutoModeration, IdentityStatus, OnboardingStage, Profile, PublicationStatus,
        RelationCounts, User, UserRole,
    };
    use crate::modules::onboarding::application::domain::state_machine::{
        onboarding_progress, stage_message,
    };
    use crate::modules::onboarding::application::use_cases::onboarding_status::{
        IOnboardingStatusUseCase, OnboardingStatus,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct MockStatusSuccess;

    #[async_trait]
    impl IOnboardingStatusUseCase for MockStatusSuccess {
        async fn execute(&self, user_id: Uuid) -> Result<OnboardingStatus, OnboardingStatusError> {
            let now = chrono::Utc::now();
            let stage = OnboardingStage::UploadPhotos;
            Ok(OnboardingStatus {
                stage,
                progress: onboarding_progress(stage, false).percent_complete,
                progress_details: onboarding_progress(stage, false),
                next_action: stage_message(stage).to_string(),
                blockers: vec!["At least one approved photo required".to_string()],
                can_submit: false,
                counts: RelationCounts::default(),
                profile: Profile {
                    id: Uuid::new_v4(),
                    user_id,
                    onboarding_stage: stage,
                    auto_moderation: AutoModeration::AutoPassed,
                    admin_status: AdminStatus::ChangesRequested,
                    publication_status: PublicationStatus::Private,
                    display_name: Some("Alex Santos".to_string()),
                    city_slug: Some("austin".to_string()),
                    phone_public_e164: Some("+15125550100".to_string()),
                    incall_enabled: true,
                    outcall_enabled: false,
                    admin_notes: None,
                    submitted_at: None,
                    approved_at: None,
                    created_at: now,
                    updated_at: now,
                },
                user: User {
                    id: user_id,
                    identity_status: IdentityStatus::Verified,
                    role: UserRole::User,
                },
                subscription: None,
            })
        }
    }

    struct MockStatusNotFound;

    #[async_trait]
    impl IOnboardingStatusUseCase for MockStatusNotFound {
        async fn execute(
            &self,
            _user_id: Uuid,
        ) -> Result<OnboardingStatus, OnboardingStatusError> {
            Err(OnboardingStatusError::ProfileNotFound)
        }
    }

    #[actix_web::test]
    async fn test_status_success_payload() {
        let app_state = TestAppStateBuilder::default()
            .with_onboarding_status(MockStatusSuccess)
            .build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(onboarding_status_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/onboarding/status/{}", Uuid::new_v4()))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["stage"], "upload_photos");
        assert_eq!(body["data"]["can_submit"], false);
        assert_eq!(
            body["data"]["blockers"][0],
            "At least one approved photo required"
        );
        assert_eq!(body["data"]["profile"]["publication_status"], "private");
    }

    #[actix_web::test]
    async fn test_status_profile_not_found() {
        let app_state = TestAppStateBuilder::default()
            .with_onboarding_status(MockStatusNotFound)
            .build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(onboarding_status_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/onboarding/status/{}", Uuid::new_v4()))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Profile not found");
    }

    #[actix_web::test]
    async fn test_status_invalid_user_id_is_rejected_by_router() {
        let app_state = TestAppStateBuilder::default()
            .with_onboarding_status(MockStatusSuccess)
            .build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(onboarding_status_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/onboarding/status/not-a-uuid")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
