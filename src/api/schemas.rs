use serde::Serialize;
use utoipa::ToSchema;

/// Envelope for successful responses.
#[derive(Serialize, ToSchema)]
pub struct SuccessResponse {
    #[schema(example = true)]
    pub success: bool,
}

/// Envelope for error responses.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    #[schema(example = "Profile not found")]
    pub message: String,
}
