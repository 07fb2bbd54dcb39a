pub mod onboarding_status;
pub mod submit_profile;

pub use onboarding_status::onboarding_status_handler;
pub use submit_profile::{
    submit_profile_handler, SubmitProfileRequest, SubmitProfileResponse, SubmittedProfile,
};
