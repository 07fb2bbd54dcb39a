pub mod auto_approve;
pub mod onboarding_status;
pub mod submit_profile;
