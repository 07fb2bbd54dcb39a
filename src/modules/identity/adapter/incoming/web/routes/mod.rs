pub mod identity_webhook;

pub use identity_webhook::{
    identity_webhook_handler, AutoApprovalSummary, IdentityWebhookRequest,
    IdentityWebhookResponse,
};
