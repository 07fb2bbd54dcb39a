pub mod moderation_webhook;

pub use moderation_webhook::{
    moderation_webhook_handler, ModerationApprovalSummary, ModerationWebhookRequest,
    ModerationWebhookResponse,
};
