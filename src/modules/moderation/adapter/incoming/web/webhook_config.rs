/// Shared secret the moderation pipeline sends in the
/// `x-webhook-secret` header.
#[derive(Debug, Clone)]
pub struct ModerationWebhookConfig {
    pub secret: String,
}

impl ModerationWebhookConfig {
    pub fn from_env() -> Self {
        let secret = std::env::var("MODERATION_WEBHOOK_SECRET")
            .expect("MODERATION_WEBHOOK_SECRET is not set in .env file");
        Self { secret }
    }

    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}
