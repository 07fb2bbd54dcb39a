/// Shared secret the verification provider sends in the
/// `x-webhook-secret` header.
#[derive(Debug, Clone)]
pub struct IdentityWebhookConfig {
    pub secret: String,
}

impl IdentityWebhookConfig {
    pub fn from_env() -> Self {
        let secret = std::env::var("IDENTITY_WEBHOOK_SECRET")
            .expect("IDENTITY_WEBHOOK_SECRET is not set in .env file");
        Self { secret }
    }

    /// Handy for unit tests or custom wiring (no env reads).
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}
