use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Step of a profile's guided setup process. Exactly one value at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStage {
    Start,
    NeedsPlan,
    NeedsPayment,
    NeedsIdentity,
    BuildProfile,
    UploadPhotos,
    FixModeration,
    SubmitAdmin,
    WaitingAdmin,
    Live,
    Blocked,
}

impl OnboardingStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingStage::Start => "start",
            OnboardingStage::NeedsPlan => "needs_plan",
            OnboardingStage::NeedsPayment => "needs_payment",
            OnboardingStage::NeedsIdentity => "needs_identity",
            OnboardingStage::BuildProfile => "build_profile",
            OnboardingStage::UploadPhotos => "upload_photos",
            OnboardingStage::FixModeration => "fix_moderation",
            OnboardingStage::SubmitAdmin => "submit_admin",
            OnboardingStage::WaitingAdmin => "waiting_admin",
            OnboardingStage::Live => "live",
            OnboardingStage::Blocked => "blocked",
        }
    }
}

impl std::str::FromStr for OnboardingStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(OnboardingStage::Start),
            "needs_plan" => Ok(OnboardingStage::NeedsPlan),
            "needs_payment" => Ok(OnboardingStage::NeedsPayment),
            "needs_identity" => Ok(OnboardingStage::NeedsIdentity),
            "build_profile" => Ok(OnboardingStage::BuildProfile),
            "upload_photos" => Ok(OnboardingStage::UploadPhotos),
            "fix_moderation" => Ok(OnboardingStage::FixModeration),
            "submit_admin" => Ok(OnboardingStage::SubmitAdmin),
            "waiting_admin" => Ok(OnboardingStage::WaitingAdmin),
            "live" => Ok(OnboardingStage::Live),
            "blocked" => Ok(OnboardingStage::Blocked),
            _ => Err(format!("Unknown onboarding stage: {}", s)),
        }
    }
}

/// Outcome of the automated content screening pass over a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoModeration {
    Draft,
    AutoPassed,
    AutoFlagged,
    AutoBlocked,
}

impl AutoModeration {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoModeration::Draft => "draft",
            AutoModeration::AutoPassed => "auto_passed",
            AutoModeration::AutoFlagged => "auto_flagged",
            AutoModeration::AutoBlocked => "auto_blocked",
        }
    }

    /// Flagged and blocked both send the profile back to the fix stage.
    pub fn requires_fixes(&self) -> bool {
        matches!(self, AutoModeration::AutoFlagged | AutoModeration::AutoBlocked)
    }
}

impl std::str::FromStr for AutoModeration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AutoModeration::Draft),
            "auto_passed" => Ok(AutoModeration::AutoPassed),
            "auto_flagged" => Ok(AutoModeration::AutoFlagged),
            "auto_blocked" => Ok(AutoModeration::AutoBlocked),
            _ => Err(format!("Unknown auto moderation status: {}", s)),
        }
    }
}

/// Outcome of human administrative review of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminStatus {
    PendingAdmin,
    Approved,
    Rejected,
    ChangesRequested,
}

impl AdminStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminStatus::PendingAdmin => "pending_admin",
            AdminStatus::Approved => "approved",
            AdminStatus::Rejected => "rejected",
            AdminStatus::ChangesRequested => "changes_requested",
        }
    }
}

impl std::str::FromStr for AdminStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_admin" => Ok(AdminStatus::PendingAdmin),
            "approved" => Ok(AdminStatus::Approved),
            "rejected" => Ok(AdminStatus::Rejected),
            "changes_requested" => Ok(AdminStatus::ChangesRequested),
            _ => Err(format!("Unknown admin status: {}", s)),
        }
    }
}

/// Whether a profile is visible in the public directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Private,
    Public,
}

impl PublicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::Private => "private",
            PublicationStatus::Public => "public",
        }
    }
}

impl std::str::FromStr for PublicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(PublicationStatus::Private),
            "public" => Ok(PublicationStatus::Public),
            _ => Err(format!("Unknown publication status: {}", s)),
        }
    }
}

/// Whether the profile owner's identity has been confirmed by the
/// third-party verification flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityStatus {
    Pending,
    Verified,
    Failed,
}

impl IdentityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityStatus::Pending => "pending",
            IdentityStatus::Verified => "verified",
            IdentityStatus::Failed => "failed",
        }
    }
}

impl std::str::FromStr for IdentityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(IdentityStatus::Pending),
            "verified" => Ok(IdentityStatus::Verified),
            "failed" => Ok(IdentityStatus::Failed),
            _ => Err(format!("Unknown identity status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Unknown user role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Trialing,
    Active,
    PastDue,
    Canceled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
        }
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trialing" => Ok(SubscriptionStatus::Trialing),
            "active" => Ok(SubscriptionStatus::Active),
            "past_due" => Ok(SubscriptionStatus::PastDue),
            "canceled" => Ok(SubscriptionStatus::Canceled),
            _ => Err(format!("Unknown subscription status: {}", s)),
        }
    }
}

/// The entity gated by the onboarding flow. Owned by the storage adapter;
/// the evaluator is the only writer allowed to establish the
/// approved/public/live triple.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub onboarding_stage: OnboardingStage,
    pub auto_moderation: AutoModeration,
    pub admin_status: AdminStatus,
    pub publication_status: PublicationStatus,
    pub display_name: Option<String>,
    pub city_slug: Option<String>,
    pub phone_public_e164: Option<String>,
    pub incall_enabled: bool,
    pub outcall_enabled: bool,
    pub admin_notes: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// A profile counts as live once admin approval and public visibility
    /// are both in place.
    pub fn is_live(&self) -> bool {
        self.admin_status == AdminStatus::Approved
            && self.publication_status == PublicationStatus::Public
    }
}

/// Owner of a profile, referenced not owned. One user owns at most one
/// profile.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub identity_status: IdentityStatus,
    pub role: UserRole,
}

/// Read-only view of the billing collaborator's subscription record.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionSnapshot {
    pub id: Uuid,
    pub plan: String,
    pub status: SubscriptionStatus,
    pub trial_end: Option<DateTime<Utc>>,
    pub current_period_end: DateTime<Utc>,
}

impl SubscriptionSnapshot {
    pub fn is_in_good_standing(&self) -> bool {
        matches!(
            self.status,
            SubscriptionStatus::Trialing | SubscriptionStatus::Active
        )
    }
}

/// Counts of the relations the submission checklist inspects.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RelationCounts {
    pub approved_photos: u64,
    pub languages: u64,
    pub services: u64,
    pub setups: u64,
    pub incall_rates: u64,
    pub outcall_rates: u64,
}
