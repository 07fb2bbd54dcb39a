//! Profile onboarding state machine.
//!
//! Pure functions over the stage/status enums: the transition table driven
//! by user and webhook events, the derived-stage calculation, and the
//! submission/publication checklists. No I/O happens here; adapters feed in
//! snapshots and counts.

use super::entities::{
    AdminStatus, AutoModeration, IdentityStatus, OnboardingStage, Profile, PublicationStatus,
    RelationCounts, SubscriptionSnapshot, User,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionEvent {
    Signup,
    SelectPlan,
    PaymentSuccess,
    IdentityVerified,
    IdentityFailed,
    ProfileSaved,
    PhotoUploaded,
    ModerationPass,
    ModerationFlag,
    ModerationBlock,
    SubmitForReview,
    AdminApprove,
    AdminRequestChanges,
    AdminReject,
    PaymentFailed,
    EditSensitiveField,
}

/// Snapshot of the surrounding state a guarded transition inspects.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext {
    pub plan_is_free: bool,
    pub profile_complete: bool,
    pub has_approved_photos: bool,
    pub auto_moderation: AutoModeration,
    pub can_submit: bool,
    pub has_paid_plan: bool,
}

impl Default for TransitionContext {
    fn default() -> Self {
        Self {
            plan_is_free: false,
            profile_complete: false,
            has_approved_photos: false,
            auto_moderation: AutoModeration::Draft,
            can_submit: false,
            has_paid_plan: false,
        }
    }
}

pub struct Transition {
    pub from: OnboardingStage,
    pub to: OnboardingStage,
    pub event: TransitionEvent,
    pub condition: Option<fn(&TransitionContext) -> bool>,
}

/// Every stage transition the onboarding flow recognizes. Guarded entries
/// are tried in order; the first whose condition holds wins.
pub static TRANSITIONS: &[Transition] = &[
    Transition {
        from: OnboardingStage::Start,
        to: OnboardingStage::NeedsPlan,
        event: TransitionEvent::Signup,
        condition: None,
    },
    Transition {
        from: OnboardingStage::NeedsPlan,
        to: OnboardingStage::NeedsIdentity,
        event: TransitionEvent::SelectPlan,
        condition: Some(|ctx| ctx.plan_is_free),
    },
    Transition {
        from: OnboardingStage::NeedsPlan,
        to: OnboardingStage::NeedsPayment,
        event: TransitionEvent::SelectPlan,
        condition: Some(|ctx| !ctx.plan_is_free),
    },
    Transition {
        from: OnboardingStage::NeedsPayment,
        to: OnboardingStage::NeedsIdentity,
        event: TransitionEvent::PaymentSuccess,
        condition: None,
    },
    Transition {
        from: OnboardingStage::NeedsIdentity,
        to: OnboardingStage::BuildProfile,
        event: TransitionEvent::IdentityVerified,
        condition: Some(|ctx| !ctx.profile_complete),
    },
    Transition {
        from: OnboardingStage::NeedsIdentity,
        to: OnboardingStage::SubmitAdmin,
        event: TransitionEvent::IdentityVerified,
        condition: Some(|ctx| ctx.profile_complete && ctx.has_approved_photos),
    },
    Transition {
        from: OnboardingStage::NeedsIdentity,
        to: OnboardingStage::Blocked,
        event: TransitionEvent::IdentityFailed,
        condition: None,
    },
    Transition {
        from: OnboardingStage::BuildProfile,
        to: OnboardingStage::FixModeration,
        event: TransitionEvent::ProfileSaved,
        condition: Some(|ctx| ctx.auto_moderation.requires_fixes()),
    },
    Transition {
        from: OnboardingStage::BuildProfile,
        to: OnboardingStage::UploadPhotos,
        event: TransitionEvent::ProfileSaved,
        condition: Some(|ctx| {
            ctx.auto_moderation == AutoModeration::AutoPassed && !ctx.has_approved_photos
        }),
    },
    Transition {
        from: OnboardingStage::BuildProfile,
        to: OnboardingStage::SubmitAdmin,
        event: TransitionEvent::ProfileSaved,
        condition: Some(|ctx| {
            ctx.auto_moderation == AutoModeration::AutoPassed
                && ctx.has_approved_photos
                && ctx.can_submit
        }),
    },
    Transition {
        from: OnboardingStage::UploadPhotos,
        to: OnboardingStage::SubmitAdmin,
        event: TransitionEvent::PhotoUploaded,
        condition: Some(|ctx| ctx.has_approved_photos && ctx.can_submit),
    },
    Transition {
        from: OnboardingStage::FixModeration,
        to: OnboardingStage::BuildProfile,
        event: TransitionEvent::ModerationPass,
        condition: None,
    },
    Transition {
        from: OnboardingStage::SubmitAdmin,
        to: OnboardingStage::WaitingAdmin,
        event: TransitionEvent::SubmitForReview,
        condition: None,
    },
    Transition {
        from: OnboardingStage::WaitingAdmin,
        to: OnboardingStage::Live,
        event: TransitionEvent::AdminApprove,
        condition: None,
    },
    Transition {
        from: OnboardingStage::WaitingAdmin,
        to: OnboardingStage::BuildProfile,
        event: TransitionEvent::AdminRequestChanges,
        condition: None,
    },
    Transition {
        from: OnboardingStage::WaitingAdmin,
        to: OnboardingStage::Blocked,
        event: TransitionEvent::AdminReject,
        condition: None,
    },
    // Sensitive edits after publication go back through review
    Transition {
        from: OnboardingStage::Live,
        to: OnboardingStage::WaitingAdmin,
        event: TransitionEvent::EditSensitiveField,
        condition: None,
    },
    Transition {
        from: OnboardingStage::Live,
        to: OnboardingStage::NeedsPayment,
        event: TransitionEvent::PaymentFailed,
        condition: Some(|ctx| ctx.has_paid_plan),
    },
];

/// Next stage for an event in the current context, or `None` when the
/// event does not apply.
pub fn next_stage(
    current: OnboardingStage,
    event: TransitionEvent,
    ctx: &TransitionContext,
) -> Option<OnboardingStage> {
    TRANSITIONS
        .iter()
        .filter(|t| t.from == current && t.event == event)
        .find(|t| t.condition.map_or(true, |cond| cond(ctx)))
        .map(|t| t.to)
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub missing: Vec<String>,
}

/// Checklist gating submission for admin review.
pub fn can_submit_for_review(
    profile: &Profile,
    user: &User,
    subscription: Option<&SubscriptionSnapshot>,
    counts: &RelationCounts,
) -> ValidationResult {
    let mut missing = Vec::new();

    if user.identity_status != IdentityStatus::Verified {
        missing.push("Identity verification required".to_string());
    }

    if profile.auto_moderation != AutoModeration::AutoPassed {
        missing.push("Content must pass automatic moderation".to_string());
    }

    if profile
        .display_name
        .as_deref()
        .map_or(true, |name| name.trim().is_empty())
    {
        missing.push("Display name required".to_string());
    }
    if profile.city_slug.is_none() {
        missing.push("City required".to_string());
    }
    if profile.phone_public_e164.is_none() {
        missing.push("Phone number required".to_string());
    }

    if counts.languages < 1 {
        missing.push("At least one language required".to_string());
    }
    if counts.services < 1 {
        missing.push("At least one service required".to_string());
    }
    if counts.setups < 1 {
        missing.push("At least one setup required".to_string());
    }

    if profile.incall_enabled && counts.incall_rates < 1 {
        missing.push("At least one incall rate required".to_string());
    }
    if profile.outcall_enabled && counts.outcall_rates < 1 {
        missing.push("At least one outcall rate required".to_string());
    }

    if counts.approved_photos < 1 {
        missing.push("At least one approved photo required".to_string());
    }

    if let Some(subscription) = subscription {
        if !subscription.is_in_good_standing() {
            missing.push("Active subscription required".to_string());
        }
    }

    ValidationResult {
        valid: missing.is_empty(),
        missing,
    }
}

/// Checklist a profile must satisfy to remain publicly visible.
pub fn can_publish_profile(
    profile: &Profile,
    user: &User,
    subscription: Option<&SubscriptionSnapshot>,
) -> ValidationResult {
    let mut missing = Vec::new();

    if user.identity_status != IdentityStatus::Verified {
        missing.push("Identity not verified".to_string());
    }

    if profile.auto_moderation != AutoModeration::AutoPassed {
        missing.push("Auto moderation not passed".to_string());
    }

    if profile.admin_status != AdminStatus::Approved {
        missing.push("Admin approval required".to_string());
    }

    if profile.publication_status != PublicationStatus::Public {
        missing.push("Publication status must be public".to_string());
    }

    if let Some(subscription) = subscription {
        if !subscription.is_in_good_standing() {
            missing.push("Active subscription required".to_string());
        }
    }

    ValidationResult {
        valid: missing.is_empty(),
        missing,
    }
}

/// Derive the stage a profile should be in from its current stored state.
///
/// Precedence matters: blocked outcomes win over review states, review
/// states over the happy path.
pub fn resolve_stage(
    profile: &Profile,
    user: &User,
    subscription: Option<&SubscriptionSnapshot>,
    counts: &RelationCounts,
) -> OnboardingStage {
    if user.identity_status == IdentityStatus::Failed {
        return OnboardingStage::Blocked;
    }
    if profile.admin_status == AdminStatus::Rejected {
        return OnboardingStage::Blocked;
    }

    if profile.admin_status == AdminStatus::PendingAdmin {
        return OnboardingStage::WaitingAdmin;
    }

    if profile.admin_status == AdminStatus::ChangesRequested {
        return OnboardingStage::BuildProfile;
    }

    if profile.is_live() && user.identity_status == IdentityStatus::Verified {
        return OnboardingStage::Live;
    }

    if let Some(subscription) = subscription {
        if !subscription.is_in_good_standing() {
            return OnboardingStage::NeedsPayment;
        }
    }

    if user.identity_status == IdentityStatus::Pending {
        return OnboardingStage::NeedsIdentity;
    }

    if profile.auto_moderation.requires_fixes() {
        return OnboardingStage::FixModeration;
    }

    let can_submit = can_submit_for_review(profile, user, subscription, counts);

    if counts.approved_photos < 1 {
        return OnboardingStage::UploadPhotos;
    }

    if can_submit.valid && profile.auto_moderation == AutoModeration::AutoPassed {
        return OnboardingStage::SubmitAdmin;
    }

    OnboardingStage::BuildProfile
}

/// Fields whose edits after publication force a fresh review pass.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "display_name",
    "bio_short",
    "bio_long",
    "incall_enabled",
    "outcall_enabled",
    "outcall_radius_miles",
    "outcall_areas",
    "custom_service_description",
];

pub fn is_sensitive_field_edit(field: &str) -> bool {
    SENSITIVE_FIELDS.contains(&field)
}

pub fn stage_message(stage: OnboardingStage) -> &'static str {
    match stage {
        OnboardingStage::Start => "Welcome! Let's get started.",
        OnboardingStage::NeedsPlan => "Choose the plan that fits your needs.",
        OnboardingStage::NeedsPayment => "Complete payment to continue.",
        OnboardingStage::NeedsIdentity => "Verify your identity to publish your profile.",
        OnboardingStage::BuildProfile => {
            "Complete your profile with services, rates, and hours."
        }
        OnboardingStage::UploadPhotos => "Upload at least one professional photo.",
        OnboardingStage::FixModeration => {
            "Please address the moderation issues to continue."
        }
        OnboardingStage::SubmitAdmin => {
            "Ready to submit? Review your profile and send for approval."
        }
        OnboardingStage::WaitingAdmin => {
            "Your profile is under review. This usually takes 24-48 hours."
        }
        OnboardingStage::Live => "Congratulations! Your profile is live.",
        OnboardingStage::Blocked => "Your account has been blocked. Please contact support.",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressStep {
    pub name: &'static str,
    pub completed: bool,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OnboardingProgress {
    pub current: OnboardingStage,
    pub steps: Vec<ProgressStep>,
    pub percent_complete: u32,
}

/// Step list for the onboarding tracker. Paid plans see the payment step,
/// free plans skip it.
pub fn onboarding_progress(stage: OnboardingStage, has_paid_plan: bool) -> OnboardingProgress {
    let mut all_steps: Vec<(OnboardingStage, &'static str)> = vec![
        (OnboardingStage::Start, "Create Account"),
        (OnboardingStage::NeedsPlan, "Select Plan"),
    ];
    if has_paid_plan {
        all_steps.push((OnboardingStage::NeedsPayment, "Payment"));
    }
    all_steps.extend([
        (OnboardingStage::NeedsIdentity, "Verify Identity"),
        (OnboardingStage::BuildProfile, "Build Profile"),
        (OnboardingStage::UploadPhotos, "Upload Photos"),
        (OnboardingStage::SubmitAdmin, "Submit for Review"),
        (OnboardingStage::WaitingAdmin, "Admin Review"),
        (OnboardingStage::Live, "Published"),
    ]);

    let current_index = all_steps
        .iter()
        .position(|(key, _)| *key == stage)
        .map(|idx| idx as i64)
        .unwrap_or(-1);

    let steps = all_steps
        .iter()
        .enumerate()
        .map(|(idx, (_, name))| ProgressStep {
            name,
            completed: (idx as i64) < current_index,
            current: (idx as i64) == current_index,
        })
        .collect::<Vec<_>>();

    let percent_complete = if current_index < 0 {
        0
    } else {
        ((current_index as f64 / all_steps.len() as f64) * 100.0).round() as u32
    };

    OnboardingProgress {
        current: stage,
        steps,
        percent_complete,
    }
}
