//! Transient notices (the dismissable alert box)

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ArdenError;

/// How long a notice stays up unless dismissed
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(5);

pub const CAMPAIGN_CREATED: &str = "Campaign created successfully!";
pub const CAMPAIGN_JOINED: &str = "Welcome! Check your email for next steps.";
pub const CAMPAIGN_LEFT: &str = "You have left the campaign.";
pub const FORM_INVALID: &str = "Please fill out all fields correctly";
pub const FORM_FIX_ERRORS: &str = "Please fix the errors below";
pub const CONTACT_SENT: &str = "Thank you! We'll get back to you soon.";
pub const ACCOUNT_CREATED: &str = "Account created successfully! Redirecting to dashboard...";
pub const REGISTRATION_SENT: &str = "Transaction sent... waiting for confirmation";
pub const REGISTRATION_FAILED: &str = "Registration failed.";
pub const VERIFICATION_SENT: &str = "Verification transaction sent...";
pub const VERIFICATION_FAILED: &str = "Verification failed.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Success,
    Error,
    Info,
}

impl NoticeVariant {
    pub fn title(&self) -> &'static str {
        match self {
            NoticeVariant::Success => "Success",
            NoticeVariant::Error => "Error",
            NoticeVariant::Info => "Notice",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeVariant::Success => "success",
            NoticeVariant::Error => "error",
            NoticeVariant::Info => "info",
        }
    }
}

/// A message that auto-expires after `ttl`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub variant: NoticeVariant,
    pub ttl: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>, variant: NoticeVariant) -> Self {
        Self {
            message: message.into(),
            variant,
            ttl: DEFAULT_NOTICE_TTL,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NoticeVariant::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NoticeVariant::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NoticeVariant::Info)
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl From<&ArdenError> for Notice {
    fn from(err: &ArdenError) -> Self {
        Notice::error(err.user_message())
    }
}
