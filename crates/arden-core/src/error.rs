//! Error Types

use thiserror::Error;

use crate::validation::FormErrors;

/// Result type alias for Arden operations
pub type Result<T> = std::result::Result<T, ArdenError>;

/// Arden error types
#[derive(Error, Debug)]
pub enum ArdenError {
    /// One or more form fields failed validation
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FormErrors),

    /// No campaign matches the given id or slug
    #[error("Campaign not found: {0}")]
    CampaignNotFound(String),

    /// Campaign exists but is not owned by the caller's builder list
    #[error("Campaign {0} is not owned by this builder")]
    NotOwner(String),

    /// Tasks cannot be edited or removed once confirmed
    #[error("Task {task_id} of campaign {campaign_id} is immutable")]
    TaskImmutable { campaign_id: String, task_id: u32 },

    /// Workflow step requested from the wrong state
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Key-value store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Registry contract call failed
    #[error("Registry error: {0}")]
    Registry(String),

    /// Registry endpoint not reachable
    #[error("Registry unavailable: {0}")]
    RegistryUnavailable(String),

    /// Malformed wallet address
    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    /// An operation needs a linked wallet and none is linked yet
    #[error("No wallet linked")]
    WalletNotLinked,

    /// Wallet link subscription gave up
    #[error("Wallet link timed out after {attempts} attempt(s)")]
    WalletLinkTimeout { attempts: u32 },

    /// Wallet link subscription was cancelled by its owner
    #[error("Wallet link cancelled")]
    WalletLinkCancelled,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl ArdenError {
    /// Check if the user can reasonably try the same action again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ArdenError::RegistryUnavailable(_)
                | ArdenError::Registry(_)
                | ArdenError::WalletLinkTimeout { .. }
                | ArdenError::Storage(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            ArdenError::Validation(_) => "Please fill out all fields correctly".into(),
            ArdenError::CampaignNotFound(_) => "That campaign could not be found.".into(),
            ArdenError::NotOwner(_) => "Only the campaign's builder can add tasks.".into(),
            ArdenError::TaskImmutable { .. } => "Tasks cannot be deleted or edited.".into(),
            ArdenError::WalletNotLinked => "Connect your wallet to continue.".into(),
            ArdenError::WalletLinkTimeout { .. } => {
                "Your wallet is taking too long to connect. Please try again.".into()
            }
            ArdenError::Registry(_) | ArdenError::RegistryUnavailable(_) => {
                "The registry could not be reached. Please try again.".into()
            }
            ArdenError::Storage(_) => "Your changes could not be saved in this browser.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for ArdenError {
    fn from(err: anyhow::Error) -> Self {
        ArdenError::Other(err.to_string())
    }
}
