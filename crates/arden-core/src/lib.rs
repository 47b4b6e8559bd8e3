//! # arden-core
//!
//! Domain logic for the Arden campaign and rewards platform.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Pages (web)                          │
//! │  ┌──────────────┐  ┌──────────────┐  ┌─────────────────────┐  │
//! │  │    Forms     │  │  Campaign    │  │  RegistryClient     │  │
//! │  │ + Validation │──│  Repository  │  │  (Strategy)         │  │
//! │  └──────────────┘  └──────┬───────┘  └─────────────────────┘  │
//! │                           │                                   │
//! │                    ┌──────▼───────┐  ┌─────────────────────┐  │
//! │                    │ KeyValueStore│  │  WalletLinkPoller   │  │
//! │                    └──────────────┘  └─────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The repository merges the built-in showcase campaigns with campaigns the
//! builder created in this browser. Nothing here touches the DOM or the
//! network; those live behind [`KeyValueStore`], [`RegistryClient`] and
//! [`WalletSource`].

pub mod config;
pub mod error;
pub mod forms;
pub mod model;
pub mod notice;
pub mod registry;
pub mod repository;
pub mod seed;
pub mod slug;
pub mod store;
pub mod validation;
pub mod view;
pub mod wallet;
pub mod workflow;

pub use config::ArdenConfig;
pub use error::{ArdenError, Result};
pub use forms::{CampaignForm, ContactForm, RegistrationForm, TaskForm, UserRole};
pub use model::{Campaign, CampaignId, NewCampaign, Task, TaskDraft};
pub use notice::{Notice, NoticeVariant};
pub use registry::{
    load_profile, MockRegistryClient, ReadState, RegistryClient, TxHash, UserProfile, UserRecord,
    WalletAddress, WriteState,
};
pub use repository::{CampaignFilter, CampaignQuery, CampaignRepository};
pub use store::{KeyValueStore, KeyValueStoreExt, MemoryStore};
pub use validation::{FormErrors, ValidationError};
pub use view::{CampaignDetailView, CampaignStatus, CampaignView};
pub use wallet::{LinkedAccount, WalletLinkHandle, WalletLinkPoller, WalletSource};
pub use workflow::{TaskConfirmation, TaskFlowState};
