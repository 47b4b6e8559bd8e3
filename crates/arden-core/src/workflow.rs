//! Task Confirmation Workflow
//!
//! ```text
//!   Composing ──submit()──▶ Confirming ──confirm()──▶ Committed
//!       │                       │
//!       └──────cancel()─────────┴──────cancel()─────▶ Cancelled
//! ```
//!
//! Only `confirm()` touches the campaign. Tasks cannot be edited or removed
//! afterwards, so the summary step is the builder's last chance to back out.

use crate::error::{ArdenError, Result};
use crate::forms::TaskForm;
use crate::model::{Campaign, CampaignId, Task, TaskDraft};
use crate::notice::Notice;
use crate::repository::CampaignRepository;
use crate::validation::FormErrors;

pub const TASK_ADDED: &str = "Task added successfully! Remember, tasks cannot be deleted or edited.";
pub const TASK_CANCELLED: &str = "Task creation cancelled.";

/// Where the flow currently is
#[derive(Clone, Debug, PartialEq)]
pub enum TaskFlowState {
    /// Form open and editable
    Composing { form: TaskForm, errors: FormErrors },

    /// Read-only summary awaiting accept or cancel
    Confirming(TaskDraft),

    /// Task appended to the campaign
    Committed(Task),

    /// Pending task discarded
    Cancelled,
}

/// Add-task flow for one campaign
#[derive(Clone, Debug)]
pub struct TaskConfirmation {
    campaign_id: CampaignId,
    state: TaskFlowState,
}

impl TaskConfirmation {
    pub fn new(campaign_id: CampaignId) -> Self {
        Self {
            campaign_id,
            state: Self::composing(),
        }
    }

    fn composing() -> TaskFlowState {
        TaskFlowState::Composing {
            form: TaskForm::default(),
            errors: FormErrors::new(),
        }
    }

    pub fn campaign_id(&self) -> &CampaignId {
        &self.campaign_id
    }

    pub fn state(&self) -> &TaskFlowState {
        &self.state
    }

    /// Draft shown in the summary while confirming
    pub fn pending(&self) -> Option<&TaskDraft> {
        match &self.state {
            TaskFlowState::Confirming(draft) => Some(draft),
            _ => None,
        }
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            TaskFlowState::Composing { .. } => "composing",
            TaskFlowState::Confirming(_) => "confirming",
            TaskFlowState::Committed(_) => "committed",
            TaskFlowState::Cancelled => "cancelled",
        }
    }

    fn invalid(state: &str, action: &str) -> ArdenError {
        ArdenError::InvalidTransition(format!("cannot {action} while {state}"))
    }

    /// Edit a form field; clears that field's error
    pub fn update_field(&mut self, field: &str, value: String) -> Result<()> {
        let state = self.state_name();
        match &mut self.state {
            TaskFlowState::Composing { form, errors } => {
                form.set(field, value);
                errors.clear_field(field);
                Ok(())
            }
            _ => Err(Self::invalid(state, "edit")),
        }
    }

    /// Composing → Confirming when the form validates. On failure the flow
    /// stays in composing with the errors recorded.
    pub fn submit(&mut self) -> Result<&TaskDraft> {
        let state = self.state_name();
        let draft = match &mut self.state {
            TaskFlowState::Composing { form, errors } => {
                let found = form.validate();
                if !found.is_empty() {
                    *errors = found.clone();
                    return Err(ArdenError::Validation(found));
                }
                form.submit()?
            }
            _ => return Err(Self::invalid(state, "submit")),
        };

        self.state = TaskFlowState::Confirming(draft);
        match &self.state {
            TaskFlowState::Confirming(draft) => Ok(draft),
            _ => Err(Self::invalid(state, "submit")),
        }
    }

    /// Confirming → Committed: the single path that mutates the campaign
    pub fn confirm(&mut self, repo: &CampaignRepository) -> Result<(Campaign, Notice)> {
        let TaskFlowState::Confirming(draft) = &self.state else {
            return Err(Self::invalid(self.state_name(), "confirm"));
        };

        let (campaign, task) = repo.append_task(&self.campaign_id, draft.clone())?;
        self.state = TaskFlowState::Committed(task);
        Ok((campaign, Notice::success(TASK_ADDED)))
    }

    /// Discard the pending task with no side effect besides the notice
    pub fn cancel(&mut self) -> Result<Notice> {
        match self.state {
            TaskFlowState::Composing { .. } | TaskFlowState::Confirming(_) => {
                self.state = TaskFlowState::Cancelled;
                Ok(Notice::error(TASK_CANCELLED))
            }
            _ => Err(Self::invalid(self.state_name(), "cancel")),
        }
    }

    /// Start over with an empty form after a terminal state
    pub fn reset(&mut self) {
        self.state = Self::composing();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewCampaign;
    use crate::notice::NoticeVariant;
    use crate::seed::seed_campaigns;
    use crate::store::{keys, KeyValueStore, MemoryStore};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn setup() -> (CampaignRepository, Campaign) {
        let repo = CampaignRepository::new(Arc::new(MemoryStore::new()), seed_campaigns(Utc::now()));
        let campaign = repo
            .create(NewCampaign {
                campaign_name: "Beta Test".into(),
                description: String::new(),
                owner: "me".into(),
                dapp_link: "https://beta.example.com".into(),
                total_budget: dec!(100),
                campaign_end_time: Utc::now().timestamp() + 3600,
            })
            .unwrap();
        (repo, campaign)
    }

    fn fill(flow: &mut TaskConfirmation) {
        flow.update_field("title", "Write a review".into()).unwrap();
        flow.update_field("description", "Share honest thoughts".into()).unwrap();
        flow.update_field("reward", "25".into()).unwrap();
    }

    #[test]
    fn test_happy_path() {
        let (repo, campaign) = setup();
        let mut flow = TaskConfirmation::new(campaign.id.clone());
        fill(&mut flow);

        let draft = flow.submit().unwrap();
        assert_eq!(draft.reward, dec!(25));
        assert!(flow.pending().is_some());

        let (updated, notice) = flow.confirm(&repo).unwrap();
        assert_eq!(updated.task_counter(), 1);
        assert_eq!(notice.message, TASK_ADDED);
        assert!(matches!(flow.state(), TaskFlowState::Committed(t) if t.id == 1));
    }

    #[test]
    fn test_invalid_form_stays_composing() {
        let (_, campaign) = setup();
        let mut flow = TaskConfirmation::new(campaign.id);
        flow.update_field("title", "x".into()).unwrap();

        assert!(matches!(flow.submit(), Err(ArdenError::Validation(_))));
        let TaskFlowState::Composing { errors, .. } = flow.state() else {
            panic!("expected composing");
        };
        assert!(errors.get("reward").is_some());

        flow.update_field("reward", "3".into()).unwrap();
        let TaskFlowState::Composing { errors, .. } = flow.state() else {
            panic!("expected composing");
        };
        assert!(errors.get("reward").is_none());
    }

    #[test]
    fn test_oversized_reward_is_reported_on_the_field() {
        let (_, campaign) = setup();
        let mut flow = TaskConfirmation::new(campaign.id);
        fill(&mut flow);
        flow.update_field("reward", "9".repeat(40)).unwrap();

        assert!(matches!(flow.submit(), Err(ArdenError::Validation(_))));
        let TaskFlowState::Composing { errors, .. } = flow.state() else {
            panic!("expected composing");
        };
        assert_eq!(errors.get("reward"), Some("Reward is too large"));
    }

    #[test]
    fn test_cancel_has_no_side_effect() {
        let (repo, campaign) = setup();
        let before = repo.store().get_raw(keys::CREATED_CAMPAIGNS).unwrap();

        let mut flow = TaskConfirmation::new(campaign.id);
        fill(&mut flow);
        flow.submit().unwrap();
        let notice = flow.cancel().unwrap();

        assert_eq!(notice.variant, NoticeVariant::Error);
        assert_eq!(*flow.state(), TaskFlowState::Cancelled);
        assert_eq!(repo.store().get_raw(keys::CREATED_CAMPAIGNS).unwrap(), before);

        flow.reset();
        assert!(matches!(flow.state(), TaskFlowState::Composing { form, .. } if form.title.is_empty()));
    }

    #[test]
    fn test_confirm_requires_confirming() {
        let (repo, campaign) = setup();
        let mut flow = TaskConfirmation::new(campaign.id);
        assert!(matches!(flow.confirm(&repo), Err(ArdenError::InvalidTransition(_))));

        fill(&mut flow);
        flow.submit().unwrap();
        assert!(matches!(
            flow.update_field("title", "late edit".into()),
            Err(ArdenError::InvalidTransition(_))
        ));
    }
}
