//! Domain Models
//!
//! Campaigns and their tasks as they are persisted in the browser store.
//! Field names serialize in camelCase so stored records keep the layout the
//! frontend has always written. Uses `rust_decimal` for every amount.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slug::slugify;

/// Placeholder factory address for campaigns created in the browser
pub const PLACEHOLDER_FACTORY: &str = "0x0000000000000000000000000000000000000000";

/// Unique campaign identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(String);

impl CampaignId {
    /// Fresh id for a user-created campaign
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CampaignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CampaignId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A completable unit of work inside a campaign
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Sequential within the owning campaign, starting at 1
    pub id: u32,

    pub title: String,

    pub description: String,

    /// Reward paid per completion
    pub reward: Decimal,

    pub is_active: bool,

    pub completion_count: u32,

    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Task built from a confirmed draft
    pub fn from_draft(id: u32, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            reward: draft.reward,
            is_active: true,
            completion_count: 0,
            completed: false,
        }
    }
}

/// Validated task fields awaiting confirmation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub reward: Decimal,
}

/// Validated campaign fields from the builder form
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewCampaign {
    pub campaign_name: String,
    pub description: String,
    pub owner: String,
    pub dapp_link: String,
    pub total_budget: Decimal,
    /// Seconds since epoch
    pub campaign_end_time: i64,
}

/// A builder-defined initiative with a budget and a task list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: CampaignId,

    /// URL-safe `name-id`; recomputed on load when missing
    #[serde(default)]
    pub slug: String,

    pub factory: String,

    pub campaign_name: String,

    #[serde(default)]
    pub description: String,

    /// Builder that created the campaign
    #[serde(default)]
    pub owner: String,

    pub dapp_link: String,

    pub total_budget: Decimal,

    remaining_budget: Decimal,

    #[serde(default)]
    pub current_amount: Decimal,

    #[serde(default)]
    pub target_amount: Decimal,

    /// Seconds since epoch
    pub campaign_end_time: i64,

    pub is_active: bool,

    task_counter: u32,

    #[serde(default)]
    pub backers: u32,

    tasks: Vec<Task>,
}

impl Campaign {
    /// Fresh campaign from the builder form: active, no tasks, full budget
    pub fn create(new: NewCampaign) -> Self {
        let id = CampaignId::generate();
        let slug = slugify(&new.campaign_name, &id);
        Self {
            id,
            slug,
            factory: PLACEHOLDER_FACTORY.into(),
            campaign_name: new.campaign_name,
            description: new.description,
            owner: new.owner,
            dapp_link: new.dapp_link,
            total_budget: new.total_budget,
            remaining_budget: new.total_budget,
            current_amount: Decimal::ZERO,
            target_amount: new.total_budget,
            campaign_end_time: new.campaign_end_time,
            is_active: true,
            task_counter: 0,
            backers: 0,
            tasks: Vec::new(),
        }
    }

    /// Campaign with an explicit id and budget split, as used for seed data.
    /// `remaining` is clamped to `total`.
    pub fn with_budget(
        id: impl Into<CampaignId>,
        campaign_name: impl Into<String>,
        dapp_link: impl Into<String>,
        total: Decimal,
        remaining: Decimal,
        campaign_end_time: i64,
    ) -> Self {
        let id = id.into();
        let campaign_name = campaign_name.into();
        Self {
            slug: slugify(&campaign_name, &id),
            id,
            factory: PLACEHOLDER_FACTORY.into(),
            campaign_name,
            description: String::new(),
            owner: String::new(),
            dapp_link: dapp_link.into(),
            total_budget: total,
            remaining_budget: remaining.min(total),
            current_amount: total - remaining.min(total),
            target_amount: total,
            campaign_end_time,
            is_active: true,
            task_counter: 0,
            backers: 0,
            tasks: Vec::new(),
        }
    }

    pub fn remaining_budget(&self) -> Decimal {
        self.remaining_budget
    }

    pub fn task_counter(&self) -> u32 {
        self.task_counter
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Description of the first task, used by search and discover cards
    pub fn headline(&self) -> Option<&str> {
        self.tasks.first().map(|t| t.description.as_str())
    }

    /// Append a confirmed task, numbering it after the current counter.
    /// Tasks and counter always move together.
    pub fn append_task(&mut self, draft: TaskDraft) -> &Task {
        self.task_counter += 1;
        self.tasks.push(Task::from_draft(self.task_counter, draft));
        &self.tasks[self.tasks.len() - 1]
    }

    /// Seed helper: attach an existing task without renumbering
    pub fn with_task(mut self, task: Task) -> Self {
        self.task_counter = self.task_counter.max(task.id);
        self.tasks.push(task);
        self
    }

    /// Seed helper: override the advertised task counter
    pub fn with_task_counter(mut self, counter: u32) -> Self {
        self.task_counter = counter.max(self.tasks.iter().map(|t| t.id).max().unwrap_or(0));
        self
    }

    /// Repair records read back from storage: fill a missing slug, clamp the
    /// remaining budget to the total.
    pub fn normalize(&mut self) {
        if self.slug.is_empty() {
            self.slug = slugify(&self.campaign_name, &self.id);
        }
        if self.remaining_budget > self.total_budget {
            tracing::warn!(
                campaign = %self.id,
                "Remaining budget exceeds total, clamping"
            );
            self.remaining_budget = self.total_budget;
        }
        if self.target_amount == Decimal::ZERO {
            self.target_amount = self.total_budget;
        }
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.campaign_end_time, 0)
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.ends_at().is_some_and(|end| end <= now)
    }

    /// Funding progress in percent (current / target), 0 when there is no target
    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount > Decimal::ZERO {
            (self.current_amount / self.target_amount * Decimal::from(100)).min(Decimal::from(100))
        } else {
            Decimal::ZERO
        }
    }

    /// `matches_route` accepts either the id or the slug
    pub fn matches_route(&self, segment: &str) -> bool {
        self.id.as_str() == segment || self.slug == segment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn beta() -> NewCampaign {
        NewCampaign {
            campaign_name: "Beta Test".into(),
            description: String::new(),
            owner: "builder".into(),
            dapp_link: "https://beta.example.com".into(),
            total_budget: dec!(100),
            campaign_end_time: Utc::now().timestamp() + 3600,
        }
    }

    #[test]
    fn test_create_starts_full_and_empty() {
        let campaign = Campaign::create(beta());
        assert_eq!(campaign.remaining_budget(), campaign.total_budget);
        assert!(campaign.is_active);
        assert_eq!(campaign.task_counter(), 0);
        assert!(campaign.tasks().is_empty());
        assert!(campaign.slug.starts_with("beta-test-"));
    }

    #[test]
    fn test_with_budget_clamps() {
        let campaign = Campaign::with_budget("9", "Over", "https://x.io", dec!(10), dec!(50), 0);
        assert_eq!(campaign.remaining_budget(), dec!(10));
    }

    #[test]
    fn test_append_task_numbers_sequentially() {
        let mut campaign = Campaign::create(beta());
        for n in 1..=3 {
            let task = campaign.append_task(TaskDraft {
                title: format!("Task {n}"),
                description: "Do the thing carefully".into(),
                reward: dec!(5),
            });
            assert_eq!(task.id, n);
            assert!(task.is_active);
            assert!(!task.completed);
        }
        assert_eq!(campaign.task_counter(), 3);
    }

    #[test]
    fn test_normalize_legacy_record() {
        let json = r#"{
            "id": "7",
            "factory": "0x0",
            "campaignName": "Old Record",
            "dappLink": "https://old.example.com",
            "totalBudget": "10",
            "remainingBudget": "25",
            "campaignEndTime": 0,
            "isActive": true,
            "taskCounter": 0,
            "tasks": []
        }"#;
        let mut campaign: Campaign = serde_json::from_str(json).unwrap();
        campaign.normalize();
        assert_eq!(campaign.slug, "old-record-7");
        assert_eq!(campaign.remaining_budget(), dec!(10));
        assert_eq!(campaign.target_amount, dec!(10));
    }
}
