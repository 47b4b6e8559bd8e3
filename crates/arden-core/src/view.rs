//! View models for the dashboard grids and the campaign page

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{Campaign, CampaignId, Task};
use crate::registry::WalletAddress;

const NO_DESCRIPTION: &str = "No description available.";

/// Card shown in the builder's "My Campaigns" grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuilderCampaignView {
    pub id: CampaignId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub task_count: u32,
    pub total_budget: Decimal,
    pub remaining_budget: Decimal,
    pub is_active: bool,
}

/// Card shown in the discover grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscoverCampaignView {
    pub id: CampaignId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub participants: u32,
    pub reward: Decimal,
    pub is_joined: bool,
}

/// One card, either flavour
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CampaignView {
    Builder(BuilderCampaignView),
    Discover(DiscoverCampaignView),
}

impl CampaignView {
    pub fn builder(campaign: &Campaign) -> Self {
        let description = if campaign.description.trim().is_empty() {
            campaign.headline().unwrap_or(NO_DESCRIPTION).to_string()
        } else {
            campaign.description.clone()
        };

        CampaignView::Builder(BuilderCampaignView {
            id: campaign.id.clone(),
            slug: campaign.slug.clone(),
            title: campaign.campaign_name.clone(),
            description,
            task_count: campaign.task_counter(),
            total_budget: campaign.total_budget,
            remaining_budget: campaign.remaining_budget(),
            is_active: campaign.is_active,
        })
    }

    pub fn discover(campaign: &Campaign, is_joined: bool) -> Self {
        CampaignView::Discover(DiscoverCampaignView {
            id: campaign.id.clone(),
            slug: campaign.slug.clone(),
            title: campaign.campaign_name.clone(),
            description: campaign.headline().unwrap_or(NO_DESCRIPTION).to_string(),
            participants: campaign.task_counter(),
            reward: campaign.total_budget,
            is_joined,
        })
    }

    pub fn id(&self) -> &CampaignId {
        match self {
            CampaignView::Builder(v) => &v.id,
            CampaignView::Discover(v) => &v.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CampaignView::Builder(v) => &v.title,
            CampaignView::Discover(v) => &v.title,
        }
    }

    /// Detail page path
    pub fn href(&self) -> String {
        let slug = match self {
            CampaignView::Builder(v) => &v.slug,
            CampaignView::Discover(v) => &v.slug,
        };
        format!("/campaign/{}", slug)
    }
}

/// Campaign lifecycle as shown to visitors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignStatus {
    Active,
    Inactive,
    Ended,
}

impl CampaignStatus {
    /// An end time in the past wins over the active flag
    pub fn of(campaign: &Campaign, now: DateTime<Utc>) -> Self {
        if campaign.has_ended(now) {
            CampaignStatus::Ended
        } else if campaign.is_active {
            CampaignStatus::Active
        } else {
            CampaignStatus::Inactive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "Active",
            CampaignStatus::Inactive => "Inactive",
            CampaignStatus::Ended => "Ended",
        }
    }
}

/// `0x1234...abcd` for well-formed addresses, the raw text otherwise
fn short_address(raw: &str) -> String {
    WalletAddress::parse(raw).map_or_else(|_| raw.to_string(), |a| a.short())
}

/// Campaign page contents
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CampaignDetailView {
    pub id: CampaignId,
    pub title: String,
    pub description: String,
    pub factory: String,
    /// Shortened wallet, a user name, or "Unknown"
    pub owner: String,
    pub dapp_link: String,
    pub total_budget: Decimal,
    pub remaining_budget: Decimal,
    pub current_amount: Decimal,
    pub target_amount: Decimal,
    pub backers: u32,
    /// `March 5, 2025`, or "N/A" when the timestamp is out of range
    pub end_date: String,
    pub status: CampaignStatus,
    pub task_count: u32,
    /// Percent, one decimal place
    pub progress: Decimal,
    pub tasks: Vec<Task>,
}

impl CampaignDetailView {
    pub fn new(campaign: &Campaign, now: DateTime<Utc>) -> Self {
        let owner = match campaign.owner.trim() {
            "" => "Unknown".to_string(),
            owner => short_address(owner),
        };

        Self {
            id: campaign.id.clone(),
            title: campaign.campaign_name.clone(),
            description: campaign.description.clone(),
            factory: short_address(&campaign.factory),
            owner,
            dapp_link: campaign.dapp_link.clone(),
            total_budget: campaign.total_budget,
            remaining_budget: campaign.remaining_budget(),
            current_amount: campaign.current_amount,
            target_amount: campaign.target_amount,
            backers: campaign.backers,
            end_date: campaign
                .ends_at()
                .map_or_else(|| "N/A".to_string(), |end| end.format("%B %-d, %Y").to_string()),
            status: CampaignStatus::of(campaign, now),
            task_count: campaign.task_counter(),
            progress: campaign.progress_percent().round_dp(1),
            tasks: campaign.tasks().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_campaigns;
    use chrono::Utc;

    #[test]
    fn test_discover_card() {
        let seeds = seed_campaigns(Utc::now());
        let view = CampaignView::discover(&seeds[0], true);
        let CampaignView::Discover(card) = &view else {
            panic!("expected discover card");
        };
        assert_eq!(card.description, "Explore all features and report any bugs.");
        assert!(card.is_joined);
        assert_eq!(view.href(), "/campaign/launch-analytics-dashboard-1");
    }

    #[test]
    fn test_detail_view() {
        let now = Utc::now();
        let mut campaign = seed_campaigns(now).remove(0);
        campaign.owner = "0x00000000000000000000000000000000000A11CE".into();
        campaign.backers = 12;

        let detail = CampaignDetailView::new(&campaign, now);
        assert_eq!(detail.owner, "0x0000...11ce");
        assert_eq!(detail.factory, "0x123abc...");
        assert_eq!(detail.backers, 12);
        assert_eq!(detail.target_amount, campaign.total_budget);
        assert_eq!(
            detail.current_amount,
            campaign.total_budget - campaign.remaining_budget()
        );
        assert_eq!(detail.status, CampaignStatus::Active);
        assert_eq!(detail.tasks.len(), 3);
        assert!(detail.tasks.iter().all(|t| !t.completed));
    }

    #[test]
    fn test_detail_status_and_owner_fallbacks() {
        let now = Utc::now();
        let mut campaign = seed_campaigns(now).remove(1);
        campaign.owner.clear();
        campaign.campaign_end_time = now.timestamp() - 60;
        let detail = CampaignDetailView::new(&campaign, now);
        assert_eq!(detail.owner, "Unknown");
        assert_eq!(detail.status.label(), "Ended");

        campaign.campaign_end_time = i64::MAX;
        assert_eq!(CampaignDetailView::new(&campaign, now).end_date, "N/A");
    }

    #[test]
    fn test_builder_card_falls_back() {
        let mut campaign = seed_campaigns(Utc::now()).remove(2);
        campaign.description.clear();
        let CampaignView::Builder(card) = CampaignView::builder(&campaign) else {
            panic!("expected builder card");
        };
        assert_eq!(card.description, "Evaluate the new color scheme for accessibility.");
        assert!(!card.is_active);
    }
}
