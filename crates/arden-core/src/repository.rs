//! Campaign Repository
//!
//! Read and append operations over the seed campaigns plus whatever the
//! builder created in this browser. Derived views are computed on every
//! call; nothing is cached between reads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{ArdenError, Result};
use crate::model::{Campaign, CampaignId, NewCampaign, Task, TaskDraft};
use crate::store::{keys, KeyValueStore, KeyValueStoreExt};

/// Discover-view filter modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignFilter {
    #[default]
    All,
    /// Created in this browser
    Builder,
    /// Joined (kept alongside `Joined` for the dropdown's wording)
    User,
    Joined,
    Unjoined,
}

impl CampaignFilter {
    pub const OPTIONS: [CampaignFilter; 5] = [
        CampaignFilter::All,
        CampaignFilter::Builder,
        CampaignFilter::User,
        CampaignFilter::Joined,
        CampaignFilter::Unjoined,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CampaignFilter::All => "All",
            CampaignFilter::Builder => "Builder",
            CampaignFilter::User => "User",
            CampaignFilter::Joined => "Joined",
            CampaignFilter::Unjoined => "Unjoined",
        }
    }

    pub fn from_label(s: &str) -> Self {
        Self::OPTIONS
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(s))
            .unwrap_or_default()
    }
}

/// Filter plus free-text search
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CampaignQuery {
    pub filter: CampaignFilter,
    pub search: String,
}

impl CampaignQuery {
    pub fn new(filter: CampaignFilter, search: impl Into<String>) -> Self {
        Self {
            filter,
            search: search.into(),
        }
    }
}

fn decode(record: &Value) -> Option<Campaign> {
    match serde_json::from_value::<Campaign>(record.clone()) {
        Ok(mut campaign) => {
            campaign.normalize();
            Some(campaign)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Skipping unreadable stored campaign");
            None
        }
    }
}

/// Campaign state over an injected store
#[derive(Clone)]
pub struct CampaignRepository {
    store: Arc<dyn KeyValueStore>,
    seeds: Arc<Vec<Campaign>>,
}

impl CampaignRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, seeds: Vec<Campaign>) -> Self {
        Self {
            store,
            seeds: Arc::new(seeds),
        }
    }

    /// Repository seeded with the showcase campaigns
    pub fn with_showcase(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, crate::seed::seed_campaigns(chrono::Utc::now()))
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn seeds(&self) -> &[Campaign] {
        &self.seeds
    }

    /// Campaigns created in this browser, normalized. Unreadable records are
    /// skipped, not dropped from storage.
    pub fn created(&self) -> Vec<Campaign> {
        let records: Vec<Value> = self.store.read(keys::CREATED_CAMPAIGNS, Vec::new());
        records.iter().filter_map(decode).collect()
    }

    /// Stored records for a write. A list that is not JSON refuses the write
    /// instead of being replaced.
    fn created_records(&self) -> Result<Vec<Value>> {
        match self.store.get_raw(keys::CREATED_CAMPAIGNS)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Created campaigns belonging to `owner` (all of them when `None`)
    pub fn builder_campaigns(&self, owner: Option<&str>) -> Vec<Campaign> {
        self.created()
            .into_iter()
            .filter(|c| owner.is_none_or(|o| c.owner.is_empty() || c.owner.eq_ignore_ascii_case(o)))
            .collect()
    }

    /// Seeds then created campaigns. A created campaign replaces a seed with
    /// the same id.
    pub fn all(&self) -> Vec<Campaign> {
        let created = self.created();
        let mut merged: Vec<Campaign> = self
            .seeds
            .iter()
            .filter(|seed| !created.iter().any(|c| c.id == seed.id))
            .cloned()
            .collect();
        merged.extend(created);
        merged
    }

    /// Resolve a route segment (id or slug)
    pub fn find(&self, id_or_slug: &str) -> Result<Campaign> {
        self.all()
            .into_iter()
            .find(|c| c.matches_route(id_or_slug))
            .ok_or_else(|| ArdenError::CampaignNotFound(id_or_slug.to_string()))
    }

    /// Filtered and searched view over [`all`](Self::all)
    pub fn filter(&self, query: &CampaignQuery) -> Vec<Campaign> {
        let joined = self.joined_ids();
        let created_ids: Vec<CampaignId> = self.created().into_iter().map(|c| c.id).collect();
        let needle = query.search.to_lowercase();

        self.all()
            .into_iter()
            .filter(|c| match query.filter {
                CampaignFilter::All => true,
                CampaignFilter::Builder => created_ids.contains(&c.id),
                CampaignFilter::User | CampaignFilter::Joined => joined.contains(&c.id),
                CampaignFilter::Unjoined => !joined.contains(&c.id),
            })
            .filter(|c| {
                needle.is_empty()
                    || c.campaign_name.to_lowercase().contains(&needle)
                    || c.headline().is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Persist a new campaign from the builder form
    pub fn create(&self, new: NewCampaign) -> Result<Campaign> {
        let campaign = Campaign::create(new);
        let mut records = self.created_records()?;
        records.push(serde_json::to_value(&campaign)?);
        self.store.write(keys::CREATED_CAMPAIGNS, &records)?;

        tracing::info!(campaign = %campaign.id, slug = %campaign.slug, "Campaign created");
        Ok(campaign)
    }

    pub fn joined_ids(&self) -> Vec<CampaignId> {
        self.store.read(keys::JOINED_CAMPAIGNS, Vec::new())
    }

    pub fn is_joined(&self, id: &CampaignId) -> bool {
        self.joined_ids().contains(id)
    }

    /// Join a campaign. Returns `false` when it was already joined.
    pub fn join(&self, id: &CampaignId) -> Result<bool> {
        let mut joined = self.joined_ids();
        if joined.contains(id) {
            return Ok(false);
        }
        joined.push(id.clone());
        self.store.write(keys::JOINED_CAMPAIGNS, &joined)?;

        tracing::info!(campaign = %id, "Campaign joined");
        Ok(true)
    }

    /// Leave a campaign. Returns `false` when it was not joined.
    pub fn leave(&self, id: &CampaignId) -> Result<bool> {
        let mut joined = self.joined_ids();
        let before = joined.len();
        joined.retain(|j| j != id);
        if joined.len() == before {
            return Ok(false);
        }
        self.store.write(keys::JOINED_CAMPAIGNS, &joined)?;

        tracing::info!(campaign = %id, "Campaign left");
        Ok(true)
    }

    /// Append a confirmed task to a created campaign. The task list and the
    /// counter are written in one store update.
    pub fn append_task(&self, id: &CampaignId, draft: TaskDraft) -> Result<(Campaign, Task)> {
        let mut records = self.created_records()?;
        let found = records
            .iter_mut()
            .find_map(|record| decode(record).filter(|c| &c.id == id).map(|c| (record, c)));
        let Some((record, mut campaign)) = found else {
            return Err(if self.seeds.iter().any(|s| &s.id == id) {
                ArdenError::NotOwner(id.to_string())
            } else {
                ArdenError::CampaignNotFound(id.to_string())
            });
        };

        let task = campaign.append_task(draft).clone();
        *record = serde_json::to_value(&campaign)?;
        self.store.write(keys::CREATED_CAMPAIGNS, &records)?;

        tracing::info!(campaign = %id, task = task.id, "Task added");
        Ok((campaign, task))
    }

    /// Tasks are immutable once confirmed; always rejected.
    pub fn edit_task(&self, id: &CampaignId, task_id: u32, _draft: TaskDraft) -> Result<Task> {
        self.reject_task_change(id, task_id)
    }

    /// Tasks are immutable once confirmed; always rejected.
    pub fn remove_task(&self, id: &CampaignId, task_id: u32) -> Result<Task> {
        self.reject_task_change(id, task_id)
    }

    fn reject_task_change(&self, id: &CampaignId, task_id: u32) -> Result<Task> {
        let campaign = self.find(id.as_str())?;
        tracing::warn!(campaign = %id, task = task_id, "Rejected change to confirmed task");
        Err(ArdenError::TaskImmutable {
            campaign_id: campaign.id.to_string(),
            task_id,
        })
    }
}
