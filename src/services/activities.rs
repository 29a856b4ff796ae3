//! Activity service.

use super::{RecordService, ServiceCore};
use crate::entities::{Activity, ActivityDraft, ActivityPatch};
use crate::error::Result;
use crate::store::Latency;
use crate::subscriptions::SubscriptionManager;
use crate::types::RecordId;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

pub struct ActivityService {
    core: ServiceCore<Activity>,
}

impl ActivityService {
    pub fn new(
        records: Vec<Activity>,
        latency: Latency,
        events: Arc<SubscriptionManager>,
    ) -> Result<Self> {
        Ok(Self {
            core: ServiceCore::new(records, latency, events)?,
        })
    }

    /// Empty service without latency and with its own event hub.
    pub fn in_memory() -> Self {
        Self {
            core: ServiceCore::detached(),
        }
    }

    pub fn events(&self) -> &Arc<SubscriptionManager> {
        self.core.events()
    }

    pub fn len(&self) -> usize {
        self.core.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.store().is_empty()
    }

    pub(crate) fn replace_all(&self, records: Vec<Activity>) -> Result<()> {
        self.core.store().replace_all(records)
    }
}

#[async_trait]
impl RecordService for ActivityService {
    type Record = Activity;
    type Draft = ActivityDraft;
    type Patch = ActivityPatch;

    /// Newest first; activities with equal timestamps keep stored order.
    async fn get_all(&self) -> Result<Vec<Activity>> {
        let mut activities = self.core.get_all().await;
        activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(activities)
    }

    async fn get_by_id(&self, id: RecordId) -> Result<Activity> {
        self.core.get_by_id(id).await
    }

    async fn create(&self, draft: ActivityDraft) -> Result<Activity> {
        let now = Utc::now();
        self.core
            .create_with(move |id| Activity::from_draft(id, draft, now))
            .await
    }

    async fn update(&self, id: RecordId, patch: ActivityPatch) -> Result<Activity> {
        let (activity, _) = self
            .core
            .update_with(id, move |activity| {
                activity.apply(patch);
                Ok(())
            })
            .await?;
        Ok(activity)
    }

    async fn delete(&self, id: RecordId) -> Result<()> {
        self.core.delete(id).await
    }
}
