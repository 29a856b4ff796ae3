//! Deal service and pipeline moves.

use super::{RecordService, ServiceCore};
use crate::entities::{Deal, DealDraft, DealPatch};
use crate::error::{CrmError, Result};
use crate::pipeline::{Stage, StageChange, StepDirection};
use crate::store::Latency;
use crate::subscriptions::SubscriptionManager;
use crate::types::RecordId;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

pub struct DealService {
    core: ServiceCore<Deal>,
    /// Stage for drafts that don't name one.
    default_stage: Stage,
}

impl DealService {
    pub fn new(
        records: Vec<Deal>,
        latency: Latency,
        events: Arc<SubscriptionManager>,
        default_stage: Stage,
    ) -> Result<Self> {
        Ok(Self {
            core: ServiceCore::new(records, latency, events)?,
            default_stage,
        })
    }

    /// Empty service without latency and with its own event hub.
    pub fn in_memory() -> Self {
        Self {
            core: ServiceCore::detached(),
            default_stage: Stage::Lead,
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

    /// Synchronous existence check, no latency.
    pub fn contains(&self, id: RecordId) -> bool {
        self.core.store().contains(id)
    }

    pub fn default_stage(&self) -> Stage {
        self.default_stage
    }

    /// Move a deal to `stage`.
    ///
    /// Without `probability` the deal takes the stage's default
    /// probability; moving to the current stage changes nothing.
    pub async fn change_stage(
        &self,
        id: RecordId,
        stage: Stage,
        probability: Option<u8>,
    ) -> Result<Deal> {
        let patch = DealPatch {
            stage: Some(stage),
            probability,
            ..Default::default()
        };
        self.update(id, patch).await
    }

    /// Like [`change_stage`](Self::change_stage), parsing the stage name.
    pub async fn change_stage_named(
        &self,
        id: RecordId,
        stage: &str,
        probability: Option<u8>,
    ) -> Result<Deal> {
        let stage: Stage = stage.parse()?;
        self.change_stage(id, stage, probability).await
    }

    /// Move a deal one stage forward along the chain.
    pub async fn advance(&self, id: RecordId) -> Result<Deal> {
        self.step(id, StepDirection::Forward).await
    }

    /// Move a deal one stage back along the chain.
    pub async fn retreat(&self, id: RecordId) -> Result<Deal> {
        self.step(id, StepDirection::Backward).await
    }

    async fn step(&self, id: RecordId, direction: StepDirection) -> Result<Deal> {
        let (deal, change) = self
            .core
            .update_with(id, move |deal| match direction.step(deal.stage) {
                Some(to) => Ok(deal.apply(DealPatch::stage(to))),
                None => Err(CrmError::NoAdjacentStage {
                    stage: deal.stage,
                    direction,
                }),
            })
            .await?;

        if let Some(change) = change {
            self.publish_stage_change(id, change);
        }
        Ok(deal)
    }

    fn publish_stage_change(&self, id: RecordId, change: StageChange) {
        debug!(id = %id, from = %change.from, to = %change.to, "deal stage changed");
        self.core.events().broadcast_stage_change(id, change);
    }

    pub(crate) fn replace_all(&self, records: Vec<Deal>) -> Result<()> {
        self.core.store().replace_all(records)
    }
}

#[async_trait]
impl RecordService for DealService {
    type Record = Deal;
    type Draft = DealDraft;
    type Patch = DealPatch;

    async fn get_all(&self) -> Result<Vec<Deal>> {
        Ok(self.core.get_all().await)
    }

    async fn get_by_id(&self, id: RecordId) -> Result<Deal> {
        self.core.get_by_id(id).await
    }

    async fn create(&self, draft: DealDraft) -> Result<Deal> {
        let now = Utc::now();
        let default_stage = self.default_stage;
        self.core
            .create_with(move |id| Deal::from_draft(id, draft, default_stage, now))
            .await
    }

    async fn update(&self, id: RecordId, patch: DealPatch) -> Result<Deal> {
        let (deal, change) = self
            .core
            .update_with(id, move |deal| Ok(deal.apply(patch)))
            .await?;

        if let Some(change) = change {
            self.publish_stage_change(id, change);
        }
        Ok(deal)
    }

    async fn delete(&self, id: RecordId) -> Result<()> {
        self.core.delete(id).await
    }
}
