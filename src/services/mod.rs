//! Record services: the CRUD contract over each entity store.
//!
//! Every call first awaits the configured latency, then touches the store
//! and publishes a change event. Returned records are always copies.

mod activities;
mod contacts;
mod deals;

pub use activities::ActivityService;
pub use contacts::ContactService;
pub use deals::DealService;

use crate::entities::Entity;
use crate::error::{CrmError, Result};
use crate::store::{EntityStore, Latency};
use crate::subscriptions::SubscriptionManager;
use crate::types::RecordId;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// CRUD contract shared by the contact, deal and activity services.
#[async_trait]
pub trait RecordService: Send + Sync {
    type Record: Entity;
    type Draft: Send + 'static;
    type Patch: Send + 'static;

    /// Copies of all records. An empty collection is not an error.
    async fn get_all(&self) -> Result<Vec<Self::Record>>;

    /// Copy of one record, or `NotFound`.
    async fn get_by_id(&self, id: RecordId) -> Result<Self::Record>;

    /// Store a new record under a freshly assigned identifier.
    async fn create(&self, draft: Self::Draft) -> Result<Self::Record>;

    /// Merge `patch` over an existing record. The identifier never changes.
    async fn update(&self, id: RecordId, patch: Self::Patch) -> Result<Self::Record>;

    /// Remove a record, or `NotFound`.
    async fn delete(&self, id: RecordId) -> Result<()>;
}

/// Store, latency and event hub shared by each concrete service.
pub(crate) struct ServiceCore<T> {
    store: EntityStore<T>,
    latency: Latency,
    events: Arc<SubscriptionManager>,
}

impl<T: Entity> ServiceCore<T> {
    pub(crate) fn new(
        records: Vec<T>,
        latency: Latency,
        events: Arc<SubscriptionManager>,
    ) -> Result<Self> {
        Ok(Self {
            store: EntityStore::seeded(records)?,
            latency,
            events,
        })
    }

    /// Empty core without latency and with its own event hub.
    pub(crate) fn detached() -> Self {
        Self {
            store: EntityStore::new(),
            latency: Latency::none(),
            events: Arc::new(SubscriptionManager::new()),
        }
    }

    pub(crate) fn store(&self) -> &EntityStore<T> {
        &self.store
    }

    pub(crate) fn events(&self) -> &Arc<SubscriptionManager> {
        &self.events
    }

    pub(crate) async fn get_all(&self) -> Vec<T> {
        self.latency.wait().await;
        let records = self.store.snapshot();
        debug!(kind = %T::KIND, count = records.len(), "loaded records");
        records
    }

    pub(crate) async fn get_by_id(&self, id: RecordId) -> Result<T> {
        self.latency.wait().await;
        self.store
            .get(id)
            .ok_or_else(|| CrmError::not_found(T::KIND, id))
    }

    pub(crate) async fn create_with<F>(&self, build: F) -> Result<T>
    where
        F: FnOnce(RecordId) -> T + Send,
    {
        self.latency.wait().await;
        let record = self.store.insert_with(build)?;
        debug!(kind = %T::KIND, id = %record.id(), "record created");
        self.events
            .broadcast_created(T::KIND, record.id(), record.label());
        Ok(record)
    }

    /// Run `f` against the stored record.
    ///
    /// When `f` fails nothing is published; `f` must leave the record
    /// untouched on its error path.
    pub(crate) async fn update_with<F, R>(&self, id: RecordId, f: F) -> Result<(T, R)>
    where
        F: FnOnce(&mut T) -> Result<R> + Send,
    {
        self.latency.wait().await;
        let (record, outcome) = self
            .store
            .update_with(id, f)
            .ok_or_else(|| CrmError::not_found(T::KIND, id))?;
        let out = outcome?;

        debug!(kind = %T::KIND, id = %id, "record updated");
        self.events.broadcast_updated(T::KIND, id);
        Ok((record, out))
    }

    pub(crate) async fn delete(&self, id: RecordId) -> Result<()> {
        self.latency.wait().await;
        self.store
            .remove(id)
            .ok_or_else(|| CrmError::not_found(T::KIND, id))?;

        debug!(kind = %T::KIND, id = %id, "record deleted");
        self.events.broadcast_deleted(T::KIND, id);
        Ok(())
    }
}
