//! Contact service.

use super::{RecordService, ServiceCore};
use crate::entities::{Contact, ContactDraft, ContactPatch};
use crate::error::Result;
use crate::store::Latency;
use crate::subscriptions::SubscriptionManager;
use crate::types::RecordId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct ContactService {
    core: ServiceCore<Contact>,
}

impl ContactService {
    pub fn new(
        records: Vec<Contact>,
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

    /// Synchronous existence check, no latency.
    pub fn contains(&self, id: RecordId) -> bool {
        self.core.store().contains(id)
    }

    /// Move the contact's last-activity stamp forward to `at`.
    ///
    /// An older `at` leaves the stamp alone.
    pub async fn touch(&self, id: RecordId, at: DateTime<Utc>) -> Result<Contact> {
        let (contact, _) = self
            .core
            .update_with(id, |contact| {
                if contact.last_activity.map_or(true, |last| at > last) {
                    contact.last_activity = Some(at);
                }
                Ok(())
            })
            .await?;
        Ok(contact)
    }

    pub(crate) fn replace_all(&self, records: Vec<Contact>) -> Result<()> {
        self.core.store().replace_all(records)
    }
}

#[async_trait]
impl RecordService for ContactService {
    type Record = Contact;
    type Draft = ContactDraft;
    type Patch = ContactPatch;

    async fn get_all(&self) -> Result<Vec<Contact>> {
        Ok(self.core.get_all().await)
    }

    async fn get_by_id(&self, id: RecordId) -> Result<Contact> {
        self.core.get_by_id(id).await
    }

    async fn create(&self, draft: ContactDraft) -> Result<Contact> {
        let now = Utc::now();
        self.core
            .create_with(move |id| Contact::from_draft(id, draft, now))
            .await
    }

    async fn update(&self, id: RecordId, patch: ContactPatch) -> Result<Contact> {
        let (contact, _) = self
            .core
            .update_with(id, move |contact| {
                contact.apply(patch);
                Ok(())
            })
            .await?;
        Ok(contact)
    }

    async fn delete(&self, id: RecordId) -> Result<()> {
        self.core.delete(id).await
    }
}
