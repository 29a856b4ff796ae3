//! The CRM facade: the three services behind one handle.
//!
//! `Crm` owns the contact, deal and activity services and the event hub
//! they share. Its `add_*`/`edit_*`/`log_activity` methods are the form
//! boundary: drafts and patches are validated and references checked
//! before the service is called. The services themselves accept anything.

use crate::config::CrmConfig;
use crate::entities::{
    Activity, ActivityDraft, ActivityPatch, Contact, ContactDraft, ContactPatch, Deal, DealDraft,
    DealPatch,
};
use crate::error::{CrmError, Result};
use crate::fixtures;
use crate::metrics::{self, Dashboard};
use crate::query::{deals_for_contact, PipelineBoard};
use crate::services::{ActivityService, ContactService, DealService, RecordService};
use crate::snapshot::Snapshot;
use crate::subscriptions::{
    SubscriptionConfig, SubscriptionFilter, SubscriptionHandle, SubscriptionManager,
};
use crate::types::{EntityKind, RecordId};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Crm {
    config: CrmConfig,
    events: Arc<SubscriptionManager>,
    contacts: ContactService,
    deals: DealService,
    activities: ActivityService,
}

impl Crm {
    /// Build a CRM, seeded with the built-in fixtures when
    /// `config.seed_fixtures` is set.
    pub fn new(config: CrmConfig) -> Result<Self> {
        let snapshot = if config.seed_fixtures {
            fixtures::builtin()?
        } else {
            Snapshot::empty()
        };
        Self::with_snapshot(config, snapshot)
    }

    /// Build a CRM holding the records in `snapshot`.
    pub fn with_snapshot(config: CrmConfig, snapshot: Snapshot) -> Result<Self> {
        snapshot.validate()?;
        let events = Arc::new(SubscriptionManager::new());
        let latency = config.latency;

        let contacts = ContactService::new(snapshot.contacts, latency, Arc::clone(&events))?;
        let deals = DealService::new(
            snapshot.deals,
            latency,
            Arc::clone(&events),
            config.preferences.default_deal_stage,
        )?;
        let activities = ActivityService::new(snapshot.activities, latency, Arc::clone(&events))?;

        info!(
            contacts = contacts.len(),
            deals = deals.len(),
            activities = activities.len(),
            "crm initialized"
        );

        Ok(Self {
            config,
            events,
            contacts,
            deals,
            activities,
        })
    }

    pub fn config(&self) -> &CrmConfig {
        &self.config
    }

    pub fn contacts(&self) -> &ContactService {
        &self.contacts
    }

    pub fn deals(&self) -> &DealService {
        &self.deals
    }

    pub fn activities(&self) -> &ActivityService {
        &self.activities
    }

    pub fn events(&self) -> &Arc<SubscriptionManager> {
        &self.events
    }

    /// Subscribe to change events, buffered per `config.event_buffer_size`.
    pub fn subscribe(&self, filter: SubscriptionFilter) -> SubscriptionHandle {
        self.events.subscribe(SubscriptionConfig {
            buffer_size: self.config.event_buffer_size,
            filter,
        })
    }

    /// Subscribe with the filter implied by the notification preferences.
    pub fn subscribe_notifications(&self) -> SubscriptionHandle {
        self.subscribe(SubscriptionFilter::from_preferences(
            &self.config.preferences.notifications,
        ))
    }

    /// Load all three collections concurrently.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (contacts, deals, activities) = tokio::try_join!(
            self.contacts.get_all(),
            self.deals.get_all(),
            self.activities.get_all()
        )?;
        Ok(Snapshot::new(contacts, deals, activities))
    }

    pub async fn dashboard(&self) -> Result<Dashboard> {
        let snapshot = self.snapshot().await?;
        Ok(metrics::dashboard(
            &snapshot.contacts,
            &snapshot.deals,
            &snapshot.activities,
            Utc::now(),
            self.config.upcoming_deals_limit,
            self.config.recent_activities_limit,
        ))
    }

    pub async fn pipeline(&self) -> Result<PipelineBoard> {
        Ok(PipelineBoard::new(self.deals.get_all().await?))
    }

    /// Deals of an existing contact, in stored order.
    pub async fn contact_deals(&self, contact_id: RecordId) -> Result<Vec<Deal>> {
        self.require_contact(contact_id)?;
        let deals = self.deals.get_all().await?;
        Ok(deals_for_contact(&deals, contact_id)
            .into_iter()
            .cloned()
            .collect())
    }

    // --- Form boundary ---

    pub async fn add_contact(&self, draft: ContactDraft) -> Result<Contact> {
        draft.validate()?;
        self.contacts.create(draft).await
    }

    pub async fn edit_contact(&self, id: RecordId, patch: ContactPatch) -> Result<Contact> {
        patch.validate()?;
        self.contacts.update(id, patch).await
    }

    /// Create a deal for an existing contact.
    pub async fn add_deal(&self, draft: DealDraft) -> Result<Deal> {
        draft.validate()?;
        self.require_contact(draft.contact_id)?;
        self.deals.create(draft).await
    }

    pub async fn edit_deal(&self, id: RecordId, patch: DealPatch) -> Result<Deal> {
        patch.validate()?;
        if let Some(contact_id) = patch.contact_id {
            self.require_contact(contact_id)?;
        }
        self.deals.update(id, patch).await
    }

    /// Move a deal to the stage called `stage`, as a drag onto a board
    /// column does.
    pub async fn move_deal(&self, id: RecordId, stage: &str) -> Result<Deal> {
        self.deals.change_stage_named(id, stage, None).await
    }

    /// Record an activity and stamp the related contact's last activity.
    ///
    /// For an activity logged only against a deal, the deal's contact is
    /// stamped.
    pub async fn log_activity(&self, draft: ActivityDraft) -> Result<Activity> {
        draft.validate()?;
        if let Some(contact_id) = draft.contact_id {
            self.require_contact(contact_id)?;
        }
        let deal_contact = match draft.deal_id {
            Some(deal_id) => Some(self.deals.get_by_id(deal_id).await?.contact_id),
            None => None,
        };

        let activity = self.activities.create(draft).await?;
        if let Some(contact_id) = activity.contact_id.or(deal_contact) {
            match self.contacts.touch(contact_id, activity.timestamp).await {
                Ok(_) => {}
                // The deal's contact may have been deleted since.
                Err(e) if e.is_not_found() && activity.contact_id.is_none() => {
                    debug!(contact = %contact_id, "deal contact missing, not stamped");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(activity)
    }

    pub async fn edit_activity(&self, id: RecordId, patch: ActivityPatch) -> Result<Activity> {
        patch.validate()?;
        if let Some(contact_id) = patch.contact_id {
            self.require_contact(contact_id)?;
        }
        if let Some(deal_id) = patch.deal_id {
            if !self.deals.contains(deal_id) {
                return Err(CrmError::not_found(EntityKind::Deal, deal_id));
            }
        }
        self.activities.update(id, patch).await
    }

    fn require_contact(&self, id: RecordId) -> Result<()> {
        if self.contacts.contains(id) {
            Ok(())
        } else {
            Err(CrmError::not_found(EntityKind::Contact, id))
        }
    }

    // --- Snapshots ---

    pub async fn export(&self) -> Result<Snapshot> {
        let snapshot = self.snapshot().await?;
        info!(records = snapshot.record_count(), "exported snapshot");
        Ok(snapshot)
    }

    /// Replace every collection with the snapshot's records.
    ///
    /// A snapshot with duplicate identifiers is rejected before anything
    /// is replaced.
    pub fn import(&self, snapshot: Snapshot) -> Result<()> {
        snapshot.validate()?;
        let records = snapshot.record_count();
        self.contacts.replace_all(snapshot.contacts)?;
        self.deals.replace_all(snapshot.deals)?;
        self.activities.replace_all(snapshot.activities)?;
        info!(records, exported_at = %snapshot.exported_at, "imported snapshot");
        Ok(())
    }

    /// Restore the built-in fixtures.
    pub fn reset(&self) -> Result<()> {
        self.import(fixtures::builtin()?)?;
        info!("reset to built-in fixtures");
        Ok(())
    }
}
