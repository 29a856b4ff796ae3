//! Subscription types for CRM change events.

use crate::config::NotificationPreferences;
use crate::pipeline::Stage;
use crate::types::{EntityKind, RecordId};
use serde::{Deserialize, Serialize};

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered events before dropping subscriber.
    /// Default: 256
    pub buffer_size: usize,

    /// Filter criteria.
    pub filter: SubscriptionFilter,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: 256,
            filter: SubscriptionFilter::all(),
        }
    }
}

impl SubscriptionConfig {
    pub fn with_filter(filter: SubscriptionFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }
}

/// Filter criteria for subscriptions.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionFilter {
    /// Restrict to these entity kinds (None = all kinds).
    pub kinds: Option<Vec<EntityKind>>,

    /// Include created/updated/deleted events.
    pub include_record_events: bool,

    /// Include deal stage changes.
    pub include_stage_changes: bool,
}

impl SubscriptionFilter {
    /// Created/updated/deleted events for every kind.
    pub fn records() -> Self {
        Self {
            include_record_events: true,
            ..Default::default()
        }
    }

    /// Created/updated/deleted events for specific kinds.
    pub fn kinds(kinds: Vec<EntityKind>) -> Self {
        Self {
            kinds: Some(kinds),
            include_record_events: true,
            ..Default::default()
        }
    }

    /// Deal stage changes only.
    pub fn stage_changes() -> Self {
        Self {
            include_stage_changes: true,
            ..Default::default()
        }
    }

    /// Everything.
    pub fn all() -> Self {
        Self {
            include_record_events: true,
            include_stage_changes: true,
            ..Default::default()
        }
    }

    /// Record events always; stage changes only with deal-update
    /// notifications switched on.
    pub fn from_preferences(preferences: &NotificationPreferences) -> Self {
        Self {
            include_record_events: true,
            include_stage_changes: preferences.deal_updates,
            ..Default::default()
        }
    }

    pub(crate) fn matches(&self, event: &CrmEvent) -> bool {
        let kind_ok = |kind: EntityKind| match &self.kinds {
            Some(kinds) => kinds.contains(&kind),
            None => true,
        };

        match event {
            CrmEvent::Created { kind, .. }
            | CrmEvent::Updated { kind, .. }
            | CrmEvent::Deleted { kind, .. } => self.include_record_events && kind_ok(*kind),
            CrmEvent::StageChanged { .. } => {
                self.include_stage_changes && kind_ok(EntityKind::Deal)
            }
            CrmEvent::Dropped { .. } => true,
        }
    }
}

/// Events emitted by subscriptions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CrmEvent {
    /// A record was created.
    Created {
        kind: EntityKind,
        id: RecordId,
        /// Display field of the new record.
        label: String,
    },

    /// A record was updated.
    Updated { kind: EntityKind, id: RecordId },

    /// A record was deleted.
    Deleted { kind: EntityKind, id: RecordId },

    /// A deal entered a different stage.
    StageChanged {
        deal: RecordId,
        from: Stage,
        to: Stage,
        probability: u8,
    },

    /// Subscription was dropped.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to manage a subscription.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<CrmEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<CrmEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<CrmEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<CrmEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything currently buffered, without blocking.
    pub fn drain(&self) -> Vec<CrmEvent> {
        self.receiver.try_iter().collect()
    }
}
