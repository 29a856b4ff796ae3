//! Activity log entries.

use super::validation::ValidationErrors;
use super::Entity;
use crate::error::CrmError;
use crate::format::format_duration;
use crate::types::{EntityKind, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of interaction an activity records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[default]
    Call,
    Email,
    Meeting,
    Note,
    Task,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        ActivityType::Call,
        ActivityType::Email,
        ActivityType::Meeting,
        ActivityType::Note,
        ActivityType::Task,
    ];

    /// Stored name, also the key used when sorting by type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Call => "call",
            ActivityType::Email => "email",
            ActivityType::Meeting => "meeting",
            ActivityType::Note => "note",
            ActivityType::Task => "task",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Call => "Phone Call",
            ActivityType::Email => "Email",
            ActivityType::Meeting => "Meeting",
            ActivityType::Note => "Note",
            ActivityType::Task => "Task",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CrmError::InvalidActivityType(s.to_string()))
    }
}

/// A logged interaction with a contact and/or deal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "Id")]
    pub id: RecordId,

    #[serde(rename = "type")]
    pub activity_type: ActivityType,

    pub description: String,

    #[serde(default)]
    pub contact_id: Option<RecordId>,

    #[serde(default)]
    pub deal_id: Option<RecordId>,

    pub timestamp: DateTime<Utc>,

    /// Length in minutes.
    #[serde(default)]
    pub duration: Option<u32>,

    #[serde(default, alias = "Tags")]
    pub tags: Vec<String>,
}

impl Activity {
    /// Build a stored activity; a draft without a timestamp happened `now`.
    pub fn from_draft(id: RecordId, draft: ActivityDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            activity_type: draft.activity_type,
            description: draft.description,
            contact_id: draft.contact_id,
            deal_id: draft.deal_id,
            timestamp: draft.timestamp.unwrap_or(now),
            duration: draft.duration,
            tags: draft.tags,
        }
    }

    pub fn apply(&mut self, patch: ActivityPatch) {
        if let Some(activity_type) = patch.activity_type {
            self.activity_type = activity_type;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(contact_id) = patch.contact_id {
            self.contact_id = Some(contact_id);
        }
        if let Some(deal_id) = patch.deal_id {
            self.deal_id = Some(deal_id);
        }
        if let Some(timestamp) = patch.timestamp {
            self.timestamp = timestamp;
        }
        if let Some(duration) = patch.duration {
            self.duration = Some(duration);
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }

    /// Duration rendered as `45m` / `1h 30m`, if one was recorded.
    pub fn duration_label(&self) -> Option<String> {
        self.duration.and_then(format_duration)
    }
}

impl Entity for Activity {
    const KIND: EntityKind = EntityKind::Activity;

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.description
    }
}

/// Fields supplied when logging an activity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityDraft {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub description: String,
    pub contact_id: Option<RecordId>,
    pub deal_id: Option<RecordId>,
    pub timestamp: Option<DateTime<Utc>>,
    pub duration: Option<u32>,
    pub tags: Vec<String>,
}

impl ActivityDraft {
    pub fn new(activity_type: ActivityType, description: impl Into<String>) -> Self {
        Self {
            activity_type,
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn for_contact(mut self, contact_id: RecordId) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    pub fn for_deal(mut self, deal_id: RecordId) -> Self {
        self.deal_id = Some(deal_id);
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn lasting(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("description", &self.description, "Description is required");
        if self.contact_id.is_none() && self.deal_id.is_none() {
            errors.push("contactId", "Please select either a contact or deal");
        }
        errors.into_result()
    }
}

/// Partial update for an activity. `None` leaves the field unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityPatch {
    #[serde(rename = "type")]
    pub activity_type: Option<ActivityType>,
    pub description: Option<String>,
    pub contact_id: Option<RecordId>,
    pub deal_id: Option<RecordId>,
    pub timestamp: Option<DateTime<Utc>>,
    pub duration: Option<u32>,
    pub tags: Option<Vec<String>>,
}

impl ActivityPatch {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(description) = &self.description {
            errors.require("description", description, "Description is required");
        }
        errors.into_result()
    }
}
