//! Contact records.

use super::validation::ValidationErrors;
use super::Entity;
use crate::types::{EntityKind, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person the sales team is in touch with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "Id")]
    pub id: RecordId,

    #[serde(alias = "Name")]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub company: String,

    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub notes: String,

    #[serde(default, alias = "Tags")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

impl Contact {
    /// Build a stored contact from a draft.
    pub fn from_draft(id: RecordId, draft: ContactDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            company: draft.company,
            role: draft.role,
            notes: draft.notes,
            tags: draft.tags,
            created_at: Some(now),
            last_activity: Some(now),
        }
    }

    /// Merge the supplied patch fields over this contact.
    pub fn apply(&mut self, patch: ContactPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(at) = patch.last_activity {
            self.last_activity = Some(at);
        }
    }
}

impl Entity for Contact {
    const KIND: EntityKind = EntityKind::Contact;

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Fields supplied when creating a contact.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub role: String,
    pub notes: String,
    pub tags: Vec<String>,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            company: company.into(),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Name, email, phone and company are required; email must look like one.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.require_email("email", &self.email);
        errors.require("phone", &self.phone, "Phone number is required");
        errors.require("company", &self.company, "Company is required");
        errors.into_result()
    }
}

/// Partial update for a contact. `None` leaves the field unchanged.
///
/// There is no identifier field: an `Id` key in deserialized input is
/// ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactPatch {
    #[serde(alias = "Name")]
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub last_activity: Option<DateTime<Utc>>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        *self == ContactPatch::default()
    }

    /// Supplied required fields must still be non-empty.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            errors.require("name", name, "Name is required");
        }
        if let Some(email) = &self.email {
            errors.require_email("email", email);
        }
        if let Some(phone) = &self.phone {
            errors.require("phone", phone, "Phone number is required");
        }
        if let Some(company) = &self.company {
            errors.require("company", company, "Company is required");
        }
        errors.into_result()
    }
}
