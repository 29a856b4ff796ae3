//! Domain records: contacts, deals and activities.
//!
//! Each record type comes with a draft (fields supplied at creation) and a
//! patch (optional fields for partial updates). Drafts and patches carry
//! their own form-boundary validation; the store never validates.

mod activity;
mod contact;
mod deal;
mod validation;

pub use activity::{Activity, ActivityDraft, ActivityPatch, ActivityType};
pub use contact::{Contact, ContactDraft, ContactPatch};
pub use deal::{Deal, DealDraft, DealPatch};
pub use validation::{is_valid_email, FieldError, ValidationErrors};

use crate::types::{EntityKind, RecordId};

/// A record the entity store can hold.
pub trait Entity: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> RecordId;

    /// Overwrite the identifier. Only the store calls this.
    fn set_id(&mut self, id: RecordId);

    /// Canonical display field (name, title or description).
    fn label(&self) -> &str;
}
