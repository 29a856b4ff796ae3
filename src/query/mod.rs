//! Read-only views over loaded collections.
//!
//! Every function here borrows from its input and returns references in a
//! new order; nothing is cloned or mutated. Sorting is stable throughout.

mod activities;
mod contacts;
mod deals;

pub use activities::{filter_activities, ActivityQuery, ActivitySort};
pub use contacts::{filter_contacts, ContactQuery, ContactSort};
pub use deals::{deals_for_contact, partition_by_stage, PipelineBoard, StageColumn};

use crate::entities::Entity;
use crate::types::RecordId;

/// Find the record with `id`, used to resolve a deal's contact or an
/// activity's contact and deal for display.
pub fn find_by_id<T: Entity>(records: &[T], id: RecordId) -> Option<&T> {
    records.iter().find(|r| r.id() == id)
}

/// Case-insensitive substring test. An empty needle matches everything.
pub(crate) fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Contact, ContactDraft};
    use chrono::Utc;

    #[test]
    fn test_find_by_id() {
        let now = Utc::now();
        let contacts: Vec<Contact> = (1..=3)
            .map(|i| {
                Contact::from_draft(
                    RecordId(i * 2),
                    ContactDraft::new(format!("C{i}"), "c@x.io", "1", "X"),
                    now,
                )
            })
            .collect();

        assert_eq!(find_by_id(&contacts, RecordId(4)).map(|c| c.name.as_str()), Some("C2"));
        assert!(find_by_id(&contacts, RecordId(3)).is_none());
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Acme Corp", "acme"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("Globex", "acme"));
    }
}
