//! Shared identifier and entity-kind types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer identifier of a stored record.
///
/// Assigned by the store at creation and never changed afterwards.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u32);

impl RecordId {
    /// The identifier handed out to the first record of an empty store.
    pub const FIRST: RecordId = RecordId(1);

    /// The following identifier, or `None` once `u32::MAX` is reached.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(RecordId)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RecordId {
    fn from(value: u32) -> Self {
        RecordId(value)
    }
}

/// Which collection a record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Contact,
    Deal,
    Activity,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Contact, EntityKind::Deal, EntityKind::Activity];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Contact => "Contact",
            EntityKind::Deal => "Deal",
            EntityKind::Activity => "Activity",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_next() {
        assert_eq!(RecordId::FIRST.next(), Some(RecordId(2)));
        assert_eq!(RecordId(41).next(), Some(RecordId(42)));
        assert_eq!(RecordId(u32::MAX).next(), None);
    }

    #[test]
    fn test_record_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&RecordId(7)).unwrap();
        assert_eq!(json, "7");
        let parsed: RecordId = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, RecordId(12));
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Deal.to_string(), "Deal");
        assert_eq!(serde_json::to_string(&EntityKind::Activity).unwrap(), "\"activity\"");
    }
}
