//! Built-in seed data.

use crate::entities::Entity;
use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::store::ensure_unique;
use serde::de::DeserializeOwned;

const CONTACTS: &str = include_str!("contacts.json");
const DEALS: &str = include_str!("deals.json");
const ACTIVITIES: &str = include_str!("activities.json");

/// Parse a JSON seed array, rejecting duplicate identifiers.
pub fn parse<T>(json: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned + Entity,
{
    let records: Vec<T> = serde_json::from_str(json)?;
    ensure_unique(&records)?;
    Ok(records)
}

/// The seed data bundled with the crate.
pub fn builtin() -> Result<Snapshot> {
    Ok(Snapshot::new(parse(CONTACTS)?, parse(DEALS)?, parse(ACTIVITIES)?))
}
