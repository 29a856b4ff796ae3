//! In-memory entity storage and simulated latency.

mod entity_store;
mod latency;

pub use entity_store::{ensure_unique, EntityStore};
pub use latency::Latency;
