//! Subscription system for live CRM change events.
//!
//! Services publish an event for every create, update and delete, plus a
//! dedicated event when a deal changes stage. Subscribers receive events
//! over bounded channels; a subscriber that falls behind is dropped rather
//! than blocking the service call.
//!
//! # Example
//!
//! ```ignore
//! let handle = crm.subscribe(SubscriptionFilter::stage_changes());
//!
//! crm.move_deal(deal.id, "Qualified").await?;
//!
//! match handle.recv()? {
//!     CrmEvent::StageChanged { to, .. } => println!("Deal moved to {}", to),
//!     other => println!("{:?}", other),
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    CrmEvent, DropReason, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId,
};
