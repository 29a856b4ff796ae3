//! # Pipeline CRM
//!
//! The data core of a small sales CRM: contacts, deals moving through a
//! sales pipeline, and a log of activities, held in memory behind async
//! record services.
//!
//! ## Core Concepts
//!
//! - **Services**: CRUD over one entity type, with simulated latency
//! - **Pipeline**: Deal stages, transitions and stage probabilities
//! - **Queries**: Search, sort and board partitioning over loaded records
//! - **Metrics**: Dashboard aggregates computed from a snapshot
//! - **Subscriptions**: Change events for every create, update, delete and stage move
//!
//! ## Example
//!
//! ```ignore
//! use pipeline_crm::{ContactDraft, Crm, CrmConfig, DealDraft};
//!
//! let crm = Crm::new(CrmConfig::in_memory())?;
//! let contact = crm
//!     .add_contact(ContactDraft::new("Ana", "ana@acme.io", "555-0100", "Acme"))
//!     .await?;
//!
//! let deal = crm
//!     .add_deal(DealDraft::new("Acme rollout", 12_000.0, contact.id, close_date))
//!     .await?;
//!
//! // Drag onto the "Proposal" column
//! let deal = crm.move_deal(deal.id, "Proposal").await?;
//! assert_eq!(deal.probability, 50);
//!
//! let dashboard = crm.dashboard().await?;
//! ```

pub mod config;
pub mod crm;
pub mod entities;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod metrics;
pub mod pipeline;
pub mod query;
pub mod services;
pub mod snapshot;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use config::{CrmConfig, NotificationPreferences, Preferences};
pub use crm::Crm;
pub use entities::{
    Activity, ActivityDraft, ActivityPatch, ActivityType, Contact, ContactDraft, ContactPatch,
    Deal, DealDraft, DealPatch, Entity, FieldError, ValidationErrors,
};
pub use error::{CrmError, Result};
pub use format::{format_currency, format_duration, Currency};
pub use metrics::{ActivityStats, Dashboard, DealSummary, StageRollup};
pub use pipeline::{plan_transition, Stage, StageChange, StepDirection};
pub use query::{
    deals_for_contact, filter_activities, filter_contacts, find_by_id, partition_by_stage,
    ActivityQuery, ActivitySort, ContactQuery, ContactSort, PipelineBoard, StageColumn,
};
pub use services::{ActivityService, ContactService, DealService, RecordService};
pub use snapshot::{Snapshot, SnapshotFormat};
pub use store::{EntityStore, Latency};
pub use subscriptions::{
    CrmEvent, DropReason, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, SubscriptionManager,
};
pub use types::*;
