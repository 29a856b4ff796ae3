//! Aggregates for the dashboard and pipeline views.
//!
//! All computations are pure and read-only. Time-dependent figures take
//! `now` explicitly.

mod activities;
mod deals;

pub use activities::{activity_stats, recent_activities, ActivityStats};
pub use deals::{stage_rollup, summarize_deals, upcoming_deals, DealSummary, StageRollup};

use crate::entities::{Activity, Contact, Deal};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the dashboard shows, computed from one loaded snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_contacts: usize,
    pub deals: DealSummary,
    pub stages: Vec<StageRollup>,
    pub activities: ActivityStats,
    pub upcoming_deals: Vec<Deal>,
    pub recent_activities: Vec<Activity>,
    pub generated_at: DateTime<Utc>,
}

pub fn dashboard(
    contacts: &[Contact],
    deals: &[Deal],
    activities: &[Activity],
    now: DateTime<Utc>,
    upcoming_limit: usize,
    recent_limit: usize,
) -> Dashboard {
    Dashboard {
        total_contacts: contacts.len(),
        deals: summarize_deals(deals),
        stages: stage_rollup(deals),
        activities: activity_stats(activities, now),
        upcoming_deals: upcoming_deals(deals, upcoming_limit)
            .into_iter()
            .cloned()
            .collect(),
        recent_activities: recent_activities(activities, recent_limit)
            .into_iter()
            .cloned()
            .collect(),
        generated_at: now,
    }
}
