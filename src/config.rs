//! CRM configuration and user preferences.

use crate::error::Result;
use crate::format::Currency;
use crate::pipeline::Stage;
use crate::store::Latency;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CRM configuration.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrmConfig {
    /// Simulated round-trip delay for each service call.
    pub latency: Latency,

    /// Whether to load the built-in fixtures at startup.
    pub seed_fixtures: bool,

    /// How many open deals the dashboard lists.
    pub upcoming_deals_limit: usize,

    /// How many activities the dashboard lists.
    pub recent_activities_limit: usize,

    /// Buffer size for event subscriptions.
    pub event_buffer_size: usize,

    pub preferences: Preferences,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            latency: Latency::default(),
            seed_fixtures: true,
            upcoming_deals_limit: 5,
            recent_activities_limit: 5,
            event_buffer_size: 256,
            preferences: Preferences::default(),
        }
    }
}

impl CrmConfig {
    /// Empty collections, no latency. The usual starting point for tests.
    pub fn in_memory() -> Self {
        Self {
            latency: Latency::none(),
            seed_fixtures: false,
            ..Default::default()
        }
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }
}

/// Preferences edited on the settings screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub company_name: String,
    pub currency: Currency,
    /// Stage given to new deals that don't name one.
    pub default_deal_stage: Stage,
    pub notifications: NotificationPreferences,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            company_name: "Your Company".to_string(),
            currency: Currency::USD,
            default_deal_stage: Stage::Lead,
            notifications: NotificationPreferences::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub email: bool,
    pub browser: bool,
    /// Notify when deals change stage.
    pub deal_updates: bool,
    pub activity_reminders: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            browser: true,
            deal_updates: true,
            activity_reminders: true,
        }
    }
}
