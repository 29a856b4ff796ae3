//! Deal records.

use super::validation::ValidationErrors;
use super::Entity;
use crate::pipeline::{plan_transition, Stage, StageChange};
use crate::types::{EntityKind, RecordId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A sales opportunity moving through the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(rename = "Id")]
    pub id: RecordId,

    pub title: String,

    /// Monetary value in whole currency units.
    pub value: f64,

    pub stage: Stage,

    /// Owning contact.
    pub contact_id: RecordId,

    /// Win probability in percent (0-100).
    pub probability: u8,

    pub expected_close: NaiveDate,

    #[serde(default, alias = "Tags")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Deal {
    /// Build a stored deal from a draft.
    ///
    /// `default_stage` fills in a draft without a stage; a missing
    /// probability takes the stage's default.
    pub fn from_draft(
        id: RecordId,
        draft: DealDraft,
        default_stage: Stage,
        now: DateTime<Utc>,
    ) -> Self {
        let stage = draft.stage.unwrap_or(default_stage);
        Self {
            id,
            title: draft.title,
            value: draft.value,
            stage,
            contact_id: draft.contact_id,
            probability: draft.probability.unwrap_or_else(|| stage.default_probability()),
            expected_close: draft.expected_close,
            tags: draft.tags,
            created_at: Some(now),
        }
    }

    /// Merge the supplied patch fields over this deal.
    ///
    /// A stage change without an explicit probability resets the
    /// probability to the new stage's default. Returns the stage change,
    /// if one happened.
    pub fn apply(&mut self, patch: DealPatch) -> Option<StageChange> {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(contact_id) = patch.contact_id {
            self.contact_id = contact_id;
        }
        if let Some(expected_close) = patch.expected_close {
            self.expected_close = expected_close;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }

        let change = patch
            .stage
            .and_then(|to| plan_transition(self.stage, to, patch.probability));

        match change {
            Some(change) => {
                self.stage = change.to;
                self.probability = change.probability;
            }
            None => {
                if let Some(probability) = patch.probability {
                    self.probability = probability;
                }
            }
        }

        change
    }

    pub fn is_open(&self) -> bool {
        self.stage.is_open()
    }
}

impl Entity for Deal {
    const KIND: EntityKind = EntityKind::Deal;

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.title
    }
}

/// Fields supplied when creating a deal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealDraft {
    pub title: String,
    pub value: f64,
    #[serde(default)]
    pub stage: Option<Stage>,
    pub contact_id: RecordId,
    #[serde(default)]
    pub probability: Option<u8>,
    pub expected_close: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DealDraft {
    pub fn new(
        title: impl Into<String>,
        value: f64,
        contact_id: RecordId,
        expected_close: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            value,
            stage: None,
            contact_id,
            probability: None,
            expected_close,
            tags: Vec::new(),
        }
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_probability(mut self, probability: u8) -> Self {
        self.probability = Some(probability);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("title", &self.title, "Deal title is required");
        check_value(&mut errors, self.value);
        if let Some(probability) = self.probability {
            check_probability(&mut errors, probability);
        }
        errors.into_result()
    }
}

/// Partial update for a deal. `None` leaves the field unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DealPatch {
    pub title: Option<String>,
    pub value: Option<f64>,
    pub stage: Option<Stage>,
    pub contact_id: Option<RecordId>,
    pub probability: Option<u8>,
    pub expected_close: Option<NaiveDate>,
    pub tags: Option<Vec<String>>,
}

impl DealPatch {
    /// Patch that only moves the deal to `stage`.
    pub fn stage(stage: Stage) -> Self {
        Self {
            stage: Some(stage),
            ..Default::default()
        }
    }

    pub fn with_probability(mut self, probability: u8) -> Self {
        self.probability = Some(probability);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(title) = &self.title {
            errors.require("title", title, "Deal title is required");
        }
        if let Some(value) = self.value {
            check_value(&mut errors, value);
        }
        if let Some(probability) = self.probability {
            check_probability(&mut errors, probability);
        }
        errors.into_result()
    }
}

fn check_value(errors: &mut ValidationErrors, value: f64) {
    if !value.is_finite() || value <= 0.0 {
        errors.push("value", "Deal value must be greater than 0");
    }
}

fn check_probability(errors: &mut ValidationErrors, probability: u8) {
    if probability > 100 {
        errors.push("probability", "Probability must be between 0 and 100");
    }
}
