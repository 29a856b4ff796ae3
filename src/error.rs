//! Error types for the CRM core.

use crate::entities::ValidationErrors;
use crate::pipeline::{Stage, StepDirection};
use crate::types::{EntityKind, RecordId};
use thiserror::Error;

/// Main error type for CRM operations.
#[derive(Debug, Error)]
pub enum CrmError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: RecordId },

    #[error("Invalid stage: {0}")]
    InvalidStage(String),

    #[error("Invalid activity type: {0}")]
    InvalidActivityType(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("No {direction} stage from {stage}")]
    NoAdjacentStage {
        stage: Stage,
        direction: StepDirection,
    },

    #[error("Duplicate {kind} identifier: {id}")]
    DuplicateId { kind: EntityKind, id: RecordId },

    #[error("No {kind} identifiers left")]
    IdExhausted { kind: EntityKind },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CrmError {
    pub(crate) fn not_found(kind: EntityKind, id: RecordId) -> Self {
        CrmError::NotFound { kind, id }
    }

    /// True for the `NotFound` variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CrmError::NotFound { .. })
    }
}

impl From<ValidationErrors> for CrmError {
    fn from(errors: ValidationErrors) -> Self {
        CrmError::Validation(errors)
    }
}

impl From<serde_json::Error> for CrmError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_syntax() || e.is_data() || e.is_eof() {
            CrmError::Deserialization(e.to_string())
        } else {
            CrmError::Serialization(e.to_string())
        }
    }
}

impl From<rmp_serde::encode::Error> for CrmError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        CrmError::Serialization(e.to_string())
    }
}

impl From<rmp_serde::decode::Error> for CrmError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        CrmError::Deserialization(e.to_string())
    }
}

/// Result type for CRM operations.
pub type Result<T> = std::result::Result<T, CrmError>;
