//! Deal pipeline state machine.
//!
//! Stages form a linear forward chain with `Closed Lost` as a side state.
//! Any enumerated stage may be targeted directly; next/previous navigation
//! only walks the chain. Entering a new stage suggests a probability that
//! callers may override.

mod stage;
mod transition;

pub use stage::{Stage, StepDirection};
pub use transition::{plan_transition, StageChange};
