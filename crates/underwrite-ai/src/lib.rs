//! Quote questionnaire, eligibility scoring, and underwriting derogation advisory.
//!
//! The `quote` workflow drives an adaptive questionnaire over a persisted session and scores
//! eligibility on every answer batch. The `derogation` workflow matches a client situation
//! against the exception catalog and ranks proposals per insurer.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
