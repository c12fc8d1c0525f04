//! Lifestyle questionnaire intake, heuristic risk scoring, and per-session
//! factor weighting.
//!
//! The pipeline runs leaf-first: [`workflows::intake`] turns heterogeneous
//! answers into a typed record, [`workflows::assessment`] derives factors, a
//! risk level, and advice, and [`workflows::personalization`] folds user
//! feedback into per-factor weights. [`workflows::profiles`] wires the stages
//! to a store, a notes generator, and an HTTP router.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
