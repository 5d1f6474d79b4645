//! # Structural Calculations
//!
//! Each calculation follows the pattern:
//!
//! - an immutable input (`BeamModel`, JSON-serializable)
//! - a result type (JSON-serializable)
//! - a pure function `solve(input) -> Result<*Result, BeamError>`
//!
//! ## Available Calculations
//!
//! - [`continuous_beam`] - Reactions, moments, shears and deflections of a
//!   multi-span beam
//! - [`three_moment`] - Support-moment compatibility system used by
//!   `continuous_beam`
//! - [`stiffness`] - Independent direct-stiffness solution for cross-checking

pub mod continuous_beam;
pub mod stiffness;
pub mod three_moment;

// Re-export commonly used types
pub use continuous_beam::{
    solve, solve_with_options, AnalysisOptions, AnalysisResult, DiagramSample, EquilibriumCheck, Extremum,
    SpanDiagram, SpanResult, SupportReaction,
};
pub use stiffness::{cross_check, solve_stiffness, CrossCheck, StiffnessSolution};
