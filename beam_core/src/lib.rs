//! # beam_core - Continuous Beam Analysis Engine
//!
//! `beam_core` is the computational heart of Girder. It analyses multi-span
//! continuous beams under distributed and point loads and returns support
//! reactions, bending moment, shear and deflection. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `solve` is a pure function of an immutable model
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Closed Form**: Three-moment equation plus exact span formulas, with an
//!   independent stiffness solution to check against
//!
//! ## Quick Start
//!
//! ```rust
//! use beam_core::benchmark::bridge_benchmark;
//! use beam_core::calculations::solve;
//!
//! // 20 m + 25 m + 20 m bridge, 35 kN/m plus 100 kN at mid-span
//! let model = bridge_benchmark();
//! let result = solve(&model).unwrap();
//!
//! let total: f64 = result.reactions.iter().map(|r| r.force).sum();
//! assert!((total - 2_375_000.0).abs() < 1e-3);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("\"reactions\""));
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Spans, supports and the beam model
//! - [`loads`] - Load definitions
//! - [`section`] - Cross sections and materials (EI, self-weight)
//! - [`calculations`] - Continuous beam solver and stiffness cross-check
//! - [`equations`] - Closed-form beam formulas and the tridiagonal solver
//! - [`benchmark`] - Three-span bridge benchmark
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Model documents and atomic result saves

pub mod benchmark;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod model;
pub mod section;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{solve, solve_with_options, AnalysisOptions, AnalysisResult};
pub use errors::{BeamError, BeamResult};
pub use file_io::{load_model, save_result, ModelDocument};
pub use loads::{Load, LoadCategory};
pub use model::{BeamModel, Span, SupportType};
