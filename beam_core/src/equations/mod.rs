//! # Beam Equations
//!
//! The closed-form structural mechanics used by the solver, kept in one place
//! so each formula can be checked against a handbook on its own.
//!
//! ## Modules
//!
//! - [`beam`] - Simply-supported span formulas (reactions, moment, shear,
//!   deflection, static moments of the moment diagram, end-moment effects)
//! - [`tridiagonal`] - Thomas algorithm for the three-moment system
//!
//! ## Sign Conventions
//!
//! - **Loads**: Positive downward (gravity direction)
//! - **Moment**: Positive causes tension on bottom fiber (sagging)
//! - **Shear**: V = dM/dx
//! - **Deflection**: Positive downward
//! - **Reactions**: Positive upward (resisting gravity)
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition
//! - Timoshenko & Young, Theory of Structures (Clapeyron's equation)

pub mod beam;
pub mod tridiagonal;

// Re-export commonly used items
pub use beam::{
    // Point load
    point_load_reactions,
    point_load_shear,
    point_load_moment,
    point_load_deflection,
    // Distributed load
    distributed_load_reactions,
    distributed_load_shear,
    distributed_load_moment,
    distributed_load_deflection,
    // End moments
    end_moment_moment,
    end_moment_deflection,
    end_moment_slopes,
    // Span load dispatch
    simple_reactions,
    simple_moment,
    simple_shear,
    simple_deflection,
    simple_end_slopes,
    static_moment_about_left,
    static_moment_about_right,
};

pub use tridiagonal::solve_tridiagonal;
