//! # Sections and Materials
//!
//! Cross-section and material definitions that produce the flexural rigidity
//! `EI` and the self-weight of a span.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::section::{CrossSection, Material};
//!
//! let section = CrossSection::rectangular(1.5, 2.0);
//! let concrete = Material::concrete_c30();
//!
//! // I = bh³/12 = 1.5 * 8 / 12 = 1.0 m⁴
//! assert!((section.moment_of_inertia() - 1.0).abs() < 1e-12);
//! assert_eq!(section.flexural_rigidity(&concrete), 30.0e9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{BeamError, BeamResult};

/// Standard gravitational acceleration (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Elastic material with density
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Display name (e.g., "C30 concrete")
    pub name: String,
    /// Young's modulus E (Pa)
    pub elastic_modulus: f64,
    /// Mass density ρ (kg/m³)
    pub density: f64,
}

impl Material {
    /// Create a material
    pub fn new(name: impl Into<String>, elastic_modulus: f64, density: f64) -> Self {
        Self {
            name: name.into(),
            elastic_modulus,
            density,
        }
    }

    /// C30 concrete: E = 30 GPa, ρ = 2400 kg/m³
    pub fn concrete_c30() -> Self {
        Self::new("C30 concrete", 30.0e9, 2400.0)
    }

    /// C40 concrete: E = 32.5 GPa, ρ = 2500 kg/m³
    pub fn concrete_c40() -> Self {
        Self::new("C40 concrete", 32.5e9, 2500.0)
    }

    /// C50 concrete: E = 34.5 GPa, ρ = 2500 kg/m³
    pub fn concrete_c50() -> Self {
        Self::new("C50 concrete", 34.5e9, 2500.0)
    }

    /// Validate material parameters
    pub fn validate(&self) -> BeamResult<()> {
        if !(self.elastic_modulus.is_finite() && self.elastic_modulus > 0.0) {
            return Err(BeamError::invalid_model(
                "material.elastic_modulus",
                self.elastic_modulus.to_string(),
                "Elastic modulus must be positive",
            ));
        }
        if !(self.density.is_finite() && self.density >= 0.0) {
            return Err(BeamError::invalid_model(
                "material.density",
                self.density.to_string(),
                "Density must be non-negative",
            ));
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::concrete_c30()
    }
}

/// Beam cross section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum CrossSection {
    /// Solid rectangle
    Rectangular { width: f64, height: f64 },

    /// Hollow rectangle sharing a centroid with its void
    BoxSection {
        outer_width: f64,
        outer_height: f64,
        inner_width: f64,
        inner_height: f64,
    },
}

impl CrossSection {
    /// Solid rectangle `width` x `height` (m)
    pub fn rectangular(width: f64, height: f64) -> Self {
        CrossSection::Rectangular { width, height }
    }

    /// Hollow box section (m)
    pub fn box_section(outer_width: f64, outer_height: f64, inner_width: f64, inner_height: f64) -> Self {
        CrossSection::BoxSection {
            outer_width,
            outer_height,
            inner_width,
            inner_height,
        }
    }

    /// Cross-sectional area A (m²)
    pub fn area(&self) -> f64 {
        match *self {
            CrossSection::Rectangular { width, height } => width * height,
            CrossSection::BoxSection {
                outer_width,
                outer_height,
                inner_width,
                inner_height,
            } => outer_width * outer_height - inner_width * inner_height,
        }
    }

    /// Second moment of area about the horizontal centroidal axis I (m⁴)
    pub fn moment_of_inertia(&self) -> f64 {
        match *self {
            CrossSection::Rectangular { width, height } => width * height.powi(3) / 12.0,
            CrossSection::BoxSection {
                outer_width,
                outer_height,
                inner_width,
                inner_height,
            } => (outer_width * outer_height.powi(3) - inner_width * inner_height.powi(3)) / 12.0,
        }
    }

    /// Overall depth (m)
    pub fn depth(&self) -> f64 {
        match *self {
            CrossSection::Rectangular { height, .. } => height,
            CrossSection::BoxSection { outer_height, .. } => outer_height,
        }
    }

    /// Elastic section modulus S = I / (h/2) (m³)
    pub fn section_modulus(&self) -> f64 {
        self.moment_of_inertia() / (self.depth() / 2.0)
    }

    /// Flexural rigidity EI (N·m²)
    pub fn flexural_rigidity(&self, material: &Material) -> f64 {
        material.elastic_modulus * self.moment_of_inertia()
    }

    /// Self-weight per unit length ρ·A·g (N/m)
    pub fn self_weight(&self, material: &Material) -> f64 {
        material.density * self.area() * GRAVITY
    }

    /// Validate section dimensions
    pub fn validate(&self) -> BeamResult<()> {
        let positive = |field: &str, v: f64| -> BeamResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(BeamError::invalid_model(
                    format!("section.{}", field),
                    v.to_string(),
                    "Section dimensions must be positive",
                ))
            }
        };

        match *self {
            CrossSection::Rectangular { width, height } => {
                positive("width", width)?;
                positive("height", height)?;
            }
            CrossSection::BoxSection {
                outer_width,
                outer_height,
                inner_width,
                inner_height,
            } => {
                positive("outer_width", outer_width)?;
                positive("outer_height", outer_height)?;
                if inner_width < 0.0 || inner_height < 0.0 {
                    return Err(BeamError::invalid_model(
                        "section.inner",
                        format!("{} x {}", inner_width, inner_height),
                        "Void dimensions must be non-negative",
                    ));
                }
                if inner_width >= outer_width || inner_height >= outer_height {
                    return Err(BeamError::invalid_model(
                        "section.inner",
                        format!("{} x {}", inner_width, inner_height),
                        "Void must fit inside the outer outline",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for CrossSection {
    fn default() -> Self {
        CrossSection::rectangular(1.5, 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangular_properties() {
        let s = CrossSection::rectangular(1.5, 2.0);
        assert!((s.area() - 3.0).abs() < 1e-12);
        assert!((s.moment_of_inertia() - 1.0).abs() < 1e-12);
        assert!((s.section_modulus() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_box_properties() {
        // 1.2 x 0.8 outer, 0.8 x 0.4 void
        let s = CrossSection::box_section(1.2, 0.8, 0.8, 0.4);
        assert!((s.area() - 0.64).abs() < 1e-12);
        // (1.2 * 0.512 - 0.8 * 0.064) / 12 = 0.046933...
        assert!((s.moment_of_inertia() - 0.046_933_333).abs() < 1e-8);
    }

    #[test]
    fn test_self_weight() {
        let s = CrossSection::rectangular(1.5, 2.0);
        let w = s.self_weight(&Material::concrete_c30());
        // 2400 * 3.0 * 9.81
        assert!((w - 70_632.0).abs() < 1e-6);
    }

    #[test]
    fn test_validation() {
        assert!(CrossSection::rectangular(1.0, 0.0).validate().is_err());
        assert!(CrossSection::box_section(1.0, 1.0, 1.2, 0.5).validate().is_err());
        assert!(CrossSection::box_section(1.2, 0.8, 0.8, 0.4).validate().is_ok());
        assert!(Material::new("bad", -1.0, 0.0).validate().is_err());
        assert!(Material::concrete_c50().validate().is_ok());
    }
}
