//! # Bridge Benchmark
//!
//! Three-span continuous concrete bridge used to compare solvers:
//!
//! ```text
//!        dead 25 kN/m + live 10 kN/m            100 kN
//!   ↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓
//!   ═══════════════════════════════════════════════════════
//!   △          20 m        △         25 m        △   20 m  △
//! ```
//!
//! Rectangular 1.5 m × 2.0 m C30 section. Total applied load 2375 kN.

use crate::errors::{BeamError, BeamResult};
use crate::loads::{Load, LoadCategory};
use crate::model::{BeamModel, Span, SupportType};
use crate::section::{CrossSection, Material};

/// Parameters of the bridge benchmark
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeParameters {
    /// Span lengths, left to right (m)
    pub span_lengths: Vec<f64>,

    /// Cross section shared by all spans
    pub section: CrossSection,

    /// Material shared by all spans
    pub material: Material,

    /// Superimposed dead load (N/m)
    pub dead_load: f64,

    /// Live load (N/m)
    pub live_load: f64,

    /// Concentrated vehicle load (N)
    pub point_load: f64,

    /// Span carrying the vehicle load
    pub point_load_span: usize,

    /// Position of the vehicle load in its span (m); mid-span when `None`
    pub point_load_position: Option<f64>,

    /// Add ρ·A·g as an extra dead load
    pub include_self_weight: bool,
}

impl Default for BridgeParameters {
    fn default() -> Self {
        Self {
            span_lengths: vec![20.0, 25.0, 20.0],
            section: CrossSection::rectangular(1.5, 2.0),
            material: Material::concrete_c30(),
            dead_load: 25_000.0,
            live_load: 10_000.0,
            point_load: 100_000.0,
            point_load_span: 1,
            point_load_position: None,
            include_self_weight: false,
        }
    }
}

impl BridgeParameters {
    /// Self-weight per unit length (N/m), zero unless enabled
    pub fn self_weight(&self) -> f64 {
        if self.include_self_weight {
            self.section.self_weight(&self.material)
        } else {
            0.0
        }
    }

    /// Total length (m)
    pub fn total_length(&self) -> f64 {
        self.span_lengths.iter().sum()
    }

    /// Sum of all loads the model will carry (N)
    pub fn total_design_load(&self) -> f64 {
        (self.dead_load + self.live_load + self.self_weight()) * self.total_length() + self.point_load
    }

    /// Validate parameters that the beam model cannot check itself
    pub fn validate(&self) -> BeamResult<()> {
        self.section.validate()?;
        self.material.validate()?;
        if self.point_load != 0.0 && self.point_load_span >= self.span_lengths.len() {
            return Err(BeamError::invalid_model(
                "point_load_span",
                self.point_load_span.to_string(),
                format!("Bridge has {} spans", self.span_lengths.len()),
            ));
        }
        Ok(())
    }

    /// Validate the parameters and build the pinned continuous beam
    pub fn to_model(&self) -> BeamResult<BeamModel> {
        self.validate()?;
        Ok(self.build_model())
    }

    fn build_model(&self) -> BeamModel {
        let n = self.span_lengths.len();
        let spans = self
            .span_lengths
            .iter()
            .enumerate()
            .map(|(i, &l)| {
                let label = if i == 0 || i + 1 == n { "Side span" } else { "Main span" };
                Span::from_section(l, &self.section, &self.material).with_label(label)
            })
            .collect();

        let mut model = BeamModel::new(spans, vec![SupportType::Pinned; n + 1]);

        for i in 0..n {
            model.loads.push(Load::uniform(i, self.dead_load).with_category(LoadCategory::Dead));
        }
        let self_weight = self.self_weight();
        if self_weight > 0.0 {
            for i in 0..n {
                model.loads.push(Load::uniform(i, self_weight).with_category(LoadCategory::Dead));
            }
        }
        for i in 0..n {
            model.loads.push(Load::uniform(i, self.live_load).with_category(LoadCategory::Live));
        }

        if self.point_load != 0.0 {
            if let Some(&l) = self.span_lengths.get(self.point_load_span) {
                let position = self.point_load_position.unwrap_or(l / 2.0);
                model.loads.push(
                    Load::point(self.point_load_span, self.point_load, position)
                        .with_category(LoadCategory::Vehicle),
                );
            }
        }

        model
    }
}

/// The default bridge benchmark model
///
/// The default parameters always validate, so no check is repeated here.
pub fn bridge_benchmark() -> BeamModel {
    BridgeParameters::default().build_model()
}
