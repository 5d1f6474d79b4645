//! # Structural Model
//!
//! A continuous beam is an ordered run of spans sitting on supports.
//!
//! ## Notation
//!
//! - N spans creates N+1 nodes (support locations)
//! - Nodes are numbered 0 to N (left to right)
//! - Spans are numbered 0 to N-1 (left to right)
//!
//! ```text
//! Node 0    Node 1    Node 2    Node 3
//!   |--------|---------|---------|
//!    Span 0    Span 1    Span 2
//! ```
//!
//! ## Example
//!
//! ```rust
//! use beam_core::model::{BeamModel, Span, SupportType};
//! use beam_core::loads::Load;
//!
//! // Two-span continuous beam: 12 m + 10 m, pinned at all supports
//! let model = BeamModel::new(
//!     vec![Span::new(12.0, 5.0e8), Span::new(10.0, 5.0e8)],
//!     vec![SupportType::Pinned; 3],
//! )
//! .with_load(Load::uniform(0, 15_000.0))
//! .with_load(Load::uniform(1, 15_000.0));
//!
//! assert!(model.validate().is_ok());
//! assert_eq!(model.node_positions(), vec![0.0, 12.0, 22.0]);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{BeamError, BeamResult};
use crate::loads::{Load, LoadCategory};
use crate::section::{CrossSection, Material};

// =============================================================================
// SUPPORT TYPE
// =============================================================================

/// Support condition at a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SupportType {
    /// Pinned support - restrains vertical displacement, allows rotation
    #[default]
    #[serde(rename = "pin", alias = "pinned", alias = "roller")]
    Pinned,

    /// Fixed support - restrains displacement and rotation
    ///
    /// Only allowed at the ends of the beam.
    Fixed,

    /// Free end - no restraint (cantilever tip)
    ///
    /// Only allowed at the ends of the beam.
    Free,
}

impl SupportType {
    /// Returns true if this support restrains vertical displacement
    pub fn restrains_vertical(&self) -> bool {
        matches!(self, SupportType::Pinned | SupportType::Fixed)
    }

    /// Returns true if this support restrains rotation
    pub fn restrains_rotation(&self) -> bool {
        matches!(self, SupportType::Fixed)
    }

    /// Get display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportType::Pinned => "Pinned",
            SupportType::Fixed => "Fixed",
            SupportType::Free => "Free",
        }
    }
}

impl std::fmt::Display for SupportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// SPAN
// =============================================================================

/// A single span between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Span length (m)
    pub length: f64,

    /// Flexural rigidity EI (N·m²)
    #[serde(rename = "EI", alias = "ei")]
    pub ei: f64,

    /// Optional user label (e.g., "Side span", "Main span")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
}

impl Span {
    /// Create a new span
    pub fn new(length: f64, ei: f64) -> Self {
        Self {
            length,
            ei,
            label: String::new(),
        }
    }

    /// Create a span whose EI comes from a section and material
    pub fn from_section(length: f64, section: &CrossSection, material: &Material) -> Self {
        Self::new(length, section.flexural_rigidity(material))
    }

    /// Create with a label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Flexibility L/EI used by the compatibility equations
    pub fn flexibility(&self) -> f64 {
        self.length / self.ei
    }

    /// Validate span parameters
    pub fn validate(&self) -> BeamResult<()> {
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(BeamError::invalid_model(
                "length",
                self.length.to_string(),
                "Span length must be positive",
            ));
        }
        if !(self.ei.is_finite() && self.ei > 0.0) {
            return Err(BeamError::invalid_model(
                "EI",
                self.ei.to_string(),
                "Flexural rigidity must be positive",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// BEAM MODEL
// =============================================================================

/// Immutable description of a continuous beam: spans, supports and loads
///
/// ## Support Configuration Examples
///
/// - Simply-supported single span: 1 span, `[Pinned, Pinned]`
/// - Three-span bridge: 3 spans, `[Pinned; 4]`
/// - Cantilever: 1 span, `[Fixed, Free]`
/// - Propped cantilever: 1 span, `[Fixed, Pinned]`
/// - Overhang: 2 spans, `[Free, Pinned, Pinned]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BeamModel {
    /// Spans, ordered left to right
    pub spans: Vec<Span>,

    /// Support condition at each node; length must be `spans.len() + 1`
    pub supports: Vec<SupportType>,

    /// Applied loads
    #[serde(default)]
    pub loads: Vec<Load>,
}

impl BeamModel {
    /// Create a model with no loads
    pub fn new(spans: Vec<Span>, supports: Vec<SupportType>) -> Self {
        Self {
            spans,
            supports,
            loads: Vec::new(),
        }
    }

    /// Single simply-supported span
    pub fn simple_span(length: f64, ei: f64) -> Self {
        Self::new(vec![Span::new(length, ei)], vec![SupportType::Pinned; 2])
    }

    /// Cantilever fixed at the left end, free at the right
    pub fn cantilever(length: f64, ei: f64) -> Self {
        Self::new(
            vec![Span::new(length, ei)],
            vec![SupportType::Fixed, SupportType::Free],
        )
    }

    /// Single span fixed at both ends
    pub fn fixed_fixed(length: f64, ei: f64) -> Self {
        Self::new(
            vec![Span::new(length, ei)],
            vec![SupportType::Fixed, SupportType::Fixed],
        )
    }

    /// Continuous beam with constant EI, pinned at every node
    pub fn continuous(lengths: &[f64], ei: f64) -> Self {
        Self::new(
            lengths.iter().map(|&l| Span::new(l, ei)).collect(),
            vec![SupportType::Pinned; lengths.len() + 1],
        )
    }

    /// Add a load
    pub fn with_load(mut self, load: Load) -> Self {
        self.loads.push(load);
        self
    }

    /// Add the same uniform load to every span
    pub fn with_uniform_everywhere(mut self, magnitude: f64, category: LoadCategory) -> Self {
        for i in 0..self.spans.len() {
            self.loads.push(Load::uniform(i, magnitude).with_category(category));
        }
        self
    }

    /// Number of spans
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// Number of nodes (always span_count + 1)
    pub fn node_count(&self) -> usize {
        self.spans.len() + 1
    }

    /// Total length of all spans combined (m)
    pub fn total_length(&self) -> f64 {
        self.spans.iter().map(|s| s.length).sum()
    }

    /// Cumulative position of each node from the left end (m)
    pub fn node_positions(&self) -> Vec<f64> {
        let mut positions = Vec::with_capacity(self.node_count());
        let mut cumulative = 0.0;
        positions.push(cumulative);
        for span in &self.spans {
            cumulative += span.length;
            positions.push(cumulative);
        }
        positions
    }

    /// Loads acting on span `index`
    pub fn loads_on_span(&self, index: usize) -> impl Iterator<Item = &Load> {
        self.loads.iter().filter(move |l| l.span() == index)
    }

    /// Sum of all applied vertical loads (N), positive downward
    pub fn total_applied_load(&self) -> f64 {
        self.loads
            .iter()
            .filter_map(|l| self.spans.get(l.span()).map(|s| l.total(s.length)))
            .sum()
    }

    /// Applied load per category (N)
    pub fn applied_load_by_category(&self) -> Vec<(LoadCategory, f64)> {
        LoadCategory::ALL
            .iter()
            .map(|&category| {
                let total = self
                    .loads
                    .iter()
                    .filter(|l| l.category() == category)
                    .filter_map(|l| self.spans.get(l.span()).map(|s| l.total(s.length)))
                    .sum();
                (category, total)
            })
            .collect()
    }

    /// Number of supports restraining vertical displacement
    pub fn vertical_restraint_count(&self) -> usize {
        self.supports.iter().filter(|s| s.restrains_vertical()).count()
    }

    /// Degree of static indeterminacy
    ///
    /// Reaction components minus the two equilibrium equations of a beam.
    pub fn degree_of_indeterminacy(&self) -> usize {
        let components: usize = self
            .supports
            .iter()
            .map(|s| s.restrains_vertical() as usize + s.restrains_rotation() as usize)
            .sum();
        components.saturating_sub(2)
    }

    /// Check if the structure needs compatibility equations
    pub fn is_indeterminate(&self) -> bool {
        self.degree_of_indeterminacy() > 0
    }

    /// Validate the model
    ///
    /// Rejects mismatched counts, non-positive geometry, unsupported interior
    /// conditions, unstable support sets and loads that do not sit on a
    /// single existing span.
    pub fn validate(&self) -> BeamResult<()> {
        if self.spans.is_empty() {
            return Err(BeamError::invalid_model(
                "spans",
                "empty",
                "At least one span is required",
            ));
        }

        let expected_supports = self.spans.len() + 1;
        if self.supports.len() != expected_supports {
            return Err(BeamError::invalid_model(
                "supports",
                self.supports.len().to_string(),
                format!(
                    "Expected {} supports for {} spans",
                    expected_supports,
                    self.spans.len()
                ),
            ));
        }

        for (i, span) in self.spans.iter().enumerate() {
            if let Err(BeamError::InvalidModel { field, value, reason }) = span.validate() {
                return Err(BeamError::invalid_model(
                    format!("spans[{}].{}", i, field),
                    value,
                    reason,
                ));
            }
        }

        let last = self.supports.len() - 1;
        for (k, support) in self.supports.iter().enumerate() {
            if k != 0 && k != last && *support != SupportType::Pinned {
                return Err(BeamError::invalid_model(
                    format!("supports[{}]", k),
                    support.display_name(),
                    "Interior supports must be pinned",
                ));
            }
        }

        let has_fixed = self.supports.iter().any(|s| s.restrains_rotation());
        if self.vertical_restraint_count() < 2 && !has_fixed {
            return Err(BeamError::invalid_model(
                "supports",
                format!("{} vertical restraint(s)", self.vertical_restraint_count()),
                "Structure is unstable - two vertical supports or a fixed end are required",
            ));
        }

        for (i, load) in self.loads.iter().enumerate() {
            self.validate_load(i, load)?;
        }

        Ok(())
    }

    fn validate_load(&self, index: usize, load: &Load) -> BeamResult<()> {
        let span = self.spans.get(load.span()).ok_or_else(|| {
            BeamError::invalid_model(
                format!("loads[{}].span", index),
                load.span().to_string(),
                format!("Load references a nonexistent span ({} spans)", self.spans.len()),
            )
        })?;

        if !load.magnitude().is_finite() {
            return Err(BeamError::invalid_model(
                format!("loads[{}].magnitude", index),
                load.magnitude().to_string(),
                "Load magnitude must be finite",
            ));
        }

        let inside = |x: f64| x.is_finite() && (0.0..=span.length).contains(&x);
        match *load {
            Load::Uniform { .. } => {}
            Load::Point { position, .. } => {
                if !inside(position) {
                    return Err(BeamError::invalid_model(
                        format!("loads[{}].position", index),
                        position.to_string(),
                        format!("Point load must lie within its span (0 to {})", span.length),
                    ));
                }
            }
            Load::PartialUniform { start, end, .. } => {
                if !inside(start) || !inside(end) {
                    return Err(BeamError::invalid_model(
                        format!("loads[{}]", index),
                        format!("{} to {}", start, end),
                        format!(
                            "Load straddles a span boundary; it must lie within 0 to {}",
                            span.length
                        ),
                    ));
                }
                if start >= end {
                    return Err(BeamError::invalid_model(
                        format!("loads[{}]", index),
                        format!("{} to {}", start, end),
                        "Partial load start must be before its end",
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_type_restraints() {
        assert!(SupportType::Pinned.restrains_vertical());
        assert!(!SupportType::Pinned.restrains_rotation());

        assert!(SupportType::Fixed.restrains_vertical());
        assert!(SupportType::Fixed.restrains_rotation());

        assert!(!SupportType::Free.restrains_vertical());
        assert!(!SupportType::Free.restrains_rotation());
    }

    #[test]
    fn test_support_json() {
        let supports: Vec<SupportType> =
            serde_json::from_str(r#"[{"type": "pin"}, {"type": "fixed"}, {"type": "free"}, {"type": "roller"}]"#)
                .unwrap();
        assert_eq!(
            supports,
            vec![
                SupportType::Pinned,
                SupportType::Fixed,
                SupportType::Free,
                SupportType::Pinned
            ]
        );
        assert_eq!(serde_json::to_string(&SupportType::Pinned).unwrap(), r#"{"type":"pin"}"#);
    }

    #[test]
    fn test_span_json_uses_ei_key() {
        let span: Span = serde_json::from_str(r#"{"length": 20.0, "EI": 3.0e10}"#).unwrap();
        assert_eq!(span, Span::new(20.0, 3.0e10));
        let json = serde_json::to_string(&span).unwrap();
        assert!(json.contains("\"EI\""));
    }

    #[test]
    fn test_geometry_helpers() {
        let model = BeamModel::continuous(&[20.0, 25.0, 20.0], 1.0e10);
        assert_eq!(model.span_count(), 3);
        assert_eq!(model.node_count(), 4);
        assert_eq!(model.total_length(), 65.0);
        assert_eq!(model.node_positions(), vec![0.0, 20.0, 45.0, 65.0]);
        assert_eq!(model.degree_of_indeterminacy(), 2);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_indeterminacy() {
        assert!(!BeamModel::simple_span(10.0, 1.0).is_indeterminate());
        assert!(!BeamModel::cantilever(10.0, 1.0).is_indeterminate());
        assert_eq!(BeamModel::fixed_fixed(10.0, 1.0).degree_of_indeterminacy(), 2);
    }

    #[test]
    fn test_total_applied_load() {
        let model = BeamModel::continuous(&[20.0, 25.0], 1.0)
            .with_uniform_everywhere(10.0, LoadCategory::Dead)
            .with_load(Load::point(1, 100.0, 12.5).with_category(LoadCategory::Vehicle));
        assert_eq!(model.total_applied_load(), 550.0);

        let breakdown = model.applied_load_by_category();
        assert_eq!(breakdown[0], (LoadCategory::Dead, 450.0));
        assert_eq!(breakdown[1], (LoadCategory::Live, 0.0));
        assert_eq!(breakdown[2], (LoadCategory::Vehicle, 100.0));
    }

    #[test]
    fn test_validation_no_spans() {
        let model = BeamModel::new(vec![], vec![SupportType::Pinned]);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validation_wrong_support_count() {
        let model = BeamModel::new(
            vec![Span::new(10.0, 1.0), Span::new(10.0, 1.0)],
            vec![SupportType::Pinned; 2],
        );
        let err = model.validate().unwrap_err();
        assert_eq!(err.field(), Some("supports"));
    }

    #[test]
    fn test_validation_non_positive_geometry() {
        let model = BeamModel::new(
            vec![Span::new(10.0, 1.0), Span::new(8.0, 0.0)],
            vec![SupportType::Pinned; 3],
        );
        assert_eq!(model.validate().unwrap_err().field(), Some("spans[1].EI"));

        let model = BeamModel::simple_span(-2.0, 1.0);
        assert_eq!(model.validate().unwrap_err().field(), Some("spans[0].length"));

        let model = BeamModel::simple_span(f64::NAN, 1.0);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validation_unstable_supports() {
        let pin_free = BeamModel::new(
            vec![Span::new(10.0, 1.0)],
            vec![SupportType::Pinned, SupportType::Free],
        );
        assert!(pin_free.validate().is_err());

        let free_pin_free = BeamModel::new(
            vec![Span::new(3.0, 1.0), Span::new(3.0, 1.0)],
            vec![SupportType::Free, SupportType::Pinned, SupportType::Free],
        );
        assert!(free_pin_free.validate().is_err());

        assert!(BeamModel::cantilever(5.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_validation_interior_support_must_be_pinned() {
        // Stable, but an unsupported interior node is not modelled
        let model = BeamModel::new(
            vec![Span::new(10.0, 1.0), Span::new(10.0, 1.0)],
            vec![SupportType::Pinned, SupportType::Free, SupportType::Pinned],
        );
        assert_eq!(model.vertical_restraint_count(), 2);
        let err = model.validate().unwrap_err();
        assert_eq!(err.field(), Some("supports[1]"));
        assert!(err.to_string().contains("Interior supports must be pinned"), "{}", err);

        let model = BeamModel::new(
            vec![Span::new(10.0, 1.0), Span::new(10.0, 1.0), Span::new(10.0, 1.0)],
            vec![SupportType::Pinned, SupportType::Pinned, SupportType::Fixed, SupportType::Pinned],
        );
        assert_eq!(model.validate().unwrap_err().field(), Some("supports[2]"));
    }

    #[test]
    fn test_validation_loads() {
        let base = BeamModel::continuous(&[10.0, 10.0], 1.0);

        let missing_span = base.clone().with_load(Load::uniform(2, 1.0));
        assert_eq!(missing_span.validate().unwrap_err().field(), Some("loads[0].span"));

        let outside = base.clone().with_load(Load::point(0, 1.0, 12.0));
        assert_eq!(outside.validate().unwrap_err().field(), Some("loads[0].position"));

        let straddling = base.clone().with_load(Load::partial_uniform(0, 1.0, 5.0, 15.0));
        assert_eq!(straddling.validate().unwrap_err().field(), Some("loads[0]"));

        let reversed = base.clone().with_load(Load::partial_uniform(1, 1.0, 6.0, 2.0));
        assert!(reversed.validate().is_err());

        let on_support = base.with_load(Load::point(1, 1.0, 0.0));
        assert!(on_support.validate().is_ok());
    }
}
