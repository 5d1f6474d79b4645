//! # Continuous Beam Analysis
//!
//! Multi-span beam analysis with pinned, fixed and free end conditions.
//!
//! ## Analysis Method
//!
//! - Support moments from the three-moment equation (see [`super::three_moment`])
//! - Span response by superposition of the simple-span closed forms with the
//!   linear end-moment diagram
//! - Overhang tips get a rigid-body deflection so the slope is continuous
//!   over the root support
//!
//! ## Notation
//!
//! - N spans creates N+1 nodes (support locations)
//! - Positions `x` inside a span are measured from its left node
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::continuous_beam::solve;
//! use beam_core::loads::{Load, LoadCategory};
//! use beam_core::model::BeamModel;
//!
//! // Two equal spans under uniform load: R = 3/8, 10/8, 3/8 of wL
//! let model = BeamModel::continuous(&[10.0, 10.0], 2.0e8)
//!     .with_uniform_everywhere(1_000.0, LoadCategory::Dead);
//!
//! let result = solve(&model).unwrap();
//! assert!((result.reactions[1].force - 12_500.0).abs() < 1e-6);
//! assert!(result.equilibrium.balanced);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::three_moment::{SpanTerms, ThreeMomentSystem};
use crate::equations::beam::{
    end_moment_deflection, end_moment_moment, end_moment_slopes, simple_deflection, simple_end_slopes,
    simple_moment, simple_reactions, simple_shear,
};
use crate::errors::{BeamError, BeamResult};
use crate::loads::{LoadCategory, SpanLoad};
use crate::model::{BeamModel, SupportType};

/// Tolerance for merging coincident stations along a span (m)
const STATION_TOLERANCE: f64 = 1e-12;

/// Upper bound on diagram intervals per span
pub const MAX_SAMPLES_PER_SPAN: usize = 100_000;

// =============================================================================
// OPTIONS
// =============================================================================

/// Analysis settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Number of equal intervals each span is sampled at for diagrams
    pub samples_per_span: usize,

    /// Relative tolerance for the equilibrium check
    pub equilibrium_tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            samples_per_span: 50,
            equilibrium_tolerance: 1e-6,
        }
    }
}

impl AnalysisOptions {
    /// Override the diagram resolution
    pub fn with_samples(mut self, samples_per_span: usize) -> Self {
        self.samples_per_span = samples_per_span;
        self
    }

    /// Validate settings
    pub fn validate(&self) -> BeamResult<()> {
        if self.samples_per_span == 0 {
            return Err(BeamError::invalid_model(
                "settings.samples_per_span",
                "0",
                "At least one interval per span is required",
            ));
        }
        if self.samples_per_span > MAX_SAMPLES_PER_SPAN {
            return Err(BeamError::invalid_model(
                "settings.samples_per_span",
                self.samples_per_span.to_string(),
                format!("At most {} intervals per span are allowed", MAX_SAMPLES_PER_SPAN),
            ));
        }
        if !(self.equilibrium_tolerance.is_finite() && self.equilibrium_tolerance > 0.0) {
            return Err(BeamError::invalid_model(
                "settings.equilibrium_tolerance",
                self.equilibrium_tolerance.to_string(),
                "Tolerance must be positive",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// Response at one point of a span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramSample {
    /// Position from the span's left node (m)
    pub x: f64,
    /// Bending moment (N·m), sagging positive
    pub moment: f64,
    /// Shear force V = dM/dx (N)
    pub shear: f64,
    /// Deflection (m), positive downward
    pub deflection: f64,
}

/// Sampled diagrams for one span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanDiagram {
    /// Span index
    pub span: usize,
    /// Global position of the span's left node (m)
    pub start: f64,
    /// Samples at equal intervals, both ends included
    pub samples: Vec<DiagramSample>,
}

/// Reaction at a restrained node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportReaction {
    /// Node index
    pub node: usize,
    /// Global position (m)
    pub position: f64,
    /// Support condition
    pub support: SupportType,
    /// Vertical force (N), positive upward
    pub force: f64,
    /// Bending moment in the beam at a fixed support (N·m), sagging positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moment: Option<f64>,
}

/// A located extreme value
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extremum {
    /// Signed value
    pub value: f64,
    /// Span index
    pub span: usize,
    /// Position within the span (m)
    pub x: f64,
}

/// Results for a single span within a continuous beam
///
/// Holds everything needed to evaluate the response anywhere in the span
/// through [`SpanResult::evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanResult {
    /// Span index (0-based)
    pub span_index: usize,

    /// Global position of the left node (m)
    pub start: f64,

    /// Span length (m)
    pub length: f64,

    /// Flexural rigidity (N·m²)
    pub ei: f64,

    /// Left-end moment (N·m) - positive causes tension on bottom
    pub moment_left: f64,

    /// Right-end moment (N·m)
    pub moment_right: f64,

    /// Upward force delivered to the left node (N)
    pub end_force_left: f64,

    /// Upward force delivered to the right node (N)
    pub end_force_right: f64,

    /// Rigid-body deflection of the left node (m); non-zero only at a free tip
    pub offset_left: f64,

    /// Rigid-body deflection of the right node (m); non-zero only at a free tip
    pub offset_right: f64,

    /// Loads in span-local form
    pub loads: Vec<SpanLoad>,

    /// Largest bending moment in the span
    pub max_moment: Extremum,

    /// Smallest (most hogging) bending moment in the span
    pub min_moment: Extremum,

    /// Shear of largest magnitude
    pub max_shear: Extremum,

    /// Deflection of largest magnitude
    pub max_deflection: Extremum,
}

impl SpanResult {
    fn new(span_index: usize, start: f64, terms: &SpanTerms, moment_left: f64, moment_right: f64) -> Self {
        let l = terms.length;
        let (r1, r2) = terms
            .loads
            .iter()
            .map(|load| simple_reactions(load, l))
            .fold((0.0, 0.0), |(a, b), (r1, r2)| (a + r1, b + r2));
        let delta_r = (moment_right - moment_left) / l;

        Self {
            span_index,
            start,
            length: l,
            ei: terms.ei,
            moment_left,
            moment_right,
            end_force_left: r1 + delta_r,
            end_force_right: r2 - delta_r,
            offset_left: 0.0,
            offset_right: 0.0,
            loads: terms.loads.clone(),
            max_moment: Extremum::default(),
            min_moment: Extremum::default(),
            max_shear: Extremum::default(),
            max_deflection: Extremum::default(),
        }
    }

    /// Bending moment at `x` (N·m)
    pub fn moment_at(&self, x: f64) -> f64 {
        let x = self.clamp(x);
        let m0: f64 = self.loads.iter().map(|load| simple_moment(load, self.length, x)).sum();
        m0 + end_moment_moment(self.moment_left, self.moment_right, self.length, x)
    }

    /// Shear at `x` (N)
    ///
    /// At a point load the value just to the right of the load is returned.
    pub fn shear_at(&self, x: f64) -> f64 {
        let x = self.clamp(x);
        let v0: f64 = self.loads.iter().map(|load| simple_shear(load, self.length, x)).sum();
        v0 + (self.moment_right - self.moment_left) / self.length
    }

    /// Deflection at `x` (m), positive downward
    pub fn deflection_at(&self, x: f64) -> f64 {
        let x = self.clamp(x);
        let l = self.length;
        let d0: f64 = self.loads.iter().map(|load| simple_deflection(load, l, self.ei, x)).sum();
        d0 + end_moment_deflection(self.moment_left, self.moment_right, l, self.ei, x)
            + self.offset_left * (1.0 - x / l)
            + self.offset_right * x / l
    }

    /// Slope dδ/dx at the left node
    pub fn slope_left(&self) -> f64 {
        self.end_slopes().0
    }

    /// Slope dδ/dx at the right node
    pub fn slope_right(&self) -> f64 {
        self.end_slopes().1
    }

    fn end_slopes(&self) -> (f64, f64) {
        let l = self.length;
        let (load_a, load_b) = self
            .loads
            .iter()
            .map(|load| simple_end_slopes(load, l, self.ei))
            .fold((0.0, 0.0), |(a, b), (ta, tb)| (a + ta, b + tb));
        let (moment_a, moment_b) = end_moment_slopes(self.moment_left, self.moment_right, l, self.ei);
        let rigid = (self.offset_right - self.offset_left) / l;
        (load_a + moment_a + rigid, load_b + moment_b + rigid)
    }

    /// Moment, shear and deflection at `x`
    pub fn evaluate(&self, x: f64) -> DiagramSample {
        let x = self.clamp(x);
        DiagramSample {
            x,
            moment: self.moment_at(x),
            shear: self.shear_at(x),
            deflection: self.deflection_at(x),
        }
    }

    /// Sample the span at `intervals` equal intervals (`intervals + 1` points)
    pub fn sample(&self, intervals: usize) -> Vec<DiagramSample> {
        let n = intervals.max(1);
        (0..=n)
            .map(|k| self.evaluate(self.length * k as f64 / n as f64))
            .collect()
    }

    fn clamp(&self, x: f64) -> f64 {
        x.clamp(0.0, self.length)
    }

    /// Span ends, point-load positions and partial-load limits, sorted
    ///
    /// Shear is linear between consecutive stations.
    fn stations(&self) -> Vec<f64> {
        let mut stations = vec![0.0, self.length];
        for load in &self.loads {
            match *load {
                SpanLoad::Concentrated { a, .. } => stations.push(a),
                SpanLoad::Distributed { start, end, .. } => {
                    stations.push(start);
                    stations.push(end);
                }
            }
        }
        stations.sort_by(|a, b| a.total_cmp(b));
        stations.dedup_by(|a, b| (*a - *b).abs() <= STATION_TOLERANCE);
        stations
    }

    /// Distributed intensity acting over the whole of `[lo, hi]`
    fn intensity_between(&self, lo: f64, hi: f64) -> f64 {
        self.loads
            .iter()
            .map(|load| match *load {
                SpanLoad::Distributed { w, start, end }
                    if start <= lo + STATION_TOLERANCE && end >= hi - STATION_TOLERANCE =>
                {
                    w
                }
                _ => 0.0,
            })
            .sum()
    }

    fn compute_extrema(&mut self, intervals: usize) {
        let stations = self.stations();
        let mut moment_points = stations.clone();
        let mut shear_points: Vec<(f64, f64)> = Vec::with_capacity(2 * stations.len());

        for pair in stations.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            let q = self.intensity_between(lo, hi);
            let v_lo = self.shear_at(lo);
            let v_hi = v_lo - q * (hi - lo);
            shear_points.push((lo, v_lo));
            shear_points.push((hi, v_hi));

            // Zero shear inside the interval marks a moment peak
            if q != 0.0 && v_lo * v_hi < 0.0 {
                moment_points.push(lo + v_lo / q);
            }
        }

        let span = self.span_index;
        let located = |value: f64, x: f64| Extremum { value, span, x };

        let mut max_moment = located(f64::NEG_INFINITY, 0.0);
        let mut min_moment = located(f64::INFINITY, 0.0);
        for &x in &moment_points {
            let m = self.moment_at(x);
            if m > max_moment.value {
                max_moment = located(m, x);
            }
            if m < min_moment.value {
                min_moment = located(m, x);
            }
        }

        let mut max_shear = located(0.0, 0.0);
        for &(x, v) in &shear_points {
            if v.abs() > max_shear.value.abs() {
                max_shear = located(v, x);
            }
        }

        let mut max_deflection = located(0.0, 0.0);
        let n = intervals.max(1);
        let sample_points = (0..=n).map(|k| self.length * k as f64 / n as f64);
        for x in sample_points.chain(stations.iter().copied()) {
            let d = self.deflection_at(x);
            if d.abs() > max_deflection.value.abs() {
                max_deflection = located(d, x);
            }
        }

        self.max_moment = max_moment;
        self.min_moment = min_moment;
        self.max_shear = max_shear;
        self.max_deflection = max_deflection;
    }
}

/// Applied load in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: LoadCategory,
    /// Resultant (N), positive downward
    pub total: f64,
}

/// Global equilibrium of the solved beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumCheck {
    /// Sum of applied loads (N), positive downward
    pub total_applied: f64,
    /// Sum of support forces (N), positive upward
    pub total_reaction: f64,
    /// |applied - reaction| (N)
    pub absolute_error: f64,
    /// Absolute error over the applied load
    pub relative_error: f64,
    /// Net moment about the left end (N·m), reactions plus loads
    pub moment_residual: f64,
    /// Tolerance the check was made against
    pub tolerance: f64,
    /// Whether force and moment balance within tolerance
    pub balanced: bool,
    /// Applied load per category
    pub by_category: Vec<CategoryTotal>,
}

/// Results from continuous beam analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    // === Per-Node Results ===
    /// Reactions at restrained nodes, left to right
    pub reactions: Vec<SupportReaction>,

    /// Bending moment at each node (N·m)
    pub support_moments: Vec<f64>,

    /// Slope dδ/dx at each node
    pub rotations: Vec<f64>,

    /// Deflection at each node (m); non-zero only at free tips
    pub node_deflections: Vec<f64>,

    // === Per-Span Results ===
    pub span_results: Vec<SpanResult>,

    /// Sampled diagrams
    pub diagrams: Vec<SpanDiagram>,

    // === Global Extrema ===
    /// Largest sagging moment
    pub max_positive_moment: Extremum,

    /// Most hogging moment
    pub max_negative_moment: Extremum,

    /// Shear of largest magnitude
    pub max_shear: Extremum,

    /// Deflection of largest magnitude
    pub max_deflection: Extremum,

    // === Checks ===
    pub equilibrium: EquilibriumCheck,

    /// Number of compatibility equations that were solved
    pub degree_of_indeterminacy: usize,
}

impl AnalysisResult {
    /// Reaction at `node`, if it is restrained
    pub fn reaction_at(&self, node: usize) -> Option<&SupportReaction> {
        self.reactions.iter().find(|r| r.node == node)
    }

    /// Sum of vertical reactions (N)
    pub fn total_reaction(&self) -> f64 {
        self.reactions.iter().map(|r| r.force).sum()
    }

    /// Evaluate the response at a global position along the beam
    ///
    /// At a node the span to its right is used; positions past either end
    /// are clamped to the beam.
    pub fn evaluate_at(&self, position: f64) -> Option<DiagramSample> {
        let span = self
            .span_results
            .iter()
            .find(|s| position < s.start + s.length)
            .or_else(|| self.span_results.last())?;
        Some(span.evaluate(position - span.start))
    }
}

// =============================================================================
// CALCULATION FUNCTIONS
// =============================================================================

/// Solve a continuous beam with default options
pub fn solve(model: &BeamModel) -> BeamResult<AnalysisResult> {
    solve_with_options(model, &AnalysisOptions::default())
}

/// Solve a continuous beam
///
/// # Arguments
///
/// * `model` - Spans, supports and loads
/// * `options` - Diagram resolution and equilibrium tolerance
///
/// # Returns
///
/// * `Ok(AnalysisResult)` - Reactions, moments, diagrams and checks
/// * `Err(BeamError::InvalidModel)` - If the model fails validation
/// * `Err(BeamError::NumericalDegeneracy)` - If the moment system is singular
pub fn solve_with_options(model: &BeamModel, options: &AnalysisOptions) -> BeamResult<AnalysisResult> {
    model.validate()?;
    options.validate()?;

    let system = ThreeMomentSystem::from_model(model);
    let moments = system.solve()?;
    if let Some((node, m)) = moments.iter().enumerate().find(|(_, m)| !m.is_finite()) {
        return Err(BeamError::numerical_degeneracy(format!("node {}", node), *m));
    }

    let n_spans = model.span_count();
    let node_positions = model.node_positions();

    let mut span_results: Vec<SpanResult> = system
        .spans()
        .iter()
        .enumerate()
        .map(|(i, terms)| SpanResult::new(i, node_positions[i], terms, moments[i], moments[i + 1]))
        .collect();

    apply_overhang_offsets(&model.supports, &mut span_results);

    for span in &mut span_results {
        span.compute_extrema(options.samples_per_span);
    }

    // Node results
    let mut reactions = Vec::new();
    let mut rotations = Vec::with_capacity(n_spans + 1);
    let mut node_deflections = Vec::with_capacity(n_spans + 1);
    for (node, support) in model.supports.iter().enumerate() {
        let left = node.checked_sub(1).map(|i| &span_results[i]);
        let right = span_results.get(node);

        rotations.push(match (left, right) {
            (_, Some(span)) => span.slope_left(),
            (Some(span), None) => span.slope_right(),
            (None, None) => 0.0,
        });
        node_deflections.push(match (left, right) {
            (_, Some(span)) => span.offset_left,
            (Some(span), None) => span.offset_right,
            (None, None) => 0.0,
        });

        if support.restrains_vertical() {
            let force = left.map_or(0.0, |s| s.end_force_right) + right.map_or(0.0, |s| s.end_force_left);
            reactions.push(SupportReaction {
                node,
                position: node_positions[node],
                support: *support,
                force,
                moment: support.restrains_rotation().then_some(moments[node]),
            });
        }
    }

    let diagrams = span_results
        .iter()
        .map(|span| SpanDiagram {
            span: span.span_index,
            start: span.start,
            samples: span.sample(options.samples_per_span),
        })
        .collect();

    let mut max_positive_moment = span_results[0].max_moment;
    let mut max_negative_moment = span_results[0].min_moment;
    let mut max_shear = span_results[0].max_shear;
    let mut max_deflection = span_results[0].max_deflection;
    for span in span_results.iter().skip(1) {
        if span.max_moment.value > max_positive_moment.value {
            max_positive_moment = span.max_moment;
        }
        if span.min_moment.value < max_negative_moment.value {
            max_negative_moment = span.min_moment;
        }
        if span.max_shear.value.abs() > max_shear.value.abs() {
            max_shear = span.max_shear;
        }
        if span.max_deflection.value.abs() > max_deflection.value.abs() {
            max_deflection = span.max_deflection;
        }
    }

    let equilibrium = check_equilibrium(model, &span_results, &reactions, options.equilibrium_tolerance);

    Ok(AnalysisResult {
        reactions,
        support_moments: moments,
        rotations,
        node_deflections,
        span_results,
        diagrams,
        max_positive_moment,
        max_negative_moment,
        max_shear,
        max_deflection,
        equilibrium,
        degree_of_indeterminacy: system.unknown_count(),
    })
}

/// Give overhangs the rigid-body tip deflection that makes the slope
/// continuous over their root support
fn apply_overhang_offsets(supports: &[SupportType], spans: &mut [SpanResult]) {
    let n = spans.len();

    if supports[0] == SupportType::Free {
        // n == 1 means the root is a fixed end
        let root_slope = if n == 1 { 0.0 } else { spans[1].slope_left() };
        let tip = spans[0].length * (spans[0].slope_right() - root_slope);
        spans[0].offset_left = tip;
    }

    if supports[n] == SupportType::Free {
        let root_slope = if n == 1 { 0.0 } else { spans[n - 2].slope_right() };
        let tip = spans[n - 1].length * (root_slope - spans[n - 1].slope_left());
        spans[n - 1].offset_right = tip;
    }
}

fn check_equilibrium(
    model: &BeamModel,
    spans: &[SpanResult],
    reactions: &[SupportReaction],
    tolerance: f64,
) -> EquilibriumCheck {
    let total_applied = model.total_applied_load();
    let total_reaction: f64 = reactions.iter().map(|r| r.force).sum();
    let absolute_error = (total_applied - total_reaction).abs();
    let relative_error = if total_applied.abs() > 0.0 {
        absolute_error / total_applied.abs()
    } else {
        absolute_error
    };

    // Counter-clockwise about the left end
    let mut moment_residual = 0.0;
    let mut load_moment_scale = 0.0;
    for span in spans {
        for load in &span.loads {
            let lever = span.start
                + match *load {
                    SpanLoad::Concentrated { a, .. } => a,
                    SpanLoad::Distributed { start, end, .. } => (start + end) / 2.0,
                };
            let moment = load.resultant() * lever;
            moment_residual -= moment;
            load_moment_scale += moment.abs();
        }
    }
    let last = spans.len();
    for reaction in reactions {
        moment_residual += reaction.force * reaction.position;
        if let Some(m) = reaction.moment {
            // The support resists the beam's end moment
            moment_residual += if reaction.node == last { m } else { -m };
        }
    }
    let moment_scale = if load_moment_scale > 0.0 { load_moment_scale } else { 1.0 };

    let by_category = model
        .applied_load_by_category()
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();

    EquilibriumCheck {
        total_applied,
        total_reaction,
        absolute_error,
        relative_error,
        moment_residual,
        tolerance,
        balanced: relative_error <= tolerance && moment_residual.abs() / moment_scale <= tolerance,
        by_category,
    }
}

// =============================================================================
// TESTS
// =============================================================================
