//! # Three-Moment Equation (Clapeyron)
//!
//! Compatibility system for the bending moments at the nodes of a continuous
//! beam.
//!
//! ## Algorithm Overview
//!
//! 1. Moments at pinned ends and free tips are zero
//! 2. The moment at the support next to a free end follows from statics of
//!    the overhang
//! 3. Every other node (interior supports and fixed ends) is an unknown with
//!    one equation:
//!
//! ```text
//! interior:   M(i-1)·αl + 2·M(i)·(αl + αr) + M(i+1)·αr = -6·(Ax̄l/(Ll·EIl) + Ax̄r/(Lr·EIr))
//! fixed left: 2·M0·α + M1·α = -6·Ax̄/(L·EI)
//! ```
//!
//! with α = L/EI and Ax̄ the static moment of the span's simple-beam moment
//! diagram about the end away from node i.
//!
//! 4. The unknowns are contiguous, so the system is tridiagonal and is solved
//!    by the Thomas algorithm
//!
//! ## References
//!
//! - "Structural Analysis" by R.C. Hibbeler, Chapter 11
//! - Timoshenko & Young, Theory of Structures, Art. 60

use std::ops::RangeInclusive;

use crate::equations::beam::{static_moment_about_left, static_moment_about_right};
use crate::equations::tridiagonal::solve_tridiagonal;
use crate::errors::BeamResult;
use crate::loads::SpanLoad;
use crate::model::{BeamModel, SupportType};

/// Per-span terms needed by the compatibility equations
#[derive(Debug, Clone)]
pub struct SpanTerms {
    /// Span length (m)
    pub length: f64,
    /// Flexural rigidity (N·m²)
    pub ei: f64,
    /// Flexibility α = L/EI
    pub alpha: f64,
    /// Static moment of M0 about the left end (N·m³)
    pub ax_left: f64,
    /// Static moment of M0 about the right end (N·m³)
    pub ax_right: f64,
    /// Loads in span-local form
    pub loads: Vec<SpanLoad>,
}

impl SpanTerms {
    /// Collect the loads and static moments of span `index`
    pub fn from_model(model: &BeamModel, index: usize) -> Self {
        let span = &model.spans[index];
        let l = span.length;
        let loads: Vec<SpanLoad> = model.loads_on_span(index).map(|load| load.to_span_load(l)).collect();

        Self {
            length: l,
            ei: span.ei,
            alpha: span.flexibility(),
            ax_left: loads.iter().map(|load| static_moment_about_left(load, l)).sum(),
            ax_right: loads.iter().map(|load| static_moment_about_right(load, l)).sum(),
            loads,
        }
    }

    /// Right-hand side contribution -6·Ax̄/(L·EI) for a node at the left end
    fn load_term_at_left_node(&self) -> f64 {
        -6.0 * self.ax_right / (self.length * self.ei)
    }

    /// Right-hand side contribution -6·Ax̄/(L·EI) for a node at the right end
    fn load_term_at_right_node(&self) -> f64 {
        -6.0 * self.ax_left / (self.length * self.ei)
    }

    /// Hogging moment at the left end of an overhang whose free tip is on the right
    fn cantilever_root_moment_left(&self) -> f64 {
        -self
            .loads
            .iter()
            .map(|load| match *load {
                SpanLoad::Concentrated { p, a } => p * a,
                SpanLoad::Distributed { w, start, end } => w * (end - start) * (start + end) / 2.0,
            })
            .sum::<f64>()
    }

    /// Hogging moment at the right end of an overhang whose free tip is on the left
    fn cantilever_root_moment_right(&self) -> f64 {
        let l = self.length;
        -self
            .loads
            .iter()
            .map(|load| match *load {
                SpanLoad::Concentrated { p, a } => p * (l - a),
                SpanLoad::Distributed { w, start, end } => w * (end - start) * (l - (start + end) / 2.0),
            })
            .sum::<f64>()
    }
}

/// Assembled three-moment system for a validated model
#[derive(Debug, Clone)]
pub struct ThreeMomentSystem {
    spans: Vec<SpanTerms>,
    supports: Vec<SupportType>,
    /// Node moments fixed by statics; `None` where the moment is unknown
    known: Vec<Option<f64>>,
}

impl ThreeMomentSystem {
    /// Build the system. The model must already be validated.
    pub fn from_model(model: &BeamModel) -> Self {
        let spans: Vec<SpanTerms> = (0..model.span_count())
            .map(|i| SpanTerms::from_model(model, i))
            .collect();
        let supports = model.supports.clone();
        let n = spans.len();

        let mut known: Vec<Option<f64>> = vec![None; n + 1];

        // Pinned ends and free tips carry no moment
        if supports[0] != SupportType::Fixed {
            known[0] = Some(0.0);
        }
        if supports[n] != SupportType::Fixed {
            known[n] = Some(0.0);
        }

        // Overhang roots, by statics
        if supports[0] == SupportType::Free {
            known[1] = Some(spans[0].cantilever_root_moment_right());
        }
        if supports[n] == SupportType::Free {
            known[n - 1] = Some(spans[n - 1].cantilever_root_moment_left());
        }

        Self { spans, supports, known }
    }

    /// Per-span terms
    pub fn spans(&self) -> &[SpanTerms] {
        &self.spans
    }

    /// Nodes whose moment must come from compatibility, or `None` if statics suffice
    pub fn unknown_nodes(&self) -> Option<RangeInclusive<usize>> {
        let first = self.known.iter().position(Option::is_none)?;
        let last = self.known.iter().rposition(Option::is_none)?;
        Some(first..=last)
    }

    /// Number of compatibility equations
    pub fn unknown_count(&self) -> usize {
        self.known.iter().filter(|m| m.is_none()).count()
    }

    /// Solve for the bending moment at every node (sagging positive)
    pub fn solve(&self) -> BeamResult<Vec<f64>> {
        let Some(range) = self.unknown_nodes() else {
            return Ok(self.known.iter().map(|m| m.unwrap_or(0.0)).collect());
        };

        let first = *range.start();
        let size = range.end() - first + 1;
        let mut sub = vec![0.0; size];
        let mut diag = vec![0.0; size];
        let mut sup = vec![0.0; size];
        let mut rhs = vec![0.0; size];

        for (row, node) in range.enumerate() {
            let coefficients = self.row(node);
            rhs[row] = coefficients.rhs;
            diag[row] = coefficients.diagonal;

            if let Some(coef) = coefficients.left {
                match self.known[node - 1] {
                    Some(m) => rhs[row] -= coef * m,
                    None => sub[row] = coef,
                }
            }
            if let Some(coef) = coefficients.right {
                match self.known[node + 1] {
                    Some(m) => rhs[row] -= coef * m,
                    None => sup[row] = coef,
                }
            }
        }

        let solved = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;

        Ok(self
            .known
            .iter()
            .enumerate()
            .map(|(node, m)| m.unwrap_or_else(|| solved[node - first]))
            .collect())
    }

    /// Coefficients of the equation written at an unknown node
    fn row(&self, node: usize) -> Row {
        let n = self.spans.len();
        let left_span = node.checked_sub(1).map(|i| &self.spans[i]);
        let right_span = (node < n).then(|| &self.spans[node]);

        let mut row = Row::default();
        if let Some(span) = left_span {
            row.left = Some(span.alpha);
            row.diagonal += 2.0 * span.alpha;
            row.rhs += span.load_term_at_right_node();
        }
        if let Some(span) = right_span {
            row.right = Some(span.alpha);
            row.diagonal += 2.0 * span.alpha;
            row.rhs += span.load_term_at_left_node();
        }
        debug_assert!(
            left_span.is_some() && right_span.is_some() || self.supports[node] == SupportType::Fixed,
            "end node {} is only unknown when fixed",
            node
        );
        row
    }
}

#[derive(Debug, Default)]
struct Row {
    left: Option<f64>,
    diagonal: f64,
    right: Option<f64>,
    rhs: f64,
}

/// Solve the support moments of a validated model
pub fn support_moments(model: &BeamModel) -> BeamResult<Vec<f64>> {
    ThreeMomentSystem::from_model(model).solve()
}
