//! # Simply-Supported Beam Formulas
//!
//! Closed-form equations for a single span with a pin at the left (x=0) and a
//! pin at the right (x=L). The continuous-beam solver superposes these with
//! the effect of end moments, so every formula here is "simple beam" (M0,
//! V0, δ0) unless the name says otherwise.
//!
//! ## Notation
//!
//! - `l` = Span length
//! - `x` = Position along the span from the left support
//! - `a` = Point load position from the left support
//! - `p` = Point load magnitude
//! - `w` = Distributed load intensity over `[start, end]`
//! - `ei` = Flexural rigidity
//! - `m_a`, `m_b` = Bending moments at the left and right ends
//!
//! ## Sign Conventions
//!
//! - Loads: positive downward
//! - Moment: positive sagging
//! - Shear: V = dM/dx
//! - Deflection: positive downward; slope is dδ/dx
//! - Reactions: positive upward
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1
//! - Structural Analysis by R.C. Hibbeler, Chapter 11 (three-moment equation)

use crate::loads::SpanLoad;

// =============================================================================
// POINT LOAD FORMULAS
// =============================================================================

/// Reactions for point load P at position a on span L
///
/// ```text
///        P
///        ↓
///    ────┬────────────
///    △   a            △
///   R1  ←───────L────→ R2
/// ```
///
/// - R1 = P(L-a)/L
/// - R2 = Pa/L
#[inline]
pub fn point_load_reactions(p: f64, a: f64, l: f64) -> (f64, f64) {
    (p * (l - a) / l, p * a / l)
}

/// Shear at x for point load P at a
///
/// - V(x) = R1       for x < a
/// - V(x) = R1 - P   for x ≥ a
#[inline]
pub fn point_load_shear(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (r1, _) = point_load_reactions(p, a, l);
    if x < a {
        r1
    } else {
        r1 - p
    }
}

/// Moment at x for point load P at a
///
/// - M(x) = R1·x           for x ≤ a
/// - M(x) = R1·x - P(x-a)  for x > a
///
/// Maximum at the load point: Pa(L-a)/L
#[inline]
pub fn point_load_moment(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (r1, _) = point_load_reactions(p, a, l);
    if x <= a {
        r1 * x
    } else {
        r1 * x - p * (x - a)
    }
}

/// Deflection at x for point load P at a
///
/// For x ≤ a:
/// ```text
/// δ(x) = Pbx(L² - b² - x²) / (6EIL)
/// ```
///
/// For x > a:
/// ```text
/// δ(x) = Pa(L-x)(2Lx - x² - a²) / (6EIL)
/// ```
///
/// where b = L - a
#[inline]
pub fn point_load_deflection(p: f64, a: f64, l: f64, ei: f64, x: f64) -> f64 {
    let b = l - a;
    if x <= a {
        p * b * x * (l * l - b * b - x * x) / (6.0 * ei * l)
    } else {
        p * a * (l - x) * (2.0 * l * x - x * x - a * a) / (6.0 * ei * l)
    }
}

/// Static moment of the simple-beam moment diagram about the left end
///
/// ```text
/// ∫₀ᴸ M0(x)·x dx = Pa(L-a)(L+a)/6
/// ```
#[inline]
pub fn point_load_static_moment(p: f64, a: f64, l: f64) -> f64 {
    p * a * (l - a) * (l + a) / 6.0
}

// =============================================================================
// DISTRIBUTED LOAD FORMULAS
// Uniform intensity w between `start` and `end` (full span: 0 to L)
// =============================================================================

/// Reactions for a uniform load w from start to end
///
/// ```text
///          ↓↓↓↓↓↓↓↓↓ w
///    ══════════════════
///    △   start  end    △
///   R1  ←─────L─────→ R2
/// ```
///
/// Total W = w(end-start) acting at c = (start+end)/2:
/// - R1 = W(L-c)/L
/// - R2 = Wc/L
#[inline]
pub fn distributed_load_reactions(w: f64, start: f64, end: f64, l: f64) -> (f64, f64) {
    let total = w * (end - start);
    let centroid = (start + end) / 2.0;
    (total * (l - centroid) / l, total * centroid / l)
}

/// Shear at x for a uniform load w from start to end
#[inline]
pub fn distributed_load_shear(w: f64, start: f64, end: f64, l: f64, x: f64) -> f64 {
    let (r1, _) = distributed_load_reactions(w, start, end, l);
    let loaded = (x.min(end) - start).max(0.0);
    r1 - w * loaded
}

/// Moment at x for a uniform load w from start to end
///
/// - M(x) = R1·x                     for x ≤ start
/// - M(x) = R1·x - w(x-start)²/2     for start < x < end
/// - M(x) = R1·x - W(x-c)            for x ≥ end
#[inline]
pub fn distributed_load_moment(w: f64, start: f64, end: f64, l: f64, x: f64) -> f64 {
    let (r1, _) = distributed_load_reactions(w, start, end, l);
    if x <= start {
        r1 * x
    } else if x >= end {
        let total = w * (end - start);
        let centroid = (start + end) / 2.0;
        r1 * x - total * (x - centroid)
    } else {
        r1 * x - w * (x - start).powi(2) / 2.0
    }
}

/// Deflection at x for a uniform load w from start to end
///
/// Integrates the point-load kernel over the loaded length. Load to the left
/// of x uses the x > a branch, load to the right uses the x ≤ a branch
/// written in terms of b = L - s:
///
/// ```text
/// δ = w(L-x)/(6EIL)·[(2Lx - x²)s²/2 - s⁴/4]  over s ∈ [start, min(end, x)]
///   + w·x/(6EIL)·[(L² - x²)b²/2 - b⁴/4]       over b ∈ [L-end, L-max(start, x)]
/// ```
///
/// For a full-span load this reduces to wx(L³ - 2Lx² + x³)/(24EI).
pub fn distributed_load_deflection(w: f64, start: f64, end: f64, l: f64, ei: f64, x: f64) -> f64 {
    let mut delta = 0.0;

    let left_end = end.min(x);
    if left_end > start {
        let k = 2.0 * l * x - x * x;
        let f = |s: f64| k * s * s / 2.0 - s.powi(4) / 4.0;
        delta += w * (l - x) / (6.0 * ei * l) * (f(left_end) - f(start));
    }

    let right_start = start.max(x);
    if end > right_start {
        let k = l * l - x * x;
        let g = |b: f64| k * b * b / 2.0 - b.powi(4) / 4.0;
        delta += w * x / (6.0 * ei * l) * (g(l - right_start) - g(l - end));
    }

    delta
}

/// Static moment of the simple-beam moment diagram about the left end
///
/// ```text
/// ∫₀ᴸ M0(x)·x dx = (w/6)·[L²s²/2 - s⁴/4] from start to end
/// ```
///
/// Full span: wL⁴/24.
#[inline]
pub fn distributed_load_static_moment(w: f64, start: f64, end: f64, l: f64) -> f64 {
    let f = |s: f64| l * l * s * s / 2.0 - s.powi(4) / 4.0;
    w / 6.0 * (f(end) - f(start))
}

// =============================================================================
// END MOMENT FORMULAS
// Simple span carrying only end moments m_a (left) and m_b (right)
// =============================================================================

/// Moment at x due to end moments (linear interpolation)
#[inline]
pub fn end_moment_moment(m_a: f64, m_b: f64, l: f64, x: f64) -> f64 {
    m_a * (1.0 - x / l) + m_b * x / l
}

/// Deflection at x due to end moments
///
/// ```text
/// δ(x) = x(L-x)[m_a(2L-x) + m_b(L+x)] / (6EIL)
/// ```
#[inline]
pub fn end_moment_deflection(m_a: f64, m_b: f64, l: f64, ei: f64, x: f64) -> f64 {
    x * (l - x) * (m_a * (2.0 * l - x) + m_b * (l + x)) / (6.0 * ei * l)
}

/// End slopes (left, right) due to end moments
///
/// - θa = (m_a·L/3 + m_b·L/6) / EI
/// - θb = -(m_a·L/6 + m_b·L/3) / EI
#[inline]
pub fn end_moment_slopes(m_a: f64, m_b: f64, l: f64, ei: f64) -> (f64, f64) {
    (
        (m_a * l / 3.0 + m_b * l / 6.0) / ei,
        -(m_a * l / 6.0 + m_b * l / 3.0) / ei,
    )
}

// =============================================================================
// SPAN LOAD DISPATCH
// =============================================================================

/// Simple-beam reactions (R1, R2) for a span load
pub fn simple_reactions(load: &SpanLoad, l: f64) -> (f64, f64) {
    match *load {
        SpanLoad::Concentrated { p, a } => point_load_reactions(p, a, l),
        SpanLoad::Distributed { w, start, end } => distributed_load_reactions(w, start, end, l),
    }
}

/// Simple-beam moment M0(x) for a span load
pub fn simple_moment(load: &SpanLoad, l: f64, x: f64) -> f64 {
    match *load {
        SpanLoad::Concentrated { p, a } => point_load_moment(p, a, l, x),
        SpanLoad::Distributed { w, start, end } => distributed_load_moment(w, start, end, l, x),
    }
}

/// Simple-beam shear V0(x) for a span load
pub fn simple_shear(load: &SpanLoad, l: f64, x: f64) -> f64 {
    match *load {
        SpanLoad::Concentrated { p, a } => point_load_shear(p, a, l, x),
        SpanLoad::Distributed { w, start, end } => distributed_load_shear(w, start, end, l, x),
    }
}

/// Simple-beam deflection δ0(x) for a span load
pub fn simple_deflection(load: &SpanLoad, l: f64, ei: f64, x: f64) -> f64 {
    match *load {
        SpanLoad::Concentrated { p, a } => point_load_deflection(p, a, l, ei, x),
        SpanLoad::Distributed { w, start, end } => distributed_load_deflection(w, start, end, l, ei, x),
    }
}

/// Static moment of the M0 diagram about the left end (A·x̄ from the left)
pub fn static_moment_about_left(load: &SpanLoad, l: f64) -> f64 {
    match *load {
        SpanLoad::Concentrated { p, a } => point_load_static_moment(p, a, l),
        SpanLoad::Distributed { w, start, end } => distributed_load_static_moment(w, start, end, l),
    }
}

/// Static moment of the M0 diagram about the right end (A·x̄ from the right)
pub fn static_moment_about_right(load: &SpanLoad, l: f64) -> f64 {
    static_moment_about_left(&load.mirrored(l), l)
}

/// Simple-beam end slopes (left, right) produced by a span load
///
/// Conjugate-beam reactions of the M0/EI diagram:
/// - θa = A·x̄_right / (L·EI)
/// - θb = -A·x̄_left / (L·EI)
pub fn simple_end_slopes(load: &SpanLoad, l: f64, ei: f64) -> (f64, f64) {
    (
        static_moment_about_right(load, l) / (l * ei),
        -static_moment_about_left(load, l) / (l * ei),
    )
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON * b.abs().max(1.0)
    }

    #[test]
    fn test_point_load_asymmetric_reactions() {
        // 10 m span, 1000 N at 3 m
        let (r1, r2) = point_load_reactions(1000.0, 3.0, 10.0);
        assert!(approx_eq(r1, 700.0), "R1 = {}", r1);
        assert!(approx_eq(r2, 300.0), "R2 = {}", r2);
    }

    #[test]
    fn test_point_load_moment_max() {
        // M_max = PL/4 = 1000 * 10 / 4
        let m = point_load_moment(1000.0, 5.0, 10.0, 5.0);
        assert!(approx_eq(m, 2500.0), "M = {}", m);
        assert!(approx_eq(point_load_moment(1000.0, 5.0, 10.0, 10.0), 0.0));
    }

    #[test]
    fn test_point_load_midspan_deflection() {
        // PL³/48EI
        let d = point_load_deflection(1.0, 5.0, 10.0, 1.0, 5.0);
        assert!(approx_eq(d, 1000.0 / 48.0), "δ = {}", d);
    }

    #[test]
    fn test_full_distributed_matches_uniform_formulas() {
        let (w, l, ei): (f64, f64, f64) = (2.0, 10.0, 3.0);
        for &x in &[0.0_f64, 1.5, 3.0, 5.0, 8.25, 10.0] {
            let expected = w * x * (l.powi(3) - 2.0 * l * x * x + x.powi(3)) / (24.0 * ei);
            let d = distributed_load_deflection(w, 0.0, l, l, ei, x);
            assert!(approx_eq(d, expected), "x = {}: {} vs {}", x, d, expected);

            let m = distributed_load_moment(w, 0.0, l, l, x);
            assert!(approx_eq(m, w * x * (l - x) / 2.0));
        }
        // 5wL⁴/384EI at midspan
        let mid = distributed_load_deflection(w, 0.0, l, l, ei, 5.0);
        assert!(approx_eq(mid, 5.0 * w * l.powi(4) / (384.0 * ei)));
    }

    #[test]
    fn test_partial_load_is_sum_of_pieces() {
        // Load on [2, 7] equals load on [2, 4] plus load on [4, 7]
        let (w, l, ei) = (3.0, 10.0, 2.0);
        for &x in &[1.0, 3.0, 4.0, 6.5, 9.0] {
            let whole = distributed_load_deflection(w, 2.0, 7.0, l, ei, x);
            let parts = distributed_load_deflection(w, 2.0, 4.0, l, ei, x)
                + distributed_load_deflection(w, 4.0, 7.0, l, ei, x);
            assert!(approx_eq(whole, parts));
        }
        assert_eq!(distributed_load_deflection(w, 2.0, 7.0, l, ei, 0.0), 0.0);
        assert!(distributed_load_deflection(w, 2.0, 7.0, l, ei, l).abs() < 1e-12);
    }

    #[test]
    fn test_partial_reactions_symmetric() {
        // 100 N/m from 2 to 8 on a 10 m span
        let (r1, r2) = distributed_load_reactions(100.0, 2.0, 8.0, 10.0);
        assert!(approx_eq(r1, 300.0));
        assert!(approx_eq(r2, 300.0));
        assert!(approx_eq(distributed_load_shear(100.0, 2.0, 8.0, 10.0, 10.0), -300.0));
    }

    #[test]
    fn test_static_moments() {
        // Full uniform: wL⁴/24 about either end
        let full = SpanLoad::Distributed {
            w: 1.0,
            start: 0.0,
            end: 10.0,
        };
        assert!(approx_eq(static_moment_about_left(&full, 10.0), 10_000.0 / 24.0));
        assert!(approx_eq(static_moment_about_right(&full, 10.0), 10_000.0 / 24.0));

        // Point: Pab(L+a)/6 about the left, Pab(L+b)/6 about the right
        let point = SpanLoad::Concentrated { p: 6.0, a: 2.0 };
        assert!(approx_eq(static_moment_about_left(&point, 10.0), 6.0 * 2.0 * 8.0 * 12.0 / 6.0));
        assert!(approx_eq(static_moment_about_right(&point, 10.0), 6.0 * 2.0 * 8.0 * 18.0 / 6.0));
    }

    #[test]
    fn test_simple_end_slopes_uniform() {
        // ±wL³/24EI
        let load = SpanLoad::Distributed {
            w: 1.0,
            start: 0.0,
            end: 10.0,
        };
        let (ta, tb) = simple_end_slopes(&load, 10.0, 1.0);
        assert!(approx_eq(ta, 1000.0 / 24.0));
        assert!(approx_eq(tb, -1000.0 / 24.0));
    }

    #[test]
    fn test_end_moment_effects() {
        // Equal hogging end moments: uniform moment, upward midspan deflection ML²/8EI
        let d = end_moment_deflection(-1.0, -1.0, 10.0, 1.0, 5.0);
        assert!(approx_eq(d, -100.0 / 8.0));
        assert!(approx_eq(end_moment_moment(-1.0, -1.0, 10.0, 3.0), -1.0));

        let (ta, tb) = end_moment_slopes(-1.0, -1.0, 10.0, 1.0);
        assert!(approx_eq(ta, -5.0));
        assert!(approx_eq(tb, 5.0));
    }

    #[test]
    fn test_superposition() {
        // P at 3 m and P at 7 m give equal reactions
        let (a1, b1) = point_load_reactions(500.0, 3.0, 10.0);
        let (a2, b2) = point_load_reactions(500.0, 7.0, 10.0);
        assert!(approx_eq(a1 + a2, 500.0));
        assert!(approx_eq(b1 + b2, 500.0));
    }
}
