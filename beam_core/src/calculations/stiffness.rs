//! # Direct Stiffness Cross-Check
//!
//! An independent finite-element solution of the same beam, used to confirm
//! the three-moment results.
//!
//! Euler-Bernoulli elements with two degrees of freedom per node
//! (deflection v, slope θ = dv/dx). Nodes are placed at supports, at
//! point-load positions, at partial-load limits and at `subdivisions` equal
//! divisions of every span. Distributed loads use consistent nodal loads,
//! which makes the nodal displacements exact.
//!
//! ```text
//!            | 12    6L   -12    6L  |
//! k = EI/L³ · |  6L   4L²  -6L   2L² |
//!            | -12   -6L   12   -6L  |
//!            |  6L   2L²  -6L   4L²  |
//! ```

use nalgebra::{DMatrix, DVector, Matrix4, Vector4};
use serde::{Deserialize, Serialize};

use crate::calculations::continuous_beam::AnalysisResult;
use crate::errors::{BeamError, BeamResult};
use crate::loads::SpanLoad;
use crate::model::BeamModel;

/// Degrees of freedom per node
const DOF: usize = 2;

/// Equal divisions per span used by [`cross_check`]
pub const DEFAULT_SUBDIVISIONS: usize = 8;

/// Stations closer than this are merged (m)
const MESH_TOLERANCE: f64 = 1e-9;

/// A beam element between two consecutive mesh nodes
#[derive(Debug, Clone, Copy)]
struct Element {
    nodes: [usize; 2],
    span: usize,
    /// Local span coordinates of the element ends
    x0: f64,
    x1: f64,
    ei: f64,
}

impl Element {
    fn length(&self) -> f64 {
        self.x1 - self.x0
    }

    #[rustfmt::skip]
    fn stiffness(&self) -> Matrix4<f64> {
        let l = self.length();
        let k = self.ei / l.powi(3);
        let l2 = l * l;
        Matrix4::new(
            12.0, 6.0 * l, -12.0, 6.0 * l,
            6.0 * l, 4.0 * l2, -6.0 * l, 2.0 * l2,
            -12.0, -6.0 * l, 12.0, -6.0 * l,
            6.0 * l, 2.0 * l2, -6.0 * l, 4.0 * l2,
        ) * k
    }

    fn dof_map(&self) -> [usize; 4] {
        let [a, b] = self.nodes;
        [DOF * a, DOF * a + 1, DOF * b, DOF * b + 1]
    }
}

/// Consistent nodal loads for a uniform load `w` over an element of length `l`
fn consistent_uniform_load(w: f64, l: f64) -> Vector4<f64> {
    Vector4::new(w * l / 2.0, w * l * l / 12.0, w * l / 2.0, -w * l * l / 12.0)
}

/// Finite-element mesh of a continuous beam
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Global x of every mesh node (m)
    pub positions: Vec<f64>,
    /// Mesh node index of each beam node (support location)
    pub support_nodes: Vec<usize>,
    elements: Vec<Element>,
}

impl Mesh {
    /// Build the mesh for a validated model
    pub fn build(model: &BeamModel, subdivisions: usize) -> Self {
        let divisions = subdivisions.max(1);
        let mut positions = Vec::new();
        let mut support_nodes = Vec::with_capacity(model.node_count());
        let mut elements = Vec::new();
        let mut span_start = 0.0;

        for (index, span) in model.spans.iter().enumerate() {
            let l = span.length;
            let mut stations: Vec<f64> = (0..=divisions).map(|k| l * k as f64 / divisions as f64).collect();
            for load in model.loads_on_span(index) {
                match load.to_span_load(l) {
                    SpanLoad::Concentrated { a, .. } => stations.push(a),
                    SpanLoad::Distributed { start, end, .. } => {
                        stations.push(start);
                        stations.push(end);
                    }
                }
            }
            stations.sort_by(|a, b| a.total_cmp(b));
            stations.dedup_by(|a, b| (*a - *b).abs() <= MESH_TOLERANCE);

            // The first station is shared with the previous span
            if index == 0 {
                positions.push(span_start);
            }
            support_nodes.push(positions.len() - 1);

            for pair in stations.windows(2) {
                let first = positions.len() - 1;
                positions.push(span_start + pair[1]);
                elements.push(Element {
                    nodes: [first, first + 1],
                    span: index,
                    x0: pair[0],
                    x1: pair[1],
                    ei: span.ei,
                });
            }

            span_start += l;
        }
        support_nodes.push(positions.len() - 1);

        Self {
            positions,
            support_nodes,
            elements,
        }
    }

    /// Number of elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn dof_count(&self) -> usize {
        DOF * self.positions.len()
    }

    /// Mesh node at local position `x` of span `span`
    fn node_at(&self, span: usize, x: f64) -> usize {
        self.elements
            .iter()
            .filter(|e| e.span == span)
            .find_map(|e| {
                if (e.x0 - x).abs() <= MESH_TOLERANCE {
                    Some(e.nodes[0])
                } else if (e.x1 - x).abs() <= MESH_TOLERANCE {
                    Some(e.nodes[1])
                } else {
                    None
                }
            })
            .unwrap_or(self.support_nodes[span])
    }

    fn assemble_stiffness(&self) -> DMatrix<f64> {
        let n = self.dof_count();
        let mut k_global = DMatrix::<f64>::zeros(n, n);
        for element in &self.elements {
            let ke = element.stiffness();
            let map = element.dof_map();
            for i in 0..4 {
                for j in 0..4 {
                    k_global[(map[i], map[j])] += ke[(i, j)];
                }
            }
        }
        k_global
    }

    fn assemble_loads(&self, model: &BeamModel) -> DVector<f64> {
        let mut f = DVector::<f64>::zeros(self.dof_count());
        for load in &model.loads {
            let span = load.span();
            match load.to_span_load(model.spans[span].length) {
                SpanLoad::Concentrated { p, a } => {
                    f[DOF * self.node_at(span, a)] += p;
                }
                SpanLoad::Distributed { w, start, end } => {
                    let covered = self.elements.iter().filter(|e| {
                        e.span == span && e.x0 >= start - MESH_TOLERANCE && e.x1 <= end + MESH_TOLERANCE
                    });
                    for element in covered {
                        let fe = consistent_uniform_load(w, element.length());
                        for (i, dof) in element.dof_map().into_iter().enumerate() {
                            f[dof] += fe[i];
                        }
                    }
                }
            }
        }
        f
    }
}

/// Reaction found by the stiffness solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StiffnessReaction {
    /// Beam node index
    pub node: usize,
    /// Vertical force (N), positive upward
    pub force: f64,
}

/// Result of the direct stiffness solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StiffnessSolution {
    /// Global x of each mesh node (m)
    pub positions: Vec<f64>,
    /// Deflection at each mesh node (m), positive downward
    pub deflections: Vec<f64>,
    /// Slope at each mesh node
    pub rotations: Vec<f64>,
    /// Reactions at restrained beam nodes
    pub reactions: Vec<StiffnessReaction>,
    /// Number of elements in the mesh
    pub element_count: usize,
}

/// Solve a beam by the direct stiffness method
///
/// # Errors
///
/// `InvalidModel` from validation, or `NumericalDegeneracy` if the reduced
/// stiffness matrix is singular.
pub fn solve_stiffness(model: &BeamModel, subdivisions: usize) -> BeamResult<StiffnessSolution> {
    model.validate()?;

    let mesh = Mesh::build(model, subdivisions);
    let k_global = mesh.assemble_stiffness();
    let f_global = mesh.assemble_loads(model);
    let n = mesh.dof_count();

    let mut restrained = vec![false; n];
    for (beam_node, support) in model.supports.iter().enumerate() {
        let mesh_node = mesh.support_nodes[beam_node];
        restrained[DOF * mesh_node] = support.restrains_vertical();
        restrained[DOF * mesh_node + 1] = support.restrains_rotation();
    }

    let free: Vec<usize> = (0..n).filter(|&i| !restrained[i]).collect();
    let k_ff = DMatrix::<f64>::from_fn(free.len(), free.len(), |i, j| k_global[(free[i], free[j])]);
    let f_f = DVector::<f64>::from_fn(free.len(), |i, _| f_global[free[i]]);

    let u_f = k_ff
        .lu()
        .solve(&f_f)
        .ok_or_else(|| BeamError::numerical_degeneracy("reduced stiffness matrix", 0.0))?;

    let mut u = DVector::<f64>::zeros(n);
    for (i, &dof) in free.iter().enumerate() {
        u[dof] = u_f[i];
    }

    // Support forces: F - K·u at restrained DOFs
    let residual = &f_global - &k_global * &u;
    let reactions = model
        .supports
        .iter()
        .enumerate()
        .filter(|(_, s)| s.restrains_vertical())
        .map(|(node, _)| StiffnessReaction {
            node,
            force: residual[DOF * mesh.support_nodes[node]],
        })
        .collect();

    Ok(StiffnessSolution {
        positions: mesh.positions.clone(),
        deflections: (0..mesh.positions.len()).map(|i| u[DOF * i]).collect(),
        rotations: (0..mesh.positions.len()).map(|i| u[DOF * i + 1]).collect(),
        reactions,
        element_count: mesh.element_count(),
    })
}

/// One reaction from both solutions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionComparison {
    pub node: usize,
    /// Three-moment reaction (N)
    pub three_moment: f64,
    /// Stiffness reaction (N)
    pub stiffness: f64,
    /// Absolute difference (N)
    pub difference: f64,
}

/// Agreement between the three-moment and stiffness solutions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossCheck {
    pub reactions: Vec<ReactionComparison>,
    /// Largest reaction difference (N)
    pub max_absolute_difference: f64,
    /// Largest reaction difference over the total applied load
    pub max_relative_difference: f64,
    /// Largest deflection difference at mesh nodes (m)
    pub max_deflection_difference: f64,
    /// Largest deflection difference over the peak deflection
    pub relative_deflection_difference: f64,
    /// Elements used by the stiffness solution
    pub element_count: usize,
}

impl CrossCheck {
    /// Whether reactions and deflections agree within `tolerance` (relative)
    pub fn agrees(&self, tolerance: f64) -> bool {
        self.max_relative_difference <= tolerance && self.relative_deflection_difference <= tolerance
    }
}

/// Compare a three-moment result against a fresh stiffness solution
pub fn cross_check(model: &BeamModel, result: &AnalysisResult) -> BeamResult<CrossCheck> {
    cross_check_with(model, result, DEFAULT_SUBDIVISIONS)
}

/// [`cross_check`] with an explicit mesh density
pub fn cross_check_with(model: &BeamModel, result: &AnalysisResult, subdivisions: usize) -> BeamResult<CrossCheck> {
    let fe = solve_stiffness(model, subdivisions)?;

    let reactions: Vec<ReactionComparison> = result
        .reactions
        .iter()
        .zip(&fe.reactions)
        .map(|(tm, st)| ReactionComparison {
            node: tm.node,
            three_moment: tm.force,
            stiffness: st.force,
            difference: (tm.force - st.force).abs(),
        })
        .collect();

    let max_absolute_difference = reactions.iter().map(|r| r.difference).fold(0.0, f64::max);
    let load_scale = model.total_applied_load().abs();
    let max_relative_difference = if load_scale > 0.0 {
        max_absolute_difference / load_scale
    } else {
        max_absolute_difference
    };

    let mut max_deflection_difference = 0.0f64;
    let mut peak_deflection = 0.0f64;
    for (&x, &v) in fe.positions.iter().zip(&fe.deflections) {
        if let Some(sample) = result.evaluate_at(x) {
            max_deflection_difference = max_deflection_difference.max((sample.deflection - v).abs());
            peak_deflection = peak_deflection.max(v.abs());
        }
    }
    let relative_deflection_difference = if peak_deflection > 0.0 {
        max_deflection_difference / peak_deflection
    } else {
        max_deflection_difference
    };

    Ok(CrossCheck {
        reactions,
        max_absolute_difference,
        max_relative_difference,
        max_deflection_difference,
        relative_deflection_difference,
        element_count: fe.element_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::continuous_beam::solve;
    use crate::loads::Load;
    use crate::model::{Span, SupportType};

    #[test]
    fn test_mesh_includes_load_stations() {
        let model = BeamModel::continuous(&[10.0, 6.0], 1.0)
            .with_load(Load::point(0, 1.0, 3.3))
            .with_load(Load::partial_uniform(1, 1.0, 1.0, 2.5));
        let mesh = Mesh::build(&model, 2);
        // Span 0: 0, 3.3, 5, 10; span 1: 10, 11, 12.5, 13, 16
        assert_eq!(mesh.positions, vec![0.0, 3.3, 5.0, 10.0, 11.0, 12.5, 13.0, 16.0]);
        assert_eq!(mesh.support_nodes, vec![0, 3, 7]);
        assert_eq!(mesh.element_count(), 7);
    }

    #[test]
    fn test_simple_span_exact() {
        // Midspan deflection PL³/48EI at a mesh node
        let model = BeamModel::simple_span(8.0, 2.0e6).with_load(Load::point(0, 1_000.0, 4.0));
        let fe = solve_stiffness(&model, 4).unwrap();
        assert!((fe.reactions[0].force - 500.0).abs() < 1e-6);
        assert!((fe.reactions[1].force - 500.0).abs() < 1e-6);

        let mid = fe.positions.iter().position(|&x| x == 4.0).unwrap();
        let expected = 1_000.0 * 512.0 / (48.0 * 2.0e6);
        assert!((fe.deflections[mid] - expected).abs() < 1e-9 * expected.max(1.0));
    }

    #[test]
    fn test_cantilever_restrains_rotation() {
        let model = BeamModel::cantilever(3.0, 1.0e3).with_load(Load::uniform(0, 2.0));
        let fe = solve_stiffness(&model, 3).unwrap();
        assert_eq!(fe.reactions.len(), 1);
        assert!((fe.reactions[0].force - 6.0).abs() < 1e-9);
        assert_eq!(fe.rotations[0], 0.0);
        // wL⁴/8EI at the tip
        let tip = *fe.deflections.last().unwrap();
        assert!((tip - 2.0 * 81.0 / 8.0e3).abs() < 1e-12);
    }

    #[test]
    fn test_cross_check_agrees_with_three_moment() {
        let model = BeamModel::new(
            vec![Span::new(3.0, 2.0e7), Span::new(9.0, 3.0e7), Span::new(7.0, 3.0e7)],
            vec![SupportType::Free, SupportType::Pinned, SupportType::Pinned, SupportType::Fixed],
        )
        .with_load(Load::point(0, 5_000.0, 0.5))
        .with_load(Load::uniform(1, 8_000.0))
        .with_load(Load::partial_uniform(2, 12_000.0, 2.0, 6.0))
        .with_load(Load::point(2, 30_000.0, 4.2));
        let result = solve(&model).unwrap();
        let check = cross_check(&model, &result).unwrap();

        assert_eq!(check.reactions.len(), 3);
        assert!(check.agrees(1e-6), "{:?}", check);
    }
}
