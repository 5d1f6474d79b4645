//! End-to-end checks of the bridge benchmark and the public API.

use beam_core::benchmark::{bridge_benchmark, BridgeParameters};
use beam_core::calculations::stiffness::cross_check;
use beam_core::calculations::{solve, solve_with_options, AnalysisOptions, AnalysisResult};
use beam_core::file_io::parse_model;
use beam_core::{BeamError, BeamModel, Load, Span, SupportType};

const REL_TOL: f64 = 1e-6;

fn assert_rel(actual: f64, expected: f64, tol: f64, what: &str) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol * scale,
        "{what}: expected {expected}, got {actual}"
    );
}

fn forces(result: &AnalysisResult) -> Vec<f64> {
    result.reactions.iter().map(|r| r.force).collect()
}

#[test]
fn bridge_reactions_match_reference() {
    let result = solve(&bridge_benchmark()).expect("benchmark solves");
    let r = forces(&result);

    assert_eq!(r.len(), 4);
    assert_rel(r[0], 249_932.065_2, 1e-9, "R1");
    assert_rel(r[1], 937_567.934_8, 1e-9, "R2");
    assert_rel(r[2], 937_567.934_8, 1e-9, "R3");
    assert_rel(r[3], 249_932.065_2, 1e-9, "R4");

    assert_rel(result.support_moments[1], -2_001_358.70, 1e-8, "M2");
    assert_rel(result.support_moments[2], -2_001_358.70, 1e-8, "M3");
}

#[test]
fn bridge_is_in_equilibrium() {
    let result = solve(&bridge_benchmark()).expect("benchmark solves");

    let total: f64 = forces(&result).iter().sum();
    assert_rel(total, 2_375_000.0, REL_TOL, "total reaction");
    assert!(result.equilibrium.balanced, "{:?}", result.equilibrium);
    assert!(result.equilibrium.relative_error <= REL_TOL);
    assert_rel(result.equilibrium.total_applied, 2_375_000.0, 1e-12, "applied");
}

#[test]
fn bridge_is_symmetric() {
    let result = solve(&bridge_benchmark()).expect("benchmark solves");
    let r = forces(&result);
    assert_rel(r[0], r[3], 1e-9, "outer reactions");
    assert_rel(r[1], r[2], 1e-9, "inner reactions");

    // Deflection mirrors about the centre of the main span
    let left = result.evaluate_at(10.0).unwrap().deflection;
    let right = result.evaluate_at(55.0).unwrap().deflection;
    assert_rel(left, right, 1e-9, "side span deflection");
}

#[test]
fn uniform_only_total_is_load_times_length() {
    let params = BridgeParameters {
        point_load: 0.0,
        ..Default::default()
    };
    let model = params.to_model().expect("valid parameters");
    let result = solve(&model).expect("solves");
    let r = forces(&result);

    let w = params.dead_load + params.live_load;
    assert_rel(r.iter().sum::<f64>(), w * 65.0, REL_TOL, "total");
    assert_rel(r[0], 260_122.282_608_7, 1e-9, "R1");
    assert_rel(r[1], 877_377.717_391_3, 1e-9, "R2");
}

#[test]
fn continuity_at_interior_supports() {
    let result = solve(&bridge_benchmark()).expect("benchmark solves");
    let spans = &result.span_results;

    for i in 0..spans.len() - 1 {
        let (left, right) = (&spans[i], &spans[i + 1]);
        assert_rel(left.moment_at(left.length), right.moment_at(0.0), 1e-9, "moment continuity");
        assert_rel(left.slope_right(), right.slope_left(), 1e-9, "slope continuity");
        assert!(left.deflection_at(left.length).abs() < 1e-12);
        assert!(right.deflection_at(0.0).abs() < 1e-12);
    }
    for sample in [&result.diagrams[0].samples[0], result.diagrams[2].samples.last().unwrap()] {
        assert!(sample.deflection.abs() < 1e-12);
    }
}

#[test]
fn solving_twice_is_bit_identical() {
    let model = bridge_benchmark();
    let first = solve(&model).unwrap();
    let second = solve(&model).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn two_spans_with_two_supports_is_invalid() {
    let model = BeamModel::new(
        vec![Span::new(20.0, 3.0e10), Span::new(25.0, 3.0e10)],
        vec![SupportType::Pinned, SupportType::Pinned],
    );
    let err = solve(&model).unwrap_err();
    assert!(matches!(err, BeamError::InvalidModel { .. }));
    assert_eq!(err.field(), Some("supports"));
}

#[test]
fn invalid_inputs_are_rejected_before_solving() {
    let no_spans = BeamModel::default();
    assert!(solve(&no_spans).is_err());

    let mut bad_ei = BeamModel::continuous(&[10.0, 10.0], 3.0e10).with_load(Load::uniform(0, 1.0));
    bad_ei.spans[1].ei = -1.0;
    assert_eq!(solve(&bad_ei).unwrap_err().field(), Some("spans[1].EI"));

    let straddling = BeamModel::continuous(&[10.0, 10.0], 3.0e10).with_load(Load::point(0, 1.0, 15.0));
    assert_eq!(solve(&straddling).unwrap_err().field(), Some("loads[0].position"));
}

#[test]
fn stiffness_solution_agrees() {
    let model = bridge_benchmark();
    let result = solve(&model).unwrap();
    let check = cross_check(&model, &result).unwrap();
    assert!(check.agrees(REL_TOL), "{check:?}");
}

#[test]
fn json_document_solves() {
    let json = r#"{
        "version": "1.0.0",
        "spans": [
            {"length": 20.0, "EI": 3.0e10, "label": "Side span"},
            {"length": 25.0, "EI": 3.0e10, "label": "Main span"},
            {"length": 20.0, "EI": 3.0e10, "label": "Side span"}
        ],
        "supports": [{"type": "pin"}, {"type": "pin"}, {"type": "pin"}, {"type": "pin"}],
        "loads": [
            {"kind": "uniform", "span": 0, "magnitude": 35000.0},
            {"kind": "uniform", "span": 1, "magnitude": 35000.0},
            {"kind": "uniform", "span": 2, "magnitude": 35000.0},
            {"kind": "point", "span": 1, "magnitude": 100000.0, "position": 12.5, "category": "vehicle"}
        ],
        "settings": {"samples_per_span": 20}
    }"#;
    let document = parse_model(json).expect("document parses");
    let result = solve_with_options(&document.model, &document.settings).expect("solves");

    assert_eq!(result.diagrams[1].samples.len(), 21);
    assert_rel(result.reactions[0].force, 249_932.065_2, 1e-9, "R1");

    let output = serde_json::to_value(&result).unwrap();
    assert!(output["reactions"][0].get("moment").is_none());
    assert!(output["diagrams"][0]["samples"][0]["deflection"].is_number());
}

#[test]
fn default_resolution_is_fifty_intervals() {
    let result = solve_with_options(&bridge_benchmark(), &AnalysisOptions::default()).unwrap();
    assert!(result.diagrams.iter().all(|d| d.samples.len() == 51));
}
