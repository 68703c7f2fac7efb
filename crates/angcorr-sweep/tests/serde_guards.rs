mod common;

use angcorr_core::AngCorrError;
use angcorr_sweep::serde::{from_json_slice, to_canonical_json_bytes};
use angcorr_sweep::{sweep, ArctanGrid, AsymmetryGrid, ParameterBinding, SweepConfig};
use common::{double_binding, single_binding, ToyOracle};
use serde_json::{json, Value};

fn tampered<T: serde::Serialize>(value: &T, edit: impl FnOnce(&mut Value)) -> Vec<u8> {
    let mut doc: Value = from_json_slice(&to_canonical_json_bytes(value).unwrap()).unwrap();
    edit(&mut doc);
    serde_json::to_vec(&doc).unwrap()
}

fn rejected_with(err: AngCorrError, code: &str) {
    assert!(matches!(err, AngCorrError::Serde(ref info) if info.code == "json-deserialize"));
    assert!(err.info().message.contains("invalid argument"), "{err}");
    assert!(err.info().message.contains(code), "{err}");
}

#[test]
fn bindings_round_trip_through_json() {
    let binding = double_binding();
    let bytes = to_canonical_json_bytes(&binding).unwrap();
    let decoded: ParameterBinding = from_json_slice(&bytes).unwrap();
    assert_eq!(decoded, binding);
}

#[test]
fn binding_with_a_forged_parameter_count_is_rejected() {
    let bytes = tampered(&double_binding(), |doc| doc["free_parameter_count"] = json!(1));
    let err = from_json_slice::<ParameterBinding>(&bytes).unwrap_err();
    rejected_with(err, "free-parameter-count-mismatch");
}

#[test]
fn binding_with_an_odd_multipolarity_is_rejected() {
    let bytes = tampered(&single_binding(), |doc| {
        doc["cascade"]["steps"][0]["transition"]["two_l"] = json!(5)
    });
    let err = from_json_slice::<ParameterBinding>(&bytes).unwrap_err();
    rejected_with(err, "odd-multipolarity");
}

#[test]
fn grids_round_trip_through_json() {
    let grid = sweep(&double_binding(), &ToyOracle, &SweepConfig::new(5, 2.0)).unwrap();
    let decoded: AsymmetryGrid = from_json_slice(&to_canonical_json_bytes(&grid).unwrap()).unwrap();
    assert_eq!(decoded, grid);
}

#[test]
fn grid_with_extra_samples_is_rejected() {
    let grid = sweep(&double_binding(), &ToyOracle, &SweepConfig::new(5, 2.0)).unwrap();
    let bytes = tampered(&grid, |doc| {
        for key in ["a45", "a90"] {
            let samples = doc[key].as_array().unwrap().clone();
            let doubled = samples.iter().chain(&samples).cloned().collect();
            doc[key] = Value::Array(doubled);
        }
    });
    let err = from_json_slice::<AsymmetryGrid>(&bytes).unwrap_err();
    rejected_with(err, "cell-count-mismatch");
}

#[test]
fn grid_with_an_unsupported_parameter_count_is_rejected() {
    let grid = sweep(&single_binding(), &ToyOracle, &SweepConfig::new(5, 2.0)).unwrap();
    let bytes = tampered(&grid, |doc| doc["free_parameters"] = json!(3));
    let err = from_json_slice::<AsymmetryGrid>(&bytes).unwrap_err();
    rejected_with(err, "free-parameter-count");
}

#[test]
fn arctan_samples_must_match_their_definition() {
    let axis = ArctanGrid::new(5, 2.0).unwrap();
    let bytes = tampered(&axis, |doc| doc["arctan_deltas"][2] = json!(0.3));
    let err = from_json_slice::<ArctanGrid>(&bytes).unwrap_err();
    rejected_with(err, "grid-mismatch");

    let bytes = tampered(&axis, |doc| doc["arctan_deltas"] = json!([0.0]));
    let err = from_json_slice::<ArctanGrid>(&bytes).unwrap_err();
    rejected_with(err, "resolution-too-small");
}
