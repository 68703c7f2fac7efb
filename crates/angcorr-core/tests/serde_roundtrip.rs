use angcorr_core::{
    Cascade, CascadeStep, EmCharacter, EulerAngles, Parity, SchemaVersion, State, Transition,
};

#[test]
fn cascade_round_trip_json() {
    let cascade = Cascade::new(
        State::new(5, Parity::Positive),
        vec![
            CascadeStep::new(
                Transition::new(EmCharacter::Electric, 4, EmCharacter::Magnetic, 6, -1.0).unwrap(),
                State::new(9, Parity::Positive),
            ),
            CascadeStep::new(
                Transition::new(EmCharacter::Unknown, 4, EmCharacter::Unknown, 6, 100.0).unwrap(),
                State::new(5, Parity::Unknown),
            ),
        ],
    )
    .unwrap();

    let json = serde_json::to_string_pretty(&cascade).expect("serialize");
    assert!(json.contains("\"electric\""));
    let decoded: Cascade = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, cascade);
}

#[test]
fn euler_angles_and_schema_round_trip_json() {
    let euler = EulerAngles::new(0.0, 1.5, -0.5);
    let decoded: EulerAngles =
        serde_json::from_str(&serde_json::to_string(&euler).unwrap()).unwrap();
    assert_eq!(decoded, euler);

    let schema = SchemaVersion::new(1, 2, 0);
    assert!(schema.is_compatible_with(&SchemaVersion::default()));
    assert!(!SchemaVersion::default().is_compatible_with(&schema));
}

#[test]
fn tampered_transitions_are_rejected() {
    let transition =
        Transition::new(EmCharacter::Electric, 4, EmCharacter::Magnetic, 6, 0.5).unwrap();
    let mut value = serde_json::to_value(transition).unwrap();
    value["two_l"] = serde_json::json!(3);
    let err = serde_json::from_value::<Transition>(value).unwrap_err();
    assert!(err.to_string().contains("invalid argument"));
    assert!(err.to_string().contains("odd-multipolarity"));

    let decoded: Transition =
        serde_json::from_value(serde_json::to_value(transition).unwrap()).unwrap();
    assert_eq!(decoded, transition);
}

#[test]
fn empty_cascades_are_rejected() {
    let json = r#"{"initial_state": {"two_j": 0, "parity": "positive"}, "steps": []}"#;
    let err = serde_json::from_str::<Cascade>(json).unwrap_err();
    assert!(err.to_string().contains("empty-cascade"));
}
