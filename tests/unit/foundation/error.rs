use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ReelError::contract("x")
            .to_string()
            .contains("contract violation:")
    );
    assert!(ReelError::persist("x").to_string().contains("persist error:"));
    assert!(
        ReelError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn dimension_mismatch_names_dim_and_extents() {
    let err = ReelError::DimensionMismatch {
        dim: "time".to_owned(),
        expected: 10,
        found: 7,
        dataset: 2,
    };
    let msg = err.to_string();
    assert!(msg.contains("'time'"));
    assert!(msg.contains("10"));
    assert!(msg.contains('7'));
    assert!(!err.leaked_temp_state());
}

#[test]
fn cleanup_error_reports_primary_failure() {
    let err = ReelError::Cleanup {
        dir: PathBuf::from("out/framereel_tmp_anim.1"),
        source: std::io::Error::other("busy"),
        primary: Some(Box::new(ReelError::encoding("disk full"))),
    };
    assert!(err.leaked_temp_state());
    let msg = err.to_string();
    assert!(msg.contains("left behind"));
    assert!(msg.contains("busy"));
    assert!(msg.contains("disk full"));

    let lone = ReelError::Cleanup {
        dir: PathBuf::from("x"),
        source: std::io::Error::other("busy"),
        primary: None,
    };
    assert!(!lone.to_string().contains("after run failed"));
}
