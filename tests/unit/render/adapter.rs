use super::*;
use crate::foundation::core::Keyframe;
use crate::render::frame::FrameRGBA;

fn slice(keyframe: usize, slices: Vec<f64>) -> FrameSlice<f64> {
    FrameSlice {
        keyframe: Keyframe(keyframe),
        source_index: keyframe,
        slices,
    }
}

#[test]
fn single_receives_the_one_slice() {
    let mut seen = Vec::new();
    let mut func = FrameFunc::single(|v: &f64| {
        seen.push(*v);
        Ok(FrameRGBA::solid(1, 1, [0, 0, 0, 255]))
    });
    func.check_arity(1).unwrap();
    func.render(&slice(0, vec![3.5])).unwrap();
    func.render(&slice(1, vec![4.5])).unwrap();
    drop(func);
    assert_eq!(seen, vec![3.5, 4.5]);
}

#[test]
fn single_rejects_multiple_inputs() {
    let func = FrameFunc::single(|_: &f64| Ok(FrameRGBA::solid(1, 1, [0; 4])));
    assert!(matches!(
        func.check_arity(2),
        Err(ReelError::ContractViolation(_))
    ));

    let mut func = func;
    assert!(matches!(
        func.render(&slice(0, vec![1.0, 2.0])),
        Err(ReelError::ContractViolation(_))
    ));
}

#[test]
fn multi_receives_slices_positionally() {
    let mut calls = 0;
    let mut func = FrameFunc::multi(|vals: &[f64]| {
        calls += 1;
        assert_eq!(vals, &[1.0, 2.0, 3.0]);
        Ok(FrameRGBA::solid(2, 2, [0; 4]))
    });
    func.check_arity(3).unwrap();
    func.check_arity(1).unwrap();
    func.render(&slice(0, vec![1.0, 2.0, 3.0])).unwrap();
    drop(func);
    assert_eq!(calls, 1);
}

#[test]
fn callback_errors_carry_the_keyframe() {
    let mut func = FrameFunc::<f64, FrameRGBA>::single(|_| anyhow::bail!("axis limits"));
    match func.render(&slice(7, vec![0.0])).unwrap_err() {
        ReelError::Render { keyframe, source } => {
            assert_eq!(keyframe, 7);
            assert!(source.to_string().contains("axis limits"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unrenderable_frames_are_contract_violations() {
    let mut func = FrameFunc::single(|_: &f64| Ok(FrameRGBA::solid(0, 0, [0; 4])));
    let err = func.render(&slice(2, vec![0.0])).unwrap_err();
    assert!(matches!(err, ReelError::ContractViolation(_)));
    assert!(err.to_string().contains("keyframe 2"));
}
