use super::*;
use crate::dataset::array::LabeledArray;
use crate::render::frame::FrameRGBA;

fn series(n: usize) -> LabeledArray {
    LabeledArray::from_fn(["time", "x"], vec![n, 2], |i| i[0] as f64).unwrap()
}

fn solid(_: &LabeledArray) -> anyhow::Result<FrameRGBA> {
    Ok(FrameRGBA::solid(4, 4, [0, 0, 0, 255]))
}

fn temp_dirs(root: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(root)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("framereel_tmp_"))
        .map(|e| e.path())
        .collect()
}

#[test]
fn stats_describe_the_run() {
    let root = tempfile::tempdir().unwrap();
    let out = root.path().join("run.gif");
    let data = [series(12)];
    let opts = AnimationOpts {
        index_stride: 4,
        ..AnimationOpts::default()
    };
    let stats = make_animation(&data, &out, FrameFunc::single(solid), &opts).unwrap();
    assert_eq!(
        stats,
        AnimationStats {
            keyframes: 3,
            digit_width: 1,
            frame_duration_ms: 100.0,
            output: out.clone(),
        }
    );
    assert!(out.is_file());
    assert!(temp_dirs(root.path()).is_empty());
}

#[test]
fn request_checks_happen_before_any_directory_exists() {
    let root = tempfile::tempdir().unwrap();
    let data = [series(4), series(5)];

    let err = make_animation(
        &data[..1],
        root.path().join("anim.mp4"),
        FrameFunc::single(solid),
        &AnimationOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));

    let err = make_animation(
        &data,
        root.path().join("anim.gif"),
        FrameFunc::single(solid),
        &AnimationOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::ContractViolation(_)));

    let err = make_animation(
        &data,
        root.path().join("anim.gif"),
        FrameFunc::multi(|_: &[LabeledArray]| Ok(FrameRGBA::solid(1, 1, [0; 4]))),
        &AnimationOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::DimensionMismatch { .. }));

    let bad_opts = AnimationOpts {
        index_stride: 0,
        ..AnimationOpts::default()
    };
    let err = make_animation(
        &data[..1],
        root.path().join("anim.gif"),
        FrameFunc::single(solid),
        &bad_opts,
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));

    assert!(temp_dirs(root.path()).is_empty());
    assert!(!root.path().join("anim.gif").exists());
}

#[test]
fn missing_output_directory_is_directory_creation_error() {
    let root = tempfile::tempdir().unwrap();
    let out = root.path().join("nope").join("anim.gif");
    let mut calls = 0;
    let err = make_animation(
        &[series(3)],
        &out,
        FrameFunc::single(|d: &LabeledArray| {
            calls += 1;
            solid(d)
        }),
        &AnimationOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::DirectoryCreation { .. }));
    assert_eq!(calls, 0);
}

#[test]
fn failed_cleanup_is_reported_with_the_primary_error() {
    let root = tempfile::tempdir().unwrap();
    let root_path = root.path().to_path_buf();
    let out = root.path().join("anim.gif");

    // On the second keyframe, swap the frame directory for a plain file: persisting fails and
    // so does removing the "directory" afterwards.
    let func = FrameFunc::single(|d: &LabeledArray| {
        if d.values()[0] == 1.0 {
            let dir = temp_dirs(&root_path).pop().expect("frame store exists");
            std::fs::remove_dir_all(&dir)?;
            std::fs::write(&dir, b"in the way")?;
        }
        solid(d)
    });
    let err = make_animation(&[series(3)], &out, func, &AnimationOpts::default()).unwrap_err();

    assert!(err.leaked_temp_state());
    match err {
        ReelError::Cleanup { dir, primary, .. } => {
            assert!(dir.is_file());
            let primary = primary.expect("run error is kept");
            assert!(matches!(*primary, ReelError::Persist(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!out.exists());
}

#[test]
fn request_builder_uses_given_options() {
    let root = tempfile::tempdir().unwrap();
    let data = [LabeledArray::from_fn(["frame"], vec![10], |i| i[0] as f64).unwrap()];
    let opts = AnimationOpts {
        anim_dim: "frame".to_owned(),
        fps: crate::foundation::core::Fps::new(25, 1).unwrap(),
        ..AnimationOpts::default()
    };
    let stats = AnimationRequest::new(&data, root.path().join("f.gif"), FrameFunc::single(solid))
        .with_opts(opts)
        .run()
        .unwrap();
    assert_eq!(stats.keyframes, 10);
    assert_eq!(stats.digit_width, 2);
    assert_eq!(stats.frame_duration_ms, 40.0);
}
