use super::*;
use crate::render::frame::FrameRGBA;

fn frame() -> FrameRGBA {
    FrameRGBA::solid(2, 2, [10, 20, 30, 255])
}

#[test]
fn open_creates_unique_directories_next_to_output() {
    let root = tempfile::tempdir().unwrap();
    let out = root.path().join("anim.gif");

    let a = FrameStore::open(&out, 1).unwrap();
    let b = FrameStore::open(&out, 1).unwrap();
    assert_ne!(a.dir(), b.dir());
    for store in [&a, &b] {
        assert!(store.dir().is_dir());
        assert_eq!(store.dir().parent(), Some(root.path()));
        let name = store.dir().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("framereel_tmp_anim."));
    }
    a.close().unwrap();
    b.close().unwrap();
}

#[test]
fn frame_names_sort_in_keyframe_order() {
    let root = tempfile::tempdir().unwrap();
    for n in [9usize, 10, 99, 100, 101] {
        let width = crate::foundation::core::decimal_digits(n);
        let store = FrameStore::open(&root.path().join("a.gif"), width).unwrap();
        let names: Vec<String> = (0..n).map(|k| store.frame_file_name(Keyframe(k))).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted, "n_keyframes = {n}");
        assert_eq!(
            store.frame_file_name(Keyframe(n - 1)).len(),
            store.frame_file_name(Keyframe(0)).len()
        );
        store.close().unwrap();
    }
}

#[test]
fn persist_writes_pngs_in_order() {
    let root = tempfile::tempdir().unwrap();
    let mut store = FrameStore::open(&root.path().join("run.gif"), 2).unwrap();
    let style = SaveStyle::default();
    for k in 0..3 {
        let path = store.persist(Keyframe(k), frame(), &style).unwrap();
        assert!(path.is_file());
    }
    let names: Vec<_> = store
        .files()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "framereel_frame_00.png",
            "framereel_frame_01.png",
            "framereel_frame_02.png"
        ]
    );
    store.close().unwrap();
}

#[test]
fn persist_rejects_out_of_order_keyframes() {
    let root = tempfile::tempdir().unwrap();
    let mut store = FrameStore::open(&root.path().join("run.gif"), 1).unwrap();
    let err = store
        .persist(Keyframe(1), frame(), &SaveStyle::default())
        .unwrap_err();
    assert!(matches!(err, ReelError::Persist(_)));
    assert!(store.files().is_empty());
}

#[test]
fn close_removes_directory_and_contents() {
    let root = tempfile::tempdir().unwrap();
    let mut store = FrameStore::open(&root.path().join("run.gif"), 1).unwrap();
    store
        .persist(Keyframe(0), frame(), &SaveStyle::default())
        .unwrap();
    let dir = store.dir().to_path_buf();
    store.close().unwrap();
    assert!(!dir.exists());
}

#[test]
fn close_after_directory_vanished_is_a_no_op() {
    let root = tempfile::tempdir().unwrap();
    let store = FrameStore::open(&root.path().join("run.gif"), 1).unwrap();
    std::fs::remove_dir_all(store.dir()).unwrap();
    store.close().unwrap();
}

#[test]
fn drop_without_close_still_cleans_up() {
    let root = tempfile::tempdir().unwrap();
    let dir = {
        let mut store = FrameStore::open(&root.path().join("run.gif"), 1).unwrap();
        store
            .persist(Keyframe(0), frame(), &SaveStyle::default())
            .unwrap();
        store.dir().to_path_buf()
    };
    assert!(!dir.exists());
}

#[test]
fn open_in_missing_parent_is_directory_creation_error() {
    let root = tempfile::tempdir().unwrap();
    let out = root.path().join("no").join("such").join("anim.gif");
    let err = FrameStore::open(&out, 1).unwrap_err();
    assert!(matches!(err, ReelError::DirectoryCreation { .. }));
    assert!(!root.path().join("no").exists());
}

#[test]
fn unique_suffixes_differ_within_a_process() {
    assert_ne!(unique_suffix(), unique_suffix());
}
