use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::Keyframe;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::{RenderableFrame, SaveStyle};

const DIR_PREFIX: &str = "framereel_tmp_";
const FILE_PREFIX: &str = "framereel_frame_";
const MAX_CREATE_ATTEMPTS: u32 = 16;

static RUN_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Run-unique temporary directory holding rendered frames in keyframe order.
///
/// The directory is removed exactly once: by [`FrameStore::close`], or on drop if the store was
/// never closed (for example when a run unwinds).
#[derive(Debug)]
pub struct FrameStore {
    dir: PathBuf,
    digit_width: usize,
    files: Vec<PathBuf>,
    closed: bool,
}

impl FrameStore {
    /// Create a fresh frame directory next to `out_path`.
    ///
    /// The directory name combines the output file's stem with a process-id, timestamp, and
    /// in-process counter suffix; an existing path is never reused.
    pub fn open(out_path: &Path, digit_width: usize) -> ReelResult<Self> {
        let parent = match out_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let stem = out_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "anim".to_owned());

        let mut attempt = 0;
        loop {
            let dir = parent.join(format!("{DIR_PREFIX}{stem}.{}", unique_suffix()));
            match std::fs::create_dir(&dir) {
                Ok(()) => {
                    tracing::debug!(dir = %dir.display(), "opened frame store");
                    return Ok(Self {
                        dir,
                        digit_width: digit_width.max(1),
                        files: Vec::new(),
                        closed: false,
                    });
                }
                Err(e)
                    if e.kind() == std::io::ErrorKind::AlreadyExists
                        && attempt + 1 < MAX_CREATE_ATTEMPTS =>
                {
                    attempt += 1;
                }
                Err(source) => {
                    return Err(ReelError::DirectoryCreation { path: dir, source });
                }
            }
        }
    }

    /// Frame directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persisted frame files, in keyframe order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// File name for `keyframe`, zero-padded so lexicographic order equals keyframe order.
    pub fn frame_file_name(&self, keyframe: Keyframe) -> String {
        format!(
            "{FILE_PREFIX}{:0width$}.png",
            keyframe.0,
            width = self.digit_width
        )
    }

    /// Write `frame` as the raster for `keyframe` and record its path.
    ///
    /// Keyframes must arrive in strictly increasing order. The frame is dropped once written.
    pub fn persist<F: RenderableFrame>(
        &mut self,
        keyframe: Keyframe,
        frame: F,
        style: &SaveStyle,
    ) -> ReelResult<&Path> {
        if keyframe.0 != self.files.len() {
            return Err(ReelError::persist(format!(
                "keyframe {} persisted out of order (expected {})",
                keyframe.0,
                self.files.len()
            )));
        }

        let path = self.dir.join(self.frame_file_name(keyframe));
        frame.save_png(&path, style).map_err(|e| {
            ReelError::persist(format!("write frame '{}': {e}", path.display()))
        })?;
        drop(frame);

        self.files.push(path);
        Ok(&self.files[self.files.len() - 1])
    }

    /// Recursively delete the frame directory.
    ///
    /// A directory that is already gone counts as closed.
    pub fn close(mut self) -> ReelResult<()> {
        self.closed = true;
        let dir = std::mem::take(&mut self.dir);
        remove_dir(&dir).map_err(|source| ReelError::Cleanup {
            dir,
            source,
            primary: None,
        })
    }
}

impl Drop for FrameStore {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = remove_dir(&self.dir) {
            tracing::warn!(dir = %self.dir.display(), error = %e, "failed to remove frame store");
        }
    }
}

fn remove_dir(dir: &Path) -> std::io::Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {
            tracing::debug!(dir = %dir.display(), "closed frame store");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

pub(crate) fn unique_suffix() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let n = RUN_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{nanos}-{n}", std::process::id())
}

#[cfg(test)]
#[path = "../../tests/unit/store/transient.rs"]
mod tests;
