use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};
use crate::store::transient::unique_suffix;

/// Animation container chosen from the output path's extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationFormat {
    /// Animated GIF.
    Gif,
}

impl AnimationFormat {
    /// Pick the container for `path`, or `None` when the extension is unsupported.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("gif") {
            Some(Self::Gif)
        } else {
            None
        }
    }
}

/// Playback parameters of the compiled artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompileOpts {
    /// Playback rate; each frame is shown for `1000 / fps` milliseconds.
    pub fps: Fps,
    /// Loop count written to the container; `0` loops forever.
    pub loop_count: u16,
}

impl CompileOpts {
    fn repeat(self) -> Repeat {
        match self.loop_count {
            0 => Repeat::Infinite,
            n => Repeat::Finite(n),
        }
    }
}

/// Decode `frame_paths` in order and encode them into one animation at `out_path`.
///
/// List order is playback order. The artifact is encoded in memory, written to a sibling
/// partial file, and renamed onto `out_path`, so a failed compile never leaves a committed
/// artifact behind.
#[tracing::instrument(skip(frame_paths), fields(frames = frame_paths.len()))]
pub fn compile_animation(
    frame_paths: &[PathBuf],
    out_path: &Path,
    opts: CompileOpts,
) -> ReelResult<()> {
    if AnimationFormat::from_path(out_path).is_none() {
        return Err(ReelError::encoding(format!(
            "unsupported animation format for '{}' (expected .gif)",
            out_path.display()
        )));
    }
    if frame_paths.is_empty() {
        return Err(ReelError::encoding("no frames to compile"));
    }

    let frames = decode_frames(frame_paths)?;
    let (numer, denom) = opts.fps.frame_duration_ms_ratio();
    let delay = Delay::from_numer_denom_ms(numer, denom);

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder
            .set_repeat(opts.repeat())
            .map_err(|e| ReelError::encoding(format!("set gif loop count: {e}")))?;
        encoder
            .encode_frames(
                frames
                    .into_iter()
                    .map(|img| Frame::from_parts(img, 0, 0, delay)),
            )
            .map_err(|e| ReelError::encoding(format!("encode gif frames: {e}")))?;
    }

    commit(&bytes, out_path)?;
    tracing::debug!(out = %out_path.display(), bytes = bytes.len(), "wrote animation");
    Ok(())
}

fn decode_frames(frame_paths: &[PathBuf]) -> ReelResult<Vec<RgbaImage>> {
    let mut frames = Vec::with_capacity(frame_paths.len());
    let mut size = None;
    for path in frame_paths {
        let img = image::open(path)
            .map_err(|e| ReelError::encoding(format!("decode frame '{}': {e}", path.display())))?
            .to_rgba8();
        let dims = img.dimensions();
        match size {
            None => size = Some(dims),
            Some(first) if first != dims => {
                return Err(ReelError::encoding(format!(
                    "frame size mismatch: '{}' is {}x{}, expected {}x{}",
                    path.display(),
                    dims.0,
                    dims.1,
                    first.0,
                    first.1
                )));
            }
            Some(_) => {}
        }
        frames.push(img);
    }
    Ok(frames)
}

fn commit(bytes: &[u8], out_path: &Path) -> ReelResult<()> {
    let file_name = out_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "anim.gif".to_owned());
    let partial_path =
        out_path.with_file_name(format!(".{file_name}.partial-{}", unique_suffix()));
    let guard = PartialFileGuard(Some(partial_path.clone()));

    std::fs::write(&partial_path, bytes).map_err(|e| {
        ReelError::encoding(format!("write '{}': {e}", partial_path.display()))
    })?;
    std::fs::rename(&partial_path, out_path).map_err(|e| {
        ReelError::encoding(format!("commit '{}': {e}", out_path.display()))
    })?;
    guard.disarm();
    Ok(())
}

struct PartialFileGuard(Option<PathBuf>);

impl PartialFileGuard {
    fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for PartialFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
