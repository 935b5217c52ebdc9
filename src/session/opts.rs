use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::SaveStyle;

/// Per-run animation options.
///
/// Every field has a default, so `{}` is a valid JSON document:
///
/// ```json
/// { "anim_dim": "time", "index_stride": 1, "fps": 10, "loop": 0,
///   "fig_transparent": true, "fig_facecolor": "white", "verbose": false }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationOpts {
    /// Dimension iterated to produce frames.
    pub anim_dim: String,
    /// Step between selected indices along `anim_dim` (>= 1).
    pub index_stride: usize,
    /// Report progress at `info` level instead of `debug`.
    pub verbose: bool,
    /// Playback rate. Accepts a number or `{ "num": .., "den": .. }` in JSON.
    #[serde(deserialize_with = "deserialize_fps")]
    pub fps: Fps,
    /// Leave the plot area of figures unpainted.
    pub fig_transparent: bool,
    /// Figure background; `"none"` keeps frame alpha.
    pub fig_facecolor: Color,
    /// Loop count of the artifact; `0` loops forever.
    #[serde(rename = "loop", alias = "loop_count")]
    pub loop_count: u16,
}

impl Default for AnimationOpts {
    fn default() -> Self {
        Self {
            anim_dim: "time".to_owned(),
            index_stride: 1,
            verbose: false,
            fps: Fps::default(),
            fig_transparent: true,
            fig_facecolor: Color::WHITE,
            loop_count: 0,
        }
    }
}

impl AnimationOpts {
    /// Parse options from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::validation(format!("parse animation options JSON: {e}")))
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open animation options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check option values that serde cannot.
    pub fn validate(&self) -> ReelResult<()> {
        if self.anim_dim.is_empty() {
            return Err(ReelError::validation("anim_dim must be non-empty"));
        }
        if self.index_stride == 0 {
            return Err(ReelError::validation("index_stride must be >= 1"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        Ok(())
    }

    /// How frames are written into the frame store.
    pub fn save_style(&self) -> SaveStyle {
        SaveStyle {
            transparent: self.fig_transparent,
            facecolor: self.fig_facecolor,
        }
    }
}

fn deserialize_fps<'de, D>(deserializer: D) -> Result<Fps, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Rate(f64),
        Ratio { num: u32, den: u32 },
    }

    match Repr::deserialize(deserializer)? {
        Repr::Rate(r) => Fps::from_f64(r).map_err(serde::de::Error::custom),
        Repr::Ratio { num, den } => Fps::new(num, den).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
