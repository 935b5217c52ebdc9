use crate::foundation::core::{Keyframe, decimal_digits};
use crate::foundation::error::{ReelError, ReelResult};

/// How many keyframes a run renders and how their frame files are named.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct KeyframePlan {
    /// Extent of the animation dimension.
    pub extent: usize,
    /// Step between selected indices along the animation dimension.
    pub stride: usize,
    /// `ceil(extent / stride)`.
    pub n_keyframes: usize,
    /// Zero-padding width for frame file names: `decimal_digits(n_keyframes)`.
    pub digit_width: usize,
}

impl KeyframePlan {
    /// Plan keyframes for an animation dimension of `extent` entries sampled every `stride`.
    pub fn new(extent: usize, stride: usize) -> ReelResult<Self> {
        if stride == 0 {
            return Err(ReelError::validation("index_stride must be >= 1"));
        }
        if extent == 0 {
            return Err(ReelError::validation(
                "animation dimension is empty; there is nothing to render",
            ));
        }
        let n_keyframes = extent.div_ceil(stride);
        Ok(Self {
            extent,
            stride,
            n_keyframes,
            digit_width: decimal_digits(n_keyframes),
        })
    }

    /// Keyframes in rendering order.
    pub fn keyframes(&self) -> impl Iterator<Item = Keyframe> + use<> {
        (0..self.n_keyframes).map(Keyframe)
    }

    /// Completion percentage after `keyframe` has been persisted, rounded to one decimal.
    pub fn progress_percent(&self, keyframe: Keyframe) -> f64 {
        let done = (keyframe.0 + 1) as f64 / self.n_keyframes as f64;
        (done * 1000.0).round() / 10.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/plan.rs"]
mod tests;
