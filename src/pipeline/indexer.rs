use crate::dataset::indexable::Indexable;
use crate::foundation::core::Keyframe;
use crate::foundation::error::{ReelError, ReelResult};

/// Per-keyframe view of the input datasets, aligned 1:1 with the inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSlice<D> {
    /// Keyframe this slice belongs to.
    pub keyframe: Keyframe,
    /// Index selected along the animation dimension.
    pub source_index: usize,
    /// One reduced (or broadcast) dataset per input.
    pub slices: Vec<D>,
}

impl<D> FrameSlice<D> {
    /// Borrow the reduced datasets in input order.
    pub fn as_slice(&self) -> &[D] {
        &self.slices
    }
}

/// Index every dataset at `keyframe`.
///
/// Datasets carrying `anim_dim` are selected at `keyframe * stride` and squeezed; the rest are
/// squeezed and passed through unindexed.
pub fn index_frame<D: Indexable>(
    datasets: &[D],
    keyframe: Keyframe,
    stride: usize,
    anim_dim: &str,
) -> ReelResult<FrameSlice<D>> {
    let source_index = keyframe.source_index(stride);
    let mut slices = Vec::with_capacity(datasets.len());
    for ds in datasets {
        let slice = match ds.dim_len(anim_dim) {
            Some(len) if source_index >= len => {
                return Err(ReelError::IndexOutOfRange {
                    dim: anim_dim.to_owned(),
                    index: source_index,
                    len,
                });
            }
            Some(_) => ds.isel_squeeze(anim_dim, source_index)?,
            None => ds.squeeze(),
        };
        slices.push(slice);
    }
    Ok(FrameSlice {
        keyframe,
        source_index,
        slices,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/indexer.rs"]
mod tests;
