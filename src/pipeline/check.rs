use crate::dataset::indexable::Indexable;
use crate::foundation::error::{ReelError, ReelResult};

/// Verify that every dataset declaring `anim_dim` agrees on its extent, and return that extent.
///
/// Datasets without `anim_dim` are broadcast across all keyframes and skipped here. The extent
/// is taken from the first dataset that declares the dimension.
pub fn check_consistency<D: Indexable>(datasets: &[D], anim_dim: &str) -> ReelResult<usize> {
    if datasets.is_empty() {
        return Err(ReelError::validation("at least one input dataset is required"));
    }

    let mut expected = None;
    for (i, ds) in datasets.iter().enumerate() {
        let Some(found) = ds.dim_len(anim_dim) else {
            continue;
        };
        match expected {
            None => expected = Some(found),
            Some(expected) if expected != found => {
                return Err(ReelError::DimensionMismatch {
                    dim: anim_dim.to_owned(),
                    expected,
                    found,
                    dataset: i,
                });
            }
            Some(_) => {}
        }
    }

    expected.ok_or_else(|| {
        ReelError::validation(format!(
            "no input dataset has the animation dimension '{anim_dim}'"
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/check.rs"]
mod tests;
