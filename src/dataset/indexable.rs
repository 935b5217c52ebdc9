use crate::foundation::error::ReelResult;

/// Dimension-named, multi-axis data that the pipeline can slice along a named dimension.
///
/// The pipeline only reads datasets; implementations return new values from every selection.
pub trait Indexable: Sized {
    /// Dimension names in axis order.
    fn dims(&self) -> Vec<&str>;

    /// Extent along `dim`, or `None` when the dataset does not carry it.
    fn dim_len(&self, dim: &str) -> Option<usize>;

    /// Whether the dataset carries `dim`.
    fn has_dim(&self, dim: &str) -> bool {
        self.dim_len(dim).is_some()
    }

    /// Select `index` along `dim`, dropping that dimension and collapsing every size-1 axis.
    ///
    /// Fails with [`crate::ReelError::IndexOutOfRange`] when `index` is past the extent.
    fn isel_squeeze(&self, dim: &str, index: usize) -> ReelResult<Self>;

    /// Collapse every size-1 axis without selecting anything.
    fn squeeze(&self) -> Self;
}
