pub(crate) mod animate;
pub(crate) mod opts;
