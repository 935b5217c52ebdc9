pub(crate) mod adapter;
pub(crate) mod figure;
pub(crate) mod frame;
pub(crate) mod heatmap;
