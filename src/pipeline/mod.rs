pub(crate) mod check;
pub(crate) mod indexer;
pub(crate) mod plan;
