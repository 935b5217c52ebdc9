pub(crate) mod transient;
