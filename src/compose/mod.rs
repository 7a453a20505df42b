pub(crate) mod batch;
pub(crate) mod config;
pub(crate) mod slide;
