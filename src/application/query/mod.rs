//! Turning validated parameters into a store query

pub mod composer;
pub mod pagination;

pub use composer::FilterComposer;
pub use pagination::PageSpec;
