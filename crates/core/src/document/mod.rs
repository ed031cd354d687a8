//! PDF document assembly.

pub mod builder;

pub use builder::{ObjectWriter, build_pdf};
