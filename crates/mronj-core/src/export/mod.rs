//! Report export for the document renderer.

mod report;

pub use report::*;
