//! Command line interface.

pub mod build;
pub mod completions;
pub mod errors;
pub mod physics;
pub mod run;
pub mod timeline;
pub mod utils;
pub mod wien_timeline;

#[cfg(feature = "sweep")]
pub mod wien_filter;
