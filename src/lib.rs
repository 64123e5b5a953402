//! The `wien_filter` crate simulates charged particles moving through crossed
//! electric and magnetic fields, and measures the accuracy of the numerical
//! integration methods used.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod io;
pub mod num;
pub mod physics;
pub mod simulation;

#[cfg(feature = "cli")]
pub mod cli;
