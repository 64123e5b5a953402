//! Simulating the motion of a charged particle in crossed electric and magnetic fields.

pub mod convergence;
pub mod state;
pub mod stepping;
#[cfg(feature = "sweep")]
pub mod sweep;
pub mod timeline;
pub mod wien;

pub use self::{
    state::State,
    stepping::{select_stepping_method, SteppingMethod},
    timeline::{build_timeline, Timeline},
    wien::{build_wien_timeline, TransitOutcome, WienTimeline},
};

/// Floating-point precision to use for simulation.
#[allow(non_camel_case_types)]
pub type fsm = f64;
