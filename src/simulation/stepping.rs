//! Advancing the particle state by one time step.

pub mod analytic;
pub mod euler;
pub mod midpoint;
pub mod runge_kutta;

use self::{
    analytic::AnalyticStepper, euler::EulerStepper, midpoint::MidpointStepper,
    runge_kutta::RungeKuttaStepper,
};
use super::{fsm, State};
use crate::{
    error::{SimulationError, SimulationResult},
    physics::WienFilterConfig,
};
use std::{fmt, str::FromStr};

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Identifier that explicitly selects no stepping method.
pub const NO_METHOD_IDENTIFIER: &str = "none";

/// Defines the properties of a single-step integration scheme.
pub trait Stepper {
    /// Computes the state one time step `dt` after the given state.
    ///
    /// # Parameters
    ///
    /// - `config`: Fields and particle properties determining the acceleration.
    /// - `state`: State to advance from.
    /// - `dt`: Time step (must be positive).
    ///
    /// # Returns
    ///
    /// The new `State`, whose acceleration is derived from its velocity.
    fn step(&self, config: &WienFilterConfig, state: &State, dt: fsm) -> State;

    /// Order of accuracy of the scheme, or `None` if it is exact.
    fn order(&self) -> Option<u32>;

    /// Number of acceleration evaluations the scheme performs per step.
    fn evaluations_per_step(&self) -> u32;
}

/// The available stepping methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub enum SteppingMethod {
    Analytic,
    Euler,
    Midpoint,
    RungeKutta,
}

impl SteppingMethod {
    /// All methods, in order of increasing accuracy with the exact one last.
    pub const ALL: [Self; 4] = [Self::Euler, Self::Midpoint, Self::RungeKutta, Self::Analytic];

    /// Advances the given state by `dt` with this method.
    ///
    /// # Returns
    ///
    /// A `SimulationResult<State>` which is either:
    ///
    /// - `Ok`: Contains the next state.
    /// - `Err`: The step produced non-finite values.
    pub fn advance(
        self,
        config: &WienFilterConfig,
        state: &State,
        dt: fsm,
    ) -> SimulationResult<State> {
        let next_state = match self {
            Self::Analytic => AnalyticStepper.step(config, state, dt),
            Self::Euler => EulerStepper.step(config, state, dt),
            Self::Midpoint => MidpointStepper.step(config, state, dt),
            Self::RungeKutta => RungeKuttaStepper.step(config, state, dt),
        };
        if next_state.is_finite() {
            Ok(next_state)
        } else {
            Err(SimulationError::NonFiniteState {
                time: next_state.time(),
            })
        }
    }

    /// Order of accuracy of the method, or `None` for the analytic method.
    pub fn order(self) -> Option<u32> {
        match self {
            Self::Analytic => AnalyticStepper.order(),
            Self::Euler => EulerStepper.order(),
            Self::Midpoint => MidpointStepper.order(),
            Self::RungeKutta => RungeKuttaStepper.order(),
        }
    }

    /// Number of acceleration evaluations per step.
    pub fn evaluations_per_step(self) -> u32 {
        match self {
            Self::Analytic => AnalyticStepper.evaluations_per_step(),
            Self::Euler => EulerStepper.evaluations_per_step(),
            Self::Midpoint => MidpointStepper.evaluations_per_step(),
            Self::RungeKutta => RungeKuttaStepper.evaluations_per_step(),
        }
    }

    /// Name used to select the method on the command line and in file names.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Analytic => "analytic",
            Self::Euler => "euler",
            Self::Midpoint => "midpoint",
            Self::RungeKutta => "runge_kutta",
        }
    }
}

impl fmt::Display for SteppingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Analytic => "analytic solution",
                Self::Euler => "explicit Euler",
                Self::Midpoint => "explicit midpoint",
                Self::RungeKutta => "fourth-order Runge-Kutta",
            }
        )
    }
}

impl FromStr for SteppingMethod {
    type Err = SimulationError;

    fn from_str(identifier: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|method| method.identifier() == identifier)
            .ok_or_else(|| SimulationError::InvalidMethod(identifier.to_string()))
    }
}

/// Selects the stepping method with the given identifier.
///
/// The `none` identifier is recognized but always refused, so that no
/// timeline can be built without a method.
pub fn select_stepping_method(identifier: &str) -> SimulationResult<SteppingMethod> {
    if identifier == NO_METHOD_IDENTIFIER {
        Err(SimulationError::InvalidMethod(identifier.to_string()))
    } else {
        identifier.parse()
    }
}
