//! Transit of a particle through the Wien filter.

use super::{fsm, timeline::validate_horizon, State, SteppingMethod, Timeline};
use crate::{error::SimulationResult, geometry::Vec2, physics::WienFilterConfig};
use std::fmt;

#[cfg(feature = "serialization")]
use serde::Serialize;

/// How a transit through the filter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub enum TransitOutcome {
    /// The particle passed the far end of the filter.
    Exited,
    /// The particle left the aperture and hit the filter wall.
    Absorbed,
    /// The step budget ran out before either happened.
    InTransit,
}

impl TransitOutcome {
    pub fn did_exit(self) -> bool {
        self == Self::Exited
    }

    /// Value of the `did exit` marker in tabular output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Exited => "yes",
            Self::Absorbed => "no",
            Self::InTransit => "in transit",
        }
    }
}

impl fmt::Display for TransitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Exited => "exited the filter",
                Self::Absorbed => "was absorbed",
                Self::InTransit => "is still in transit",
            }
        )
    }
}

/// Timeline of a particle entering the filter, together with how the transit ended.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct WienTimeline {
    timeline: Timeline,
    outcome: TransitOutcome,
}

impl WienTimeline {
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn outcome(&self) -> TransitOutcome {
        self.outcome
    }

    pub fn did_exit(&self) -> bool {
        self.outcome.did_exit()
    }

    /// Splits into the timeline and the outcome.
    pub fn into_parts(self) -> (Timeline, TransitOutcome) {
        (self.timeline, self.outcome)
    }
}

/// Returns the velocity offset used when none is specified, (0, 3E/B).
pub fn default_velocity_offset(config: &WienFilterConfig) -> Vec2<fsm> {
    config.initial_velocity()
}

/// Creates the state of a particle entering the filter at the origin with the balanced
/// velocity (0, E/B), each perturbed by the given offsets.
pub fn initial_wien_state(
    config: &WienFilterConfig,
    position_offset: &Vec2<fsm>,
    velocity_offset: &Vec2<fsm>,
) -> State {
    State::new(
        config,
        0.0,
        position_offset.clone(),
        &config.entry_velocity() + velocity_offset,
    )
}

/// Determines whether a particle at the given position has left the filter.
///
/// Passing the far end takes precedence over leaving the aperture.
pub fn check_for_exit(config: &WienFilterConfig, position: &Vec2<fsm>) -> Option<TransitOutcome> {
    if position.z() > config.filter_length {
        Some(TransitOutcome::Exited)
    } else if position.y() > config.aperture_radius {
        Some(TransitOutcome::Absorbed)
    } else {
        None
    }
}

/// Integrates the transit of a particle through the filter.
///
/// # Parameters
///
/// - `config`: Fields, particle properties and filter geometry.
/// - `method`: Stepping method to integrate with.
/// - `max_steps`: Maximum number of steps N to take.
/// - `duration`: Duration T defining the time step T/N.
/// - `position_offset`: Offset of the entry position from the origin.
/// - `velocity_offset`: Offset of the entry velocity from the balanced velocity.
///
/// # Returns
///
/// A `SimulationResult<WienTimeline>` which is either:
///
/// - `Ok`: Contains the states up to and including the one where the particle
///   exited or was absorbed, or all `max_steps + 1` states if neither happened.
/// - `Err`: The parameters were invalid, memory could not be reserved or a step failed.
pub fn build_wien_timeline(
    config: &WienFilterConfig,
    method: SteppingMethod,
    max_steps: usize,
    duration: fsm,
    position_offset: &Vec2<fsm>,
    velocity_offset: &Vec2<fsm>,
) -> SimulationResult<WienTimeline> {
    validate_horizon(max_steps, duration)?;

    let dt = duration / (max_steps as fsm);
    let mut timeline = Timeline::new(initial_wien_state(
        config,
        position_offset,
        velocity_offset,
    ))?;

    for _ in 0..max_steps {
        let state = timeline.advance(config, method, dt)?;
        if let Some(outcome) = check_for_exit(config, state.position()) {
            return Ok(WienTimeline { timeline, outcome });
        }
    }
    Ok(WienTimeline {
        timeline,
        outcome: TransitOutcome::InTransit,
    })
}
