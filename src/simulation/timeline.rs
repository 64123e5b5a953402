//! Sequences of particle states and the fixed-horizon trajectory builder.

use super::{fsm, State, SteppingMethod};
use crate::{
    error::{SimulationError, SimulationResult},
    physics::WienFilterConfig,
};
use std::slice;

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Ordered sequence of states, starting at time zero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct Timeline {
    states: Vec<State>,
}

impl Timeline {
    /// Creates a new timeline holding only the given initial state.
    pub fn new(initial_state: State) -> SimulationResult<Self> {
        Self::with_capacity(initial_state, 1)
    }

    /// Creates a new timeline holding the given initial state, with room
    /// for `capacity` states in total.
    ///
    /// Fails with `SimulationError::Allocation` if the memory cannot be reserved.
    pub fn with_capacity(initial_state: State, capacity: usize) -> SimulationResult<Self> {
        let mut states = Vec::new();
        states.try_reserve_exact(capacity.max(1))?;
        states.push(initial_state);
        Ok(Self { states })
    }

    /// Appends the given state to the end of the timeline.
    pub fn push(&mut self, state: State) -> SimulationResult<()> {
        self.states.try_reserve(1)?;
        self.states.push(state);
        Ok(())
    }

    /// Returns the initial state.
    pub fn first(&self) -> &State {
        &self.states[0]
    }

    /// Returns the most recent state.
    pub fn last(&self) -> &State {
        &self.states[self.states.len() - 1]
    }

    /// Returns the number of states in the timeline.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// A timeline always holds its initial state, so this is always `false`.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, State> {
        self.states.iter()
    }

    /// Advances the last state by `dt` with the given method and appends the result.
    pub fn advance(
        &mut self,
        config: &WienFilterConfig,
        method: SteppingMethod,
        dt: fsm,
    ) -> SimulationResult<&State> {
        let next_state = method.advance(config, self.last(), dt)?;
        self.push(next_state)?;
        Ok(self.last())
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a State;
    type IntoIter = slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Checks that a step count and a duration can define a time step.
pub(crate) fn validate_horizon(n_steps: usize, duration: fsm) -> SimulationResult<()> {
    if n_steps == 0 {
        Err(SimulationError::InvalidParameters(
            "number of steps must be larger than zero".to_string(),
        ))
    } else if !(duration.is_finite() && duration > 0.0) {
        Err(SimulationError::InvalidParameters(format!(
            "duration must be finite and larger than zero, but was {}",
            duration
        )))
    } else {
        Ok(())
    }
}

/// Integrates the trajectory from the default starting state over a fixed duration.
///
/// # Parameters
///
/// - `config`: Fields and particle properties.
/// - `method`: Stepping method to integrate with.
/// - `n_steps`: Number of equal steps N to divide the duration into.
/// - `duration`: Total simulated time T.
///
/// # Returns
///
/// A `SimulationResult<Timeline>` which is either:
///
/// - `Ok`: Contains a timeline of exactly `n_steps + 1` states, the `i`th at time `i*T/N`.
/// - `Err`: The parameters were invalid, memory could not be reserved or a step failed.
pub fn build_timeline(
    config: &WienFilterConfig,
    method: SteppingMethod,
    n_steps: usize,
    duration: fsm,
) -> SimulationResult<Timeline> {
    validate_horizon(n_steps, duration)?;
    let capacity = n_steps.checked_add(1).ok_or(SimulationError::Allocation)?;

    let dt = duration / (n_steps as fsm);
    let mut timeline = Timeline::with_capacity(State::initial(config), capacity)?;

    for _ in 0..n_steps {
        timeline.advance(config, method, dt)?;
    }
    Ok(timeline)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::{constants, geometry::Vec2};
    use approx::assert_abs_diff_eq;

    #[test]
    fn timeline_holds_n_plus_one_states_at_regular_times() {
        let config = WienFilterConfig::default();
        for method in SteppingMethod::ALL {
            let timeline = build_timeline(&config, method, 500, 10.0).unwrap();
            assert_eq!(timeline.len(), 501);
            assert!(!timeline.is_empty());
            assert_eq!(timeline.first().time(), 0.0);
            assert_eq!(timeline.first(), &State::initial(&config));
            assert_abs_diff_eq!(timeline.last().time(), 10.0, epsilon = 1e-9);
            for (i, state) in timeline.iter().enumerate() {
                assert_abs_diff_eq!(state.time(), (i as fsm) * 0.02, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn single_step_timeline_has_two_states() {
        let config = WienFilterConfig::default();
        let timeline = build_timeline(&config, SteppingMethod::Euler, 1, 1.0).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.last().time(), 1.0);
    }

    #[test]
    fn builds_are_deterministic() {
        let config = WienFilterConfig::default();
        for method in SteppingMethod::ALL {
            let first = build_timeline(&config, method, 200, 7.5).unwrap();
            let second = build_timeline(&config, method, 200, 7.5).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn invalid_horizons_are_refused() {
        let config = WienFilterConfig::default();
        for (n_steps, duration) in [
            (0, 1.0),
            (10, 0.0),
            (10, -1.0),
            (10, fsm::NAN),
            (10, fsm::INFINITY),
        ] {
            assert!(matches!(
                build_timeline(&config, SteppingMethod::RungeKutta, n_steps, duration),
                Err(SimulationError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn failed_step_abandons_build() {
        let config = WienFilterConfig {
            electric_field: 1e307,
            ..WienFilterConfig::default()
        };
        for method in SteppingMethod::ALL {
            assert!(matches!(
                build_timeline(&config, method, 100, 1000.0),
                Err(SimulationError::NonFiniteState { .. })
            ));
        }
    }

    #[test]
    fn unreservable_timelines_are_refused() {
        let config = WienFilterConfig::default();
        for n_steps in [usize::MAX, usize::MAX / 2] {
            assert_eq!(
                build_timeline(&config, SteppingMethod::Euler, n_steps, 1.0),
                Err(SimulationError::Allocation)
            );
        }
    }

    #[test]
    fn analytic_orbit_drifts_by_one_period_at_default_resolution() {
        let config = WienFilterConfig::default();
        let period = config.cyclotron_period().unwrap();
        let timeline = build_timeline(
            &config,
            SteppingMethod::Analytic,
            constants::DEFAULT_RESOLUTION,
            period,
        )
        .unwrap();
        assert_eq!(timeline.len(), 501);
        let last = timeline.last();
        assert_abs_diff_eq!(last.position().y(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            last.position().z(),
            config.drift_speed() * period,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            last.velocity(),
            &config.initial_velocity(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn one_cyclotron_period_returns_to_starting_velocity() {
        let config = WienFilterConfig::default();
        let period = config.cyclotron_period().unwrap();
        let drift = config.drift_speed() * period;
        for (method, tolerance) in [
            (SteppingMethod::Analytic, 1e-9),
            (SteppingMethod::RungeKutta, 1e-6),
            (SteppingMethod::Midpoint, 1e-2),
        ] {
            let timeline = build_timeline(&config, method, 1000, period).unwrap();
            let last = timeline.last();
            assert_abs_diff_eq!(last.position().y(), 0.0, epsilon = tolerance);
            assert_abs_diff_eq!(last.position().z(), drift, epsilon = tolerance);
            assert_abs_diff_eq!(
                last.velocity(),
                &config.initial_velocity(),
                epsilon = tolerance
            );
        }
    }

    #[test]
    fn analytic_last_state_is_independent_of_resolution() {
        let config = WienFilterConfig::default();
        let coarse = build_timeline(&config, SteppingMethod::Analytic, 3, 40.0).unwrap();
        let fine = build_timeline(&config, SteppingMethod::Analytic, 800, 40.0).unwrap();
        assert_abs_diff_eq!(coarse.last().position(), fine.last().position(), epsilon = 1e-9);
        assert_abs_diff_eq!(coarse.last().velocity(), fine.last().velocity(), epsilon = 1e-9);
    }

    #[test]
    fn pushed_states_extend_the_timeline() {
        let config = WienFilterConfig::default();
        let mut timeline = Timeline::new(State::initial(&config)).unwrap();
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.first(), timeline.last());
        let state = State::new(&config, 0.5, Vec2::new(0.0, 1.0), Vec2::new(0.0, 2.0));
        timeline.push(state.clone()).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.last(), &state);
        assert_eq!((&timeline).into_iter().count(), 2);
    }
}
