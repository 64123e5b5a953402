//! Explicit (forward) Euler stepping.

use super::Stepper;
use crate::{
    physics::WienFilterConfig,
    simulation::{fsm, State},
};

/// First-order stepper advancing the position with the old velocity.
#[derive(Clone, Copy, Debug, Default)]
pub struct EulerStepper;

impl Stepper for EulerStepper {
    fn step(&self, config: &WienFilterConfig, state: &State, dt: fsm) -> State {
        let velocity = state.velocity();

        // v_n+1 = v_n + dt a(v_n)
        let next_velocity = velocity + &(&config.acceleration(velocity) * dt);

        // r_n+1 = r_n + dt v_n
        let next_position = state.position() + &(velocity * dt);

        State::new(config, state.time() + dt, next_position, next_velocity)
    }

    fn order(&self) -> Option<u32> {
        Some(1)
    }

    fn evaluations_per_step(&self) -> u32 {
        1
    }
}
