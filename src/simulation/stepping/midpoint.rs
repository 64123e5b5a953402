//! Explicit midpoint stepping.

use super::Stepper;
use crate::{
    physics::WienFilterConfig,
    simulation::{fsm, State},
};

/// Second-order stepper evaluating the acceleration at a half-step velocity estimate.
#[derive(Clone, Copy, Debug, Default)]
pub struct MidpointStepper;

impl Stepper for MidpointStepper {
    fn step(&self, config: &WienFilterConfig, state: &State, dt: fsm) -> State {
        let velocity = state.velocity();

        // v_n+1/2 = v_n + (dt/2) a(v_n)
        let half_step_velocity = velocity + &(&config.acceleration(velocity) * (0.5 * dt));

        // v_n+1 = v_n + dt a(v_n+1/2)
        let next_velocity = velocity + &(&config.acceleration(&half_step_velocity) * dt);

        // r_n+1 = r_n + dt v_n+1/2
        let next_position = state.position() + &(&half_step_velocity * dt);

        State::new(config, state.time() + dt, next_position, next_velocity)
    }

    fn order(&self) -> Option<u32> {
        Some(2)
    }

    fn evaluations_per_step(&self) -> u32 {
        2
    }
}
