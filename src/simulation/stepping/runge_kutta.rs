//! Classic fourth-order Runge–Kutta stepping.

use super::Stepper;
use crate::{
    geometry::Vec2,
    physics::WienFilterConfig,
    simulation::{fsm, State},
};

/// Fourth-order stepper advancing position and velocity together.
///
/// The derivative of the position is the velocity and the derivative of the velocity
/// is the acceleration, which only depends on the velocity. Each stage therefore
/// evaluates the acceleration at the stage velocity.
#[derive(Clone, Copy, Debug, Default)]
pub struct RungeKuttaStepper;

impl RungeKuttaStepper {
    /// Combines the four stage slopes with weights 1, 2, 2, 1 into the increment over `dt`.
    fn weighted_increment(
        k1: &Vec2<fsm>,
        k2: &Vec2<fsm>,
        k3: &Vec2<fsm>,
        k4: &Vec2<fsm>,
        dt: fsm,
    ) -> Vec2<fsm> {
        let mut increment = k2 + k3;
        increment.scale(2.0);
        increment.add_elementwise(k1);
        increment.add_elementwise(k4);
        increment.scale(dt / 6.0);
        increment
    }
}

impl Stepper for RungeKuttaStepper {
    fn step(&self, config: &WienFilterConfig, state: &State, dt: fsm) -> State {
        let half_dt = 0.5 * dt;
        let velocity = state.velocity();

        // Slopes at t_n
        let k1_position = velocity.clone();
        let k1_velocity = config.acceleration(&k1_position);

        // Slopes at t_n + dt/2, using the slopes at t_n
        let k2_position = velocity + &(&k1_velocity * half_dt);
        let k2_velocity = config.acceleration(&k2_position);

        // Slopes at t_n + dt/2, using the previous midpoint slopes
        let k3_position = velocity + &(&k2_velocity * half_dt);
        let k3_velocity = config.acceleration(&k3_position);

        // Slopes at t_n + dt
        let k4_position = velocity + &(&k3_velocity * dt);
        let k4_velocity = config.acceleration(&k4_position);

        let next_position = state.position()
            + &Self::weighted_increment(&k1_position, &k2_position, &k3_position, &k4_position, dt);
        let next_velocity = velocity
            + &Self::weighted_increment(&k1_velocity, &k2_velocity, &k3_velocity, &k4_velocity, dt);

        State::new(config, state.time() + dt, next_position, next_velocity)
    }

    fn order(&self) -> Option<u32> {
        Some(4)
    }

    fn evaluations_per_step(&self) -> u32 {
        4
    }
}
