//! Exact flow of the equations of motion.

use super::Stepper;
use crate::{
    geometry::Vec2,
    physics::WienFilterConfig,
    simulation::{fsm, State},
};

/// Stepper evaluating the closed-form solution from the current state.
///
/// In the frame drifting with speed E/B along z the particle gyrates in a circle
/// with angular frequency qB/m, so the solution over any `dt` is a rotation of
/// the relative velocity followed by a translation along z. The result is exact
/// up to rounding, independent of the step size.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnalyticStepper;

impl AnalyticStepper {
    /// Motion under the constant acceleration at the current velocity, used when the
    /// particle does not gyrate.
    fn uniformly_accelerated(state: &State, dt: fsm) -> (Vec2<fsm>, Vec2<fsm>) {
        let acceleration = state.acceleration();
        let next_position = state.position()
            + &(&(state.velocity() * dt) + &(acceleration * (0.5 * dt * dt)));
        let next_velocity = state.velocity() + &(acceleration * dt);
        (next_position, next_velocity)
    }

    fn gyrating(config: &WienFilterConfig, state: &State, dt: fsm) -> (Vec2<fsm>, Vec2<fsm>) {
        let frequency = config.cyclotron_frequency();
        let drift_speed = config.drift_speed();

        let transverse_velocity = state.velocity().y();
        let relative_longitudinal_velocity = state.velocity().z() - drift_speed;

        let phase = frequency * dt;
        let (sin_phase, cos_phase) = phase.sin_cos();

        // 1 - cos(phase) without cancellation for small phases
        let half_sin_phase = (0.5 * phase).sin();
        let one_minus_cos_phase = 2.0 * half_sin_phase * half_sin_phase;

        let next_velocity = Vec2::new(
            transverse_velocity * cos_phase - relative_longitudinal_velocity * sin_phase,
            drift_speed
                + relative_longitudinal_velocity * cos_phase
                + transverse_velocity * sin_phase,
        );

        let displacement = Vec2::new(
            (transverse_velocity * sin_phase - relative_longitudinal_velocity * one_minus_cos_phase)
                / frequency,
            drift_speed * dt
                + (relative_longitudinal_velocity * sin_phase
                    + transverse_velocity * one_minus_cos_phase)
                    / frequency,
        );

        (state.position() + &displacement, next_velocity)
    }
}

impl Stepper for AnalyticStepper {
    fn step(&self, config: &WienFilterConfig, state: &State, dt: fsm) -> State {
        let (next_position, next_velocity) = if config.cyclotron_frequency() == 0.0 {
            Self::uniformly_accelerated(state, dt)
        } else {
            Self::gyrating(config, state, dt)
        };
        State::new(config, state.time() + dt, next_position, next_velocity)
    }

    fn order(&self) -> Option<u32> {
        None
    }

    fn evaluations_per_step(&self) -> u32 {
        0
    }
}
