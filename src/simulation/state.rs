//! Snapshot of the particle at one instant.

use super::fsm;
use crate::{geometry::Vec2, physics::WienFilterConfig};

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Time, position, velocity and acceleration of the particle.
///
/// The acceleration is always the one the fields exert at the stored velocity,
/// which is why it can only be obtained through a constructor taking the configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct State {
    time: fsm,
    position: Vec2<fsm>,
    velocity: Vec2<fsm>,
    acceleration: Vec2<fsm>,
}

impl State {
    /// Creates a new state, deriving the acceleration from the velocity.
    pub fn new(
        config: &WienFilterConfig,
        time: fsm,
        position: Vec2<fsm>,
        velocity: Vec2<fsm>,
    ) -> Self {
        let acceleration = config.acceleration(&velocity);
        Self {
            time,
            position,
            velocity,
            acceleration,
        }
    }

    /// Creates the fixed starting state at the origin with velocity (0, 3E/B).
    pub fn initial(config: &WienFilterConfig) -> Self {
        Self::new(config, 0.0, Vec2::zero(), config.initial_velocity())
    }

    pub fn time(&self) -> fsm {
        self.time
    }

    pub fn position(&self) -> &Vec2<fsm> {
        &self.position
    }

    pub fn velocity(&self) -> &Vec2<fsm> {
        &self.velocity
    }

    pub fn acceleration(&self) -> &Vec2<fsm> {
        &self.acceleration
    }

    /// Whether every quantity of the state is finite.
    pub fn is_finite(&self) -> bool {
        self.time.is_finite()
            && self.position.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
    }
}
