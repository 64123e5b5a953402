//! Physical configuration of the Wien filter.

use crate::{constants, geometry::Vec2, simulation::fsm};
use std::f64::consts::PI;

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Uniform crossed fields, particle properties and filter geometry.
///
/// The electric field points along y and the magnetic field is perpendicular
/// to the y–z plane, so a particle moving along z with speed E/B feels no net force.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct WienFilterConfig {
    /// Strength of the electric field.
    pub electric_field: fsm,
    /// Strength of the magnetic field.
    pub magnetic_field: fsm,
    /// Charge of the particle.
    pub charge: fsm,
    /// Mass of the particle.
    pub mass: fsm,
    /// Longitudinal extent of the filter, beyond which the particle has exited.
    pub filter_length: fsm,
    /// Transverse aperture radius, beyond which the particle is absorbed.
    pub aperture_radius: fsm,
}

impl WienFilterConfig {
    pub const DEFAULT_ELECTRIC_FIELD: fsm = constants::ELECTRIC_FIELD;
    pub const DEFAULT_MAGNETIC_FIELD: fsm = constants::MAGNETIC_FIELD;
    pub const DEFAULT_CHARGE: fsm = constants::CHARGE;
    pub const DEFAULT_MASS: fsm = constants::MASS;
    pub const DEFAULT_FILTER_LENGTH: fsm = constants::FILTER_LENGTH;
    pub const DEFAULT_APERTURE_RADIUS: fsm = constants::APERTURE_RADIUS;

    /// Panics if any parameter is outside its valid range.
    pub fn validate(&self) {
        assert!(
            self.electric_field.is_finite(),
            "Electric field must be finite."
        );
        assert!(
            self.magnetic_field.is_finite() && self.magnetic_field != 0.0,
            "Magnetic field must be finite and non-zero."
        );
        assert!(self.charge.is_finite(), "Charge must be finite.");
        assert!(
            self.mass.is_finite() && self.mass > 0.0,
            "Mass must be larger than zero."
        );
        assert!(
            self.filter_length.is_finite() && self.filter_length > 0.0,
            "Filter length must be larger than zero."
        );
        assert!(
            self.aperture_radius.is_finite() && self.aperture_radius > 0.0,
            "Aperture radius must be larger than zero."
        );
    }

    /// Returns q/m.
    pub fn charge_to_mass_ratio(&self) -> fsm {
        self.charge / self.mass
    }

    /// Returns the (signed) cyclotron angular frequency qB/m.
    pub fn cyclotron_frequency(&self) -> fsm {
        self.charge_to_mass_ratio() * self.magnetic_field
    }

    /// Returns the time 2πm/|qB| of one full gyration, or `None` for an uncharged particle.
    pub fn cyclotron_period(&self) -> Option<fsm> {
        let frequency = self.cyclotron_frequency().abs();
        if frequency > 0.0 {
            Some(2.0 * PI / frequency)
        } else {
            None
        }
    }

    /// Returns the speed E/B selected by the filter.
    pub fn drift_speed(&self) -> fsm {
        self.electric_field / self.magnetic_field
    }

    /// Computes the acceleration of the particle moving with the given velocity.
    pub fn acceleration(&self, velocity: &Vec2<fsm>) -> Vec2<fsm> {
        let charge_to_mass_ratio = self.charge_to_mass_ratio();
        Vec2::new(
            charge_to_mass_ratio * (self.electric_field - self.magnetic_field * velocity.z()),
            charge_to_mass_ratio * (self.magnetic_field * velocity.y()),
        )
    }

    /// Returns the starting velocity of the fixed-horizon trajectories, (0, 3E/B).
    pub fn initial_velocity(&self) -> Vec2<fsm> {
        Vec2::new(0.0, 3.0 * self.drift_speed())
    }

    /// Returns the unperturbed velocity of a particle entering the filter, (0, E/B).
    pub fn entry_velocity(&self) -> Vec2<fsm> {
        Vec2::new(0.0, self.drift_speed())
    }
}

impl Default for WienFilterConfig {
    fn default() -> Self {
        WienFilterConfig {
            electric_field: Self::DEFAULT_ELECTRIC_FIELD,
            magnetic_field: Self::DEFAULT_MAGNETIC_FIELD,
            charge: Self::DEFAULT_CHARGE,
            mass: Self::DEFAULT_MASS,
            filter_length: Self::DEFAULT_FILTER_LENGTH,
            aperture_radius: Self::DEFAULT_APERTURE_RADIUS,
        }
    }
}
