//! Repeated transits with randomly perturbed entry conditions.

use super::{build_wien_timeline, fsm, SteppingMethod, TransitOutcome};
use crate::{
    constants, error::SimulationResult, geometry::Vec2, io::Verbosity,
    physics::WienFilterConfig,
};
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

#[cfg(feature = "serialization")]
use serde::Serialize;

/// How entry offsets are drawn between zero and their maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffsetDistribution {
    /// Uniformly in [0, max).
    Uniform,
    /// As max/k for a uniformly drawn integer k in [0, `RECIPROCAL_DIVISIONS`),
    /// with k = 0 giving zero. Offsets cluster near zero.
    Reciprocal,
}

impl OffsetDistribution {
    /// Number of possible divisors for the reciprocal distribution.
    pub const RECIPROCAL_DIVISIONS: u32 = 1000;

    /// Draws an offset in [0, `max_value`], always zero if `max_value` is zero.
    pub fn sample<R: Rng>(self, max_value: fsm, rng: &mut R) -> fsm {
        if max_value <= 0.0 {
            return 0.0;
        }
        match self {
            Self::Uniform => Uniform::new(0.0, max_value).sample(rng),
            Self::Reciprocal => match rng.gen_range(0..Self::RECIPROCAL_DIVISIONS) {
                0 => 0.0,
                divisor => max_value / fsm::from(divisor),
            },
        }
    }
}

/// Configuration parameters for sweeps.
#[derive(Clone, Debug)]
pub struct WienFilterSweepConfig {
    /// Number of particles to send through the filter.
    pub particles: usize,
    /// Upper bound of the transverse entry position offset.
    pub max_position_offset: fsm,
    /// Upper bound of the transverse entry velocity offset.
    pub max_velocity_offset: fsm,
    /// Distribution of both offsets.
    pub offset_distribution: OffsetDistribution,
}

impl WienFilterSweepConfig {
    pub const DEFAULT_PARTICLES: usize = constants::DEFAULT_SWEEP_PARTICLES;
    pub const DEFAULT_MAX_VELOCITY_OFFSET: fsm = constants::SWEEP_VELOCITY_SPREAD;

    /// Creates the default sweep configuration for a filter, where position
    /// offsets span the aperture.
    pub fn for_filter(config: &WienFilterConfig) -> Self {
        Self {
            particles: Self::DEFAULT_PARTICLES,
            max_position_offset: config.aperture_radius,
            max_velocity_offset: Self::DEFAULT_MAX_VELOCITY_OFFSET,
            offset_distribution: OffsetDistribution::Uniform,
        }
    }

    /// Panics if any parameter is outside its valid range.
    pub fn validate(&self) {
        assert!(
            self.max_position_offset.is_finite() && self.max_position_offset >= 0.0,
            "Maximum position offset must be finite and non-negative."
        );
        assert!(
            self.max_velocity_offset.is_finite() && self.max_velocity_offset >= 0.0,
            "Maximum velocity offset must be finite and non-negative."
        );
    }
}

impl Default for WienFilterSweepConfig {
    fn default() -> Self {
        Self::for_filter(&WienFilterConfig::default())
    }
}

/// Entry offsets and outcome of one particle in a sweep.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct SweepRecord {
    pub particle: usize,
    pub position_offset: fsm,
    pub velocity_offset: fsm,
    pub outcome: TransitOutcome,
    /// Time of the last state.
    pub final_time: fsm,
    /// Velocity in the last state.
    pub final_velocity: Vec2<fsm>,
}

/// Sends a number of particles with random transverse entry offsets through the filter.
///
/// Each particle is simulated independently with `build_wien_timeline`, one after
/// the other. All randomness comes from `rng`, so a seeded generator reproduces a sweep.
pub fn sweep_wien_filter<R: Rng>(
    config: &WienFilterConfig,
    method: SteppingMethod,
    max_steps: usize,
    duration: fsm,
    sweep_config: &WienFilterSweepConfig,
    rng: &mut R,
    verbosity: &Verbosity,
) -> SimulationResult<Vec<SweepRecord>> {
    sweep_config.validate();

    let mut records = Vec::new();
    records.try_reserve_exact(sweep_config.particles)?;

    let progress_bar = verbosity.create_progress_bar(sweep_config.particles);

    for particle in 0..sweep_config.particles {
        let distribution = sweep_config.offset_distribution;
        let position_offset = distribution.sample(sweep_config.max_position_offset, rng);
        let velocity_offset = distribution.sample(sweep_config.max_velocity_offset, rng);

        let (timeline, outcome) = build_wien_timeline(
            config,
            method,
            max_steps,
            duration,
            &Vec2::new(position_offset, 0.0),
            &Vec2::new(velocity_offset, 0.0),
        )?
        .into_parts();

        let last_state = timeline.last();
        records.push(SweepRecord {
            particle,
            position_offset,
            velocity_offset,
            outcome,
            final_time: last_state.time(),
            final_velocity: last_state.velocity().clone(),
        });
        progress_bar.inc(1);
    }
    progress_bar.finish_and_clear();

    Ok(records)
}
