//! Measuring how the discretization error shrinks with the step length.

use super::{build_timeline, fsm, stepping::analytic::AnalyticStepper, stepping::Stepper, State};
use crate::{
    error::{SimulationError, SimulationResult},
    io::Verbosity,
    physics::WienFilterConfig,
    simulation::SteppingMethod,
};

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Natural logarithms of a step length and of the errors it produced at the final time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct ErrorSample {
    /// Number of steps the duration was divided into.
    pub resolution: usize,
    pub log_step_length: fsm,
    pub log_position_error: fsm,
    pub log_velocity_error: fsm,
}

/// Slopes of the log errors with respect to the log step length.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct ConvergenceOrders {
    pub position: fsm,
    pub velocity: fsm,
}

/// Computes the exact state at the given time from the default starting state.
pub fn exact_final_state(config: &WienFilterConfig, duration: fsm) -> State {
    AnalyticStepper.step(config, &State::initial(config), duration)
}

/// Samples the final-time error of a method for a range of resolutions.
///
/// With `step = max_resolution / n_samples`, the resolutions `step`, `2*step`, ...,
/// `n_samples*step` are sampled in order, each with a complete fixed-horizon build.
///
/// # Returns
///
/// A `SimulationResult<Vec<ErrorSample>>` which is either:
///
/// - `Ok`: Contains one sample per resolution, in order of increasing resolution.
/// - `Err`: The parameters were invalid or one of the builds failed.
pub fn sample_errors(
    config: &WienFilterConfig,
    method: SteppingMethod,
    duration: fsm,
    max_resolution: usize,
    n_samples: usize,
    verbosity: &Verbosity,
) -> SimulationResult<Vec<ErrorSample>> {
    if n_samples == 0 {
        return Err(SimulationError::InvalidParameters(
            "number of error samples must be larger than zero".to_string(),
        ));
    }
    let resolution_step = max_resolution / n_samples;
    if resolution_step == 0 {
        return Err(SimulationError::InvalidParameters(format!(
            "maximum resolution {} is smaller than the number of samples {}",
            max_resolution, n_samples
        )));
    }

    let exact_state = exact_final_state(config, duration);

    let mut samples = Vec::new();
    samples.try_reserve_exact(n_samples)?;

    let progress_bar = verbosity.create_progress_bar(n_samples);

    for sample_idx in 1..=n_samples {
        let resolution = sample_idx * resolution_step;
        let timeline = build_timeline(config, method, resolution, duration)?;
        let final_state = timeline.last();

        samples.push(ErrorSample {
            resolution,
            log_step_length: (duration / (resolution as fsm)).ln(),
            log_position_error: final_state
                .position()
                .distance_to(exact_state.position())
                .ln(),
            log_velocity_error: final_state
                .velocity()
                .distance_to(exact_state.velocity())
                .ln(),
        });
        progress_bar.inc(1);
    }
    progress_bar.finish_and_clear();

    Ok(samples)
}

/// Fits straight lines to the log errors as functions of the log step length.
///
/// Samples with a non-finite logarithm (zero error) are left out.
/// Returns `None` if fewer than two samples remain for either quantity.
pub fn estimate_convergence_orders(samples: &[ErrorSample]) -> Option<ConvergenceOrders> {
    let position = least_squares_slope(
        samples
            .iter()
            .map(|sample| (sample.log_step_length, sample.log_position_error)),
    )?;
    let velocity = least_squares_slope(
        samples
            .iter()
            .map(|sample| (sample.log_step_length, sample.log_velocity_error)),
    )?;
    Some(ConvergenceOrders { position, velocity })
}

fn least_squares_slope<I>(points: I) -> Option<fsm>
where
    I: Iterator<Item = (fsm, fsm)>,
{
    let points: Vec<_> = points.filter(|(x, y)| x.is_finite() && y.is_finite()).collect();
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as fsm;
    let mean_x = points.iter().map(|(x, _)| x).sum::<fsm>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<fsm>() / n;

    let (covariance, variance) = points
        .iter()
        .fold((0.0, 0.0), |(covariance, variance), (x, y)| {
            let dx = x - mean_x;
            (covariance + dx * (y - mean_y), variance + dx * dx)
        });

    if variance > 0.0 {
        Some(covariance / variance)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::constants;
    use approx::assert_abs_diff_eq;

    fn estimated_orders(
        method: SteppingMethod,
        max_resolution: usize,
        n_samples: usize,
    ) -> ConvergenceOrders {
        let config = WienFilterConfig::default();
        let duration = config.cyclotron_period().unwrap();
        let samples = sample_errors(
            &config,
            method,
            duration,
            max_resolution,
            n_samples,
            &Verbosity::Quiet,
        )
        .unwrap();
        estimate_convergence_orders(&samples).unwrap()
    }

    #[test]
    fn samples_cover_multiples_of_the_resolution_step() {
        let config = WienFilterConfig::default();
        let duration = 10.0;
        let samples = sample_errors(
            &config,
            SteppingMethod::Euler,
            duration,
            105,
            10,
            &Verbosity::Quiet,
        )
        .unwrap();
        assert_eq!(samples.len(), 10);
        for (idx, sample) in samples.iter().enumerate() {
            assert_eq!(sample.resolution, 10 * (idx + 1));
            assert_abs_diff_eq!(
                sample.log_step_length,
                (duration / sample.resolution as fsm).ln(),
                epsilon = 1e-12
            );
        }
        assert!(samples
            .windows(2)
            .all(|pair| pair[1].log_position_error < pair[0].log_position_error));
    }

    #[test]
    fn too_few_resolutions_are_refused() {
        let config = WienFilterConfig::default();
        for (max_resolution, n_samples) in [(99, 100), (10, 0)] {
            assert!(matches!(
                sample_errors(
                    &config,
                    SteppingMethod::Euler,
                    1.0,
                    max_resolution,
                    n_samples,
                    &Verbosity::Quiet
                ),
                Err(SimulationError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn euler_converges_with_first_order() {
        let orders = estimated_orders(SteppingMethod::Euler, 10000, 10);
        assert_abs_diff_eq!(orders.position, 1.0, epsilon = 0.15);
        assert_abs_diff_eq!(orders.velocity, 1.0, epsilon = 0.15);
    }

    #[test]
    fn midpoint_converges_with_second_order() {
        let orders = estimated_orders(
            SteppingMethod::Midpoint,
            constants::DEFAULT_MAX_ERROR_RESOLUTION,
            10,
        );
        assert_abs_diff_eq!(orders.position, 2.0, epsilon = 0.2);
        assert_abs_diff_eq!(orders.velocity, 2.0, epsilon = 0.2);
    }

    #[test]
    fn runge_kutta_converges_with_fourth_order() {
        let orders = estimated_orders(SteppingMethod::RungeKutta, 200, 10);
        assert_abs_diff_eq!(orders.position, 4.0, epsilon = 0.3);
        assert_abs_diff_eq!(orders.velocity, 4.0, epsilon = 0.3);
    }

    #[test]
    fn analytic_errors_stay_at_rounding_level() {
        let config = WienFilterConfig::default();
        let samples = sample_errors(
            &config,
            SteppingMethod::Analytic,
            config.cyclotron_period().unwrap(),
            100,
            10,
            &Verbosity::Quiet,
        )
        .unwrap();
        assert!(samples
            .iter()
            .all(|sample| sample.log_position_error < -15.0 && sample.log_velocity_error < -15.0));
    }

    #[test]
    fn slope_of_exact_power_law_is_recovered() {
        let samples: Vec<_> = (1..=5)
            .map(|idx| {
                let log_step_length = -(idx as fsm);
                ErrorSample {
                    resolution: idx,
                    log_step_length,
                    log_position_error: 2.0 * log_step_length + 1.0,
                    log_velocity_error: 3.0 * log_step_length - 0.5,
                }
            })
            .collect();
        let orders = estimate_convergence_orders(&samples).unwrap();
        assert_abs_diff_eq!(orders.position, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(orders.velocity, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn orders_need_two_finite_samples() {
        let sample = ErrorSample {
            resolution: 1,
            log_step_length: 0.0,
            log_position_error: fsm::NEG_INFINITY,
            log_velocity_error: 0.0,
        };
        assert!(estimate_convergence_orders(&[sample.clone()]).is_none());
        let second = ErrorSample {
            resolution: 2,
            log_step_length: -1.0,
            ..sample
        };
        assert!(estimate_convergence_orders(&[second.clone(), second]).is_none());
    }
}
