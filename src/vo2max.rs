//! VO2max race time prediction
//!
//! A race implies an oxygen uptake rate (from its velocity) and the share of
//! VO2max that can be held for its duration. Dividing the two gives a VO2max
//! for the runner. The predicted time at another distance is the time whose
//! implied VO2max matches, found by a fixed-step search.
//!
//! Oxygen cost: `VO2 = -4.60 + 0.182258·v + 0.000104·v²` (v in m/min).
//! Sustainable share: `0.8 + 0.1894393·e^(-0.012778·t) + 0.2989558·e^(-0.1932605·t)`
//! (t in minutes).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PredictionError;
use crate::models::{Distance, Duration, ModelKind, PerformanceRecord};

/// Search parameters for the VO2max time solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Accepted relative VO2max mismatch
    pub tolerance: f64,
    /// Minutes added or removed per step
    pub step_minutes: f64,
    /// Steps before the search gives up
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            step_minutes: 0.001,
            max_iterations: 1_000_000,
        }
    }
}

/// Where the search ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverOutcome {
    /// Relative VO2max mismatch is within tolerance at `minutes`
    Converged { minutes: f64, iterations: usize },
    /// The step budget ran out, the search stepped across the match
    /// without landing within tolerance, or it left positive time
    NotConverged {
        minutes: f64,
        iterations: usize,
        relative_error: f64,
    },
}

impl SolverOutcome {
    pub fn minutes(&self) -> f64 {
        match self {
            SolverOutcome::Converged { minutes, .. } => *minutes,
            SolverOutcome::NotConverged { minutes, .. } => *minutes,
        }
    }

    pub fn iterations(&self) -> usize {
        match self {
            SolverOutcome::Converged { iterations, .. } => *iterations,
            SolverOutcome::NotConverged { iterations, .. } => *iterations,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, SolverOutcome::Converged { .. })
    }
}

/// Oxygen cost of running at `velocity` meters per minute (ml/kg/min)
pub fn oxygen_cost(velocity: f64) -> f64 {
    -4.60 + 0.182258 * velocity + 0.000104 * velocity * velocity
}

/// Share of VO2max that can be sustained for `minutes`
pub fn sustainable_fraction(minutes: f64) -> f64 {
    0.8 + 0.1894393 * (-0.012778 * minutes).exp() + 0.2989558 * (-0.1932605 * minutes).exp()
}

/// VO2max implied by covering `meters` in `minutes`
pub fn implied_vo2max(meters: f64, minutes: f64) -> f64 {
    oxygen_cost(meters / minutes) / sustainable_fraction(minutes)
}

/// Fixed-step VO2max time solver
#[derive(Debug, Clone, Copy, Default)]
pub struct Vo2MaxSolver {
    settings: SolverSettings,
}

impl Vo2MaxSolver {
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }

    /// VO2max (ml/kg/min) implied by a performance
    pub fn estimate(&self, record: &PerformanceRecord) -> f64 {
        implied_vo2max(record.distance.as_meters(), record.duration.as_minutes())
    }

    /// Search for the time at `target` whose implied VO2max matches `record`.
    ///
    /// Starts at `guess` and moves one step at a time towards the match, so
    /// the step count grows with the distance between guess and answer. The
    /// search stops early once the mismatch changes sign.
    pub fn solve(
        &self,
        record: &PerformanceRecord,
        target: Distance,
        guess: Duration,
    ) -> Result<SolverOutcome, PredictionError> {
        let reference = self.estimate(record);
        if !(reference.is_finite() && reference > 0.0) {
            return Err(PredictionError::Degenerate {
                model: ModelKind::Vo2Max.to_string(),
                reason: format!("performance implies VO2max of {:.2}", reference),
            });
        }

        let meters = target.as_meters();
        let SolverSettings {
            tolerance,
            step_minutes,
            max_iterations,
        } = self.settings;

        let mut minutes = guess.as_minutes();
        let mut iterations = 0;
        let mut previous_error: Option<f64> = None;

        loop {
            if minutes <= 0.0 {
                return Ok(SolverOutcome::NotConverged {
                    minutes,
                    iterations,
                    relative_error: f64::INFINITY,
                });
            }

            let error = (implied_vo2max(meters, minutes) - reference) / reference;
            if error.abs() <= tolerance {
                return Ok(SolverOutcome::Converged {
                    minutes,
                    iterations,
                });
            }

            // A sign change means the match lies inside one step; a fixed
            // step can only bounce across it from here on
            if let Some(previous) = previous_error {
                if (previous > 0.0) != (error > 0.0) {
                    return Ok(SolverOutcome::NotConverged {
                        minutes,
                        iterations,
                        relative_error: error.abs().min(previous.abs()),
                    });
                }
            }

            if iterations >= max_iterations {
                return Ok(SolverOutcome::NotConverged {
                    minutes,
                    iterations,
                    relative_error: error.abs(),
                });
            }
            previous_error = Some(error);

            // Too much VO2max means the test time is too fast
            if error > 0.0 {
                minutes += step_minutes;
            } else {
                minutes -= step_minutes;
            }
            iterations += 1;
        }
    }

    /// Predicted time at `target`, or an error if the search did not converge
    pub fn predict(
        &self,
        record: &PerformanceRecord,
        target: Distance,
        guess: Duration,
    ) -> Result<Duration, PredictionError> {
        match self.solve(record, target, guess)? {
            SolverOutcome::Converged {
                minutes,
                iterations,
            } => {
                debug!(
                    target_m = target.as_meters(),
                    iterations,
                    seconds = minutes * 60.0,
                    "vo2max search converged"
                );
                Duration::minutes(minutes)
            }
            SolverOutcome::NotConverged {
                iterations,
                relative_error,
                ..
            } => {
                warn!(
                    target_m = target.as_meters(),
                    iterations, relative_error, "vo2max search did not converge"
                );
                Err(PredictionError::NotConverged {
                    iterations,
                    relative_error,
                })
            }
        }
    }
}

/// VO2max prediction with default search settings
pub fn vo2max_time(
    record: &PerformanceRecord,
    target: Distance,
    guess: Duration,
) -> Result<Duration, PredictionError> {
    Vo2MaxSolver::default().predict(record, target, guess)
}
