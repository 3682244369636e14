//! Purdy points race time prediction
//!
//! A performance is scored against a reference running curve, then the score
//! is inverted at the target distance. Two historical calibrations exist:
//!
//! - Purdy, J. G. "Computer generated track scoring tables", Medicine and
//!   Science in Sports 2(3), 1970: record table, 950 point anchor, with start
//!   and bend corrections.
//! - Purdy, J. G. "Least squares model of the running curve", Research
//!   Quarterly 45, 1974: exponential curve, 1035 point anchor.
//!
//! The two share [`PurdyModel`] and differ only in [`PurdyVariant`]; they are
//! not numerically interchangeable.

use tracing::debug;

use crate::curves::{curve_slowdown, CurveSource};
use crate::error::PredictionError;
use crate::models::{Distance, Duration, ModelKind, PerformanceRecord};

/// Seconds lost to the start, per m/s of velocity
const STARTUP_FACTOR: f64 = 0.28;

/// Seconds lost on bends, per bend fraction and (m/s)^2
const BEND_FACTOR: f64 = 0.0065;

const K_INTERCEPT: f64 = 0.0654;
const K_SLOPE: f64 = 0.00258;

/// Calibration of one Purdy point scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurdyVariant {
    pub kind: ModelKind,
    /// Reference velocity source
    pub curve: CurveSource,
    /// Points per unit of relative speed
    pub scale: f64,
    /// Points scored by the reference performance
    pub anchor: f64,
    /// Add start and bend losses to the reference time
    pub track_corrections: bool,
}

impl PurdyVariant {
    /// 1970 tables: record table, 950 points
    pub const STANDARD: PurdyVariant = PurdyVariant {
        kind: ModelKind::PurdyStandard,
        curve: CurveSource::RecordTable,
        scale: 85.0,
        anchor: 950.0,
        track_corrections: true,
    };

    /// 1974 least squares curve, 1035 points
    pub const LEAST_SQUARES: PurdyVariant = PurdyVariant {
        kind: ModelKind::PurdyLeastSquares,
        curve: CurveSource::LeastSquares,
        scale: 85.0,
        anchor: 1035.0,
        track_corrections: false,
    };
}

/// Reference time and point-scale constants at one distance
#[derive(Debug, Clone, Copy)]
struct Calibration {
    reference_time: f64,
    a: f64,
    b: f64,
}

/// Purdy points scorer and predictor
#[derive(Debug, Clone, Copy)]
pub struct PurdyModel {
    variant: PurdyVariant,
}

impl PurdyModel {
    pub fn new(variant: PurdyVariant) -> Self {
        Self { variant }
    }

    pub fn standard() -> Self {
        Self::new(PurdyVariant::STANDARD)
    }

    pub fn least_squares() -> Self {
        Self::new(PurdyVariant::LEAST_SQUARES)
    }

    fn degenerate(&self, reason: impl Into<String>) -> PredictionError {
        PredictionError::Degenerate {
            model: self.variant.kind.to_string(),
            reason: reason.into(),
        }
    }

    fn calibrate(&self, distance: Distance) -> Result<Calibration, PredictionError> {
        let estimate = self.variant.curve.estimate(distance);
        let v = estimate.velocity;

        if !(v.is_finite() && v > 0.0 && estimate.time > 0.0) {
            return Err(self.degenerate(format!(
                "no reference velocity at {} m",
                distance.as_meters()
            )));
        }

        let reference_time = if self.variant.track_corrections {
            estimate.time + STARTUP_FACTOR * v + BEND_FACTOR * curve_slowdown(distance) * v * v
        } else {
            estimate.time
        };

        let k = K_INTERCEPT - K_SLOPE * v;
        if k <= 0.0 {
            return Err(self.degenerate(format!("reference velocity {:.2} m/s too high", v)));
        }

        let a = self.variant.scale / k;
        let b = 1.0 - self.variant.anchor / a;

        Ok(Calibration {
            reference_time,
            a,
            b,
        })
    }

    /// Points scored by a performance
    pub fn score(&self, record: &PerformanceRecord) -> Result<f64, PredictionError> {
        let cal = self.calibrate(record.distance)?;
        Ok(cal.a * (cal.reference_time / record.duration.as_seconds() - cal.b))
    }

    /// Time at `target` that scores `points`
    pub fn time_for_points(
        &self,
        points: f64,
        target: Distance,
    ) -> Result<Duration, PredictionError> {
        let cal = self.calibrate(target)?;
        let seconds = cal.reference_time / (points / cal.a + cal.b);

        Duration::seconds(seconds).map_err(|_| {
            self.degenerate(format!(
                "{:.1} points has no time at {} m",
                points,
                target.as_meters()
            ))
        })
    }

    /// Predict the time at `target` that scores the same points as `record`
    pub fn predict(
        &self,
        record: &PerformanceRecord,
        target: Distance,
    ) -> Result<Duration, PredictionError> {
        let points = self.score(record)?;
        let time = self.time_for_points(points, target)?;

        debug!(
            model = %self.variant.kind,
            points,
            target_m = target.as_meters(),
            seconds = time.as_seconds(),
            "purdy prediction"
        );

        Ok(time)
    }
}

/// Table-based Purdy prediction (950 point scale)
pub fn purdy_standard(
    record: &PerformanceRecord,
    target: Distance,
) -> Result<Duration, PredictionError> {
    PurdyModel::standard().predict(record, target)
}

/// Least squares curve Purdy prediction (1035 point scale)
pub fn purdy_least_squares(
    record: &PerformanceRecord,
    target: Distance,
) -> Result<Duration, PredictionError> {
    PurdyModel::least_squares().predict(record, target)
}
