//! David F. Cameron's regression model
//!
//! Scales a performance with a rational regression of speed on distance (in
//! miles) fitted to record data. Alongside the time it reports how far each
//! distance is from a standard race distance; the regression was fitted on
//! standard distances, so a large offset marks a less trustworthy prediction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PredictionError;
use crate::models::{Distance, Duration, ModelKind, PerformanceRecord};
use crate::tables::CANONICAL_DISTANCES;

/// How the canonical distance table is searched for the nearest entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPolicy {
    /// Stop at the first entry that improves neither offset
    EarlyExit,
    /// Visit every entry
    Exhaustive,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        ScanPolicy::EarlyExit
    }
}

/// Predicted time plus distance validity offsets (meters, 0 = standard distance)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameronPrediction {
    pub time: Duration,
    pub performance_offset_m: f64,
    pub target_offset_m: f64,
}

/// Cameron regression predictor
#[derive(Debug, Clone, Copy, Default)]
pub struct CameronModel {
    scan: ScanPolicy,
}

impl CameronModel {
    pub fn new(scan: ScanPolicy) -> Self {
        Self { scan }
    }

    /// Offsets of both distances from their nearest canonical distance
    pub fn validity_offsets(&self, performance: Distance, target: Distance) -> (f64, f64) {
        nearest_offsets(
            &CANONICAL_DISTANCES,
            performance.as_meters(),
            target.as_meters(),
            self.scan,
        )
    }

    pub fn predict(
        &self,
        record: &PerformanceRecord,
        target: Distance,
    ) -> Result<CameronPrediction, PredictionError> {
        let (performance_offset_m, target_offset_m) =
            self.validity_offsets(record.distance, target);

        let known_miles = record.distance.as_miles();
        let target_miles = target.as_miles();

        let known_speed = regression_speed(known_miles, target_miles)?;
        let target_speed = regression_speed(target_miles, target_miles)?;

        // Seconds per mile at regression speed, scaled by how the runner compares
        let factor = record.duration.as_seconds() / (3600.0 / known_speed) / known_miles;
        let seconds = factor * (3600.0 / target_speed) * target_miles;

        let time = Duration::seconds(seconds).map_err(|_| PredictionError::Degenerate {
            model: ModelKind::Cameron.to_string(),
            reason: format!("predicted {} s", seconds),
        })?;

        debug!(
            target_m = target.as_meters(),
            seconds,
            performance_offset_m,
            target_offset_m,
            "cameron prediction"
        );

        Ok(CameronPrediction {
            time,
            performance_offset_m,
            target_offset_m,
        })
    }
}

/// Regression speed in mph at `miles`.
///
/// The linear term is always evaluated at the target distance, as in the
/// published calculator; it cancels whenever the two distances are equal.
fn regression_speed(miles: f64, target_miles: f64) -> Result<f64, PredictionError> {
    let speed = 13.49681 - 0.048865 * target_miles + 2.438936 / miles.powf(0.7905);
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err(PredictionError::Degenerate {
            model: ModelKind::Cameron.to_string(),
            reason: format!("regression speed {:.3} mph at {:.3} mi", speed, miles),
        })
    }
}

/// Minimum absolute differences of `performance` and `target` to `table` entries
pub fn nearest_offsets(
    table: &[f64],
    performance: f64,
    target: f64,
    scan: ScanPolicy,
) -> (f64, f64) {
    let Some((first, rest)) = table.split_first() else {
        return (f64::INFINITY, f64::INFINITY);
    };

    let mut performance_offset = (performance - first).abs();
    let mut target_offset = (target - first).abs();

    for entry in rest {
        let performance_check = (performance - entry).abs();
        let target_check = (target - entry).abs();

        if scan == ScanPolicy::EarlyExit
            && performance_check >= performance_offset
            && target_check >= target_offset
        {
            break;
        }

        performance_offset = performance_offset.min(performance_check);
        target_offset = target_offset.min(target_check);
    }

    (performance_offset, target_offset)
}

/// Cameron prediction with the historical early-exit scan
pub fn cameron(
    record: &PerformanceRecord,
    target: Distance,
) -> Result<CameronPrediction, PredictionError> {
    CameronModel::default().predict(record, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(meters: f64, seconds: f64) -> PerformanceRecord {
        PerformanceRecord::from_raw(meters, seconds).unwrap()
    }

    fn meters(d: f64) -> Distance {
        Distance::meters(d).unwrap()
    }

    #[test]
    fn test_same_distance_returns_same_time() {
        for (d, t) in [(5000.0, 1200.0), (1609.344, 300.0), (42195.0, 10800.0)] {
            let prediction = cameron(&record(d, t), meters(d)).unwrap();
            assert!(((prediction.time.as_seconds() - t) / t).abs() < 1e-9);
        }
    }

    #[test]
    fn test_10k_to_5k() {
        let prediction = cameron(&record(10000.0, 2400.0), meters(5000.0)).unwrap();
        assert!((prediction.time.as_seconds() - 1164.9).abs() < 1.0);
        assert_eq!(prediction.performance_offset_m, 0.0);
        assert_eq!(prediction.target_offset_m, 0.0);
    }

    #[test]
    fn test_offsets_for_non_standard_distances() {
        let model = CameronModel::default();
        let (perf, target) = model.validity_offsets(meters(5200.0), meters(9000.0));
        assert_eq!(perf, 200.0);
        assert!((target - 953.28).abs() < 1e-9);

        let (perf, target) = model.validity_offsets(meters(100.0), meters(100000.0));
        assert_eq!(perf, 300.0);
        assert!((target - 19532.8).abs() < 1e-9);
    }

    #[test]
    fn test_early_exit_matches_exhaustive_on_sorted_table() {
        for (p, t) in [(5000.0, 5000.0), (800.0, 42195.0), (30000.0, 1234.0), (100.0, 90000.0)] {
            assert_eq!(
                nearest_offsets(&CANONICAL_DISTANCES, p, t, ScanPolicy::EarlyExit),
                nearest_offsets(&CANONICAL_DISTANCES, p, t, ScanPolicy::Exhaustive)
            );
        }
    }

    #[test]
    fn test_early_exit_can_stop_short_on_unsorted_table() {
        let table = [100.0, 300.0, 50.0];
        assert_eq!(
            nearest_offsets(&table, 60.0, 60.0, ScanPolicy::EarlyExit),
            (40.0, 40.0)
        );
        assert_eq!(
            nearest_offsets(&table, 60.0, 60.0, ScanPolicy::Exhaustive),
            (10.0, 10.0)
        );
    }

    #[test]
    fn test_empty_table() {
        let (p, t) = nearest_offsets(&[], 1.0, 2.0, ScanPolicy::Exhaustive);
        assert!(p.is_infinite() && t.is_infinite());
    }

    #[test]
    fn test_ultra_distance_is_degenerate() {
        // Regression speed falls below zero past ~276 miles
        let result = cameron(&record(5000.0, 1200.0), Distance::miles(300.0).unwrap());
        assert!(matches!(result, Err(PredictionError::Degenerate { .. })));
    }
}
