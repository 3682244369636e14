//! Running curves: velocity a world-class runner holds over a distance
//!
//! Two sources are provided. [`table_velocity`] interpolates the 1936
//! world-record table; [`curve_velocity`] evaluates Purdy's 1974 least squares
//! fit, a sum of five exponentials. [`curve_slowdown`] describes how much of a
//! track race is run on the bends.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Distance, VelocityEstimate};
use crate::tables::RECORD_TABLE;

/// Length of a standard outdoor track
pub const TRACK_LAP_M: f64 = 400.0;

/// Races shorter than this are run on a straight
const STRAIGHT_RACE_LIMIT_M: f64 = 110.0;

/// Amplitudes of the least squares running curve (m/s)
const CURVE_AMPLITUDES: [f64; 5] = [11.15895, 4.304605, 0.5234627, 4.031560, 2.316157];

/// Decay rates of the least squares running curve (1/m)
const CURVE_RATES: [f64; 5] = [3.796158e-2, 1.646772e-3, 4.107670e-4, 7.068099e-6, 5.220990e-9];

/// Where a velocity estimate comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveSource {
    /// Piecewise-linear interpolation of the world-record table
    RecordTable,
    /// Closed-form least squares running curve
    LeastSquares,
}

impl CurveSource {
    pub fn estimate(&self, distance: Distance) -> VelocityEstimate {
        match self {
            CurveSource::RecordTable => table_velocity(distance),
            CurveSource::LeastSquares => curve_velocity(distance),
        }
    }
}

/// Position of a distance against the record table's 40 m..100 km span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSpan {
    Below,
    Within,
    Beyond,
}

/// Whether `distance` lies inside the record table, end knots included
pub fn table_span(distance: Distance) -> TableSpan {
    let d = distance.as_meters();
    match (RECORD_TABLE.first(), RECORD_TABLE.last()) {
        (Some(first), _) if d < first.distance_m => TableSpan::Below,
        (_, Some(last)) if d > last.distance_m => TableSpan::Beyond,
        _ => TableSpan::Within,
    }
}

/// Interpolate the record table at `distance`.
///
/// The bracket is the first knot strictly longer than `distance` and its
/// predecessor; knot times (distance / velocity) are interpolated linearly in
/// distance. Below the first knot or past the last knot the nearest end
/// interval is extended and a warning is logged.
pub fn table_velocity(distance: Distance) -> VelocityEstimate {
    let d = distance.as_meters();
    let last = RECORD_TABLE.len() - 1;

    let upper = RECORD_TABLE
        .iter()
        .position(|knot| knot.distance_m > d)
        .unwrap_or(RECORD_TABLE.len());

    match table_span(distance) {
        TableSpan::Below => warn!(distance_m = d, "distance below record table, extrapolating"),
        TableSpan::Beyond => warn!(distance_m = d, "distance beyond record table, extrapolating"),
        TableSpan::Within => {}
    }

    let (lo, hi) = match upper {
        0 => (0, 1),
        n if n > last => (last - 1, last),
        n => (n - 1, n),
    };

    let low = RECORD_TABLE[lo];
    let high = RECORD_TABLE[hi];

    // Exact knots keep their tabulated velocity
    for knot in [low, high] {
        if d == knot.distance_m {
            return VelocityEstimate {
                velocity: knot.velocity_mps,
                time: knot.time(),
            };
        }
    }

    let fraction = (d - low.distance_m) / (high.distance_m - low.distance_m);
    let time = low.time() + (high.time() - low.time()) * fraction;

    VelocityEstimate {
        velocity: d / time,
        time,
    }
}

/// Share of a track race run on the bends (meters of bend per meter raced).
///
/// Each full lap holds 200 m of bend. The partial lap is measured from the
/// finish backwards: 50 m straight, 100 m bend, 100 m straight, 100 m bend,
/// 50 m straight.
pub fn curve_slowdown(distance: Distance) -> f64 {
    let d = distance.as_meters();
    if d < STRAIGHT_RACE_LIMIT_M {
        return 0.0;
    }

    let laps = (d / TRACK_LAP_M).floor();
    let partial = d % TRACK_LAP_M;

    let partial_bend = if partial <= 50.0 {
        0.0
    } else if partial <= 150.0 {
        partial - 50.0
    } else if partial <= 250.0 {
        100.0
    } else if partial <= 350.0 {
        partial - 150.0
    } else {
        200.0
    };

    (200.0 * laps + partial_bend) / d
}

/// Evaluate the least squares running curve at `distance`.
///
/// The first term is negative and models the acceleration phase, so the
/// curve rises over the first ~100 m before decaying.
pub fn curve_velocity(distance: Distance) -> VelocityEstimate {
    let d = distance.as_meters();

    let velocity = CURVE_AMPLITUDES
        .iter()
        .zip(CURVE_RATES.iter())
        .enumerate()
        .map(|(i, (b, r))| {
            let term = b * (-r * d).exp();
            if i == 0 {
                -term
            } else {
                term
            }
        })
        .sum::<f64>();

    VelocityEstimate {
        velocity,
        time: d / velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meters(d: f64) -> Distance {
        Distance::meters(d).unwrap()
    }

    #[test]
    fn test_table_velocity_exact_at_knots() {
        for knot in RECORD_TABLE.iter() {
            let estimate = table_velocity(meters(knot.distance_m));
            assert_eq!(estimate.velocity, knot.velocity_mps);
            assert_eq!(estimate.time, knot.time());
        }
    }

    #[test]
    fn test_table_velocity_interpolates_time() {
        // Halfway between 5000 m and 6000 m
        let estimate = table_velocity(meters(5500.0));
        let expected_time = (5000.0 / 5.97432 + 6000.0 / 5.90181) / 2.0;

        assert!((estimate.time - expected_time).abs() < 1e-9);
        assert!((estimate.velocity - 5500.0 / expected_time).abs() < 1e-12);
        assert!(estimate.velocity < 5.97432 && estimate.velocity > 5.90181);
        assert!((estimate.pace() * 5500.0 - estimate.time).abs() < 1e-9);
    }

    #[test]
    fn test_table_velocity_extrapolates_out_of_range() {
        // Below 40 m the first interval is extended
        let short = table_velocity(meters(30.0));
        let slope = (50.0 / 10.996 - 40.0 / 11.0) / 10.0;
        assert!((short.time - (40.0 / 11.0 - 10.0 * slope)).abs() < 1e-9);
        assert!(short.velocity > 11.0);

        // Beyond 100 km the last interval is extended
        let long = table_velocity(meters(120000.0));
        assert!(long.velocity < 4.68988);
        assert!(long.velocity > 4.5);
    }

    #[test]
    fn test_table_span_includes_end_knots() {
        assert_eq!(table_span(meters(30.0)), TableSpan::Below);
        assert_eq!(table_span(meters(40.0)), TableSpan::Within);
        assert_eq!(table_span(meters(5500.0)), TableSpan::Within);
        assert_eq!(table_span(meters(100000.0)), TableSpan::Within);
        assert_eq!(table_span(meters(100000.5)), TableSpan::Beyond);

        // The last knot is read back exactly, not extrapolated
        let last = table_velocity(meters(100000.0));
        assert!((last.velocity - 4.68988).abs() < 1e-12);
        assert!((last.time - 100000.0 / 4.68988).abs() < 1e-9);
    }

    #[test]
    fn test_curve_slowdown_zones() {
        assert_eq!(curve_slowdown(meters(100.0)), 0.0);
        assert_eq!(curve_slowdown(meters(110.0)), 60.0 / 110.0);
        assert_eq!(curve_slowdown(meters(200.0)), 0.5);
        assert_eq!(curve_slowdown(meters(300.0)), 0.5);
        assert_eq!(curve_slowdown(meters(400.0)), 0.5);
        assert_eq!(curve_slowdown(meters(800.0)), 0.5);
        assert_eq!(curve_slowdown(meters(10000.0)), 0.5);
        // 1500 m = 3 laps + 300 m, of which 150 m on bends
        assert_eq!(curve_slowdown(meters(1500.0)), 750.0 / 1500.0);
        // 1000 m = 2 laps + 200 m, of which 100 m on bends
        assert_eq!(curve_slowdown(meters(1000.0)), 500.0 / 1000.0);
        // 5050 m = 12 laps + 250 m
        assert_eq!(curve_slowdown(meters(5050.0)), 2500.0 / 5050.0);
        // 5380 m = 13 laps + 180 m
        assert_eq!(curve_slowdown(meters(5380.0)), 2700.0 / 5380.0);
    }

    #[test]
    fn test_curve_velocity_shape() {
        let v5k = curve_velocity(meters(5000.0));
        assert!((v5k.velocity - 6.27594).abs() < 1e-4);
        assert!((v5k.time - 5000.0 / v5k.velocity).abs() < 1e-9);

        // Acceleration phase, then monotone decay
        assert!(curve_velocity(meters(40.0)).velocity < curve_velocity(meters(150.0)).velocity);
        let mut previous = curve_velocity(meters(400.0)).velocity;
        for d in [800.0, 1500.0, 5000.0, 10000.0, 42195.0, 100000.0] {
            let v = curve_velocity(meters(d)).velocity;
            assert!(v < previous, "velocity should fall at {} m", d);
            previous = v;
        }
    }

    #[test]
    fn test_curve_source_dispatch() {
        let d = meters(1500.0);
        assert_eq!(CurveSource::RecordTable.estimate(d), table_velocity(d));
        assert_eq!(CurveSource::LeastSquares.estimate(d), curve_velocity(d));
    }
}
