//! Empirical reference tables
//!
//! Both tables are fixed historical data and live in read-only memory for the
//! lifetime of the process.

/// One (distance, velocity) point of the world-record running curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityKnot {
    pub distance_m: f64,
    pub velocity_mps: f64,
}

impl VelocityKnot {
    /// Seconds needed to cover this knot's distance at its velocity
    pub fn time(&self) -> f64 {
        self.distance_m / self.velocity_mps
    }
}

const fn knot(distance_m: f64, velocity_mps: f64) -> VelocityKnot {
    VelocityKnot {
        distance_m,
        velocity_mps,
    }
}

/// 1936 world-record velocities, the 950-point line of the Purdy tables.
///
/// Ascending in distance, descending in velocity. Distances outside
/// 40 m..100 km are extrapolated from the end intervals.
pub const RECORD_TABLE: [VelocityKnot; 59] = [
    knot(40.0, 11.0),
    knot(50.0, 10.996),
    knot(60.0, 10.983),
    knot(70.0, 10.962),
    knot(80.0, 10.934),
    knot(90.0, 10.9),
    knot(100.0, 10.86),
    knot(110.0, 10.815),
    knot(120.0, 10.765),
    knot(130.0, 10.711),
    knot(140.0, 10.654),
    knot(150.0, 10.594),
    knot(160.0, 10.531),
    knot(170.0, 10.465),
    knot(180.0, 10.396),
    knot(200.0, 10.25),
    knot(220.0, 10.096),
    knot(240.0, 9.935),
    knot(260.0, 9.771),
    knot(280.0, 9.61),
    knot(300.0, 9.455),
    knot(320.0, 9.307),
    knot(340.0, 9.166),
    knot(360.0, 9.032),
    knot(380.0, 8.905),
    knot(400.0, 8.785),
    knot(450.0, 8.513),
    knot(500.0, 8.279),
    knot(550.0, 8.083),
    knot(600.0, 7.921),
    knot(700.0, 7.669),
    knot(800.0, 7.496),
    knot(900.0, 7.32),
    knot(1000.0, 7.18933),
    knot(1200.0, 6.98066),
    knot(1500.0, 6.75319),
    knot(2000.0, 6.50015),
    knot(2500.0, 6.33424),
    knot(3000.0, 6.21913),
    knot(3500.0, 6.1351),
    knot(4000.0, 6.0704),
    knot(4500.0, 6.01822),
    knot(5000.0, 5.97432),
    knot(6000.0, 5.90181),
    knot(7000.0, 5.84156),
    knot(8000.0, 5.78889),
    knot(9000.0, 5.74211),
    knot(10000.0, 5.7005),
    knot(12000.0, 5.62944),
    knot(15000.0, 5.543),
    knot(20000.0, 5.43785),
    knot(25000.0, 5.35842),
    knot(30000.0, 5.29298),
    knot(35000.0, 5.23538),
    knot(40000.0, 5.18263),
    knot(50000.0, 5.08615),
    knot(60000.0, 4.99762),
    knot(80000.0, 4.83617),
    knot(100000.0, 4.68988),
];

/// Standard race distances in meters, ascending: track events, the mile
/// distances (1, 2, 3, 4, 5, 7.5, 10 and 50 mi), 5 km, 10 km, 15 km, the half
/// marathon and the marathon.
pub const CANONICAL_DISTANCES: [f64; 20] = [
    400.0, 600.0, 800.0, 1000.0, 1500.0, 1609.344, 2000.0, 3000.0, 3218.688, 4828.032,
    5000.0, 6437.376, 8046.72, 10000.0, 12070.08, 15000.0, 16093.44, 21097.5, 42195.0,
    80467.2,
];
