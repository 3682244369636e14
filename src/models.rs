use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PredictionError;

/// Meters in one statute mile
pub const METERS_PER_MILE: f64 = 1609.344;

/// Distance units used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    Metric,
    Imperial,
}

impl Default for Units {
    fn default() -> Self {
        Units::Metric
    }
}

/// The five prediction models, in the order they are run and reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    PurdyStandard,
    PurdyLeastSquares,
    Vo2Max,
    Cameron,
    Riegel,
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::PurdyStandard,
        ModelKind::PurdyLeastSquares,
        ModelKind::Vo2Max,
        ModelKind::Cameron,
        ModelKind::Riegel,
    ];

    /// Short label used in printed reports
    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::PurdyStandard => "purdy sc",
            ModelKind::PurdyLeastSquares => "purdy ls",
            ModelKind::Vo2Max => "vo2 max",
            ModelKind::Cameron => "cameron",
            ModelKind::Riegel => "riegel",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::PurdyStandard => "purdy_standard",
            ModelKind::PurdyLeastSquares => "purdy_least_squares",
            ModelKind::Vo2Max => "vo2max",
            ModelKind::Cameron => "cameron",
            ModelKind::Riegel => "riegel",
        };
        f.write_str(name)
    }
}

/// A positive race distance in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Distance(f64);

impl Distance {
    /// Distance in meters; rejects zero, negative and non-finite values
    pub fn meters(meters: f64) -> Result<Self, PredictionError> {
        if meters.is_finite() && meters > 0.0 {
            Ok(Distance(meters))
        } else {
            Err(PredictionError::InvalidDistance { value: meters })
        }
    }

    pub fn kilometers(kilometers: f64) -> Result<Self, PredictionError> {
        Self::meters(kilometers * 1000.0)
    }

    pub fn miles(miles: f64) -> Result<Self, PredictionError> {
        Self::meters(miles * METERS_PER_MILE)
    }

    pub fn as_meters(&self) -> f64 {
        self.0
    }

    pub fn as_miles(&self) -> f64 {
        self.0 / METERS_PER_MILE
    }

    /// Human readable label, e.g. `400 m`, `5 km` or `3.11 mi`
    pub fn display(&self, units: Units) -> String {
        match units {
            Units::Metric if self.0 >= 1000.0 => format!("{:.3} km", self.0 / 1000.0)
                .replace(".000 km", " km"),
            Units::Metric => format!("{} m", self.0),
            Units::Imperial => format!("{:.2} mi", self.as_miles()),
        }
    }
}

impl TryFrom<f64> for Distance {
    type Error = PredictionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Distance::meters(value)
    }
}

impl From<Distance> for f64 {
    fn from(distance: Distance) -> Self {
        distance.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} m", self.0)
    }
}

/// A positive elapsed time in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Duration(f64);

impl Duration {
    /// Duration in seconds; rejects zero, negative and non-finite values
    pub fn seconds(seconds: f64) -> Result<Self, PredictionError> {
        if seconds.is_finite() && seconds > 0.0 {
            Ok(Duration(seconds))
        } else {
            Err(PredictionError::InvalidDuration { value: seconds })
        }
    }

    pub fn minutes(minutes: f64) -> Result<Self, PredictionError> {
        Self::seconds(minutes * 60.0)
    }

    pub fn as_seconds(&self) -> f64 {
        self.0
    }

    pub fn as_minutes(&self) -> f64 {
        self.0 / 60.0
    }
}

impl TryFrom<f64> for Duration {
    type Error = PredictionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Duration::seconds(value)
    }
}

impl From<Duration> for f64 {
    fn from(duration: Duration) -> Self {
        duration.0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} s", self.0)
    }
}

/// A completed effort: how far and how long
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub distance: Distance,
    pub duration: Duration,
}

impl PerformanceRecord {
    pub fn new(distance: Distance, duration: Duration) -> Self {
        Self { distance, duration }
    }

    /// Build from raw meters and seconds, validating both
    pub fn from_raw(meters: f64, seconds: f64) -> Result<Self, PredictionError> {
        Ok(Self::new(Distance::meters(meters)?, Duration::seconds(seconds)?))
    }

    /// Average velocity in meters per second
    pub fn velocity(&self) -> f64 {
        self.distance.as_meters() / self.duration.as_seconds()
    }
}

/// Velocity a curve source implies for a distance, with the matching time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityEstimate {
    /// Meters per second
    pub velocity: f64,
    /// Seconds to cover the distance at `velocity`
    pub time: f64,
}

impl VelocityEstimate {
    /// Seconds per meter
    pub fn pace(&self) -> f64 {
        1.0 / self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_validation() {
        assert!(Distance::meters(5000.0).is_ok());
        assert_eq!(
            Distance::meters(0.0),
            Err(PredictionError::InvalidDistance { value: 0.0 })
        );
        assert!(Distance::meters(-400.0).is_err());
        assert!(Distance::meters(f64::NAN).is_err());
        assert!(Distance::meters(f64::INFINITY).is_err());
    }

    #[test]
    fn test_duration_validation() {
        assert!(Duration::seconds(1200.0).is_ok());
        assert_eq!(
            Duration::seconds(0.0),
            Err(PredictionError::InvalidDuration { value: 0.0 })
        );
        assert!(Duration::minutes(-1.0).is_err());
    }

    #[test]
    fn test_unit_conversions() {
        let mile = Distance::miles(1.0).unwrap();
        assert_eq!(mile.as_meters(), METERS_PER_MILE);
        assert!((mile.as_miles() - 1.0).abs() < 1e-12);
        assert_eq!(Distance::kilometers(5.0).unwrap().as_meters(), 5000.0);
        assert_eq!(Duration::minutes(20.0).unwrap().as_seconds(), 1200.0);
        assert_eq!(Duration::seconds(90.0).unwrap().as_minutes(), 1.5);
    }

    #[test]
    fn test_distance_display() {
        let d = Distance::meters(5000.0).unwrap();
        assert_eq!(d.display(Units::Metric), "5 km");
        assert_eq!(Distance::meters(400.0).unwrap().display(Units::Metric), "400 m");
        assert_eq!(
            Distance::meters(42195.0).unwrap().display(Units::Metric),
            "42.195 km"
        );
        assert_eq!(d.display(Units::Imperial), "3.11 mi");
    }

    #[test]
    fn test_velocity_and_pace() {
        let record = PerformanceRecord::from_raw(5000.0, 1250.0).unwrap();
        assert_eq!(record.velocity(), 4.0);

        let estimate = VelocityEstimate { velocity: 4.0, time: 1250.0 };
        assert_eq!(estimate.pace(), 0.25);
    }

    #[test]
    fn test_model_kind_names() {
        assert_eq!(ModelKind::ALL.len(), 5);
        assert_eq!(ModelKind::Vo2Max.to_string(), "vo2max");
        assert_eq!(ModelKind::PurdyStandard.label(), "purdy sc");
        assert_eq!(
            serde_json::to_string(&ModelKind::PurdyLeastSquares).unwrap(),
            "\"purdy_least_squares\""
        );
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let record = PerformanceRecord::from_raw(10000.0, 2400.0).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"distance":10000.0,"duration":2400.0}"#);

        let back: PerformanceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);

        let bad = serde_json::from_str::<PerformanceRecord>(r#"{"distance":-1.0,"duration":10.0}"#);
        assert!(bad.is_err());
    }
}
