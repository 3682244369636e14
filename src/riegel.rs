//! Pete Riegel's power-law model
//!
//! "Time predicting", Runner's World, August 1977; refined in "Athletic
//! records and human endurance", American Scientist, May-June 1981.
//! `t2 = t1 × (d2 / d1)^1.06`

use serde::{Deserialize, Serialize};

use crate::error::PredictionError;
use crate::models::{Distance, Duration, ModelKind, PerformanceRecord};

/// Fatigue exponent from the 1981 paper
pub const DEFAULT_EXPONENT: f64 = 1.06;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiegelModel {
    pub exponent: f64,
}

impl Default for RiegelModel {
    fn default() -> Self {
        Self {
            exponent: DEFAULT_EXPONENT,
        }
    }
}

impl RiegelModel {
    pub fn with_exponent(exponent: f64) -> Self {
        Self { exponent }
    }

    pub fn predict(
        &self,
        record: &PerformanceRecord,
        target: Distance,
    ) -> Result<Duration, PredictionError> {
        let ratio = target.as_meters() / record.distance.as_meters();
        let seconds = record.duration.as_seconds() * ratio.powf(self.exponent);

        Duration::seconds(seconds).map_err(|_| PredictionError::Degenerate {
            model: ModelKind::Riegel.to_string(),
            reason: format!("exponent {} gives {} s", self.exponent, seconds),
        })
    }
}

/// Riegel prediction with the standard 1.06 exponent
pub fn riegel(record: &PerformanceRecord, target: Distance) -> Result<Duration, PredictionError> {
    RiegelModel::default().predict(record, target)
}
