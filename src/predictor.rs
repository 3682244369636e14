//! Runs every prediction model against one performance and combines them
//!
//! Models run in a fixed order: Purdy standard, Purdy least squares, VO2max
//! (seeded with the Purdy standard time), Cameron, Riegel. The first model
//! error aborts the prediction.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::{debug, info};

use crate::cameron::{CameronModel, CameronPrediction};
use crate::config::PredictorConfig;
use crate::error::PredictionError;
use crate::models::{Distance, Duration, ModelKind, PerformanceRecord};
use crate::purdy::PurdyModel;
use crate::riegel::RiegelModel;
use crate::tables::CANONICAL_DISTANCES;
use crate::vo2max::Vo2MaxSolver;

/// All model predictions for one target distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub performance: PerformanceRecord,
    pub target: Distance,
    pub purdy_standard: Duration,
    pub purdy_least_squares: Duration,
    pub vo2max: Duration,
    pub cameron: CameronPrediction,
    pub riegel: Duration,
    /// Mean of the five predictions
    pub average: Duration,
    /// Sample standard deviation of the five predictions, in seconds
    pub spread_seconds: f64,
}

impl PredictionReport {
    /// Predictions in model order
    pub fn predictions(&self) -> [(ModelKind, Duration); 5] {
        [
            (ModelKind::PurdyStandard, self.purdy_standard),
            (ModelKind::PurdyLeastSquares, self.purdy_least_squares),
            (ModelKind::Vo2Max, self.vo2max),
            (ModelKind::Cameron, self.cameron.time),
            (ModelKind::Riegel, self.riegel),
        ]
    }

    pub fn get(&self, kind: ModelKind) -> Duration {
        match kind {
            ModelKind::PurdyStandard => self.purdy_standard,
            ModelKind::PurdyLeastSquares => self.purdy_least_squares,
            ModelKind::Vo2Max => self.vo2max,
            ModelKind::Cameron => self.cameron.time,
            ModelKind::Riegel => self.riegel,
        }
    }
}

/// Arithmetic mean of prediction times in seconds
pub fn average_seconds(times: &[Duration]) -> Option<f64> {
    if times.is_empty() {
        return None;
    }
    let total: f64 = times.iter().map(Duration::as_seconds).sum();
    Some(total / times.len() as f64)
}

/// Runs the five models with shared settings
#[derive(Debug, Clone, Copy)]
pub struct RacePredictor {
    purdy_standard: PurdyModel,
    purdy_least_squares: PurdyModel,
    vo2max: Vo2MaxSolver,
    cameron: CameronModel,
    riegel: RiegelModel,
}

impl Default for RacePredictor {
    fn default() -> Self {
        Self {
            purdy_standard: PurdyModel::standard(),
            purdy_least_squares: PurdyModel::least_squares(),
            vo2max: Vo2MaxSolver::default(),
            cameron: CameronModel::default(),
            riegel: RiegelModel::default(),
        }
    }
}

impl RacePredictor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PredictorConfig) -> Self {
        Self {
            vo2max: Vo2MaxSolver::new(config.vo2max),
            cameron: CameronModel::new(config.cameron.scan_policy),
            riegel: config.riegel,
            ..Self::default()
        }
    }

    /// Predict the time at `target` with every model
    pub fn predict(
        &self,
        record: &PerformanceRecord,
        target: Distance,
    ) -> Result<PredictionReport, PredictionError> {
        let purdy_standard = self.purdy_standard.predict(record, target)?;
        let purdy_least_squares = self.purdy_least_squares.predict(record, target)?;
        let vo2max = self.vo2max.predict(record, target, purdy_standard)?;
        let cameron = self.cameron.predict(record, target)?;
        let riegel = self.riegel.predict(record, target)?;

        let times = [
            purdy_standard,
            purdy_least_squares,
            vo2max,
            cameron.time,
            riegel,
        ];
        let average = Duration::seconds(average_seconds(&times).unwrap_or(f64::NAN))?;
        let spread_seconds = times.map(|t| t.as_seconds()).iter().std_dev();

        debug!(
            target_m = target.as_meters(),
            average = average.as_seconds(),
            spread_seconds,
            "predictions combined"
        );

        Ok(PredictionReport {
            performance: *record,
            target,
            purdy_standard,
            purdy_least_squares,
            vo2max,
            cameron,
            riegel,
            average,
            spread_seconds,
        })
    }

    /// Predictions at every canonical race distance
    pub fn equivalents(
        &self,
        record: &PerformanceRecord,
    ) -> Result<Vec<PredictionReport>, PredictionError> {
        let reports = CANONICAL_DISTANCES
            .iter()
            .map(|&meters| self.predict(record, Distance::meters(meters)?))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            distance_m = record.distance.as_meters(),
            rows = reports.len(),
            "equivalent performances computed"
        );

        Ok(reports)
    }
}

/// Run every model with default settings
pub fn predict_all(
    record: &PerformanceRecord,
    target: Distance,
) -> Result<PredictionReport, PredictionError> {
    RacePredictor::default().predict(record, target)
}
