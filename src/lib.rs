// Library interface for racepred
// The binary and the integration tests both build on these modules

pub mod cameron;
pub mod config;
pub mod curves;
pub mod error;
pub mod logging;
pub mod models;
pub mod parsing;
pub mod predictor;
pub mod purdy;
pub mod report;
pub mod riegel;
pub mod tables;
pub mod vo2max;

// Re-export commonly used types for convenience
pub use models::*;
pub use cameron::{cameron, CameronModel, CameronPrediction, ScanPolicy};
pub use purdy::{purdy_least_squares, purdy_standard, PurdyModel, PurdyVariant};
pub use riegel::{riegel, RiegelModel};
pub use vo2max::{vo2max_time, SolverOutcome, SolverSettings, Vo2MaxSolver};
pub use predictor::{predict_all, PredictionReport, RacePredictor};
pub use config::PredictorConfig;
pub use error::{ParseError, PredictionError, RacePredError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
