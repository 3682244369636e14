//! Prediction report output
//!
//! Text for the terminal, pretty JSON wrapped in a small envelope, and CSV
//! with one row per target distance.

use chrono::{DateTime, Utc};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

use crate::error::Result;
use crate::models::{ModelKind, Units};
use crate::parsing::format_hms;
use crate::predictor::PredictionReport;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {} (expected text, json or csv)", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// JSON wrapper adding generation metadata
#[derive(Debug, Serialize)]
struct ReportEnvelope<'a, T: Serialize> {
    generated_at: DateTime<Utc>,
    version: &'static str,
    units: Units,
    #[serde(flatten)]
    body: &'a T,
}

#[derive(Debug, Serialize)]
struct EquivalentsBody<'a> {
    equivalents: &'a [PredictionReport],
}

fn write_envelope<W: Write, T: Serialize>(writer: &mut W, body: &T, units: Units) -> Result<()> {
    let envelope = ReportEnvelope {
        generated_at: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        units,
        body,
    };
    serde_json::to_writer_pretty(&mut *writer, &envelope)?;
    writeln!(writer)?;
    Ok(())
}

/// Write one prediction in `format`
pub fn write_prediction<W: Write>(
    writer: &mut W,
    report: &PredictionReport,
    format: OutputFormat,
    units: Units,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_prediction_text(writer, report, units),
        OutputFormat::Json => write_envelope(writer, report, units),
        OutputFormat::Csv => write_csv_rows(writer, std::slice::from_ref(report)),
    }
}

/// Write an equivalent performance table in `format`
pub fn write_equivalents<W: Write>(
    writer: &mut W,
    reports: &[PredictionReport],
    format: OutputFormat,
    units: Units,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_equivalents_text(writer, reports, units),
        OutputFormat::Json => write_envelope(
            writer,
            &EquivalentsBody {
                equivalents: reports,
            },
            units,
        ),
        OutputFormat::Csv => write_csv_rows(writer, reports),
    }
}

fn label(kind: ModelKind) -> String {
    format!("{:>8}", kind.label())
}

/// Terminal layout: one line per model, Cameron validity offsets under it
pub fn write_prediction_text<W: Write>(
    writer: &mut W,
    report: &PredictionReport,
    units: Units,
) -> Result<()> {
    writeln!(
        writer,
        "{} in {} {} {}",
        report.performance.distance.display(units).bold(),
        format_hms(report.performance.duration.as_seconds()).bold(),
        "->".dimmed(),
        report.target.display(units).bold()
    )?;
    writeln!(writer)?;

    for (kind, time) in report.predictions() {
        writeln!(writer, "{}: {}", label(kind).cyan(), format_hms(time.as_seconds()))?;
        if kind == ModelKind::Cameron {
            writeln!(
                writer,
                "\tperform valid (0 best): {:5.0}",
                report.cameron.performance_offset_m
            )?;
            writeln!(
                writer,
                "\tpredict valid (0 best): {:5.0}",
                report.cameron.target_offset_m
            )?;
        }
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "{}: {}",
        format!("{:>8}", "average").green().bold(),
        format_hms(report.average.as_seconds()).green().bold()
    )?;
    writeln!(
        writer,
        "{}: {:.1} s",
        format!("{:>8}", "spread").dimmed(),
        report.spread_seconds
    )?;

    Ok(())
}

/// Terminal table of predictions at each target distance
pub fn write_equivalents_text<W: Write>(
    writer: &mut W,
    reports: &[PredictionReport],
    units: Units,
) -> Result<()> {
    if let Some(first) = reports.first() {
        writeln!(
            writer,
            "Equivalent performances for {} in {}",
            first.performance.distance.display(units).bold(),
            format_hms(first.performance.duration.as_seconds()).bold()
        )?;
        writeln!(writer)?;
    }

    let mut header = format!("{:>10}", "distance");
    for kind in ModelKind::ALL {
        header.push_str(&format!("  {:>9}", kind.label()));
    }
    header.push_str(&format!("  {:>9}", "average"));
    writeln!(writer, "{}", header.bold())?;

    for report in reports {
        let mut row = format!("{:>10}", report.target.display(units));
        for (_, time) in report.predictions() {
            row.push_str(&format!("  {:>9}", format_hms(time.as_seconds())));
        }
        writeln!(
            writer,
            "{}  {}",
            row,
            format!("{:>9}", format_hms(report.average.as_seconds())).green()
        )?;
    }

    Ok(())
}

/// CSV rows, one per report, seconds with millisecond precision
pub fn write_csv_rows<W: Write>(writer: &mut W, reports: &[PredictionReport]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "performance_m",
        "performance_s",
        "target_m",
        "purdy_standard_s",
        "purdy_least_squares_s",
        "vo2max_s",
        "cameron_s",
        "riegel_s",
        "average_s",
        "average_hms",
        "spread_s",
        "performance_offset_m",
        "target_offset_m",
    ])?;

    for report in reports {
        let mut record = vec![
            format!("{}", report.performance.distance.as_meters()),
            format!("{:.3}", report.performance.duration.as_seconds()),
            format!("{}", report.target.as_meters()),
        ];
        record.extend(
            report
                .predictions()
                .iter()
                .map(|(_, time)| format!("{:.3}", time.as_seconds())),
        );
        record.push(format!("{:.3}", report.average.as_seconds()));
        record.push(format_hms(report.average.as_seconds()));
        record.push(format!("{:.3}", report.spread_seconds));
        record.push(format!("{:.1}", report.cameron.performance_offset_m));
        record.push(format!("{:.1}", report.cameron.target_offset_m));

        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}
