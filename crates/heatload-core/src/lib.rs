//! # heatload-core
//!
//! Core domain model and traits for the heatload reporting toolkit.
//!
//! This crate provides:
//! - Domain types: `Room`, `RoomMetrics`, `ReportRow`, `HeatingReport`
//! - Source traits: `ModelSource`, `ResultsSource`, `FilePicker`
//! - The `ReportRenderer` trait implemented by output backends
//! - Error types for each pipeline stage
//!
//! The pipeline is three strictly sequential stages:
//!
//! ```rust
//! use heatload_core::{enumerate_rooms, extract_metrics, build_report};
//! # use heatload_core::*;
//! # fn run(model: &dyn ModelSource, results: &dyn ResultsSource)
//! #     -> Result<HeatingReport, Box<dyn std::error::Error>> {
//! let rooms = enumerate_rooms(model)?;
//! let metrics = extract_metrics(results, &rooms)?;
//! let report = build_report(rooms, metrics)?;
//! # Ok(report)
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

mod extract;
mod report;

pub use extract::{enumerate_rooms, extract_metrics};
pub use report::build_report;

// ============================================================================
// Type Aliases & Constants
// ============================================================================

/// Opaque identifier of a spatial entity in the host model
pub type RoomId = String;

/// Fixed safety margin applied to the peak heating load when sizing plant
pub const DESIGN_MARGIN: f64 = 1.10;

/// Results series holding the heating setpoint temperature, degC
pub const SETPOINT_SERIES: &str = "Heating set point";

/// Results series holding the sensible heating plant load, W
pub const HEATING_LOAD_SERIES: &str = "Heating plant sensible load";

/// Fixed name of the output workbook
pub const OUTPUT_FILENAME: &str = "Heating Loads.xlsx";

/// Name of the single worksheet in the output workbook
pub const SHEET_NAME: &str = "Heating Loads";

// ============================================================================
// Domain Types
// ============================================================================

/// Classification of a spatial entity in the host model.
///
/// Only `Room` entities carry thermal results; the remaining kinds are
/// geometry-only and are skipped during enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Room,
    LocalShade,
    AdjacentBuilding,
    Topographical,
}

/// A spatial entity as listed by the model source, before classification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialEntity {
    pub id: RoomId,
    pub kind: BodyKind,
}

/// Identity attributes of a thermal room
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomAttributes {
    pub name: String,
    /// Floor area in m2, as stored by the model (unrounded)
    pub floor_area: f64,
}

/// A thermal room extracted from the model.
///
/// `floor_area` is rounded to 1 decimal place at enumeration time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub floor_area: f64,
}

/// Peak-of-series results for one room.
///
/// `heating_load` is rounded to 2 decimal places at extraction time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomMetrics {
    pub room_id: RoomId,
    /// Peak heating setpoint, degC
    pub setpoint: f64,
    /// Peak sensible heating plant load, W
    pub heating_load: f64,
}

/// One data row of the final report, fully derived
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub name: String,
    pub floor_area: f64,
    pub setpoint: f64,
    pub heating_load: f64,
    /// `heating_load * DESIGN_MARGIN`
    pub design_load: f64,
    /// `design_load / floor_area`
    pub design_load_per_area: f64,
}

/// The cleaned, sorted report table.
///
/// Rows contain only rooms with a positive heating load and are ordered
/// ascending by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatingReport {
    pub rows: Vec<ReportRow>,
}

impl HeatingReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Aggregation level of a results query.
///
/// Mirrors the level codes of the host results store: `z` for zone (room)
/// level, `b` for whole-building level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationLevel {
    Zone,
    Building,
}

impl AggregationLevel {
    /// Level code used by results files
    pub fn code(self) -> &'static str {
        match self {
            Self::Zone => "z",
            Self::Building => "b",
        }
    }
}

/// Extension filter passed to a `FilePicker`, e.g. `("HTG File", "htg")`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileFilter {
    pub description: String,
    /// Extension without the leading dot, matched case-insensitively
    pub extension: String,
}

impl FileFilter {
    pub fn new(description: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            extension: extension.into(),
        }
    }

    pub fn matches(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }
}

// ============================================================================
// Source Traits
// ============================================================================

/// Read access to the building model (stage 1 input)
pub trait ModelSource {
    /// All spatial entities of the model, thermal or not
    fn spatial_entities(&self) -> Result<Vec<SpatialEntity>, ExtractError>;

    /// Identity attributes of one thermal room
    fn room_attributes(&self, id: &RoomId) -> Result<RoomAttributes, ExtractError>;
}

/// Read access to the simulation results store (stage 2 input)
pub trait ResultsSource {
    /// Ordered samples of one named series for one room.
    ///
    /// An absent room/series entry returns `MissingResultSeries`; callers
    /// must also treat an empty sample vector as missing.
    fn room_series(
        &self,
        room_id: &RoomId,
        series: &str,
        level: AggregationLevel,
    ) -> Result<Vec<f64>, ExtractError>;
}

/// Interactive selection of an input file
pub trait FilePicker {
    /// Prompt for a file matching `filter`. Cancellation is an error
    /// (`ExtractError::UserCancelled`), not a silent skip.
    fn pick(&self, filter: &FileFilter, title: &str) -> Result<PathBuf, ExtractError>;
}

/// Output rendering
pub trait ReportRenderer {
    type Output;

    /// Render the report to the output format
    fn render(&self, report: &HeatingReport) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Extraction error (stages 1 and 2)
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("model data unavailable: {0}")]
    DataUnavailable(String),

    #[error("no '{series}' results recorded for room '{room}'")]
    MissingResultSeries { room: String, series: String },

    #[error("file selection cancelled")]
    UserCancelled,
}

/// Report assembly error (stage 3, before rendering)
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("room/metrics cardinality mismatch: {rooms} rooms, {metrics} metric sets")]
    InvariantViolation { rooms: usize, metrics: usize },

    #[error("room '{room}' has no matching metrics; room/metrics join is misaligned")]
    UnmatchedRoom { room: RoomId },

    #[error("room '{room}' has zero floor area; cannot compute design load per m2")]
    DivisionByZero { room: String },
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),
}

// ============================================================================
// Tests
// ============================================================================
