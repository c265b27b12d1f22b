//! JSON results-export reader.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use heatload_core::{AggregationLevel, ExtractError, ResultsSource, RoomId};

/// Per-room results: aggregation-level code -> series name -> samples.
///
/// Level codes match `AggregationLevel::code` ("z" for zone, "b" for
/// building).
type RoomSeries = HashMap<String, HashMap<String, Vec<f64>>>;

#[derive(Debug, Deserialize)]
struct ResultsDocument {
    rooms: HashMap<RoomId, RoomSeries>,
}

/// A simulation results export opened from disk.
#[derive(Debug)]
pub struct ResultsFile {
    rooms: HashMap<RoomId, RoomSeries>,
}

impl ResultsFile {
    /// Open and parse a results export. IO and parse failures map to
    /// `DataUnavailable`; per-room gaps surface later, at query time.
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ExtractError::DataUnavailable(format!(
                "cannot read results file '{}': {e}",
                path.display()
            ))
        })?;
        let doc: ResultsDocument = serde_json::from_str(&raw).map_err(|e| {
            ExtractError::DataUnavailable(format!(
                "malformed results file '{}': {e}",
                path.display()
            ))
        })?;

        tracing::debug!(rooms = doc.rooms.len(), "opened results file");
        Ok(Self { rooms: doc.rooms })
    }
}

impl ResultsSource for ResultsFile {
    fn room_series(
        &self,
        room_id: &RoomId,
        series: &str,
        level: AggregationLevel,
    ) -> Result<Vec<f64>, ExtractError> {
        let samples = self
            .rooms
            .get(room_id)
            .and_then(|levels| levels.get(level.code()))
            .and_then(|names| names.get(series));

        match samples {
            Some(samples) => Ok(samples.clone()),
            None => Err(ExtractError::MissingResultSeries {
                room: room_id.clone(),
                series: series.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatload_core::{HEATING_LOAD_SERIES, SETPOINT_SERIES};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const RESULTS: &str = r#"{
        "rooms": {
            "r1": {
                "z": {
                    "Heating set point": [19.0, 21.0, 20.0],
                    "Heating plant sensible load": [80.0, 123.456]
                }
            },
            "r2": {
                "z": {
                    "Heating set point": []
                }
            }
        }
    }"#;

    fn open_fixture() -> (tempfile::NamedTempFile, ResultsFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RESULTS.as_bytes()).unwrap();
        let results = ResultsFile::open(file.path()).unwrap();
        (file, results)
    }

    #[test]
    fn query_returns_recorded_samples_in_order() {
        let (_file, results) = open_fixture();
        let samples = results
            .room_series(&"r1".to_string(), SETPOINT_SERIES, AggregationLevel::Zone)
            .unwrap();
        assert_eq!(samples, vec![19.0, 21.0, 20.0]);
    }

    #[test]
    fn absent_series_is_missing_result_series() {
        let (_file, results) = open_fixture();
        let err = results
            .room_series(
                &"r2".to_string(),
                HEATING_LOAD_SERIES,
                AggregationLevel::Zone,
            )
            .unwrap_err();
        assert!(matches!(err, ExtractError::MissingResultSeries { .. }));
    }

    #[test]
    fn absent_room_is_missing_result_series() {
        let (_file, results) = open_fixture();
        let err = results
            .room_series(&"r9".to_string(), SETPOINT_SERIES, AggregationLevel::Zone)
            .unwrap_err();
        match err {
            ExtractError::MissingResultSeries { room, .. } => assert_eq!(room, "r9"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wrong_aggregation_level_is_missing_result_series() {
        let (_file, results) = open_fixture();
        let err = results
            .room_series(
                &"r1".to_string(),
                SETPOINT_SERIES,
                AggregationLevel::Building,
            )
            .unwrap_err();
        assert!(matches!(err, ExtractError::MissingResultSeries { .. }));
    }

    #[test]
    fn recorded_but_empty_series_is_returned_for_the_caller_to_reject() {
        let (_file, results) = open_fixture();
        let samples = results
            .room_series(&"r2".to_string(), SETPOINT_SERIES, AggregationLevel::Zone)
            .unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let err = ResultsFile::open(Path::new("/nonexistent/results.htg.json")).unwrap_err();
        assert!(matches!(err, ExtractError::DataUnavailable(_)));
    }
}
