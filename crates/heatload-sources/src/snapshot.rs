//! JSON model snapshot reader.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use heatload_core::{
    BodyKind, ExtractError, ModelSource, RoomAttributes, RoomId, SpatialEntity,
};

/// One spatial entity record in a snapshot file.
///
/// Name and floor area are present only for thermal rooms; geometry-only
/// bodies carry just id and kind.
#[derive(Clone, Debug, Deserialize)]
struct BodyRecord {
    id: RoomId,
    kind: BodyKind,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    floor_area: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    entities: Vec<BodyRecord>,
}

/// A building-model snapshot exported from the host as JSON.
#[derive(Debug)]
pub struct ModelSnapshot {
    entities: Vec<SpatialEntity>,
    attributes: HashMap<RoomId, RoomAttributes>,
}

impl ModelSnapshot {
    /// Open and parse a snapshot file. Any IO or parse failure means the
    /// model cannot be reached and maps to `DataUnavailable`.
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ExtractError::DataUnavailable(format!(
                "cannot read model snapshot '{}': {e}",
                path.display()
            ))
        })?;
        let file: SnapshotFile = serde_json::from_str(&raw).map_err(|e| {
            ExtractError::DataUnavailable(format!(
                "malformed model snapshot '{}': {e}",
                path.display()
            ))
        })?;

        let mut entities = Vec::with_capacity(file.entities.len());
        let mut attributes = HashMap::new();
        for record in file.entities {
            entities.push(SpatialEntity {
                id: record.id.clone(),
                kind: record.kind,
            });
            if let (Some(name), Some(floor_area)) = (record.name, record.floor_area) {
                attributes.insert(record.id, RoomAttributes { name, floor_area });
            }
        }

        tracing::debug!(entities = entities.len(), "loaded model snapshot");
        Ok(Self {
            entities,
            attributes,
        })
    }
}

impl ModelSource for ModelSnapshot {
    fn spatial_entities(&self) -> Result<Vec<SpatialEntity>, ExtractError> {
        Ok(self.entities.clone())
    }

    fn room_attributes(&self, id: &RoomId) -> Result<RoomAttributes, ExtractError> {
        self.attributes.get(id).cloned().ok_or_else(|| {
            ExtractError::DataUnavailable(format!("room '{id}' has no attributes in the snapshot"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatload_core::enumerate_rooms;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "entities": [
            {"id": "r1", "kind": "room", "name": "Office 1", "floor_area": 24.36},
            {"id": "s1", "kind": "local_shade"},
            {"id": "r2", "kind": "room", "name": "Office 2", "floor_area": 18.0},
            {"id": "t1", "kind": "topographical"}
        ]
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn snapshot_round_trips_through_enumeration() {
        let file = write_temp(SNAPSHOT);
        let snapshot = ModelSnapshot::open(file.path()).unwrap();

        let rooms = enumerate_rooms(&snapshot).unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].name, "Office 1");
        assert_eq!(rooms[0].floor_area, 24.4);
        assert_eq!(rooms[1].name, "Office 2");
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let err = ModelSnapshot::open(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ExtractError::DataUnavailable(_)));
    }

    #[test]
    fn malformed_json_is_data_unavailable() {
        let file = write_temp("{ not json");
        let err = ModelSnapshot::open(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::DataUnavailable(_)));
    }

    #[test]
    fn room_without_attributes_is_data_unavailable() {
        let file = write_temp(r#"{"entities": [{"id": "r1", "kind": "room"}]}"#);
        let snapshot = ModelSnapshot::open(file.path()).unwrap();
        let err = enumerate_rooms(&snapshot).unwrap_err();
        assert!(matches!(err, ExtractError::DataUnavailable(_)));
    }
}
