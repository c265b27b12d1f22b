//! Stages 1 and 2: room enumeration and results extraction.

use crate::{
    AggregationLevel, BodyKind, ExtractError, ModelSource, ResultsSource, Room, RoomMetrics,
    HEATING_LOAD_SERIES, SETPOINT_SERIES,
};

/// Round to `dp` decimal places
pub(crate) fn round_to(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

/// Enumerate the thermal rooms of a model.
///
/// Spatial entities with any other classification (shading, adjacent
/// buildings, topographical geometry) are skipped silently. Floor areas are
/// rounded to 1 decimal place here; nothing downstream re-reads the model.
pub fn enumerate_rooms(model: &dyn ModelSource) -> Result<Vec<Room>, ExtractError> {
    let entities = model.spatial_entities()?;

    let mut rooms = Vec::new();
    for entity in entities {
        if entity.kind != BodyKind::Room {
            tracing::debug!(id = %entity.id, kind = ?entity.kind, "skipping non-room entity");
            continue;
        }
        let attrs = model.room_attributes(&entity.id)?;
        rooms.push(Room {
            id: entity.id,
            name: attrs.name,
            floor_area: round_to(attrs.floor_area, 1),
        });
    }

    tracing::info!(rooms = rooms.len(), "enumerated thermal rooms");
    Ok(rooms)
}

/// Reduce a series to its peak value, failing on an empty series.
///
/// Peak demand is the design-relevant quantity; an empty series means the
/// simulation recorded nothing for this room, and substituting a default
/// would feed a silent zero into plant sizing.
fn peak(
    samples: &[f64],
    room: &Room,
    series: &str,
) -> Result<f64, ExtractError> {
    if samples.is_empty() {
        return Err(ExtractError::MissingResultSeries {
            room: room.name.clone(),
            series: series.to_string(),
        });
    }
    Ok(samples.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Extract peak setpoint and peak heating load for each room.
///
/// Queries zone-level results for the two fixed series and reduces each to
/// its maximum sample. Output order matches the input room order. The peak
/// load is rounded to 2 decimal places; the setpoint is left as recorded.
pub fn extract_metrics(
    results: &dyn ResultsSource,
    rooms: &[Room],
) -> Result<Vec<RoomMetrics>, ExtractError> {
    let mut metrics = Vec::with_capacity(rooms.len());

    for room in rooms {
        let setpoints = results.room_series(&room.id, SETPOINT_SERIES, AggregationLevel::Zone)?;
        let loads = results.room_series(&room.id, HEATING_LOAD_SERIES, AggregationLevel::Zone)?;

        let setpoint = peak(&setpoints, room, SETPOINT_SERIES)?;
        let heating_load = round_to(peak(&loads, room, HEATING_LOAD_SERIES)?, 2);

        tracing::debug!(room = %room.name, setpoint, heating_load, "extracted peak results");
        metrics.push(RoomMetrics {
            room_id: room.id.clone(),
            setpoint,
            heating_load,
        });
    }

    tracing::info!(rooms = metrics.len(), "extracted results for all rooms");
    Ok(metrics)
}
