//! Stage 3 (assembly): join, filter, sort and derive the report table.

use std::collections::HashMap;

use crate::{HeatingReport, ReportError, ReportRow, Room, RoomMetrics, DESIGN_MARGIN};

/// Build the report table from enumerated rooms and their extracted metrics.
///
/// Rooms and metrics are joined by room id rather than by position, so a
/// reordering in either source cannot silently misalign the table. Rows with
/// a non-positive heating load are dropped, the remainder is sorted ascending
/// by name, and the derived columns are computed last.
pub fn build_report(
    rooms: Vec<Room>,
    metrics: Vec<RoomMetrics>,
) -> Result<HeatingReport, ReportError> {
    if rooms.len() != metrics.len() {
        return Err(ReportError::InvariantViolation {
            rooms: rooms.len(),
            metrics: metrics.len(),
        });
    }

    let mut by_id: HashMap<String, RoomMetrics> =
        metrics.into_iter().map(|m| (m.room_id.clone(), m)).collect();

    let mut joined = Vec::with_capacity(by_id.len());
    for room in rooms {
        // A metric set keyed to an unknown room leaves this lookup short,
        // which the cardinality check above cannot catch on its own.
        let Some(metric) = by_id.remove(&room.id) else {
            return Err(ReportError::UnmatchedRoom { room: room.id });
        };
        joined.push((room, metric));
    }

    // Rooms with no active heating demand are not actionable for sizing
    joined.retain(|(_, m)| m.heating_load > 0.0);
    joined.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name));

    let mut rows = Vec::with_capacity(joined.len());
    for (room, metric) in joined {
        if room.floor_area == 0.0 {
            return Err(ReportError::DivisionByZero { room: room.name });
        }
        let design_load = metric.heating_load * DESIGN_MARGIN;
        rows.push(ReportRow {
            name: room.name,
            floor_area: room.floor_area,
            setpoint: metric.setpoint,
            heating_load: metric.heating_load,
            design_load,
            design_load_per_area: design_load / room.floor_area,
        });
    }

    if rows.is_empty() {
        tracing::warn!("no rooms with a positive heating load; report will be empty");
    }

    Ok(HeatingReport { rows })
}
