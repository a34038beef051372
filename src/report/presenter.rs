//! Display lines for flight lookups and delayed-flight scans.

use crate::db::QueryResult;
use crate::error::FlightError;

use super::records::FlightRecord;

/// Output of `render`.
///
/// When a record fails validation, `lines` holds everything rendered before
/// it and `error` says why rendering stopped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendering {
    pub lines: Vec<String>,
    pub error: Option<FlightError>,
}

impl Rendering {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Renders a count line followed by one line per flight.
pub fn render(result: &QueryResult) -> Rendering {
    let mut rendering = Rendering {
        lines: Vec::with_capacity(result.len() + 1),
        error: None,
    };
    rendering
        .lines
        .push(format!("Got {} results.", result.len()));

    for (index, record) in result.records().enumerate() {
        match FlightRecord::try_from(record) {
            Ok(flight) => rendering.lines.push(format_flight(&flight)),
            Err(error) => {
                rendering.error = Some(FlightError::malformed(format!(
                    "record {}: {}",
                    index + 1,
                    error_detail(&error)
                )));
                break;
            }
        }
    }

    rendering
}

/// Formats one flight. The delay is mentioned only when it is positive.
pub fn format_flight(flight: &FlightRecord) -> String {
    if flight.is_delayed() {
        format!(
            "{}. {} -> {} by {}, Delay: {} Minutes",
            flight.id,
            flight.origin_airport,
            flight.destination_airport,
            flight.airline,
            flight.delay
        )
    } else {
        format!(
            "{}. {} -> {} by {}",
            flight.id, flight.origin_airport, flight.destination_airport, flight.airline
        )
    }
}

fn error_detail(error: &FlightError) -> String {
    match error {
        FlightError::MalformedRecord(detail) => detail.clone(),
        other => other.to_string(),
    }
}
