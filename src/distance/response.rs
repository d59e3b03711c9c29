//! Decoding of mapping-provider distance-matrix responses.
//!
//! The expected shape is the common `rows[i].elements[j]` layout:
//!
//! ```text
//! {
//!   "status": "OK",
//!   "rows": [
//!     { "elements": [
//!         { "status": "OK",
//!           "distance": { "value": 1200 },
//!           "duration": { "value": 240 },
//!           "duration_in_traffic": { "value": 300 } },
//!         ...
//!     ] },
//!     ...
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::error::OracleError;

use super::{Leg, TravelMatrix};

const OK: &str = "OK";

/// Element statuses that mean "no route" rather than a provider failure.
const NO_ROUTE_STATUSES: [&str; 2] = ["ZERO_RESULTS", "NOT_FOUND"];

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Row {
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct Element {
    status: String,
    distance: Option<Quantity>,
    duration: Option<Quantity>,
    duration_in_traffic: Option<Quantity>,
}

#[derive(Debug, Deserialize)]
struct Quantity {
    value: f64,
}

/// Parses a provider response into a `size`×`size` matrix.
///
/// Cells with `ZERO_RESULTS` or `NOT_FOUND` become unreachable. Any other
/// non-`OK` status, top-level or per element, fails the whole call. In
/// traffic-aware mode `duration_in_traffic` replaces `duration` where the
/// provider supplied it.
///
/// # Examples
///
/// ```
/// use u_tour::distance::parse_matrix_response;
///
/// let json = r#"{
///   "status": "OK",
///   "rows": [
///     { "elements": [
///       { "status": "OK", "distance": { "value": 0 }, "duration": { "value": 0 } },
///       { "status": "OK", "distance": { "value": 1500 }, "duration": { "value": 180 } }
///     ] },
///     { "elements": [
///       { "status": "OK", "distance": { "value": 1600 }, "duration": { "value": 200 } },
///       { "status": "OK", "distance": { "value": 0 }, "duration": { "value": 0 } }
///     ] }
///   ]
/// }"#;
/// let tm = parse_matrix_response(json, 2, false).unwrap();
/// assert_eq!(tm.distance(0, 1), 1500.0);
/// assert_eq!(tm.distance(1, 0), 1600.0);
/// ```
pub fn parse_matrix_response(
    json: &str,
    size: usize,
    traffic_aware: bool,
) -> Result<TravelMatrix, OracleError> {
    let response: MatrixResponse =
        serde_json::from_str(json).map_err(|e| OracleError::Malformed(e.to_string()))?;

    if response.status != OK {
        return Err(OracleError::Status {
            message: response.error_message.unwrap_or_default(),
            status: response.status,
        });
    }
    if response.rows.len() != size {
        return Err(OracleError::DimensionMismatch {
            expected: size,
            actual: response.rows.len(),
        });
    }

    let mut matrix = TravelMatrix::new(size);
    for (i, row) in response.rows.into_iter().enumerate() {
        if row.elements.len() != size {
            return Err(OracleError::Malformed(format!(
                "row {} has {} elements, expected {}",
                i,
                row.elements.len(),
                size
            )));
        }
        for (j, element) in row.elements.into_iter().enumerate() {
            matrix.set(i, j, element_leg(element, i, j, traffic_aware)?);
        }
    }
    Ok(matrix)
}

fn element_leg(
    element: Element,
    from: usize,
    to: usize,
    traffic_aware: bool,
) -> Result<Option<Leg>, OracleError> {
    if NO_ROUTE_STATUSES.contains(&element.status.as_str()) {
        return Ok(None);
    }
    if element.status != OK {
        return Err(OracleError::Status {
            status: element.status,
            message: format!("leg {from} -> {to}"),
        });
    }

    let distance = element
        .distance
        .ok_or_else(|| OracleError::Malformed(format!("leg {from} -> {to} missing distance")))?;
    let base = element
        .duration
        .ok_or_else(|| OracleError::Malformed(format!("leg {from} -> {to} missing duration")))?;
    let duration = match (traffic_aware, element.duration_in_traffic) {
        (true, Some(slow)) => slow.value,
        _ => base.value,
    };
    Ok(Some(Leg::new(distance.value, duration)))
}
