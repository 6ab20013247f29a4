//! Parsing of individual payment records.
//!
//! A record looks like `time, id1, id2, amount, message`. Only the two id
//! columns matter; anything after them, including commas inside the message,
//! is ignored.

use crate::error::RecordError;
use crate::graph::{Edge, UserId};

/// Extracts the `(id1, id2)` edge from one record line.
///
/// # Errors
/// [`RecordError::MissingField`] if the line has fewer than three fields,
/// [`RecordError::InvalidId`] if either id is not an integer.
pub fn parse_record(line: &str) -> Result<Edge<UserId>, RecordError> {
    let mut fields = line.splitn(4, ',');
    let (Some(_time), Some(id1), Some(id2)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(RecordError::MissingField {
            found: line.split(',').count(),
        });
    };
    Ok((parse_id("id1", id1)?, parse_id("id2", id2)?))
}

fn parse_id(field: &'static str, raw: &str) -> Result<UserId, RecordError> {
    let raw = raw.trim();
    raw.parse().map_err(|_| RecordError::InvalidId {
        field,
        value: raw.to_owned(),
    })
}
