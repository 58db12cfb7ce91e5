//! JSON dumps of the event tree.
//!
//! Two layouts are accepted: a single JSON array of events, or one event
//! object per line (JSON Lines).

use super::schema::EventRecord;
use crate::utils::error::ReaderError;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Read a JSON array of events from a file
pub fn read_json_array(path: &Path) -> Result<Vec<EventRecord>, ReaderError> {
    let file = File::open(path)?;
    parse_json_array(BufReader::new(file))
}

/// Read one event per line from a file
pub fn read_json_lines(path: &Path) -> Result<Vec<EventRecord>, ReaderError> {
    let file = File::open(path)?;
    parse_json_lines(BufReader::new(file))
}

/// Parse a JSON array of events
pub fn parse_json_array<R: Read>(reader: R) -> Result<Vec<EventRecord>, ReaderError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse JSON Lines, skipping blank lines
///
/// # Errors
/// * `ReaderError::JsonLine` - carries the 1-based line number of the bad event
pub fn parse_json_lines<R: BufRead>(reader: R) -> Result<Vec<EventRecord>, ReaderError> {
    let mut events = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let event = serde_json::from_str(&line)
            .map_err(|source| ReaderError::JsonLine { line: idx + 1, source })?;
        events.push(event);
    }

    Ok(events)
}
