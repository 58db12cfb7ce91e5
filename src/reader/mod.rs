//! Event tree input.
//!
//! This module handles:
//! - Detecting the input format from the file extension
//! - Reading ROOT trees and JSON dumps into typed `EventRecord`s
//! - Reporting the entry count of the tree

pub mod json_events;
pub mod root_tree;
pub mod schema;

pub use schema::EventRecord;

use crate::utils::config::DEFAULT_TREE_NAME;
use crate::utils::error::ReaderError;
use log::info;
use std::path::Path;

/// Supported input layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// ROOT file holding the simulation TTree
    Root,
    /// JSON array of events
    Json,
    /// One JSON event per line
    JsonLines,
}

impl InputFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, ReaderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "root" => Ok(Self::Root),
            "json" => Ok(Self::Json),
            "jsonl" | "ndjson" => Ok(Self::JsonLines),
            _ => Err(ReaderError::UnsupportedFormat(format!(
                "{} (expected .root, .json, .jsonl or .ndjson)",
                path.display()
            ))),
        }
    }
}

/// Options for opening an event tree
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Tree name inside a ROOT file (ignored for JSON)
    pub tree: String,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            tree: DEFAULT_TREE_NAME.to_string(),
        }
    }
}

/// All events of one tree, in entry order
#[derive(Debug, Clone)]
pub struct EventTree {
    name: String,
    events: Vec<EventRecord>,
}

impl EventTree {
    pub fn new(name: impl Into<String>, events: Vec<EventRecord>) -> Self {
        Self {
            name: name.into(),
            events,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of entries in the tree
    pub fn entries(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn into_events(self) -> Vec<EventRecord> {
        self.events
    }
}

/// Open an event tree from disk
///
/// **Public** - main entry point for input
///
/// # Arguments
/// * `path` - `.root`, `.json`, `.jsonl` or `.ndjson` file
/// * `options` - tree selection
///
/// # Errors
/// * `ReaderError::UnsupportedFormat` - unknown extension
/// * Any error from the format-specific reader
pub fn open_event_tree(
    path: impl AsRef<Path>,
    options: &ReadOptions,
) -> Result<EventTree, ReaderError> {
    let path = path.as_ref();
    let format = InputFormat::from_path(path)?;

    let events = match format {
        InputFormat::Root => root_tree::read_root_events(path, &options.tree)?,
        InputFormat::Json => json_events::read_json_array(path)?,
        InputFormat::JsonLines => json_events::read_json_lines(path)?,
    };

    let tree = EventTree::new(options.tree.clone(), events);
    info!(
        "Number of entries in tree '{}' from {}: {}",
        tree.name(),
        path.display(),
        tree.entries()
    );

    Ok(tree)
}
