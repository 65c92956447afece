//! Sensor directory lookup - the external catalog the sensor picker consumes
//!
//! The core only needs a bounded substring search over `{id, name, path}`
//! records. [`StaticDirectory`] is the in-memory implementation; a remote
//! directory would implement [`SensorDirectory`] at the same seam.

use std::fmt;
use std::path::Path;

use anyhow::Context;

use crate::model::SensorRecord;

/// Upper bound on results returned from a single search
pub const MAX_RESULTS: usize = 20;

/// A searchable catalog of sensor records
pub trait SensorDirectory: fmt::Debug {
    /// Free-text search over name, id, and path substrings
    ///
    /// Matching is both case-sensitive and case-insensitive (so katakana
    /// names and lowercase ids are found by the same query). At most
    /// [`MAX_RESULTS`] records are returned. An empty or blank query
    /// returns the first [`MAX_RESULTS`] records unfiltered - a browse
    /// view, not "no results".
    fn search(&self, query: &str) -> Vec<SensorRecord>;
}

/// In-memory sensor directory backed by a fixed record list
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    records: Vec<SensorRecord>,
}

impl StaticDirectory {
    pub fn new(records: Vec<SensorRecord>) -> Self {
        Self { records }
    }

    /// Load a catalog from a JSON array of `{id, name, path}` objects
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let records: Vec<SensorRecord> =
            serde_json::from_str(json).context("failed to parse sensor catalog JSON")?;
        Ok(Self::new(records))
    }

    /// Load a catalog from a JSON file on disk
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read sensor catalog at {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn records(&self) -> &[SensorRecord] {
        &self.records
    }
}

impl SensorDirectory for StaticDirectory {
    fn search(&self, query: &str) -> Vec<SensorRecord> {
        let query = query.trim();
        if query.is_empty() {
            return self.records.iter().take(MAX_RESULTS).cloned().collect();
        }

        let lower = query.to_lowercase();
        let field_matches =
            |field: &str| field.contains(query) || field.to_lowercase().contains(&lower);

        let results: Vec<SensorRecord> = self
            .records
            .iter()
            .filter(|s| field_matches(&s.name) || field_matches(&s.id) || field_matches(&s.path))
            .take(MAX_RESULTS)
            .cloned()
            .collect();

        tracing::debug!(query, count = results.len(), "sensor search");
        results
    }
}
