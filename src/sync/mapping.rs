//! Identifier mapping
//!
//! Two-way correlation between the identifier embedded in a local file's
//! name at export time and the identifier the server currently assigns to
//! the same workflow. Rebuilt from live data on every run, never persisted.

use std::collections::HashMap;

/// Bidirectional original↔current identifier mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdMapping {
    original_to_current: HashMap<String, String>,
    current_to_original: HashMap<String, String>,
}

impl IdMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a correlation in both directions.
    pub fn insert(&mut self, original_id: impl Into<String>, current_id: impl Into<String>) {
        let original_id = original_id.into();
        let current_id = current_id.into();
        self.original_to_current
            .insert(original_id.clone(), current_id.clone());
        self.current_to_original.insert(current_id, original_id);
    }

    /// Look up the server's current id for an original id.
    pub fn current_for(&self, original_id: &str) -> Option<&str> {
        self.original_to_current.get(original_id).map(|s| s.as_str())
    }

    /// Look up the original id for a current server id.
    pub fn original_for(&self, current_id: &str) -> Option<&str> {
        self.current_to_original.get(current_id).map(|s| s.as_str())
    }

    /// Number of mapped workflows.
    pub fn len(&self) -> usize {
        self.original_to_current.len()
    }

    /// True when nothing was correlated.
    pub fn is_empty(&self) -> bool {
        self.original_to_current.is_empty()
    }

    /// All (original, current) pairs sorted by original id, for reporting.
    pub fn iter_sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .original_to_current
            .iter()
            .map(|(o, c)| (o.as_str(), c.as_str()))
            .collect();
        pairs.sort_by_key(|(original, _)| *original);
        pairs
    }
}
