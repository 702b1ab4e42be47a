//! Track registry: string identifiers mapped to audio clip handles
//!
//! Rebuilt whenever the host's track list changes. Tolerant of duplicate and
//! invalid entries: duplicates upsert (last registration wins), invalid rows
//! are dropped with a logged diagnostic, never an error.

use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::{debug, warn};

/// One row of a bulk track list.
///
/// Mirrors an asset-table row where the clip slot may be left unassigned;
/// such rows are skipped during a rebuild.
#[derive(Debug, Clone)]
pub struct TrackEntry<C> {
    /// Track identifier, e.g. "menu" or "battle".
    pub id: String,
    /// Clip handle, if one is assigned.
    pub clip: Option<C>,
}

/// Maps track identifiers to audio clip handles.
#[derive(Debug)]
pub struct TrackRegistry<C> {
    map: HashMap<String, C>,
}

impl<C> Default for TrackRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TrackRegistry<C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Idempotent upsert of one track.
    ///
    /// A blank (empty or whitespace-only) identifier is dropped with a
    /// warning. Registering an existing identifier replaces its clip.
    pub fn register(&mut self, id: impl Into<String>, clip: C) {
        let id = id.into();
        if id.trim().is_empty() {
            warn!("dropping track registration with blank identifier");
            return;
        }
        self.map.insert(id, clip);
    }

    /// Replace the whole registry from a bulk track list.
    ///
    /// Rows with a blank identifier or no clip assigned are dropped with a
    /// warning.
    pub fn rebuild(&mut self, entries: impl IntoIterator<Item = TrackEntry<C>>) {
        self.map.clear();
        for entry in entries {
            match entry.clip {
                Some(clip) => self.register(entry.id, clip),
                None => warn!(id = %entry.id, "dropping track entry with no clip"),
            }
        }
        debug!(tracks = self.map.len(), "track registry rebuilt");
    }

    /// Look up a clip handle by identifier.
    ///
    /// Absence is a recoverable condition: callers log and no-op.
    pub fn resolve(&self, id: &str) -> Result<&C> {
        self.map
            .get(id)
            .ok_or_else(|| Error::UnknownTrack(id.to_string()))
    }

    /// Whether an identifier is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    /// Number of registered tracks.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
