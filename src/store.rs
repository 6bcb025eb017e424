//! In-memory league store with JSON snapshots on disk.

use crate::models::{League, LeagueId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Errors from reading or writing a snapshot.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "snapshot I/O error: {}", e),
            StoreError::Json(e) => write!(f, "snapshot format error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// Short listing entry for a league.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeagueSummary {
    pub id: LeagueId,
    pub name: String,
    pub players: usize,
    pub seasons: usize,
}

/// All leagues by id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LeagueStore {
    leagues: HashMap<LeagueId, League>,
    /// Bumped on every mutable access.
    #[serde(skip)]
    revision: u64,
    /// Revision last written to disk.
    #[serde(skip)]
    saved_revision: u64,
}

impl LeagueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.leagues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leagues.is_empty()
    }

    /// True when something changed since the last snapshot.
    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    /// Counter that changes on every mutation; pass it back to `mark_saved`.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn insert(&mut self, league: League) -> LeagueId {
        let id = league.id;
        self.leagues.insert(id, league);
        self.touch();
        id
    }

    pub fn get(&self, id: LeagueId) -> Option<&League> {
        self.leagues.get(&id)
    }

    pub fn get_mut(&mut self, id: LeagueId) -> Option<&mut League> {
        let league = self.leagues.get_mut(&id);
        if league.is_some() {
            self.revision = self.revision.wrapping_add(1);
        }
        league
    }

    pub fn remove(&mut self, id: LeagueId) -> Option<League> {
        let removed = self.leagues.remove(&id);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Every league, sorted by name.
    pub fn summaries(&self) -> Vec<LeagueSummary> {
        let mut list: Vec<LeagueSummary> = self
            .leagues
            .values()
            .map(|l| LeagueSummary {
                id: l.id,
                name: l.name.clone(),
                players: l.players.len(),
                seasons: l.seasons.len(),
            })
            .collect();
        list.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        list
    }

    /// Load a snapshot. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No snapshot at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };
        let store: Self = serde_json::from_slice(&data)?;
        log::info!("Loaded {} league(s) from {}", store.len(), path.display());
        Ok(store)
    }

    /// Serialize the store, returning the revision the bytes reflect.
    pub fn snapshot_bytes(&self) -> Result<(u64, Vec<u8>), StoreError> {
        Ok((self.revision, serde_json::to_vec_pretty(self)?))
    }

    /// Record that `revision` is on disk. Later mutations keep the store dirty.
    pub fn mark_saved(&mut self, revision: u64) {
        self.saved_revision = revision;
    }

    /// Write a snapshot and mark it saved.
    pub fn save(&mut self, path: &Path) -> Result<(), StoreError> {
        let (revision, json) = self.snapshot_bytes()?;
        write_snapshot(path, &json)?;
        self.mark_saved(revision);
        log::debug!("Snapshot of {} league(s) written to {}", self.len(), path.display());
        Ok(())
    }
}

/// Write serialized snapshot bytes to a sibling temp file, then rename over `path`.
pub fn write_snapshot(path: &Path, json: &[u8]) -> Result<(), StoreError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
