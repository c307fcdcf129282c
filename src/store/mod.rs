//! Best-effort persistence: an outbound sync queue fed by the mutation
//! handlers and a store that a background worker writes snapshots to.
//!
//! Store failures are logged and never block the in-memory recompute; the
//! scoreboard favors availability of the derived computation over strict
//! write consistency with its backing store.

mod file;

pub use file::FileStore;

use crate::models::Championship;
use crate::transfer::Document;
use std::sync::Mutex;

/// One outbound persistence operation. Rapid successive edits pile up here
/// and are coalesced by the sync worker into a single snapshot write.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SyncEvent {
    DatasetImported,
    ManagerSaved(String),
    ManagerRenamed { old: String, new: String },
    ManagerDeleted(String),
    MatchdaySaved { championship: Championship, season: u32, matchday: u32 },
    PenaltySaved(String),
    PenaltyDeleted(String),
    SeasonSaved(String),
    ExemptTeamUpdated { season: u32 },
    ChampionSaved { championship: Championship, season: u32 },
    PantheonUpdated,
}

impl std::fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncEvent::DatasetImported => write!(f, "dataset imported"),
            SyncEvent::ManagerSaved(id) => write!(f, "manager saved: {id}"),
            SyncEvent::ManagerRenamed { old, new } => {
                write!(f, "manager renamed: {old} -> {new}")
            }
            SyncEvent::ManagerDeleted(id) => write!(f, "manager deleted: {id}"),
            SyncEvent::MatchdaySaved { championship, season, matchday } => write!(
                f,
                "matchday saved: {} s{} j{}",
                championship.external_id(),
                season,
                matchday
            ),
            SyncEvent::PenaltySaved(key) => write!(f, "penalty saved: {key}"),
            SyncEvent::PenaltyDeleted(key) => write!(f, "penalty deleted: {key}"),
            SyncEvent::SeasonSaved(key) => write!(f, "season saved: {key}"),
            SyncEvent::ExemptTeamUpdated { season } => {
                write!(f, "exempt team updated: s{season}")
            }
            SyncEvent::ChampionSaved { championship, season } => write!(
                f,
                "champion saved: {} s{}",
                championship.external_id(),
                season
            ),
            SyncEvent::PantheonUpdated => write!(f, "pantheon updated"),
        }
    }
}

/// Producer side lives in the request handlers, consumer side in the sync
/// worker; neither ever blocks on the other beyond the mutex.
#[derive(Debug, Default)]
pub struct SyncQueue {
    events: Mutex<Vec<SyncEvent>>,
}

impl SyncQueue {
    pub fn push(&self, event: SyncEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    /// Take everything queued so far.
    pub fn drain(&self) -> Vec<SyncEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "i/o error: {e}"),
            StoreError::Serialization(e) => write!(f, "serialization error: {e}"),
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
        StoreError::Serialization(e)
    }
}

/// Whole-document persistence. `load` runs once at startup; `persist` is
/// called by the sync worker with the latest snapshot.
pub trait Store: Send + Sync {
    fn load(&self) -> Result<Option<Document>, StoreError>;
    fn persist(&self, document: &Document) -> Result<(), StoreError>;
}
