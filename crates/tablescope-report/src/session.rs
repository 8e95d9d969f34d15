//! Per-session "current table".

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::{Result, anyhow};
use polars::prelude::DataFrame;
use tracing::debug;
use uuid::Uuid;

/// Identifies one user session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Most recent table of each session.
///
/// Tables are handed out as `Arc` snapshots, so replacing a session's table
/// never affects an analysis already running against the previous one.
#[derive(Debug, Default)]
pub struct SessionStore {
    tables: RwLock<HashMap<SessionId, Arc<DataFrame>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the session's table and returns the stored snapshot.
    pub fn replace(&self, session: SessionId, df: DataFrame) -> Arc<DataFrame> {
        let df = Arc::new(df);
        debug!(%session, rows = df.height(), cols = df.width(), "replaced session table");
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session, Arc::clone(&df));
        df
    }

    pub fn get(&self, session: SessionId) -> Option<Arc<DataFrame>> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&session)
            .cloned()
    }

    /// Like [`SessionStore::get`] but fails with a user-facing message.
    pub fn require(&self, session: SessionId) -> Result<Arc<DataFrame>> {
        self.get(session)
            .ok_or_else(|| anyhow!("no table loaded; generate or load a table first"))
    }

    pub fn remove(&self, session: SessionId) -> Option<Arc<DataFrame>> {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&session)
    }

    pub fn len(&self) -> usize {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::new();
        let (a, b) = (SessionId::new(), SessionId::new());
        store.replace(a, df!("x" => [1, 2]).unwrap());
        assert_eq!(store.get(a).unwrap().height(), 2);
        assert!(store.get(b).is_none());
        assert!(store.require(b).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn snapshot_survives_replacement() {
        let store = SessionStore::new();
        let id = SessionId::new();
        store.replace(id, df!("x" => [1, 2, 3]).unwrap());
        let snapshot = store.get(id).unwrap();
        store.replace(id, df!("y" => [1]).unwrap());
        assert_eq!(snapshot.height(), 3);
        assert_eq!(store.get(id).unwrap().height(), 1);
        assert!(store.remove(id).is_some());
        assert!(store.is_empty());
    }
}
