//! In-memory session stores. Nothing persists: ratings and sessions last
//! for the visit, matching the product's per-visit model.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chess_core::ChessRules;
use chess_trainer::Session;

use crate::explorer::ExplorerSession;

/// A trainer session plus the rating it draws puzzles for.
pub struct TrainerEntry {
    pub rating: u32,
    pub session: Session<ChessRules>,
}

#[derive(Default)]
pub struct AppState {
    next_id: AtomicU64,
    trainers: Mutex<HashMap<u64, TrainerEntry>>,
    explorers: Mutex<HashMap<u64, ExplorerSession>>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new() -> SharedState {
        Arc::new(Self::default())
    }

    pub fn insert_trainer(&self, entry: TrainerEntry) -> u64 {
        let id = self.next_id();
        self.trainers().insert(id, entry);
        id
    }

    pub fn trainers(&self) -> MutexGuard<'_, HashMap<u64, TrainerEntry>> {
        self.trainers.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn insert_explorer(&self, session: ExplorerSession) -> u64 {
        let id = self.next_id();
        self.explorers().insert(id, session);
        id
    }

    pub fn explorers(&self) -> MutexGuard<'_, HashMap<u64, ExplorerSession>> {
        self.explorers.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_per_store_kind() {
        let state = AppState::default();
        let a = state.insert_explorer(ExplorerSession::new());
        let b = state.insert_explorer(ExplorerSession::new());
        assert_ne!(a, b);
        assert!(state.explorers().contains_key(&a));
        assert!(state.explorers().contains_key(&b));
    }
}
