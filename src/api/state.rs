//! Application state shared by the API handlers.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::ConfigLoader;
use crate::dunning::{DunningBoard, RecoveryStore};
use crate::error::{EngineError, EngineResult};

/// Shared application state.
///
/// Holds the loaded wage configuration, the recovery record store and the
/// dunning board snapshot. Board locks are only taken inside synchronous
/// code and never held across an `.await`.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<dyn RecoveryStore>,
    board: Arc<RwLock<DunningBoard>>,
}

fn board_poisoned() -> EngineError {
    EngineError::CalculationError {
        message: "dunning board lock poisoned".to_string(),
    }
}

impl AppState {
    /// Creates a new application state over a configuration and a store.
    pub fn new(config: ConfigLoader, store: Arc<dyn RecoveryStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            board: Arc::new(RwLock::new(DunningBoard::default())),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the recovery record store.
    pub fn store(&self) -> &dyn RecoveryStore {
        self.store.as_ref()
    }

    pub(crate) fn board(&self) -> EngineResult<RwLockReadGuard<'_, DunningBoard>> {
        self.board.read().map_err(|_| board_poisoned())
    }

    pub(crate) fn board_mut(&self) -> EngineResult<RwLockWriteGuard<'_, DunningBoard>> {
        self.board.write().map_err(|_| board_poisoned())
    }

    #[cfg(test)]
    pub(crate) fn board_is_locked(&self) -> bool {
        self.board.try_read().is_err()
    }
}
