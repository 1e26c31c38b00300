//! Application state bound to its config file
//!
//! Every rule add/delete, always-on-top change and close-to-tray writes the
//! config. Write failures are logged and the in-memory state is kept.

use tracing::{info, warn};

use crate::config::{AppConfig, ConfigStore};
use crate::state::AppState;

pub struct Session {
    pub state: AppState,
    store: ConfigStore,
}

impl Session {
    /// Load state from `store`, falling back to defaults
    pub fn open(store: ConfigStore) -> Self {
        let state = AppState::from_config(store.load());
        Self { state, store }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    fn persist(&self, config: &AppConfig) {
        if let Err(err) = self.store.save(config) {
            warn!(error = ?err, "Failed to save config");
        }
    }

    /// Store the (trimmed) active text as a rule. Returns true when added.
    pub fn save_rule(&mut self) -> bool {
        if !self.state.rules.save_active() {
            return false;
        }
        info!(rule = %self.state.rules.active(), "Rule saved");
        self.persist(&self.state.to_config());
        true
    }

    /// Delete the active rule. Returns true when something was removed.
    pub fn delete_rule(&mut self) -> bool {
        if !self.state.rules.delete_active() {
            return false;
        }
        info!(remaining = self.state.rules.len(), "Rule deleted");
        self.persist(&self.state.to_config());
        true
    }

    pub fn set_always_on_top(&mut self, on: bool) {
        self.state.always_on_top = on;
        self.persist(&self.state.to_config());
    }

    pub fn close_to_tray(&mut self) {
        let snapshot = self.state.hide_to_tray();
        self.persist(&snapshot);
    }
}
