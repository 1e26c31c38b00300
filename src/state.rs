//! Runtime application state owned by the window
//!
//! Holds the rule store, selected format and window settings, and converts
//! to and from the persisted `AppConfig`.

use tracing::{info, warn};

use crate::barcode::SymbolFormat;
use crate::config::AppConfig;
use crate::constants::rules::SEED_RULE;
use crate::increment::{IncrementError, increment};
use crate::rules::RuleStore;

/// Window visibility: shown, or hidden to the tray
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLifecycle {
    Normal,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub rules: RuleStore,
    pub format: SymbolFormat,
    pub always_on_top: bool,
    /// Last restored (non-minimized, non-maximized) size
    window_size: WindowSize,
    lifecycle: WindowLifecycle,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Self {
        let (width, height) = config.initial_window_size();
        let active = if config.last_used_rule.is_empty() {
            SEED_RULE.to_string()
        } else {
            config.last_used_rule
        };

        Self {
            rules: RuleStore::from_rules(config.saved_rules, active),
            format: SymbolFormat::from_index(config.last_type_index),
            always_on_top: config.is_topmost,
            window_size: WindowSize { width, height },
            lifecycle: WindowLifecycle::Normal,
        }
    }

    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            saved_rules: self.rules.rules().to_vec(),
            last_used_rule: self.rules.active().to_string(),
            last_type_index: self.format.index(),
            is_topmost: self.always_on_top,
            window_width: self.window_size.width,
            window_height: self.window_size.height,
        }
    }

    pub fn window_size(&self) -> WindowSize {
        self.window_size
    }

    pub fn lifecycle(&self) -> WindowLifecycle {
        self.lifecycle
    }

    /// Track the window size, ignoring minimized and maximized states
    pub fn record_window_size(&mut self, size: WindowSize, minimized: bool, maximized: bool) {
        if minimized || maximized {
            return;
        }
        if !(size.width > 0.0 && size.height > 0.0) {
            return;
        }
        self.window_size = size;
    }

    /// Increment the active text's trailing number.
    ///
    /// On overflow the text stays as it is.
    pub fn next(&mut self) -> Result<(), IncrementError> {
        match increment(self.rules.active()) {
            Ok(next) => {
                self.rules.set_active(next);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Increment skipped");
                Err(err)
            }
        }
    }

    /// Close request: snapshot for saving, then hide to the tray
    pub fn hide_to_tray(&mut self) -> AppConfig {
        self.set_hidden();
        self.to_config()
    }

    /// Mark the window hidden without producing a snapshot
    pub fn set_hidden(&mut self) {
        self.lifecycle = WindowLifecycle::Hidden;
        info!("Hiding window to tray");
    }

    pub fn restore(&mut self) {
        self.lifecycle = WindowLifecycle::Normal;
        info!("Restoring window from tray");
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> AppConfig {
        AppConfig {
            saved_rules: vec!["A-01".to_string(), "B-02".to_string()],
            last_used_rule: "B-02".to_string(),
            last_type_index: 2,
            is_topmost: false,
            window_width: 640.0,
            window_height: 480.0,
        }
    }

    #[test]
    fn test_from_config_restores_everything() {
        let state = AppState::from_config(sample_config());
        assert_eq!(state.rules.rules(), ["A-01", "B-02"]);
        assert_eq!(state.rules.active(), "B-02");
        assert_eq!(state.format, SymbolFormat::DataMatrix);
        assert!(!state.always_on_top);
        assert_eq!(
            state.window_size(),
            WindowSize {
                width: 640.0,
                height: 480.0
            }
        );
        assert_eq!(state.lifecycle(), WindowLifecycle::Normal);
    }

    #[test]
    fn test_config_round_trip_through_state() {
        let config = sample_config();
        assert_eq!(AppState::from_config(config.clone()).to_config(), config);
    }

    #[test]
    fn test_empty_last_rule_uses_seed() {
        let state = AppState::default();
        assert_eq!(state.rules.active(), SEED_RULE);
        assert_eq!(state.format, SymbolFormat::Code128);
        assert!(state.always_on_top);
    }

    #[test]
    fn test_duplicate_saved_rules_collapsed() {
        let state = AppState::from_config(AppConfig {
            saved_rules: vec!["x".to_string(), "x".to_string(), "y".to_string()],
            ..AppConfig::default()
        });
        assert_eq!(state.rules.rules(), ["x", "y"]);
    }

    #[test]
    fn test_record_window_size_ignores_minimized_and_maximized() {
        let mut state = AppState::default();
        let small = WindowSize {
            width: 160.0,
            height: 28.0,
        };
        state.record_window_size(small, true, false);
        state.record_window_size(
            WindowSize {
                width: 1920.0,
                height: 1080.0,
            },
            false,
            true,
        );
        assert_eq!(state.to_config().window_width, 500.0);
        assert_eq!(state.to_config().window_height, 400.0);

        state.record_window_size(
            WindowSize {
                width: 700.0,
                height: 520.0,
            },
            false,
            false,
        );
        assert_eq!(state.to_config().window_width, 700.0);
        assert_eq!(state.to_config().window_height, 520.0);
    }

    #[test]
    fn test_next_increments_active_text() {
        let mut state = AppState::default();
        state.next().unwrap();
        assert_eq!(state.rules.active(), "EXEM-5601350S000000000011");
    }

    #[test]
    fn test_next_overflow_leaves_text() {
        let mut state = AppState::default();
        let text = format!("Z{}", u64::MAX);
        state.rules.set_active(text.clone());
        assert!(state.next().is_err());
        assert_eq!(state.rules.active(), text);
    }

    #[test]
    fn test_hide_and_restore() {
        let mut state = AppState::from_config(sample_config());
        let snapshot = state.hide_to_tray();
        assert_eq!(snapshot, sample_config());
        assert_eq!(state.lifecycle(), WindowLifecycle::Hidden);

        state.restore();
        assert_eq!(state.lifecycle(), WindowLifecycle::Normal);
    }

    #[test]
    fn test_set_hidden_keeps_settings() {
        let mut state = AppState::from_config(sample_config());
        state.set_hidden();
        assert_eq!(state.lifecycle(), WindowLifecycle::Hidden);
        assert_eq!(state.to_config(), sample_config());
    }
}
