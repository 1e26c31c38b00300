//! Persisted application settings
//!
//! JSON document with camelCase keys. PascalCase keys written by older
//! builds are accepted as aliases. Every field defaults independently so
//! partial documents load fine.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::window::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_RESTORED_DIMENSION};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    #[serde(alias = "SavedRules", deserialize_with = "null_as_default")]
    pub saved_rules: Vec<String>,
    #[serde(alias = "LastUsedRule", deserialize_with = "null_as_default")]
    pub last_used_rule: String,
    /// Index into the format selector (Code128, QR, DataMatrix)
    #[serde(alias = "LastTypeIndex")]
    pub last_type_index: i32,
    #[serde(alias = "IsTopmost")]
    pub is_topmost: bool,
    /// Restored (non-minimized, non-maximized) width
    #[serde(alias = "WindowWidth")]
    pub window_width: f64,
    #[serde(alias = "WindowHeight")]
    pub window_height: f64,
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            saved_rules: Vec::new(),
            last_used_rule: String::new(),
            last_type_index: 0,
            is_topmost: true,
            window_width: DEFAULT_WIDTH,
            window_height: DEFAULT_HEIGHT,
        }
    }
}

impl AppConfig {
    /// Window size to open with. Implausible stored values fall back to
    /// the defaults per axis; the stored config is left untouched.
    pub fn initial_window_size(&self) -> (f64, f64) {
        (
            restorable_or(self.window_width, DEFAULT_WIDTH),
            restorable_or(self.window_height, DEFAULT_HEIGHT),
        )
    }
}

fn restorable_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > MIN_RESTORED_DIMENSION {
        value
    } else {
        fallback
    }
}
