//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Config file location
pub mod config {
    /// Directory under the per-user local data dir
    pub const APP_DIR: &str = "BarcodeGenerator";

    /// JSON file holding rules and window settings
    pub const FILENAME: &str = "config.json";
}

/// Rule defaults
pub mod rules {
    /// Seed text shown when nothing was restored
    pub const SEED_RULE: &str = "EXEM-5601350S000000000010";
}

/// Window geometry defaults and restore guards
pub mod window {
    pub const DEFAULT_WIDTH: f64 = 500.0;
    pub const DEFAULT_HEIGHT: f64 = 400.0;

    /// Stored sizes at or below this are ignored on restore
    pub const MIN_RESTORED_DIMENSION: f64 = 100.0;
}

/// Encoder canvas sizes (pixels)
pub mod canvas {
    /// Code 128 is wide so long dense strings stay legible
    pub const CODE128_WIDTH: u32 = 1500;
    pub const CODE128_HEIGHT: u32 = 400;

    pub const MATRIX_SIZE: u32 = 500;
}

/// Tray icon strings
pub mod tray {
    pub const TOOLTIP: &str = "Barcode Generator";
    pub const EXIT_LABEL: &str = "Exit";
}
