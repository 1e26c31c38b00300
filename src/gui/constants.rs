//! GUI-specific constants for layout, status colors and intervals

use egui;

/// Window limits
pub const WINDOW_MIN_WIDTH: f32 = 360.0;
pub const WINDOW_MIN_HEIGHT: f32 = 300.0;

/// Layout spacing
pub const PADDING: f32 = 8.0;
pub const SECTION_SPACING: f32 = 10.0;
pub const ITEM_SPACING: f32 = 6.0;
pub const RULE_FIELD_WIDTH: f32 = 260.0;

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 160, 0);
pub const STATUS_WARN: egui::Color32 = egui::Color32::from_rgb(200, 120, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);

/// How long a status line stays visible
pub const STATUS_TTL_MS: u64 = 4000;

/// Tray event polling while the window is idle
pub const TRAY_POLL_INTERVAL_MS: u64 = 250;
