//! Barcode window and tray icon

mod app;
mod components;
mod constants;
mod tray;

pub use app::run_gui;
