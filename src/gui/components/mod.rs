//! Reusable pieces of the main window

pub mod barcode_view;
pub mod rule_editor;

pub use barcode_view::BarcodeView;
pub use rule_editor::RuleAction;
