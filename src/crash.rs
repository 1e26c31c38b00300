//! Crash reporting: unexpected panics are logged and shown in a dialog
//!
//! The GUI runs each frame under `catch_unwind`, so after the dialog is
//! dismissed the window keeps running.

use std::backtrace::Backtrace;
use std::panic::{self, PanicHookInfo};

use tracing::error;

const DIALOG_TITLE: &str = "Unexpected error";

pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::force_capture();
        let message = panic_message(info);
        error!(%message, %backtrace, "Unhandled panic");

        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(DIALOG_TITLE)
            .set_description(format!(
                "The program hit a serious error:\n{message}\n\n{backtrace}"
            ))
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }));
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    let payload = info
        .payload()
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| info.payload().downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());

    match info.location() {
        Some(loc) => format!("{payload} ({}:{})", loc.file(), loc.line()),
        None => payload,
    }
}
