//! Main window implemented with egui/eframe and tray-icon system tray support

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use tracing::{error, info, warn};

use super::components::{BarcodeView, RuleAction, rule_editor};
use super::constants::*;
use super::tray::{TrayCommand, TrayHandle, spawn_tray, window_icon};
use crate::barcode::{BarcodeRenderer, SymbolEncoder};
use crate::config::ConfigStore;
use crate::session::Session;
use crate::state::{WindowLifecycle, WindowSize};

const APP_TITLE: &str = "Barcode Generator";

struct StatusMessage {
    text: String,
    color: egui::Color32,
    shown_at: Instant,
}

struct BarcodeApp {
    session: Session,
    renderer: BarcodeRenderer<SymbolEncoder>,
    view: BarcodeView,
    tray: TrayHandle,
    status_message: Option<StatusMessage>,
    allow_close: bool,
}

impl BarcodeApp {
    fn new(cc: &CreationContext<'_>, mut session: Session, start_hidden: bool) -> Self {
        info!("Initializing barcode window");

        let tray = spawn_tray(&cc.egui_ctx);
        if start_hidden {
            session.state.set_hidden();
            hide_window(&cc.egui_ctx);
        }

        Self {
            session,
            renderer: BarcodeRenderer::default(),
            view: BarcodeView::new(),
            tray,
            status_message: None,
            allow_close: false,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, color: egui::Color32) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            color,
            shown_at: Instant::now(),
        });
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: RuleAction) {
        match action {
            RuleAction::None | RuleAction::TextChanged | RuleAction::FormatChanged => {}
            RuleAction::Next => {
                if let Err(err) = self.session.state.next() {
                    self.set_status(format!("Cannot increment: {err}"), STATUS_WARN);
                }
            }
            RuleAction::Save => {
                if self.session.save_rule() {
                    self.set_status("Rule saved", STATUS_OK);
                }
            }
            RuleAction::Delete => {
                if self.session.delete_rule() {
                    self.set_status("Rule deleted", STATUS_OK);
                }
            }
            RuleAction::TopmostChanged => {
                // The checkbox already flipped the flag; this persists it
                let on = self.session.state.always_on_top;
                self.session.set_always_on_top(on);
                ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(window_level(on)));
            }
        }
    }

    fn process_tray_events(&mut self, ctx: &egui::Context) {
        while let Some(command) = self.tray.try_recv() {
            match command {
                TrayCommand::Restore => {
                    self.session.state.restore();
                    show_window(ctx);
                }
                TrayCommand::Exit => {
                    // Exit does not save; close-to-tray already did
                    self.allow_close = true;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) || self.allow_close {
            return;
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        self.session.close_to_tray();
        hide_window(ctx);
    }

    fn track_window_size(&mut self, ctx: &egui::Context) {
        if self.session.state.lifecycle() != WindowLifecycle::Normal {
            return;
        }
        let (rect, minimized, maximized) = ctx.input(|i| {
            let viewport = i.viewport();
            (
                viewport.inner_rect,
                viewport.minimized.unwrap_or(false),
                viewport.maximized.unwrap_or(false),
            )
        });
        if let Some(rect) = rect {
            self.session.state.record_window_size(
                WindowSize {
                    width: rect.width() as f64,
                    height: rect.height() as f64,
                },
                minimized,
                maximized,
            );
        }
    }

    fn frame(&mut self, ctx: &egui::Context) {
        self.process_tray_events(ctx);
        self.track_window_size(ctx);
        self.handle_close_request(ctx);

        if self
            .status_message
            .as_ref()
            .is_some_and(|m| m.shown_at.elapsed() > Duration::from_millis(STATUS_TTL_MS))
        {
            self.status_message = None;
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(PADDING);
            let action = rule_editor::ui(ui, &mut self.session.state);
            self.handle_action(ctx, action);

            if let Some(message) = &self.status_message {
                ui.colored_label(message.color, &message.text);
            }
            ui.add_space(PADDING);
        });

        // Text/format changes (including Next) re-render in the same frame
        self.view.sync(
            ctx,
            &self.renderer,
            self.session.state.rules.active(),
            self.session.state.format,
        );

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(SECTION_SPACING);
            self.view.ui(ui);
        });
    }
}

impl eframe::App for BarcodeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // The panic hook has already reported the details
        if panic::catch_unwind(AssertUnwindSafe(|| self.frame(ctx))).is_err() {
            error!("Frame aborted by panic, continuing");
            self.set_status("An error occurred, see log for details", STATUS_ERROR);
        }

        ctx.request_repaint_after(Duration::from_millis(TRAY_POLL_INTERVAL_MS));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Barcode generator exiting");
    }
}

/// Hidden-to-tray is a minimized window rather than an unmapped one, so
/// eframe keeps running passes and tray commands are still applied.
fn hide_window(ctx: &egui::Context) {
    ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
}

pub(super) fn show_window(ctx: &egui::Context) {
    ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
    ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(false));
    ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
}

fn window_level(always_on_top: bool) -> egui::WindowLevel {
    if always_on_top {
        egui::WindowLevel::AlwaysOnTop
    } else {
        egui::WindowLevel::Normal
    }
}

pub fn run_gui(store: ConfigStore, start_hidden: bool) -> Result<()> {
    let session = Session::open(store);
    info!(path = %session.store().path().display(), "Session opened");
    let size = session.state.window_size();

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([size.width as f32, size.height as f32])
        .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
        .with_window_level(window_level(session.state.always_on_top))
        .with_title(APP_TITLE);
    match window_icon() {
        Ok(icon) => viewport = viewport.with_icon(icon),
        Err(err) => warn!(error = ?err, "Failed to load window icon"),
    }

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(BarcodeApp::new(cc, session, start_hidden)))),
    )
    .map_err(|err| anyhow!("Failed to launch barcode window: {err}"))
}
