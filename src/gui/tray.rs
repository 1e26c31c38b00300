//! System tray icon: double click restores the window, "Exit" quits

use std::io::Cursor;
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{Context, Result, anyhow};
use eframe::egui;
use tracing::{error, info};
use tray_icon::{
    Icon, MouseButton, TrayIcon, TrayIconBuilder, TrayIconEvent,
    menu::{Menu, MenuEvent, MenuId, MenuItem},
};

use crate::constants::tray::{EXIT_LABEL, TOOLTIP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    Restore,
    Exit,
}

/// Receives tray commands; owns the icon where the platform allows it
pub struct TrayHandle {
    commands: Receiver<TrayCommand>,
    #[cfg(not(target_os = "linux"))]
    _icon: Option<TrayIcon>,
}

impl TrayHandle {
    pub fn try_recv(&self) -> Option<TrayCommand> {
        self.commands.try_recv().ok()
    }
}

/// Create the tray icon and route its events to the returned handle.
///
/// Restore is applied straight to the viewport as well as queued, so it
/// does not wait for the app to drain the handle.
pub fn spawn_tray(ctx: &egui::Context) -> TrayHandle {
    let (tx, rx) = mpsc::channel();

    #[cfg(target_os = "linux")]
    spawn_gtk_tray(ctx, tx);

    #[cfg(not(target_os = "linux"))]
    let icon = create_in_place(ctx, tx);

    TrayHandle {
        commands: rx,
        #[cfg(not(target_os = "linux"))]
        _icon: icon,
    }
}

/// On Linux tray-icon needs its own GTK event loop (egui uses winit)
#[cfg(target_os = "linux")]
fn spawn_gtk_tray(ctx: &egui::Context, tx: Sender<TrayCommand>) {
    let (id_tx, id_rx) = mpsc::channel();
    std::thread::spawn(move || {
        if let Err(err) = gtk::init() {
            error!(error = ?err, "Failed to initialize GTK for tray icon");
            return;
        }

        match create_tray_icon() {
            Ok((tray_icon, exit_id)) => {
                info!("Tray icon initialized in GTK thread");
                let _ = id_tx.send(exit_id);
                // The icon must outlive this scope and stay on the GTK thread
                Box::leak(Box::new(tray_icon));
                gtk::main();
            }
            Err(err) => {
                error!(error = ?err, "Failed to create tray icon in GTK thread");
            }
        }
    });

    match id_rx.recv_timeout(std::time::Duration::from_millis(500)) {
        Ok(exit_id) => install_event_handlers(ctx.clone(), tx, exit_id),
        Err(_) => error!("Tray icon did not come up, window close will still hide to tray"),
    }
}

#[cfg(not(target_os = "linux"))]
fn create_in_place(ctx: &egui::Context, tx: Sender<TrayCommand>) -> Option<TrayIcon> {
    match create_tray_icon() {
        Ok((tray_icon, exit_id)) => {
            install_event_handlers(ctx.clone(), tx, exit_id);
            Some(tray_icon)
        }
        Err(err) => {
            error!(error = ?err, "Failed to create tray icon");
            None
        }
    }
}

fn install_event_handlers(ctx: egui::Context, tx: Sender<TrayCommand>, exit_id: MenuId) {
    let menu_ctx = ctx.clone();
    let menu_tx = tx.clone();
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        if event.id == exit_id {
            info!("Exit requested from tray menu");
            let _ = menu_tx.send(TrayCommand::Exit);
            menu_ctx.request_repaint();
        }
    }));

    TrayIconEvent::set_event_handler(Some(move |event: TrayIconEvent| {
        if let TrayIconEvent::DoubleClick {
            button: MouseButton::Left,
            ..
        } = event
        {
            let _ = tx.send(TrayCommand::Restore);
            super::app::show_window(&ctx);
            ctx.request_repaint();
        }
    }));
}

fn create_tray_icon() -> Result<(TrayIcon, MenuId)> {
    let icon = load_tray_icon()?;

    let menu = Menu::new();
    let exit_item = MenuItem::new(EXIT_LABEL, true, None);
    let exit_id = exit_item.id().clone();

    menu.append(&exit_item)
        .context("Failed to append exit menu item")?;

    let tray_icon = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_tooltip(TOOLTIP)
        .with_icon(icon)
        .build()
        .context("Failed to build tray icon")?;

    info!("Tray icon created");

    Ok((tray_icon, exit_id))
}

fn load_tray_icon() -> Result<Icon> {
    let (rgba, width, height) = decode_rgba(include_bytes!("../../assets/tray-icon.png"))?;
    Icon::from_rgba(rgba, width, height).context("Failed to create icon from RGBA data")
}

/// Same artwork as the tray, for the window title bar and taskbar
pub fn window_icon() -> Result<egui::IconData> {
    let (rgba, width, height) = decode_rgba(include_bytes!("../../assets/tray-icon.png"))?;
    Ok(egui::IconData {
        rgba,
        width,
        height,
    })
}

/// Decode a PNG into RGBA8, widening RGB input
fn decode_rgba(bytes: &[u8]) -> Result<(Vec<u8>, u32, u32)> {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder.read_info()?;
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != png::BitDepth::Eight {
        return Err(anyhow!("Unsupported tray icon bit depth {:?}", bit_depth));
    }
    let (width, height) = reader.info().size();
    let mut buf = vec![0; width as usize * height as usize * color_type.samples()];
    let info = reader.next_frame(&mut buf)?;
    let pixels = &buf[..info.buffer_size()];

    let rgba = match info.color_type {
        png::ColorType::Rgba => pixels.to_vec(),
        png::ColorType::Rgb => {
            let mut rgba = Vec::with_capacity(pixels.len() / 3 * 4);
            for chunk in pixels.chunks_exact(3) {
                rgba.extend_from_slice(chunk);
                rgba.push(0xFF);
            }
            rgba
        }
        other => {
            return Err(anyhow!(
                "Unsupported tray icon color type {:?} (expected RGB or RGBA)",
                other
            ));
        }
    };

    Ok((rgba, info.width, info.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_icon_decodes_to_rgba() {
        let (rgba, width, height) = decode_rgba(include_bytes!("../../assets/tray-icon.png")).unwrap();
        assert_eq!((width, height), (32, 32));
        assert_eq!(rgba.len(), 32 * 32 * 4);
    }

    #[test]
    fn test_window_icon_matches_bundled_png() {
        let icon = window_icon().unwrap();
        assert_eq!((icon.width, icon.height), (32, 32));
        assert_eq!(icon.rgba.len(), 32 * 32 * 4);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_rgba(b"definitely not a png").is_err());
    }
}
