//! Displays the rendered barcode and keeps it in sync with the input

use eframe::egui;
use image::GrayImage;
use tracing::debug;

use crate::barcode::{BarcodeRenderer, Encoder, Rendered, SymbolFormat};

/// Texture of the current barcode plus what it was rendered from
#[derive(Default)]
pub struct BarcodeView {
    texture: Option<egui::TextureHandle>,
    rendered_from: Option<(String, SymbolFormat)>,
}

impl BarcodeView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-render when `text` or `format` changed since the last attempt.
    ///
    /// An encoder failure keeps the previous image on screen.
    pub fn sync<E: Encoder>(
        &mut self,
        ctx: &egui::Context,
        renderer: &BarcodeRenderer<E>,
        text: &str,
        format: SymbolFormat,
    ) {
        let key = (text.to_string(), format);
        if self.rendered_from.as_ref() == Some(&key) {
            return;
        }
        self.rendered_from = Some(key);

        match renderer.render(text, format) {
            Ok(Rendered::Blank) => self.texture = None,
            Ok(Rendered::Image(image)) => {
                self.texture = Some(ctx.load_texture(
                    "barcode",
                    to_color_image(&image),
                    egui::TextureOptions::NEAREST,
                ));
            }
            Err(err) => {
                debug!(error = %err, "Render failed, keeping previous image");
            }
        }
    }

    #[cfg(test)]
    pub fn has_image(&self) -> bool {
        self.texture.is_some()
    }

    pub fn ui(&self, ui: &mut egui::Ui) {
        match &self.texture {
            Some(texture) => {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::new(texture).shrink_to_fit());
                });
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("Nothing to encode").weak());
                });
            }
        }
    }
}

fn to_color_image(image: &GrayImage) -> egui::ColorImage {
    let (width, height) = image.dimensions();
    egui::ColorImage::from_gray([width as usize, height as usize], image.as_raw())
}
