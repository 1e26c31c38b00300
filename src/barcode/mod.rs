//! Barcode rendering
//!
//! `BarcodeRenderer` turns the active text and selected format into an image
//! through an [`Encoder`]. Symbol encoding itself lives behind that trait.

pub mod matrix;
pub mod symbol_encoder;

use std::fmt;

use image::GrayImage;
use thiserror::Error;

use crate::constants::canvas::{CODE128_HEIGHT, CODE128_WIDTH, MATRIX_SIZE};

pub use symbol_encoder::SymbolEncoder;

/// Formats offered by the selector, in selector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolFormat {
    Code128,
    QrCode,
    DataMatrix,
}

impl SymbolFormat {
    pub const ALL: [SymbolFormat; 3] = [Self::Code128, Self::QrCode, Self::DataMatrix];

    /// Map a persisted selector index. Unknown indices fall back to QR.
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => Self::Code128,
            2 => Self::DataMatrix,
            _ => Self::QrCode,
        }
    }

    pub fn index(self) -> i32 {
        match self {
            Self::Code128 => 0,
            Self::QrCode => 1,
            Self::DataMatrix => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Code128 => "Barcode (Code 128)",
            Self::QrCode => "QR Code",
            Self::DataMatrix => "Data Matrix",
        }
    }

    pub fn is_linear(self) -> bool {
        matches!(self, Self::Code128)
    }
}

impl fmt::Display for SymbolFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolShape {
    Any,
    ForceSquare,
}

/// Options handed to the encoder alongside the content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    /// No human-readable text under the symbol
    pub pure_barcode: bool,
    pub symbol_shape: SymbolShape,
}

impl EncodeOptions {
    pub fn for_format(format: SymbolFormat) -> Self {
        let (width, height) = match format {
            SymbolFormat::Code128 => (CODE128_WIDTH, CODE128_HEIGHT),
            SymbolFormat::QrCode | SymbolFormat::DataMatrix => (MATRIX_SIZE, MATRIX_SIZE),
        };
        let symbol_shape = match format {
            SymbolFormat::DataMatrix => SymbolShape::ForceSquare,
            _ => SymbolShape::Any,
        };
        Self {
            width,
            height,
            margin: 0,
            pure_barcode: true,
            symbol_shape,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{format} encoder rejected content: {reason}")]
    Rejected { format: SymbolFormat, reason: String },
    #[error("{0} encoder produced an empty symbol")]
    EmptyMatrix(SymbolFormat),
}

impl EncodeError {
    pub fn rejected(format: SymbolFormat, reason: impl Into<String>) -> Self {
        Self::Rejected {
            format,
            reason: reason.into(),
        }
    }
}

/// External symbol encoder boundary
pub trait Encoder {
    fn encode(
        &self,
        content: &str,
        format: SymbolFormat,
        options: &EncodeOptions,
    ) -> Result<GrayImage, EncodeError>;
}

/// Result of a successful render
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Empty text: nothing to show
    Blank,
    Image(GrayImage),
}

pub struct BarcodeRenderer<E> {
    encoder: E,
}

impl<E: Encoder> BarcodeRenderer<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }

    /// Render `text` in `format`. Empty text never reaches the encoder.
    ///
    /// On error the caller keeps whatever it displayed before.
    pub fn render(&self, text: &str, format: SymbolFormat) -> Result<Rendered, EncodeError> {
        if text.is_empty() {
            return Ok(Rendered::Blank);
        }
        let options = EncodeOptions::for_format(format);
        self.encoder
            .encode(text, format, &options)
            .map(Rendered::Image)
    }
}

impl Default for BarcodeRenderer<SymbolEncoder> {
    fn default() -> Self {
        Self::new(SymbolEncoder::new())
    }
}
