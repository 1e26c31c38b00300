//! Built-in encoder backed by `qrcode`, `barcoders` and `datamatrix`

use barcoders::sym::code128::Code128;
use datamatrix::{DataMatrix, SymbolList};
use image::GrayImage;
use qrcode::QrCode;
use tracing::debug;

use super::matrix::{BitMatrix, rasterize_2d, rasterize_linear};
use super::{EncodeError, EncodeOptions, Encoder, SymbolFormat, SymbolShape};

/// Code 128 start character selecting code set B (printable ASCII)
const CODE128_SET_B: char = '\u{0181}';

#[derive(Debug, Default, Clone, Copy)]
pub struct SymbolEncoder;

impl SymbolEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for SymbolEncoder {
    fn encode(
        &self,
        content: &str,
        format: SymbolFormat,
        options: &EncodeOptions,
    ) -> Result<GrayImage, EncodeError> {
        if !options.pure_barcode {
            debug!(%format, "Text overlay requested but not supported, rendering pure symbol");
        }

        let matrix = match format {
            SymbolFormat::Code128 => code128_modules(content)?,
            SymbolFormat::QrCode => qr_modules(content)?,
            SymbolFormat::DataMatrix => data_matrix_modules(content, options.symbol_shape)?,
        };

        if matrix.is_empty() {
            return Err(EncodeError::EmptyMatrix(format));
        }

        let image = if format.is_linear() {
            rasterize_linear(
                &matrix.with_side_margins(options.margin),
                options.width,
                options.height,
            )
        } else {
            rasterize_2d(
                &matrix.with_quiet_zone(options.margin),
                options.width,
                options.height,
            )
        };
        Ok(image)
    }
}

fn code128_modules(content: &str) -> Result<BitMatrix, EncodeError> {
    // barcoders reads À/Ɓ/Ć in the data as code set switches; set B is printable ASCII only
    if let Some(c) = content.chars().find(|c| !(' '..='~').contains(c)) {
        return Err(EncodeError::rejected(
            SymbolFormat::Code128,
            format!("character {c:?} is not printable ASCII"),
        ));
    }
    let barcode = Code128::new(format!("{CODE128_SET_B}{content}"))
        .map_err(|e| EncodeError::rejected(SymbolFormat::Code128, format!("{e:?}")))?;
    Ok(BitMatrix::from_row(barcode.encode().into_iter().map(|m| m == 1)))
}

fn qr_modules(content: &str) -> Result<BitMatrix, EncodeError> {
    let code = QrCode::new(content.as_bytes())
        .map_err(|e| EncodeError::rejected(SymbolFormat::QrCode, e.to_string()))?;

    let size = code.width() as u32;
    let mut matrix = BitMatrix::new(size, size);
    for (i, color) in code.to_colors().iter().enumerate() {
        if *color == qrcode::Color::Dark {
            let i = i as u32;
            matrix.set(i % size, i / size);
        }
    }
    Ok(matrix)
}

fn data_matrix_modules(content: &str, shape: SymbolShape) -> Result<BitMatrix, EncodeError> {
    let symbols = match shape {
        SymbolShape::Any => SymbolList::default(),
        SymbolShape::ForceSquare => SymbolList::default().enforce_square(),
    };
    let code = DataMatrix::encode(content.as_bytes(), symbols)
        .map_err(|e| EncodeError::rejected(SymbolFormat::DataMatrix, format!("{e:?}")))?;

    let bitmap = code.bitmap();
    let mut matrix = BitMatrix::new(bitmap.width() as u32, bitmap.height() as u32);
    for (x, y) in bitmap.pixels() {
        matrix.set(x as u32, y as u32);
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::matrix::{DARK, LIGHT};

    fn encode(content: &str, format: SymbolFormat) -> Result<GrayImage, EncodeError> {
        SymbolEncoder::new().encode(content, format, &EncodeOptions::for_format(format))
    }

    #[test]
    fn test_code128_canvas() {
        let img = encode("EXEM-5601350S000000000010", SymbolFormat::Code128).unwrap();
        assert_eq!(img.dimensions(), (1500, 400));
        // Every column is a full-height bar or a full-height space
        for x in (0..1500).step_by(7) {
            assert_eq!(img.get_pixel(x, 0), img.get_pixel(x, 399));
        }
    }

    #[test]
    fn test_code128_contains_dark_bars() {
        let img = encode("ABC-123", SymbolFormat::Code128).unwrap();
        assert!(img.pixels().any(|p| *p == DARK));
        assert!(img.pixels().any(|p| *p == LIGHT));
    }

    #[test]
    fn test_code128_rejects_code_set_switch_characters() {
        for content in ["AĆ12", "xÀy", "Ɓ", "é"] {
            assert!(
                matches!(
                    encode(content, SymbolFormat::Code128),
                    Err(EncodeError::Rejected {
                        format: SymbolFormat::Code128,
                        ..
                    })
                ),
                "accepted {content:?}"
            );
        }
    }

    #[test]
    fn test_code128_rejects_control_characters() {
        assert!(encode("tab\there", SymbolFormat::Code128).is_err());
    }

    #[test]
    fn test_qr_canvas() {
        let img = encode("https://example.com", SymbolFormat::QrCode).unwrap();
        assert_eq!(img.dimensions(), (500, 500));
    }

    #[test]
    fn test_qr_rejects_oversized_content() {
        let content = "x".repeat(8000);
        let err = encode(&content, SymbolFormat::QrCode).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::Rejected {
                format: SymbolFormat::QrCode,
                ..
            }
        ));
    }

    #[test]
    fn test_data_matrix_canvas_is_square() {
        let img = encode("EXEM-5601350S000000000010", SymbolFormat::DataMatrix).unwrap();
        assert_eq!(img.dimensions(), (500, 500));
    }

    #[test]
    fn test_data_matrix_modules_square_when_forced() {
        let m = data_matrix_modules("A long enough payload for a bigger symbol", SymbolShape::ForceSquare)
            .unwrap();
        assert_eq!(m.width(), m.height());
    }

    #[test]
    fn test_data_matrix_rejects_oversized_content() {
        let content = "y".repeat(5000);
        assert!(matches!(
            encode(&content, SymbolFormat::DataMatrix),
            Err(EncodeError::Rejected {
                format: SymbolFormat::DataMatrix,
                ..
            })
        ));
    }

    #[test]
    fn test_margin_shrinks_symbol_area() {
        let format = SymbolFormat::QrCode;
        let tight = SymbolEncoder::new()
            .encode("margin", format, &EncodeOptions::for_format(format))
            .unwrap();
        let padded = SymbolEncoder::new()
            .encode(
                "margin",
                format,
                &EncodeOptions {
                    margin: 4,
                    ..EncodeOptions::for_format(format)
                },
            )
            .unwrap();
        let dark = |img: &GrayImage| img.pixels().filter(|p| **p == DARK).count();
        assert!(dark(&padded) < dark(&tight));
    }
}
