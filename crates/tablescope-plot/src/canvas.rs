//! Off-screen drawing surface and PNG encoding.

use std::io::Cursor;
use std::ops::Range;
use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::register_font;

use crate::error::{PlotError, Result, render_error};
use crate::types::EncodedImage;

/// Drawing area backed by an in-memory RGB buffer.
pub(crate) type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub(crate) const FONT: &str = "sans-serif";
pub(crate) const BAR_COLOR: RGBColor = RGBColor(76, 114, 176);
pub(crate) const ACCENT_COLOR: RGBColor = RGBColor(196, 78, 82);

static FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
static FONT_REGISTERED: OnceLock<bool> = OnceLock::new();

/// Registers the bundled font under [`FONT`] on first use.
fn ensure_font() -> Result<()> {
    let registered = *FONT_REGISTERED
        .get_or_init(|| register_font(FONT, FontStyle::Normal, FONT_DATA).is_ok());
    if registered {
        Ok(())
    } else {
        Err(PlotError::Render {
            message: "bundled font could not be loaded".to_string(),
        })
    }
}

/// Draws into a `width` x `height` white canvas and returns the PNG bytes.
pub(crate) fn render_png<F>(width: u32, height: u32, draw: F) -> Result<Vec<u8>>
where
    F: FnOnce(&Area<'_>) -> Result<()>,
{
    ensure_font()?;
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;
        draw(&root)?;
        root.present().map_err(render_error)?;
    }
    encode_png(pixels, width, height)
}

/// Renders and base64-encodes in one step.
pub(crate) fn render_encoded<F>(width: u32, height: u32, draw: F) -> Result<EncodedImage>
where
    F: FnOnce(&Area<'_>) -> Result<()>,
{
    let png = render_png(width, height, draw)?;
    Ok(EncodedImage::new(STANDARD.encode(png)))
}

fn encode_png(pixels: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let image = RgbImage::from_raw(width, height, pixels).ok_or_else(|| PlotError::Encode {
        message: "pixel buffer does not match image size".to_string(),
    })?;
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| PlotError::Encode {
            message: e.to_string(),
        })?;
    Ok(bytes.into_inner())
}

/// Axis range covering `[lo, hi]` with 5% padding; degenerate ranges are
/// widened by one unit on each side.
pub(crate) fn padded_range(lo: f64, hi: f64) -> Range<f64> {
    if !(lo.is_finite() && hi.is_finite()) {
        return 0.0..1.0;
    }
    if hi <= lo {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}
