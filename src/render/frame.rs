use std::path::Path;

use anyhow::Context as _;

use crate::foundation::color::Color;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{flatten_over_rgba8, unpremultiply_rgba8_in_place};

/// How a rendered frame is written to its raster file.
///
/// `facecolor` is the figure background and is painted whenever it is visible. `transparent`
/// only clears the plot area of a [`Figure`](crate::Figure), so a transparent save over a white
/// facecolor still comes out white around and behind the plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaveStyle {
    /// Leave the plot area unpainted.
    pub transparent: bool,
    /// Figure background; `none` keeps the frame's own alpha.
    pub facecolor: Color,
}

/// Plot area fill used when saving without transparency.
const PLOT_AREA_RGBA8: [u8; 4] = [255, 255, 255, 255];

impl SaveStyle {
    /// Opaque RGBA8 figure background to flatten over, or `None` when the facecolor is fully
    /// transparent and the frame keeps its alpha.
    pub fn background_rgba8(&self) -> Option<[u8; 4]> {
        let [r, g, b, a] = self.facecolor.to_rgba8();
        if a == 0 {
            return None;
        }
        Some([r, g, b, 255])
    }

    /// Fill for a figure's plot area, or `None` when saving transparently.
    pub fn plot_area_rgba8(&self) -> Option<[u8; 4]> {
        if self.transparent {
            None
        } else {
            Some(PLOT_AREA_RGBA8)
        }
    }
}

impl Default for SaveStyle {
    fn default() -> Self {
        Self {
            transparent: true,
            facecolor: Color::WHITE,
        }
    }
}

/// Output of a frame function: something that can be written out as a PNG.
///
/// Frames are moved into the frame store when persisted and dropped right after, so any
/// resources a frame holds are released once per keyframe.
pub trait RenderableFrame {
    /// Pixel dimensions of the raster this frame produces.
    fn dimensions(&self) -> (u32, u32);

    /// Check that this frame can be rasterized. The default rejects zero-sized frames.
    fn validate(&self) -> ReelResult<()> {
        let (w, h) = self.dimensions();
        if w == 0 || h == 0 {
            return Err(ReelError::contract(format!(
                "frame has zero-sized raster ({w}x{h})"
            )));
        }
        Ok(())
    }

    /// Write the frame as a PNG at `path`.
    fn save_png(&self, path: &Path, style: &SaveStyle) -> ReelResult<()>;
}

impl<F: RenderableFrame + ?Sized> RenderableFrame for Box<F> {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn validate(&self) -> ReelResult<()> {
        (**self).validate()
    }

    fn save_png(&self, path: &Path, style: &SaveStyle) -> ReelResult<()> {
        (**self).save_png(path, style)
    }
}

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha frame filled with one color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let n = (width as usize) * (height as usize);
        Self {
            width,
            height,
            data: rgba.repeat(n),
            premultiplied: false,
        }
    }

    /// Straight-alpha RGBA8 pixels as they will be written for `style`.
    pub fn to_straight_rgba8(&self, style: &SaveStyle) -> Vec<u8> {
        match style.background_rgba8() {
            Some(bg) => {
                let mut out = vec![0u8; self.data.len()];
                flatten_over_rgba8(&mut out, &self.data, self.premultiplied, bg);
                out
            }
            None => {
                let mut out = self.data.clone();
                if self.premultiplied {
                    unpremultiply_rgba8_in_place(&mut out);
                }
                out
            }
        }
    }
}

impl RenderableFrame for FrameRGBA {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn validate(&self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::contract(format!(
                "frame has zero-sized raster ({}x{})",
                self.width, self.height
            )));
        }
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if self.data.len() != expected {
            return Err(ReelError::contract(format!(
                "frame data has {} bytes, expected {expected} for {}x{} rgba8",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    fn save_png(&self, path: &Path, style: &SaveStyle) -> ReelResult<()> {
        let rgba = self.to_straight_rgba8(style);
        image::save_buffer_with_format(
            path,
            &rgba,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
