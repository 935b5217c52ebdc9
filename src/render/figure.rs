use std::path::Path;

use crate::foundation::color::Color;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::{FrameRGBA, RenderableFrame, SaveStyle};

#[derive(Clone, Copy, Debug, PartialEq)]
struct FilledRect {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    rgba: [u8; 4],
}

/// Retained raster canvas rendered with `vello_cpu`.
///
/// Shapes are recorded in painter's order and rasterized when the figure is saved. At save time
/// the whole figure is first filled with the facecolor, then the plot area (if one was set) is
/// filled white unless the save is transparent.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    width: u16,
    height: u16,
    plot_area: Option<[f64; 4]>,
    rects: Vec<FilledRect>,
}

impl Figure {
    /// Create an empty figure of `width x height` pixels.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("figure width/height must be non-zero"));
        }
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(ReelError::validation(format!(
                "figure size {width}x{height} exceeds {}x{}",
                u16::MAX,
                u16::MAX
            )));
        };
        Ok(Self {
            width: w,
            height: h,
            plot_area: None,
            rects: Vec::new(),
        })
    }

    /// Fill the axis-aligned rectangle `[x0, x1) x [y0, y1)` (pixels, origin top-left).
    pub fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color) {
        self.rects.push(FilledRect {
            x0,
            y0,
            x1,
            y1,
            rgba: color.to_rgba8(),
        });
    }

    /// Mark `[x0, x1) x [y0, y1)` as the plot area.
    pub fn set_plot_area(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.plot_area = Some([x0, y0, x1, y1]);
    }

    /// Number of recorded shapes.
    pub fn shape_count(&self) -> usize {
        self.rects.len()
    }

    /// Rasterize into premultiplied RGBA8.
    pub fn rasterize(&self, style: &SaveStyle) -> FrameRGBA {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);

        if let Some([r, g, b, a]) = style.background_rgba8() {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        }
        if let (Some([x0, y0, x1, y1]), Some([r, g, b, a])) =
            (self.plot_area, style.plot_area_rgba8())
        {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x1, y1));
        }
        for rect in &self.rects {
            let [r, g, b, a] = rect.rgba;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                rect.x0, rect.y0, rect.x1, rect.y1,
            ));
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut pixmap);

        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

impl RenderableFrame for Figure {
    fn dimensions(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn save_png(&self, path: &Path, style: &SaveStyle) -> ReelResult<()> {
        self.rasterize(style).save_png(path, style)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/figure.rs"]
mod tests;
