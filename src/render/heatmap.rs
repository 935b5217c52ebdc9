use serde::{Deserialize, Serialize};

use crate::dataset::array::LabeledArray;
use crate::foundation::color::Color;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::adapter::FrameFunc;
use crate::render::figure::Figure;

/// Color map from normalized values in `[0, 1]` to colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colormap {
    /// Black to white.
    Gray,
    /// Perceptually uniform purple-green-yellow ramp.
    #[default]
    Viridis,
}

const VIRIDIS: [[f64; 3]; 5] = [
    [0.267, 0.005, 0.329],
    [0.230, 0.322, 0.546],
    [0.128, 0.567, 0.551],
    [0.369, 0.789, 0.383],
    [0.993, 0.906, 0.144],
];

impl Colormap {
    /// Color at normalized position `t` (clamped to `[0, 1]`).
    pub fn sample(self, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Self::Gray => Color::rgba(t, t, t, 1.0),
            Self::Viridis => {
                let pos = t * (VIRIDIS.len() - 1) as f64;
                let i = (pos.floor() as usize).min(VIRIDIS.len() - 2);
                let f = pos - i as f64;
                let [a, b] = [VIRIDIS[i], VIRIDIS[i + 1]];
                Color::rgba(
                    a[0] + (b[0] - a[0]) * f,
                    a[1] + (b[1] - a[1]) * f,
                    a[2] + (b[2] - a[2]) * f,
                    1.0,
                )
            }
        }
    }
}

/// Default frame function: draws a 0-, 1- or 2-D slice as a grid of colored cells.
///
/// Rows follow the first remaining dimension and columns the second. The grid is the figure's
/// plot area; non-finite values are left unpainted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heatmap {
    /// Edge length of one cell in pixels.
    pub cell_px: u32,
    /// Blank border around the grid in pixels.
    pub margin_px: u32,
    /// Color map.
    pub colormap: Colormap,
    /// Value mapped to the bottom of the color map; per-frame minimum when unset.
    pub vmin: Option<f64>,
    /// Value mapped to the top of the color map; per-frame maximum when unset.
    pub vmax: Option<f64>,
}

impl Default for Heatmap {
    fn default() -> Self {
        Self {
            cell_px: 8,
            margin_px: 0,
            colormap: Colormap::default(),
            vmin: None,
            vmax: None,
        }
    }
}

impl Heatmap {
    /// Draw `slice` into a new [`Figure`].
    pub fn render(&self, slice: &LabeledArray) -> ReelResult<Figure> {
        if self.cell_px == 0 {
            return Err(ReelError::validation("heatmap cell_px must be >= 1"));
        }
        let (rows, cols) = match *slice.shape() {
            [] => (1, 1),
            [n] => (1, n),
            [r, c] => (r, c),
            ref shape => {
                return Err(ReelError::validation(format!(
                    "heatmap needs a slice with at most 2 dims, got shape {shape:?}"
                )));
            }
        };
        if rows == 0 || cols == 0 {
            return Err(ReelError::validation("heatmap slice is empty"));
        }

        let cell = f64::from(self.cell_px);
        let margin = f64::from(self.margin_px);
        let width = (cols as u64) * u64::from(self.cell_px) + 2 * u64::from(self.margin_px);
        let height = (rows as u64) * u64::from(self.cell_px) + 2 * u64::from(self.margin_px);
        let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(ReelError::validation("heatmap is too large"));
        };
        let mut fig = Figure::new(width, height)?;
        fig.set_plot_area(
            margin,
            margin,
            margin + (cols as f64) * cell,
            margin + (rows as f64) * cell,
        );

        let (lo, hi) = self.value_range(slice);
        let span = hi - lo;
        for (flat, &v) in slice.values().iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            let t = if span > 0.0 { (v - lo) / span } else { 0.5 };
            let (r, c) = (flat / cols, flat % cols);
            let x0 = margin + (c as f64) * cell;
            let y0 = margin + (r as f64) * cell;
            fig.fill_rect(x0, y0, x0 + cell, y0 + cell, self.colormap.sample(t));
        }
        Ok(fig)
    }

    /// Wrap this heatmap as a single-dataset frame function.
    pub fn into_frame_func<'a>(self) -> FrameFunc<'a, LabeledArray, Figure> {
        FrameFunc::single(move |slice: &LabeledArray| Ok(self.render(slice)?))
    }

    fn value_range(&self, slice: &LabeledArray) -> (f64, f64) {
        let (lo, hi) = slice.finite_range().unwrap_or((0.0, 1.0));
        (self.vmin.unwrap_or(lo), self.vmax.unwrap_or(hi))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/heatmap.rs"]
mod tests;
