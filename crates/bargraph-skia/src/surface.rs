// File: crates/bargraph-skia/src/surface.rs
// Summary: Bar graph draw surface on a Skia CPU raster; PNG and RGBA8 readback.

use anyhow::{anyhow, Result};
use bargraph_core::{CanvasDims, DrawSurface, PlottedPoint, Projection};
use skia_safe as skia;
use tracing::debug;

use crate::text::{format_compact, TextRole, TextShaper, TextWeight};
use crate::theme::{Gradient, Theme};

pub struct SkiaOptions {
    pub theme: Theme,
    pub gradient: Gradient,
    /// Bar width as a fraction of the horizontal step between points.
    pub bar_ratio: f32,
    pub max_bar_width: f32,
    pub corner_radius: f32,
    pub draw_labels: bool,
}

impl Default for SkiaOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            gradient: Gradient::default(),
            bar_ratio: 0.5,
            max_bar_width: 24.0,
            corner_radius: 4.0,
            draw_labels: true,
        }
    }
}

/// [`DrawSurface`] that rasterises bars into an offscreen Skia surface.
///
/// The projection's `y` grows upwards from `padding`; the surface flips it so
/// the minimum value sits on a baseline `padding` pixels above the bottom edge.
pub struct SkiaSurface {
    opts: SkiaOptions,
    text: Option<TextShaper>,
    raster: Option<skia::Surface>,
    dims: Option<CanvasDims>,
    frame: Option<skia::Image>,
    frames_drawn: usize,
}

impl SkiaSurface {
    pub fn new(opts: SkiaOptions) -> Self {
        let text = opts.draw_labels.then(TextShaper::new);
        Self { opts, text, raster: None, dims: None, frame: None, frames_drawn: 0 }
    }

    pub fn options(&self) -> &SkiaOptions {
        &self.opts
    }

    pub fn dims(&self) -> Option<&CanvasDims> {
        self.dims.as_ref()
    }

    pub fn frames_drawn(&self) -> usize {
        self.frames_drawn
    }

    /// Encode the last rendered frame as PNG.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let image = self.frame.as_ref().ok_or_else(|| anyhow!("no frame rendered yet"))?;
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Write the last rendered frame to `path`, creating parent directories.
    pub fn write_png(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.to_png_bytes()?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Read the last rendered frame back as unpremultiplied RGBA8.
    /// Returns `(pixels, width, height, row_bytes)`.
    pub fn to_rgba8(&self) -> Result<(Vec<u8>, u32, u32, usize)> {
        let image = self.frame.as_ref().ok_or_else(|| anyhow!("no frame rendered yet"))?;
        let (w, h) = (image.width(), image.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !image.read_pixels(&info, pixels.as_mut_slice(), row_bytes, (0, 0), skia::image::CachingHint::Allow) {
            return Err(anyhow!("pixel readback failed"));
        }
        Ok((pixels, w as u32, h as u32, row_bytes))
    }

    fn allocate(&mut self, dims: &CanvasDims) -> Result<()> {
        let w = dims.width.round().max(1.0) as i32;
        let h = dims.height.round().max(1.0) as i32;
        let raster = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))?;
        self.raster = Some(raster);
        self.dims = Some(dims.clone());
        self.frame = None;
        Ok(())
    }
}

impl DrawSurface for SkiaSurface {
    fn init(&mut self, dims: &CanvasDims) -> Result<()> {
        self.allocate(dims)
    }

    fn resize(&mut self, dims: &CanvasDims) -> Result<()> {
        self.allocate(dims)
    }

    fn render(&mut self, projection: &Projection) -> Result<()> {
        let dims = self.dims.as_ref().ok_or_else(|| anyhow!("render before init"))?;
        let raster = self.raster.as_mut().ok_or_else(|| anyhow!("render before init"))?;
        let canvas = raster.canvas();
        let theme = &self.opts.theme;

        canvas.clear(theme.background);

        let h = dims.height as f32;
        let baseline = h - dims.padding as f32;
        let top = h - (dims.height - dims.padding * 2.0) as f32;
        draw_guides(canvas, theme, dims, baseline, top);

        let bar_w = bar_width(&projection.points, &self.opts);
        draw_bars(canvas, &self.opts, &projection.points, h, baseline, bar_w);

        if let Some(text) = &self.text {
            draw_legends(canvas, text, theme, dims, projection, baseline, top);
        }

        self.frame = Some(raster.image_snapshot());
        self.frames_drawn += 1;
        debug!(render_id = %dims.render_id, bars = projection.points.len(), "skia frame rendered");
        Ok(())
    }
}

// ---- helpers ----------------------------------------------------------------

fn bar_width(points: &[PlottedPoint], opts: &SkiaOptions) -> f32 {
    let step = match points {
        [a, b, ..] => (b.x - a.x) as f32,
        _ => opts.max_bar_width,
    };
    (step * opts.bar_ratio).clamp(1.0, opts.max_bar_width)
}

fn draw_guides(canvas: &skia::Canvas, theme: &Theme, dims: &CanvasDims, baseline: f32, top: f32) {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    let left = dims.padding as f32;
    let right = (dims.width - dims.padding) as f32;
    paint.set_color(theme.guide);
    canvas.draw_line((left, top), (right, top), &paint);
    paint.set_color(theme.baseline);
    canvas.draw_line((left, baseline), (right, baseline), &paint);
}

fn draw_bars(canvas: &skia::Canvas, opts: &SkiaOptions, points: &[PlottedPoint], h: f32, baseline: f32, bar_w: f32) {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);

    let half = bar_w * 0.5;
    for p in points {
        let x = p.x as f32;
        let y = h - p.y as f32;
        let (top, bottom) = if y <= baseline { (y, baseline) } else { (baseline, y) };
        let bottom = bottom.max(top + 1.0);

        let colors = [opts.gradient.top, opts.gradient.bottom];
        let shader = skia::Shader::linear_gradient(
            ((x, top), (x, bottom)),
            colors.as_slice(),
            None,
            skia::TileMode::Clamp,
            None,
            None,
        );
        paint.set_shader(shader);

        let rect = skia::Rect::from_ltrb(x - half, top, x + half, bottom);
        let r = opts.corner_radius.min(half);
        canvas.draw_round_rect(rect, r, r, &paint);
    }
}

fn draw_legends(
    canvas: &skia::Canvas,
    text: &TextShaper,
    theme: &Theme,
    dims: &CanvasDims,
    projection: &Projection,
    baseline: f32,
    top: f32,
) {
    let legend_top = baseline + dims.offset as f32;

    // Thin out x legends so neighbouring labels never overlap.
    let step = match projection.points.as_slice() {
        [a, b, ..] => (b.x - a.x) as f32,
        _ => f32::MAX,
    };
    let widest = projection
        .points
        .iter()
        .map(|p| text.measure_width(&format_compact(p.x_legend, ""), TextRole::Legend))
        .fold(0.0f32, f32::max);
    let stride = ((widest + 4.0) / step).ceil().max(1.0) as usize;

    for p in projection.points.iter().step_by(stride) {
        let label = format_compact(p.x_legend, "");
        text.draw_centered(canvas, &label, p.x as f32, legend_top, TextRole::Legend, TextWeight::Light, theme.legend);
    }

    let max_label = format_compact(projection.max_y, &dims.y_unit);
    let size = TextRole::Legend.size();
    text.draw_left(canvas, &max_label, dims.offset as f32, top - size - 2.0, TextRole::Legend, TextWeight::Highlight, theme.legend);
    let min_label = format_compact(projection.min_y, &dims.y_unit);
    text.draw_left(canvas, &min_label, dims.offset as f32, baseline - size - 2.0, TextRole::Legend, TextWeight::Light, theme.legend);
}
