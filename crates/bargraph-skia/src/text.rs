// File: crates/bargraph-skia/src/text.rs
// Summary: Legend text shaping with Skia textlayout and compact number labels.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};
use skia::font_style::{Slant, Weight, Width};

/// Text sizes, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextRole {
    Header,
    Paragraph,
    Legend,
}

impl TextRole {
    pub const fn size(self) -> f32 {
        match self {
            TextRole::Header => 18.0,
            TextRole::Paragraph => 14.0,
            TextRole::Legend => 10.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextWeight {
    Light,
    Highlight,
    Emphasis,
}

impl TextWeight {
    pub const fn value(self) -> i32 {
        match self {
            TextWeight::Light => 300,
            TextWeight::Highlight => 500,
            TextWeight::Emphasis => 900,
        }
    }
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(role: TextRole, weight: TextWeight, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(role.size());
        ts.set_color(color);
        ts.set_font_style(skia::FontStyle::new(Weight::from(weight.value()), Width::NORMAL, Slant::Upright));
        ts.set_font_families(&["Roboto", "Segoe UI", "Arial", "Helvetica", "DejaVu Sans", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, role: TextRole, weight: TextWeight, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(role, weight, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, role: TextRole) -> f32 {
        self.layout(text, role, TextWeight::Light, skia::Color::TRANSPARENT).longest_line()
    }

    /// Draw `text` with its top edge at `top`, horizontally centred on `cx`.
    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, cx: f32, top: f32, role: TextRole, weight: TextWeight, color: skia::Color) {
        let p = self.layout(text, role, weight, color);
        p.paint(canvas, (cx - p.longest_line() * 0.5, top));
    }

    /// Draw `text` with its top edge at `top`, starting at `x`.
    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, top: f32, role: TextRole, weight: TextWeight, color: skia::Color) {
        let p = self.layout(text, role, weight, color);
        p.paint(canvas, (x, top));
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

/// Format `value` with a K/M/B suffix and at most one decimal, then `unit`.
pub fn format_compact(value: f64, unit: &str) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    let mut digits = format!("{scaled:.1}");
    if digits.ends_with(".0") {
        digits.truncate(digits.len() - 2);
    }
    format!("{digits}{suffix}{unit}")
}
