// File: crates/bargraph-skia/src/theme.rs
// Summary: Bar gradients and light/dark colour themes.

use skia_safe as skia;

/// Two-stop vertical gradient, painted top to bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradient {
    pub name: &'static str,
    pub top: skia::Color,
    pub bottom: skia::Color,
}

impl Gradient {
    pub const fn new(name: &'static str, top: skia::Color, bottom: skia::Color) -> Self {
        Self { name, top, bottom }
    }

    pub fn red_pink() -> Self {
        Self::new("red-pink", skia::Color::from_rgb(0xFF, 0x4A, 0x4A), skia::Color::from_rgb(0xFC, 0x5C, 0xFF))
    }

    pub fn blue_teal() -> Self {
        Self::new("blue-teal", skia::Color::from_rgb(0x52, 0x97, 0xFF), skia::Color::from_rgb(0x70, 0xDB, 0xD4))
    }

    pub fn orange_yellow() -> Self {
        Self::new("orange-yellow", skia::Color::from_rgb(0xFF, 0xA2, 0x6D), skia::Color::from_rgb(0xFF, 0xD7, 0x71))
    }

    /// Return the built-in gradients.
    pub fn presets() -> [Gradient; 3] {
        [Self::red_pink(), Self::blue_teal(), Self::orange_yellow()]
    }

    /// Find a gradient by name, falling back to blue-teal.
    pub fn find(name: &str) -> Gradient {
        Self::presets()
            .into_iter()
            .find(|g| g.name.eq_ignore_ascii_case(name))
            .unwrap_or_else(Self::blue_teal)
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::blue_teal()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub baseline: skia::Color,
    pub guide: skia::Color,
    pub legend: skia::Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            baseline: skia::Color::from_argb(255, 220, 220, 228),
            guide: skia::Color::from_argb(255, 238, 238, 242),
            legend: skia::Color::from_argb(255, 0, 0, 0),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            baseline: skia::Color::from_argb(255, 90, 90, 100),
            guide: skia::Color::from_argb(255, 40, 40, 45),
            legend: skia::Color::from_argb(255, 235, 235, 245),
        }
    }

    pub fn presets() -> [Theme; 2] {
        [Self::light(), Self::dark()]
    }

    /// Find a theme by its `name`, falling back to light.
    pub fn find(name: &str) -> Theme {
        Self::presets()
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .unwrap_or_else(Self::light)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
