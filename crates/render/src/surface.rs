use serde::{Deserialize, Serialize};

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xff)
    }

    /// `#rrggbb`, without alpha.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha channel in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

/// One color stop of a gradient; `offset` runs from 0 (top) to 1 (bottom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Immediate-mode 2D drawing target.
///
/// Mirrors the subset of a canvas-style context the renderer needs. Styles and
/// global alpha persist until changed; `fill` and `stroke` act on the current path.
pub trait Surface {
    /// Fill `rect` with a gradient running from its top edge to its bottom edge.
    fn fill_vertical_gradient(&mut self, rect: Rect, stops: &[GradientStop]);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn close_path(&mut self);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_global_alpha(&mut self, alpha: f32);
    fn fill(&mut self);
    fn stroke(&mut self);
}

/// A single surface operation, as captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCall {
    FillVerticalGradient { rect: Rect, stops: Vec<GradientStop> },
    BeginPath,
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    ClosePath,
    SetFillColor { color: Color },
    SetStrokeColor { color: Color },
    SetGlobalAlpha { alpha: f32 },
    Fill,
    Stroke,
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<DrawCall> {
        self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Number of filled paths.
    pub fn fill_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Fill)).count()
    }
}

impl Surface for RecordingSurface {
    fn fill_vertical_gradient(&mut self, rect: Rect, stops: &[GradientStop]) {
        self.calls.push(DrawCall::FillVerticalGradient {
            rect,
            stops: stops.to_vec(),
        });
    }

    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.calls.push(DrawCall::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.calls.push(DrawCall::LineTo { x, y });
    }

    fn close_path(&mut self) {
        self.calls.push(DrawCall::ClosePath);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.calls.push(DrawCall::SetFillColor { color });
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.calls.push(DrawCall::SetStrokeColor { color });
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.calls.push(DrawCall::SetGlobalAlpha { alpha });
    }

    fn fill(&mut self) {
        self.calls.push(DrawCall::Fill);
    }

    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke);
    }
}
