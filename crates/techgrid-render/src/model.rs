use serde::{Deserialize, Serialize};
use techgrid_core::Fill;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub fill: Fill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DrawPrimitive {
    Rect(RectPrimitive),
    Text(TextPrimitive),
}

impl DrawPrimitive {
    pub fn as_rect(&self) -> Option<&RectPrimitive> {
        match self {
            DrawPrimitive::Rect(r) => Some(r),
            DrawPrimitive::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextPrimitive> {
        match self {
            DrawPrimitive::Text(t) => Some(t),
            DrawPrimitive::Rect(_) => None,
        }
    }
}

/// Output of one render call. Primitive coordinates are in pixels relative to
/// (`origin_x`, `origin_y`), which is the page's top-left margin corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPage {
    pub width: f64,
    pub height: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub primitives: Vec<DrawPrimitive>,
}

impl RenderedPage {
    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.primitives.iter().filter_map(DrawPrimitive::as_rect)
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.primitives.iter().filter_map(DrawPrimitive::as_text)
    }
}
