use crate::units::{self, Unit};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MARGIN_PX: f64 = 5.0;
pub const DEFAULT_HEADER_HEIGHT_PX: f64 = 133.0;
pub const DEFAULT_LINE_HEIGHT: f64 = 1.1;
pub const DEFAULT_STROKE_WIDTH_PX: f64 = 1.0;
pub const DEFAULT_HEADER_FILL: &str = "rgba(99, 143, 98, 0.5)";
pub const DEFAULT_HEADER_LABEL: &str = "header";

/// A physical length. The unit stays a raw tag so an unknown unit degrades at conversion time
/// (see [`units::tag_to_pixels`]) instead of rejecting the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Length {
    pub value: f64,
    pub unit: String,
}

impl Length {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self {
            value,
            unit: unit.as_tag().to_string(),
        }
    }

    pub fn px(value: f64) -> Self {
        Self::new(value, Unit::Pixel)
    }

    pub fn to_pixels(&self) -> f64 {
        units::length_to_pixels(self)
    }
}

/// Page margins, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(DEFAULT_MARGIN_PX)
    }
}

/// Page setup for one export.
///
/// Defaults describe a US-letter landscape sheet (11in × 8.5in) with a 12pt font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSpec {
    pub width: Length,
    pub height: Length,
    pub font_size: Length,
    pub margins: Margins,
    /// Header band height, in pixels.
    pub header_height: f64,
    /// Line advance as a multiple of the font size.
    pub line_height: f64,
    pub stroke_width: f64,
    pub header_fill: String,
    pub header_label: String,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            width: Length::new(11.0, Unit::Inch),
            height: Length::new(8.5, Unit::Inch),
            font_size: Length::new(12.0, Unit::Point),
            margins: Margins::default(),
            header_height: DEFAULT_HEADER_HEIGHT_PX,
            line_height: DEFAULT_LINE_HEIGHT,
            stroke_width: DEFAULT_STROKE_WIDTH_PX,
            header_fill: DEFAULT_HEADER_FILL.to_string(),
            header_label: DEFAULT_HEADER_LABEL.to_string(),
        }
    }
}

impl PageSpec {
    pub fn width_px(&self) -> f64 {
        self.width.to_pixels()
    }

    pub fn height_px(&self) -> f64 {
        self.height.to_pixels()
    }

    pub fn font_size_px(&self) -> f64 {
        self.font_size.to_pixels()
    }

    /// Vertical advance between wrapped lines: `line_height × font size`, converted from the
    /// font's own unit.
    pub fn line_step_px(&self) -> f64 {
        units::tag_to_pixels(self.line_height * self.font_size.value, &self.font_size.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_is_letter_landscape() {
        let page = PageSpec::default();
        assert_eq!(page.width_px(), 1056.0);
        assert_eq!(page.height_px(), 816.0);
        assert!((page.font_size_px() - 16.0).abs() < 1e-9);
        assert_eq!(page.margins, Margins::uniform(5.0));
    }

    #[test]
    fn line_step_uses_the_font_unit() {
        let page = PageSpec {
            font_size: Length::new(1.0, Unit::Em),
            ..PageSpec::default()
        };
        assert!((page.line_step_px() - 17.6).abs() < 1e-9);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let page: PageSpec = serde_json::from_str(
            r#"{ "width": { "value": 960, "unit": "px" }, "margins": { "top": 0 } }"#,
        )
        .unwrap();
        assert_eq!(page.width_px(), 960.0);
        assert_eq!(page.height_px(), 816.0);
        assert_eq!(page.margins.top, 0.0);
        assert_eq!(page.margins.right, 5.0);
        assert_eq!(page.header_height, 133.0);
    }

    #[test]
    fn unknown_page_unit_collapses_to_zero() {
        let page = PageSpec {
            width: Length {
                value: 10.0,
                unit: "parsec".to_string(),
            },
            ..PageSpec::default()
        };
        assert_eq!(page.width_px(), 0.0);
    }
}
