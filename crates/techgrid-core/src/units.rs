//! Physical length → device pixel conversion.
//!
//! Factors follow the CSS reference pixel (96 per inch). An unknown unit tag is a soft failure:
//! the lenient helpers log it and return `0.0` so layout still produces something.

use crate::config::Length;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PX_PER_INCH: f64 = 96.0;
pub const PX_PER_CENTIMETER: f64 = 3.779375 * 10.0;
pub const PX_PER_EM: f64 = 16.0;
pub const PX_PER_POINT: f64 = PX_PER_INCH / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "in")]
    Inch,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "px")]
    Pixel,
    #[serde(rename = "em")]
    Em,
    #[serde(rename = "pt")]
    Point,
}

impl Unit {
    pub fn px_factor(self) -> f64 {
        match self {
            Unit::Inch => PX_PER_INCH,
            Unit::Centimeter => PX_PER_CENTIMETER,
            Unit::Pixel => 1.0,
            Unit::Em => PX_PER_EM,
            Unit::Point => PX_PER_POINT,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Unit::Inch => "in",
            Unit::Centimeter => "cm",
            Unit::Pixel => "px",
            Unit::Em => "em",
            Unit::Point => "pt",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "inch" | "inches" => Ok(Unit::Inch),
            "cm" | "centimeter" | "centimeters" => Ok(Unit::Centimeter),
            "px" | "pixel" | "pixels" => Ok(Unit::Pixel),
            "em" => Ok(Unit::Em),
            "pt" | "point" | "points" => Ok(Unit::Point),
            _ => Err(Error::UnknownUnit { tag: s.to_string() }),
        }
    }
}

pub fn to_pixels(quantity: f64, unit: Unit) -> f64 {
    quantity * unit.px_factor()
}

/// Strict conversion from a raw unit tag.
pub fn try_tag_to_pixels(quantity: f64, tag: &str) -> Result<f64> {
    Ok(to_pixels(quantity, tag.parse::<Unit>()?))
}

/// Lenient conversion from a raw unit tag: unknown tags are logged and scale to `0.0`.
pub fn tag_to_pixels(quantity: f64, tag: &str) -> f64 {
    match try_tag_to_pixels(quantity, tag) {
        Ok(px) => px,
        Err(err) => {
            tracing::error!(%err, quantity, "unknown unit; substituting a zero scale factor");
            0.0
        }
    }
}

pub fn length_to_pixels(length: &Length) -> f64 {
    tag_to_pixels(length.value, &length.unit)
}
