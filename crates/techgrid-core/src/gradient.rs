//! Score → color mapping.
//!
//! Stops are spread evenly over `[min_value, max_value]`; scores outside the range clamp to the
//! nearest end.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn parse_hex(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor {
            value: text.to_string(),
        };
        let hex = text.trim().strip_prefix('#').ok_or_else(invalid)?;

        fn hex2(b: &[u8]) -> Option<u8> {
            let hi = (*b.first()? as char).to_digit(16)? as u8;
            let lo = (*b.get(1)? as char).to_digit(16)? as u8;
            Some((hi << 4) | lo)
        }
        fn hex1(c: u8) -> Option<u8> {
            let v = (c as char).to_digit(16)? as u8;
            Some((v << 4) | v)
        }

        let bytes = hex.as_bytes();
        let rgb = match bytes {
            [r, g, b] => (hex1(*r), hex1(*g), hex1(*b)),
            [r1, r2, g1, g2, b1, b2] => (hex2(&[*r1, *r2]), hex2(&[*g1, *g2]), hex2(&[*b1, *b2])),
            _ => return Err(invalid()),
        };
        match rgb {
            (Some(r), Some(g), Some(b)) => Ok(Self { r, g, b }),
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let ch = |a: u8, b: u8| -> u8 {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Gradient {
    pub colors: Vec<String>,
    pub min_value: f64,
    pub max_value: f64,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            colors: vec![
                "#ff6666".to_string(),
                "#ffe766".to_string(),
                "#8ec843".to_string(),
            ],
            min_value: 0.0,
            max_value: 100.0,
        }
    }
}

impl Gradient {
    fn stops(&self) -> Vec<Rgb> {
        self.colors
            .iter()
            .filter_map(|c| match Rgb::parse_hex(c) {
                Ok(rgb) => Some(rgb),
                Err(err) => {
                    tracing::warn!(%err, "skipping gradient stop");
                    None
                }
            })
            .collect()
    }

    /// Color for `score`, or `None` when the gradient has no usable stop or the score is NaN.
    pub fn color_for(&self, score: f64) -> Option<String> {
        let stops = self.stops();
        let (first, last) = (*stops.first()?, *stops.last()?);
        if score.is_nan() {
            return None;
        }
        if stops.len() == 1 {
            return Some(first.to_hex());
        }

        let (lo, hi) = if self.min_value <= self.max_value {
            (self.min_value, self.max_value)
        } else {
            (self.max_value, self.min_value)
        };
        let span = hi - lo;
        if !(span.is_finite() && span > 0.0) {
            let stop = if score < lo { first } else { last };
            return Some(stop.to_hex());
        }

        let mut t = ((score - lo) / span).clamp(0.0, 1.0);
        if self.min_value > self.max_value {
            t = 1.0 - t;
        }
        let segments = (stops.len() - 1) as f64;
        let pos = t * segments;
        let idx = (pos.floor() as usize).min(stops.len() - 2);
        let local = pos - idx as f64;
        Some(stops[idx].lerp(stops[idx + 1], local).to_hex())
    }
}
