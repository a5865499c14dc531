#![forbid(unsafe_code)]

//! Technique matrix data model (headless).
//!
//! Design goals:
//! - categories keep caller-controlled display order
//! - every conversion is pure and deterministic
//! - per-item visual state comes from an injected [`ColorResolver`], never from global state

pub mod config;
pub mod error;
pub mod gradient;
pub mod layer;
pub mod model;
pub mod resolver;
pub mod units;

pub use config::{Length, Margins, PageSpec};
pub use error::{Error, Result};
pub use gradient::Gradient;
pub use layer::{Layer, LayerColorResolver};
pub use model::{CategoryMap, Item, LabelMode};
pub use resolver::{
    CellVisualState, ColorResolver, Fill, MapColorResolver, NoColors, resolve_fill,
};
pub use units::{Unit, length_to_pixels, tag_to_pixels, to_pixels, try_tag_to_pixels};
