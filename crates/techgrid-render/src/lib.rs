#![forbid(unsafe_code)]

pub mod layout;
pub mod model;
pub mod page;
pub mod svg;
pub mod text;

use crate::layout::Geometry;
use crate::model::RenderedPage;
use crate::page::PageMetrics;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use std::sync::Arc;
use techgrid_core::{CategoryMap, ColorResolver, LabelMode, PageSpec};

#[derive(Clone)]
pub struct RenderOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

/// Converts the page to pixels and lays out the grid.
pub fn layout_page(categories: &CategoryMap, page: &PageSpec) -> (PageMetrics, Geometry) {
    let metrics = PageMetrics::from_page_spec(page);
    let geometry = layout::compute_geometry(
        categories,
        metrics.width,
        metrics.height,
        metrics.header_height,
        &metrics.margins,
    );
    (metrics, geometry)
}

/// Full pipeline: unit conversion, grid layout, then cell rendering.
///
/// Never fails. Unknown units, missing colors and labels that do not fit all degrade the
/// output instead of aborting it.
pub fn render_categories(
    categories: &CategoryMap,
    page: &PageSpec,
    resolver: &dyn ColorResolver,
    label_mode: LabelMode,
    options: &RenderOptions,
) -> RenderedPage {
    let (metrics, geometry) = layout_page(categories, page);
    if !(metrics.width > 0.0 && metrics.height > 0.0) {
        tracing::warn!(
            width = metrics.width,
            height = metrics.height,
            "page has no drawable area after unit conversion"
        );
    }
    page::render_page(
        categories,
        &geometry,
        resolver,
        label_mode,
        &metrics,
        options.text_measurer.as_ref(),
    )
}
