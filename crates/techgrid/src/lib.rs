#![forbid(unsafe_code)]

//! `techgrid` renders technique matrices (categories of items) into fixed-size pages.
//!
//! The data model lives in `techgrid-core` and is re-exported here. Layout and SVG output are
//! behind the `render` feature.
//!
//! # Features
//!
//! - `render`: enable grid layout, SVG rendering and export helpers (`techgrid::render`,
//!   `techgrid::export`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use techgrid_core::*;

#[cfg(feature = "render")]
pub mod export;

#[cfg(feature = "render")]
pub mod render {
    pub use techgrid_render::layout::{CellGeometry, ColumnGeometry, Geometry};
    pub use techgrid_render::model::{DrawPrimitive, RectPrimitive, RenderedPage, TextPrimitive};
    pub use techgrid_render::page::PageMetrics;
    pub use techgrid_render::svg::{SvgRenderOptions, render_page_svg};
    pub use techgrid_render::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
    pub use techgrid_render::{RenderOptions, layout_page, render_categories};

    use techgrid_core::Layer;

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Layer(#[from] techgrid_core::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative suffix for the root `svg<uid>` id.
    ///
    /// This helper:
    /// - trims whitespace
    /// - replaces unsupported characters with `-`
    /// - falls back to `fo` when nothing usable is left
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        let mut out = String::with_capacity(raw.len());
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() {
            return "fo".to_string();
        }
        out.to_string()
    }

    /// Lays out a layer's categories on its page without emitting primitives.
    pub fn layout_layer(layer: &Layer) -> (PageMetrics, Geometry) {
        layout_page(&layer.tactics, &layer.page)
    }

    /// Renders a layer using its own items for colors and its own label mode.
    pub fn render_layer(layer: &Layer, options: &RenderOptions) -> RenderedPage {
        let resolver = layer.color_resolver();
        render_categories(
            &layer.tactics,
            &layer.page,
            &resolver,
            layer.label_mode,
            options,
        )
    }

    pub fn render_layer_svg(
        layer: &Layer,
        options: &RenderOptions,
        svg_options: &SvgRenderOptions,
    ) -> String {
        render_page_svg(&render_layer(layer, options), svg_options)
    }

    /// Parses a layer document and renders it to SVG.
    pub fn render_svg_from_json(
        text: &str,
        options: &RenderOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let layer = Layer::from_json_str(text)?;
        Ok(render_layer_svg(&layer, options, svg_options))
    }

    /// Convenience wrapper that bundles render and SVG options for repeated exports.
    ///
    /// All work is CPU-bound and does not perform I/O; hand the bytes to an
    /// [`crate::export::Deliver`] strategy to write them out.
    #[derive(Clone, Default)]
    pub struct HeadlessRenderer {
        pub render: RenderOptions,
        pub svg: SvgRenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_text_measurer(
            mut self,
            measurer: std::sync::Arc<dyn TextMeasurer + Send + Sync>,
        ) -> Self {
            self.render.text_measurer = measurer;
            self
        }

        pub fn with_svg_id(mut self, id: &str) -> Self {
            self.svg.uid = sanitize_svg_id(id);
            self
        }

        pub fn layout(&self, layer: &Layer) -> (PageMetrics, Geometry) {
            layout_layer(layer)
        }

        pub fn render_page(&self, layer: &Layer) -> RenderedPage {
            render_layer(layer, &self.render)
        }

        pub fn render_svg(&self, layer: &Layer) -> String {
            render_layer_svg(layer, &self.render, &self.svg)
        }

        pub fn render_svg_from_json(&self, text: &str) -> Result<String> {
            render_svg_from_json(text, &self.render, &self.svg)
        }

        #[cfg(feature = "raster")]
        pub fn render_png(
            &self,
            layer: &Layer,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_png(&self.render_svg(layer), raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg(
            &self,
            layer: &Layer,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_jpeg(&self.render_svg(layer), raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf(&self, layer: &Layer) -> raster::Result<Vec<u8>> {
            raster::svg_to_pdf(&self.render_svg(layer))
        }
    }

}
