use crate::layout::{CellGeometry, Geometry};
use crate::model::{DrawPrimitive, RectPrimitive, RenderedPage, TextPrimitive};
use crate::text::{TextMeasurer, TextStyle, wrap_label_to_cell};
use serde::{Deserialize, Serialize};
use techgrid_core::{CategoryMap, ColorResolver, Fill, LabelMode, Margins, PageSpec, resolve_fill};

const STROKE_COLOR: &str = "black";
/// Horizontal inset of cell labels from the cell's left edge.
const LABEL_INSET_X: f64 = 1.0;

/// A [`PageSpec`] resolved to pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub line_step: f64,
    pub margins: Margins,
    pub header_height: f64,
    pub stroke_width: f64,
    pub header_fill: String,
    pub header_label: String,
}

impl PageMetrics {
    pub fn from_page_spec(page: &PageSpec) -> Self {
        Self {
            width: page.width_px(),
            height: page.height_px(),
            font_size: page.font_size_px(),
            line_step: page.line_step_px(),
            margins: page.margins,
            header_height: page.header_height,
            stroke_width: page.stroke_width,
            header_fill: page.header_fill.clone(),
            header_label: page.header_label.clone(),
        }
    }
}

fn push_page_frame(out: &mut Vec<DrawPrimitive>, metrics: &PageMetrics) {
    let half_stroke = metrics.stroke_width / 2.0;
    out.push(DrawPrimitive::Rect(RectPrimitive {
        x: 0.0,
        y: 0.0,
        width: (metrics.width - metrics.margins.right - half_stroke).max(0.0),
        height: (metrics.height - metrics.margins.bottom - half_stroke).max(0.0),
        stroke: Some(STROKE_COLOR.to_string()),
        stroke_width: metrics.stroke_width,
        fill: Fill::None,
    }));
    out.push(DrawPrimitive::Rect(RectPrimitive {
        x: 0.0,
        y: 0.0,
        width: metrics.width,
        height: metrics.header_height,
        stroke: None,
        stroke_width: 0.0,
        fill: Fill::Color(metrics.header_fill.clone()),
    }));
    out.push(DrawPrimitive::Text(TextPrimitive {
        x: metrics.width / 2.0,
        y: metrics.header_height / 2.0,
        content: metrics.header_label.clone(),
        font_size: metrics.font_size,
    }));
}

fn push_cell(
    out: &mut Vec<DrawPrimitive>,
    cell: &CellGeometry,
    fill: Fill,
    label: &str,
    metrics: &PageMetrics,
    measurer: &dyn TextMeasurer,
) {
    out.push(DrawPrimitive::Rect(RectPrimitive {
        x: cell.x,
        y: cell.y,
        width: cell.width,
        height: cell.height,
        stroke: Some(STROKE_COLOR.to_string()),
        stroke_width: metrics.stroke_width,
        fill,
    }));

    let style = TextStyle::with_font_size(metrics.font_size);
    let baseline = cell.y + metrics.font_size + 1.0;
    for line in wrap_label_to_cell(
        label,
        measurer,
        &style,
        cell.width,
        cell.height,
        metrics.line_step,
    ) {
        out.push(DrawPrimitive::Text(TextPrimitive {
            x: cell.x + LABEL_INSET_X,
            y: baseline + line.offset,
            content: line.text,
            font_size: metrics.font_size,
        }));
    }
}

/// Emits the page frame, header band and every cell.
///
/// Order is deterministic: outer border, header rect, header label, then per column (map order)
/// and per row, the cell rect followed by its label lines.
pub fn render_page(
    categories: &CategoryMap,
    geometry: &Geometry,
    resolver: &dyn ColorResolver,
    label_mode: LabelMode,
    metrics: &PageMetrics,
    measurer: &dyn TextMeasurer,
) -> RenderedPage {
    let mut primitives: Vec<DrawPrimitive> = Vec::with_capacity(3 + 2 * geometry.cells().count());
    push_page_frame(&mut primitives, metrics);

    for (column, (_, items)) in geometry.columns.iter().zip(categories.iter()) {
        for (cell, item) in column.cells.iter().zip(items) {
            let fill = resolve_fill(resolver, &item.id);
            let label = label_mode.label_for(item);
            push_cell(&mut primitives, cell, fill, &label, metrics, measurer);
        }
    }

    tracing::debug!(
        columns = geometry.columns.len(),
        cell_height = geometry.cell_height,
        primitives = primitives.len(),
        "rendered page"
    );

    RenderedPage {
        width: metrics.width,
        height: metrics.height,
        origin_x: metrics.margins.left,
        origin_y: metrics.margins.top,
        primitives,
    }
}
