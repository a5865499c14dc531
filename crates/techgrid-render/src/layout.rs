//! Grid geometry for a category → items matrix.
//!
//! Columns split the width equally. All cells share one height: the smallest
//! `usable span / item count` over the non-empty categories, so the longest column fits exactly
//! and shorter columns leave blank space below their last item.

use serde::{Deserialize, Serialize};
use techgrid_core::{CategoryMap, Margins};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGeometry {
    pub item_id: String,
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnGeometry {
    pub category: String,
    pub x: f64,
    pub width: f64,
    pub cells: Vec<CellGeometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub column_width: f64,
    pub cell_height: f64,
    /// Top of the table body (the header band height).
    pub body_top: f64,
    /// Vertical span available to cells below the header.
    pub usable_height: f64,
    pub columns: Vec<ColumnGeometry>,
}

impl Geometry {
    pub fn cells(&self) -> impl Iterator<Item = &CellGeometry> {
        self.columns.iter().flat_map(|c| c.cells.iter())
    }

    pub fn column(&self, category: &str) -> Option<&ColumnGeometry> {
        self.columns.iter().find(|c| c.category == category)
    }
}

/// Smallest per-category cell height; empty categories impose no constraint.
pub fn uniform_cell_height(categories: &CategoryMap, usable_height: f64) -> f64 {
    categories
        .iter()
        .map(|(_, items)| items.len())
        .filter(|&n| n > 0)
        .map(|n| usable_height / n as f64)
        .fold(None, |acc: Option<f64>, h| Some(acc.map_or(h, |a| a.min(h))))
        .unwrap_or(usable_height)
}

pub fn compute_geometry(
    categories: &CategoryMap,
    page_width_px: f64,
    page_height_px: f64,
    header_height_px: f64,
    margins: &Margins,
) -> Geometry {
    let usable_height = (page_height_px - margins.bottom - header_height_px).max(0.0);
    let cell_height = uniform_cell_height(categories, usable_height);

    let column_count = categories.len();
    let column_width = if column_count == 0 {
        0.0
    } else {
        ((page_width_px - margins.right) / column_count as f64).max(0.0)
    };

    let columns = categories
        .iter()
        .enumerate()
        .map(|(col, (category, items))| {
            let x = col as f64 * column_width;
            let cells = items
                .iter()
                .enumerate()
                .map(|(row, item)| CellGeometry {
                    item_id: item.id.clone(),
                    row,
                    x,
                    y: header_height_px + row as f64 * cell_height,
                    width: column_width,
                    height: cell_height,
                })
                .collect();
            ColumnGeometry {
                category: category.to_string(),
                x,
                width: column_width,
                cells,
            }
        })
        .collect();

    Geometry {
        column_width,
        cell_height,
        body_top: header_height_px,
        usable_height,
        columns,
    }
}
