use crate::config::PageSpec;
use crate::gradient::Gradient;
use crate::model::{CategoryMap, LabelMode};
use crate::resolver::{CellVisualState, ColorResolver};
use crate::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A complete export request: the matrix, how to label and color it, and the page it goes on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Layer {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(alias = "viewMode")]
    pub label_mode: LabelMode,
    pub gradient: Gradient,
    pub page: PageSpec,
    #[serde(alias = "categories")]
    pub tactics: CategoryMap,
}

impl Layer {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn color_resolver(&self) -> LayerColorResolver {
        LayerColorResolver::from_layer(self)
    }

    /// Display name used for the header band and export file name.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() { "layer" } else { name }
    }
}

/// Resolves item visual state from the items' own color/score, coloring scores through the
/// layer's gradient. The first occurrence of an id wins when an item sits in several categories.
#[derive(Debug, Clone, Default)]
pub struct LayerColorResolver {
    states: FxHashMap<String, CellVisualState>,
}

impl LayerColorResolver {
    pub fn from_layer(layer: &Layer) -> Self {
        let mut states: FxHashMap<String, CellVisualState> = FxHashMap::default();
        for item in layer.tactics.items() {
            if item.color.is_none() && item.score.is_none() {
                continue;
            }
            states
                .entry(item.id.clone())
                .or_insert_with(|| CellVisualState {
                    color: item.color.clone(),
                    score: item.score,
                    score_color: item.score.and_then(|s| layer.gradient.color_for(s)),
                });
        }
        tracing::debug!(resolved = states.len(), layer = %layer.display_name(), "built layer color resolver");
        Self { states }
    }
}

impl ColorResolver for LayerColorResolver {
    fn resolve(&self, item_id: &str) -> Option<CellVisualState> {
        self.states.get(item_id).cloned()
    }
}
