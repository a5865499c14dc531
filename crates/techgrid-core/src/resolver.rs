use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual state known for one item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellVisualState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_color: Option<String>,
}

impl CellVisualState {
    /// Explicit color beats score-derived color beats no fill.
    pub fn fill(&self) -> Fill {
        if let Some(color) = non_empty(self.color.as_deref()) {
            return Fill::Color(color.to_string());
        }
        if self.score.is_some() {
            if let Some(color) = non_empty(self.score_color.as_deref()) {
                return Fill::Color(color.to_string());
            }
        }
        Fill::None
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    #[default]
    None,
    Color(String),
}

impl Fill {
    /// SVG paint value.
    pub fn as_paint(&self) -> &str {
        match self {
            Fill::None => "none",
            Fill::Color(c) => c.as_str(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Fill::None)
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_paint())
    }
}

/// Answers the visual state of an item, if one is known.
pub trait ColorResolver {
    fn resolve(&self, item_id: &str) -> Option<CellVisualState>;
}

impl<F> ColorResolver for F
where
    F: Fn(&str) -> Option<CellVisualState>,
{
    fn resolve(&self, item_id: &str) -> Option<CellVisualState> {
        self(item_id)
    }
}

/// A resolver that knows nothing: every cell is unfilled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoColors;

impl ColorResolver for NoColors {
    fn resolve(&self, _item_id: &str) -> Option<CellVisualState> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct MapColorResolver {
    states: FxHashMap<String, CellVisualState>,
}

impl MapColorResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item_id: impl Into<String>, state: CellVisualState) {
        self.states.insert(item_id.into(), state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<(String, CellVisualState)> for MapColorResolver {
    fn from_iter<I: IntoIterator<Item = (String, CellVisualState)>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

impl ColorResolver for MapColorResolver {
    fn resolve(&self, item_id: &str) -> Option<CellVisualState> {
        self.states.get(item_id).cloned()
    }
}

pub fn resolve_fill(resolver: &dyn ColorResolver, item_id: &str) -> Fill {
    resolver
        .resolve(item_id)
        .map(|state| state.fill())
        .unwrap_or(Fill::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(color: Option<&str>, score: Option<f64>, score_color: Option<&str>) -> CellVisualState {
        CellVisualState {
            color: color.map(str::to_string),
            score,
            score_color: score_color.map(str::to_string),
        }
    }

    #[test]
    fn explicit_color_wins_over_score_color() {
        let s = state(Some("red"), Some(3.0), Some("blue"));
        assert_eq!(s.fill(), Fill::Color("red".to_string()));
    }

    #[test]
    fn score_color_applies_without_explicit_color() {
        let s = state(None, Some(0.0), Some("blue"));
        assert_eq!(s.fill(), Fill::Color("blue".to_string()));
    }

    #[test]
    fn neither_means_no_fill() {
        assert_eq!(state(None, None, None).fill(), Fill::None);
        assert_eq!(state(None, None, Some("blue")).fill(), Fill::None);
        assert_eq!(state(Some("  "), None, None).fill(), Fill::None);
    }

    #[test]
    fn missing_entry_means_no_fill() {
        let mut map = MapColorResolver::new();
        map.insert("T1", state(Some("#ff0000"), None, None));
        assert_eq!(resolve_fill(&map, "T1").as_paint(), "#ff0000");
        assert_eq!(resolve_fill(&map, "T2"), Fill::None);
        assert_eq!(resolve_fill(&NoColors, "T1").as_paint(), "none");
    }

    #[test]
    fn closures_are_resolvers() {
        let resolver = |id: &str| (id == "T9").then(|| state(None, Some(1.0), Some("#00ff00")));
        assert_eq!(resolve_fill(&resolver, "T9").as_paint(), "#00ff00");
        assert!(resolve_fill(&resolver, "T1").is_none());
    }
}
