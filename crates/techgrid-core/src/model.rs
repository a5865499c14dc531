use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// The smallest unit placed in a grid cell (a technique).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(alias = "techniqueID", alias = "technique_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acronym: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            acronym: None,
            score: None,
            color: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_acronym(mut self, acronym: impl Into<String>) -> Self {
        self.acronym = Some(acronym.into());
        self
    }

    /// The explicit acronym, or the uppercased initials of the name's words.
    pub fn acronym_or_initials(&self) -> String {
        if let Some(acr) = self.acronym.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            return acr.to_string();
        }
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().find(|c| c.is_alphanumeric()))
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Ordered mapping from category name to its items. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMap(IndexMap<String, Vec<Item>>);

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a category (or replaces the items of an existing one, keeping its position).
    pub fn insert(&mut self, category: impl Into<String>, items: Vec<Item>) {
        self.0.insert(category.into(), items);
    }

    pub fn with_category(mut self, category: impl Into<String>, items: Vec<Item>) -> Self {
        self.insert(category, items);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<&[Item]> {
        self.0.get(category).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Item])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.0.values().flatten()
    }

    pub fn longest_category_len(&self) -> usize {
        self.0.values().map(Vec::len).max().unwrap_or(0)
    }
}

impl FromIterator<(String, Vec<Item>)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Item>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which string (if any) labels a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelMode {
    #[default]
    FullName,
    Acronym,
    Blank,
}

impl LabelMode {
    pub fn from_view_mode(view_mode: u64) -> Option<Self> {
        match view_mode {
            0 => Some(LabelMode::FullName),
            1 => Some(LabelMode::Acronym),
            2 => Some(LabelMode::Blank),
            _ => None,
        }
    }

    pub fn label_for(self, item: &Item) -> String {
        match self {
            LabelMode::FullName => item.name.clone(),
            LabelMode::Acronym => item.acronym_or_initials(),
            LabelMode::Blank => String::new(),
        }
    }
}

impl FromStr for LabelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full-name" | "full" | "name" | "0" => Ok(LabelMode::FullName),
            "acronym" | "acr" | "1" => Ok(LabelMode::Acronym),
            "blank" | "none" | "2" => Ok(LabelMode::Blank),
            _ => Err(Error::UnknownLabelMode {
                value: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for LabelMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Index(u64),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Index(n) => LabelMode::from_view_mode(n).ok_or_else(|| {
                serde::de::Error::custom(Error::UnknownLabelMode {
                    value: n.to_string(),
                })
            }),
            Raw::Name(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_follows_insertion() {
        let map = CategoryMap::new()
            .with_category("zeta", vec![Item::new("T1", "One")])
            .with_category("alpha", vec![])
            .with_category("mid", vec![Item::new("T2", "Two"), Item::new("T3", "Three")]);
        let names: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert_eq!(map.longest_category_len(), 2);
    }

    #[test]
    fn category_order_survives_json() {
        let map: CategoryMap = serde_json::from_str(
            r#"{ "b": [{ "id": "T2", "name": "Two" }], "a": [{ "techniqueID": "T1", "name": "One" }] }"#,
        )
        .unwrap();
        let names: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(map.get("a").unwrap()[0].id, "T1");
    }

    #[test]
    fn acronym_falls_back_to_initials() {
        let item = Item::new("T1189", "Drive-by compromise of (web) servers");
        assert_eq!(item.acronym_or_initials(), "DCOWS");
        assert_eq!(item.with_acronym("DBC").acronym_or_initials(), "DBC");
    }

    #[test]
    fn label_mode_selects_text() {
        let item = Item::new("T1", "Spear Phishing");
        assert_eq!(LabelMode::FullName.label_for(&item), "Spear Phishing");
        assert_eq!(LabelMode::Acronym.label_for(&item), "SP");
        assert_eq!(LabelMode::Blank.label_for(&item), "");
    }

    #[test]
    fn label_mode_parses_names_and_view_modes() {
        assert_eq!("acronym".parse::<LabelMode>().unwrap(), LabelMode::Acronym);
        let m: LabelMode = serde_json::from_str("2").unwrap();
        assert_eq!(m, LabelMode::Blank);
        let m: LabelMode = serde_json::from_str(r#""full-name""#).unwrap();
        assert_eq!(m, LabelMode::FullName);
        assert!(serde_json::from_str::<LabelMode>("7").is_err());
    }
}
