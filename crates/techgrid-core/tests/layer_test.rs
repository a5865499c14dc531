use std::path::{Path, PathBuf};
use techgrid_core::{ColorResolver, Fill, LabelMode, Layer, resolve_fill};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn load_basic() -> Layer {
    let path = workspace_root()
        .join("fixtures")
        .join("layers")
        .join("basic.json");
    let text = std::fs::read_to_string(&path).expect("fixture");
    Layer::from_json_str(&text).expect("layer parses")
}

#[test]
fn basic_layer_parses_in_document_order() {
    let layer = load_basic();
    assert_eq!(layer.display_name(), "Red Team Coverage (Q3)");
    assert_eq!(layer.label_mode, LabelMode::FullName);

    let names: Vec<_> = layer.tactics.iter().map(|(k, _)| k).collect();
    assert_eq!(names, ["initial-access", "execution", "impact"]);
    assert_eq!(layer.tactics.get("impact").map(<[_]>::len), Some(0));

    assert_eq!(layer.page.width_px(), 960.0);
    assert_eq!(layer.page.height_px(), 720.0);
    assert_eq!(layer.page.header_height, 133.0);
}

#[test]
fn layer_resolver_prefers_explicit_color_then_gradient() {
    let layer = load_basic();
    let resolver = layer.color_resolver();

    assert_eq!(resolve_fill(&resolver, "T1190"), Fill::Color("#e60d0d".into()));
    assert_eq!(resolve_fill(&resolver, "T1189"), Fill::Color("#8ec843".into()));
    // A zero score is still a score.
    assert_eq!(resolve_fill(&resolver, "T1059"), Fill::Color("#ff6666".into()));
    assert!(resolver.resolve("T1566").is_none());
    assert_eq!(resolve_fill(&resolver, "T1566"), Fill::None);
}

#[test]
fn numeric_view_mode_is_accepted() {
    let layer = Layer::from_json_str(r#"{ "name": "x", "viewMode": 1, "tactics": {} }"#).unwrap();
    assert_eq!(layer.label_mode, LabelMode::Acronym);
    assert!(layer.tactics.is_empty());
}

#[test]
fn empty_name_falls_back() {
    let layer = Layer::from_json_str(r#"{ "name": "   " }"#).unwrap();
    assert_eq!(layer.display_name(), "layer");
}

#[test]
fn malformed_json_is_reported() {
    let err = Layer::from_json_str("{ not json").unwrap_err();
    assert!(err.to_string().starts_with("invalid layer JSON"));
}
