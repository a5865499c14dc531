use crate::model::{DrawPrimitive, RectPrimitive, RenderedPage, TextPrimitive};
use std::fmt::Write as _;

mod util;

use util::{escape_xml, escape_xml_into, fmt};

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Suffix of the root element id (`svg<uid>`), the tag export collaborators use to locate
    /// the document.
    pub uid: String,
    /// Optional `<title>` for accessibility.
    pub title: Option<String>,
    /// Label fill color.
    pub text_fill: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            uid: "fo".to_string(),
            title: None,
            text_fill: "black".to_string(),
        }
    }
}

impl SvgRenderOptions {
    pub fn root_id(&self) -> String {
        format!("svg{}", self.uid)
    }
}

fn write_rect(out: &mut String, r: &RectPrimitive) {
    let _ = write!(
        out,
        r#"<rect x="{x}" y="{y}" width="{w}" height="{h}""#,
        x = fmt(r.x),
        y = fmt(r.y),
        w = fmt(r.width),
        h = fmt(r.height),
    );
    if let Some(stroke) = r.stroke.as_deref() {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            escape_xml(stroke),
            fmt(r.stroke_width)
        );
    }
    let _ = write!(out, r#" fill="{}"/>"#, escape_xml(r.fill.as_paint()));
}

fn write_text(out: &mut String, t: &TextPrimitive, fill: &str) {
    let _ = write!(
        out,
        r#"<text x="{x}" y="{y}" font-size="{size}px" fill="{fill}">"#,
        x = fmt(t.x),
        y = fmt(t.y),
        size = fmt(t.font_size),
        fill = escape_xml(fill),
    );
    escape_xml_into(out, &t.content);
    out.push_str("</text>");
}

/// Serializes a rendered page into a standalone SVG document (without XML prolog).
///
/// The root carries explicit pixel `width`/`height`, the SVG namespace and `id="svg<uid>"`;
/// all primitives sit in one group translated to the page's margin origin.
pub fn render_page_svg(page: &RenderedPage, options: &SvgRenderOptions) -> String {
    let mut out = String::with_capacity(128 + page.primitives.len() * 96);
    let _ = write!(
        &mut out,
        r#"<svg width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" id="{id}">"#,
        w = fmt(page.width),
        h = fmt(page.height),
        id = escape_xml(&options.root_id()),
    );
    if let Some(title) = options.title.as_deref() {
        let _ = write!(&mut out, "<title>{}</title>", escape_xml(title));
    }
    let _ = write!(
        &mut out,
        r#"<g transform="translate({},{})">"#,
        fmt(page.origin_x),
        fmt(page.origin_y)
    );
    for primitive in &page.primitives {
        match primitive {
            DrawPrimitive::Rect(r) => write_rect(&mut out, r),
            DrawPrimitive::Text(t) => write_text(&mut out, t, &options.text_fill),
        }
    }
    out.push_str("</g></svg>");
    out
}
