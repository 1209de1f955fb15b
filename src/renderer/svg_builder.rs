//! SVG builder — accumulates SVG elements and produces the final string.

use super::constants::*;
use super::primitives::{Canvas, Point, Stroke, TextAlign};

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct SvgBuilder {
    elements: Vec<String>,
    width: f64,
    height: f64,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl Canvas for SvgBuilder {
    fn begin(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.elements.clear();
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, stroke: Option<&Stroke>) {
        match stroke {
            Some(s) if s.width > 0.0 => self.elements.push(format!(
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="{}" stroke-width="{:.2}"/>"#,
                x, y, w, h, fill, s.color, s.width
            )),
            _ => self.elements.push(format!(
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                x, y, w, h, fill
            )),
        }
    }

    fn line(&mut self, from: Point, to: Point, color: &str, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}"/>"#,
            from.x, from.y, to.x, to.y, color, width
        ));
    }

    fn circle(&mut self, center: Point, radius: f64, fill: &str) {
        self.elements.push(format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
            center.x, center.y, radius, fill
        ));
    }

    fn text(&mut self, anchor: Point, content: &str, size: f64, family: &str, align: TextAlign) {
        self.elements.push(format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.1}" fill="{}" text-anchor="{}">{}</text>"#,
            anchor.x,
            anchor.y,
            escape(family),
            size,
            TEXT_COLOR,
            align.as_svg(),
            escape(content)
        ));
    }
}

/// Escape markup and drop characters XML 1.0 cannot carry at all.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{d7ff}' | '\u{e000}'..='\u{fffd}' | '\u{10000}'..
    )
}
