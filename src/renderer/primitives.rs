//! Primitive emitter — flattens a `ChordLayout` into renderer-agnostic
//! drawing instructions.
//!
//! Draw order: background, top bar, strings, frets, open rings, mute
//! crosses, barres with their end dots, notes, starting-fret label, title.
//! Later primitives paint over earlier ones.

use serde::Serialize;

use super::constants::*;
use super::layout::{ChordLayout, NoteMarker, Rect, TextLabel};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal alignment of a text run relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Start,
    Middle,
    End,
}

impl TextAlign {
    pub fn as_svg(self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Middle => "middle",
            TextAlign::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
        stroke: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: String,
    },
    /// `fill` of `None` means the default foreground color.
    Circle {
        center: Point,
        radius: f64,
        fill: Option<String>,
    },
    Text {
        content: String,
        font_size: f64,
        font_family: String,
        anchor: Point,
        align: TextAlign,
    },
}

/// A finished diagram: canvas size plus ordered primitives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
}

/// Anything that can materialize primitives (SVG writer, raster backend, ...).
pub trait Canvas {
    fn begin(&mut self, width: f64, height: f64);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, stroke: Option<&Stroke>);
    fn line(&mut self, from: Point, to: Point, color: &str, width: f64);
    fn circle(&mut self, center: Point, radius: f64, fill: &str);
    fn text(&mut self, anchor: Point, content: &str, size: f64, family: &str, align: TextAlign);
}

impl Drawing {
    /// Feed every primitive, in order, to a canvas.
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.begin(self.width, self.height);
        for p in &self.primitives {
            match p {
                Primitive::Rect { x, y, width, height, fill, stroke } => {
                    canvas.rect(*x, *y, *width, *height, fill, stroke.as_ref())
                }
                Primitive::Line { from, to, width, color } => {
                    canvas.line(*from, *to, color, *width)
                }
                Primitive::Circle { center, radius, fill } => {
                    canvas.circle(*center, *radius, fill.as_deref().unwrap_or(NOTE_COLOR))
                }
                Primitive::Text { content, font_size, font_family, anchor, align } => {
                    canvas.text(*anchor, content, *font_size, font_family, *align)
                }
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Emitter
// ═══════════════════════════════════════════════════════════════════════

fn filled(r: &Rect, color: &str) -> Primitive {
    Primitive::Rect {
        x: r.x,
        y: r.y,
        width: r.width,
        height: r.height,
        fill: color.to_string(),
        stroke: None,
    }
}

fn dot(n: &NoteMarker) -> Primitive {
    Primitive::Circle {
        center: n.center,
        radius: n.radius,
        fill: None,
    }
}

fn text(label: &TextLabel) -> Primitive {
    Primitive::Text {
        content: label.content.clone(),
        font_size: label.font_size,
        font_family: FONT_FAMILY.to_string(),
        anchor: label.anchor,
        align: label.align,
    }
}

/// Convert computed geometry into the ordered primitive stream.
pub fn emit(layout: &ChordLayout) -> Drawing {
    let mut out = Vec::new();

    out.push(filled(&layout.background, BACKGROUND_COLOR));
    out.push(filled(&layout.top_bar, GRID_COLOR));
    out.extend(layout.strings.iter().map(|r| filled(r, GRID_COLOR)));
    out.extend(layout.frets.iter().map(|r| filled(r, GRID_COLOR)));

    for ring in &layout.open_markers {
        out.push(Primitive::Circle {
            center: ring.center,
            radius: ring.outer_radius,
            fill: None,
        });
        // Punch the hole with the background color.
        out.push(Primitive::Circle {
            center: ring.center,
            radius: ring.inner_radius,
            fill: Some(BACKGROUND_COLOR.to_string()),
        });
    }

    for cross in &layout.mute_markers {
        for (from, to) in cross.strokes() {
            out.push(Primitive::Line {
                from,
                to,
                width: cross.stroke_width,
                color: GRID_COLOR.to_string(),
            });
        }
    }

    for barre in &layout.barres {
        out.push(Primitive::Line {
            from: barre.from,
            to: barre.to,
            width: barre.stroke_width,
            color: NOTE_COLOR.to_string(),
        });
        out.extend(barre.endpoints.iter().map(dot));
    }

    out.extend(layout.notes.iter().map(dot));

    if let Some(label) = &layout.fret_label {
        out.push(text(label));
    }
    if let Some(title) = &layout.title {
        out.push(text(title));
    }

    Drawing {
        width: layout.width,
        height: layout.height,
        primitives: out,
    }
}
