//! Geometry calculator — positions every element of a chord diagram.
//!
//! Coordinates grow right and down from the canvas origin. Vertically the
//! canvas is stacked as: padding, title space, marker row (open/mute
//! symbols), top bar, fret rows, padding.

use serde::Serialize;

use crate::error::Result;
use crate::model::*;
use super::constants::*;
use super::primitives::{Point, TextAlign};

// ═══════════════════════════════════════════════════════════════════════
// Layout structures
// ═══════════════════════════════════════════════════════════════════════

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A filled disk marking a fretted position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoteMarker {
    pub string: u32,
    pub fret: u32,
    pub center: Point,
    pub radius: f64,
}

/// A ring above the grid for an open string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OpenMarker {
    pub string: u32,
    pub center: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
}

/// An X above the grid for a muted string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MuteMarker {
    pub string: u32,
    pub center: Point,
    /// Half the extent of each diagonal, horizontally and vertically.
    pub arm: f64,
    pub stroke_width: f64,
}

impl MuteMarker {
    /// The two crossing diagonals.
    pub fn strokes(&self) -> [(Point, Point); 2] {
        let Point { x, y } = self.center;
        let a = self.arm;
        [
            (Point::new(x - a, y - a), Point::new(x + a, y + a)),
            (Point::new(x - a, y + a), Point::new(x + a, y - a)),
        ]
    }
}

/// A barre bar plus the dots drawn at both of its ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarreGeometry {
    pub barre: Barre,
    pub from: Point,
    pub to: Point,
    pub stroke_width: f64,
    pub endpoints: [NoteMarker; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLabel {
    pub content: String,
    pub anchor: Point,
    pub font_size: f64,
    pub align: TextAlign,
}

/// Everything the emitter needs, fully positioned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordLayout {
    pub width: f64,
    pub height: f64,
    pub diagram_width: f64,
    pub diagram_height: f64,
    pub rendered_fret_count: u32,
    pub background: Rect,
    pub top_bar: Rect,
    /// Ordered from string 1 (rightmost) upward.
    pub strings: Vec<Rect>,
    /// Horizontal separators between fret rows, top to bottom.
    pub frets: Vec<Rect>,
    pub open_markers: Vec<OpenMarker>,
    pub mute_markers: Vec<MuteMarker>,
    pub barres: Vec<BarreGeometry>,
    pub notes: Vec<NoteMarker>,
    pub fret_label: Option<TextLabel>,
    pub title: Option<TextLabel>,
}

// ═══════════════════════════════════════════════════════════════════════
// Grid coordinate helpers
// ═══════════════════════════════════════════════════════════════════════

/// Fixed offsets shared by every element of one diagram.
struct Grid<'a> {
    spec: &'a ChordDiagramSpec,
    cfg: &'a LayoutConfig,
    rendered_fret_count: u32,
    /// Top edge of the first fret row (just below the top bar).
    top: f64,
    /// Vertical centre of the open/mute marker row.
    marker_y: f64,
}

impl<'a> Grid<'a> {
    fn new(spec: &'a ChordDiagramSpec, rendered_fret_count: u32) -> Self {
        let cfg = spec.layout();
        let above_markers = cfg.padding + cfg.title_reserved_space();
        Self {
            spec,
            cfg,
            rendered_fret_count,
            top: above_markers + cfg.marker_spacing + cfg.top_line_thickness,
            marker_y: above_markers + cfg.marker_spacing / 2.0,
        }
    }

    /// Strings are mirrored: string 1 is the rightmost column.
    fn column_left(&self, string: u32) -> f64 {
        let index = (self.spec.num_strings() - string) as f64;
        self.cfg.padding + index * (self.cfg.string_spacing + self.cfg.line_thickness)
    }

    fn string_x(&self, string: u32) -> f64 {
        self.column_left(string) + self.cfg.line_thickness / 2.0
    }

    /// Centre of a fret row. Frets above the starting fret land above the grid.
    fn fret_y(&self, fret: u32) -> f64 {
        let index = fret as f64 - self.spec.starting_fret() as f64;
        self.top
            + index * (self.cfg.fret_spacing + self.cfg.line_thickness)
            + self.cfg.fret_spacing / 2.0
    }

    fn is_on_grid(&self, fret: u32) -> bool {
        let first = self.spec.starting_fret();
        fret >= first && fret < first + self.rendered_fret_count
    }

    fn note(&self, string: u32, fret: u32) -> NoteMarker {
        if !self.is_on_grid(fret) {
            log::warn!(
                "fret {} on string {} lies outside the rendered frets {}..{}",
                fret,
                string,
                self.spec.starting_fret(),
                self.spec.starting_fret() + self.rendered_fret_count - 1
            );
        }
        NoteMarker {
            string,
            fret,
            center: Point::new(self.string_x(string), self.fret_y(fret)),
            radius: NOTE_RADIUS_RATIO * self.cfg.marker_spacing,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Size helpers
// ═══════════════════════════════════════════════════════════════════════

/// Width of the string grid; depends only on string count and spacing.
pub fn diagram_width(num_strings: u32, cfg: &LayoutConfig) -> f64 {
    let n = num_strings as f64;
    (n - 1.0) * cfg.string_spacing + n * cfg.line_thickness
}

/// Height of the grid including the top bar.
pub fn diagram_height(rendered_fret_count: u32, cfg: &LayoutConfig) -> f64 {
    let rows = rendered_fret_count as f64;
    rows * cfg.fret_spacing + (rows - 1.0) * cfg.line_thickness + cfg.top_line_thickness
}

// ═══════════════════════════════════════════════════════════════════════
// Main layout computation
// ═══════════════════════════════════════════════════════════════════════

/// Compute canvas size and element positions for a validated spec.
///
/// Fails only with a hand-span error.
pub fn compute_layout(spec: &ChordDiagramSpec) -> Result<ChordLayout> {
    let rendered_fret_count = spec.rendered_fret_count()?;
    let cfg = spec.layout();
    let grid = Grid::new(spec, rendered_fret_count);

    let diagram_width = diagram_width(spec.num_strings(), cfg);
    let diagram_height = diagram_height(rendered_fret_count, cfg);
    let width = 2.0 * cfg.padding + diagram_width;
    let height = 2.0 * cfg.padding
        + diagram_height
        + cfg.marker_spacing
        + cfg.title_reserved_space();

    log::debug!(
        "layout '{}': {} strings x {} frets, canvas {}x{}",
        spec.display_title(),
        spec.num_strings(),
        rendered_fret_count,
        width,
        height
    );

    let top_bar = Rect {
        x: cfg.padding,
        y: grid.top - cfg.top_line_thickness,
        width: diagram_width,
        height: cfg.top_line_thickness,
    };

    let grid_body_height = diagram_height - cfg.top_line_thickness;
    let strings = (1..=spec.num_strings())
        .map(|s| Rect {
            x: grid.column_left(s),
            y: grid.top,
            width: cfg.line_thickness,
            height: grid_body_height,
        })
        .collect();

    let frets = (1..rendered_fret_count)
        .map(|i| Rect {
            x: cfg.padding,
            y: grid.top + i as f64 * cfg.fret_spacing + (i - 1) as f64 * cfg.line_thickness,
            width: diagram_width,
            height: cfg.line_thickness,
        })
        .collect();

    let reach = cfg.marker_spacing * MARKER_REACH_RATIO;

    let open_markers = spec
        .open_strings()
        .into_iter()
        .map(|s| OpenMarker {
            string: s,
            center: Point::new(grid.string_x(s), grid.marker_y),
            outer_radius: reach,
            inner_radius: (reach - cfg.line_thickness).max(0.0),
        })
        .collect();

    let mute_markers = spec
        .muted_strings()
        .iter()
        .map(|&s| MuteMarker {
            string: s,
            center: Point::new(grid.string_x(s), grid.marker_y),
            arm: reach,
            stroke_width: cfg.line_thickness,
        })
        .collect();

    let barres = spec
        .barres()
        .iter()
        .map(|b| {
            let start = grid.note(b.start_string, b.fret);
            let end = grid.note(b.end_string, b.fret);
            BarreGeometry {
                barre: *b,
                from: start.center,
                to: end.center,
                stroke_width: cfg.fret_spacing / BARRE_WIDTH_DIVISOR,
                endpoints: [start, end],
            }
        })
        .collect();

    let notes = spec
        .notes()
        .iter()
        .map(|n| grid.note(n.string, n.fret))
        .collect();

    let fret_label = (spec.starting_fret() != 1).then(|| {
        let font_size = cfg.fret_spacing * FRET_LABEL_FONT_RATIO;
        TextLabel {
            content: format!("{}{}", spec.starting_fret(), FRET_LABEL_SUFFIX),
            anchor: Point::new(
                cfg.padding + diagram_width + cfg.line_thickness,
                grid.fret_y(spec.starting_fret()) + font_size / 3.0,
            ),
            font_size,
            align: TextAlign::Start,
        }
    });

    let title = cfg.show_title.then(|| TextLabel {
        content: spec.display_title().to_string(),
        anchor: Point::new(
            width / 2.0,
            cfg.padding + cfg.title_space * TITLE_BASELINE_RATIO,
        ),
        font_size: TITLE_FONT_SIZE,
        align: TextAlign::Middle,
    });

    Ok(ChordLayout {
        width,
        height,
        diagram_width,
        diagram_height,
        rendered_fret_count,
        background: Rect {
            x: 0.0,
            y: 0.0,
            width,
            height,
        },
        top_bar,
        strings,
        frets,
        open_markers,
        mute_markers,
        barres,
        notes,
        fret_label,
        title,
    })
}
