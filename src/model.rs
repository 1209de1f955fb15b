//! Data model for describing a chord diagram.
//!
//! `ChordInput` is what callers hand in (deserialized from JSON or built
//! fluently); `ChordDiagramSpec` is the validated, immutable value the
//! renderer consumes. The only road from one to the other is
//! [`crate::validate::validate`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ChordError, Result};

// ── Bounds ──────────────────────────────────────────────────────────
pub const MIN_FRET: i32 = 1;
pub const MAX_FRET: i32 = 100;
pub const MAX_STRINGS: i32 = 24;
/// Widest fret span a hand is expected to reach.
pub const MAX_FRET_SPAN: u32 = 6;
/// A diagram always shows at least this many fret rows.
pub const MIN_RENDERED_FRETS: u32 = 4;

// ── Layout defaults (user units) ────────────────────────────────────
pub const DEFAULT_PADDING: f64 = 30.0;
pub const DEFAULT_FRET_SPACING: f64 = 30.0;
pub const DEFAULT_STRING_SPACING: f64 = 20.0;
pub const DEFAULT_LINE_THICKNESS: f64 = 3.0;
pub const DEFAULT_MARKER_SPACING: f64 = 25.0;
pub const DEFAULT_TITLE_SPACE: f64 = 30.0;

/// Title used when the caller leaves it blank.
pub const DEFAULT_TITLE: &str = "new_chord";

// ═══════════════════════════════════════════════════════════════════════
// Raw input
// ═══════════════════════════════════════════════════════════════════════

/// Unvalidated chord parameters.
///
/// Integers are signed so that a negative fret typed into a form reaches
/// the validator and is reported, rather than failing deserialization.
/// Notes are `(string, fret)`, barres are `(fret, start_string, end_string)`.
///
/// Also serves as the builder for [`ChordDiagramSpec`]:
///
/// ```
/// use chordlib::ChordInput;
///
/// let spec = ChordInput::new(6)
///     .starting_fret(2)
///     .note(5, 4)
///     .note(4, 4)
///     .barre(2, 1, 6)
///     .title("B")
///     .build()
///     .unwrap();
/// assert!(spec.open_strings().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordInput {
    pub num_strings: i32,
    #[serde(default = "default_starting_fret")]
    pub starting_fret: i32,
    #[serde(default)]
    pub notes: Vec<(i32, i32)>,
    #[serde(default)]
    pub barres: Vec<(i32, i32, i32)>,
    #[serde(default)]
    pub muted_strings: Vec<i32>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub layout: LayoutOptions,
}

fn default_starting_fret() -> i32 {
    1
}

impl ChordInput {
    pub fn new(num_strings: i32) -> Self {
        Self {
            num_strings,
            starting_fret: default_starting_fret(),
            notes: Vec::new(),
            barres: Vec::new(),
            muted_strings: Vec::new(),
            title: String::new(),
            layout: LayoutOptions::default(),
        }
    }

    pub fn starting_fret(mut self, fret: i32) -> Self {
        self.starting_fret = fret;
        self
    }

    pub fn note(mut self, string: i32, fret: i32) -> Self {
        self.notes.push((string, fret));
        self
    }

    pub fn barre(mut self, fret: i32, start_string: i32, end_string: i32) -> Self {
        self.barres.push((fret, start_string, end_string));
        self
    }

    pub fn mute(mut self, string: i32) -> Self {
        self.muted_strings.push(string);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Validate and freeze into a [`ChordDiagramSpec`].
    pub fn build(self) -> Result<ChordDiagramSpec> {
        crate::validate::validate(self)
    }
}

/// Caller-supplied layout overrides; anything left `None` takes its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub padding: Option<f64>,
    pub fret_spacing: Option<f64>,
    pub string_spacing: Option<f64>,
    pub line_thickness: Option<f64>,
    pub top_line_thickness: Option<f64>,
    pub marker_spacing: Option<f64>,
    pub title_space: Option<f64>,
    pub show_title: Option<bool>,
}

/// Fully resolved layout configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Outer margin on every side of the canvas.
    pub padding: f64,
    /// Vertical distance between fret lines.
    pub fret_spacing: f64,
    /// Horizontal distance between strings.
    pub string_spacing: f64,
    /// Stroke width of strings and frets.
    pub line_thickness: f64,
    /// Thickness of the nut / top bar.
    pub top_line_thickness: f64,
    /// Vertical room above the grid for open and mute symbols.
    pub marker_spacing: f64,
    /// Vertical room reserved for the title.
    pub title_space: f64,
    pub show_title: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutOptions::default().resolve()
    }
}

/// Nut thickness tracks the line thickness once lines get heavy.
pub fn default_top_line_thickness(line_thickness: f64) -> f64 {
    if line_thickness < 5.0 {
        10.0
    } else {
        3.0 * line_thickness
    }
}

impl LayoutOptions {
    /// Fill in defaults. Does not range-check; see `validate`.
    pub fn resolve(&self) -> LayoutConfig {
        let line_thickness = self.line_thickness.unwrap_or(DEFAULT_LINE_THICKNESS);
        LayoutConfig {
            padding: self.padding.unwrap_or(DEFAULT_PADDING),
            fret_spacing: self.fret_spacing.unwrap_or(DEFAULT_FRET_SPACING),
            string_spacing: self.string_spacing.unwrap_or(DEFAULT_STRING_SPACING),
            line_thickness,
            top_line_thickness: self
                .top_line_thickness
                .unwrap_or_else(|| default_top_line_thickness(line_thickness)),
            marker_spacing: self.marker_spacing.unwrap_or(DEFAULT_MARKER_SPACING),
            title_space: self.title_space.unwrap_or(DEFAULT_TITLE_SPACE),
            show_title: self.show_title.unwrap_or(true),
        }
    }
}

impl LayoutConfig {
    /// Vertical space actually reserved for the title.
    pub fn title_reserved_space(&self) -> f64 {
        if self.show_title {
            self.title_space
        } else {
            0.0
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Validated spec
// ═══════════════════════════════════════════════════════════════════════

/// A fretted note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// 1-indexed string number
    pub string: u32,
    /// Absolute fret number
    pub fret: u32,
}

/// One finger across strings `start_string..=end_string` at `fret`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barre {
    pub fret: u32,
    pub start_string: u32,
    pub end_string: u32,
}

impl Barre {
    pub fn covers(&self, string: u32) -> bool {
        (self.start_string..=self.end_string).contains(&string)
    }
}

/// A validated, immutable chord diagram description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordDiagramSpec {
    pub(crate) num_strings: u32,
    pub(crate) starting_fret: u32,
    pub(crate) notes: Vec<Note>,
    pub(crate) barres: Vec<Barre>,
    pub(crate) muted_strings: BTreeSet<u32>,
    pub(crate) title: String,
    pub(crate) layout: LayoutConfig,
}

impl ChordDiagramSpec {
    pub fn num_strings(&self) -> u32 {
        self.num_strings
    }

    pub fn starting_fret(&self) -> u32 {
        self.starting_fret
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn barres(&self) -> &[Barre] {
        &self.barres
    }

    pub fn muted_strings(&self) -> &BTreeSet<u32> {
        &self.muted_strings
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Title as drawn: the caller's title, or `new_chord` when blank.
    pub fn display_title(&self) -> &str {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            DEFAULT_TITLE
        } else {
            trimmed
        }
    }

    /// Every fret touched by a note or barre.
    fn fretted_positions(&self) -> impl Iterator<Item = u32> + '_ {
        self.notes
            .iter()
            .map(|n| n.fret)
            .chain(self.barres.iter().map(|b| b.fret))
    }

    /// Lowest fret touched by a note or barre, if any.
    pub fn min_fret(&self) -> Option<u32> {
        self.fretted_positions().min()
    }

    /// Max fret minus min fret across notes and barres; 0 when empty.
    /// Fails when the span is wider than a hand can stretch.
    pub fn max_fret_distance(&self) -> Result<u32> {
        let (min, max) = match (self.fretted_positions().min(), self.fretted_positions().max()) {
            (Some(min), Some(max)) => (min, max),
            _ => return Ok(0),
        };
        let span = max - min;
        if span > MAX_FRET_SPAN {
            return Err(ChordError::HandSpan {
                span,
                max: MAX_FRET_SPAN,
            });
        }
        Ok(span)
    }

    /// Number of fret rows drawn: never fewer than four.
    pub fn rendered_fret_count(&self) -> Result<u32> {
        Ok(self.max_fret_distance()?.max(MIN_RENDERED_FRETS))
    }

    /// Strings with no note, no barre over them and no mute.
    pub fn open_strings(&self) -> BTreeSet<u32> {
        (1..=self.num_strings)
            .filter(|s| !self.notes.iter().any(|n| n.string == *s))
            .filter(|s| !self.barres.iter().any(|b| b.covers(*s)))
            .filter(|s| !self.muted_strings.contains(s))
            .collect()
    }

    /// A builder pre-filled with this spec, for producing an edited copy.
    pub fn to_input(&self) -> ChordInput {
        let l = &self.layout;
        ChordInput {
            num_strings: self.num_strings as i32,
            starting_fret: self.starting_fret as i32,
            notes: self
                .notes
                .iter()
                .map(|n| (n.string as i32, n.fret as i32))
                .collect(),
            barres: self
                .barres
                .iter()
                .map(|b| (b.fret as i32, b.start_string as i32, b.end_string as i32))
                .collect(),
            muted_strings: self.muted_strings.iter().map(|s| *s as i32).collect(),
            title: self.title.clone(),
            layout: LayoutOptions {
                padding: Some(l.padding),
                fret_spacing: Some(l.fret_spacing),
                string_spacing: Some(l.string_spacing),
                line_thickness: Some(l.line_thickness),
                top_line_thickness: Some(l.top_line_thickness),
                marker_spacing: Some(l.marker_spacing),
                title_space: Some(l.title_space),
                show_title: Some(l.show_title),
            },
        }
    }
}
