//! Shared constants for the chord renderer (all in SVG user units).

// ── Markers ─────────────────────────────────────────────────────────
pub(super) const NOTE_RADIUS_RATIO: f64 = 0.229; // note radius / marker spacing
pub(super) const MARKER_REACH_RATIO: f64 = 1.0 / 3.0; // open ring radius, half an X arm
pub(super) const BARRE_WIDTH_DIVISOR: f64 = 2.5; // barre stroke = fret spacing / this

// ── Text ────────────────────────────────────────────────────────────
pub(super) const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
pub(super) const TITLE_FONT_SIZE: f64 = 20.0;
pub(super) const TITLE_BASELINE_RATIO: f64 = 0.75; // of the title space
pub(super) const FRET_LABEL_FONT_RATIO: f64 = 0.5; // of the fret spacing
pub(super) const FRET_LABEL_SUFFIX: &str = "fr";

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const BACKGROUND_COLOR: &str = "#ffffff";
pub(super) const GRID_COLOR: &str = "#000000";
pub(super) const NOTE_COLOR: &str = "#000000";
pub(super) const TEXT_COLOR: &str = "#000000";
