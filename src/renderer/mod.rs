//! Chord renderer — converts a validated spec into drawing primitives and SVG.
//!
//! The pipeline is strictly forward: `compute_layout` positions every
//! element, `emit` flattens the geometry into an ordered primitive list,
//! and any [`Canvas`] (such as [`SvgBuilder`]) materializes it.

mod constants;
mod layout;
mod primitives;
mod svg_builder;

pub use layout::{
    compute_layout, diagram_height, diagram_width, BarreGeometry, ChordLayout, MuteMarker,
    NoteMarker, OpenMarker, Rect, TextLabel,
};
pub use primitives::{emit, Canvas, Drawing, Point, Primitive, Stroke, TextAlign};
pub use svg_builder::SvgBuilder;

use rayon::prelude::*;

use crate::error::Result;
use crate::model::ChordDiagramSpec;

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Layout and emit in one step.
pub fn render_chord(spec: &ChordDiagramSpec) -> Result<Drawing> {
    Ok(emit(&compute_layout(spec)?))
}

/// Serialize a finished drawing as a standalone SVG document.
pub fn drawing_to_svg(drawing: &Drawing) -> String {
    let mut svg = SvgBuilder::new();
    drawing.replay(&mut svg);
    svg.build()
}

/// Render a validated spec into a complete SVG string.
pub fn render_chord_to_svg(spec: &ChordDiagramSpec) -> Result<String> {
    Ok(drawing_to_svg(&render_chord(spec)?))
}

/// Render many diagrams on the rayon pool; results keep input order.
pub fn render_batch(specs: &[ChordDiagramSpec]) -> Vec<Result<Drawing>> {
    specs.par_iter().map(render_chord).collect()
}
