//! Validation and layout properties over hand-built chords.

use chordlib::renderer::{diagram_width, render_batch};
use chordlib::{compute_layout, render_chord, ChordDiagramSpec, ChordError, ChordInput, LayoutConfig};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn six() -> ChordInput {
    ChordInput::new(6)
}

// ─── Scenarios ──────────────────────────────────────────────────────

#[test]
fn open_strings_with_notes_barre_and_mute() {
    let spec = six()
        .note(5, 3)
        .note(4, 3)
        .barre(1, 1, 2)
        .mute(3)
        .build()
        .unwrap();
    assert_eq!(spec.open_strings(), BTreeSet::from([6]));
}

#[test]
fn full_barre_leaves_no_open_strings() {
    let spec = six()
        .starting_fret(2)
        .note(5, 4)
        .note(4, 4)
        .barre(2, 1, 6)
        .build()
        .unwrap();
    assert!(spec.open_strings().is_empty());
}

#[test]
fn span_of_six_is_allowed() {
    let spec = six().note(1, 1).note(1, 7).build().unwrap();
    assert_eq!(spec.max_fret_distance(), Ok(6));
    let layout = compute_layout(&spec).unwrap();
    assert_eq!(layout.rendered_fret_count, 6);
}

#[test]
fn span_of_seven_is_rejected() {
    for starting_fret in [1, 2, 50] {
        let err = six()
            .starting_fret(starting_fret)
            .note(1, 1)
            .note(1, 8)
            .build()
            .unwrap_err();
        assert_eq!(err, ChordError::HandSpan { span: 7, max: 6 });
    }
}

#[test]
fn span_counts_barres_too() {
    let err = six().note(1, 10).barre(3, 2, 4).build().unwrap_err();
    assert!(matches!(err, ChordError::HandSpan { span: 7, .. }));
}

#[test]
fn reversed_barre_is_rejected() {
    for n in 4..=12 {
        let err = ChordInput::new(n).barre(3, 4, 2).build().unwrap_err();
        assert!(matches!(err, ChordError::InvalidBarre { start: 4, end: 2, .. }), "{err:?}");
    }
}

#[test]
fn equal_barre_ends_are_rejected() {
    assert!(matches!(
        ChordInput::new(6).barre(3, 2, 2).build(),
        Err(ChordError::InvalidBarre { .. })
    ));
}

// ─── Derived quantities ─────────────────────────────────────────────

#[test]
fn empty_chord_renders_four_frets() {
    let spec = six().build().unwrap();
    assert_eq!(spec.max_fret_distance(), Ok(0));
    assert_eq!(spec.rendered_fret_count(), Ok(4));
    assert_eq!(spec.open_strings(), (1..=6).collect::<BTreeSet<_>>());
}

#[test]
fn rendered_frets_track_span() {
    for (low, high, expected) in [(1, 1, 4), (1, 4, 4), (3, 8, 5), (10, 16, 6)] {
        let spec = six().note(1, low).note(2, high).build().unwrap();
        assert_eq!(spec.rendered_fret_count(), Ok(expected), "{low}..{high}");
    }
}

#[test]
fn open_strings_ignore_input_order() {
    let a = six()
        .note(2, 1)
        .note(4, 2)
        .barre(3, 5, 6)
        .mute(1)
        .build()
        .unwrap();
    let b = six()
        .mute(1)
        .barre(3, 5, 6)
        .note(4, 2)
        .note(2, 1)
        .build()
        .unwrap();
    assert_eq!(a.open_strings(), b.open_strings());
    assert_eq!(a.open_strings(), BTreeSet::from([3]));
}

#[test]
fn diagram_width_ignores_content() {
    let cfg = LayoutConfig::default();
    let expected = diagram_width(6, &cfg);
    let specs = [
        six().build().unwrap(),
        six().starting_fret(7).note(3, 9).title("long title here").build().unwrap(),
        six().barre(5, 1, 6).mute(6).build().unwrap(),
    ];
    for spec in &specs {
        assert_eq!(compute_layout(spec).unwrap().diagram_width, expected);
    }
}

// ─── Determinism ────────────────────────────────────────────────────

fn busy_chord() -> ChordDiagramSpec {
    six()
        .starting_fret(5)
        .note(5, 7)
        .note(4, 7)
        .barre(5, 1, 6)
        .title("A (5th pos)")
        .build()
        .unwrap()
}

#[test]
fn rendering_is_deterministic() {
    let spec = busy_chord();
    let first = render_chord(&spec).unwrap();
    let second = render_chord(&spec).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        chordlib::drawing_to_svg(&first),
        chordlib::drawing_to_svg(&second)
    );
}

#[test]
fn batch_matches_sequential() {
    let specs = vec![
        busy_chord(),
        six().note(1, 2).build().unwrap(),
        ChordInput::new(4).mute(4).build().unwrap(),
    ];
    let batch = render_batch(&specs);
    assert_eq!(batch.len(), specs.len());
    for (spec, drawing) in specs.iter().zip(batch) {
        assert_eq!(drawing, render_chord(spec));
    }
}
