//! Validator — turns raw `ChordInput` into an immutable `ChordDiagramSpec`.
//!
//! Checks run in a fixed order and the first violation is returned; no
//! partial spec is ever produced.

use std::collections::BTreeSet;

use crate::error::{ChordError, Result};
use crate::model::*;

/// Validate raw chord parameters, applying layout defaults.
pub fn validate(input: ChordInput) -> Result<ChordDiagramSpec> {
    let result = check(input);
    if let Err(ref e) = result {
        log::debug!("chord rejected: {e}");
    }
    result
}

fn check(input: ChordInput) -> Result<ChordDiagramSpec> {
    check_num_strings(input.num_strings as i64)?;
    let num_strings = input.num_strings as u32;

    check_fret("Starting fret", input.starting_fret)?;

    let layout = input.layout.resolve();
    check_layout(&layout)?;

    let mut notes = Vec::with_capacity(input.notes.len());
    for &(string, fret) in &input.notes {
        if string < 1 || string > input.num_strings {
            return Err(ChordError::range(
                format!("Entry [{string}, {fret}] string"),
                string as i64,
                1,
                input.num_strings as i64,
            ));
        }
        check_fret(&format!("Entry [{string}, {fret}] fret"), fret)?;
        notes.push(Note {
            string: string as u32,
            fret: fret as u32,
        });
    }

    let mut barres = Vec::with_capacity(input.barres.len());
    for &(fret, start, end) in &input.barres {
        check_fret(&format!("Barre [{fret}, {start}, {end}] fret"), fret)?;
        let invalid = |reason: String| ChordError::InvalidBarre {
            fret,
            start,
            end,
            reason,
        };
        if end <= start {
            return Err(invalid(
                "ending string must be strictly greater than starting string".into(),
            ));
        }
        if end > input.num_strings {
            return Err(invalid(format!(
                "ending string is out of bounds (max {})",
                input.num_strings
            )));
        }
        if start < 1 {
            return Err(invalid("starting string is out of bounds (min 1)".into()));
        }
        barres.push(Barre {
            fret: fret as u32,
            start_string: start as u32,
            end_string: end as u32,
        });
    }

    let mut muted_strings = BTreeSet::new();
    for &string in &input.muted_strings {
        if string < 1 || string > input.num_strings {
            return Err(ChordError::range(
                "Muted string",
                string as i64,
                1,
                input.num_strings as i64,
            ));
        }
        muted_strings.insert(string as u32);
    }

    let spec = ChordDiagramSpec {
        num_strings,
        starting_fret: input.starting_fret as u32,
        notes,
        barres,
        muted_strings,
        title: input.title,
        layout,
    };

    // Fail fast on the hand span; the geometry stage checks again.
    spec.max_fret_distance()?;

    Ok(spec)
}

pub(crate) fn check_num_strings(num_strings: i64) -> Result<()> {
    if !(1..=MAX_STRINGS as i64).contains(&num_strings) {
        return Err(ChordError::range(
            "Number of strings",
            num_strings,
            1,
            MAX_STRINGS as i64,
        ));
    }
    Ok(())
}

pub(crate) fn check_fret(field: &str, fret: i32) -> Result<()> {
    if !(MIN_FRET..=MAX_FRET).contains(&fret) {
        return Err(ChordError::range(
            field,
            fret as i64,
            MIN_FRET as i64,
            MAX_FRET as i64,
        ));
    }
    Ok(())
}

fn check_layout(layout: &LayoutConfig) -> Result<()> {
    let options = [
        ("padding", layout.padding),
        ("fret_spacing", layout.fret_spacing),
        ("string_spacing", layout.string_spacing),
        ("line_thickness", layout.line_thickness),
        ("top_line_thickness", layout.top_line_thickness),
        ("marker_spacing", layout.marker_spacing),
    ];
    for (option, value) in options {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChordError::InvalidLayout { option, value });
        }
    }
    // Title space may be zero; it is simply not reserved then.
    if !layout.title_space.is_finite() || layout.title_space < 0.0 {
        return Err(ChordError::InvalidLayout {
            option: "title_space",
            value: layout.title_space,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starting_fret_bounds() {
        assert!(ChordInput::new(6).starting_fret(1).build().is_ok());
        assert!(ChordInput::new(6).starting_fret(100).build().is_ok());
        assert_eq!(
            ChordInput::new(6).starting_fret(0).build(),
            Err(ChordError::range("Starting fret", 0, 1, 100))
        );
        assert!(matches!(
            ChordInput::new(6).starting_fret(101).build(),
            Err(ChordError::Range { value: 101, .. })
        ));
    }

    #[test]
    fn note_string_capped_at_num_strings() {
        assert!(ChordInput::new(6).note(6, 1).build().is_ok());
        let err = ChordInput::new(6).note(7, 1).build().unwrap_err();
        assert!(matches!(err, ChordError::Range { value: 7, max: 6, .. }));
        assert!(err.to_string().contains("[7, 1]"), "message: {err}");
    }

    #[test]
    fn note_fret_bounds() {
        assert!(matches!(
            ChordInput::new(6).note(1, 0).build(),
            Err(ChordError::Range { value: 0, .. })
        ));
        assert!(matches!(
            ChordInput::new(6).note(1, -3).build(),
            Err(ChordError::Range { value: -3, .. })
        ));
        assert!(matches!(
            ChordInput::new(6).note(1, 101).build(),
            Err(ChordError::Range { value: 101, .. })
        ));
    }

    #[test]
    fn barre_checks() {
        assert!(matches!(
            ChordInput::new(6).barre(0, 1, 6).build(),
            Err(ChordError::Range { value: 0, .. })
        ));
        assert!(matches!(
            ChordInput::new(6).barre(2, 3, 3).build(),
            Err(ChordError::InvalidBarre { .. })
        ));
        assert!(matches!(
            ChordInput::new(6).barre(2, 1, 7).build(),
            Err(ChordError::InvalidBarre { end: 7, .. })
        ));
        assert!(matches!(
            ChordInput::new(6).barre(2, 0, 6).build(),
            Err(ChordError::InvalidBarre { start: 0, .. })
        ));
    }

    #[test]
    fn muted_string_bounds() {
        assert!(matches!(
            ChordInput::new(4).mute(5).build(),
            Err(ChordError::Range { value: 5, .. })
        ));
        assert!(matches!(
            ChordInput::new(4).mute(0).build(),
            Err(ChordError::Range { value: 0, .. })
        ));
    }

    #[test]
    fn duplicate_mutes_collapse() {
        let spec = ChordInput::new(6).mute(6).mute(6).build().unwrap();
        assert_eq!(spec.muted_strings().len(), 1);
    }

    #[test]
    fn zero_strings_rejected() {
        assert!(matches!(
            ChordInput::new(0).build(),
            Err(ChordError::Range { value: 0, .. })
        ));
    }

    #[test]
    fn string_count_is_capped() {
        assert!(ChordInput::new(MAX_STRINGS).build().is_ok());
        assert_eq!(
            ChordInput::new(100_000_000).build(),
            Err(ChordError::range("Number of strings", 100_000_000, 1, 24))
        );
    }

    #[test]
    fn bad_layout_rejected() {
        let opts = LayoutOptions {
            fret_spacing: Some(-1.0),
            ..Default::default()
        };
        assert_eq!(
            ChordInput::new(6).layout(opts).build(),
            Err(ChordError::InvalidLayout {
                option: "fret_spacing",
                value: -1.0
            })
        );
        let opts = LayoutOptions {
            padding: Some(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            ChordInput::new(6).layout(opts).build(),
            Err(ChordError::InvalidLayout { option: "padding", .. })
        ));
    }

    #[test]
    fn first_violation_wins() {
        // Bad starting fret is reported before the bad note.
        let err = ChordInput::new(6)
            .starting_fret(0)
            .note(9, 1)
            .build()
            .unwrap_err();
        assert!(err.to_string().starts_with("Starting fret"), "message: {err}");
    }
}
