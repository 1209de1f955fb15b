//! Form grid → chord input.
//!
//! The creation form lays out one row per fret and one column per string,
//! with the highest-numbered string in the leftmost column. Cells hold
//! `n` (note), `b` (barre) or nothing; a separate row holds `x` for muted
//! strings.

use serde::{Deserialize, Serialize};

use crate::error::{ChordError, Result};
use crate::model::{ChordInput, LayoutOptions, MAX_FRET};
use crate::validate::{check_fret, check_num_strings};

const NOTE_CELL: &str = "n";
const BARRE_CELL: &str = "b";
const MUTE_CELL: &str = "x";

/// Chord data as gathered from the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordGrid {
    #[serde(default)]
    pub title: String,
    pub starting_fret: i32,
    pub num_strings: usize,
    pub num_frets: usize,
    /// Fret-major, string-minor cells.
    pub grid: Vec<Vec<String>>,
    #[serde(default)]
    pub muted: Vec<String>,
    #[serde(default)]
    pub layout: LayoutOptions,
}

impl ChordGrid {
    /// Map cells to notes, barres and mutes. Only the string count and
    /// starting fret are range-checked here, since row frets are derived
    /// from them; everything else is left to validation.
    pub fn to_input(&self) -> Result<ChordInput> {
        check_num_strings(i64::try_from(self.num_strings).unwrap_or(i64::MAX))?;
        check_fret("Starting fret", self.starting_fret)?;
        self.check_shape()?;

        let mut input = ChordInput::new(self.num_strings as i32)
            .starting_fret(self.starting_fret)
            .title(self.title.clone())
            .layout(self.layout.clone());

        for (row_idx, row) in self.grid.iter().enumerate() {
            let fret = i32::try_from(row_idx)
                .ok()
                .and_then(|offset| self.starting_fret.checked_add(offset))
                .ok_or_else(|| {
                    ChordError::range("Grid row fret", row_idx as i64, 1, MAX_FRET as i64)
                })?;
            let mut run_start: Option<i32> = None;

            // Walk from string 1 (rightmost column) toward the highest string.
            for (col_idx, cell) in row.iter().enumerate().rev() {
                let string = self.string_for_column(col_idx);
                match cell.trim() {
                    BARRE_CELL => {
                        run_start.get_or_insert(string);
                    }
                    NOTE_CELL => {
                        if let Some(start) = run_start.take() {
                            input = input.barre(fret, start, string - 1);
                        }
                        input = input.note(string, fret);
                    }
                    "" => {
                        if let Some(start) = run_start.take() {
                            input = input.barre(fret, start, string - 1);
                        }
                    }
                    other => {
                        return Err(ChordError::InvalidCell {
                            row: row_idx,
                            column: col_idx,
                            value: other.to_string(),
                            allowed: "'b', 'n' or empty",
                        });
                    }
                }
            }
            if let Some(start) = run_start {
                input = input.barre(fret, start, self.num_strings as i32);
            }
        }

        for (col_idx, cell) in self.muted.iter().enumerate() {
            match cell.trim() {
                MUTE_CELL => input = input.mute(self.string_for_column(col_idx)),
                "" => {}
                other => {
                    return Err(ChordError::InvalidCell {
                        row: 0,
                        column: col_idx,
                        value: other.to_string(),
                        allowed: "'x' or empty",
                    });
                }
            }
        }

        Ok(input)
    }

    fn string_for_column(&self, col_idx: usize) -> i32 {
        (self.num_strings - col_idx) as i32
    }

    fn check_shape(&self) -> Result<()> {
        if self.grid.len() != self.num_frets {
            return Err(ChordError::GridShape(format!(
                "expected {} fret rows, got {}",
                self.num_frets,
                self.grid.len()
            )));
        }
        for (i, row) in self.grid.iter().enumerate() {
            if row.len() != self.num_strings {
                return Err(ChordError::GridShape(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    self.num_strings
                )));
            }
        }
        // An absent mute row means nothing is muted.
        if !self.muted.is_empty() && self.muted.len() != self.num_strings {
            return Err(ChordError::GridShape(format!(
                "mute row has {} cells, expected {}",
                self.muted.len(),
                self.num_strings
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid(rows: &[&[&str]], muted: &[&str]) -> ChordGrid {
        ChordGrid {
            title: "test".into(),
            starting_fret: 1,
            num_strings: rows.first().map_or(0, |r| r.len()),
            num_frets: rows.len(),
            grid: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
            muted: muted.iter().map(|c| c.to_string()).collect(),
            layout: LayoutOptions::default(),
        }
    }

    #[test]
    fn columns_map_to_reversed_strings() {
        // Leftmost column is string 6.
        let g = grid(
            &[
                &["", "", "", "", "", "n"],
                &["", "", "", "n", "", ""],
                &["", "n", "", "", "", ""],
                &["", "", "", "", "", ""],
            ],
            &["x", "", "", "", "", ""],
        );
        let input = g.to_input().unwrap();
        assert_eq!(input.notes, vec![(1, 1), (3, 2), (5, 3)]);
        assert_eq!(input.muted_strings, vec![6]);
        assert!(input.barres.is_empty());
    }

    #[test]
    fn full_row_barre() {
        let mut g = grid(
            &[
                &["b", "b", "b", "b", "b", "b"],
                &["", "", "", "", "", ""],
                &["", "n", "n", "", "", ""],
                &["", "", "", "", "", ""],
            ],
            &[],
        );
        g.starting_fret = 2;
        let input = g.to_input().unwrap();
        assert_eq!(input.barres, vec![(2, 1, 6)]);
        assert_eq!(input.notes, vec![(4, 4), (5, 4)]);
    }

    #[test]
    fn barre_runs_split_by_empty_and_note_cells() {
        let g = grid(
            &[
                &["b", "b", "", "b", "b", "b"],
                &["b", "b", "n", "", "", ""],
                &["", "", "", "", "", ""],
                &["", "", "", "", "", ""],
            ],
            &[],
        );
        let input = g.to_input().unwrap();
        assert_eq!(input.barres, vec![(1, 1, 3), (1, 5, 6), (2, 5, 6)]);
        assert_eq!(input.notes, vec![(4, 2)]);
    }

    #[test]
    fn single_barre_cell_fails_validation() {
        let g = grid(
            &[
                &["", "", "", "", "", "b"],
                &["", "", "", "", "", ""],
                &["", "", "", "", "", ""],
                &["", "", "", "", "", ""],
            ],
            &[],
        );
        let input = g.to_input().unwrap();
        assert_eq!(input.barres, vec![(1, 1, 1)]);
        assert!(matches!(
            input.build(),
            Err(ChordError::InvalidBarre { .. })
        ));
    }

    #[test]
    fn unknown_markers_rejected() {
        let g = grid(&[&["", "q", "", ""]], &[]);
        assert!(matches!(
            g.to_input(),
            Err(ChordError::InvalidCell { row: 0, column: 1, .. })
        ));

        let g = grid(&[&["", "", "", ""]], &["", "o", "", ""]);
        assert!(matches!(
            g.to_input(),
            Err(ChordError::InvalidCell { column: 1, .. })
        ));
    }

    #[test]
    fn shape_mismatch_rejected() {
        let mut g = grid(&[&["", "", "", ""]], &[]);
        g.num_frets = 4;
        assert!(matches!(g.to_input(), Err(ChordError::GridShape(_))));

        let mut g = grid(&[&["", "", "", ""]], &[]);
        g.grid[0].pop();
        assert!(matches!(g.to_input(), Err(ChordError::GridShape(_))));
    }

    #[test]
    fn huge_starting_fret_is_a_range_error() {
        let mut g = grid(&[&["", "", "", ""], &["", "n", "", ""]], &[]);
        g.starting_fret = i32::MAX;
        assert_eq!(
            g.to_input(),
            Err(ChordError::range("Starting fret", i32::MAX as i64, 1, 100))
        );
    }

    #[test]
    fn huge_string_count_is_a_range_error() {
        let mut g = grid(&[&["", "", "", ""]], &[]);
        g.num_strings = usize::MAX;
        assert!(matches!(
            g.to_input(),
            Err(ChordError::Range { max: 24, .. })
        ));
    }

    #[test]
    fn whitespace_cells_are_trimmed() {
        let g = grid(&[&[" ", "n ", "", ""]], &[" x", "", "", ""]);
        let input = g.to_input().unwrap();
        assert_eq!(input.notes, vec![(3, 1)]);
        assert_eq!(input.muted_strings, vec![4]);
    }
}
