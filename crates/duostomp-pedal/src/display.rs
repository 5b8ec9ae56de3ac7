//! 16x2 character display frame.
//!
//! ```text
//! Revrb##||##  Sqr
//! Mix Sze||Mix
//! ```
//!
//! Line 1 holds slot 2's name, two activity glyphs per slot and slot 1's name
//! (right aligned). Line 2 holds each slot's knob label. [`GLYPH_ACTIVE`]
//! stands for the display's solid block; a driver maps it to its custom
//! character.

use core::fmt;

use crate::slot::{Slot1State, Slot2State, Variant};

/// Character columns.
pub const DISPLAY_COLS: usize = 16;

/// Character rows.
pub const DISPLAY_ROWS: usize = 2;

/// Glyph drawn for an active slot.
pub const GLYPH_ACTIVE: u8 = b'#';

/// Separator between the slot 2 and slot 1 halves.
const DIVIDER: &str = "||";

const NAME_WIDTH: usize = 5;
const LABEL_WIDTH: usize = 7;

/// One full display frame of ASCII characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFrame {
    rows: [[u8; DISPLAY_COLS]; DISPLAY_ROWS],
}

impl DisplayFrame {
    /// Renders the frame for the current slot states.
    pub fn render(slot1: &Slot1State, slot2: &Slot2State) -> Self {
        let mut rows = [[b' '; DISPLAY_COLS]; DISPLAY_ROWS];

        let top = &mut rows[0];
        let mut col = put_left(top, 0, NAME_WIDTH, slot2.variant.label());
        col = put_glyphs(top, col, slot2.active);
        col = put_left(top, col, DIVIDER.len(), DIVIDER);
        col = put_glyphs(top, col, slot1.slot.active);
        put_right(top, col, NAME_WIDTH, slot1.slot.variant.label());

        let bottom = &mut rows[1];
        let mut col = put_left(bottom, 0, LABEL_WIDTH, slot2.variant.knob_label());
        col = put_left(bottom, col, DIVIDER.len(), DIVIDER);
        put_left(bottom, col, LABEL_WIDTH, slot1.knob_label());

        Self { rows }
    }

    /// Raw characters, row by row.
    pub fn rows(&self) -> &[[u8; DISPLAY_COLS]; DISPLAY_ROWS] {
        &self.rows
    }
}

impl fmt::Display for DisplayFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for &c in row {
                fmt::Write::write_char(f, char::from(c))?;
            }
        }
        Ok(())
    }
}

/// Receives one frame per control tick.
pub trait DisplaySink {
    /// Shows a frame.
    fn show(&mut self, frame: &DisplayFrame);
}

impl DisplaySink for () {
    fn show(&mut self, _frame: &DisplayFrame) {}
}

fn put_left(row: &mut [u8; DISPLAY_COLS], col: usize, width: usize, text: &str) -> usize {
    for (dst, &src) in row[col..col + width].iter_mut().zip(text.as_bytes()) {
        *dst = src;
    }
    col + width
}

fn put_right(row: &mut [u8; DISPLAY_COLS], col: usize, width: usize, text: &str) -> usize {
    let len = text.len().min(width);
    put_left(row, col + width - len, len, text);
    col + width
}

fn put_glyphs(row: &mut [u8; DISPLAY_COLS], col: usize, active: bool) -> usize {
    let glyph = if active { GLYPH_ACTIVE } else { b' ' };
    row[col] = glyph;
    row[col + 1] = glyph;
    col + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{KnobTarget, Slot1Variant, Slot2Variant};

    fn lines(frame: &DisplayFrame) -> [String; 2] {
        let text = frame.to_string();
        let mut it = text.lines().map(String::from);
        [it.next().unwrap(), it.next().unwrap()]
    }

    #[test]
    fn test_boot_frame() {
        let frame = DisplayFrame::render(&Slot1State::new(false), &Slot2State::new(false));
        assert_eq!(lines(&frame), ["Revrb  ||    Sqr", "Mix Sze||Mix    "]);
    }

    #[test]
    fn test_rows_are_full_width() {
        let mut s1 = Slot1State::new(true);
        let mut s2 = Slot2State::new(true);
        for v in Slot1Variant::ALL {
            s1.slot.variant = *v;
            for w in Slot2Variant::ALL {
                s2.variant = *w;
                for l in lines(&DisplayFrame::render(&s1, &s2)) {
                    assert_eq!(l.len(), DISPLAY_COLS, "{l:?}");
                }
            }
        }
    }

    #[test]
    fn test_active_glyphs_and_filter_label() {
        let mut s1 = Slot1State::new(true);
        s1.slot.variant = Slot1Variant::PitchUp;
        s1.knob_target = KnobTarget::Filters;
        let mut s2 = Slot2State::new(true);
        s2.variant = Slot2Variant::Modulation;

        let frame = DisplayFrame::render(&s1, &s2);
        assert_eq!(lines(&frame), ["LFO  ##||##PchUp", "Rng Spd||LPF HPF"]);
    }
}
