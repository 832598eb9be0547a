//! Width resolution policy.
//!
//! `Condition` is the pair of flags that decide how ambiguous and emoji code
//! points are measured, plus the table-driven evaluation itself. Rules are
//! tried in order and the first match wins:
//!
//! 1. Controls, the non-printing table and the combining table: 0.
//! 2. Double-width table: 2.
//! 3. Ambiguous table: 2 with East Asian width, else 1.
//! 4. Emoji table: 2 with East Asian width and without strict emoji
//!    neutrality, else fall through.
//! 5. Narrow table: 1.
//! 6. Neutral table: 1.
//! 7. Anything else: 1.
//!
//! Rules 5 through 7 all resolve to 1, so evaluation stops after rule 4.

use crate::interval::{MAX_CODE_POINT, in_tables};
use crate::tables::{AMBIGUOUS, COMBINING, DOUBLEWIDTH, EMOJI, NONPRINT};

/// Flags controlling ambiguous and emoji widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Condition {
    /// Treat East Asian Ambiguous characters as wide.
    pub east_asian_width: bool,
    /// Keep emoji presentation characters narrow even under East Asian width.
    pub strict_emoji_neutral: bool,
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            east_asian_width: false,
            strict_emoji_neutral: true,
        }
    }
}

impl Condition {
    pub const fn new(east_asian_width: bool, strict_emoji_neutral: bool) -> Self {
        Self {
            east_asian_width,
            strict_emoji_neutral,
        }
    }

    #[must_use]
    pub const fn with_east_asian_width(mut self, on: bool) -> Self {
        self.east_asian_width = on;
        self
    }

    #[must_use]
    pub const fn with_strict_emoji_neutral(mut self, on: bool) -> Self {
        self.strict_emoji_neutral = on;
        self
    }

    /// Cell width of `r` evaluated against the interval tables.
    ///
    /// Total over `u32`: anything past `U+10FFFF` is 0.
    pub fn width(&self, r: u32) -> u8 {
        match r {
            0x00..=0x1F | 0x7F..=0x9F | 0xAD => return 0,
            0x20..=0x7E => return 1,
            _ if r > MAX_CODE_POINT => return 0,
            _ => {}
        }
        if in_tables(r, &[&NONPRINT, &COMBINING]) {
            return 0;
        }
        if DOUBLEWIDTH.contains(r) {
            return 2;
        }
        if AMBIGUOUS.contains(r) {
            return if self.east_asian_width { 2 } else { 1 };
        }
        if self.east_asian_width && !self.strict_emoji_neutral && EMOJI.contains(r) {
            return 2;
        }
        // narrow, neutral, unlisted
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EA_OFF: Condition = Condition::new(false, true);
    const EA_ON: Condition = Condition::new(true, true);
    const EA_ON_LOOSE: Condition = Condition::new(true, false);

    fn w(c: &Condition, ch: char) -> u8 {
        c.width(ch as u32)
    }

    #[test]
    fn defaults() {
        let c = Condition::default();
        assert!(!c.east_asian_width);
        assert!(c.strict_emoji_neutral);
        assert_eq!(c, EA_OFF);
    }

    #[test]
    fn builders_replace_single_flag() {
        let c = Condition::default().with_east_asian_width(true);
        assert_eq!(c, EA_ON);
        assert_eq!(c.with_strict_emoji_neutral(false), EA_ON_LOOSE);
    }

    #[test]
    fn cjk_is_wide_in_every_mode() {
        for c in [EA_OFF, EA_ON, EA_ON_LOOSE] {
            assert_eq!(w(&c, '世'), 2);
            assert_eq!(w(&c, '界'), 2);
        }
    }

    #[test]
    fn controls_and_marks_are_zero() {
        for c in [EA_OFF, EA_ON, EA_ON_LOOSE] {
            assert_eq!(w(&c, '\x00'), 0);
            assert_eq!(w(&c, '\x01'), 0);
            assert_eq!(w(&c, '\u{7F}'), 0);
            assert_eq!(w(&c, '\u{AD}'), 0);
            assert_eq!(w(&c, '\u{0300}'), 0);
            assert_eq!(w(&c, '\u{2028}'), 0);
            assert_eq!(w(&c, '\u{2029}'), 0);
        }
    }

    #[test]
    fn halfwidth_katakana_stays_narrow() {
        for c in [EA_OFF, EA_ON, EA_ON_LOOSE] {
            assert_eq!(w(&c, 'ｾ'), 1);
            assert_eq!(w(&c, 'ｶ'), 1);
            assert_eq!(w(&c, 'ｲ'), 1);
        }
    }

    #[test]
    fn ambiguous_follows_east_asian_flag() {
        assert_eq!(w(&EA_OFF, '☆'), 1);
        assert_eq!(w(&EA_ON, '☆'), 2);
        assert_eq!(w(&EA_OFF, '↔'), 1);
        assert_eq!(w(&EA_ON, '↔'), 2);
    }

    #[test]
    fn emoji_only_widen_without_strict_neutral() {
        assert_eq!(w(&EA_OFF, '👁'), 1);
        assert_eq!(w(&EA_ON, '👁'), 1);
        assert_eq!(w(&EA_ON_LOOSE, '👁'), 2);
        // Strict flag alone does nothing without East Asian width.
        assert_eq!(w(&Condition::new(false, false), '👁'), 1);
    }

    #[test]
    fn narrow_outside_ascii() {
        assert_eq!(w(&EA_ON_LOOSE, '⟦'), 1);
        assert_eq!(w(&EA_OFF, 'a'), 1);
    }

    #[test]
    fn out_of_range_is_zero() {
        assert_eq!(EA_OFF.width(MAX_CODE_POINT + 1), 0);
        assert_eq!(EA_ON_LOOSE.width(u32::MAX), 0);
        // Surrogates are listed as non-printing.
        assert_eq!(EA_OFF.width(0xD800), 0);
    }
}
