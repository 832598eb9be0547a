//! Terminal cell width of Unicode code points.
//!
//! Widths are 0 (controls, combining marks), 1, or 2 (wide CJK, and ambiguous
//! or emoji characters when East Asian width rules are in effect). The data
//! lives in generated interval tables (`tables`), the policy in `Condition`,
//! and `Resolver` adds an optional dense LUT for hot loops.
//!
//! ```
//! use core_width::{Condition, Resolver};
//!
//! let narrow = Resolver::default();
//! assert_eq!(narrow.char_width('世'), 2);
//! assert_eq!(narrow.char_width('☆'), 1);
//!
//! let cjk = Resolver::new(Condition::default().with_east_asian_width(true)).with_lut();
//! assert_eq!(cjk.char_width('☆'), 2);
//! assert_eq!(cjk.string_width("☆a"), 3);
//! ```
//!
//! Regenerating the tables: run `python3 scripts/gen_tables.py > src/tables.rs`
//! from this crate (it reads or fetches the pinned UCD files into
//! `scripts/ucd`), then `cargo test -p core-width`. The SHA-256 digests in
//! `tests/tables.rs` and `tests/checksums.rs` pin the current data and must be
//! updated alongside it.

pub mod condition;
pub mod interval;
pub mod lut;
pub mod resolver;
pub mod tables;
mod text;

pub use condition::Condition;
pub use interval::{Interval, MAX_CODE_POINT, Table};
pub use lut::{LUT_LEN, Lut};
pub use resolver::Resolver;
pub use tables::UNICODE_VERSION;

/// East Asian Ambiguous membership, independent of any flags.
pub fn is_ambiguous_width(c: char) -> bool {
    tables::AMBIGUOUS.contains(c as u32)
}

/// East Asian Neutral membership, independent of any flags.
pub fn is_neutral_width(c: char) -> bool {
    tables::NEUTRAL.contains(c as u32)
}

/// Private use area membership.
pub fn is_private_use(c: char) -> bool {
    tables::PRIVATE.contains(c as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_predicate() {
        assert!(!is_ambiguous_width('世'));
        assert!(!is_ambiguous_width('界'));
        assert!(!is_ambiguous_width('㈱'));
        assert!(is_ambiguous_width('■'));
        assert!(is_ambiguous_width('○'));
        assert!(is_ambiguous_width('☆'));
        for c in '①'..='⑳' {
            assert!(is_ambiguous_width(c), "{c} should be ambiguous");
        }
    }

    #[test]
    fn neutral_predicate() {
        assert!(is_neutral_width('⣀'));
        for c in ['→', '┊', '┈', '～', '└'] {
            assert!(!is_neutral_width(c), "{c} should not be neutral");
        }
    }

    #[test]
    fn private_use_predicate() {
        assert!(is_private_use('\u{E000}'));
        assert!(is_private_use('\u{10FFFD}'));
        assert!(!is_private_use('a'));
        // Private use is also ambiguous.
        assert!(is_ambiguous_width('\u{F8FF}'));
    }

    #[test]
    fn unicode_version_recorded() {
        assert_eq!(UNICODE_VERSION, (15, 1, 0));
    }
}
