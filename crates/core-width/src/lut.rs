//! Dense width cache.
//!
//! One byte per code point (`U+0000..=U+10FFFF`, about 1.1 MB) holding the
//! width a `Condition` produced when the table was built. Lookups become a
//! single indexed load instead of up to five binary searches.

use std::fmt;
use std::time::Instant;

use tracing::debug;

use crate::condition::Condition;
use crate::interval::MAX_CODE_POINT;

/// Number of entries in a LUT.
pub const LUT_LEN: usize = MAX_CODE_POINT as usize + 1;

/// Frozen snapshot of one `Condition` over the whole code point space.
#[derive(Clone, PartialEq, Eq)]
pub struct Lut {
    condition: Condition,
    widths: Box<[u8]>,
}

impl Lut {
    /// Evaluate `condition` once per code point.
    pub fn build(condition: Condition) -> Self {
        let started = Instant::now();
        let widths: Box<[u8]> = (0..=MAX_CODE_POINT).map(|r| condition.width(r)).collect();
        debug!(
            target: "width",
            east_asian_width = condition.east_asian_width,
            strict_emoji_neutral = condition.strict_emoji_neutral,
            entries = widths.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "lut_built"
        );
        Self { condition, widths }
    }

    /// Cached width, or `None` past `U+10FFFF`.
    #[inline]
    pub fn get(&self, r: u32) -> Option<u8> {
        self.widths.get(r as usize).copied()
    }

    /// The flags this table was built from.
    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.widths
    }
}

impl fmt::Debug for Lut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lut")
            .field("condition", &self.condition)
            .field("entries", &self.widths.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_whole_code_space() {
        let lut = Lut::build(Condition::default());
        assert_eq!(lut.as_bytes().len(), LUT_LEN);
        assert_eq!(lut.get(MAX_CODE_POINT), Some(Condition::default().width(MAX_CODE_POINT)));
        assert_eq!(lut.get(MAX_CODE_POINT + 1), None);
    }

    #[test]
    fn entries_never_exceed_two() {
        let lut = Lut::build(Condition::new(true, false));
        assert!(lut.as_bytes().iter().all(|&w| w <= 2));
    }

    #[test]
    fn remembers_condition() {
        let c = Condition::new(true, true);
        assert_eq!(Lut::build(c).condition(), c);
    }

    #[test]
    fn debug_output_omits_entries() {
        let s = format!("{:?}", Lut::build(Condition::default()));
        assert!(s.contains("entries: 1114112"), "{s}");
        assert!(s.len() < 200);
    }
}
