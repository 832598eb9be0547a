//! Sorted interval tables over the code point space.
//!
//! A `Table` is a static slice of inclusive `[first, last]` ranges. The
//! generator emits every table strictly ascending and maximally compact (no
//! two entries overlap or touch), so membership is a plain binary search.
//! Nothing here validates that ordering at runtime; `tests/tables.rs` does.

/// Largest valid Unicode scalar value (and the last LUT index).
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Inclusive code point range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub first: u32,
    pub last: u32,
}

impl Interval {
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    #[inline]
    pub const fn contains(&self, r: u32) -> bool {
        self.first <= r && r <= self.last
    }

    /// Number of code points covered.
    pub const fn count(&self) -> u32 {
        self.last - self.first + 1
    }
}

/// Immutable, sorted, non-adjacent collection of intervals.
#[derive(Debug, Clone, Copy)]
pub struct Table(&'static [Interval]);

impl Table {
    pub const fn new(intervals: &'static [Interval]) -> Self {
        Self(intervals)
    }

    /// Binary search for the interval holding `r`.
    #[inline]
    pub fn contains(&self, r: u32) -> bool {
        let entries = self.0;
        // Cheap reject before the search: most lookups land outside the table span.
        match (entries.first(), entries.last()) {
            (Some(lo), Some(hi)) if r >= lo.first && r <= hi.last => {}
            _ => return false,
        }
        let mut lo = 0usize;
        let mut hi = entries.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let entry = entries[mid];
            if r < entry.first {
                hi = mid;
            } else if r > entry.last {
                lo = mid + 1;
            } else {
                return true;
            }
        }
        false
    }

    /// Number of intervals (not code points).
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub const fn intervals(&self) -> &'static [Interval] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Interval> {
        self.0.iter()
    }

    /// Total code points covered by all intervals.
    pub fn code_point_count(&self) -> u32 {
        self.0.iter().map(Interval::count).sum()
    }
}

/// True when `r` belongs to any of `tables`.
#[inline]
pub fn in_tables(r: u32, tables: &[&Table]) -> bool {
    tables.iter().any(|t| t.contains(r))
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE: Table = Table::new(&[
        Interval::new(0x10, 0x1F),
        Interval::new(0x30, 0x30),
        Interval::new(0x40, 0x4F),
        Interval::new(0x100, 0x1FF),
    ]);

    static EMPTY: Table = Table::new(&[]);

    #[test]
    fn boundaries_are_inclusive() {
        assert!(SAMPLE.contains(0x10));
        assert!(SAMPLE.contains(0x1F));
        assert!(SAMPLE.contains(0x30));
        assert!(SAMPLE.contains(0x1FF));
    }

    #[test]
    fn gaps_and_outside_report_absent() {
        assert!(!SAMPLE.contains(0x0F));
        assert!(!SAMPLE.contains(0x20));
        assert!(!SAMPLE.contains(0x2F));
        assert!(!SAMPLE.contains(0x31));
        assert!(!SAMPLE.contains(0x50));
        assert!(!SAMPLE.contains(0x200));
        assert!(!SAMPLE.contains(u32::MAX));
    }

    #[test]
    fn empty_table_contains_nothing() {
        assert!(EMPTY.is_empty());
        assert!(!EMPTY.contains(0));
        assert!(!EMPTY.contains(MAX_CODE_POINT));
    }

    #[test]
    fn counts() {
        assert_eq!(SAMPLE.len(), 4);
        assert_eq!(SAMPLE.code_point_count(), 16 + 1 + 16 + 256);
        assert_eq!(Interval::new(5, 5).count(), 1);
    }

    #[test]
    fn in_tables_checks_every_table() {
        assert!(in_tables(0x30, &[&EMPTY, &SAMPLE]));
        assert!(!in_tables(0x31, &[&EMPTY, &SAMPLE]));
        assert!(!in_tables(0x30, &[]));
    }
}
