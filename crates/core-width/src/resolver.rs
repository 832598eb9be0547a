//! `Resolver`: a `Condition` plus an optional LUT.
//!
//! The flags are fixed for the lifetime of a resolver. Switching modes means
//! building a new resolver, which starts without a cache, so a LUT can never
//! disagree with the flags it is paired with.
//!
//! Concurrency: a resolver is plain data. Once `build_lut` has returned it can
//! be shared by reference across threads (`&Resolver` is `Sync`). Building
//! needs `&mut self`, so it cannot overlap reads of the same instance; build
//! first, then publish.

use crate::condition::Condition;
use crate::interval::MAX_CODE_POINT;
use crate::lut::Lut;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolver {
    condition: Condition,
    lut: Option<Lut>,
}

impl Resolver {
    pub fn new(condition: Condition) -> Self {
        Self {
            condition,
            lut: None,
        }
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn east_asian_width(&self) -> bool {
        self.condition.east_asian_width
    }

    pub fn strict_emoji_neutral(&self) -> bool {
        self.condition.strict_emoji_neutral
    }

    pub fn has_lut(&self) -> bool {
        self.lut.is_some()
    }

    /// Precompute widths for every code point. No-op when already built.
    pub fn build_lut(&mut self) {
        if self.lut.is_none() {
            self.lut = Some(Lut::build(self.condition));
        }
    }

    #[must_use]
    pub fn with_lut(mut self) -> Self {
        self.build_lut();
        self
    }

    /// Cell width of a raw code point; 0 past `U+10FFFF`.
    #[inline]
    pub fn width(&self, r: u32) -> u8 {
        if r > MAX_CODE_POINT {
            return 0;
        }
        match &self.lut {
            Some(lut) => lut.get(r).unwrap_or(0),
            None => self.condition.width(r),
        }
    }

    #[inline]
    pub fn char_width(&self, c: char) -> u8 {
        self.width(c as u32)
    }
}

impl From<Condition> for Resolver {
    fn from(condition: Condition) -> Self {
        Self::new(condition)
    }
}
