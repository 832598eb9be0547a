//! String measurement and column-aware slicing.
//!
//! Everything here walks `char`s. Callers that need grapheme clusters must
//! segment first; a combining mark simply contributes 0 to the running width.

use std::borrow::Cow;

use crate::resolver::Resolver;

impl Resolver {
    /// Sum of the cell widths of every code point in `s`.
    pub fn string_width(&self, s: &str) -> usize {
        s.chars().map(|c| self.char_width(c) as usize).sum()
    }

    /// Shorten `s` to at most `width` cells, ending in `tail`.
    ///
    /// `s` is returned untouched when it already fits. Otherwise the kept
    /// prefix plus `tail` never exceeds `width` (unless `tail` alone does).
    pub fn truncate<'a>(&self, s: &'a str, width: usize, tail: &str) -> Cow<'a, str> {
        if self.string_width(s) <= width {
            return Cow::Borrowed(s);
        }
        let budget = width.saturating_sub(self.string_width(tail));
        let mut used = 0usize;
        let mut cut = s.len();
        for (idx, c) in s.char_indices() {
            let w = self.char_width(c) as usize;
            if used + w > budget {
                cut = idx;
                break;
            }
            used += w;
        }
        let mut out = String::with_capacity(cut + tail.len());
        out.push_str(&s[..cut]);
        out.push_str(tail);
        Cow::Owned(out)
    }

    /// Drop the leftmost `width` cells of `s` and prepend `prefix`.
    ///
    /// A wide code point cut in half is removed and the cells of it that
    /// survive the cut become spaces, keeping the remaining text in its
    /// original columns. Zero-width marks go with the code point they follow:
    /// marks sitting at the cut are dropped, and so are marks attached to a
    /// removed wide code point.
    pub fn truncate_left(&self, s: &str, width: usize, prefix: &str) -> String {
        if self.string_width(s) <= width {
            return prefix.to_owned();
        }
        let mut used = 0usize;
        for (idx, c) in s.char_indices() {
            let w = self.char_width(c) as usize;
            if used + w > width {
                let mut out = String::with_capacity(prefix.len() + s.len() - idx);
                out.push_str(prefix);
                if used < width {
                    let pad = used + w - width;
                    out.extend(std::iter::repeat_n(' ', pad));
                    let rest = &s[idx + c.len_utf8()..];
                    let keep = rest
                        .char_indices()
                        .find(|&(_, m)| m.is_control() || self.char_width(m) != 0)
                        .map_or(rest.len(), |(i, _)| i);
                    out.push_str(&rest[keep..]);
                } else {
                    out.push_str(&s[idx..]);
                }
                return out;
            }
            used += w;
        }
        prefix.to_owned()
    }

    /// Hard-wrap `s` so no line exceeds `width` cells.
    ///
    /// Existing newlines are kept and reset the running width. A code point
    /// wider than `width` still gets a line of its own.
    pub fn wrap(&self, s: &str, width: usize) -> String {
        let mut out = String::with_capacity(s.len() + s.len() / width.max(1));
        let mut line = 0usize;
        for c in s.chars() {
            if c == '\n' {
                out.push(c);
                line = 0;
                continue;
            }
            let w = self.char_width(c) as usize;
            if line + w > width {
                out.push('\n');
                line = 0;
            }
            out.push(c);
            line += w;
        }
        out
    }

    /// Left-pad `s` with spaces to `width` cells.
    pub fn fill_left(&self, s: &str, width: usize) -> String {
        let pad = width.saturating_sub(self.string_width(s));
        let mut out = String::with_capacity(s.len() + pad);
        out.extend(std::iter::repeat_n(' ', pad));
        out.push_str(s);
        out
    }

    /// Right-pad `s` with spaces to `width` cells.
    pub fn fill_right(&self, s: &str, width: usize) -> String {
        let pad = width.saturating_sub(self.string_width(s));
        let mut out = String::with_capacity(s.len() + pad);
        out.push_str(s);
        out.extend(std::iter::repeat_n(' ', pad));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use pretty_assertions::assert_eq;

    fn narrow() -> Resolver {
        Resolver::default()
    }

    fn east_asian() -> Resolver {
        Resolver::new(Condition::new(true, true))
    }

    #[test]
    fn string_width_sums_code_points() {
        let r = narrow();
        assert_eq!(r.string_width(""), 0);
        assert_eq!(r.string_width("abc"), 3);
        assert_eq!(r.string_width("■㈱の世界①"), 10);
        assert_eq!(east_asian().string_width("■㈱の世界①"), 12);
        assert_eq!(r.string_width("e\u{0301}"), 1);
        assert_eq!(r.string_width("\x1b"), 0);
    }

    #[test]
    fn truncate_keeps_fitting_input_borrowed() {
        let r = narrow();
        let out = r.truncate("abc", 3, "...");
        assert!(matches!(out, Cow::Borrowed("abc")));
    }

    #[test]
    fn truncate_ascii() {
        assert_eq!(narrow().truncate("abcdefgh", 5, "..."), "ab...");
        assert_eq!(narrow().truncate("abcdefgh", 5, ""), "abcde");
    }

    #[test]
    fn truncate_never_splits_wide() {
        let r = narrow();
        // 5 wide chars = 10 cells; budget 7 - 3 = 4 keeps two of them.
        assert_eq!(r.truncate("あいうえお", 7, "..."), "あい...");
        // Budget 3 cannot fit half of the second char.
        assert_eq!(r.truncate("あいうえお", 6, "..."), "あ...");
    }

    #[test]
    fn truncate_tail_wider_than_budget() {
        assert_eq!(narrow().truncate("abcdef", 2, "..."), "...");
    }

    #[test]
    fn truncate_left_plain() {
        let r = narrow();
        assert_eq!(r.truncate_left("abcdef", 2, ""), "cdef");
        assert_eq!(r.truncate_left("abcdef", 2, "…"), "…cdef");
        assert_eq!(r.truncate_left("abcdef", 6, "…"), "…");
        assert_eq!(r.truncate_left("abcdef", 0, ""), "abcdef");
    }

    #[test]
    fn truncate_left_pads_split_wide_char() {
        let r = narrow();
        // Cutting 3 cells from "あいう" halves "い"; its right half becomes a space.
        assert_eq!(r.truncate_left("あいう", 3, ""), " う");
        assert_eq!(r.truncate_left("あいう", 4, ""), "う");
    }

    #[test]
    fn truncate_left_marks_follow_their_base() {
        let r = narrow();
        // The mark at the cut belongs to "b", which is dropped.
        assert_eq!(r.truncate_left("ab\u{0301}cd", 2, ""), "cd");
        // Cut before "b": it keeps its mark.
        assert_eq!(r.truncate_left("ab\u{0301}cd", 1, ""), "b\u{0301}cd");
        // A split wide char takes its marks along; only the padding remains.
        assert_eq!(r.truncate_left("世\u{0301}界", 1, ""), " 界");
        assert_eq!(r.truncate_left("世\u{0301}\u{0302}界x", 1, ">"), "> 界x");
    }

    #[test]
    fn wrap_by_cells() {
        let r = narrow();
        assert_eq!(r.wrap("abcdefg", 3), "abc\ndef\ng");
        assert_eq!(r.wrap("ab\ncdef", 3), "ab\ncde\nf");
        assert_eq!(r.wrap("あいう", 4), "あい\nう");
        assert_eq!(r.wrap("", 4), "");
    }

    #[test]
    fn wrap_zero_width_marks_stay_attached() {
        assert_eq!(narrow().wrap("ae\u{0301}b", 2), "ae\u{0301}\nb");
    }

    #[test]
    fn fill() {
        let r = narrow();
        assert_eq!(r.fill_left("ab", 5), "   ab");
        assert_eq!(r.fill_right("ab", 5), "ab   ");
        assert_eq!(r.fill_left("あい", 5), " あい");
        assert_eq!(r.fill_right("abcdef", 3), "abcdef");
    }

    #[test]
    fn fill_depends_on_east_asian_flag() {
        assert_eq!(narrow().fill_left("☆", 3), "  ☆");
        assert_eq!(east_asian().fill_left("☆", 3), " ☆");
    }
}
