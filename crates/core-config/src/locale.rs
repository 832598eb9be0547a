//! Locale-based East Asian detection, used when the environment hint is
//! `Auto`.
//!
//! A locale counts as East Asian when its charset is multibyte and either
//! the charset is a legacy CJK encoding, or it is a Unicode charset and the
//! language is Japanese, Korean or Chinese. `@cjk_narrow` opts out.

use std::sync::LazyLock;

use regex::Regex;

/// Variables consulted in order; the first non-empty one wins.
pub const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

static LOCALE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z][a-z]?(?:_[A-Z][A-Z])?\.(.+)").expect("locale regex")
});

/// Maximum bytes per character for charsets known to be multibyte.
fn max_char_len(charset: &str) -> usize {
    match charset {
        "utf-8" | "utf8" => 6,
        "jis" => 8,
        "eucjp" => 3,
        "euckr" | "euccn" | "sjis" | "cp932" | "cp51932" | "cp936" | "cp949" | "cp950"
        | "big5" | "gbk" | "gb2312" => 2,
        _ => 1,
    }
}

/// Classify a single locale string such as `ja_JP.UTF-8`.
pub fn is_east_asian_locale(locale: &str) -> bool {
    let mut charset = match LOCALE_RE.captures(locale) {
        Some(caps) => caps[1].to_lowercase(),
        None => locale.to_lowercase(),
    };
    if charset.ends_with("@cjk_narrow") {
        return false;
    }
    if let Some(pos) = charset.find('@') {
        charset.truncate(pos);
    }
    if max_char_len(&charset) <= 1 {
        return false;
    }
    !charset.starts_with('u') || ["ja", "ko", "zh"].iter().any(|lang| locale.starts_with(lang))
}

/// The POSIX locale and its `C.*` / `C-*` variants are never East Asian.
fn is_c_locale(locale: &str) -> bool {
    locale == "C" || locale == "POSIX" || locale.starts_with("C.") || locale.starts_with("C-")
}

/// Detect through an arbitrary variable lookup.
pub fn detect_from<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let locale = LOCALE_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .find(|value| !value.is_empty())
        .unwrap_or_default();
    if is_c_locale(&locale) {
        return false;
    }
    is_east_asian_locale(&locale)
}

/// Detect from the process environment.
pub fn detect() -> bool {
    detect_from(crate::env::process_var)
}
