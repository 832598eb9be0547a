//! `RUNEWIDTH_EASTASIAN` environment hint.
//!
//! Reading the variable is always an explicit call; nothing in the width
//! engine consults the environment on its own.

/// Variable forcing East Asian width on (`1`) or off (anything else).
pub const EAST_ASIAN_ENV: &str = "RUNEWIDTH_EASTASIAN";

/// Tri-state outcome of reading the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EastAsianHint {
    Off,
    On,
    /// Unset or empty: defer to locale detection.
    #[default]
    Auto,
}

impl EastAsianHint {
    /// The forced value, if any.
    pub fn forced(self) -> Option<bool> {
        match self {
            EastAsianHint::Off => Some(false),
            EastAsianHint::On => Some(true),
            EastAsianHint::Auto => None,
        }
    }
}

/// Interpret a raw variable value. Pure.
pub fn parse_hint(value: Option<&str>) -> EastAsianHint {
    match value {
        None | Some("") => EastAsianHint::Auto,
        Some("1") => EastAsianHint::On,
        Some(_) => EastAsianHint::Off,
    }
}

/// Read the hint through an arbitrary variable lookup.
pub fn read_hint_from<F>(lookup: F) -> EastAsianHint
where
    F: Fn(&str) -> Option<String>,
{
    parse_hint(lookup(EAST_ASIAN_ENV).as_deref())
}

/// Read the hint from the process environment.
pub fn read_hint() -> EastAsianHint {
    read_hint_from(process_var)
}

/// Process environment lookup. Non-UTF-8 values are kept lossily so they
/// still count as "set".
pub fn process_var(key: &str) -> Option<String> {
    std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
}
