//! Width configuration loading.
//!
//! Parses `cellwidth.toml` (or an explicit path supplied by the caller):
//!
//! ```toml
//! [width]
//! east_asian = "auto"          # auto | on | off
//! strict_emoji_neutral = true
//! lut = false
//! ```
//!
//! and combines it with the `RUNEWIDTH_EASTASIAN` hint and locale detection
//! into a `core_width::Resolver`. Loading happens once, when the caller asks;
//! the resulting resolver is an immutable value.
//!
//! East Asian precedence: environment `On`/`Off`, then the file's `on`/`off`,
//! then locale detection. Unknown fields are ignored so older binaries accept
//! newer files.

use std::io::ErrorKind;
use std::str::FromStr;
use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use core_width::{Condition, Resolver};
use serde::Deserialize;
use tracing::info;

pub mod env;
pub mod locale;

pub use env::{EAST_ASIAN_ENV, EastAsianHint, parse_hint, read_hint, read_hint_from};

/// File name looked up during discovery.
pub const CONFIG_FILE_NAME: &str = "cellwidth.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid east_asian setting `{0}` (expected auto, on or off)")]
    InvalidEastAsian(String),
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// File-level East Asian choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum EastAsianSetting {
    #[default]
    Auto,
    On,
    Off,
}

impl FromStr for EastAsianSetting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "on" | "true" | "1" => Ok(Self::On),
            "off" | "false" | "0" => Ok(Self::Off),
            _ => Err(ConfigError::InvalidEastAsian(s.to_owned())),
        }
    }
}

impl TryFrom<String> for EastAsianSetting {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct WidthConfig {
    #[serde(default)]
    pub east_asian: EastAsianSetting,
    #[serde(default = "WidthConfig::default_strict_emoji_neutral")]
    pub strict_emoji_neutral: bool,
    #[serde(default)]
    pub lut: bool,
}

impl Default for WidthConfig {
    fn default() -> Self {
        Self {
            east_asian: EastAsianSetting::Auto,
            strict_emoji_neutral: Self::default_strict_emoji_neutral(),
            lut: false,
        }
    }
}

impl WidthConfig {
    const fn default_strict_emoji_neutral() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub width: WidthConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub path: Option<PathBuf>, // where `raw` came from
    pub raw: Option<String>,   // original file string (optional)
    pub file: ConfigFile,      // parsed (or default) data
}

/// Where the East Asian flag came from, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EastAsianSource {
    Env,
    File,
    Locale,
}

impl EastAsianSource {
    fn as_str(self) -> &'static str {
        match self {
            EastAsianSource::Env => "env",
            EastAsianSource::File => "file",
            EastAsianSource::Locale => "locale",
        }
    }
}

/// Config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    // Working directory first, then the platform config dir.
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("cellwidth").join(CONFIG_FILE_NAME);
    }
    local
}

/// Parse config text. `path` is only used for error reporting.
pub fn parse(content: &str, path: Option<PathBuf>) -> Result<Config, ConfigError> {
    let file = toml::from_str::<ConfigFile>(content).map_err(|source| ConfigError::Parse {
        path: path.clone().unwrap_or_else(|| PathBuf::from("<inline>")),
        source,
    })?;
    Ok(Config {
        path,
        raw: Some(content.to_owned()),
        file,
    })
}

/// Load `path` (or the discovered default). A missing file yields defaults;
/// an unreadable or malformed one is an error.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            let err = ConfigError::Read { path, source };
            return Err(anyhow::Error::new(err).context("loading width config"));
        }
    };
    parse(&content, Some(path)).context("loading width config")
}

impl Config {
    /// Resolve the East Asian flag from an env hint and a lazily consulted
    /// locale detector. Returns the flag and where it came from.
    pub fn east_asian_with<L>(&self, hint: EastAsianHint, locale: L) -> (bool, EastAsianSource)
    where
        L: FnOnce() -> bool,
    {
        if let Some(forced) = hint.forced() {
            return (forced, EastAsianSource::Env);
        }
        match self.file.width.east_asian {
            EastAsianSetting::On => (true, EastAsianSource::File),
            EastAsianSetting::Off => (false, EastAsianSource::File),
            EastAsianSetting::Auto => (locale(), EastAsianSource::Locale),
        }
    }

    /// Build the condition described by this config plus the given inputs.
    pub fn condition_with<L>(&self, hint: EastAsianHint, locale: L) -> Condition
    where
        L: FnOnce() -> bool,
    {
        let (east_asian, source) = self.east_asian_with(hint, locale);
        let condition = Condition::new(east_asian, self.file.width.strict_emoji_neutral);
        info!(
            target: "config",
            east_asian_width = condition.east_asian_width,
            strict_emoji_neutral = condition.strict_emoji_neutral,
            source = source.as_str(),
            lut = self.file.width.lut,
            "width_condition_resolved"
        );
        condition
    }

    /// Build the resolver, including its LUT when `lut = true`.
    pub fn resolver_with<L>(&self, hint: EastAsianHint, locale: L) -> Resolver
    where
        L: FnOnce() -> bool,
    {
        let resolver = Resolver::new(self.condition_with(hint, locale));
        if self.file.width.lut {
            resolver.with_lut()
        } else {
            resolver
        }
    }

    /// Build the resolver from the process environment.
    pub fn resolver(&self) -> Resolver {
        self.resolver_with(read_hint(), locale::detect)
    }
}

/// Condition for a process with no config file: env hint, then locale.
pub fn condition_from_env() -> Condition {
    Config::default().condition_with(read_hint(), locale::detect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn never() -> bool {
        panic!("locale detection should not run")
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.file.width, WidthConfig::default());
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.file.width.east_asian, EastAsianSetting::Auto);
        assert!(cfg.file.width.strict_emoji_neutral);
        assert!(!cfg.file.width.lut);
    }

    #[test]
    fn parses_width_section() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[width]\neast_asian = \"on\"\nstrict_emoji_neutral = false\nlut = true\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(
            cfg.file.width,
            WidthConfig {
                east_asian: EastAsianSetting::On,
                strict_emoji_neutral: false,
                lut: true,
            }
        );
        assert_eq!(cfg.path.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn unknown_fields_ignored() {
        let cfg = parse("[width]\nfuture = 1\n[other]\nx = 2\n", None).unwrap();
        assert_eq!(cfg.file.width, WidthConfig::default());
    }

    #[test]
    fn setting_spellings() {
        for (s, want) in [
            ("auto", EastAsianSetting::Auto),
            ("ON", EastAsianSetting::On),
            ("true", EastAsianSetting::On),
            ("1", EastAsianSetting::On),
            ("off", EastAsianSetting::Off),
            ("False", EastAsianSetting::Off),
            ("0", EastAsianSetting::Off),
        ] {
            assert_eq!(s.parse::<EastAsianSetting>().unwrap(), want, "{s}");
        }
        assert!(matches!(
            "maybe".parse::<EastAsianSetting>(),
            Err(ConfigError::InvalidEastAsian(v)) if v == "maybe"
        ));
    }

    #[test]
    fn empty_setting_is_rejected() {
        for s in ["", "  "] {
            assert!(matches!(
                s.parse::<EastAsianSetting>(),
                Err(ConfigError::InvalidEastAsian(_))
            ));
        }
        let err = parse("[width]\neast_asian = \"\"\n", None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn malformed_file_is_an_error_naming_the_path() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[width]\neast_asian = \"sometimes\"\n").unwrap();
        let err = load_from(Some(tmp.path().to_path_buf())).unwrap_err();
        let parse = err.downcast_ref::<ConfigError>().expect("typed config error");
        assert!(matches!(parse, ConfigError::Parse { .. }));
        assert!(format!("{err:#}").contains(&tmp.path().display().to_string()));
    }

    #[test]
    fn env_hint_beats_file_and_locale() {
        let cfg = parse("[width]\neast_asian = \"off\"\n", None).unwrap();
        assert_eq!(
            cfg.east_asian_with(EastAsianHint::On, never),
            (true, EastAsianSource::Env)
        );
        let cfg = parse("[width]\neast_asian = \"on\"\n", None).unwrap();
        assert_eq!(
            cfg.east_asian_with(EastAsianHint::Off, never),
            (false, EastAsianSource::Env)
        );
    }

    #[test]
    fn file_beats_locale() {
        let cfg = parse("[width]\neast_asian = \"on\"\n", None).unwrap();
        assert_eq!(
            cfg.east_asian_with(EastAsianHint::Auto, never),
            (true, EastAsianSource::File)
        );
    }

    #[test]
    fn auto_falls_back_to_locale() {
        let cfg = Config::default();
        assert_eq!(
            cfg.east_asian_with(EastAsianHint::Auto, || true),
            (true, EastAsianSource::Locale)
        );
        assert_eq!(
            cfg.east_asian_with(EastAsianHint::Auto, || false),
            (false, EastAsianSource::Locale)
        );
    }

    #[test]
    fn resolver_honours_lut_and_strict_flags() {
        let cfg = parse("[width]\nstrict_emoji_neutral = false\nlut = true\n", None).unwrap();
        let r = cfg.resolver_with(EastAsianHint::On, never);
        assert!(r.has_lut());
        assert_eq!(r.condition(), Condition::new(true, false));
        assert_eq!(r.char_width('👁'), 2);

        let r = Config::default().resolver_with(EastAsianHint::Off, never);
        assert!(!r.has_lut());
        assert_eq!(r.condition(), Condition::default());
    }

    #[test]
    fn resolution_logging_uses_config_target() {
        let cfg = parse("[width]\neast_asian = \"on\"\n", None).unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        with_default(subscriber, || {
            cfg.condition_with(EastAsianHint::Auto, never);
        });

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("width_condition_resolved"));
        assert!(log_output.contains("source=\"file\""));
        assert!(log_output.contains("east_asian_width=true"));
    }
}
