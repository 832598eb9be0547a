//! Terminal cell width of Unicode text.
//!
//! Two ways to use this crate:
//!
//! * Build a [`Resolver`] once (directly, or from `cellwidth.toml` and the
//!   environment via [`config`]) and pass it to whatever renders text. This is
//!   the preferred path for hot loops: a `&Resolver` is lock-free to query.
//! * Use the free functions ([`rune_width`], [`string_width`], ...), which
//!   consult a process-wide default resolver. The default is created lazily
//!   from `RUNEWIDTH_EASTASIAN` and the locale on first use; [`init`],
//!   [`set_default`], [`apply_env`] and [`build_lut`] replace it explicitly.
//!
//! The default lives behind an `RwLock<Arc<Resolver>>`. Replacing it never
//! mutates a resolver somebody else holds; readers that grabbed the old
//! `Arc` keep a consistent snapshot.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Result;
use tracing::{debug, info};

pub use core_config as config;
pub use core_width::{
    Condition, Interval, LUT_LEN, Lut, MAX_CODE_POINT, Resolver, Table, UNICODE_VERSION,
    is_ambiguous_width, is_neutral_width, is_private_use, tables,
};

static DEFAULT: LazyLock<RwLock<Arc<Resolver>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Resolver::new(config::condition_from_env()))));

fn read() -> RwLockReadGuard<'static, Arc<Resolver>> {
    DEFAULT.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Arc<Resolver>> {
    DEFAULT.write().unwrap_or_else(PoisonError::into_inner)
}

/// Snapshot of the current default resolver.
pub fn default_resolver() -> Arc<Resolver> {
    Arc::clone(&read())
}

/// Install `resolver` as the process default, returning the previous one.
pub fn set_default(resolver: Resolver) -> Arc<Resolver> {
    let next = Arc::new(resolver);
    std::mem::replace(&mut *write(), next)
}

/// Load config (`path` or the discovered `cellwidth.toml`), combine it with
/// the environment and install the result as the default.
pub fn init(path: Option<PathBuf>) -> Result<Arc<Resolver>> {
    let cfg = config::load_from(path)?;
    let resolver = Arc::new(cfg.resolver());
    *write() = Arc::clone(&resolver);
    Ok(resolver)
}

/// Build a LUT for the default resolver. No-op when it already has one.
///
/// The table is built outside the lock and published afterwards; if the
/// default was replaced meanwhile the new one is left alone.
pub fn build_lut() {
    let current = default_resolver();
    if current.has_lut() {
        return;
    }
    let built = Resolver::new(current.condition()).with_lut();
    if !publish_over(&current, built) {
        debug!(target: "width", "default_lut_discarded");
    }
}

/// Re-read `RUNEWIDTH_EASTASIAN` (and the locale when it is unset) and update
/// the default's East Asian flag. Returns whether the default changed.
pub fn apply_env() -> bool {
    apply_env_from(config::env::process_var)
}

/// [`apply_env`] with an explicit variable lookup.
///
/// A default that owned a LUT gets a fresh one for the new flag. The update
/// applies to the default seen when the call started; if it was replaced in
/// the meantime the replacement wins and this returns `false`.
pub fn apply_env_from<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let current = default_resolver();
    let hint = config::read_hint_from(&lookup);
    let east_asian = hint
        .forced()
        .unwrap_or_else(|| config::locale::detect_from(&lookup));
    if current.east_asian_width() == east_asian {
        return false;
    }
    let condition = current.condition().with_east_asian_width(east_asian);
    let rebuild_lut = current.has_lut();
    let next = Resolver::new(condition);
    let next = if rebuild_lut { next.with_lut() } else { next };
    if !publish_over(&current, next) {
        debug!(target: "width", ?hint, "default_env_discarded");
        return false;
    }
    info!(
        target: "width",
        ?hint,
        east_asian_width = east_asian,
        rebuild_lut,
        "default_env_applied"
    );
    true
}

/// Install `next` only if the default is still `snapshot`.
fn publish_over(snapshot: &Arc<Resolver>, next: Resolver) -> bool {
    let mut slot = write();
    if !Arc::ptr_eq(&*slot, snapshot) {
        return false;
    }
    *slot = Arc::new(next);
    true
}

/// Restore a fresh, LUT-less default derived from the environment.
/// For test isolation only.
#[doc(hidden)]
pub fn reset_default() {
    *write() = Arc::new(Resolver::new(config::condition_from_env()));
}

/// Width of `c` under the default resolver.
pub fn rune_width(c: char) -> u8 {
    read().char_width(c)
}

/// Width of a raw code point under the default resolver; 0 past `U+10FFFF`.
pub fn code_point_width(r: u32) -> u8 {
    read().width(r)
}

pub fn string_width(s: &str) -> usize {
    read().string_width(s)
}

pub fn truncate<'a>(s: &'a str, width: usize, tail: &str) -> Cow<'a, str> {
    read().truncate(s, width, tail)
}

pub fn truncate_left(s: &str, width: usize, prefix: &str) -> String {
    read().truncate_left(s, width, prefix)
}

pub fn wrap(s: &str, width: usize) -> String {
    read().wrap(s, width)
}

pub fn fill_left(s: &str, width: usize) -> String {
    read().fill_left(s, width)
}

pub fn fill_right(s: &str, width: usize) -> String {
    read().fill_right(s, width)
}
