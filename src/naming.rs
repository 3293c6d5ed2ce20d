//! Name normalization and slug derivation for makes and models.
//!
//! Every make and model name passes through [`normalize_name`] before it is
//! used as an interning key, and through [`slugify`] to produce the page name
//! it is published under:
//!
//! - `"  Nikon "` → name `"Nikon"`, slug `"Nikon"`
//! - `"NIKON CORPORATION"` → slug `"NIKON-CORPORATION"`
//! - `""` → name `"(Generic make)"`, slug `"-Generic-make-"`
//!
//! Slugs keep their case. Two different names can produce the same slug
//! (`"Ni-kon"` and `"Ni+kon"`); nothing here disambiguates them.

use regex::Regex;
use std::sync::LazyLock;

/// Label substituted for a blank make name.
pub const GENERIC_MAKE: &str = "(Generic make)";

/// Label substituted for a blank model name.
pub const GENERIC_MODEL: &str = "(Generic model)";

/// Each maximal run of characters outside `[A-Za-z0-9]`.
static SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9]+").expect("valid regex"));

/// Trim surrounding whitespace, falling back to `generic` when nothing is left.
pub fn normalize_name(raw: &str, generic: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        generic.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Derive a URL/filename-safe slug from a display name.
///
/// Every maximal run of characters outside `[A-Za-z0-9]` becomes a single
/// `-`. Leading and trailing runs are kept, so the mapping is a pure function
/// of the input.
pub fn slugify(name: &str) -> String {
    SLUG_RUN.replace_all(name, "-").into_owned()
}
