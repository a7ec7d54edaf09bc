// SPDX-License-Identifier: MPL-2.0
//! Startup locale resolution.
//!
//! The initial locale is picked by strict precedence: a persisted preference
//! naming a supported locale, then the device system language mapped onto the
//! supported set, then the catalog's first-listed locale. Storage and system
//! failures read as absence, so resolution never fails on a non-empty table.
//! The result carries a [`ResolutionSource`] tag recording which step won.

use crate::catalog::Catalog;
use crate::storage::{PreferenceStore, LOCALE_KEY};
use crate::system::SystemLanguage;
use unic_langid::LanguageIdentifier;

/// Which precedence step produced the initial locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// A stored user preference named a supported locale.
    Persisted,
    /// The device system language mapped onto a supported locale.
    SystemMapped,
    /// Neither signal applied; the first-listed locale was used.
    Default,
}

/// A resolved initial locale, always a key of the catalog it was resolved
/// against.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub locale: LanguageIdentifier,
    pub source: ResolutionSource,
}

/// Resolves the locale to activate at startup.
///
/// Returns `None` only when the catalog is empty; otherwise the result is
/// guaranteed to name a catalog key.
pub fn resolve_initial_locale(
    store: &dyn PreferenceStore,
    system: &dyn SystemLanguage,
    catalog: &Catalog,
) -> Option<Resolution> {
    let default = catalog.fallback()?.clone();

    if let Ok(Some(saved)) = store.get(LOCALE_KEY) {
        if let Ok(code) = saved.parse::<LanguageIdentifier>() {
            if catalog.contains(&code) {
                return Some(Resolution {
                    locale: code,
                    source: ResolutionSource::Persisted,
                });
            }
        }
    }

    if let Some(tag) = system.current() {
        if let Some(code) = match_supported(&tag, catalog) {
            return Some(Resolution {
                locale: code,
                source: ResolutionSource::SystemMapped,
            });
        }
    }

    Some(Resolution {
        locale: default,
        source: ResolutionSource::Default,
    })
}

/// Maps a free-form system tag onto a supported locale: an exact match wins,
/// otherwise the first supported locale sharing the language subtag (so any
/// `zh-*` variant lands on the primary Chinese locale). `None` when the tag
/// names a language the catalog does not carry.
fn match_supported(tag: &str, catalog: &Catalog) -> Option<LanguageIdentifier> {
    if let Ok(parsed) = tag.parse::<LanguageIdentifier>() {
        if catalog.contains(&parsed) {
            return Some(parsed);
        }
        return catalog
            .codes()
            .iter()
            .find(|code| code.language == parsed.language)
            .cloned();
    }

    // Tags sys-locale can emit that unic-langid rejects, e.g. "zh_CN.UTF-8".
    let primary = tag.split(['-', '_', '.']).next()?;
    let parsed: LanguageIdentifier = primary.parse().ok()?;
    catalog
        .codes()
        .iter()
        .find(|code| code.language == parsed.language)
        .cloned()
}
