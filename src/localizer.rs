// SPDX-License-Identifier: MPL-2.0
//! The localization facade used by the UI layer.
//!
//! A [`Localizer`] owns the locale table, the current-locale cell, and the
//! preference store. It is constructed once at startup with the initial
//! locale already resolved, and from then on exposes:
//!
//! - [`tr`](Localizer::tr) — translation lookup with fallback-locale
//!   semantics; misses degrade to the key path, never to an error
//! - [`switch_locale`](Localizer::switch_locale) — validated locale switch
//!   with synchronous listener notification and best-effort persistence
//! - [`supported_locales`](Localizer::supported_locales) — picker entries in
//!   the table's listing order
//!
//! Nothing on this surface returns an error after construction; every failure
//! path degrades to a defined default.

use crate::catalog::Catalog;
use crate::cell::LocaleCell;
use crate::error::{Error, Result};
use crate::resolver::{resolve_initial_locale, ResolutionSource};
use crate::storage::{FilePreferenceStore, MemoryStore, PreferenceStore, LOCALE_KEY};
use crate::system::{DeviceLanguage, SystemLanguage};
use unic_langid::LanguageIdentifier;

/// One entry for a language picker: the locale code and its display name.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleEntry {
    pub code: LanguageIdentifier,
    pub name: String,
}

pub struct Localizer {
    catalog: Catalog,
    cell: LocaleCell,
    store: Box<dyn PreferenceStore>,
    source: ResolutionSource,
}

impl Localizer {
    /// Builds a localizer over the given table and capabilities, resolving
    /// the initial locale in the process.
    ///
    /// Fails only on an empty locale table.
    pub fn new(
        catalog: Catalog,
        store: Box<dyn PreferenceStore>,
        system: &dyn SystemLanguage,
    ) -> Result<Self> {
        let resolution = resolve_initial_locale(store.as_ref(), system, &catalog)
            .ok_or_else(|| Error::Catalog("empty locale table".into()))?;
        Ok(Self {
            catalog,
            cell: LocaleCell::new(resolution.locale),
            store,
            source: resolution.source,
        })
    }

    /// Builds a localizer over the embedded dictionaries, the platform
    /// preference file, and the device language.
    pub fn bundled() -> Result<Self> {
        let store: Box<dyn PreferenceStore> = match FilePreferenceStore::new() {
            Some(store) => Box::new(store),
            None => Box::new(MemoryStore::new()),
        };
        Self::new(Catalog::bundled(), store, &DeviceLanguage)
    }

    /// The locale currently active. Always a key of the table.
    pub fn current_locale(&self) -> &LanguageIdentifier {
        self.cell.get()
    }

    /// Which resolution step chose the startup locale.
    pub fn resolution_source(&self) -> ResolutionSource {
        self.source
    }

    /// Switches the active locale.
    ///
    /// An unparseable or unsupported code is ignored: the cell and the store
    /// are left untouched and `false` is returned. On a valid code the cell
    /// is overwritten (listeners run before this method returns), then the
    /// preference is written; a failed write is accepted and the in-memory
    /// switch stands.
    pub fn switch_locale(&mut self, code: &str) -> bool {
        let Ok(code) = code.parse::<LanguageIdentifier>() else {
            return false;
        };
        if !self.catalog.contains(&code) {
            return false;
        }
        self.cell.set(code.clone());
        let _ = self.store.set(LOCALE_KEY, &code.to_string());
        true
    }

    /// Registers a listener invoked synchronously on every successful switch.
    pub fn subscribe(&mut self, listener: impl FnMut(&LanguageIdentifier) + 'static) {
        self.cell.subscribe(listener);
    }

    /// Looks up a translation by dotted key path.
    ///
    /// Falls back to the table's first-listed locale when the active
    /// dictionary has no entry, and to the key path itself when neither does.
    pub fn tr(&self, key: &str) -> String {
        if let Some(dict) = self.catalog.get(self.cell.get()) {
            if let Some(value) = dict.get(key) {
                return value.to_string();
            }
        }
        if let Some(fallback) = self.catalog.fallback() {
            if fallback != self.cell.get() {
                if let Some(value) = self.catalog.get(fallback).and_then(|d| d.get(key)) {
                    return value.to_string();
                }
            }
        }
        key.to_string()
    }

    /// Picker entries for every supported locale, in listing order. The
    /// display name falls back to the code's string form when the dictionary
    /// carries no `meta.name`.
    pub fn supported_locales(&self) -> Vec<LocaleEntry> {
        self.catalog
            .codes()
            .iter()
            .map(|code| {
                let name = self
                    .catalog
                    .get(code)
                    .and_then(|dict| dict.display_name())
                    .map(str::to_string)
                    .unwrap_or_else(|| code.to_string());
                LocaleEntry {
                    code: code.clone(),
                    name,
                }
            })
            .collect()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Dictionary, DISPLAY_NAME_KEY};
    use crate::system::FixedLanguage;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn lang(tag: &str) -> LanguageIdentifier {
        tag.parse().expect("valid language tag")
    }

    fn test_catalog() -> Catalog {
        let mut zh = Dictionary::default();
        zh.insert(DISPLAY_NAME_KEY, "简体中文");
        zh.insert("ledger.balance", "结余");
        zh.insert("ledger.income", "收入");

        let mut en = Dictionary::default();
        en.insert(DISPLAY_NAME_KEY, "English");
        en.insert("ledger.balance", "Balance");

        let mut catalog = Catalog::new();
        catalog.insert(lang("zh-CN"), zh);
        catalog.insert(lang("en-US"), en);
        catalog
    }

    fn test_localizer() -> Localizer {
        Localizer::new(
            test_catalog(),
            Box::new(MemoryStore::new()),
            &FixedLanguage::unavailable(),
        )
        .expect("non-empty catalog")
    }

    #[test]
    fn new_fails_on_empty_catalog() {
        let result = Localizer::new(
            Catalog::new(),
            Box::new(MemoryStore::new()),
            &FixedLanguage::unavailable(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn starts_on_default_locale_without_signals() {
        let localizer = test_localizer();
        assert_eq!(localizer.current_locale(), &lang("zh-CN"));
        assert_eq!(localizer.resolution_source(), ResolutionSource::Default);
    }

    #[test]
    fn switch_to_supported_locale_takes_effect() {
        let mut localizer = test_localizer();
        assert!(localizer.switch_locale("en-US"));
        assert_eq!(localizer.current_locale(), &lang("en-US"));
    }

    #[test]
    fn switch_to_unsupported_locale_is_a_no_op() {
        let mut localizer = test_localizer();
        assert!(!localizer.switch_locale("fr-FR"));
        assert!(!localizer.switch_locale("definitely not a tag"));
        assert_eq!(localizer.current_locale(), &lang("zh-CN"));
    }

    #[test]
    fn switch_is_idempotent() {
        let mut localizer = test_localizer();
        assert!(localizer.switch_locale("en-US"));
        assert!(localizer.switch_locale("en-US"));
        assert_eq!(localizer.current_locale(), &lang("en-US"));
        assert_eq!(localizer.tr("ledger.balance"), "Balance");
    }

    #[test]
    fn tr_reads_the_active_dictionary() {
        let localizer = test_localizer();
        assert_eq!(localizer.tr("ledger.balance"), "结余");
    }

    #[test]
    fn tr_falls_back_to_primary_locale() {
        let mut localizer = test_localizer();
        localizer.switch_locale("en-US");
        // Absent in en-US, present in zh-CN.
        assert_eq!(localizer.tr("ledger.income"), "收入");
    }

    #[test]
    fn tr_degrades_to_the_key_path() {
        let localizer = test_localizer();
        assert_eq!(localizer.tr("nowhere.to.be.found"), "nowhere.to.be.found");
    }

    #[test]
    fn listeners_fire_on_switch_but_not_on_no_op() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);

        let mut localizer = test_localizer();
        localizer.subscribe(move |_| *sink.borrow_mut() += 1);

        localizer.switch_locale("en-US");
        localizer.switch_locale("fr-FR");
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn supported_locales_carry_display_names_in_order() {
        let localizer = test_localizer();
        let entries = localizer.supported_locales();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code, lang("zh-CN"));
        assert_eq!(entries[0].name, "简体中文");
        assert_eq!(entries[1].code, lang("en-US"));
        assert_eq!(entries[1].name, "English");
    }

    #[test]
    fn display_name_defaults_to_code_string() {
        let mut catalog = Catalog::new();
        catalog.insert(lang("zh-CN"), Dictionary::default());
        let localizer = Localizer::new(
            catalog,
            Box::new(MemoryStore::new()),
            &FixedLanguage::unavailable(),
        )
        .unwrap();

        let entries = localizer.supported_locales();
        assert_eq!(entries[0].name, "zh-CN");
    }
}
