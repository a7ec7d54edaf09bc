// SPDX-License-Identifier: MPL-2.0
//! The current-locale cell: a single mutable slot observed by UI consumers.
//!
//! The cell is an owned value injected into whoever needs it, not a process
//! global, so independent instances can coexist (and be tested) side by side.
//! There is exactly one writer path ([`LocaleCell::set`]); listeners run
//! synchronously inside that call, in registration order.

use std::fmt;
use unic_langid::LanguageIdentifier;

type Listener = Box<dyn FnMut(&LanguageIdentifier)>;

pub struct LocaleCell {
    value: LanguageIdentifier,
    listeners: Vec<Listener>,
}

impl LocaleCell {
    pub fn new(initial: LanguageIdentifier) -> Self {
        Self {
            value: initial,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> &LanguageIdentifier {
        &self.value
    }

    /// Overwrites the cell and notifies every listener before returning.
    pub fn set(&mut self, value: LanguageIdentifier) {
        self.value = value;
        let current = self.value.clone();
        for listener in &mut self.listeners {
            listener(&current);
        }
    }

    /// Registers a listener invoked on every write. Listeners are never
    /// removed; they live as long as the cell.
    pub fn subscribe(&mut self, listener: impl FnMut(&LanguageIdentifier) + 'static) {
        self.listeners.push(Box::new(listener));
    }
}

impl fmt::Debug for LocaleCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleCell")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
