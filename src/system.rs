// SPDX-License-Identifier: MPL-2.0
//! Device system-language query, behind a seam so tests can pin the tag.

/// Best-effort source of the device's language setting.
pub trait SystemLanguage {
    /// The device language as a free-form BCP-47-like tag, or `None` when the
    /// platform cannot say.
    fn current(&self) -> Option<String>;
}

/// Queries the operating system through `sys-locale`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceLanguage;

impl SystemLanguage for DeviceLanguage {
    fn current(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// A fixed tag, for tests and embeddings that manage language themselves.
#[derive(Debug, Clone, Default)]
pub struct FixedLanguage(Option<String>);

impl FixedLanguage {
    pub fn tag(tag: &str) -> Self {
        Self(Some(tag.to_string()))
    }

    /// Behaves like a platform with no readable language setting.
    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl SystemLanguage for FixedLanguage {
    fn current(&self) -> Option<String> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_language_returns_its_tag() {
        assert_eq!(FixedLanguage::tag("zh-TW").current(), Some("zh-TW".to_string()));
    }

    #[test]
    fn unavailable_language_returns_none() {
        assert_eq!(FixedLanguage::unavailable().current(), None);
    }
}
