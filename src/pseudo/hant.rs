//! Simplified to Traditional Chinese conversion.
//!
//! 簡体字の翻訳が既にある場合はそれを繁体字に変換し、なければソースを
//! そのまま返す。台湾 (`TW`) と香港系でテーブルを切り替える。

use super::tables::{
    self,
    CharTable,
};
use super::{
    Localizer,
    find_translation,
};
use crate::locale::Locale;
use crate::resource::{
    DEFAULT_SOURCE_LOCALE,
    Resource,
    Selector,
};
use crate::translation_set::TranslationSet;

/// Target used when none is given.
pub const DEFAULT_HANT_LOCALE: &str = "zh-Hant-HK";

/// Locale of the Simplified translations that get converted.
const SIMPLIFIED_LOCALE: &str = "zh-Hans-CN";

/// Traditional Chinese localizer.
#[derive(Debug, Clone)]
pub struct HantPseudo<'a> {
    /// Conversion table for the target region.
    table: &'static CharTable,
    /// Existing translations.
    translations: Option<&'a TranslationSet>,
    /// Locale of the project source.
    source_locale: String,
    /// Locale of the Simplified text that is converted.
    pseudo_source_locale: String,
    /// Locale the output is for.
    target_locale: String,
}

impl Default for HantPseudo<'_> {
    fn default() -> Self {
        Self::new(DEFAULT_HANT_LOCALE)
    }
}

impl<'a> HantPseudo<'a> {
    /// Creates a converter for `target_locale`.
    #[must_use]
    pub fn new(target_locale: impl Into<String>) -> Self {
        let target_locale = target_locale.into();
        let target = Locale::parse(&target_locale);
        let pseudo_source_locale =
            Locale::parse(SIMPLIFIED_LOCALE).with_variant(target.variant.as_deref()).to_string();
        Self {
            table: tables::hant(target.region.as_deref() == Some("TW")),
            translations: None,
            source_locale: DEFAULT_SOURCE_LOCALE.to_owned(),
            pseudo_source_locale,
            target_locale,
        }
    }

    /// Overrides the source locale.
    #[must_use]
    pub fn with_source_locale(mut self, locale: impl Into<String>) -> Self {
        self.source_locale = locale.into();
        self
    }

    /// Looks for existing translations in `set`.
    #[must_use]
    pub const fn with_translations(mut self, set: &'a TranslationSet) -> Self {
        self.translations = Some(set);
        self
    }

    /// Simplified translation of `resource`, if the set has one.
    fn simplified(&self, resource: &Resource, selector: Option<Selector>) -> Option<String> {
        find_translation(self.translations, resource, selector, &self.pseudo_source_locale).or_else(
            || {
                (self.pseudo_source_locale != SIMPLIFIED_LOCALE)
                    .then(|| find_translation(self.translations, resource, selector, SIMPLIFIED_LOCALE))
                    .flatten()
            },
        )
    }
}

impl Localizer for HantPseudo<'_> {
    fn get_string(&self, source: &str) -> String {
        source.chars().map(|c| self.table.get(&c).copied().unwrap_or(c)).collect()
    }

    fn get_string_for_resource(
        &self,
        resource: &Resource,
        selector: Option<Selector>,
    ) -> Option<String> {
        if let Some(translation) =
            find_translation(self.translations, resource, selector, &self.target_locale)
        {
            return Some(translation);
        }
        if let Some(simplified) = self.simplified(resource, selector) {
            return Some(self.get_string(&simplified));
        }
        resource.source_at(selector).map(str::to_owned)
    }

    fn source_locale(&self) -> &str {
        &self.source_locale
    }

    fn pseudo_source_locale(&self) -> &str {
        &self.pseudo_source_locale
    }

    fn target_locale(&self) -> &str {
        &self.target_locale
    }
}
