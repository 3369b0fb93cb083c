//! Passes over a set of extracted source resources.
//!
//! - [`new_strings`]: 未翻訳のリソースを翻訳依頼用に書き出す
//! - [`pseudo_localize`]: 擬似ロケールの訳を生成する
//! - [`inherited_translations`]: 親ロケールの訳を子ロケールへ引き継ぐ

use std::collections::HashMap;

use crate::config::ProjectSettings;
use crate::plural;
use crate::pseudo::{
    Localizer,
    PseudoFactory,
};
use crate::resource::{
    Payload,
    Resource,
};
use crate::translation_set::TranslationSet;

/// State of a target that still needs translating.
pub const NEW_STATE: &str = "new";

/// Source resources of `set` that need translating.
fn source_resources(set: &TranslationSet) -> impl Iterator<Item = &Resource> {
    set.get_all().filter(|r| r.target_locale().is_none() && !r.is_dnt())
}

/// Resources of `set` with no translation into each of `locales` in
/// `translations`, as target-bearing resources in state `new`.
///
/// Strings and arrays get their source as target. Plurals get one target
/// form per category the target language needs, filled from the source by
/// the usual fallback rules. Locales equal to the source locale of `set`
/// are skipped.
#[must_use]
pub fn new_strings<'l>(
    set: &TranslationSet,
    locales: impl IntoIterator<Item = &'l str>,
    translations: &TranslationSet,
) -> TranslationSet {
    let mut out = TranslationSet::new(set.source_locale());
    for locale in locales {
        if locale == set.source_locale() {
            continue;
        }
        let mut count = 0_usize;
        for resource in source_resources(set) {
            if translations.get(&resource.hash_key_for_translation(locale)).is_some() {
                continue;
            }
            let base = resource.clone().with_target_locale(locale).with_state(NEW_STATE);
            let new = match resource.payload() {
                Payload::String { source, .. } => base.with_target(source.clone()),
                Payload::Array { source, .. } => base.with_target_array(source.clone()),
                Payload::Plural { source, .. } => {
                    base.with_target_plural(plural::expand_for_locale(source, locale))
                }
            };
            out.add(new);
            count += 1;
        }
        tracing::debug!(locale, count, "Collected new strings");
    }
    out
}

/// Pseudo translations of the source resources of `set` for every pseudo
/// locale `factory` serves.
///
/// Localizers are created once per locale and datatype. Resources the
/// localizer yields nothing for are left out.
#[must_use]
pub fn pseudo_localize(set: &TranslationSet, factory: &PseudoFactory<'_>) -> TranslationSet {
    let mut out = TranslationSet::new(set.source_locale());
    for locale in factory.pseudo_locales() {
        let mut localizers: HashMap<Option<&str>, Option<Box<dyn Localizer + '_>>> = HashMap::new();
        for resource in source_resources(set) {
            let localizer = localizers
                .entry(resource.datatype())
                .or_insert_with(|| factory.create(locale, resource.datatype()));
            if let Some(pseudo) = resource.generate_pseudo(Some(locale), localizer.as_deref()) {
                out.add(pseudo);
            }
        }
    }
    tracing::debug!(resources = out.size(), "Generated pseudo translations");
    out
}

/// Translations the inheriting locales of `settings` take from their
/// parent locales in `translations`, where they have none of their own.
#[must_use]
pub fn inherited_translations(
    translations: &TranslationSet,
    settings: &ProjectSettings,
) -> TranslationSet {
    let mut out = TranslationSet::new(translations.source_locale());
    for locale in settings.locale_inherit.keys() {
        let Some(parent) = settings.inherit_locale(locale) else {
            continue;
        };
        for resource in translations.get_all().filter(|r| r.target_locale() == Some(parent)) {
            let inherited = resource.clone().with_target_locale(locale.as_str());
            if translations.get(&inherited.hash_key()).is_none() {
                out.add(inherited);
            }
        }
    }
    out
}
