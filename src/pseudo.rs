//! Pseudo-localization engine.
//!
//! Three families of localizer share the [`Localizer`] trait:
//! [`RegularPseudo`] (bracketed diacritics for QA of layout and hard-coded
//! strings), [`WordBasedPseudo`] (regional English spelling substitution) and
//! [`HantPseudo`] (Simplified to Traditional Chinese). [`PseudoFactory`]
//! picks one from a target locale and the project's pseudo-locale settings.

/// Datatype to escape-type mapping
mod content_type;
/// Localizer selection
mod factory;
/// Simplified to Traditional Chinese
mod hant;
/// Generic bracket/diacritic pseudo
mod regular;
/// Character scanner shared by the transforms
mod scanner;
/// Embedded data tables
mod tables;
/// Dictionary substitution pseudo
mod word_based;

use std::fmt;

pub use content_type::ContentType;
pub use factory::{
    PseudoFactory,
    PseudoLocales,
    PseudoStyle,
    default_pseudo_locales,
    default_style,
};
pub use hant::HantPseudo;
pub use regular::{
    DebugScript,
    RegularPseudo,
};
pub use word_based::{
    Spelling,
    WordBasedPseudo,
};

use crate::resource::{
    Resource,
    Selector,
};
use crate::translation_set::TranslationSet;

/// Produces target text for resources.
pub trait Localizer: fmt::Debug {
    /// Transforms a single string.
    fn get_string(&self, source: &str) -> String;

    /// Target text for a resource, or for one element of it when `selector`
    /// is given. `None` when there is nothing to transform.
    fn get_string_for_resource(&self, resource: &Resource, selector: Option<Selector>)
    -> Option<String>;

    /// Locale the generated resources claim as their source.
    fn source_locale(&self) -> &str;

    /// Locale whose text is transformed. Differs from
    /// [`source_locale`](Self::source_locale) only when the transform starts
    /// from an existing translation.
    fn pseudo_source_locale(&self) -> &str {
        self.source_locale()
    }

    /// Locale the output is written for.
    fn target_locale(&self) -> &str;
}

/// Looks up an existing translation of `resource` into `locale` in `set`.
fn find_translation(
    set: Option<&TranslationSet>,
    resource: &Resource,
    selector: Option<Selector>,
    locale: &str,
) -> Option<String> {
    let translated = set?.get(&resource.hash_key_for_translation(locale))?;
    translated.target_at(selector).map(str::to_owned)
}
