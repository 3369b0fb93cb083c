//! Dictionary substitution pseudo for regional English.
//!
//! Words are looked up case-insensitively in a spelling table and replaced
//! with the regional spelling, keeping the case pattern of the original.
//! Translations already present in a [`TranslationSet`] win over generated
//! text.

use super::content_type::ContentType;
use super::scanner::Scanner;
use super::tables::{
    self,
    WordTable,
};
use super::{
    Localizer,
    find_translation,
};
use crate::resource::{
    DEFAULT_SOURCE_LOCALE,
    Resource,
    Selector,
};
use crate::translation_set::TranslationSet;

/// Regional spelling table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spelling {
    /// British spelling, also used for Australia and other Commonwealth regions.
    British,
    /// Canadian spelling: `-our` and doubled consonants, but keeps `-ize`.
    Canadian,
    /// British spelling plus abbreviations written without a full stop.
    NewZealand,
}

impl Spelling {
    /// Locale the table is written for.
    #[must_use]
    pub const fn locale(self) -> &'static str {
        match self {
            Self::British => "en-GB",
            Self::Canadian => "en-CA",
            Self::NewZealand => "en-NZ",
        }
    }

    /// Word table.
    fn table(self) -> &'static WordTable {
        match self {
            Self::British => tables::british(),
            Self::Canadian => tables::canadian(),
            Self::NewZealand => tables::new_zealand(),
        }
    }
}

/// Characters that make up a word.
const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-' || c == '\''
}

/// Applies the case pattern of `word` to `translation`.
fn match_case(word: &str, translation: &str) -> String {
    let mut chars = word.chars();
    let first_upper = chars.next().is_some_and(|c| c.is_ascii_uppercase());
    let second_upper = chars.next().is_some_and(|c| c.is_ascii_uppercase());

    if !first_upper {
        return translation.to_owned();
    }
    if second_upper {
        return translation.to_uppercase();
    }
    let mut rest = translation.chars();
    rest.next()
        .map(|first| first.to_uppercase().chain(rest).collect())
        .unwrap_or_default()
}

/// Spelling substitution localizer.
#[derive(Debug, Clone)]
pub struct WordBasedPseudo<'a> {
    /// Table in use.
    spelling: Spelling,
    /// Regions to leave untouched.
    content_type: ContentType,
    /// Existing translations to prefer.
    translations: Option<&'a TranslationSet>,
    /// Locale of the source text.
    source_locale: String,
    /// Locale the output is for.
    target_locale: String,
}

impl<'a> WordBasedPseudo<'a> {
    /// Creates a plain-text localizer for `spelling`.
    #[must_use]
    pub fn new(spelling: Spelling) -> Self {
        Self {
            spelling,
            content_type: ContentType::Text,
            translations: None,
            source_locale: DEFAULT_SOURCE_LOCALE.to_owned(),
            target_locale: spelling.locale().to_owned(),
        }
    }

    /// Sets the content type.
    #[must_use]
    pub const fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Prefers translations found in `set`.
    #[must_use]
    pub const fn with_translations(mut self, set: &'a TranslationSet) -> Self {
        self.translations = Some(set);
        self
    }

    /// Overrides the source locale.
    #[must_use]
    pub fn with_source_locale(mut self, locale: impl Into<String>) -> Self {
        self.source_locale = locale.into();
        self
    }

    /// Overrides the target locale.
    #[must_use]
    pub fn with_target_locale(mut self, locale: impl Into<String>) -> Self {
        self.target_locale = locale.into();
        self
    }

    /// Table in use.
    #[must_use]
    pub const fn spelling(&self) -> Spelling {
        self.spelling
    }

    /// Regional spelling of `word`, case-adjusted.
    fn translate(&self, word: &str) -> Option<String> {
        self.spelling
            .table()
            .get(&word.to_lowercase())
            .map(|translation| match_case(word, translation))
    }

    /// Copies a region that must not be touched.
    fn skip_region(&self, scanner: &mut Scanner, out: &mut String) {
        let Some(c) = scanner.peek(0) else {
            return;
        };
        match self.content_type {
            ContentType::Html | ContentType::Xml | ContentType::Template => match c {
                '&' => scanner.copy_until(out, |s| matches!(s.peek(0), Some(';' | ' '))),
                '\\' if scanner.peek(1) == Some('u') => scanner.copy_n(out, 6),
                '<' if self.content_type == ContentType::Template
                    && scanner.peek(1) == Some('%') =>
                {
                    scanner.copy_until(out, |s| s.starts_with("%>"));
                }
                '<' => scanner.copy_until(out, |s| s.peek(0) == Some('>')),
                _ => {}
            },
            ContentType::Ruby | ContentType::Java | ContentType::JavaScript => match c {
                '{' => scanner.copy_until(out, |s| s.peek(0) == Some('}')),
                '%' if self.content_type == ContentType::Ruby
                    && scanner.peek(1).is_some_and(|n| n.is_uppercase()) =>
                {
                    scanner.copy_n(out, 1);
                    scanner.copy_until(out, |s| s.peek(0) == Some('%'));
                }
                _ => {}
            },
            ContentType::Text | ContentType::C => {}
        }
    }
}

impl Localizer for WordBasedPseudo<'_> {
    fn get_string(&self, source: &str) -> String {
        let mut scanner = Scanner::new(source);
        let mut out = String::with_capacity(source.len());

        while scanner.peek(0).is_some() {
            self.skip_region(&mut scanner, &mut out);

            let word = scanner.take_while(is_word_char);
            if word.is_empty() {
                scanner.copy_n(&mut out, 1);
                continue;
            }
            match self.translate(&word) {
                Some(translation) => out.push_str(&translation),
                None if scanner.peek(0) == Some('.') => {
                    scanner.bump();
                    let abbreviation = format!("{word}.");
                    out.push_str(&self.translate(&abbreviation).unwrap_or(abbreviation));
                }
                None => out.push_str(&word),
            }
        }
        out
    }

    fn get_string_for_resource(
        &self,
        resource: &Resource,
        selector: Option<Selector>,
    ) -> Option<String> {
        find_translation(self.translations, resource, selector, &self.target_locale)
            .or_else(|| resource.source_at(selector).map(|source| self.get_string(source)))
    }

    fn source_locale(&self) -> &str {
        &self.source_locale
    }

    fn target_locale(&self) -> &str {
        &self.target_locale
    }
}
