//! Locale tag parsing.
//!
//! Tags look like `language[-Script][-REGION][-variant...]`. Subtags are
//! classified by shape: a titlecase four-letter subtag before the region is
//! a script, two uppercase letters or three digits are a region, and
//! anything else after the language is part of the variant.

use std::fmt;

/// A parsed locale tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Lowercase language code, empty when the tag has none.
    pub language: String,
    /// Titlecase script code (`Hans`, `Hant`, `Arab`).
    pub script: Option<String>,
    /// Uppercase region code or UN M.49 number.
    pub region: Option<String>,
    /// Everything after the standard subtags, joined with `-`.
    pub variant: Option<String>,
}

impl Locale {
    /// Parses a tag. `_` is accepted as a separator. Never fails; unrecognized
    /// subtags end up in the variant.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let mut locale = Self::default();
        let mut variant: Vec<&str> = Vec::new();

        for (position, part) in tag.split(['-', '_']).filter(|p| !p.is_empty()).enumerate() {
            if position == 0 && is_language(part) {
                locale.language = part.to_ascii_lowercase();
            } else if variant.is_empty()
                && locale.script.is_none()
                && locale.region.is_none()
                && is_script(part)
            {
                locale.script = Some(part.to_owned());
            } else if variant.is_empty() && locale.region.is_none() && is_region(part) {
                locale.region = Some(part.to_owned());
            } else {
                variant.push(part);
            }
        }

        if !variant.is_empty() {
            locale.variant = Some(variant.join("-"));
        }
        locale
    }

    /// The same locale without its variant.
    #[must_use]
    pub fn without_variant(&self) -> Self {
        Self { variant: None, ..self.clone() }
    }

    /// Returns a copy carrying `variant`.
    #[must_use]
    pub fn with_variant(mut self, variant: Option<&str>) -> Self {
        self.variant = variant.map(str::to_owned);
        self
    }

    /// Canonical tag string.
    #[must_use]
    pub fn spec(&self) -> String {
        self.to_string()
    }

    /// `true` for languages written without spaces between words.
    #[must_use]
    pub fn is_asian(&self) -> bool {
        matches!(self.language.as_str(), "zh" | "ja" | "ko" | "th")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            Some(self.language.as_str()).filter(|l| !l.is_empty()),
            self.script.as_deref(),
            self.region.as_deref(),
            self.variant.as_deref(),
        ];
        let mut first = true;
        for part in parts.into_iter().flatten() {
            if !first {
                f.write_str("-")?;
            }
            f.write_str(part)?;
            first = false;
        }
        Ok(())
    }
}

/// 2-3 ASCII letters.
fn is_language(part: &str) -> bool {
    (2..=3).contains(&part.len()) && part.chars().all(|c| c.is_ascii_alphabetic())
}

/// `Xxxx`
fn is_script(part: &str) -> bool {
    let mut chars = part.chars();
    part.len() == 4
        && chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_lowercase())
}

/// `XX` or `999`
fn is_region(part: &str) -> bool {
    (part.len() == 2 && part.chars().all(|c| c.is_ascii_uppercase()))
        || (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()))
}
