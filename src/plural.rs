//! CLDR plural categories and per-language category resolution.

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::fmt;
use std::sync::OnceLock;

use serde::{
    Deserialize,
    Serialize,
};

use crate::locale::Locale;

/// Grammatical-number category.
///
/// Variants are declared in canonical order, so `Ord` (and therefore any
/// `BTreeMap<PluralCategory, _>`) enumerates zero, one, two, few, many, other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralCategory {
    /// `zero`
    Zero,
    /// `one`
    One,
    /// `two`
    Two,
    /// `few`
    Few,
    /// `many`
    Many,
    /// `other`
    Other,
}

impl PluralCategory {
    /// All categories in canonical order.
    pub const ALL: [Self; 6] = [Self::Zero, Self::One, Self::Two, Self::Few, Self::Many, Self::Other];

    /// Category name as written in interchange files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }

    /// Parses a category name. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == name)
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Embedded CLDR table: language code to its ordered categories.
const PLURALS_JSON: &str = include_str!("../data/plurals.json");

/// Parsed table, initialized on first lookup.
static PLURAL_TABLE: OnceLock<HashMap<String, Vec<PluralCategory>>> = OnceLock::new();

/// Categories used for languages absent from the table.
const OTHER_ONLY: &[PluralCategory] = &[PluralCategory::Other];

/// Parses the embedded table. A broken table degrades to empty, which makes
/// every language "other"-only.
fn parse_table() -> HashMap<String, Vec<PluralCategory>> {
    serde_json::from_str(PLURALS_JSON)
        .map_err(|e| tracing::error!("Failed to parse plural category table: {e:?}"))
        .unwrap_or_default()
}

/// Returns the categories required by the language of `locale`, in canonical order.
///
/// Accepts either a bare language (`"ru"`) or a full tag (`"ru-RU"`).
/// Languages missing from the table require only `other`.
#[must_use]
pub fn categories_for(locale: &str) -> &'static [PluralCategory] {
    let language = Locale::parse(locale).language;
    PLURAL_TABLE
        .get_or_init(parse_table)
        .get(&language)
        .map_or(OTHER_ONLY, Vec::as_slice)
}

/// Resolves the value for `category` from authored plural forms.
///
/// Exact match first. `one` has no fallback; every other category falls back
/// to the `other` form.
#[must_use]
pub fn resolve(category: PluralCategory, forms: &BTreeMap<PluralCategory, String>) -> Option<&str> {
    if let Some(value) = forms.get(&category) {
        return Some(value);
    }
    if category == PluralCategory::One {
        return None;
    }
    forms.get(&PluralCategory::Other).map(String::as_str)
}

/// Expands authored plural forms to the full category set of `locale`.
///
/// Categories that cannot be resolved are left out.
#[must_use]
pub fn expand_for_locale(
    forms: &BTreeMap<PluralCategory, String>,
    locale: &str,
) -> BTreeMap<PluralCategory, String> {
    categories_for(locale)
        .iter()
        .filter_map(|&category| resolve(category, forms).map(|value| (category, value.to_owned())))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use PluralCategory::{
        Few,
        Many,
        One,
        Other,
        Two,
        Zero,
    };

    #[rstest]
    #[case("en", &[One, Other])]
    #[case("en-US", &[One, Other])]
    #[case("ja", &[Other])]
    #[case("zh-Hans-CN", &[Other])]
    #[case("ru-RU", &[One, Few, Many, Other])]
    #[case("pl", &[One, Few, Many, Other])]
    #[case("es-US", &[One, Many, Other])]
    #[case("he", &[One, Two, Other])]
    #[case("ar", &[Zero, One, Two, Few, Many, Other])]
    fn categories_for_known_languages(#[case] locale: &str, #[case] expected: &[PluralCategory]) {
        assert_that!(categories_for(locale), eq(expected));
    }

    #[rstest]
    #[case("xx")]
    #[case("tlh-KL")]
    #[case("")]
    fn unknown_language_is_other_only(#[case] locale: &str) {
        assert_that!(categories_for(locale), eq(&[Other][..]));
    }

    #[rstest]
    fn category_order_is_canonical() {
        let mut shuffled = vec![Other, Few, Zero, Many, One, Two];
        shuffled.sort();
        assert_that!(shuffled, eq(&PluralCategory::ALL.to_vec()));
    }

    #[rstest]
    #[case("zero", Some(Zero))]
    #[case("many", Some(Many))]
    #[case("several", None)]
    #[case("Other", None)]
    fn from_name(#[case] name: &str, #[case] expected: Option<PluralCategory>) {
        assert_that!(PluralCategory::from_name(name), eq(expected));
    }

    #[fixture]
    fn friends() -> BTreeMap<PluralCategory, String> {
        BTreeMap::from([
            (One, "%d friend commented".to_owned()),
            (Other, "%d friends commented".to_owned()),
        ])
    }

    #[rstest]
    fn resolve_prefers_exact_match(friends: BTreeMap<PluralCategory, String>) {
        assert_that!(resolve(One, &friends), some(eq("%d friend commented")));
        assert_that!(resolve(Few, &friends), some(eq("%d friends commented")));
    }

    #[rstest]
    fn resolve_one_has_no_fallback() {
        let forms = BTreeMap::from([(Other, "items".to_owned())]);
        assert_that!(resolve(One, &forms), none());
        assert_that!(resolve(Two, &forms), some(eq("items")));
    }

    #[rstest]
    fn expand_for_russian(friends: BTreeMap<PluralCategory, String>) {
        let expanded = expand_for_locale(&friends, "ru-RU");
        assert_that!(expanded.len(), eq(4));
        assert_that!(expanded[&One], eq("%d friend commented"));
        assert_that!(expanded[&Few], eq("%d friends commented"));
        assert_that!(expanded[&Many], eq("%d friends commented"));
        assert_that!(expanded[&Other], eq("%d friends commented"));
    }

    #[rstest]
    fn expand_for_japanese_keeps_other_only(friends: BTreeMap<PluralCategory, String>) {
        let expanded = expand_for_locale(&friends, "ja-JP");
        assert_that!(expanded.keys().copied().collect::<Vec<_>>(), eq(&vec![Other]));
    }
}
