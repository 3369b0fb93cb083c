//! Source and target content of a resource.

use std::collections::BTreeMap;

use crate::plural::PluralCategory;

/// Picks one element of an array or one form of a plural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Array element index.
    Index(usize),
    /// Plural category.
    Category(PluralCategory),
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<PluralCategory> for Selector {
    fn from(category: PluralCategory) -> Self {
        Self::Category(category)
    }
}

/// Sparse array content. `None` marks a gap that must be preserved.
pub type ArrayItems = Vec<Option<String>>;

/// Plural forms keyed by category, iterated in canonical order.
pub type PluralForms = BTreeMap<PluralCategory, String>;

/// Content of a resource, discriminated by resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A single string.
    String {
        /// Source text.
        source: String,
        /// Translated text.
        target: Option<String>,
    },
    /// An ordered list of strings.
    Array {
        /// Source items.
        source: ArrayItems,
        /// Translated items, parallel to `source`.
        target: Option<ArrayItems>,
    },
    /// Plural forms.
    Plural {
        /// Source forms.
        source: PluralForms,
        /// Translated forms.
        target: Option<PluralForms>,
    },
}

impl Payload {
    /// Number of translatable units.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::String { .. } => 1,
            Self::Array { source, .. } => source.len(),
            Self::Plural { source, .. } => source.len(),
        }
    }

    /// `true` when any target content is present.
    #[must_use]
    pub fn has_target(&self) -> bool {
        match self {
            Self::String { target, .. } => target.is_some(),
            Self::Array { target, .. } => target.as_ref().is_some_and(|t| t.iter().any(Option::is_some)),
            Self::Plural { target, .. } => target.as_ref().is_some_and(|t| !t.is_empty()),
        }
    }

    /// Source text for `selector`. Strings ignore the selector.
    #[must_use]
    pub fn source_at(&self, selector: Option<Selector>) -> Option<&str> {
        match (self, selector) {
            (Self::String { source, .. }, _) => Some(source.as_str()),
            (Self::Array { source, .. }, Some(Selector::Index(i))) => array_item(source, i),
            (Self::Plural { source, .. }, Some(Selector::Category(c))) => {
                source.get(&c).map(String::as_str)
            }
            _ => None,
        }
    }

    /// Target text for `selector`. Strings ignore the selector.
    #[must_use]
    pub fn target_at(&self, selector: Option<Selector>) -> Option<&str> {
        match (self, selector) {
            (Self::String { target, .. }, _) => target.as_deref(),
            (Self::Array { target: Some(target), .. }, Some(Selector::Index(i))) => {
                array_item(target, i)
            }
            (Self::Plural { target: Some(target), .. }, Some(Selector::Category(c))) => {
                target.get(&c).map(String::as_str)
            }
            _ => None,
        }
    }

    /// Patches one source element or form. See [`patch_items`].
    pub(crate) fn patch_source(&mut self, selector: Selector, value: &str) {
        match (self, selector) {
            (Self::Array { source, .. }, Selector::Index(i)) => patch_items(source, i, value),
            (Self::Plural { source, .. }, Selector::Category(c)) => {
                source.insert(c, value.to_owned());
            }
            _ => {}
        }
    }

    /// Patches one target element or form, creating the target if needed.
    pub(crate) fn patch_target(&mut self, selector: Selector, value: &str) {
        match (self, selector) {
            (Self::Array { target, .. }, Selector::Index(i)) => {
                patch_items(target.get_or_insert_with(Vec::new), i, value);
            }
            (Self::Plural { target, .. }, Selector::Category(c)) => {
                target.get_or_insert_with(BTreeMap::new).insert(c, value.to_owned());
            }
            _ => {}
        }
    }

    /// `true` when both payloads hold the same source after whitespace collapsing.
    pub(crate) fn same_clean_source(&self, other: &Self) -> bool {
        use super::hash::same_clean_text;

        match (self, other) {
            (Self::String { source: a, .. }, Self::String { source: b, .. }) => same_clean_text(a, b),
            (Self::Array { source: a, .. }, Self::Array { source: b, .. }) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| match (x, y) {
                        (Some(x), Some(y)) => same_clean_text(x, y),
                        (None, None) => true,
                        _ => false,
                    })
            }
            (Self::Plural { source: a, .. }, Self::Plural { source: b, .. }) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|((ca, x), (cb, y))| ca == cb && same_clean_text(x, y))
            }
            _ => false,
        }
    }
}

/// Non-gap item at `index`.
fn array_item(items: &[Option<String>], index: usize) -> Option<&str> {
    items.get(index).and_then(Option::as_deref)
}

/// Sets `items[index]`, growing the array with gaps when `index` is past the end.
fn patch_items(items: &mut ArrayItems, index: usize, value: &str) {
    if items.len() <= index {
        items.resize(index + 1, None);
    }
    if let Some(slot) = items.get_mut(index) {
        *slot = Some(value.to_owned());
    }
}
