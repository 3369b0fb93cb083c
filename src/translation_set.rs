//! Ordered, deduplicated store of resources keyed by hash key.

use indexmap::IndexMap;

use crate::resource::{
    DEFAULT_SOURCE_LOCALE,
    ResType,
    Resource,
};

/// Filter for [`TranslationSet::get_by`].
///
/// Every field that is set must match; unset fields match anything. An empty
/// string matches a resource where that field is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Project name.
    pub project: Option<String>,
    /// Context.
    pub context: Option<String>,
    /// Key.
    pub key: Option<String>,
    /// Datatype.
    pub datatype: Option<String>,
    /// Flavor.
    pub flavor: Option<String>,
    /// Source locale.
    pub source_locale: Option<String>,
    /// Target locale.
    pub target_locale: Option<String>,
    /// Resource type.
    pub res_type: Option<ResType>,
}

impl Criteria {
    /// `true` when `resource` satisfies every set field.
    #[must_use]
    pub fn matches(&self, resource: &Resource) -> bool {
        field_matches(self.project.as_deref(), resource.project())
            && field_matches(self.context.as_deref(), resource.context())
            && field_matches(self.key.as_deref(), Some(resource.key()))
            && field_matches(self.datatype.as_deref(), resource.datatype())
            && field_matches(self.flavor.as_deref(), resource.flavor())
            && field_matches(self.source_locale.as_deref(), Some(resource.source_locale()))
            && field_matches(self.target_locale.as_deref(), resource.target_locale())
            && self.res_type.is_none_or(|t| t == resource.res_type())
    }
}

/// Compares one criteria field, treating absent values as empty.
fn field_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    wanted.is_none_or(|w| w == actual.unwrap_or_default())
}

/// Resources keyed by [`Resource::hash_key`], in insertion order.
#[derive(Debug, Clone)]
pub struct TranslationSet {
    /// Locale the source strings are written in.
    source_locale: String,
    /// Resources by hash key.
    resources: IndexMap<String, Resource>,
    /// Set by any mutation, cleared by [`set_clean`](Self::set_clean).
    dirty: bool,
}

impl Default for TranslationSet {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_LOCALE)
    }
}

impl TranslationSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new(source_locale: impl Into<String>) -> Self {
        Self { source_locale: source_locale.into(), resources: IndexMap::new(), dirty: false }
    }

    /// Source locale of the set.
    #[must_use]
    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    /// Inserts or replaces by hash key. A replaced entry keeps its position.
    pub fn add(&mut self, resource: Resource) {
        self.resources.insert(resource.hash_key(), resource);
        self.dirty = true;
    }

    /// Adds every resource in order.
    pub fn add_all(&mut self, resources: impl IntoIterator<Item = Resource>) {
        for resource in resources {
            self.add(resource);
        }
    }

    /// Adds every resource of `other`.
    pub fn add_set(&mut self, other: &Self) {
        self.add_all(other.resources.values().cloned());
    }

    /// Looks up by hash key.
    #[must_use]
    pub fn get(&self, hash_key: &str) -> Option<&Resource> {
        self.resources.get(hash_key)
    }

    /// Mutable lookup by hash key, for indexed patches.
    pub fn get_mut(&mut self, hash_key: &str) -> Option<&mut Resource> {
        self.dirty = true;
        self.resources.get_mut(hash_key)
    }

    /// Resources matching `criteria`, in insertion order.
    #[must_use]
    pub fn get_by(&self, criteria: &Criteria) -> Vec<&Resource> {
        self.resources.values().filter(|r| criteria.matches(r)).collect()
    }

    /// First resource with the given source text and context.
    #[must_use]
    pub fn get_by_source(&self, source: &str, context: Option<&str>) -> Option<&Resource> {
        self.resources
            .values()
            .find(|r| r.source() == Some(source) && r.context() == context)
    }

    /// All resources in insertion order.
    pub fn get_all(&self) -> impl ExactSizeIterator<Item = &Resource> {
        self.resources.values()
    }

    /// Number of distinct hash keys.
    #[must_use]
    pub fn size(&self) -> usize {
        self.resources.len()
    }

    /// `true` when the set holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Distinct target locales, in order of first appearance.
    #[must_use]
    pub fn get_locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = Vec::new();
        for locale in self.resources.values().filter_map(Resource::target_locale) {
            if !locales.iter().any(|l| l == locale) {
                locales.push(locale.to_owned());
            }
        }
        locales
    }

    /// Distinct project names.
    #[must_use]
    pub fn get_projects(&self) -> Vec<String> {
        let mut projects: Vec<String> = Vec::new();
        for project in self.resources.values().filter_map(Resource::project) {
            if !projects.iter().any(|p| p == project) {
                projects.push(project.to_owned());
            }
        }
        projects
    }

    /// Distinct contexts used within `project`. Absent contexts are skipped.
    #[must_use]
    pub fn get_contexts(&self, project: Option<&str>) -> Vec<String> {
        let mut contexts: Vec<String> = Vec::new();
        for context in self
            .resources
            .values()
            .filter(|r| r.project() == project)
            .filter_map(Resource::context)
        {
            if !contexts.iter().any(|c| c == context) {
                contexts.push(context.to_owned());
            }
        }
        contexts
    }

    /// Removes the entry with the same hash key as `resource`.
    pub fn remove(&mut self, resource: &Resource) -> Option<Resource> {
        let removed = self.resources.shift_remove(&resource.hash_key());
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.resources.clear();
        self.dirty = true;
    }

    /// `true` when the set changed since the last [`set_clean`](Self::set_clean).
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the set as unchanged.
    pub const fn set_clean(&mut self) {
        self.dirty = false;
    }

    /// Resources of `other` that are new here or differ by [`Resource::equals`].
    #[must_use]
    pub fn diff(&self, other: &Self) -> Self {
        let mut changes = Self::new(self.source_locale.clone());
        for resource in other.resources.values() {
            let unchanged = self.get(&resource.hash_key()).is_some_and(|mine| mine.equals(resource));
            if !unchanged {
                changes.add(resource.clone());
            }
        }
        changes
    }
}
