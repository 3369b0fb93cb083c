//! XLIFF interchange codec.
//!
//! An [`Xliff`] collects resources and writes them as an XLIFF 1.2 or 2.0
//! document, or reads either version back into resources. Arrays and
//! plurals are written as one unit per element or category and reassembled
//! on read.
//!
//! XLIFF 1.2 と 2.0 は互換性がないが、どちらも同じユニット表現
//! (`unit::Unit`) を経由して読み書きする。

/// Async file access
mod io;
/// Document parsing and version dispatch
mod reader;
/// Flat unit representation shared by both versions
mod unit;
/// XLIFF 1.2
mod v1;
/// XLIFF 2.0
mod v2;
/// XML output
mod writer;

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::error::XliffError;
use crate::resource::{
    DEFAULT_SOURCE_LOCALE,
    Resource,
};
use crate::translation_set::{
    Criteria,
    TranslationSet,
};
use unit::IdCounter;
use writer::Element;

/// Namespace of the `l:` attributes in 2.0 documents.
pub const LOCTOOL_NAMESPACE: &str = "http://ilib-js.com/loctool";

/// Schema version of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum XliffVersion {
    /// XLIFF 1.2, with `trans-unit` elements grouped by file.
    #[default]
    V1_2,
    /// XLIFF 2.0, with `unit` elements grouped by file and datatype.
    V2_0,
}

impl XliffVersion {
    /// Value of the `version` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1_2 => "1.2",
            Self::V2_0 => "2.0",
        }
    }

    /// Parses a `version` attribute. 1.x reads as 1.2, 2.x as 2.0.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "1.0" | "1.1" | "1.2" => Some(Self::V1_2),
            "2.0" | "2.1" => Some(Self::V2_0),
            _ => None,
        }
    }
}

impl fmt::Display for XliffVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tool information written in each file header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolHeader {
    /// `tool-id`
    pub tool_id: Option<String>,
    /// `tool-name`
    pub tool_name: Option<String>,
    /// `tool-version`
    pub tool_version: Option<String>,
    /// `tool-company`
    pub tool_company: Option<String>,
    /// `copyright`
    pub copyright: Option<String>,
}

impl ToolHeader {
    /// `true` when no field is set. Empty headers are not written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tool_id.is_none()
            && self.tool_name.is_none()
            && self.tool_version.is_none()
            && self.tool_company.is_none()
            && self.copyright.is_none()
    }

    /// `<header><tool .../></header>`, or `None` when empty.
    fn element(&self) -> Option<Element> {
        if self.is_empty() {
            return None;
        }
        let tool = Element::new("tool")
            .attr_opt("tool-id", self.tool_id.as_deref())
            .attr_opt("tool-name", self.tool_name.as_deref())
            .attr_opt("tool-version", self.tool_version.as_deref())
            .attr_opt("tool-company", self.tool_company.as_deref())
            .attr_opt("copyright", self.copyright.as_deref());
        Some(Element::new("header").child(tool))
    }
}

/// Settings of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XliffOptions {
    /// Version written by [`Xliff::serialize`]. Reading detects the version
    /// from the document.
    pub version: XliffVersion,
    /// Keep instances of a resource that differ only in comment.
    pub allow_dups: bool,
    /// Tool header.
    pub header: ToolHeader,
    /// File the document is read from or written to.
    pub path: Option<PathBuf>,
    /// Source locale. Resources targeted at it are not added. Defaults to the
    /// source locale of each resource.
    pub source_locale: Option<String>,
    /// Target locale of a 2.0 document. Defaults to the first target locale
    /// among the resources.
    pub target_locale: Option<String>,
}

impl XliffOptions {
    /// Options for writing `version`.
    #[must_use]
    pub fn new(version: XliffVersion) -> Self {
        Self { version, ..Self::default() }
    }
}

/// An interchange document under construction or read from disk.
#[derive(Debug, Clone, Default)]
pub struct Xliff {
    /// Document settings.
    options: XliffOptions,
    /// Resources keyed by hash key and path, in insertion order.
    resources: IndexMap<String, Resource>,
}

impl Xliff {
    /// An empty document.
    #[must_use]
    pub fn new(options: XliffOptions) -> Self {
        Self { options, resources: IndexMap::new() }
    }

    /// Parses `content` into a new document.
    ///
    /// # Errors
    /// [`XliffError::Format`] for malformed input and
    /// [`XliffError::UnsupportedVersion`] for unknown schema versions.
    pub fn parse(content: &str, options: XliffOptions) -> Result<Self, XliffError> {
        let mut xliff = Self::new(options);
        xliff.deserialize(content)?;
        Ok(xliff)
    }

    /// Document settings.
    #[must_use]
    pub const fn options(&self) -> &XliffOptions {
        &self.options
    }

    /// Version written by [`serialize`](Self::serialize).
    #[must_use]
    pub const fn version(&self) -> XliffVersion {
        self.options.version
    }

    /// Adds a resource.
    ///
    /// Resources whose target locale is the source locale are ignored. A
    /// resource with the key and path of an existing one replaces it in
    /// place, unless duplicates are allowed and it is an instance of the
    /// existing resource, in which case it is kept as another instance.
    pub fn add_resource(&mut self, resource: Resource) {
        let source_locale =
            self.options.source_locale.as_deref().unwrap_or_else(|| resource.source_locale());
        if resource.target_locale() == Some(source_locale) {
            tracing::debug!(key = resource.key(), "Skipping resource targeted at the source locale");
            return;
        }

        let key = format!("{}_{}", resource.hash_key(), resource.path().unwrap_or_default());
        let merge = self.options.allow_dups
            && self.resources.get(&key).is_some_and(|existing| existing.is_instance(&resource));
        if merge {
            if let Some(existing) = self.resources.get_mut(&key) {
                existing.add_instance(resource);
            }
        } else {
            self.resources.insert(key, resource);
        }
    }

    /// Adds every resource yielded by `resources`.
    pub fn add_resources(&mut self, resources: impl IntoIterator<Item = Resource>) {
        for resource in resources {
            self.add_resource(resource);
        }
    }

    /// Adds every resource in `set`.
    pub fn add_set(&mut self, set: &TranslationSet) {
        self.add_resources(set.get_all().cloned());
    }

    /// Resources in insertion order.
    pub fn resources(&self) -> impl ExactSizeIterator<Item = &Resource> {
        self.resources.values()
    }

    /// Resources matching `criteria`.
    #[must_use]
    pub fn get_by(&self, criteria: &Criteria) -> Vec<&Resource> {
        self.resources.values().filter(|r| criteria.matches(r)).collect()
    }

    /// Number of resources. Instances are not counted.
    #[must_use]
    pub fn size(&self) -> usize {
        self.resources.len()
    }

    /// The resources as a translation set.
    #[must_use]
    pub fn translation_set(&self) -> TranslationSet {
        let source_locale = self.options.source_locale.as_deref().unwrap_or(DEFAULT_SOURCE_LOCALE);
        let mut set = TranslationSet::new(source_locale);
        set.add_all(self.resources.values().cloned());
        set
    }

    /// Writes the document in the configured version.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut ids = IdCounter::default();
        match self.options.version {
            XliffVersion::V1_2 => {
                let units: Vec<_> =
                    self.resources.values().flat_map(|r| unit::number(r, &mut ids)).collect();
                v1::serialize(&units, &self.options.header)
            }
            XliffVersion::V2_0 => {
                let first = self.resources.values().next();
                let source_locale = self
                    .options
                    .source_locale
                    .as_deref()
                    .or_else(|| first.map(Resource::source_locale))
                    .unwrap_or(DEFAULT_SOURCE_LOCALE);
                let target_locale = self
                    .options
                    .target_locale
                    .as_deref()
                    .or_else(|| self.resources.values().find_map(Resource::target_locale));
                let units: Vec<_> = self
                    .resources
                    .values()
                    .filter(|r| {
                        let keep = r.target_locale().is_none_or(|l| Some(l) == target_locale);
                        if !keep {
                            tracing::debug!(key = r.key(), "Skipping resource for another target locale");
                        }
                        keep
                    })
                    .flat_map(|r| unit::number(r, &mut ids))
                    .collect();
                v2::serialize(&units, &self.options.header, source_locale, target_locale)
            }
        }
    }

    /// Reads a 1.2 or 2.0 document and adds its resources.
    ///
    /// # Errors
    /// [`XliffError::Format`] for malformed input and
    /// [`XliffError::UnsupportedVersion`] for unknown schema versions. Nothing
    /// is added when an error is returned.
    pub fn deserialize(&mut self, content: &str) -> Result<(), XliffError> {
        let (version, units) = reader::parse(content)?;
        tracing::debug!(%version, units = units.len(), "Parsed xliff document");
        self.add_resources(unit::assemble(units));
        Ok(())
    }
}
