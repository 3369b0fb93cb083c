//! Translatable resources and their identity.
//!
//! A [`Resource`] is a value object: identity fields, metadata and a
//! [`Payload`] holding string, array or plural content. Its
//! [`hash_key`](Resource::hash_key) is a pure function of the identity fields
//! and is what a [`TranslationSet`](crate::translation_set::TranslationSet)
//! keys on.
//!
//! The locale segment of the key is the target locale when one is present,
//! otherwise the source locale. Attaching a target therefore re-keys the
//! resource; use [`hash_key_for_translation`](Resource::hash_key_for_translation)
//! to find the translated counterpart of a source resource.

/// Key and source hashing
mod hash;
/// Source/target content
mod payload;

use std::fmt;

pub use hash::source_hash;
pub use payload::{
    ArrayItems,
    Payload,
    PluralForms,
    Selector,
};

use crate::pseudo::Localizer;

/// Source locale assumed when none is given.
pub const DEFAULT_SOURCE_LOCALE: &str = "en-US";

/// Resource type as written in interchange files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResType {
    /// `string`
    String,
    /// `array`
    Array,
    /// `plural`
    Plural,
}

impl ResType {
    /// Interchange name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Array => "array",
            Self::Plural => "plural",
        }
    }

    /// Parses an interchange name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "array" => Some(Self::Array),
            "plural" => Some(Self::Plural),
            _ => None,
        }
    }

    /// Datatype written when a resource has none.
    #[must_use]
    pub const fn default_datatype(self) -> &'static str {
        match self {
            Self::String => "plaintext",
            Self::Array | Self::Plural => "x-android-resource",
        }
    }
}

impl fmt::Display for ResType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity scheme of a string resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StringKind {
    /// Key, locale, datatype and flavor.
    #[default]
    Plain,
    /// Adds the context to the identity.
    Context,
    /// Adds the context and a hash of the source text.
    SourceHashed,
    /// Adds the originating file path.
    PathQualified,
}

impl StringKind {
    /// Hash key prefix.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Plain => "rs",
            Self::Context => "crs",
            Self::SourceHashed => "scrs",
            Self::PathQualified => "irs",
        }
    }

    /// Parses a hash key prefix.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "rs" => Some(Self::Plain),
            "crs" => Some(Self::Context),
            "scrs" => Some(Self::SourceHashed),
            "irs" => Some(Self::PathQualified),
            _ => None,
        }
    }

    /// Kind a string with or without a context gets when none is recorded.
    #[must_use]
    pub const fn implied(has_context: bool) -> Self {
        if has_context { Self::Context } else { Self::Plain }
    }
}

/// Where a resource's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    /// Extracted from source code.
    #[default]
    Source,
    /// Produced by translation or pseudo-localization.
    Target,
}

impl Origin {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }
}

/// One translatable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Identity scheme, meaningful for string payloads.
    kind: StringKind,
    /// Authored or derived key.
    key: String,
    /// Project the resource belongs to.
    project: Option<String>,
    /// Disambiguating context.
    context: Option<String>,
    /// Datatype of the file it was extracted from.
    datatype: Option<String>,
    /// Build flavor.
    flavor: Option<String>,
    /// Locale of the source text.
    source_locale: String,
    /// Locale of the target content.
    target_locale: Option<String>,
    /// Content.
    payload: Payload,
    /// Originating file path.
    path: Option<String>,
    /// Translator note.
    comment: Option<String>,
    /// Translation state, e.g. `new` or `translated`.
    state: Option<String>,
    /// Where the content came from.
    origin: Origin,
    /// Interchange unit id.
    id: Option<String>,
    /// Do-not-translate flag.
    dnt: bool,
    /// Other instances of this resource that differ only in metadata.
    instances: Vec<Resource>,
}

impl Resource {
    /// Creates a resource around `payload` with default metadata.
    #[must_use]
    pub fn new(key: impl Into<String>, payload: Payload) -> Self {
        Self {
            kind: StringKind::Plain,
            key: key.into(),
            project: None,
            context: None,
            datatype: None,
            flavor: None,
            source_locale: DEFAULT_SOURCE_LOCALE.to_owned(),
            target_locale: None,
            payload,
            path: None,
            comment: None,
            state: None,
            origin: Origin::Source,
            id: None,
            dnt: false,
            instances: Vec::new(),
        }
    }

    /// A source-only string resource.
    #[must_use]
    pub fn string(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(key, Payload::String { source: source.into(), target: None })
    }

    /// A source-only array resource.
    #[must_use]
    pub fn array(key: impl Into<String>, source: ArrayItems) -> Self {
        Self::new(key, Payload::Array { source, target: None })
    }

    /// A source-only plural resource.
    #[must_use]
    pub fn plural(key: impl Into<String>, source: PluralForms) -> Self {
        Self::new(key, Payload::Plural { source, target: None })
    }

    // ===== builders =====

    /// Sets the string identity scheme.
    #[must_use]
    pub const fn with_kind(mut self, kind: StringKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the project.
    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Sets the context.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Sets the datatype.
    #[must_use]
    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    /// Sets the flavor.
    #[must_use]
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    /// Sets the source locale.
    #[must_use]
    pub fn with_source_locale(mut self, locale: impl Into<String>) -> Self {
        self.source_locale = locale.into();
        self
    }

    /// Sets the target locale.
    #[must_use]
    pub fn with_target_locale(mut self, locale: impl Into<String>) -> Self {
        self.target_locale = Some(locale.into());
        self
    }

    /// Sets or clears the target locale.
    #[must_use]
    pub fn with_target_locale_opt(mut self, locale: Option<String>) -> Self {
        self.target_locale = locale;
        self
    }

    /// Sets the target of a string resource. Ignored for other payloads.
    #[must_use]
    pub fn with_target(mut self, text: impl Into<String>) -> Self {
        if let Payload::String { target, .. } = &mut self.payload {
            *target = Some(text.into());
        }
        self
    }

    /// Sets the target of an array resource. Ignored for other payloads.
    #[must_use]
    pub fn with_target_array(mut self, items: ArrayItems) -> Self {
        if let Payload::Array { target, .. } = &mut self.payload {
            *target = Some(items);
        }
        self
    }

    /// Sets the target of a plural resource. Ignored for other payloads.
    #[must_use]
    pub fn with_target_plural(mut self, forms: PluralForms) -> Self {
        if let Payload::Plural { target, .. } = &mut self.payload {
            *target = Some(forms);
        }
        self
    }

    /// Sets the originating path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the translation state.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the origin.
    #[must_use]
    pub const fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the interchange id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the do-not-translate flag.
    #[must_use]
    pub const fn with_dnt(mut self, dnt: bool) -> Self {
        self.dnt = dnt;
        self
    }

    // ===== accessors =====

    /// Identity scheme.
    #[must_use]
    pub const fn kind(&self) -> StringKind {
        self.kind
    }

    /// Resource type derived from the payload.
    #[must_use]
    pub const fn res_type(&self) -> ResType {
        match self.payload {
            Payload::String { .. } => ResType::String,
            Payload::Array { .. } => ResType::Array,
            Payload::Plural { .. } => ResType::Plural,
        }
    }

    /// Key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Project.
    #[must_use]
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Context.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Datatype, if one was given.
    #[must_use]
    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }

    /// Datatype, falling back to the default of the resource type.
    #[must_use]
    pub fn datatype_or_default(&self) -> &str {
        self.datatype.as_deref().unwrap_or_else(|| self.res_type().default_datatype())
    }

    /// Flavor.
    #[must_use]
    pub fn flavor(&self) -> Option<&str> {
        self.flavor.as_deref()
    }

    /// Source locale.
    #[must_use]
    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    /// Target locale.
    #[must_use]
    pub fn target_locale(&self) -> Option<&str> {
        self.target_locale.as_deref()
    }

    /// Content.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Source text of a string resource.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        match &self.payload {
            Payload::String { source, .. } => Some(source.as_str()),
            _ => None,
        }
    }

    /// Target text of a string resource.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match &self.payload {
            Payload::String { target, .. } => target.as_deref(),
            _ => None,
        }
    }

    /// Source text of the selected element. Strings ignore the selector.
    #[must_use]
    pub fn source_at(&self, selector: Option<Selector>) -> Option<&str> {
        self.payload.source_at(selector)
    }

    /// Target text of the selected element. Strings ignore the selector.
    #[must_use]
    pub fn target_at(&self, selector: Option<Selector>) -> Option<&str> {
        self.payload.target_at(selector)
    }

    /// `true` when any target content is present.
    #[must_use]
    pub fn has_target(&self) -> bool {
        self.payload.has_target()
    }

    /// Originating path.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Translation state.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Origin.
    #[must_use]
    pub const fn origin(&self) -> Origin {
        self.origin
    }

    /// Interchange id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Other instances of this resource.
    #[must_use]
    pub fn instances(&self) -> &[Self] {
        &self.instances
    }

    /// `true` when the resource must not be translated, either by flag or
    /// because its source says so.
    #[must_use]
    pub fn is_dnt(&self) -> bool {
        self.dnt
            || self.source().is_some_and(|s| {
                let s = s.trim().to_lowercase();
                s == "dnt" || s == "do not translate"
            })
    }

    /// Number of translatable units: 1 for strings, elements for arrays,
    /// forms for plurals.
    #[must_use]
    pub fn size(&self) -> usize {
        self.payload.size()
    }

    // ===== identity =====

    /// Locale used in the key: the target locale when present.
    fn key_locale(&self) -> &str {
        self.target_locale.as_deref().unwrap_or(&self.source_locale)
    }

    /// Builds the hash key for `locale` and `key`.
    fn hash_with(&self, locale: &str, key: &str) -> String {
        let project = self.project.as_deref();
        let context = self.context.as_deref();
        let datatype = self.datatype.as_deref().filter(|d| *d != ResType::String.default_datatype());
        let flavor = self.flavor.as_deref();
        let locale = Some(locale).filter(|l| !l.is_empty());
        let key = Some(key);

        match (&self.payload, self.kind) {
            (Payload::Array { .. }, _) => {
                hash::join_segments("ra", &[project, context, locale, key])
            }
            (Payload::Plural { .. }, _) => {
                hash::join_segments("rp", &[project, context, locale, key])
            }
            (Payload::String { .. }, StringKind::Plain) => {
                hash::join_segments(self.kind.tag(), &[project, locale, key, datatype, flavor])
            }
            (Payload::String { .. }, StringKind::Context) => {
                hash::join_segments(self.kind.tag(), &[project, context, locale, key, datatype, flavor])
            }
            (Payload::String { source, .. }, StringKind::SourceHashed) => {
                let sourcehash = hash::source_hash(source);
                hash::join_segments(
                    self.kind.tag(),
                    &[project, context, locale, key, datatype, flavor, sourcehash.as_deref()],
                )
            }
            (Payload::String { .. }, StringKind::PathQualified) => {
                hash::join_segments(self.kind.tag(), &[project, locale, self.path.as_deref(), key, flavor])
            }
        }
    }

    /// Identity key. Total over absent fields.
    ///
    /// A string whose datatype is `plaintext` has the same key as one with
    /// no datatype.
    #[must_use]
    pub fn hash_key(&self) -> String {
        self.hash_with(self.key_locale(), &self.key)
    }

    /// Identity key with whitespace in the key collapsed, for plain strings
    /// whose keys are derived from source text. Other kinds return
    /// [`hash_key`](Self::hash_key).
    #[must_use]
    pub fn clean_hash_key(&self) -> String {
        match (&self.payload, self.kind) {
            (Payload::String { .. }, StringKind::Plain) => {
                self.hash_with(self.key_locale(), &hash::clean_key(&self.key))
            }
            _ => self.hash_key(),
        }
    }

    /// Key this resource would have with `locale` as its target locale.
    #[must_use]
    pub fn hash_key_for_translation(&self, locale: &str) -> String {
        self.hash_with(locale, &self.key)
    }

    /// Same identity and same content. Path, comment, state and origin are ignored.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.key == other.key
            && self.project == other.project
            && self.context == other.context
            && self.datatype == other.datatype
            && self.flavor == other.flavor
            && self.source_locale == other.source_locale
            && self.target_locale == other.target_locale
            && self.payload == other.payload
    }

    /// Same logical unit: identity matches and the source matches after
    /// collapsing whitespace runs. Targets and metadata are ignored.
    #[must_use]
    pub fn is_instance(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.key == other.key
            && self.project == other.project
            && self.context == other.context
            && self.datatype == other.datatype
            && self.flavor == other.flavor
            && self.source_locale == other.source_locale
            && self.target_locale == other.target_locale
            && self.payload.same_clean_source(&other.payload)
    }

    /// Records `other` as another instance of this resource.
    ///
    /// Returns `false` when `other` is not an instance or duplicates this
    /// resource or an existing instance (same content and comment).
    pub fn add_instance(&mut self, other: Self) -> bool {
        if !self.is_instance(&other) {
            return false;
        }
        let duplicate = |r: &Self| r.equals(&other) && r.comment == other.comment;
        if duplicate(self) || self.instances.iter().any(duplicate) {
            return false;
        }
        self.instances.push(other);
        true
    }

    /// Patches one array element or plural form of the source.
    ///
    /// No-op when `value` is `None`, the selector does not fit the payload,
    /// or the resource is a string. Arrays grow when the index is past the end.
    pub fn add_source(&mut self, selector: Selector, value: Option<&str>) {
        if let Some(value) = value {
            self.payload.patch_source(selector, value);
        }
    }

    /// Patches one array element or plural form of the target. Same rules as
    /// [`add_source`](Self::add_source).
    pub fn add_target(&mut self, selector: Selector, value: Option<&str>) {
        if let Some(value) = value {
            self.payload.patch_target(selector, value);
        }
    }

    /// Produces a pseudo-localized clone targeted at `locale`.
    ///
    /// `None` when either argument is absent, or when the localizer yields no
    /// text for a string resource.
    #[must_use]
    pub fn generate_pseudo(
        &self,
        locale: Option<&str>,
        localizer: Option<&dyn Localizer>,
    ) -> Option<Self> {
        let (locale, localizer) = (locale?, localizer?);

        let payload = match &self.payload {
            Payload::String { source, .. } => Payload::String {
                source: source.clone(),
                target: Some(localizer.get_string_for_resource(self, None)?),
            },
            Payload::Array { source, .. } => Payload::Array {
                source: source.clone(),
                target: Some(
                    source
                        .iter()
                        .enumerate()
                        .map(|(i, item)| {
                            item.as_ref().and_then(|_| {
                                localizer.get_string_for_resource(self, Some(Selector::Index(i)))
                            })
                        })
                        .collect(),
                ),
            },
            Payload::Plural { source, .. } => Payload::Plural {
                source: source.clone(),
                target: Some(
                    source
                        .keys()
                        .filter_map(|&category| {
                            localizer
                                .get_string_for_resource(self, Some(Selector::Category(category)))
                                .map(|text| (category, text))
                        })
                        .collect(),
                ),
            },
        };

        Some(Self {
            payload,
            target_locale: Some(locale.to_owned()),
            origin: Origin::Target,
            instances: Vec::new(),
            ..self.clone()
        })
    }
}
