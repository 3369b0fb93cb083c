//! Flat translation units, the shape both schema versions read and write.
//!
//! 配列と複数形のリソースは要素ごとに 1 ユニットへ展開され、読み込み時には
//! 同じ名前を持つ隣接ユニットから再構成される。

use std::collections::{
    BTreeMap,
    HashMap,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::plural::PluralCategory;
use crate::resource::{
    DEFAULT_SOURCE_LOCALE,
    Payload,
    ResType,
    Resource,
    Selector,
    StringKind,
};

/// Note attached to every plural unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PluralNote {
    /// Category of this unit.
    pub plural_form: String,
    /// Name of the resource the `other` form belongs to.
    pub plural_form_other: String,
}

impl PluralNote {
    /// JSON text of the note.
    pub(super) fn render(category: PluralCategory, key: &str) -> String {
        let note = Self { plural_form: category.as_str().to_owned(), plural_form_other: key.to_owned() };
        serde_json::to_string(&note).unwrap_or_default()
    }

    /// `true` when `text` is a plural note rather than a translator comment.
    pub(super) fn is_plural_note(text: &str) -> bool {
        serde_json::from_str::<Self>(text).is_ok()
    }
}

/// One translation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Unit {
    /// Unit id.
    pub id: Option<String>,
    /// Resource name.
    pub key: String,
    /// Resource type the unit belongs to.
    pub res_type: Option<ResType>,
    /// Datatype.
    pub datatype: Option<String>,
    /// Context.
    pub context: Option<String>,
    /// String identity scheme.
    pub kind: Option<StringKind>,
    /// Array index or plural category.
    pub selector: Option<Selector>,
    /// Source text.
    pub source: String,
    /// Target text.
    pub target: Option<String>,
    /// Target state.
    pub state: Option<String>,
    /// Translator comment.
    pub comment: Option<String>,
    /// Originating file.
    pub path: Option<String>,
    /// Project.
    pub project: Option<String>,
    /// Flavor.
    pub flavor: Option<String>,
    /// Source locale.
    pub source_locale: String,
    /// Target locale.
    pub target_locale: Option<String>,
}

impl Unit {
    /// Unit carrying the shared metadata of `resource`.
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: None,
            key: resource.key().to_owned(),
            res_type: Some(resource.res_type()),
            datatype: resource.datatype().map(str::to_owned),
            context: resource.context().map(str::to_owned),
            kind: matches!(resource.payload(), Payload::String { .. }).then_some(resource.kind()),
            selector: None,
            source: String::new(),
            target: None,
            state: resource.state().map(str::to_owned),
            comment: resource.comment().map(str::to_owned),
            path: resource.path().map(str::to_owned),
            project: resource.project().map(str::to_owned),
            flavor: resource.flavor().map(str::to_owned),
            source_locale: resource.source_locale().to_owned(),
            target_locale: resource.target_locale().map(str::to_owned),
        }
    }

    /// Resource type, `string` when unspecified.
    pub(super) fn res_type(&self) -> ResType {
        self.res_type.unwrap_or(ResType::String)
    }

    /// Plural category, if this is a plural unit.
    pub(super) fn category(&self) -> Option<PluralCategory> {
        match self.selector {
            Some(Selector::Category(category)) => Some(category),
            _ => None,
        }
    }

    /// Array index, if this is an array unit.
    pub(super) fn index(&self) -> Option<usize> {
        match self.selector {
            Some(Selector::Index(index)) => Some(index),
            _ => None,
        }
    }

    /// Datatype written for this unit.
    pub(super) fn datatype_or_default(&self) -> &str {
        self.datatype.as_deref().unwrap_or_else(|| self.res_type().default_datatype())
    }

    /// String identity scheme to record in the document. `None` when the
    /// presence of a context already implies it.
    pub(super) fn recorded_kind(&self) -> Option<StringKind> {
        self.kind
            .filter(|_| self.res_type() == ResType::String)
            .filter(|&kind| kind != StringKind::implied(self.context.is_some()))
    }

    /// Empty resource with this unit's metadata. Array and plural units get
    /// an empty payload to patch into; anything else becomes a string.
    /// The default datatype of the resource type reads as no datatype.
    fn to_resource(&self) -> Resource {
        let payload = match (self.res_type(), self.selector) {
            (ResType::Array, Some(Selector::Index(_))) => {
                Payload::Array { source: Vec::new(), target: None }
            }
            (ResType::Plural, Some(Selector::Category(_))) => {
                Payload::Plural { source: BTreeMap::new(), target: None }
            }
            _ => Payload::String { source: self.source.clone(), target: self.target.clone() },
        };
        let is_string = matches!(payload, Payload::String { .. });

        let mut resource = Resource::new(self.key.clone(), payload)
            .with_source_locale(self.source_locale.clone())
            .with_target_locale_opt(self.target_locale.clone());
        if let Some(context) = &self.context {
            resource = resource.with_context(context.clone());
        }
        if is_string {
            let kind = self.kind.unwrap_or(StringKind::implied(self.context.is_some()));
            resource = resource.with_kind(kind);
        }
        if let Some(id) = &self.id {
            resource = resource.with_id(id.clone());
        }
        let default_datatype = self.res_type().default_datatype();
        if let Some(datatype) = self.datatype.as_deref().filter(|d| *d != default_datatype) {
            resource = resource.with_datatype(datatype);
        }
        if let Some(project) = &self.project {
            resource = resource.with_project(project.clone());
        }
        if let Some(flavor) = &self.flavor {
            resource = resource.with_flavor(flavor.clone());
        }
        if let Some(path) = &self.path {
            resource = resource.with_path(path.clone());
        }
        if let Some(comment) = &self.comment {
            resource = resource.with_comment(comment.clone());
        }
        if let Some(state) = &self.state {
            resource = resource.with_state(state.clone());
        }
        resource
    }

    /// Grouping key for array and plural units of the same resource.
    fn group_key(&self) -> String {
        [
            self.res_type().as_str(),
            &self.key,
            self.context.as_deref().unwrap_or_default(),
            self.datatype.as_deref().unwrap_or_default(),
            self.path.as_deref().unwrap_or_default(),
            self.project.as_deref().unwrap_or_default(),
            self.flavor.as_deref().unwrap_or_default(),
            &self.source_locale,
            self.target_locale.as_deref().unwrap_or_default(),
        ]
        .join("\u{1f}")
    }
}

/// Hands out unit ids in document order.
///
/// Explicit numeric ids are kept and the counter continues after them.
#[derive(Debug)]
pub(super) struct IdCounter {
    /// Next id to hand out.
    next: u64,
}

impl Default for IdCounter {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdCounter {
    /// Id for a unit whose resource declared `explicit`.
    pub(super) fn assign(&mut self, explicit: Option<&str>) -> String {
        match explicit {
            Some(id) => {
                if let Ok(number) = id.parse::<u64>() {
                    self.next = number.saturating_add(1);
                }
                id.to_owned()
            }
            None => {
                let id = self.next;
                self.next = self.next.saturating_add(1);
                id.to_string()
            }
        }
    }
}

/// Expands `resource` into units, without ids.
///
/// Arrays skip missing and empty elements. Plurals with a target follow the
/// target categories, taking the source of each from the same category or
/// `other`; source-only plurals follow the authored categories.
pub(super) fn flatten(resource: &Resource) -> Vec<Unit> {
    let base = Unit::from_resource(resource);
    let unit = |selector: Option<Selector>, source: &str, target: Option<&str>| Unit {
        selector,
        source: source.to_owned(),
        target: target.map(str::to_owned),
        ..base.clone()
    };

    match resource.payload() {
        Payload::String { source, target } => vec![unit(None, source, target.as_deref())],
        Payload::Array { source, target } => source
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let item = item.as_deref().filter(|s| !s.is_empty())?;
                let target = target.as_ref().and_then(|t| t.get(index)).and_then(Option::as_deref);
                Some(unit(Some(Selector::Index(index)), item, target))
            })
            .collect(),
        Payload::Plural { source, target: Some(target) } if !target.is_empty() => target
            .iter()
            .filter_map(|(&category, text)| {
                let source = source.get(&category).or_else(|| source.get(&PluralCategory::Other))?;
                Some(unit(Some(Selector::Category(category)), source, Some(text)))
            })
            .collect(),
        Payload::Plural { source, .. } => source
            .iter()
            .map(|(&category, text)| unit(Some(Selector::Category(category)), text, None))
            .collect(),
    }
}

/// Expands `resource` and its instances into numbered units.
pub(super) fn number(resource: &Resource, ids: &mut IdCounter) -> Vec<Unit> {
    std::iter::once(resource)
        .chain(resource.instances())
        .flat_map(|r| {
            let mut explicit = r.id();
            flatten(r)
                .into_iter()
                .map(|mut unit| {
                    unit.id = Some(ids.assign(explicit.take()));
                    unit
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Rebuilds resources from units read in document order.
///
/// String units map one to one. Array and plural units sharing a name and
/// metadata merge into one resource carrying the id of its first unit.
pub(super) fn assemble(units: Vec<Unit>) -> Vec<Resource> {
    let mut resources: Vec<Resource> = Vec::with_capacity(units.len());
    let mut groups: HashMap<String, usize> = HashMap::new();

    for unit in units {
        let selector = match (unit.res_type(), unit.selector) {
            (ResType::Array, Some(selector @ Selector::Index(_)))
            | (ResType::Plural, Some(selector @ Selector::Category(_))) => Some(selector),
            _ => None,
        };
        let Some(selector) = selector else {
            resources.push(unit.to_resource());
            continue;
        };
        let group = unit.group_key();
        let position = match groups.get(&group) {
            Some(&position) => position,
            None => {
                groups.insert(group, resources.len());
                resources.push(unit.to_resource());
                resources.len() - 1
            }
        };
        if let Some(resource) = resources.get_mut(position) {
            resource.add_source(selector, Some(&unit.source));
            resource.add_target(selector, unit.target.as_deref());
        }
    }
    resources
}

/// Source locale for units that do not declare one.
pub(super) fn default_source_locale(declared: Option<&str>) -> String {
    declared.filter(|l| !l.is_empty()).unwrap_or(DEFAULT_SOURCE_LOCALE).to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::test_utils::{
        forms,
        items,
    };

    #[rstest]
    fn plural_note_json() {
        assert_that!(
            PluralNote::render(PluralCategory::Few, "huzzah"),
            eq(r#"{"pluralForm":"few","pluralFormOther":"huzzah"}"#)
        );
        assert_that!(PluralNote::is_plural_note(r#"{"pluralForm":"one","pluralFormOther":"x"}"#), eq(true));
        assert_that!(PluralNote::is_plural_note("A very nice string"), eq(false));
    }

    // ===== ID 採番 テスト =====

    #[rstest]
    fn ids_continue_after_explicit_number() {
        let mut ids = IdCounter::default();
        assert_that!(ids.assign(None), eq("1"));
        assert_that!(ids.assign(Some("4444444")), eq("4444444"));
        assert_that!(ids.assign(None), eq("4444445"));
        assert_that!(ids.assign(Some("abc")), eq("abc"));
        assert_that!(ids.assign(None), eq("4444446"));
    }

    // ===== 展開 テスト =====

    #[rstest]
    fn array_skips_gaps_but_keeps_indices() {
        let ra = Resource::array("a", vec![Some("x".into()), None, Some(String::new()), Some("y".into())]);
        let units = flatten(&ra);
        assert_that!(units.len(), eq(2));
        assert_that!(units[0].index(), some(eq(0)));
        assert_that!(units[1].index(), some(eq(3)));
        assert_that!(units[1].datatype_or_default(), eq("x-android-resource"));
    }

    #[rstest]
    fn plural_with_target_follows_target_categories() {
        let rp = Resource::plural("p", forms(&[("one", "1 object"), ("other", "{n} objects")]))
            .with_target_locale("ru-RU")
            .with_target_plural(forms(&[("one", "a"), ("few", "b"), ("other", "c")]));
        let units = flatten(&rp);
        let categories: Vec<_> = units.iter().filter_map(Unit::category).collect();
        assert_that!(
            categories,
            eq(&vec![PluralCategory::One, PluralCategory::Few, PluralCategory::Other])
        );
        assert_that!(units[1].source, eq("{n} objects"));
        assert_that!(units[1].target, some(eq("b")));
    }

    #[rstest]
    fn source_only_plural_keeps_authored_categories() {
        let rp = Resource::plural("p", forms(&[("zero", "0"), ("one", "1"), ("few", "few")]));
        let units = flatten(&rp);
        assert_that!(units.len(), eq(3));
        assert_that!(units[0].category(), some(eq(PluralCategory::Zero)));
    }

    #[rstest]
    fn explicit_id_applies_to_first_unit_only() {
        let ra = Resource::array("a", items(&["x", "y"])).with_id("10");
        let mut ids = IdCounter::default();
        let units = number(&ra, &mut ids);
        assert_that!(units[0].id, some(eq("10")));
        assert_that!(units[1].id, some(eq("11")));
    }

    // ===== 再構成 テスト =====

    #[rstest]
    fn assemble_merges_array_units() {
        let ra = Resource::array("a", items(&["x", "y"]))
            .with_project("p")
            .with_target_locale("de-DE")
            .with_target_array(items(&["X", "Y"]))
            .with_id("5");
        let mut ids = IdCounter::default();
        let resources = assemble(number(&ra, &mut ids));

        assert_that!(resources.len(), eq(1));
        assert_that!(resources[0].res_type(), eq(ResType::Array));
        assert_that!(resources[0].id(), some(eq("5")));
        assert_that!(resources[0].source_at(Some(Selector::Index(1))), some(eq("y")));
        assert_that!(resources[0].target_at(Some(Selector::Index(0))), some(eq("X")));
    }

    #[rstest]
    fn assemble_context_string_gets_context_kind() {
        let unit = Unit {
            key: "k".into(),
            source: "s".into(),
            context: Some("c".into()),
            source_locale: "en-US".into(),
            ..Unit::default()
        };
        let resources = assemble(vec![unit]);
        assert_that!(resources[0].kind(), eq(StringKind::Context));
        assert_that!(resources[0].context(), some(eq("c")));
    }

    #[rstest]
    fn assemble_restores_recorded_kind_and_default_datatype() {
        let unit = Unit {
            key: "k".into(),
            kind: Some(StringKind::SourceHashed),
            datatype: Some("plaintext".into()),
            source: "s".into(),
            source_locale: "en-US".into(),
            ..Unit::default()
        };
        let resources = assemble(vec![unit]);
        assert_that!(resources[0].kind(), eq(StringKind::SourceHashed));
        assert_that!(resources[0].datatype(), none());
    }

    #[rstest]
    fn default_source_locale_when_missing() {
        assert_that!(default_source_locale(None), eq("en-US"));
        assert_that!(default_source_locale(Some("")), eq("en-US"));
        assert_that!(default_source_locale(Some("de-DE")), eq("de-DE"));
    }
}
