//! XLIFF 2.0: one locale pair per document, `unit` elements grouped by
//! file and datatype, metadata in `l:` attributes.

use indexmap::IndexMap;
use roxmltree::Node;

use super::reader::{
    attr,
    child,
    children,
    comment,
    keep_source,
    loctool_attr,
    text_of,
};
use super::unit::{
    PluralNote,
    Unit,
    default_source_locale,
};
use super::writer::{
    self,
    Element,
};
use super::{
    LOCTOOL_NAMESPACE,
    ToolHeader,
};
use crate::plural::PluralCategory;
use crate::resource::{
    ResType,
    Selector,
    StringKind,
};

/// Prefix of the `type` attribute values.
const TYPE_PREFIX: &str = "res:";

/// Units of one `file` element share these.
type FileKey<'a> = (Option<&'a str>, Option<&'a str>, Option<&'a str>);

/// Writes `units` as a 2.0 document for one locale pair.
pub(super) fn serialize(
    units: &[Unit],
    header: &ToolHeader,
    source_locale: &str,
    target_locale: Option<&str>,
) -> String {
    let mut files: IndexMap<FileKey<'_>, IndexMap<&str, Vec<&Unit>>> = IndexMap::new();
    for unit in units {
        let key = (unit.path.as_deref(), unit.project.as_deref(), unit.flavor.as_deref());
        files.entry(key).or_default().entry(unit.datatype_or_default()).or_default().push(unit);
    }

    let mut root = Element::new("xliff")
        .attr("version", "2.0")
        .attr("srcLang", source_locale)
        .attr_opt("trgLang", target_locale)
        .attr("xmlns:l", LOCTOOL_NAMESPACE);

    let mut group_id = 0_usize;
    for ((path, project, flavor), groups) in files {
        let mut file = Element::new("file")
            .attr("original", path.unwrap_or_default())
            .attr_opt("l:project", project)
            .attr_opt("l:flavor", flavor);
        for (datatype, units) in groups {
            group_id += 1;
            let mut group =
                Element::new("group").attr("id", format!("group_{group_id}")).attr("name", datatype);
            for unit in units {
                group.push(unit_element(unit));
            }
            file.push(group);
        }
        if let Some(header) = header.element() {
            file.push(header);
        }
        root.push(file);
    }
    writer::document(&root)
}

/// One `unit`.
fn unit_element(unit: &Unit) -> Element {
    let mut element = Element::new("unit")
        .attr("id", unit.id.as_deref().unwrap_or_default())
        .attr("name", unit.key.as_str())
        .attr("type", format!("{TYPE_PREFIX}{}", unit.res_type()))
        .attr("l:datatype", unit.datatype_or_default())
        .attr_opt("l:context", unit.context.as_deref())
        .attr_opt("l:resclass", unit.recorded_kind().map(StringKind::tag));
    element = match unit.selector {
        Some(Selector::Index(index)) => element.attr("l:index", index.to_string()),
        Some(Selector::Category(category)) => element.attr("l:category", category.as_str()),
        None => element,
    };

    let mut notes = Element::new("notes");
    if let Some(comment) = &unit.comment {
        notes.push(Element::new("note").attr("appliesTo", "source").text(comment.as_str()));
    }
    if let Some(category) = unit.category() {
        notes.push(
            Element::new("note")
                .attr("appliesTo", "source")
                .text(PluralNote::render(category, &unit.key)),
        );
    }
    if notes.has_children() {
        element.push(notes);
    }

    let mut segment = Element::new("segment").child(Element::new("source").text(unit.source.as_str()));
    if let Some(target) = &unit.target {
        segment.push(
            Element::new("target").attr_opt("state", unit.state.as_deref()).text(target.as_str()),
        );
    }
    element.child(segment)
}

/// Reads every `unit` of a 2.0 document.
///
/// Units without a name are keyed by their source, and units without a
/// datatype take the name of the enclosing group. In documents that do not
/// declare the `l:` namespace, files without a project use their path as
/// the project.
pub(super) fn read(root: Node<'_, '_>) -> Vec<Unit> {
    let source_locale = default_source_locale(root.attribute("srcLang"));
    let target_locale = attr(root, "trgLang");
    let foreign = !root.namespaces().any(|ns| ns.uri() == LOCTOOL_NAMESPACE);

    let mut units = Vec::new();
    for file in children(root, "file") {
        let path = attr(file, "original");
        let project = loctool_attr(file, "project").or_else(|| path.clone().filter(|_| foreign));
        let flavor = loctool_attr(file, "flavor");

        for element in file.descendants().filter(|n| n.has_tag_name("unit")) {
            let id = attr(element, "id");
            let segments: Vec<_> = children(element, "segment").collect();
            let source: String =
                segments.iter().filter_map(|s| child(*s, "source")).map(text_of).collect();
            if !keep_source(&source, id.as_deref()) {
                continue;
            }
            let targets: Vec<_> = segments.iter().filter_map(|s| child(*s, "target")).collect();
            let target: String = targets.iter().copied().map(text_of).collect();

            let res_type = element
                .attribute("type")
                .map(|t| t.strip_prefix(TYPE_PREFIX).unwrap_or(t))
                .and_then(ResType::from_name);
            let selector = match res_type {
                Some(ResType::Array) => loctool_attr(element, "index")
                    .and_then(|i| i.parse::<usize>().ok())
                    .map(Selector::Index),
                Some(ResType::Plural) => loctool_attr(element, "category")
                    .and_then(|c| PluralCategory::from_name(&c))
                    .map(Selector::Category),
                _ => None,
            };
            let datatype = loctool_attr(element, "datatype").or_else(|| {
                element.parent_element().filter(|p| p.has_tag_name("group")).and_then(|g| attr(g, "name"))
            });
            let notes = child(element, "notes").into_iter().flat_map(|n| children(n, "note"));

            units.push(Unit {
                id,
                key: attr(element, "name").unwrap_or_else(|| source.clone()),
                res_type,
                datatype,
                context: loctool_attr(element, "context"),
                kind: loctool_attr(element, "resclass").and_then(|k| StringKind::from_tag(&k)),
                selector,
                target: Some(target).filter(|t| !t.is_empty()),
                state: targets.first().and_then(|t| attr(*t, "state")),
                comment: comment(notes),
                source,
                path: path.clone(),
                project: project.clone(),
                flavor: flavor.clone(),
                source_locale: source_locale.clone(),
                target_locale: target_locale.clone(),
            });
        }
    }
    units
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use roxmltree::Document;
    use rstest::*;

    use super::*;

    #[rstest]
    fn reads_group_name_as_datatype() {
        let doc = Document::parse(
            r#"<xliff version="2.0" srcLang="en-KR" trgLang="ko-KR"><file original="a.js"><group id="g1" name="javascript"><unit id="1"><segment><source>Low</source><target>낮음</target></segment></unit></group></file></xliff>"#,
        )
        .unwrap();
        let units = read(doc.root_element());
        assert_that!(units.len(), eq(1));
        assert_that!(units[0].datatype, some(eq("javascript")));
        assert_that!(units[0].key, eq("Low"));
        assert_that!(units[0].project, some(eq("a.js")));
        assert_that!(units[0].target, some(eq("낮음")));
    }

    #[rstest]
    fn own_documents_keep_missing_project() {
        let doc = Document::parse(
            r#"<xliff version="2.0" srcLang="en-US" xmlns:l="http://ilib-js.com/loctool"><file original="a.xib"><group id="g1" name="x-xib"><unit id="1" name="ios" type="res:string" l:datatype="x-xib" l:resclass="irs"><segment><source>Title</source></segment></unit></group></file></xliff>"#,
        )
        .unwrap();
        let units = read(doc.root_element());
        assert_that!(units[0].project, none());
        assert_that!(units[0].path, some(eq("a.xib")));
        assert_that!(units[0].kind, some(eq(StringKind::PathQualified)));
    }

    #[rstest]
    fn plural_unit_attributes() {
        let unit = Unit {
            id: Some("1".into()),
            key: "k".into(),
            res_type: Some(ResType::Plural),
            selector: Some(Selector::Category(PluralCategory::Many)),
            source: "s".into(),
            source_locale: "en-US".into(),
            ..Unit::default()
        };
        let root = Element::new("r").child(unit_element(&unit));
        let out = writer::document(&root);
        assert_that!(
            out,
            contains_substring(
                r#"<unit id="1" name="k" type="res:plural" l:datatype="x-android-resource" l:category="many">"#
            )
        );
        assert_that!(out, contains_substring(r#"{"pluralForm":"many","pluralFormOther":"k"}"#));
    }
}
