//! XLIFF 1.2: `file` elements per path and locale pair, `trans-unit` per unit.

use indexmap::IndexMap;
use roxmltree::Node;

use super::ToolHeader;
use super::reader::{
    attr,
    child,
    children,
    comment,
    keep_source,
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
use crate::locale::Locale;
use crate::plural::PluralCategory;
use crate::resource::{
    ResType,
    Selector,
    StringKind,
};

/// Units of one `file` element share these.
type FileKey<'a> = (Option<&'a str>, &'a str, Option<&'a str>, Option<&'a str>, Option<&'a str>);

/// Writes `units` as a 1.2 document.
pub(super) fn serialize(units: &[Unit], header: &ToolHeader) -> String {
    let mut files: IndexMap<FileKey<'_>, Vec<&Unit>> = IndexMap::new();
    for unit in units {
        let key = (
            unit.path.as_deref(),
            unit.source_locale.as_str(),
            unit.target_locale.as_deref(),
            unit.project.as_deref(),
            unit.flavor.as_deref(),
        );
        files.entry(key).or_default().push(unit);
    }

    let mut root = Element::new("xliff").attr("version", "1.2");
    for ((path, source_locale, target_locale, project, flavor), units) in files {
        let mut file = Element::new("file")
            .attr("original", path.unwrap_or_default())
            .attr("source-language", source_locale)
            .attr_opt("target-language", target_locale)
            .attr_opt("product-name", project)
            .attr_opt("x-flavor", flavor);
        if let Some(header) = header.element() {
            file.push(header);
        }
        let mut body = Element::new("body");
        for unit in units {
            body.push(trans_unit(unit));
        }
        root.push(file.child(body));
    }
    writer::document(&root)
}

/// One `trans-unit`.
fn trans_unit(unit: &Unit) -> Element {
    let extype = match unit.selector {
        Some(Selector::Index(index)) => Some(index.to_string()),
        Some(Selector::Category(category)) => Some(category.as_str().to_owned()),
        None => None,
    };
    let mut element = Element::new("trans-unit")
        .attr("id", unit.id.as_deref().unwrap_or_default())
        .attr("resname", unit.key.as_str())
        .attr("restype", unit.res_type().as_str())
        .attr("datatype", unit.datatype_or_default())
        .attr_opt("x-context", unit.context.as_deref())
        .attr_opt("x-resclass", unit.recorded_kind().map(StringKind::tag))
        .attr_opt("extype", extype.as_deref())
        .child(Element::new("source").text(unit.source.as_str()));

    if let Some(target) = &unit.target {
        element.push(
            Element::new("target").attr_opt("state", unit.state.as_deref()).text(target.as_str()),
        );
    }
    if let Some(comment) = &unit.comment {
        element.push(Element::new("note").text(comment.as_str()));
    }
    if let Some(category) = unit.category() {
        element.push(Element::new("note").text(PluralNote::render(category, &unit.key)));
    }
    element
}

/// Reads every `trans-unit` of a 1.2 document.
pub(super) fn read(root: Node<'_, '_>) -> Vec<Unit> {
    let mut units = Vec::new();
    for file in children(root, "file") {
        let path = attr(file, "original");
        let source_locale = default_source_locale(file.attribute("source-language"));
        let target_locale = attr(file, "target-language");
        let asian = target_locale.as_deref().is_some_and(|l| Locale::parse(l).is_asian());
        let project = attr(file, "product-name");
        let flavor = attr(file, "x-flavor");

        for element in file.descendants().filter(|n| n.has_tag_name("trans-unit")) {
            let id = attr(element, "id");
            let source = child(element, "source").map(text_of).unwrap_or_default();
            if !keep_source(&source, id.as_deref()) {
                continue;
            }

            let res_type = element.attribute("restype").and_then(ResType::from_name);
            let selector = element.attribute("extype").and_then(|extype| match res_type {
                Some(ResType::Array) => extype.parse::<usize>().ok().map(Selector::Index),
                Some(ResType::Plural) => PluralCategory::from_name(extype).map(Selector::Category),
                _ => None,
            });
            let target_element = child(element, "target");

            units.push(Unit {
                id,
                key: attr(element, "resname").unwrap_or_else(|| source.clone()),
                res_type,
                datatype: attr(element, "datatype"),
                context: attr(element, "x-context"),
                kind: element.attribute("x-resclass").and_then(StringKind::from_tag),
                selector,
                target: target_element.map(|t| target_text(t, asian)).filter(|t| !t.is_empty()),
                state: target_element.and_then(|t| attr(t, "state")),
                comment: comment(children(element, "note")),
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

/// `true` for a `<mrk mtype="seg">` segment.
fn is_segment(node: &Node<'_, '_>) -> bool {
    node.has_tag_name("mrk") && node.attribute("mtype") == Some("seg")
}

/// Target text. Segmented targets are joined with the whitespace between
/// the segments, or with nothing for languages written without spaces.
fn target_text(target: Node<'_, '_>, asian: bool) -> String {
    if !target.children().any(|c| is_segment(&c)) {
        return text_of(target);
    }
    let mut text = String::new();
    for node in target.children() {
        if is_segment(&node) {
            text.push_str(&text_of(node));
        } else if node.is_text() && !asian {
            text.push_str(node.text().unwrap_or_default());
        }
    }
    text
}
