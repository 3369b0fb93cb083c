//! Document parsing and version dispatch.

use roxmltree::{
    Document,
    Node,
};

use super::unit::Unit;
use super::{
    LOCTOOL_NAMESPACE,
    XliffVersion,
    v1,
    v2,
};
use crate::error::XliffError;

/// Parses `content` and reads its units with the reader for its version.
///
/// # Errors
/// [`XliffError::Format`] when the content is not XML or the root is not
/// `xliff`, [`XliffError::UnsupportedVersion`] for unknown versions.
pub(super) fn parse(content: &str) -> Result<(XliffVersion, Vec<Unit>), XliffError> {
    let document = Document::parse(content)?;
    let root = document.root_element();
    if root.tag_name().name() != "xliff" {
        return Err(XliffError::format(format!(
            "expected <xliff> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    let declared = root.attribute("version").unwrap_or(XliffVersion::V1_2.as_str());
    let version = XliffVersion::from_name(declared)
        .ok_or_else(|| XliffError::UnsupportedVersion(declared.to_owned()))?;

    let units = match version {
        XliffVersion::V1_2 => v1::read(root),
        XliffVersion::V2_0 => v2::read(root),
    };
    Ok((version, units))
}

/// Child elements of `node` with local name `name`.
pub(super) fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |c| c.is_element() && c.tag_name().name() == name)
}

/// First child element of `node` with local name `name`.
pub(super) fn child<'a, 'input: 'a>(node: Node<'a, 'input>, name: &'static str) -> Option<Node<'a, 'input>> {
    children(node, name).next()
}

/// Concatenated character data below `node`, whitespace preserved.
pub(super) fn text_of(node: Node<'_, '_>) -> String {
    node.descendants().filter(Node::is_text).filter_map(|n| n.text()).collect()
}

/// Non-empty value of a plain attribute.
pub(super) fn attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name).filter(|v| !v.is_empty()).map(str::to_owned)
}

/// Non-empty value of an `l:` attribute.
pub(super) fn loctool_attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute((LOCTOOL_NAMESPACE, name)).filter(|v| !v.is_empty()).map(str::to_owned)
}

/// Translator comment among `notes`, skipping plural notes.
pub(super) fn comment<'a, 'input: 'a>(notes: impl Iterator<Item = Node<'a, 'input>>) -> Option<String> {
    notes
        .map(text_of)
        .find(|text| !text.is_empty() && !super::unit::PluralNote::is_plural_note(text))
}

/// `true` when a unit with this source should be read.
pub(super) fn keep_source(source: &str, id: Option<&str>) -> bool {
    if source.is_empty() {
        tracing::debug!(id, "Skipping unit with empty source");
        return false;
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn text_of_joins_nested_text() {
        let doc = Document::parse("<a>x<b>y</b> z</a>").unwrap();
        assert_that!(text_of(doc.root_element()), eq("xy z"));
    }

    #[rstest]
    fn missing_version_reads_as_1_2() {
        let (version, units) = parse("<xliff/>").unwrap();
        assert_that!(version, eq(XliffVersion::V1_2));
        assert_that!(units.len(), eq(0));
    }

    #[rstest]
    fn comment_skips_plural_notes() {
        let doc = Document::parse(
            r#"<u><note>{"pluralForm":"one","pluralFormOther":"k"}</note><note>real</note></u>"#,
        )
        .unwrap();
        assert_that!(comment(children(doc.root_element(), "note")), some(eq("real")));
    }
}
