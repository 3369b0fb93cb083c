//! Minimal XML element tree with indented output.

/// Prolog written at the top of every document.
const PROLOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Spaces per nesting level.
const INDENT: usize = 2;

/// Child of an [`Element`].
#[derive(Debug, Clone)]
enum Node {
    /// Nested element.
    Element(Element),
    /// Unescaped character data.
    Text(String),
}

/// An element with ordered attributes.
#[derive(Debug, Clone)]
pub(super) struct Element {
    /// Tag name, including any namespace prefix.
    name: &'static str,
    /// Attributes in output order, unescaped.
    attrs: Vec<(&'static str, String)>,
    /// Children in output order.
    children: Vec<Node>,
}

impl Element {
    /// An element with no attributes or children.
    pub(super) const fn new(name: &'static str) -> Self {
        Self { name, attrs: Vec::new(), children: Vec::new() }
    }

    /// Adds an attribute.
    pub(super) fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Adds an attribute when `value` is present.
    pub(super) fn attr_opt(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Sets character content.
    pub(super) fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Appends a child element.
    pub(super) fn child(mut self, child: Self) -> Self {
        self.push(child);
        self
    }

    /// Appends a child element in place.
    pub(super) fn push(&mut self, child: Self) {
        self.children.push(Node::Element(child));
    }

    /// `true` when anything was appended.
    pub(super) fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Writes the element at nesting level `depth`.
    ///
    /// Elements holding only text stay on one line; elements with element
    /// children put each child on its own line.
    fn render(&self, depth: usize, out: &mut String) {
        push_indent(out, depth);
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');

        let inline = self.children.iter().all(|c| matches!(c, Node::Text(_)));
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(&escape_text(text)),
                Node::Element(element) => {
                    out.push('\n');
                    element.render(depth + 1, out);
                }
            }
        }
        if !inline {
            out.push('\n');
            push_indent(out, depth);
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push('>');
    }
}

/// Renders `root` as a complete document, without a trailing newline.
pub(super) fn document(root: &Element) -> String {
    let mut out = String::from(PROLOG);
    out.push('\n');
    root.render(0, &mut out);
    out
}

/// Appends the indentation for `depth`.
fn push_indent(out: &mut String, depth: usize) {
    out.extend(std::iter::repeat_n(' ', depth * INDENT));
}

/// Escapes character data. Quotes stay literal.
pub(super) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes an attribute value. `>` stays literal.
pub(super) fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '<' => out.push_str("&lt;"),
            c => out.push(c),
        }
    }
    out
}
