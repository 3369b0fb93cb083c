//! Escape types that control which regions a transform leaves alone.

use std::fmt;

/// Kind of text being transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    /// Plain text.
    #[default]
    Text,
    /// HTML markup.
    Html,
    /// XML markup. Markdown is handled as XML.
    Xml,
    /// HTML with `<% %>` template blocks.
    Template,
    /// Ruby strings with `%{}` and `%NAME%` placeholders.
    Ruby,
    /// Java strings with `{n}` placeholders.
    Java,
    /// JavaScript strings with `{name}` placeholders.
    JavaScript,
    /// printf-style strings.
    C,
}

impl ContentType {
    /// Parses an escape type name. Unknown names are plain text.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "html" => Self::Html,
            "xml" | "markdown" => Self::Xml,
            "template" => Self::Template,
            "ruby" => Self::Ruby,
            "java" => Self::Java,
            "javascript" => Self::JavaScript,
            "c" => Self::C,
            _ => Self::Text,
        }
    }

    /// Escape type for a resource datatype.
    #[must_use]
    pub fn from_datatype(datatype: &str) -> Self {
        let name = match datatype {
            "java" | "objc" | "x-objective-c" | "x-swift" => "c",
            "javascript" | "plaintext" => "text",
            "markdown" | "x-android-resource" | "x-haml" | "x-xib" => "xml",
            "x-yaml" => "ruby",
            other => other,
        };
        Self::from_name(name)
    }

    /// Name of the escape type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Xml => "xml",
            Self::Template => "template",
            Self::Ruby => "ruby",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::C => "c",
        }
    }

    /// Markup types, where tags and entities are skipped.
    #[must_use]
    pub const fn is_markup(self) -> bool {
        matches!(self, Self::Html | Self::Xml | Self::Template)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
