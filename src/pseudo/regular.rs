//! Bracketed accented pseudo-localization.
//!
//! Letters are swapped for look-alike characters from another block, the
//! result is padded with a countdown of digits and wrapped in brackets:
//! `"This is a test"` becomes `"[Ťĥíš íš à ţëšţ6543210]"`. Placeholders and
//! markup for the content type are copied untouched.

use super::content_type::ContentType;
use super::scanner::Scanner;
use super::tables::{
    self,
    CharTable,
};
use super::Localizer;
use crate::resource::{
    DEFAULT_SOURCE_LOCALE,
    Resource,
    Selector,
};

/// printf flag, width, precision and length characters.
const PRINTF_MODIFIERS: &str = "0123456789$-+ #.lhLqjzt";

/// printf conversion characters.
const PRINTF_CONVERSIONS: &str = "diouxXeEfFgGaAcspn@%";

/// Character block used for the replacement letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DebugScript {
    /// Accented Latin letters.
    #[default]
    Latin,
    /// Arabic letters, for exercising right-to-left layout.
    Arabic,
    /// Han characters, for exercising wide glyphs.
    Han,
}

impl DebugScript {
    /// Pseudo locale this script is produced for.
    #[must_use]
    pub const fn locale(self) -> &'static str {
        match self {
            Self::Latin => "zxx-XX",
            Self::Arabic => "zxx-Arab-XX",
            Self::Han => "zxx-Hans-XX",
        }
    }

    /// Replacement table.
    fn table(self) -> &'static CharTable {
        match self {
            Self::Latin => tables::debug_latin(),
            Self::Arabic => tables::debug_arabic(),
            Self::Han => tables::debug_han(),
        }
    }
}

/// Debug pseudo localizer.
#[derive(Debug, Clone)]
pub struct RegularPseudo {
    /// Regions to leave untouched.
    content_type: ContentType,
    /// Replacement block.
    script: DebugScript,
    /// Locale of the text being transformed.
    source_locale: String,
    /// Locale the output is for.
    target_locale: String,
}

impl Default for RegularPseudo {
    fn default() -> Self {
        Self::debug()
    }
}

impl RegularPseudo {
    /// Creates a localizer for the given content type.
    #[must_use]
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            script: DebugScript::Latin,
            source_locale: DEFAULT_SOURCE_LOCALE.to_owned(),
            target_locale: DebugScript::Latin.locale().to_owned(),
        }
    }

    /// Plain-text Latin localizer producing `zxx-XX`.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(ContentType::Text)
    }

    /// Uses another replacement block. The target locale follows the script.
    #[must_use]
    pub fn with_script(mut self, script: DebugScript) -> Self {
        self.script = script;
        self.target_locale = script.locale().to_owned();
        self
    }

    /// Overrides the source locale.
    #[must_use]
    pub fn with_source_locale(mut self, locale: impl Into<String>) -> Self {
        self.source_locale = locale.into();
        self
    }

    /// Overrides the target locale.
    #[must_use]
    pub fn with_target_locale(mut self, locale: impl Into<String>) -> Self {
        self.target_locale = locale.into();
        self
    }

    /// Content type in use.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Replacement block in use.
    #[must_use]
    pub const fn script(&self) -> DebugScript {
        self.script
    }

    /// Copies a skipped region at the cursor, if there is one.
    fn skip_region(&self, scanner: &mut Scanner, out: &mut String) -> bool {
        let Some(c) = scanner.peek(0) else {
            return false;
        };
        let markup = self.content_type.is_markup();
        match c {
            '{' => scanner.copy_through(out, "}"),
            '<' if self.content_type == ContentType::Template && scanner.peek(1) == Some('%') => {
                scanner.copy_through(out, "%>");
            }
            '<' if markup => scanner.copy_through(out, ">"),
            '&' if markup => scanner.copy_until(out, |s| matches!(s.peek(0), Some(';' | ' '))),
            '\\' if markup && scanner.peek(1) == Some('u') => scanner.copy_n(out, 6),
            '%' if self.content_type == ContentType::Ruby => {
                if scanner.peek(1) == Some('{') {
                    scanner.copy_n(out, 1);
                } else {
                    scanner.copy_n(out, 1);
                    scanner.copy_through(out, "%");
                }
            }
            '%' => {
                scanner.copy_n(out, 1);
                out.push_str(&scanner.take_while(|c| PRINTF_MODIFIERS.contains(c)));
                if scanner.peek(0).is_some_and(|c| PRINTF_CONVERSIONS.contains(c)) {
                    scanner.copy_n(out, 1);
                }
            }
            _ => return false,
        }
        true
    }
}

/// Digits appended to a string of `len` characters.
fn padding(len: usize) -> String {
    let divisor = match len {
        0..=20 => 2,
        21..=40 => 3,
        _ => 5,
    };
    let add = (2 * len + divisor) / (2 * divisor);
    (0..add).rev().filter_map(|i| char::from_digit(u32::try_from(i % 10).ok()?, 10)).collect()
}

impl Localizer for RegularPseudo {
    fn get_string(&self, source: &str) -> String {
        let table = self.script.table();
        let mut scanner = Scanner::new(source);
        let mut body = String::with_capacity(source.len() * 2);

        while scanner.peek(0).is_some() {
            if self.skip_region(&mut scanner, &mut body) {
                continue;
            }
            if let Some(c) = scanner.bump() {
                body.push(table.get(&c).copied().unwrap_or(c));
            }
        }

        let pad = padding(body.chars().count());
        format!("[{body}{pad}]")
    }

    fn get_string_for_resource(
        &self,
        resource: &Resource,
        selector: Option<Selector>,
    ) -> Option<String> {
        resource.source_at(selector).map(|source| self.get_string(source))
    }

    fn source_locale(&self) -> &str {
        &self.source_locale
    }

    fn target_locale(&self) -> &str {
        &self.target_locale
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::test_utils::items;

    #[fixture]
    fn debug() -> RegularPseudo {
        RegularPseudo::debug()
    }

    // ===== 基本変換 テスト =====

    #[rstest]
    #[case("I am a Blues Traveler", "[Ï àm à ßľüëš Ťŕàvëľëŕ6543210]")]
    #[case("GLOBALIZATION", "[ĜĽØßÃĽÏŻÃŤÏØŇ6543210]")]
    #[case("This is a test", "[Ťĥíš íš à ţëšţ6543210]")]
    #[case("b", "[b0]")]
    fn transforms_text(debug: RegularPseudo, #[case] input: &str, #[case] expected: &str) {
        assert_that!(debug.get_string(input), eq(expected));
    }

    #[rstest]
    fn empty_string_is_bare_brackets(debug: RegularPseudo) {
        assert_that!(debug.get_string(""), eq("[]"));
    }

    #[rstest]
    #[case(ContentType::Java)]
    #[case(ContentType::JavaScript)]
    #[case(ContentType::Text)]
    fn skips_braces(#[case] content_type: ContentType) {
        let pseudo = RegularPseudo::new(content_type);
        assert_that!(
            pseudo.get_string("Skip the unflavored {estrogen} supplements."),
            eq("[Šķíþ ţĥë üñfľàvõŕëð {estrogen} šüþþľëmëñţš.876543210]")
        );
    }

    // ===== マークアップ テスト =====

    #[rstest]
    fn html_skips_tags_and_entities() {
        let pseudo = RegularPseudo::new(ContentType::Html);
        assert_that!(
            pseudo.get_string("This is <span>a &amp; test</span>"),
            eq("[Ťĥíš íš <span>à &amp; ţëšţ</span>09876543210]")
        );
    }

    #[rstest]
    fn xml_skips_unicode_escapes() {
        let pseudo = RegularPseudo::new(ContentType::Xml);
        assert_that!(pseudo.get_string("a\\u00e9b"), eq("[à\\u00e9b3210]"));
    }

    #[rstest]
    fn template_skips_code_blocks() {
        let pseudo = RegularPseudo::new(ContentType::Template);
        assert_that!(pseudo.get_string("a<%= name %>"), eq("[à<%= name %>543210]"));
    }

    // ===== プレースホルダー テスト =====

    #[rstest]
    fn c_skips_printf_specifiers() {
        let pseudo = RegularPseudo::new(ContentType::C);
        assert_that!(
            pseudo.get_string("This %2$-2.2s is a %s test"),
            eq("[Ťĥíš %2$-2.2s íš à %s ţëšţ876543210]")
        );
    }

    #[rstest]
    fn ruby_skips_named_placeholders() {
        let pseudo = RegularPseudo::new(ContentType::Ruby);
        assert_that!(pseudo.get_string("a %NAME% b"), eq("[à %NAME% b43210]"));
        assert_that!(pseudo.get_string("a %{name}"), eq("[à %{name}43210]"));
    }

    // ===== パディング テスト =====

    #[rstest]
    #[case(0, "")]
    #[case(1, "0")]
    #[case(14, "6543210")]
    #[case(20, "9876543210")]
    #[case(21, "6543210")]
    #[case(40, "2109876543210")]
    #[case(43, "876543210")]
    fn padding_lengths(#[case] len: usize, #[case] expected: &str) {
        assert_that!(padding(len), eq(expected));
    }

    // ===== リソース テスト =====

    #[rstest]
    fn transforms_array_elements(debug: RegularPseudo) {
        let res = Resource::array("k", items(&["a", "b"]));
        assert_that!(
            debug.get_string_for_resource(&res, Some(Selector::Index(1))),
            some(eq("[b0]"))
        );
        assert_that!(debug.get_string_for_resource(&res, Some(Selector::Index(5))), none());
    }

    #[rstest]
    fn script_sets_target_locale() {
        let pseudo = RegularPseudo::debug().with_script(DebugScript::Arabic);
        assert_that!(pseudo.target_locale(), eq("zxx-Arab-XX"));
        assert_that!(pseudo.source_locale(), eq("en-US"));
        assert_that!(pseudo.get_string("b").starts_with('['), eq(true));
    }
}
