//! Chooses a localizer for a target locale.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use super::content_type::ContentType;
use super::hant::HantPseudo;
use super::regular::{
    DebugScript,
    RegularPseudo,
};
use super::word_based::{
    Spelling,
    WordBasedPseudo,
};
use super::Localizer;
use crate::locale::Locale;
use crate::resource::DEFAULT_SOURCE_LOCALE;
use crate::translation_set::TranslationSet;

/// Locale to pseudo style.
pub type PseudoLocales = BTreeMap<String, PseudoStyle>;

/// Kind of pseudo translation produced for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoStyle {
    /// British spelling.
    British,
    /// Canadian spelling.
    Canadian,
    /// Australian English, written with British spelling.
    Australian,
    /// New Zealand spelling.
    NewZealand,
    /// Bracketed accented Latin.
    Debug,
    /// Bracketed Arabic-script letters.
    DebugRtl,
    /// Bracketed Han characters.
    DebugAsian,
    /// Traditional Chinese, Taiwan conventions.
    TraditionalTaiwan,
    /// Traditional Chinese, Hong Kong conventions.
    TraditionalHongKong,
}

impl PseudoStyle {
    /// Parses a style name. Unrecognized names select [`PseudoStyle::Debug`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "english-british" => Self::British,
            "english-canadian" => Self::Canadian,
            "english-australian" => Self::Australian,
            "english-new-zealand" => Self::NewZealand,
            "debug-rtl" => Self::DebugRtl,
            "debug-asian" => Self::DebugAsian,
            "chinese-traditional-tw" => Self::TraditionalTaiwan,
            "chinese-traditional-hk" => Self::TraditionalHongKong,
            _ => Self::Debug,
        }
    }

    /// Style name as written in project settings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::British => "english-british",
            Self::Canadian => "english-canadian",
            Self::Australian => "english-australian",
            Self::NewZealand => "english-new-zealand",
            Self::Debug => "debug",
            Self::DebugRtl => "debug-rtl",
            Self::DebugAsian => "debug-asian",
            Self::TraditionalTaiwan => "chinese-traditional-tw",
            Self::TraditionalHongKong => "chinese-traditional-hk",
        }
    }
}

impl fmt::Display for PseudoStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regions whose English follows British spelling.
const BRITISH_REGIONS: &[&str] = &[
    "AG", "AI", "AS", "AU", "BB", "BE", "BM", "BS", "BW", "BZ", "CM", "DG", "DM", "ER", "ET", "FJ",
    "FK", "FM", "GB", "GD", "GG", "GH", "GI", "GM", "GS", "GU", "GY", "HK", "IE", "IM", "IN", "IO",
    "JE", "JM", "KE", "KI", "KN", "KY", "LC", "LK", "LS", "MG", "MH", "MO", "MP", "MS", "MT", "MU",
    "MW", "MY", "NA", "NG", "NR", "PG", "PK", "PN", "PW", "RW", "SB", "SC", "SD", "SG", "SH", "SL",
    "SS", "SX", "SZ", "TC", "TO", "TT", "TV", "TZ", "UG", "UM", "VC", "VI", "VU", "WS", "ZA", "ZM",
    "ZW",
];

/// Locales outside the British set with a fixed style.
const FIXED_LOCALES: &[(&str, PseudoStyle)] = &[
    ("en-CX", PseudoStyle::Australian),
    ("en-CC", PseudoStyle::Australian),
    ("en-NF", PseudoStyle::Australian),
    ("en-HM", PseudoStyle::Australian),
    ("en-CA", PseudoStyle::Canadian),
    ("en-NZ", PseudoStyle::NewZealand),
    ("en-CK", PseudoStyle::NewZealand),
    ("en-NU", PseudoStyle::NewZealand),
    ("en-TK", PseudoStyle::NewZealand),
    ("zh-Hant", PseudoStyle::TraditionalTaiwan),
    ("zh-TW", PseudoStyle::TraditionalTaiwan),
    ("zh-Hant-TW", PseudoStyle::TraditionalTaiwan),
    ("zh-Hant-US", PseudoStyle::TraditionalTaiwan),
    ("zh-HK", PseudoStyle::TraditionalHongKong),
    ("zh-Hant-HK", PseudoStyle::TraditionalHongKong),
    ("zh-Hant-MO", PseudoStyle::TraditionalHongKong),
    ("zxx-XX", PseudoStyle::Debug),
    ("zxx-Arab-XX", PseudoStyle::DebugRtl),
    ("zxx-Hans-XX", PseudoStyle::DebugAsian),
];

/// Cached default map.
static DEFAULT_PSEUDO_LOCALES: OnceLock<PseudoLocales> = OnceLock::new();

/// Pseudo locales used when a project does not configure its own.
pub fn default_pseudo_locales() -> &'static PseudoLocales {
    DEFAULT_PSEUDO_LOCALES.get_or_init(|| {
        BRITISH_REGIONS
            .iter()
            .map(|region| (format!("en-{region}"), PseudoStyle::British))
            .chain(FIXED_LOCALES.iter().map(|(locale, style)| ((*locale).to_owned(), *style)))
            .collect()
    })
}

/// Default style for `locale`, or [`PseudoStyle::Debug`] when it has none.
#[must_use]
pub fn default_style(locale: &str) -> PseudoStyle {
    default_pseudo_locales().get(locale).copied().unwrap_or(PseudoStyle::Debug)
}

/// Creates localizers for the pseudo locales of a project.
#[derive(Debug, Clone)]
pub struct PseudoFactory<'a> {
    /// Project source locale. Never pseudo-localized.
    source_locale: String,
    /// Locales that get a pseudo translation.
    pseudo_locales: PseudoLocales,
    /// Disables every localizer.
    nopseudo: bool,
    /// Existing translations handed to the localizers that consult them.
    translations: Option<&'a TranslationSet>,
}

impl Default for PseudoFactory<'_> {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_LOCALE)
    }
}

impl<'a> PseudoFactory<'a> {
    /// Creates a factory with the default pseudo locales.
    #[must_use]
    pub fn new(source_locale: impl Into<String>) -> Self {
        Self {
            source_locale: source_locale.into(),
            pseudo_locales: default_pseudo_locales().clone(),
            nopseudo: false,
            translations: None,
        }
    }

    /// Replaces the pseudo locales.
    #[must_use]
    pub fn with_pseudo_locales(mut self, pseudo_locales: PseudoLocales) -> Self {
        self.pseudo_locales = pseudo_locales;
        self
    }

    /// Turns pseudo generation off entirely.
    #[must_use]
    pub const fn with_nopseudo(mut self, nopseudo: bool) -> Self {
        self.nopseudo = nopseudo;
        self
    }

    /// Existing translations that localizers prefer over generated text.
    #[must_use]
    pub const fn with_translations(mut self, set: &'a TranslationSet) -> Self {
        self.translations = Some(set);
        self
    }

    /// Project source locale.
    #[must_use]
    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    /// Configured pseudo locales, in sorted order. Empty when pseudo
    /// generation is off.
    pub fn pseudo_locales(&self) -> impl Iterator<Item = &str> {
        self.pseudo_locales
            .keys()
            .filter(|_| !self.nopseudo)
            .filter(|locale| **locale != self.source_locale)
            .map(String::as_str)
    }

    /// Style configured for `locale`, trying the full tag and then the tag
    /// without its variant.
    #[must_use]
    pub fn style_for(&self, locale: &str) -> Option<PseudoStyle> {
        let parsed = Locale::parse(locale);
        self.pseudo_locales
            .get(locale)
            .or_else(|| self.pseudo_locales.get(&parsed.without_variant().to_string()))
            .copied()
    }

    /// `true` when `locale`, with or without its variant, is configured.
    #[must_use]
    pub fn is_pseudo_locale(&self, locale: &str) -> bool {
        self.style_for(locale).is_some()
    }

    /// Localizer for `target_locale`, with placeholders of `datatype`
    /// protected. `None` when the locale is not a pseudo locale.
    #[must_use]
    pub fn create(
        &self,
        target_locale: &str,
        datatype: Option<&str>,
    ) -> Option<Box<dyn Localizer + 'a>> {
        if self.nopseudo || target_locale == self.source_locale {
            tracing::debug!("No pseudo for locale {}", target_locale);
            return None;
        }
        let Some(style) = self.style_for(target_locale) else {
            tracing::debug!("No pseudo for locale {}", target_locale);
            return None;
        };

        let content_type = datatype.map_or(ContentType::Text, ContentType::from_datatype);
        let target = Locale::parse(target_locale);
        let source_locale = match target.variant.as_deref() {
            Some(variant) => Locale::parse(&self.source_locale).with_variant(Some(variant)).to_string(),
            None => self.source_locale.clone(),
        };
        tracing::debug!("Using {} pseudo for locale {} ({})", style, target_locale, content_type);

        let localizer: Box<dyn Localizer + 'a> = match style {
            PseudoStyle::British | PseudoStyle::Australian => {
                Box::new(self.word_based(Spelling::British, content_type, &source_locale, target_locale))
            }
            PseudoStyle::Canadian => {
                Box::new(self.word_based(Spelling::Canadian, content_type, &source_locale, target_locale))
            }
            PseudoStyle::NewZealand => Box::new(self.word_based(
                Spelling::NewZealand,
                content_type,
                &source_locale,
                target_locale,
            )),
            PseudoStyle::Debug | PseudoStyle::DebugRtl | PseudoStyle::DebugAsian => {
                let script = match style {
                    PseudoStyle::DebugRtl => DebugScript::Arabic,
                    PseudoStyle::DebugAsian => DebugScript::Han,
                    _ => DebugScript::Latin,
                };
                Box::new(
                    RegularPseudo::new(content_type)
                        .with_script(script)
                        .with_source_locale(source_locale)
                        .with_target_locale(target_locale),
                )
            }
            PseudoStyle::TraditionalTaiwan | PseudoStyle::TraditionalHongKong => {
                let hant = HantPseudo::new(target_locale).with_source_locale(source_locale);
                match self.translations {
                    Some(set) => Box::new(hant.with_translations(set)),
                    None => Box::new(hant),
                }
            }
        };
        Some(localizer)
    }

    /// Builds a spelling localizer.
    fn word_based(
        &self,
        spelling: Spelling,
        content_type: ContentType,
        source_locale: &str,
        target_locale: &str,
    ) -> WordBasedPseudo<'a> {
        let pseudo = WordBasedPseudo::new(spelling)
            .with_content_type(content_type)
            .with_source_locale(source_locale)
            .with_target_locale(target_locale);
        match self.translations {
            Some(set) => pseudo.with_translations(set),
            None => pseudo,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    /// 指定ロケールだけを持つ擬似ロケール表を作成する
    fn locales(pairs: &[(&str, PseudoStyle)]) -> PseudoLocales {
        pairs.iter().map(|(l, s)| ((*l).to_owned(), *s)).collect()
    }

    #[fixture]
    fn defaults() -> PseudoFactory<'static> {
        PseudoFactory::new("en-US")
    }

    // ===== デフォルト表 テスト =====

    #[rstest]
    #[case("en-GB", PseudoStyle::British)]
    #[case("en-AU", PseudoStyle::British)]
    #[case("en-ZA", PseudoStyle::British)]
    #[case("en-HK", PseudoStyle::British)]
    #[case("en-JM", PseudoStyle::British)]
    #[case("en-CX", PseudoStyle::Australian)]
    #[case("en-CA", PseudoStyle::Canadian)]
    #[case("en-NZ", PseudoStyle::NewZealand)]
    #[case("zh-Hant-TW", PseudoStyle::TraditionalTaiwan)]
    #[case("zh-HK", PseudoStyle::TraditionalHongKong)]
    #[case("zxx-XX", PseudoStyle::Debug)]
    #[case("zxx-Arab-XX", PseudoStyle::DebugRtl)]
    #[case("zxx-Hans-XX", PseudoStyle::DebugAsian)]
    fn default_styles(defaults: PseudoFactory<'static>, #[case] locale: &str, #[case] style: PseudoStyle) {
        assert_that!(defaults.style_for(locale), some(eq(style)));
    }

    #[rstest]
    #[case("en-GB", true)]
    #[case("en-AU", true)]
    #[case("en-NZ", true)]
    #[case("en-HK", true)]
    #[case("en-ZA", true)]
    #[case("en-CA", true)]
    #[case("zh-Hant-HK", true)]
    #[case("en-GB-ASDF", true)]
    #[case("en-AU-ASDF", true)]
    #[case("zh-Hant-HK-ASDF", true)]
    #[case("es-US", false)]
    #[case("en-US", false)]
    fn is_pseudo_locale(defaults: PseudoFactory<'static>, #[case] locale: &str, #[case] expected: bool) {
        assert_that!(defaults.is_pseudo_locale(locale), eq(expected));
    }

    // ===== 生成 テスト =====

    #[rstest]
    fn british_localizer(defaults: PseudoFactory<'static>) {
        let pseudo = defaults.create("en-GB", Some("x-yaml")).unwrap();
        assert_that!(pseudo.source_locale(), eq("en-US"));
        assert_that!(pseudo.target_locale(), eq("en-GB"));
        assert_that!(pseudo.get_string("colorful %{estrogen}"), eq("colourful %{estrogen}"));
    }

    #[rstest]
    fn variant_goes_to_source_locale(defaults: PseudoFactory<'static>) {
        let pseudo = defaults.create("en-GB-ASDF", None).unwrap();
        assert_that!(pseudo.source_locale(), eq("en-US-ASDF"));
        assert_that!(pseudo.target_locale(), eq("en-GB-ASDF"));
    }

    #[rstest]
    fn chinese_with_variant(defaults: PseudoFactory<'static>) {
        let pseudo = defaults.create("zh-Hant-HK-ASDF", None).unwrap();
        assert_that!(pseudo.source_locale(), eq("en-US-ASDF"));
        assert_that!(pseudo.pseudo_source_locale(), eq("zh-Hans-CN-ASDF"));
        assert_that!(pseudo.get_string("你好吗？"), eq("你好嗎？"));
    }

    #[rstest]
    fn debug_scripts(defaults: PseudoFactory<'static>) {
        let latin = defaults.create("zxx-XX", None).unwrap();
        assert_that!(latin.get_string("This is a test"), eq("[Ťĥíš íš à ţëšţ6543210]"));

        let asian = defaults.create("zxx-Hans-XX", None).unwrap();
        assert_that!(asian.get_string("This is a test") == "[Ťĥíš íš à ţëšţ6543210]", eq(false));
    }

    #[rstest]
    fn source_locale_is_never_pseudo() {
        let factory = PseudoFactory::new("en-GB");
        assert_that!(factory.create("en-GB", None).is_none(), eq(true));
        assert_that!(factory.pseudo_locales().any(|l| l == "en-GB"), eq(false));
    }

    #[rstest]
    #[case("es-US")]
    #[case("en-LB")]
    #[case("en-US")]
    fn not_pseudo(defaults: PseudoFactory<'static>, #[case] locale: &str) {
        assert_that!(defaults.create(locale, None).is_none(), eq(true));
    }

    #[rstest]
    fn nopseudo_disables_everything() {
        let factory = PseudoFactory::new("en-US")
            .with_pseudo_locales(locales(&[("ps-DO", PseudoStyle::Debug)]))
            .with_nopseudo(true);
        assert_that!(factory.create("ps-DO", None).is_none(), eq(true));
        assert_that!(factory.pseudo_locales().count(), eq(0));
    }

    #[rstest]
    fn configured_locale_with_variant() {
        let factory =
            PseudoFactory::new("en-US").with_pseudo_locales(locales(&[("ps-DO", PseudoStyle::Debug)]));
        let pseudo = factory.create("ps-DO", Some("plaintext")).unwrap();
        assert_that!(pseudo.source_locale(), eq("en-US"));

        let pseudo = factory.create("ps-DO-ASDF", None).unwrap();
        assert_that!(pseudo.source_locale(), eq("en-US-ASDF"));
        assert_that!(factory.create("es-US", None).is_none(), eq(true));
    }

    #[rstest]
    fn word_based_prefers_translations() {
        use crate::resource::Resource;

        let mut set = TranslationSet::default();
        set.add(
            Resource::string("asdf", "This is a test")
                .with_project("foo")
                .with_target_locale("en-GB")
                .with_target("override string"),
        );
        let factory = PseudoFactory::new("en-US").with_translations(&set);
        let pseudo = factory.create("en-GB", None).unwrap();
        let res = Resource::string("asdf", "This is a test").with_project("foo");
        assert_that!(pseudo.get_string_for_resource(&res, None), some(eq("override string")));
    }

    #[rstest]
    #[case("english-british", PseudoStyle::British)]
    #[case("debug-rtl", PseudoStyle::DebugRtl)]
    #[case("debug-font", PseudoStyle::Debug)]
    #[case("debug-han-simplified", PseudoStyle::Debug)]
    fn style_names(#[case] name: &str, #[case] style: PseudoStyle) {
        assert_that!(PseudoStyle::from_name(name), eq(style));
    }
}
