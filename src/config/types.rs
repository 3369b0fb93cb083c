//! プロジェクト設定の型とバリデーション

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::Locale;
use crate::pseudo::{
    PseudoFactory,
    PseudoLocales,
    PseudoStyle,
    default_pseudo_locales,
    default_style,
};
use crate::resource::DEFAULT_SOURCE_LOCALE;
use crate::xliff::{
    XliffOptions,
    XliffVersion,
};

/// One invalid setting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "locales[0]")
    pub field_path: String,
    /// What is wrong and how to fix it.
    pub message: String,
}

impl ValidationError {
    /// Creates an error for `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Failure to load project settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file parsed but has invalid values.
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The file could not be read.
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid JSON for [`ProjectSettings`].
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `pseudoLocale` as written in the project file.
///
/// - 文字列: 既定の表にそのロケールを `debug` として追加
/// - 配列: 列挙したロケールのみ。スタイルは既定の表から
/// - オブジェクト: ロケールとスタイル名の対応をそのまま使う
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PseudoLocaleSetting {
    /// One extra debug pseudo locale.
    Single(String),
    /// Exactly these locales.
    List(Vec<String>),
    /// Locale to style name.
    Map(BTreeMap<String, String>),
}

impl PseudoLocaleSetting {
    /// Locale tags named by this setting.
    fn locales(&self) -> Vec<&str> {
        match self {
            Self::Single(locale) => vec![locale.as_str()],
            Self::List(locales) => locales.iter().map(String::as_str).collect(),
            Self::Map(map) => map.keys().map(String::as_str).collect(),
        }
    }
}

/// Settings of one localization project, read from `.l10n-kit.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSettings {
    /// Project name, written as the product name of interchange files.
    pub id: String,

    /// Locale the source strings are written in.
    pub source_locale: String,

    /// Target locales.
    pub locales: Vec<String>,

    /// Pseudo locales. `None` uses the built-in table.
    pub pseudo_locale: Option<PseudoLocaleSetting>,

    /// Disables pseudo-localization.
    pub nopseudo: bool,

    /// Keeps duplicate units with different comments as instances.
    pub allow_dups: bool,

    /// `"1.2"` or `"2.0"`.
    pub xliff_version: String,

    /// Directory the translated interchange files are read from.
    pub xliffs_dir: String,

    /// Directory new and pseudo interchange files are written to.
    pub xliffs_out: String,

    /// Locale to the locale used in output file names.
    pub locale_map: BTreeMap<String, String>,

    /// Locale to the locale whose translations it falls back to.
    pub locale_inherit: BTreeMap<String, String>,

    /// Glob patterns of interchange files to ignore, relative to `xliffsDir`.
    pub excludes: Vec<String>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            id: String::new(),
            source_locale: DEFAULT_SOURCE_LOCALE.to_owned(),
            locales: Vec::new(),
            pseudo_locale: None,
            nopseudo: false,
            allow_dups: false,
            xliff_version: XliffVersion::V1_2.as_str().to_owned(),
            xliffs_dir: "xliffs".to_owned(),
            xliffs_out: ".".to_owned(),
            locale_map: BTreeMap::new(),
            locale_inherit: BTreeMap::new(),
            excludes: Vec::new(),
        }
    }
}

impl ProjectSettings {
    /// # Errors
    /// - Malformed locale tag
    /// - Unknown xliff version
    /// - Empty `xliffsDir`
    /// - Invalid exclude glob
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !is_valid_locale(&self.source_locale) {
            errors.push(invalid_locale("sourceLocale", &self.source_locale));
        }

        for (index, locale) in self.locales.iter().enumerate() {
            if !is_valid_locale(locale) {
                errors.push(invalid_locale(&format!("locales[{index}]"), locale));
            }
        }

        if let Some(setting) = &self.pseudo_locale {
            for locale in setting.locales() {
                if !is_valid_locale(locale) {
                    errors.push(invalid_locale("pseudoLocale", locale));
                }
            }
        }

        if XliffVersion::from_name(&self.xliff_version).is_none() {
            errors.push(ValidationError::new(
                "xliffVersion",
                format!("Unknown version '{}'. Use \"1.2\" or \"2.0\"", self.xliff_version),
            ));
        }

        if self.xliffs_dir.is_empty() {
            errors.push(ValidationError::new(
                "xliffsDir",
                "The directory cannot be empty. Example: \"xliffs\"",
            ));
        }

        for (index, pattern) in self.excludes.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludes[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Effective pseudo locale table.
    #[must_use]
    pub fn pseudo_locales(&self) -> PseudoLocales {
        match &self.pseudo_locale {
            None => default_pseudo_locales().clone(),
            Some(PseudoLocaleSetting::Single(locale)) => {
                let mut locales = default_pseudo_locales().clone();
                locales.insert(locale.clone(), PseudoStyle::Debug);
                locales
            }
            Some(PseudoLocaleSetting::List(list)) => {
                list.iter().map(|locale| (locale.clone(), default_style(locale))).collect()
            }
            Some(PseudoLocaleSetting::Map(map)) => map
                .iter()
                .map(|(locale, style)| (locale.clone(), PseudoStyle::from_name(style)))
                .collect(),
        }
    }

    /// Pseudo factory configured for this project.
    #[must_use]
    pub fn pseudo_factory<'a>(&self) -> PseudoFactory<'a> {
        PseudoFactory::new(self.source_locale.as_str())
            .with_pseudo_locales(self.pseudo_locales())
            .with_nopseudo(self.nopseudo)
    }

    /// Interchange version. Unknown values read as 1.2.
    #[must_use]
    pub fn xliff_version(&self) -> XliffVersion {
        XliffVersion::from_name(&self.xliff_version).unwrap_or_default()
    }

    /// Options for reading and writing this project's interchange files.
    #[must_use]
    pub fn xliff_options(&self) -> XliffOptions {
        XliffOptions {
            allow_dups: self.allow_dups,
            source_locale: Some(self.source_locale.clone()),
            ..XliffOptions::new(self.xliff_version())
        }
    }

    /// Locale used in output file names for `locale`.
    #[must_use]
    pub fn output_locale<'s>(&'s self, locale: &'s str) -> &'s str {
        self.locale_map.get(locale).map(String::as_str).filter(|l| !l.is_empty()).unwrap_or(locale)
    }

    /// Locale whose translations `locale` falls back to, if any.
    #[must_use]
    pub fn inherit_locale(&self, locale: &str) -> Option<&str> {
        self.locale_inherit.get(locale).map(String::as_str).filter(|l| !l.is_empty())
    }
}

/// `true` when the tag starts with a language subtag.
fn is_valid_locale(tag: &str) -> bool {
    !Locale::parse(tag).language.is_empty()
}

/// Error for a malformed locale tag.
fn invalid_locale(field_path: &str, tag: &str) -> ValidationError {
    ValidationError::new(
        field_path,
        format!("Invalid locale tag '{tag}'. Example: \"de-DE\" or \"zh-Hant-TW\""),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    // ===== デシリアライズ テスト =====

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: ProjectSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings.source_locale, eq("en-US"));
        assert_that!(settings.xliff_version, eq("1.2"));
        assert_that!(settings.xliffs_dir, eq("xliffs"));
        assert_that!(settings.pseudo_locale, none());
        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_full_settings() {
        let json = r#"{
            "id": "webapp",
            "sourceLocale": "en-GB",
            "locales": ["de-DE", "ja-JP"],
            "pseudoLocale": {"zxx-XX": "debug", "en-CA": "english-canadian"},
            "nopseudo": true,
            "allowDups": true,
            "xliffVersion": "2.0",
            "xliffsOut": "out",
            "localeMap": {"nb-NO": "no-NO"},
            "localeInherit": {"en-AU": "en-GB"},
            "excludes": ["old/**"]
        }"#;

        let settings: ProjectSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.id, eq("webapp"));
        assert_that!(settings.locales, elements_are![eq("de-DE"), eq("ja-JP")]);
        assert_that!(settings.nopseudo, eq(true));
        assert_that!(settings.xliff_version(), eq(XliffVersion::V2_0));
        assert_that!(settings.xliffs_out, eq("out"));
        assert_that!(settings.excludes, len(eq(1)));

        let options = settings.xliff_options();
        assert_that!(options.allow_dups, eq(true));
        assert_that!(options.source_locale.as_deref(), some(eq("en-GB")));
    }

    // ===== 擬似ロケール テスト =====

    #[rstest]
    fn pseudo_locales_absent_uses_defaults() {
        let settings = ProjectSettings::default();
        assert_that!(settings.pseudo_locales(), eq(&default_pseudo_locales().clone()));
    }

    #[rstest]
    fn pseudo_locales_single_adds_debug() {
        let settings: ProjectSettings =
            serde_json::from_str(r#"{"pseudoLocale": "ps-DO"}"#).unwrap();
        let locales = settings.pseudo_locales();

        assert_that!(locales.get("ps-DO"), some(eq(&PseudoStyle::Debug)));
        assert_that!(locales.get("en-GB"), some(eq(&PseudoStyle::British)));
    }

    #[rstest]
    fn pseudo_locales_list_uses_default_styles() {
        let settings: ProjectSettings =
            serde_json::from_str(r#"{"pseudoLocale": ["ps-DO", "zh-Hant-TW"]}"#).unwrap();
        let locales = settings.pseudo_locales();

        assert_that!(locales.len(), eq(2));
        assert_that!(locales.get("ps-DO"), some(eq(&PseudoStyle::Debug)));
        assert_that!(locales.get("zh-Hant-TW"), some(eq(&PseudoStyle::TraditionalTaiwan)));
    }

    #[rstest]
    fn pseudo_locales_map_uses_style_names() {
        let settings: ProjectSettings =
            serde_json::from_str(r#"{"pseudoLocale": {"ps-DO": "english-british", "zxx-XX": "nonsense"}}"#)
                .unwrap();
        let locales = settings.pseudo_locales();

        assert_that!(locales.get("ps-DO"), some(eq(&PseudoStyle::British)));
        assert_that!(locales.get("zxx-XX"), some(eq(&PseudoStyle::Debug)));
    }

    #[rstest]
    #[case(r#"{"pseudoLocale": []}"#)]
    #[case(r#"{"pseudoLocale": {}}"#)]
    fn pseudo_locales_empty_disables(#[case] json: &str) {
        let settings: ProjectSettings = serde_json::from_str(json).unwrap();
        assert_that!(settings.pseudo_locales().is_empty(), eq(true));
    }

    #[rstest]
    fn pseudo_factory_follows_settings() {
        let settings: ProjectSettings =
            serde_json::from_str(r#"{"sourceLocale": "en-US", "pseudoLocale": ["ps-DO"]}"#).unwrap();
        let factory = settings.pseudo_factory();

        assert_that!(factory.create("ps-DO", None).is_some(), eq(true));
        assert_that!(factory.create("es-US", None).is_none(), eq(true));
        assert_that!(factory.create("en-US", None).is_none(), eq(true));
    }

    // ===== ロケール対応 テスト =====

    #[rstest]
    #[case("nb-NO", "no-NO")]
    #[case("de-DE", "de-DE")]
    #[case("fr-FR", "fr-FR")]
    fn output_locale(#[case] locale: &str, #[case] expected: &str) {
        let settings = ProjectSettings {
            locale_map: BTreeMap::from([
                ("nb-NO".to_owned(), "no-NO".to_owned()),
                ("fr-FR".to_owned(), String::new()),
            ]),
            ..ProjectSettings::default()
        };
        assert_that!(settings.output_locale(locale), eq(expected));
    }

    #[rstest]
    fn inherit_locale() {
        let settings = ProjectSettings {
            locale_inherit: BTreeMap::from([("en-AU".to_owned(), "en-GB".to_owned())]),
            ..ProjectSettings::default()
        };
        assert_that!(settings.inherit_locale("en-AU"), some(eq("en-GB")));
        assert_that!(settings.inherit_locale("en-GB"), none());
    }

    // ===== バリデーション テスト =====

    #[rstest]
    fn validate_invalid_locales() {
        let settings = ProjectSettings {
            source_locale: String::new(),
            locales: vec!["de-DE".to_owned(), "1234".to_owned()],
            ..ProjectSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![
                field!(ValidationError.field_path, eq("sourceLocale")),
                all![
                    field!(ValidationError.field_path, eq("locales[1]")),
                    field!(ValidationError.message, contains_substring("'1234'"))
                ]
            ])
        );
    }

    #[rstest]
    fn validate_invalid_pseudo_locale() {
        let settings = ProjectSettings {
            pseudo_locale: Some(PseudoLocaleSetting::Single("_".to_owned())),
            ..ProjectSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("pseudoLocale"))])
        );
    }

    #[rstest]
    fn validate_unknown_version_and_empty_dir() {
        let settings = ProjectSettings {
            xliff_version: "3.0".to_owned(),
            xliffs_dir: String::new(),
            ..ProjectSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![
                all![
                    field!(ValidationError.field_path, eq("xliffVersion")),
                    field!(ValidationError.message, contains_substring("'3.0'"))
                ],
                field!(ValidationError.field_path, eq("xliffsDir"))
            ])
        );
    }

    #[rstest]
    fn validate_invalid_exclude_glob() {
        let settings = ProjectSettings {
            excludes: vec!["old/**".to_owned(), "invalid[pattern".to_owned()],
            ..ProjectSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("excludes[1]")),
                field!(ValidationError.message, contains_substring("invalid[pattern"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let errors = ProjectSettings {
            source_locale: String::new(),
            xliffs_dir: String::new(),
            ..ProjectSettings::default()
        }
        .validate()
        .unwrap_err();

        let message = ConfigError::ValidationErrors(errors).to_string();
        assert_that!(message, contains_substring("Configuration validation failed"));
        assert_that!(message, contains_substring("1. sourceLocale"));
        assert_that!(message, contains_substring("2. xliffsDir"));
    }
}
