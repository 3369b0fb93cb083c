//! `.l10n-kit.json` の読み込み

use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    ProjectSettings,
};

/// Project file name.
pub const CONFIG_FILE_NAME: &str = ".l10n-kit.json";

/// Reads the project file in `project_root`.
///
/// ファイルがない場合と中身が空の場合は `Ok(None)` を返し、既定値に任せる
///
/// # Errors
/// - ファイル読み込みエラー (ディレクトリなど)
/// - JSON パースエラー
pub fn load_from_project(project_root: &Path) -> Result<Option<ProjectSettings>, ConfigError> {
    let config_path = project_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %config_path.display(), "No project file");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        tracing::warn!(path = %config_path.display(), "Project file is empty, using defaults");
        return Ok(None);
    }

    let settings: ProjectSettings = serde_json::from_str(&content)?;
    tracing::info!(path = %config_path.display(), id = %settings.id, "Loaded project file");
    Ok(Some(settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::config::PseudoLocaleSetting;

    /// 空のプロジェクトディレクトリ
    #[fixture]
    fn project() -> TempDir {
        TempDir::new().unwrap()
    }

    /// 設定ファイルを書き込む
    fn write_config(project: &TempDir, content: &str) {
        fs::write(project.path().join(CONFIG_FILE_NAME), content).unwrap();
    }

    // ===== 読み込み テスト =====

    #[rstest]
    fn reads_project_file(project: TempDir) {
        write_config(
            &project,
            r#"{
                "id": "webapp",
                "locales": ["de-DE", "ja-JP"],
                "pseudoLocale": {"en-GB": "english-british"},
                "xliffsOut": "out"
            }"#,
        );

        let settings = load_from_project(project.path()).unwrap().unwrap();

        assert_that!(settings.id, eq("webapp"));
        assert_that!(settings.locales, elements_are![eq("de-DE"), eq("ja-JP")]);
        assert!(matches!(settings.pseudo_locale, Some(PseudoLocaleSetting::Map(_))));
        assert_that!(settings.xliffs_out, eq("out"));
        assert_that!(settings.xliffs_dir, eq("xliffs"));
    }

    #[rstest]
    #[case::missing(None)]
    #[case::empty(Some(""))]
    #[case::whitespace(Some(" \n\t\n"))]
    fn absent_or_empty_file_is_none(project: TempDir, #[case] content: Option<&str>) {
        if let Some(content) = content {
            write_config(&project, content);
        }
        assert_that!(load_from_project(project.path()).unwrap(), none());
    }

    // ===== エラー テスト =====

    #[rstest]
    fn invalid_json_is_parse_error(project: TempDir) {
        write_config(&project, r#"{"id": "webapp",}"#);
        assert!(matches!(load_from_project(project.path()), Err(ConfigError::ParseError(_))));
    }

    #[rstest]
    fn wrong_field_type_is_parse_error(project: TempDir) {
        write_config(&project, r#"{"locales": "de-DE"}"#);
        assert!(matches!(load_from_project(project.path()), Err(ConfigError::ParseError(_))));
    }

    #[rstest]
    fn directory_in_place_of_file_is_io_error(project: TempDir) {
        fs::create_dir(project.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(matches!(load_from_project(project.path()), Err(ConfigError::IoError(_))));
    }
}
