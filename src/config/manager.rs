//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    ProjectSettings,
    ValidationError,
    loader,
};

/// Current project settings and the root they were loaded from.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: ProjectSettings,

    /// プロジェクトのルートパス
    project_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the settings of `project_root`, or the defaults when there is
    /// no root or no project file.
    ///
    /// With a root, `xliffsDir` must name an existing directory under it and
    /// `xliffsOut` must not name a file. The previous settings are kept on
    /// error.
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー (パスの検査を含む)
    pub fn load_settings(&mut self, project_root: Option<PathBuf>) -> Result<(), ConfigError> {
        let settings = match &project_root {
            Some(root) => loader::load_from_project(root)?.unwrap_or_default(),
            None => ProjectSettings::default(),
        };

        let mut errors = settings.validate().err().unwrap_or_default();
        if let Some(root) = &project_root {
            errors.extend(check_paths(&settings, root));
        }
        if !errors.is_empty() {
            return Err(ConfigError::ValidationErrors(errors));
        }

        tracing::debug!(root = ?project_root, settings = ?settings, "Settings loaded");
        self.current_settings = settings;
        self.project_root = project_root;
        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &ProjectSettings {
        &self.current_settings
    }

    /// プロジェクトルートを取得
    #[must_use]
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// `relative` under the project root, or as is without a root.
    #[must_use]
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.project_root.as_ref().map_or_else(|| PathBuf::from(relative), |root| root.join(relative))
    }
}

/// Directory settings that do not fit the layout under `root`.
fn check_paths(settings: &ProjectSettings, root: &Path) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let xliffs_dir = root.join(&settings.xliffs_dir);
    if !settings.xliffs_dir.is_empty() && !xliffs_dir.is_dir() {
        errors.push(ValidationError::new(
            "xliffsDir",
            format!("Directory not found: {}", xliffs_dir.display()),
        ));
    }

    let xliffs_out = root.join(&settings.xliffs_out);
    if xliffs_out.is_file() {
        errors.push(ValidationError::new(
            "xliffsOut",
            format!("Expected a directory but found a file: {}", xliffs_out.display()),
        ));
    }

    errors
}
