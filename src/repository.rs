//! Interchange files on disk.
//!
//! 翻訳済み xliff ファイルのディレクトリを一つの [`TranslationSet`] として読み込み、
//! ロケールごとのファイルとして書き出す。

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;

use crate::error::RepositoryError;
use crate::translation_set::TranslationSet;
use crate::xliff::{
    Xliff,
    XliffOptions,
};

/// File extension of interchange files.
const XLIFF_EXTENSION: &str = "xliff";

/// A directory of interchange files.
#[derive(Debug, Clone)]
pub struct XliffRepository {
    /// Directory scanned for `*.xliff` files.
    root: PathBuf,
    /// Glob patterns, relative to `root`, of files to leave out.
    excludes: Vec<String>,
    /// Options every file is read and written with.
    options: XliffOptions,
}

impl XliffRepository {
    /// Repository rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, options: XliffOptions) -> Self {
        Self { root: root.into(), excludes: Vec::new(), options }
    }

    /// Sets the exclude patterns.
    #[must_use]
    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }

    /// Scanned directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `*.xliff` files under the root that no exclude pattern matches,
    /// sorted by path.
    ///
    /// # Errors
    /// [`RepositoryError`] when an exclude pattern is invalid.
    pub fn find_files(&self) -> Result<Vec<PathBuf>, RepositoryError> {
        let exclude_set = build_globset(&self.excludes)?;
        let mut found = Vec::new();

        for result in WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != XLIFF_EXTENSION) {
                continue;
            }
            let Ok(relative_path) = path.strip_prefix(&self.root) else {
                continue;
            };
            if exclude_set.is_match(relative_path) {
                tracing::debug!(path = %relative_path.display(), "Excluded xliff file");
                continue;
            }
            found.push(path.to_path_buf());
        }

        found.sort();
        Ok(found)
    }

    /// Reads every file from [`find_files`](Self::find_files) concurrently
    /// and merges them in path order. Files that fail to load are logged and
    /// skipped.
    ///
    /// # Errors
    /// [`RepositoryError`] when an exclude pattern is invalid.
    pub async fn load(&self) -> Result<TranslationSet, RepositoryError> {
        let files = self.find_files()?;
        tracing::debug!(root = %self.root.display(), files = files.len(), "Loading xliff files");

        // 並列に読み込み、結果はパス順のまま
        let loads = files.iter().map(|path| Xliff::load(path, self.options.clone()));
        let results = futures::future::join_all(loads).await;

        let source_locale =
            self.options.source_locale.as_deref().unwrap_or(crate::resource::DEFAULT_SOURCE_LOCALE);
        let mut set = TranslationSet::new(source_locale);
        for (path, result) in files.iter().zip(results) {
            match result {
                Ok(xliff) => {
                    tracing::debug!(path = %path.display(), resources = xliff.size(), "Loaded xliff file");
                    set.add_all(xliff.resources().cloned());
                }
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", path.display(), e);
                }
            }
        }
        set.set_clean();
        Ok(set)
    }

    /// Writes one file per target locale of `set` into `out_dir`.
    ///
    /// `file_name` maps a target locale to the file name to use. Files that
    /// fail to write are logged and skipped. Returns the written paths.
    pub async fn write_locales(
        &self,
        set: &TranslationSet,
        out_dir: &Path,
        file_name: impl Fn(&str) -> String,
    ) -> Vec<PathBuf> {
        let documents: Vec<_> = set
            .get_locales()
            .into_iter()
            .map(|locale| {
                let options = XliffOptions {
                    target_locale: Some(locale.clone()),
                    path: None,
                    ..self.options.clone()
                };
                let mut xliff = Xliff::new(options);
                xliff.add_resources(
                    set.get_all().filter(|r| r.target_locale() == Some(locale.as_str())).cloned(),
                );
                (out_dir.join(file_name(&locale)), xliff)
            })
            .collect();

        let writes = documents.iter().map(|(path, xliff)| xliff.write(path));
        let results = futures::future::join_all(writes).await;

        let mut written = Vec::new();
        for ((path, _), result) in documents.iter().zip(results) {
            match result {
                Ok(()) => written.push(path.clone()),
                Err(e) => tracing::warn!("Failed to write {}: {}", path.display(), e),
            }
        }
        written
    }
}

/// Builds one matcher from `patterns`.
fn build_globset(patterns: &[String]) -> Result<GlobSet, RepositoryError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| RepositoryError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| RepositoryError::PatternSet(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::resource::Resource;

    /// 1 リソースだけを持つ 1.2 文書
    fn document(key: &str, target_locale: &str, target: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<xliff version="1.2">
  <file original="a.js" source-language="en-US" target-language="{target_locale}" product-name="app">
    <body>
      <trans-unit id="1" resname="{key}" restype="string" datatype="javascript">
        <source>Hello</source>
        <target>{target}</target>
      </trans-unit>
    </body>
  </file>
</xliff>"#
        )
    }

    #[fixture]
    fn workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("de")).unwrap();
        fs::create_dir_all(dir.path().join("old")).unwrap();
        fs::write(dir.path().join("de/app-de-DE.xliff"), document("greeting", "de-DE", "Hallo")).unwrap();
        fs::write(dir.path().join("fr-FR.xliff"), document("greeting", "fr-FR", "Bonjour")).unwrap();
        fs::write(dir.path().join("old/app-de-DE.xliff"), document("stale", "de-DE", "Alt")).unwrap();
        fs::write(dir.path().join("notes.txt"), "not xliff").unwrap();
        dir
    }

    // ===== 検索 テスト =====

    #[rstest]
    fn find_files_sorted_and_filtered(workspace: TempDir) {
        let repository = XliffRepository::new(workspace.path(), XliffOptions::default())
            .with_excludes(vec!["old/**".to_owned()]);

        let files = repository.find_files().unwrap();

        assert_that!(
            files,
            elements_are![
                eq(&workspace.path().join("de/app-de-DE.xliff")),
                eq(&workspace.path().join("fr-FR.xliff"))
            ]
        );
    }

    #[rstest]
    fn invalid_exclude_pattern(workspace: TempDir) {
        let repository = XliffRepository::new(workspace.path(), XliffOptions::default())
            .with_excludes(vec!["old/[".to_owned()]);

        let result = repository.find_files();

        assert_that!(
            matches!(result, Err(RepositoryError::InvalidPattern { ref pattern, .. }) if pattern == "old/["),
            eq(true)
        );
    }

    // ===== 読み込み テスト =====

    #[rstest]
    #[tokio::test]
    async fn load_merges_files(workspace: TempDir) {
        let repository = XliffRepository::new(workspace.path(), XliffOptions::default());

        let set = repository.load().await.unwrap();

        assert_that!(set.size(), eq(3));
        assert_that!(set.get_locales(), elements_are![eq("de-DE"), eq("fr-FR")]);
        assert_that!(set.is_dirty(), eq(false));
    }

    #[rstest]
    #[tokio::test]
    async fn load_skips_malformed_files(workspace: TempDir) {
        fs::write(workspace.path().join("broken.xliff"), "<xliff version=\"1.2\"><file>").unwrap();
        let repository = XliffRepository::new(workspace.path(), XliffOptions::default())
            .with_excludes(vec!["old/**".to_owned()]);

        let set = repository.load().await.unwrap();

        assert_that!(set.size(), eq(2));
    }

    // ===== 書き出し テスト =====

    #[rstest]
    #[tokio::test]
    async fn write_locales_one_file_per_locale() {
        let out = TempDir::new().unwrap();
        let mut set = TranslationSet::default();
        for (locale, target) in [("de-DE", "Hallo"), ("ja-JP", "こんにちは")] {
            set.add(
                Resource::string("greeting", "Hello")
                    .with_project("app")
                    .with_path("a.js")
                    .with_target_locale(locale)
                    .with_target(target),
            );
        }
        set.add(Resource::string("greeting", "Hello").with_project("app").with_path("a.js"));

        let repository = XliffRepository::new(out.path(), XliffOptions::default());
        let written = repository
            .write_locales(&set, &out.path().join("xliffs"), |locale| format!("app-{locale}.xliff"))
            .await;

        assert_that!(written.len(), eq(2));
        let ja = fs::read_to_string(out.path().join("xliffs/app-ja-JP.xliff")).unwrap();
        assert_that!(ja, contains_substring("<target>こんにちは</target>"));
        assert_that!(ja, not(contains_substring("Hallo")));
    }
}
