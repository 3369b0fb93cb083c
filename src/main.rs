//! Entry point: writes new-string and pseudo interchange files for a project.
//!
//! Usage: `l10n-kit [project-root]`. Source strings are the source-only
//! resources found among the project's interchange files.

use std::path::PathBuf;
use std::process::ExitCode;

use l10n_kit::TranslationSet;
use l10n_kit::config::{
    ConfigManager,
    ProjectSettings,
};
use l10n_kit::repository::XliffRepository;
use l10n_kit::workflow;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .init();

    let project_root = std::env::args().nth(1).map_or_else(|| PathBuf::from("."), PathBuf::from);
    let mut config_manager = ConfigManager::new();
    if let Err(e) = config_manager.load_settings(Some(project_root)) {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }
    let settings = config_manager.get_settings();

    let repository = XliffRepository::new(config_manager.resolve(&settings.xliffs_dir), settings.xliff_options())
        .with_excludes(settings.excludes.clone());
    let loaded = match repository.load().await {
        Ok(set) => set,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut sources = TranslationSet::new(settings.source_locale.as_str());
    sources.add_all(loaded.get_all().filter(|r| r.target_locale().is_none()).cloned());
    let mut translations = TranslationSet::new(settings.source_locale.as_str());
    translations.add_all(loaded.get_all().filter(|r| r.target_locale().is_some()).cloned());
    translations.add_set(&workflow::inherited_translations(&translations, settings));
    tracing::info!(sources = sources.size(), translations = translations.size(), "Loaded project");

    let factory = settings.pseudo_factory().with_translations(&translations);
    let locales = settings.locales.iter().map(String::as_str).filter(|l| !factory.is_pseudo_locale(l));
    let new_strings = workflow::new_strings(&sources, locales, &translations);
    let pseudo = workflow::pseudo_localize(&sources, &factory);

    let out_dir = config_manager.resolve(&settings.xliffs_out);
    let written_new = repository
        .write_locales(&new_strings, &out_dir, |locale| file_name(settings, "new-", locale))
        .await;
    let written_pseudo =
        repository.write_locales(&pseudo, &out_dir, |locale| file_name(settings, "", locale)).await;
    tracing::info!(
        new_strings = written_new.len(),
        pseudo = written_pseudo.len(),
        out_dir = %out_dir.display(),
        "Wrote xliff files"
    );

    ExitCode::SUCCESS
}

/// `{id}-{prefix}{locale}.xliff`, or `{prefix}{locale}.xliff` without a project id.
fn file_name(settings: &ProjectSettings, prefix: &str, locale: &str) -> String {
    let locale = settings.output_locale(locale);
    if settings.id.is_empty() {
        format!("{prefix}{locale}.xliff")
    } else {
        format!("{}-{prefix}{locale}.xliff", settings.id)
    }
}
