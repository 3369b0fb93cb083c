//! l10n-kit
//!
//! ローカライズ用リソースの同一性管理、擬似ローカライズ、XLIFF 1.2 / 2.0 の読み書き

pub mod config;
pub mod error;
pub mod locale;
pub mod plural;
pub mod pseudo;
pub mod repository;
pub mod resource;
pub mod translation_set;
pub mod workflow;
pub mod xliff;

#[cfg(test)]
mod test_utils;

pub use resource::Resource;
pub use translation_set::TranslationSet;
pub use xliff::Xliff;
