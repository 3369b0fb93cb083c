//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use std::collections::BTreeMap;

use crate::plural::PluralCategory;
use crate::resource::{
    ArrayItems,
    PluralForms,
};

/// 文字列スライスから隙間のない配列要素を作成する
pub(crate) fn items(values: &[&str]) -> ArrayItems {
    values.iter().map(|v| Some((*v).to_owned())).collect()
}

/// `(カテゴリ名, 値)` の組から複数形マップを作成する
///
/// # Panics
/// 未知のカテゴリ名が渡された場合
#[allow(clippy::panic)]
pub(crate) fn forms(pairs: &[(&str, &str)]) -> PluralForms {
    pairs
        .iter()
        .map(|(name, value)| {
            let category = PluralCategory::from_name(name)
                .unwrap_or_else(|| panic!("unknown plural category: {name}"));
            (category, (*value).to_owned())
        })
        .collect::<BTreeMap<_, _>>()
}
