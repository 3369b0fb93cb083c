//! Embedded data tables for the pseudo localizers.
//!
//! Each table is JSON compiled into the binary and parsed on first use. A
//! table that fails to parse is logged and treated as empty, so the affected
//! localizer passes text through unchanged.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Word to replacement word.
pub(super) type WordTable = HashMap<String, String>;

/// Character to replacement character.
pub(super) type CharTable = HashMap<char, char>;

/// A JSON table compiled into the binary.
struct TableFile {
    /// File contents.
    content: &'static str,
    /// Name used in log messages.
    name: &'static str,
}

/// British spellings.
const BRITISH: TableFile =
    TableFile { content: include_str!("../../data/spelling/en-GB.json"), name: "en-GB" };
/// Canadian spellings.
const CANADIAN: TableFile =
    TableFile { content: include_str!("../../data/spelling/en-CA.json"), name: "en-CA" };
/// New Zealand spellings.
const NEW_ZEALAND: TableFile =
    TableFile { content: include_str!("../../data/spelling/en-NZ.json"), name: "en-NZ" };

/// Simplified to Traditional, common to all regions.
const HANT_BASE: TableFile =
    TableFile { content: include_str!("../../data/hant/s2t.json"), name: "s2t" };
/// Taiwan overrides.
const HANT_TW: TableFile =
    TableFile { content: include_str!("../../data/hant/s2tw.json"), name: "s2tw" };
/// Hong Kong overrides.
const HANT_HK: TableFile =
    TableFile { content: include_str!("../../data/hant/s2hk.json"), name: "s2hk" };

/// Latin debug pseudo.
const DEBUG_LATIN: TableFile =
    TableFile { content: include_str!("../../data/debug/zxx-XX.json"), name: "zxx-XX" };
/// Arabic-script debug pseudo.
const DEBUG_ARABIC: TableFile =
    TableFile { content: include_str!("../../data/debug/zxx-Arab-XX.json"), name: "zxx-Arab-XX" };
/// Han debug pseudo.
const DEBUG_HAN: TableFile =
    TableFile { content: include_str!("../../data/debug/zxx-Hans-XX.json"), name: "zxx-Hans-XX" };

/// Parsed British spelling table.
static BRITISH_CACHE: OnceLock<WordTable> = OnceLock::new();
/// Parsed Canadian spelling table.
static CANADIAN_CACHE: OnceLock<WordTable> = OnceLock::new();
/// Parsed New Zealand spelling table.
static NEW_ZEALAND_CACHE: OnceLock<WordTable> = OnceLock::new();
/// 繁体字 (台湾)
static HANT_TW_CACHE: OnceLock<CharTable> = OnceLock::new();
/// 繁体字 (香港)
static HANT_HK_CACHE: OnceLock<CharTable> = OnceLock::new();
/// Parsed Latin debug table.
static DEBUG_LATIN_CACHE: OnceLock<CharTable> = OnceLock::new();
/// Parsed Arabic debug table.
static DEBUG_ARABIC_CACHE: OnceLock<CharTable> = OnceLock::new();
/// Parsed Han debug table.
static DEBUG_HAN_CACHE: OnceLock<CharTable> = OnceLock::new();

/// Parses a word table.
fn parse_words(file: &TableFile) -> WordTable {
    serde_json::from_str(file.content)
        .map_err(|e| tracing::error!("Failed to parse table {}: {e:?}", file.name))
        .unwrap_or_default()
}

/// Parses a character table. Entries that are not single characters are dropped.
fn parse_chars(file: &TableFile) -> CharTable {
    parse_words(file)
        .into_iter()
        .filter_map(|(from, to)| Some((single_char(&from)?, single_char(&to)?)))
        .collect()
}

/// The only character of `s`.
fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

/// British spelling table.
pub(super) fn british() -> &'static WordTable {
    BRITISH_CACHE.get_or_init(|| parse_words(&BRITISH))
}

/// Canadian spelling table.
pub(super) fn canadian() -> &'static WordTable {
    CANADIAN_CACHE.get_or_init(|| parse_words(&CANADIAN))
}

/// New Zealand spelling table.
pub(super) fn new_zealand() -> &'static WordTable {
    NEW_ZEALAND_CACHE.get_or_init(|| parse_words(&NEW_ZEALAND))
}

/// Simplified to Traditional table with the regional overlay applied.
pub(super) fn hant(taiwan: bool) -> &'static CharTable {
    let (cache, overlay) = if taiwan { (&HANT_TW_CACHE, &HANT_TW) } else { (&HANT_HK_CACHE, &HANT_HK) };
    cache.get_or_init(|| {
        let mut table = parse_chars(&HANT_BASE);
        table.extend(parse_chars(overlay));
        table
    })
}

/// Latin debug map.
pub(super) fn debug_latin() -> &'static CharTable {
    DEBUG_LATIN_CACHE.get_or_init(|| parse_chars(&DEBUG_LATIN))
}

/// Arabic-script debug map.
pub(super) fn debug_arabic() -> &'static CharTable {
    DEBUG_ARABIC_CACHE.get_or_init(|| parse_chars(&DEBUG_ARABIC))
}

/// Han debug map.
pub(super) fn debug_han() -> &'static CharTable {
    DEBUG_HAN_CACHE.get_or_init(|| parse_chars(&DEBUG_HAN))
}
