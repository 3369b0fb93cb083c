//! Identity key construction.

/// Modulus of the source hash.
const SOURCE_HASH_MODULUS: u64 = 1_073_741_789;

/// Multiplier of the source hash.
const SOURCE_HASH_MULTIPLIER: u64 = 65521;

/// Joins a tag and identity segments with `_`. Absent segments stay empty.
pub(crate) fn join_segments(tag: &str, segments: &[Option<&str>]) -> String {
    let mut key = String::from(tag);
    for segment in segments {
        key.push('_');
        key.push_str(segment.unwrap_or_default());
    }
    key
}

/// Short non-cryptographic hash of a source string, rendered as `r<digits>`.
///
/// Stable across runs and platforms. Runs over UTF-16 code units.
#[must_use]
pub fn source_hash(source: &str) -> Option<String> {
    if source.is_empty() {
        return None;
    }
    let hash = source.encode_utf16().fold(0_u64, |hash, unit| {
        ((hash + u64::from(unit)) * SOURCE_HASH_MULTIPLIER) % SOURCE_HASH_MODULUS
    });
    Some(format!("r{hash}"))
}

/// Trims a key and collapses each internal whitespace run to one space.
pub(crate) fn clean_key(key: &str) -> String {
    key.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `true` when both strings match after whitespace collapsing.
pub(crate) fn same_clean_text(a: &str, b: &str) -> bool {
    a.split_whitespace().eq(b.split_whitespace())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn join_segments_keeps_empty_slots() {
        assert_that!(join_segments("rs", &[None, Some("de-DE"), None, None, None]), eq("rs__de-DE___"));
    }

    #[rstest]
    fn source_hash_is_deterministic() {
        let first = source_hash("This is a test").unwrap();
        assert_that!(first.starts_with('r'), eq(true));
        assert_that!(source_hash("This is a test"), some(eq(&first)));
        assert_that!(source_hash("This is a tesT"), not(some(eq(&first))));
    }

    #[rstest]
    fn source_hash_single_unit() {
        // (0 + 97) * 65521 = 6355537
        assert_that!(source_hash("a"), some(eq("r6355537")));
    }

    #[rstest]
    fn source_hash_of_empty_is_none() {
        assert_that!(source_hash(""), none());
    }

    #[rstest]
    #[case("  This   is\ta \n test ", "This is a test")]
    #[case("plain", "plain")]
    #[case("", "")]
    fn clean_key_collapses(#[case] input: &str, #[case] expected: &str) {
        assert_that!(clean_key(input), eq(expected));
    }

    #[rstest]
    #[case("a b c", " a   b\t\tc  \t", true)]
    #[case("a b c", "a b d", false)]
    #[case("abc", "a bc", false)]
    fn same_clean_text_cases(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
        assert_that!(same_clean_text(a, b), eq(expected));
    }
}
