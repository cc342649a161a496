// ABOUTME: Character classification for whitespace normalization and thin-space insertion.
// ABOUTME: Covers the HTML ASCII whitespace set, East Asian width, and boundary-space rules.

//! Character classification helpers.
//!
//! These are pure lookups with no tree state. A boundary character is passed
//! as `Option<char>`: `None` means "no character exists on that side" and is
//! classified as non-whitespace, non-wide, non-punctuation.

use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_width::UnicodeWidthChar;

/// The ASCII whitespace set defined by the HTML spec.
/// https://infra.spec.whatwg.org/#ascii-whitespace
pub fn is_ascii_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\u{000C}' | '\r' | ' ')
}

pub fn trim_ascii_whitespace(s: &str) -> &str {
    s.trim_matches(is_ascii_whitespace)
}

pub fn trim_ascii_whitespace_start(s: &str) -> &str {
    s.trim_start_matches(is_ascii_whitespace)
}

pub fn trim_ascii_whitespace_end(s: &str) -> &str {
    s.trim_end_matches(is_ascii_whitespace)
}

pub fn has_ascii_whitespace_head(s: &str) -> bool {
    s.chars().next().is_some_and(is_ascii_whitespace)
}

pub fn has_ascii_whitespace_tail(s: &str) -> bool {
    s.chars().next_back().is_some_and(is_ascii_whitespace)
}

/// True if the leading ASCII whitespace run of `s` contains a newline.
///
/// Distinguishes soft-wrapped whitespace (safe to trim away entirely) from
/// deliberate inline spacing, which never spans a line break in the source.
pub fn has_newline_head(s: &str) -> bool {
    for c in s.chars() {
        if c == '\n' {
            return true;
        }
        if !is_ascii_whitespace(c) {
            return false;
        }
    }
    false
}

/// True if the trailing ASCII whitespace run of `s` contains a newline.
pub fn has_newline_tail(s: &str) -> bool {
    for c in s.chars().rev() {
        if c == '\n' {
            return true;
        }
        if !is_ascii_whitespace(c) {
            return false;
        }
    }
    false
}

/// East Asian width Wide or Fullwidth. Wide glyphs carry enough inherent
/// visual spacing that no collapsed space needs to survive next to them.
pub fn is_wide(c: char) -> bool {
    c.width() == Some(2)
}

pub fn is_punctuation(c: char) -> bool {
    c.general_category_group() == GeneralCategoryGroup::Punctuation
}

/// Whether a collapsed space must be kept between two boundary characters:
/// only when neither side is wide. A missing side counts as narrow.
pub fn should_reserve_space(r0: Option<char>, r1: Option<char>) -> bool {
    !r0.is_some_and(is_wide) && !r1.is_some_and(is_wide)
}

/// Applies the reserve-space rule to the facing edges of two text payloads.
///
/// An edge whose whitespace run contains a newline is trimmed first, so the
/// decision is made on the characters that will actually face each other
/// after normalization.
pub fn should_reserve_space_between_texts(d0: &str, d1: &str) -> bool {
    if d0.is_empty() && d1.is_empty() {
        return false;
    }

    let d0 = if has_newline_tail(d0) {
        trim_ascii_whitespace_end(d0)
    } else {
        d0
    };
    let d1 = if has_newline_head(d1) {
        trim_ascii_whitespace_start(d1)
    } else {
        d1
    };

    should_reserve_space(d0.chars().next_back(), d1.chars().next())
}

/// Whether a thin-space marker belongs between two adjacent characters.
///
/// False when either side is absent, whitespace, or punctuation; otherwise
/// true exactly when one side is wide and the other is narrow. Symmetric.
pub fn should_have_thin_space(r0: Option<char>, r1: Option<char>) -> bool {
    let (Some(r0), Some(r1)) = (r0, r1) else {
        return false;
    };

    if r0.is_whitespace() || r1.is_whitespace() {
        return false;
    }
    if is_punctuation(r0) || is_punctuation(r1) {
        return false;
    }

    is_wide(r0) != is_wide(r1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ascii_whitespace_is_the_html_set() {
        for c in ['\t', '\n', '\u{000C}', '\r', ' '] {
            assert!(is_ascii_whitespace(c), "{:?}", c);
        }
        // Unicode whitespace outside the HTML set does not count.
        for c in ['\u{000B}', '\u{00A0}', '\u{3000}', 'x'] {
            assert!(!is_ascii_whitespace(c), "{:?}", c);
        }
    }

    #[test]
    fn newline_edges() {
        assert!(has_newline_head(" \n bar"));
        assert!(has_newline_head("\nbar"));
        assert!(!has_newline_head(" bar"));
        assert!(!has_newline_head("bar \n"));
        assert!(has_newline_tail("bar \n "));
        assert!(!has_newline_tail("bar "));
        assert!(!has_newline_head(""));
        assert!(!has_newline_tail(""));
    }

    #[test]
    fn wide_classification() {
        assert!(is_wide('あ'));
        assert!(is_wide('漢'));
        assert!(is_wide('Ａ'));
        assert!(is_wide('。'));
        assert!(!is_wide('a'));
        assert!(!is_wide('ｱ')); // halfwidth katakana
        assert!(!is_wide(' '));
    }

    #[test]
    fn reserve_space_requires_two_narrow_sides() {
        assert!(should_reserve_space(Some('a'), Some('b')));
        assert!(!should_reserve_space(Some('あ'), Some('b')));
        assert!(!should_reserve_space(Some('a'), Some('い')));
        assert!(!should_reserve_space(Some('あ'), Some('い')));
        // A missing side counts as narrow.
        assert!(should_reserve_space(None, Some('b')));
        assert!(!should_reserve_space(None, Some('あ')));
        assert!(should_reserve_space(None, None));
    }

    #[test]
    fn reserve_space_between_texts_trims_newline_edges() {
        assert!(should_reserve_space_between_texts("foo ", " bar"));
        assert!(should_reserve_space_between_texts("foo \n ", " \n bar"));
        assert!(!should_reserve_space_between_texts("あ \n ", " \n bar"));
        assert!(!should_reserve_space_between_texts("foo \n ", " \n あ"));
        // Without a newline the edge keeps its space, which is narrow.
        assert!(should_reserve_space_between_texts("あ ", "bar"));
        assert!(!should_reserve_space_between_texts("", ""));
    }

    #[test]
    fn thin_space_rule() {
        assert!(should_have_thin_space(Some('o'), Some('あ')));
        assert!(should_have_thin_space(Some('あ'), Some('o')));
        assert!(!should_have_thin_space(Some('a'), Some('b')));
        assert!(!should_have_thin_space(Some('あ'), Some('い')));
        assert!(!should_have_thin_space(None, Some('あ')));
        assert!(!should_have_thin_space(Some('あ'), None));
        assert!(!should_have_thin_space(Some(' '), Some('あ')));
        assert!(!should_have_thin_space(Some('あ'), Some(' ')));
        // Punctuation on either side suppresses the marker.
        assert!(!should_have_thin_space(Some('。'), Some('a')));
        assert!(!should_have_thin_space(Some('あ'), Some('.')));
        assert!(!should_have_thin_space(Some('('), Some('あ')));
    }

    #[test]
    fn thin_space_rule_is_symmetric() {
        let sample = ['a', 'Z', '7', 'あ', '漢', 'Ａ', 'ん', 'é', 'ｱ'];
        for &r0 in &sample {
            for &r1 in &sample {
                assert_eq!(
                    should_have_thin_space(Some(r0), Some(r1)),
                    should_have_thin_space(Some(r1), Some(r0)),
                    "asymmetric for {:?} {:?}",
                    r0,
                    r1
                );
            }
        }
    }
}
