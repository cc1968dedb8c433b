//! Token and quoted-string handling for `Forwarded` pair values.
//!
//! Grammar: <https://datatracker.ietf.org/doc/html/rfc7230#section-3.2.6>
//! as referenced by <https://datatracker.ietf.org/doc/html/rfc7239#section-4>.

use std::borrow::Cow;

use crate::error::{UnescapeError, UnescapeErrorKind};

/// Returns true for the control characters `0x00..=0x1F` and `0x7F`.
#[inline]
#[must_use]
pub const fn is_ctl(c: u8) -> bool {
    c <= 0x1f || c == 0x7f
}

/// Returns true for linear white space (horizontal tab or space).
#[inline]
#[must_use]
pub const fn is_lws(c: u8) -> bool {
    c == b'\t' || c == b' '
}

/// Returns true if `c` can be part of a token.
#[inline]
#[must_use]
pub const fn is_token_char(c: u8) -> bool {
    TOKEN_CHARS[c as usize]
}

/// Returns true if `s` is a non-empty token.
#[must_use]
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_token_char)
}

const fn is_delimiter(c: u8) -> bool {
    matches!(
        c,
        b'"' | b'('
            | b')'
            | b','
            | b'/'
            | b':'
            | b';'
            | b'<'
            | b'='
            | b'>'
            | b'?'
            | b'@'
            | b'['
            | b'\\'
            | b']'
            | b'{'
            | b'}'
    )
}

// tchar: any VCHAR, except delimiters
const TOKEN_CHARS: [bool; 256] = {
    let mut table = [false; 256];
    let mut c = 0x21;
    while c < 0x7f {
        table[c] = !is_delimiter(c as u8);
        c += 1;
    }
    table
};

/// Returns `raw` as a token, or as a quoted-string when it
/// contains a delimiter character.
///
/// Only `"` and `\` are escaped, all other bytes are copied as-is.
/// The result is not validated, e.g. an empty string stays empty
/// even though it isn't a valid token.
#[must_use]
pub fn escape(raw: &str) -> Cow<'_, str> {
    if !raw.bytes().any(is_delimiter) {
        return Cow::Borrowed(raw);
    }

    let mut buf = String::with_capacity(3 * raw.len() / 2 + 2);
    buf.push('"');
    for c in raw.chars() {
        if matches!(c, '"' | '\\') {
            buf.push('\\');
        }
        buf.push(c);
    }
    buf.push('"');

    Cow::Owned(buf)
}

/// Turns a token or quoted-string `field` back into its raw value.
///
/// Tokens are returned unchanged. Quoted-strings are unquoted and,
/// where needed, unescaped. A backslash is accepted in front of any
/// allowed character, not only `"` and `\`.
pub fn unescape(field: &str) -> Result<Cow<'_, str>, UnescapeError> {
    if is_token(field) {
        return Ok(Cow::Borrowed(field));
    }

    let Some(quoted) = field.strip_prefix('"') else {
        return Err(UnescapeErrorKind::FirstDquoteMissing.into());
    };

    if quoted.contains('\\') {
        unescape_escaped(field).map(Cow::Owned)
    } else {
        unquote(quoted).map(Cow::Borrowed)
    }
}

/// Strips the closing quote of a quoted-string without escapes,
/// `quoted` being the field minus its opening quote.
fn unquote(quoted: &str) -> Result<&str, UnescapeError> {
    let interior = quoted
        .strip_suffix('"')
        .ok_or(UnescapeError::new(UnescapeErrorKind::LastDquoteMissing))?;

    for c in interior.bytes() {
        if c == b'"' {
            return Err(UnescapeErrorKind::UnescapedDquote.into());
        }
        if is_ctl(c) && !is_lws(c) {
            return Err(UnescapeErrorKind::InvalidCharacter.into());
        }
    }

    Ok(interior)
}

/// Full scan of a quoted-string, `field` including its opening quote.
fn unescape_escaped(field: &str) -> Result<String, UnescapeError> {
    let last_len = field.chars().next_back().map_or(0, char::len_utf8);
    // the interior is scanned before the closing quote is verified
    let interior = field.get(1..field.len() - last_len).unwrap_or_default();

    let mut buf = String::with_capacity(interior.len());
    let mut escaped = false;
    for c in interior.chars() {
        match c {
            '"' if !escaped => return Err(UnescapeErrorKind::UnescapedDquote.into()),
            '\\' if !escaped => escaped = true,
            '\t' | ' '..='~' | '\u{80}'.. => {
                buf.push(c);
                escaped = false;
            }
            _ => return Err(UnescapeErrorKind::InvalidCharacter.into()),
        }
    }

    if !field.ends_with('"') {
        return Err(UnescapeErrorKind::LastDquoteMissing.into());
    }
    if escaped {
        return Err(UnescapeErrorKind::EscapedDquote.into());
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    const DELIMITERS: &str = r#""(),/:;<=>?@[\]{}"#;

    #[test]
    fn test_classifier() {
        for c in 0x00..=0x1f {
            assert!(is_ctl(c), "ctl: {c:#x}");
            assert!(!is_token_char(c), "token char: {c:#x}");
        }
        assert!(is_ctl(0x7f));
        assert!(!is_ctl(b' '));
        assert!(!is_ctl(0x80));

        assert!(is_lws(b'\t'));
        assert!(is_lws(b' '));
        assert!(!is_lws(b'\n'));

        for c in DELIMITERS.bytes().chain([b' ', 0x7f, 0x80, 0xff]) {
            assert!(!is_token_char(c), "token char: {c:#x}");
        }
        for c in "!#$%&'*+-.^_`|~09azAZ".bytes() {
            assert!(is_token_char(c), "not a token char: {c:#x}");
        }
    }

    #[test]
    fn test_is_token() {
        for s in ["by", "for", "proto", "host", "_gazonk", "192.0.2.43", "unknown"] {
            assert!(is_token(s), "{s}");
        }
        for s in ["", "résumé", "a b", "192.0.2.43:47011", "[::1]", "\"x\""] {
            assert!(!is_token(s), "{s}");
        }
    }

    #[test]
    fn test_escape() {
        for (input, expected) in [
            ("_gazonk", "_gazonk"),
            ("192.0.2.43", "192.0.2.43"),
            ("192.0.2.43:47011", r#""192.0.2.43:47011""#),
            ("[2001:db8:cafe::17]", r#""[2001:db8:cafe::17]""#),
            ("[2001:db8:cafe::17]:47011", r#""[2001:db8:cafe::17]:47011""#),
            ("unknown", "unknown"),
            ("", ""),
            (r#"""#, r#""\"""#),
            (r"a\b", r#""a\\b""#),
            ("é:1", "\"é:1\""),
        ] {
            assert_eq!(escape(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_escape_borrows_tokens() {
        assert!(matches!(escape("_gazonk"), Cow::Borrowed("_gazonk")));
        assert!(matches!(escape("a:b"), Cow::Owned(_)));
    }

    #[test]
    fn test_unescape_ok() {
        for (input, expected) in [
            // token
            ("192.0.2.43", "192.0.2.43"),
            ("unknown", "unknown"),
            // unquote
            (r#""_gazonk""#, "_gazonk"),
            (r#""192.0.2.43:47011""#, "192.0.2.43:47011"),
            (r#""[2001:db8:cafe::17]""#, "[2001:db8:cafe::17]"),
            (r#""[2001:db8:cafe::17]:47011""#, "[2001:db8:cafe::17]:47011"),
            (r#""""#, ""),
            ("\"a\tb c\"", "a\tb c"),
            ("\"résumé\"", "résumé"),
            // unescape
            (r#""\"""#, r#"""#),
            (r#""\"unknown""#, r#""unknown"#),
            (r#""a\\b""#, r"a\b"),
            (r#""\a\b\c""#, "abc"),
            ("\"\\é\"", "é"),
            ("\"a\\\tb\"", "a\tb"),
        ] {
            match unescape(input) {
                Ok(value) => assert_eq!(value, expected, "input: {input:?}"),
                Err(err) => panic!("failed to unescape {input:?}: {err}"),
            }
        }
    }

    #[test]
    fn test_unescape_err() {
        for (input, expected) in [
            ("", UnescapeErrorKind::FirstDquoteMissing),
            ("a b", UnescapeErrorKind::FirstDquoteMissing),
            ("192.0.2.43:80", UnescapeErrorKind::FirstDquoteMissing),
            // unquote
            (r#"""""#, UnescapeErrorKind::UnescapedDquote),
            ("\"\x00\"", UnescapeErrorKind::InvalidCharacter),
            ("\"\x7f\"", UnescapeErrorKind::InvalidCharacter),
            (r#"""#, UnescapeErrorKind::LastDquoteMissing),
            (r#""u"#, UnescapeErrorKind::LastDquoteMissing),
            // unescape
            (r#"""\""#, UnescapeErrorKind::UnescapedDquote),
            ("\"\x00\\\"", UnescapeErrorKind::InvalidCharacter),
            ("\"\\\n\"", UnescapeErrorKind::InvalidCharacter),
            ("\"a\\\x7f\"", UnescapeErrorKind::InvalidCharacter),
            ("\"\\a\x7f\"", UnescapeErrorKind::InvalidCharacter),
            (r#""\"#, UnescapeErrorKind::LastDquoteMissing),
            ("\"\\é", UnescapeErrorKind::LastDquoteMissing),
            (r#""\""#, UnescapeErrorKind::EscapedDquote),
            (r#""a\\\""#, UnescapeErrorKind::EscapedDquote),
        ] {
            match unescape(input) {
                Ok(value) => panic!("unexpected unescape success for {input:?}: {value:?}"),
                Err(err) => assert_eq!(err.kind(), expected, "input: {input:?}"),
            }
        }
    }

    fn has_disallowed_ctl(s: &str) -> bool {
        s.bytes().any(|c| is_ctl(c) && c != b'\t')
    }

    #[quickcheck]
    fn prop_escape_unescape_round_trip(s: String) -> TestResult {
        if has_disallowed_ctl(&s) {
            return TestResult::discard();
        }
        // force the quoted-string form
        let raw = format!("[{s}]");
        TestResult::from_bool(unescape(&escape(&raw)).ok().as_deref() == Some(raw.as_str()))
    }

    #[quickcheck]
    fn prop_tokens_are_idempotent(s: String) -> TestResult {
        if !is_token(&s) {
            return TestResult::discard();
        }
        TestResult::from_bool(
            escape(&s) == s.as_str() && unescape(&s).ok().as_deref() == Some(s.as_str()),
        )
    }

    #[quickcheck]
    fn prop_quotes_only_when_needed(s: String) -> bool {
        let escaped = escape(&s);
        let quoted = escaped.len() >= 2 && escaped.starts_with('"') && escaped.ends_with('"');
        quoted == s.contains(|c| DELIMITERS.contains(c))
    }

    #[quickcheck]
    fn prop_unescape_paths_agree(s: String) -> TestResult {
        if s.contains('\\') {
            return TestResult::discard();
        }
        let field = format!("\"{s}\"");
        let quoted = &field[1..];
        TestResult::from_bool(
            unquote(quoted).map(str::to_owned) == unescape_escaped(&field),
        )
    }
}
