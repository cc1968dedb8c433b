use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Error returned when a `Forwarded` header line, or a single
/// element within it, could not be parsed.
///
/// The offending text is kept as-is, it is never unescaped.
pub struct ParseError {
    kind: ParseErrorKind,
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// The category of a [`ParseError`].
pub enum ParseErrorKind {
    /// A pair fragment contains no `=` sign.
    NoEqualSign,
    /// A pair key is not a valid token.
    InvalidToken,
    /// A pair value is neither a valid token nor a valid quoted-string.
    InvalidValue,
    /// No element was found where exactly one was expected.
    NoElement,
    /// More than one element was found where exactly one was expected.
    MultipleElements,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Return the [`ParseErrorKind`] of this error.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Return the text which caused this error.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl ParseErrorKind {
    /// Return the diagnostic message of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoEqualSign => r#"no "=" found in"#,
            Self::InvalidToken => "invalid token",
            Self::InvalidValue => "invalid value",
            Self::NoElement => "no element found in",
            Self::MultipleElements => "multiple elements found in",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "forwarded: {} {:?}", self.kind, self.text)
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Error returned by [`unescape`] for a value that is
/// neither a token nor a well-formed quoted-string.
///
/// [`unescape`]: crate::unescape
pub struct UnescapeError {
    kind: UnescapeErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// The reason an [`UnescapeError`] occurred.
pub enum UnescapeErrorKind {
    /// The value is not a token and does not start with a double quote.
    FirstDquoteMissing,
    /// The value does not end with a closing double quote.
    LastDquoteMissing,
    /// A double quote was found inside the value without being escaped.
    UnescapedDquote,
    /// The closing double quote is escaped by a trailing backslash.
    EscapedDquote,
    /// A control character (other than horizontal tab) was found.
    InvalidCharacter,
}

impl UnescapeError {
    pub(crate) const fn new(kind: UnescapeErrorKind) -> Self {
        Self { kind }
    }

    /// Return the [`UnescapeErrorKind`] of this error.
    #[must_use]
    pub fn kind(&self) -> UnescapeErrorKind {
        self.kind
    }
}

impl From<UnescapeErrorKind> for UnescapeError {
    fn from(kind: UnescapeErrorKind) -> Self {
        Self::new(kind)
    }
}

impl UnescapeErrorKind {
    /// Return the diagnostic message of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstDquoteMissing => "first DQUOTE missing",
            Self::LastDquoteMissing => "last DQUOTE missing",
            Self::UnescapedDquote => "unescaped DQUOTE found",
            Self::EscapedDquote => "escaped DQUOTE found",
            Self::InvalidCharacter => "invalid character found",
        }
    }
}

impl fmt::Display for UnescapeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UnescapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for UnescapeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        for (err, expected) in [
            (
                ParseError::new(ParseErrorKind::NoEqualSign, "foo"),
                r#"forwarded: no "=" found in "foo""#,
            ),
            (
                ParseError::new(ParseErrorKind::InvalidToken, "f o"),
                r#"forwarded: invalid token "f o""#,
            ),
            (
                ParseError::new(ParseErrorKind::InvalidValue, r#"""""#),
                r#"forwarded: invalid value "\"\"\"""#,
            ),
        ] {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_unescape_error_display() {
        assert_eq!(
            UnescapeError::new(UnescapeErrorKind::EscapedDquote).to_string(),
            "escaped DQUOTE found"
        );
        assert_eq!(
            UnescapeError::from(UnescapeErrorKind::FirstDquoteMissing).to_string(),
            "first DQUOTE missing"
        );
    }

    #[test]
    fn test_kind_as_str() {
        let kind = ParseErrorKind::MultipleElements;
        assert_eq!(kind.as_str(), "multiple elements found in");
        assert_eq!(kind.to_string(), kind.as_str());

        let kind = UnescapeErrorKind::InvalidCharacter;
        assert_eq!(kind.as_str(), "invalid character found");
        assert_eq!(kind.to_string(), kind.as_str());
    }
}
