use std::fmt;

use crate::{
    error::{ParseError, ParseErrorKind},
    node::Node,
    quoted::{escape, is_token, unescape},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A single entry in a `Forwarded` header, added by one proxy.
///
/// A field is considered absent when it is empty.
pub struct Element {
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "by", skip_serializing_if = "Node::is_empty")
    )]
    by_node: Node,
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "for", skip_serializing_if = "Node::is_empty")
    )]
    for_node: Node,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "String::is_empty")
    )]
    proto: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "String::is_empty")
    )]
    host: String,

    // not expected, but if used these parameters (keys)
    // should be registered ideally also in
    // <https://www.iana.org/assignments/http-parameters/http-parameters.xhtml#forwarded>
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    extensions: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// An extension parameter of an [`Element`].
///
/// The key is kept in its original casing.
pub struct Parameter {
    key: String,
    value: String,
}

impl Parameter {
    /// Create a new [`Parameter`].
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Return the key of this [`Parameter`].
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Return the raw (unescaped) value of this [`Parameter`].
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

macro_rules! node_field {
    ($field:ident, $get:ident, $with:ident, $set:ident, $param:literal) => {
        #[doc = concat!("Get a reference to the \"", $param, "\" parameter if it is set.")]
        #[must_use]
        pub fn $get(&self) -> Option<&Node> {
            (!self.$field.is_empty()).then_some(&self.$field)
        }

        #[doc = concat!("Set the \"", $param, "\" parameter, an empty node unsets it.")]
        #[must_use]
        pub fn $with(mut self, node: impl Into<Node>) -> Self {
            self.$field = node.into();
            self
        }

        #[doc = concat!("Set the \"", $param, "\" parameter, an empty node unsets it.")]
        pub fn $set(&mut self, node: impl Into<Node>) -> &mut Self {
            self.$field = node.into();
            self
        }
    };
}

macro_rules! str_field {
    ($field:ident, $with:ident, $set:ident, $param:literal) => {
        #[doc = concat!("Get the \"", $param, "\" parameter if it is set.")]
        #[must_use]
        pub fn $field(&self) -> Option<&str> {
            (!self.$field.is_empty()).then_some(self.$field.as_str())
        }

        #[doc = concat!("Set the \"", $param, "\" parameter, an empty value unsets it.")]
        #[must_use]
        pub fn $with(mut self, value: impl Into<String>) -> Self {
            self.$field = value.into();
            self
        }

        #[doc = concat!("Set the \"", $param, "\" parameter, an empty value unsets it.")]
        pub fn $set(&mut self, value: impl Into<String>) -> &mut Self {
            self.$field = value.into();
            self
        }
    };
}

impl Element {
    /// Create a new empty [`Element`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    node_field!(by_node, by_node, with_by, set_by, "by");
    node_field!(for_node, for_node, with_for, set_for, "for");
    str_field!(proto, with_proto, set_proto, "proto");
    str_field!(host, with_host, set_host, "host");

    /// Get the extension parameters, in the order they were added.
    #[must_use]
    pub fn extensions(&self) -> &[Parameter] {
        &self.extensions
    }

    /// Add an extension parameter.
    ///
    /// The key is expected to be a valid token other
    /// than one of the well-known parameter names.
    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_extension(key, value);
        self
    }

    /// Add an extension parameter.
    ///
    /// The key is expected to be a valid token other
    /// than one of the well-known parameter names.
    pub fn push_extension(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.extensions.push(Parameter::new(key, value));
        self
    }

    /// Returns true if no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
            && self.for_node.is_empty()
            && self.proto.is_empty()
            && self.host.is_empty()
            && self.extensions.is_empty()
    }

    /// Parse a single `key=value` pair into this element.
    ///
    /// Well-known keys overwrite any previous value,
    /// other keys are appended as extension.
    pub(crate) fn parse_pair(&mut self, pair: &str) -> Result<(), ParseError> {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(ParseError::new(ParseErrorKind::NoEqualSign, pair));
        };

        if !is_token(key) {
            return Err(ParseError::new(ParseErrorKind::InvalidToken, key));
        }

        let value = match unescape(value) {
            Ok(value) => value.into_owned(),
            Err(err) => {
                tracing::trace!("forwarded: invalid value for key '{key}': {err}");
                return Err(ParseError::new(ParseErrorKind::InvalidValue, value));
            }
        };

        if key.eq_ignore_ascii_case("by") {
            self.by_node = value.into();
        } else if key.eq_ignore_ascii_case("for") {
            self.for_node = value.into();
        } else if key.eq_ignore_ascii_case("proto") {
            self.proto = value;
        } else if key.eq_ignore_ascii_case("host") {
            self.host = value;
        } else {
            self.extensions.push(Parameter {
                key: key.to_owned(),
                value,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";

        if !self.by_node.is_empty() {
            write!(f, "by={}", escape(self.by_node.as_str()))?;
            separator = ";";
        }

        if !self.for_node.is_empty() {
            write!(f, "{separator}for={}", escape(self.for_node.as_str()))?;
            separator = ";";
        }

        if !self.proto.is_empty() {
            write!(f, "{separator}proto={}", escape(&self.proto))?;
            separator = ";";
        }

        if !self.host.is_empty() {
            write!(f, "{separator}host={}", escape(&self.host))?;
            separator = ";";
        }

        for param in &self.extensions {
            write!(f, "{separator}{}={}", param.key, escape(&param.value))?;
            separator = ";";
        }

        Ok(())
    }
}

impl std::str::FromStr for Element {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_single_element(s)
    }
}

impl TryFrom<&str> for Element {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        crate::parser::parse_single_element(s)
    }
}

impl TryFrom<String> for Element {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        crate::parser::parse_single_element(&s)
    }
}
