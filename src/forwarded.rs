use std::fmt;

use crate::{element::Element, error::ParseError, parser::parse};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
/// Forwarding information stored as a chain.
///
/// The first element is added by the proxy closest to the client,
/// the last one by the most recent proxy.
///
/// Use [`parse`] or [`last`] when only part of the chain is needed,
/// parsing a [`Forwarded`] parses all of its elements.
///
/// [`last`]: crate::last
pub struct Forwarded {
    elements: Vec<Element>,
}

impl Forwarded {
    /// Create a new empty [`Forwarded`] chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the element closest to the client, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Element> {
        self.elements.first()
    }

    /// Return the element added by the most recent proxy, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }

    /// Append an element to the chain.
    pub fn push(&mut self, element: Element) -> &mut Self {
        self.elements.push(element);
        self
    }

    /// Iterate over the elements, starting from the one closest to the client.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Return the number of elements in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the chain has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl From<Element> for Forwarded {
    fn from(element: Element) -> Self {
        Self {
            elements: vec![element],
        }
    }
}

impl FromIterator<Element> for Forwarded {
    fn from_iter<T: IntoIterator<Item = Element>>(iter: T) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl Extend<Element> for Forwarded {
    fn extend<T: IntoIterator<Item = Element>>(&mut self, iter: T) {
        self.elements.extend(iter);
    }
}

impl IntoIterator for Forwarded {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Forwarded {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl fmt::Display for Forwarded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for element in &self.elements {
            write!(f, "{separator}{element}")?;
            separator = ", ";
        }
        Ok(())
    }
}

impl std::str::FromStr for Forwarded {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s, false).collect()
    }
}

impl TryFrom<&str> for Forwarded {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
