use std::iter::FusedIterator;

use crate::{
    element::Element,
    error::{ParseError, ParseErrorKind},
};

/// Parse the elements of a `Forwarded` header `line`.
///
/// Elements are parsed lazily, one per call to [`Iterator::next`],
/// starting from the first element, or from the last one if
/// `reverse` is true.
///
/// Elements are split on every `,` and pairs on every `;`,
/// these delimiters are not recognised as part of a quoted-string.
///
/// The iterator stops after the first error.
pub fn parse(line: &str, reverse: bool) -> Elements<'_> {
    Elements::new(line, reverse)
}

/// Return the last element of a `Forwarded` header `line`,
/// which is the one added by the most recent proxy.
///
/// None of the other elements are parsed.
pub fn last(line: &str) -> Result<Option<Element>, ParseError> {
    parse(line, true).next().transpose()
}

#[derive(Debug, Clone)]
/// Lazy iterator over the elements of a `Forwarded` header line,
/// created by [`parse`].
///
/// [`Iterator::next`] yields elements in the direction picked at creation,
/// [`DoubleEndedIterator::next_back`] yields them in the opposite one.
pub struct Elements<'a> {
    remaining: Option<&'a str>,
    reverse: bool,
}

impl<'a> Elements<'a> {
    fn new(line: &'a str, reverse: bool) -> Self {
        let remaining = (!trim_ows(line).is_empty()).then_some(line);
        Self { remaining, reverse }
    }

    fn next_front(&mut self) -> Option<Result<Element, ParseError>> {
        let line = self.remaining?;
        let segment = match line.split_once(',') {
            Some((segment, rest)) => {
                self.remaining = Some(rest);
                segment
            }
            None => {
                self.remaining = None;
                line
            }
        };
        Some(self.parse_segment(segment))
    }

    fn next_back_segment(&mut self) -> Option<Result<Element, ParseError>> {
        let line = self.remaining?;
        let segment = match line.rsplit_once(',') {
            Some((rest, segment)) => {
                self.remaining = Some(rest);
                segment
            }
            None => {
                self.remaining = None;
                line
            }
        };
        Some(self.parse_segment(segment))
    }

    fn parse_segment(&mut self, segment: &str) -> Result<Element, ParseError> {
        let result = parse_element(segment);
        if let Err(err) = &result {
            tracing::trace!("forwarded: stop parsing elements: {err}");
            self.remaining = None;
        }
        result
    }

    /// Returns true if no further elements can be yielded.
    pub(crate) fn is_exhausted(&self) -> bool {
        self.remaining.is_none()
    }
}

impl Iterator for Elements<'_> {
    type Item = Result<Element, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.reverse {
            self.next_back_segment()
        } else {
            self.next_front()
        }
    }
}

impl DoubleEndedIterator for Elements<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.reverse {
            self.next_front()
        } else {
            self.next_back_segment()
        }
    }
}

impl FusedIterator for Elements<'_> {}

fn parse_element(segment: &str) -> Result<Element, ParseError> {
    let mut element = Element::new();
    for pair in segment.split(';') {
        element.parse_pair(trim_ows(pair))?;
    }
    Ok(element)
}

pub(crate) fn parse_single_element(line: &str) -> Result<Element, ParseError> {
    let mut elements = parse(line, false);
    let element = elements
        .next()
        .ok_or_else(|| ParseError::new(ParseErrorKind::NoElement, line))??;
    if !elements.is_exhausted() {
        return Err(ParseError::new(ParseErrorKind::MultipleElements, line));
    }
    Ok(element)
}

fn trim_ows(s: &str) -> &str {
    s.trim_matches([' ', '\t'])
}
