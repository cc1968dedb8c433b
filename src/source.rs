use crate::{
    element::Element,
    error::ParseError,
    parser::{Elements, last, parse},
};

/// Name of the `Forwarded` HTTP header.
pub const FORWARDED: &str = "Forwarded";

/// A source of a `Forwarded` header value,
/// such as the headers of an http request.
pub trait ForwardedSource {
    /// Return the raw `Forwarded` header value, if present.
    fn forwarded_header_value(&self) -> Option<&str>;
}

impl ForwardedSource for str {
    #[inline(always)]
    fn forwarded_header_value(&self) -> Option<&str> {
        Some(self)
    }
}

impl ForwardedSource for String {
    #[inline(always)]
    fn forwarded_header_value(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: ForwardedSource + ?Sized> ForwardedSource for &T {
    #[inline(always)]
    fn forwarded_header_value(&self) -> Option<&str> {
        (**self).forwarded_header_value()
    }
}

#[cfg(feature = "http")]
impl ForwardedSource for http::HeaderMap {
    fn forwarded_header_value(&self) -> Option<&str> {
        let Some(value) = self.get(http::header::FORWARDED) else {
            tracing::trace!("forwarded: no {FORWARDED} header found");
            return None;
        };
        match std::str::from_utf8(value.as_bytes()) {
            Ok(s) => Some(s),
            Err(err) => {
                tracing::trace!("forwarded: ignore non utf-8 {FORWARDED} header: {err}");
                None
            }
        }
    }
}

#[cfg(feature = "http")]
impl<B> ForwardedSource for http::Request<B> {
    #[inline(always)]
    fn forwarded_header_value(&self) -> Option<&str> {
        self.headers().forwarded_header_value()
    }
}

#[cfg(feature = "http")]
impl<B> ForwardedSource for http::Response<B> {
    #[inline(always)]
    fn forwarded_header_value(&self) -> Option<&str> {
        self.headers().forwarded_header_value()
    }
}

/// Parse the elements of the `Forwarded` header provided by `source`,
/// in reverse if `reverse` is true.
///
/// A missing header results in no elements. See [`parse`] for more information.
pub fn parse_from<S>(source: &S, reverse: bool) -> Elements<'_>
where
    S: ForwardedSource + ?Sized,
{
    parse(source.forwarded_header_value().unwrap_or_default(), reverse)
}

/// Return the last element of the `Forwarded` header provided by `source`.
///
/// See [`last`] for more information.
pub fn last_from<S>(source: &S) -> Result<Option<Element>, ParseError>
where
    S: ForwardedSource + ?Sized,
{
    last(source.forwarded_header_value().unwrap_or_default())
}
