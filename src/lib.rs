//! Parser and serializer for the "Forwarded HTTP Extension".
//!
//! RFC: <https://datatracker.ietf.org/doc/html/rfc7239>
//!
//! A `Forwarded` header value is a comma-separated list of elements,
//! each element a semicolon-separated list of `key=value` pairs, where a
//! value is either a token or a quoted-string:
//!
//! ```text
//! Forwarded: for=192.0.2.43, for="[2001:db8:cafe::17]:4711";proto=https;by=_hidden
//! ```
//!
//! Elements are parsed lazily and can be iterated in reverse,
//! which makes it cheap to only look at the element added by the
//! most recent proxy:
//!
//! ```
//! use forwarded_header::last;
//!
//! let element = last(r#"for=192.0.2.43, for="[2001:db8:cafe::17]:4711";proto=https"#)
//!     .unwrap()
//!     .unwrap();
//!
//! let node = element.for_node().unwrap();
//! let (addr, port, ok) = node.addr_port();
//! assert!(ok);
//! assert_eq!(addr, Some("2001:db8:cafe::17".parse().unwrap()));
//! assert_eq!(port.as_u16(), Some(4711));
//! assert_eq!(element.proto(), Some("https"));
//! ```
//!
//! Serializing goes through the [`Display`] implementation of [`Element`],
//! values are quoted only when needed:
//!
//! ```
//! use forwarded_header::Element;
//!
//! let element = Element::new()
//!     .with_for("192.0.2.43:47011")
//!     .with_proto("http");
//! assert_eq!(element.to_string(), r#"for="192.0.2.43:47011";proto=http"#);
//! ```
//!
//! # Features
//!
//! - `http`: read the header from `http` crate requests, responses and header maps,
//!   see [`ForwardedSource`];
//! - `serde`: (de)serialize the element types.
//!
//! [`Display`]: std::fmt::Display

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

mod element;
#[doc(inline)]
pub use element::{Element, Parameter};

mod error;
#[doc(inline)]
pub use error::{ParseError, ParseErrorKind, UnescapeError, UnescapeErrorKind};

mod forwarded;
#[doc(inline)]
pub use forwarded::Forwarded;

mod node;
#[doc(inline)]
pub use node::{Node, NodePort};

mod parser;
#[doc(inline)]
pub use parser::{Elements, last, parse};

mod quoted;
#[doc(inline)]
pub use quoted::{escape, is_ctl, is_lws, is_token, is_token_char, unescape};

mod source;
#[doc(inline)]
pub use source::{FORWARDED, ForwardedSource, last_from, parse_from};
