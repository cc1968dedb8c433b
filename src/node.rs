use std::{
    borrow::Cow,
    fmt,
    net::{IpAddr, SocketAddr},
};

const UNKNOWN_STR: &str = "unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
/// Node Identifier
///
/// The node identifier is one of the following:
///
/// - The client's IP address, with an optional port number
/// - A token indicating that the IP address of the client is not known
///   to the proxy server (unknown)
/// - A generated token, allowing for tracing and debugging, while
///   allowing the internal structure or sensitive information to be
///   hidden
///
/// The value is kept as the raw (unescaped) string, it is only
/// interpreted on demand, see [`Node::addr_port`].
///
/// As specified in proposal section:
/// <https://datatracker.ietf.org/doc/html/rfc7239#section-6>
pub struct Node(Cow<'static, str>);

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
/// The port of a [`Node`], either numeric or obfuscated.
///
/// An empty port means that no port was present.
pub struct NodePort(Cow<'static, str>);

impl Node {
    /// Creates a [`Node`] from a static string.
    #[must_use]
    pub const fn from_static(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }

    /// Gets the [`Node`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this [`Node`] is empty, which is the
    /// same as it being absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if this [`Node`] is a generated token.
    #[must_use]
    pub fn is_obfuscated(&self) -> bool {
        self.0.starts_with('_')
    }

    /// Returns true if this [`Node`] is the `unknown` token.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_STR
    }

    /// Attempts to interpret this [`Node`] as an ip address with an optional port.
    ///
    /// Either half may fail to decode, the returned flag is true
    /// when the address parsed or a (non-empty) port was found.
    #[must_use]
    pub fn addr_port(&self) -> (Option<IpAddr>, NodePort, bool) {
        let s = self.as_str();
        let (host, port) = split_host_port(s).unwrap_or_else(|| {
            let host = s
                .strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
                .unwrap_or(s);
            (host, "")
        });

        let addr = host.parse::<IpAddr>().ok();
        let port = NodePort::from(port.to_owned());
        let ok = addr.is_some() || port.is_valid();
        (addr, port, ok)
    }
}

impl NodePort {
    /// Creates a [`NodePort`] from a static string.
    #[must_use]
    pub const fn from_static(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }

    /// Gets the [`NodePort`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if a port is present.
    ///
    /// A present port is not necessarily numeric.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }

    /// Returns true if the port is obfuscated.
    #[must_use]
    pub fn is_obfuscated(&self) -> bool {
        self.0.starts_with('_')
    }

    /// Attempts to parse the port as a decimal `u16`.
    #[must_use]
    pub fn as_u16(&self) -> Option<u16> {
        // u16::from_str also accepts a leading '+'
        if !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok()
    }
}

/// Splits `s` into host and port at the last colon outside of brackets,
/// an IPv6 host must be enclosed by brackets.
///
/// Returns `None` when `s` is not of the form `host:port`.
fn split_host_port(s: &str) -> Option<(&str, &str)> {
    let colon = s.rfind(':')?;

    let (host, host_start, host_end) = if s.starts_with('[') {
        let end = s.find(']')?;
        if end + 1 != colon {
            return None;
        }
        (&s[1..end], 1, end + 1)
    } else {
        let host = &s[..colon];
        if host.contains(':') {
            return None;
        }
        (host, 0, 0)
    };

    if s[host_start..].contains('[') || s[host_end..].contains(']') {
        return None;
    }

    Some((host, &s[colon + 1..]))
}

impl From<String> for Node {
    #[inline]
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

impl From<&str> for Node {
    #[inline]
    fn from(s: &str) -> Self {
        Self(Cow::Owned(s.to_owned()))
    }
}

impl From<IpAddr> for Node {
    #[inline]
    fn from(ip: IpAddr) -> Self {
        Self(Cow::Owned(ip.to_string()))
    }
}

impl From<SocketAddr> for Node {
    #[inline]
    fn from(addr: SocketAddr) -> Self {
        Self(Cow::Owned(addr.to_string()))
    }
}

impl From<String> for NodePort {
    #[inline]
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

impl From<&str> for NodePort {
    #[inline]
    fn from(s: &str) -> Self {
        Self(Cow::Owned(s.to_owned()))
    }
}

impl From<u16> for NodePort {
    #[inline]
    fn from(port: u16) -> Self {
        Self(Cow::Owned(port.to_string()))
    }
}

impl AsRef<str> for Node {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for NodePort {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Node {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Node {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<str> for NodePort {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for NodePort {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for NodePort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
