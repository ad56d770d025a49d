//! Invocation target model and URL codec.
//!
//! # Responsibility
//! - Validate scheme names before any host environment call.
//! - Serialize targets into `<scheme>://[authority][/path][?query]` strings.
//! - Parse incoming invocation strings back into targets.
//!
//! # Invariants
//! - `scheme` is non-empty and matches `[a-z][a-z0-9+.-]*`.
//! - Outgoing path segment, authority and query items are serialized
//!   verbatim; nothing is percent-encoded on the sending side.
//! - Incoming path segment and query items are percent-decoded by `parse`.
//! - Query keys serialize in sorted order; insertion order is irrelevant.

use crate::error::{HandshakeError, HandshakeResult};
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::collections::BTreeMap;

static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9+.\-]*$").expect("valid scheme regex"));
static PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9\-._~!$&'()*+,;=:@/]|%[0-9A-Fa-f]{2})*$").expect("valid path regex")
});
static AUTHORITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9\-._~!$&'()*+,;=]|%[0-9A-Fa-f]{2})*$")
        .expect("valid authority regex")
});
static QUERY_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9\-._~!$'()*+,;:@/?]|%[0-9A-Fa-f]{2})*$")
        .expect("valid query key regex")
});
// Values may hold `=`: a pair splits on its first `=` only.
static QUERY_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9\-._~!$'()*+,;=:@/?]|%[0-9A-Fa-f]{2})*$")
        .expect("valid query value regex")
});

const SCHEME_SEPARATOR: &str = "://";

/// Returns whether `scheme` is a syntactically valid invocation scheme.
pub fn is_valid_scheme(scheme: &str) -> bool {
    SCHEME_RE.is_match(scheme)
}

/// Validates one scheme string.
///
/// # Errors
/// - `HandshakeError::InvalidScheme` for empty names, names containing
///   `://`, whitespace, uppercase letters or any other non-scheme character.
pub fn validate_scheme(scheme: &str) -> HandshakeResult<()> {
    if is_valid_scheme(scheme) {
        Ok(())
    } else {
        Err(HandshakeError::InvalidScheme(scheme.to_string()))
    }
}

/// Splits a query component into a key/value mapping.
///
/// Empty pairs are skipped, a pair without `=` maps to an empty value and
/// duplicate keys resolve to the last occurrence.
///
/// Items are returned as written; `InvocationTarget::parse` decodes them.
pub fn parse_query(component: &str) -> BTreeMap<String, String> {
    query_pairs(component)
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn query_pairs(component: &str) -> impl Iterator<Item = (&str, &str)> {
    component
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}

fn decode_component(value: &str, label: &str) -> HandshakeResult<String> {
    percent_decode_str(value)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|err| {
            HandshakeError::InvalidTarget(format!(
                "{label} is not valid percent-encoded UTF-8: {err}"
            ))
        })
}

/// Parsed cross-process launch request.
///
/// Built fresh per invocation and discarded after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationTarget {
    scheme: String,
    /// Fixed-literal token of the `scheme://<token>` shape. Carries no payload.
    authority: Option<String>,
    path_segment: String,
    query_parameters: BTreeMap<String, String>,
}

impl InvocationTarget {
    /// Creates a bare `scheme://` target.
    pub fn new(scheme: impl Into<String>) -> HandshakeResult<Self> {
        let scheme = scheme.into();
        validate_scheme(&scheme)?;
        Ok(Self {
            scheme,
            authority: None,
            path_segment: String::new(),
            query_parameters: BTreeMap::new(),
        })
    }

    pub fn with_path_segment(mut self, path_segment: impl Into<String>) -> Self {
        self.path_segment = path_segment.into();
        self
    }

    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        let authority = authority.into();
        self.authority = (!authority.is_empty()).then_some(authority);
        self
    }

    pub fn with_query_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.query_parameters.insert(key.into(), value.into());
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    /// Path without its leading `/`; empty when the target has no path.
    pub fn path_segment(&self) -> &str {
        &self.path_segment
    }

    pub fn query_parameters(&self) -> &BTreeMap<String, String> {
        &self.query_parameters
    }

    /// Parses one incoming invocation string.
    ///
    /// Accepted shapes include `scheme://`, `scheme:///<id>` and
    /// `scheme://<token>`. A fragment, if present, is discarded. The path
    /// segment and every query key and value are percent-decoded; the
    /// authority token is kept as written.
    ///
    /// # Errors
    /// - `InvalidTarget` when the `://` separator is missing, a component
    ///   contains characters outside its URL character set, or a decoded
    ///   component is not valid UTF-8.
    /// - `InvalidScheme` when the scheme part is malformed.
    pub fn parse(url: &str) -> HandshakeResult<Self> {
        let (scheme, rest) = url.split_once(SCHEME_SEPARATOR).ok_or_else(|| {
            HandshakeError::InvalidTarget(format!("missing `{SCHEME_SEPARATOR}` in `{url}`"))
        })?;
        let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
        let (hierarchy, query) = match rest.split_once('?') {
            Some((hierarchy, query)) => (hierarchy, Some(query)),
            None => (rest, None),
        };
        let (authority, path) = match hierarchy.split_once('/') {
            Some((authority, path)) => (authority, path),
            None => (hierarchy, ""),
        };

        check_component(authority, &AUTHORITY_RE, "authority")?;
        check_component(path, &PATH_RE, "path")?;
        let path = decode_component(path, "path")?;

        let mut target = Self::new(scheme)?
            .with_authority(authority)
            .with_path_segment(path);
        for (key, value) in query.into_iter().flat_map(query_pairs) {
            let key = decode_component(key, "query key")?;
            let value = decode_component(value, "query value")?;
            target.query_parameters.insert(key, value);
        }
        Ok(target)
    }

    /// Serializes this target into an invocation string.
    ///
    /// # Errors
    /// - `InvalidTarget` when the path segment, authority or a query item
    ///   would break URL construction (whitespace, `?`, `#`, a stray `%`,
    ///   non-ASCII text, ...), or a query key is empty.
    pub fn to_url(&self) -> HandshakeResult<String> {
        validate_scheme(&self.scheme)?;
        let mut url = format!("{}{SCHEME_SEPARATOR}", self.scheme);

        if let Some(authority) = &self.authority {
            check_component(authority, &AUTHORITY_RE, "authority")?;
            url.push_str(authority);
        }
        if !self.path_segment.is_empty() {
            check_component(&self.path_segment, &PATH_RE, "path segment")?;
            url.push('/');
            url.push_str(&self.path_segment);
        }
        if !self.query_parameters.is_empty() {
            let mut pairs = Vec::with_capacity(self.query_parameters.len());
            for (key, value) in &self.query_parameters {
                if key.is_empty() {
                    return Err(HandshakeError::InvalidTarget(
                        "query key must not be empty".to_string(),
                    ));
                }
                check_component(key, &QUERY_KEY_RE, "query key")?;
                check_component(value, &QUERY_VALUE_RE, "query value")?;
                pairs.push(format!("{key}={value}"));
            }
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        Ok(url)
    }
}

fn check_component(value: &str, pattern: &Regex, label: &str) -> HandshakeResult<()> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(HandshakeError::InvalidTarget(format!(
            "{label} contains characters outside the URL character set: `{value}`"
        )))
    }
}
