//! Query-string parsing against the page location.

#[cfg(test)]
#[path = "url_params_test.rs"]
mod url_params_test;

use std::collections::HashMap;

use url::Url;

use crate::error::{Error, Result};

/// Source of the current page URL (`window.location.href`).
pub trait Location {
    /// # Errors
    ///
    /// Returns an environment error when the location cannot be read.
    fn href(&self) -> Result<String>;
}

/// A location fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticLocation(pub String);

impl StaticLocation {
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }
}

impl Location for StaticLocation {
    fn href(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Query parameters of `url`, or of the current location when `url` is
/// `None` or empty.
///
/// Relative URLs resolve against the location. Pairs split on the first `=`;
/// a bare key maps to `""`. Later duplicates overwrite earlier ones.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] when the URL cannot be parsed and
/// [`Error::MalformedEncoding`] for a bad percent sequence.
pub fn parse_url_params(url: Option<&str>, location: &dyn Location) -> Result<HashMap<String, String>> {
    let target = match url.filter(|raw| !raw.is_empty()) {
        Some(raw) => match Url::parse(raw) {
            Ok(parsed) => parsed,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                current(location)?.join(raw).map_err(|source| invalid_url(raw, source))?
            }
            Err(source) => return Err(invalid_url(raw, source)),
        },
        None => current(location)?,
    };

    let mut params = HashMap::new();
    let Some(query) = target.query() else {
        return Ok(params);
    };
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(decode_uri_component(key)?, decode_uri_component(value)?);
    }
    Ok(params)
}

fn current(location: &dyn Location) -> Result<Url> {
    let href = location.href()?;
    Url::parse(&href).map_err(|source| invalid_url(&href, source))
}

fn invalid_url(url: &str, source: url::ParseError) -> Error {
    Error::InvalidUrl { url: url.to_owned(), source }
}

/// Percent-decode like JS `decodeURIComponent`. `+` is left alone.
///
/// # Errors
///
/// Returns [`Error::MalformedEncoding`] when a `%` is not followed by two hex
/// digits or the decoded bytes are not UTF-8.
pub fn decode_uri_component(raw: &str) -> Result<String> {
    if !raw.contains('%') {
        return Ok(raw.to_owned());
    }
    let malformed = || Error::MalformedEncoding(raw.to_owned());

    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).and_then(|b| hex_value(*b)).ok_or_else(malformed)?;
            let lo = bytes.get(i + 2).and_then(|b| hex_value(*b)).ok_or_else(malformed)?;
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| malformed())
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
