//! `debug` query parameter rewriting
//!
//! Rewrites operate on the serialized query so every other pair keeps its
//! exact bytes (ordering, encoding, empty segments). Scheme, credentials,
//! host, port, path and fragment are untouched.

use url::Url;
use url::form_urlencoded;

use crate::debug::DebugMode;
use crate::utils::{OdooDebugError, Result};

/// Name of the query parameter the web client recognizes
pub const DEBUG_PARAM: &str = "debug";

/// Parse a tab URL, rejecting pages the web client cannot be served on
pub fn parse_tab_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(OdooDebugError::UnsupportedUrl(raw.to_string())),
    }
}

/// Decoded value of the first `debug` pair, if any
pub fn debug_param(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == DEBUG_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Mode currently requested by the URL
pub fn debug_mode(url: &Url) -> DebugMode {
    debug_param(url).map(DebugMode::from).unwrap_or_default()
}

fn is_debug_pair(segment: &str) -> bool {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .is_some_and(|(key, _)| key == DEBUG_PARAM)
}

/// Copy of `url` with `debug` set to `value`.
///
/// The first `debug` pair is replaced in place and later duplicates are
/// removed; without one, the pair is appended.
pub fn with_debug_param(url: &Url, value: &str) -> Url {
    let pair = format!(
        "{}={}",
        DEBUG_PARAM,
        form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>()
    );

    let mut segments: Vec<&str> = Vec::new();
    let mut replaced = false;
    let query = url.query().filter(|query| !query.is_empty());
    for segment in query.into_iter().flat_map(|query| query.split('&')) {
        if !is_debug_pair(segment) {
            segments.push(segment);
        } else if !replaced {
            segments.push(&pair);
            replaced = true;
        }
    }
    if !replaced {
        segments.push(&pair);
    }

    let mut rewritten = url.clone();
    rewritten.set_query(Some(&segments.join("&")));
    rewritten
}

/// Rewrite to `debug=1` unless basic or assets debug is already requested
pub fn ensure_basic_debug(url: &Url) -> Option<Url> {
    if debug_mode(url).is_active() {
        return None;
    }
    Some(with_debug_param(url, "1"))
}
