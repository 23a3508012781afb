//! # Path pattern matching.
//!
//! Patterns are `/`-delimited: literal segments must equal the path segment
//! byte for byte, parameter segments (`:name`) bind the percent-decoded path
//! segment under `name`.
//!
//! ```text
//! pattern  /city/:cityName/:day
//! path     /city/New%20York/mon
//!   → { cityName: "New York", day: "mon" }
//! ```
//!
//! ## Rules
//! - `"/"` against `"/"` matches with no parameters.
//! - Empty segments (leading, trailing, doubled slashes) are ignored on both sides.
//! - Different segment counts never match.
//! - Literal segments are compared raw: no decoding, no case folding.
//! - Each parameter is decoded on its own; a bad escape is a [`RouteError`].

use std::collections::HashMap;

use crate::error::RouteError;

/// Parameters bound by a successful match.
pub type Params = HashMap<String, String>;

/// Default parameter marker.
pub const PARAM_MARKER: char = ':';

/// Strips leading and trailing slashes, keeping the root path as `/`.
///
/// ```
/// use skycast::normalize_path;
///
/// assert_eq!(normalize_path("/"), "/");
/// assert_eq!(normalize_path("/city/Oslo/"), "city/Oslo");
/// ```
pub fn normalize_path(path: &str) -> &str {
    if path == "/" {
        path
    } else {
        path.trim_matches('/')
    }
}

/// Matches `path` against `pattern` using the `:` parameter marker.
///
/// Returns `Ok(None)` when the structure or a literal segment differs.
///
/// ```
/// use skycast::match_route;
///
/// let params = match_route("/city/:cityName", "/city/S%C3%A3o%20Paulo").unwrap().unwrap();
/// assert_eq!(params["cityName"], "São Paulo");
/// assert!(match_route("/city/:cityName", "/city").unwrap().is_none());
/// ```
pub fn match_route(pattern: &str, path: &str) -> Result<Option<Params>, RouteError> {
    match_route_with(pattern, path, PARAM_MARKER)
}

/// [`match_route`] with a custom parameter marker.
pub fn match_route_with(
    pattern: &str,
    path: &str,
    marker: char,
) -> Result<Option<Params>, RouteError> {
    if pattern == "/" && path == "/" {
        return Ok(Some(Params::new()));
    }

    let pattern_parts: Vec<&str> = segments(pattern).collect();
    let path_parts: Vec<&str> = segments(path).collect();
    if pattern_parts.len() != path_parts.len() {
        return Ok(None);
    }

    let mut params = Params::new();
    for (expected, actual) in pattern_parts.iter().zip(&path_parts) {
        if let Some(name) = expected.strip_prefix(marker) {
            params.insert(name.to_string(), decode_segment(actual)?);
        } else if expected != actual {
            return Ok(None);
        }
    }
    Ok(Some(params))
}

fn segments(s: &str) -> impl Iterator<Item = &str> {
    s.split('/').filter(|p| !p.is_empty())
}

/// Percent-decodes one path segment. `+` is kept as is.
pub fn decode_segment(segment: &str) -> Result<String, RouteError> {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return Err(RouteError::MalformedEscape {
                    segment: segment.to_string(),
                });
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|_| RouteError::InvalidUtf8 {
            segment: segment.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_matches_root() {
        assert_eq!(match_route("/", "/").unwrap(), Some(Params::new()));
    }

    #[test]
    fn segment_count_mismatch() {
        assert_eq!(match_route("/city/:name", "/city").unwrap(), None);
        assert_eq!(match_route("/city", "/city/Oslo").unwrap(), None);
        assert_eq!(match_route("/", "about").unwrap(), None);
    }

    #[test]
    fn literal_mismatch_with_equal_counts() {
        assert_eq!(match_route("/city/:name", "/town/Oslo").unwrap(), None);
        assert_eq!(match_route("/about", "/About").unwrap(), None);
        assert_eq!(match_route("caf%C3%A9", "café").unwrap(), None);
    }

    #[test]
    fn binds_every_parameter_decoded() {
        let params = match_route("/from/:a/to/:b", "/from/New%20York/to/K%C3%B8benhavn")
            .unwrap()
            .unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["a"], "New York");
        assert_eq!(params["b"], "København");
    }

    #[test]
    fn ignores_empty_segments() {
        let params = match_route("city/:name", "//city///Oslo/").unwrap().unwrap();
        assert_eq!(params["name"], "Oslo");
    }

    #[test]
    fn empty_pattern_only_matches_empty_path() {
        assert_eq!(match_route("", "").unwrap(), Some(Params::new()));
        assert_eq!(match_route("", "/").unwrap(), Some(Params::new()));
        assert_eq!(match_route("", "x").unwrap(), None);
    }

    #[test]
    fn plus_is_not_a_space() {
        let params = match_route("/q/:v", "/q/a+b").unwrap().unwrap();
        assert_eq!(params["v"], "a+b");
    }

    #[test]
    fn custom_marker() {
        let params = match_route_with("/city/$name", "/city/Rome", '$')
            .unwrap()
            .unwrap();
        assert_eq!(params["name"], "Rome");
        assert!(match_route_with("/city/:name", "/city/Rome", '$')
            .unwrap()
            .is_none());
    }

    #[test]
    fn malformed_escape_is_an_error() {
        for bad in ["%", "%4", "%zz", "ab%2"] {
            let err = decode_segment(bad).unwrap_err();
            assert!(matches!(err, RouteError::MalformedEscape { .. }), "{bad}");
        }
        assert!(match_route("/city/:name", "/city/%zz").is_err());
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let err = match_route("/city/:name", "/city/%FF").unwrap_err();
        assert_eq!(
            err,
            RouteError::InvalidUtf8 {
                segment: "%FF".into()
            }
        );
    }

    #[test]
    fn literal_mismatch_before_bad_param_is_no_match() {
        assert_eq!(match_route("/a/:x", "/b/%zz").unwrap(), None);
    }

    #[test]
    fn normalize_keeps_root() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("//"), "");
        assert_eq!(normalize_path("/about/"), "about");
        assert_eq!(normalize_path("city/x"), "city/x");
    }
}
