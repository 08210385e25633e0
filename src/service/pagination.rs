//! Parse-or-default handling for `limit` / `offset` query parameters.
//!
//! | Parameter | Default |
//! |-----------|---------|
//! | `limit`   | 10      |
//! | `offset`  | 0       |
//!
//! Input is read like a lenient integer parse: leading whitespace is skipped and the leading run of
//! digits (with an optional sign) is taken, so `"5abc"` is 5. Absent, empty, non-numeric, zero and
//! negative values fall back to the default; bad input is never an error.

use crate::model::Page;
use std::collections::HashMap;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_OFFSET: i64 = 0;

pub fn parse_or_default(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(leading_int)
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |end| end + sign_len);
    s[..digits].parse().ok()
}

/// Always resolves a page.
pub fn page(params: &HashMap<String, String>) -> Page {
    Page {
        limit: parse_or_default(params.get("limit").map(String::as_str), DEFAULT_LIMIT),
        offset: parse_or_default(params.get("offset").map(String::as_str), DEFAULT_OFFSET),
    }
}

/// A page only when the caller named `limit` or `offset` (even with an empty value).
pub fn page_if_requested(params: &HashMap<String, String>) -> Option<Page> {
    (params.contains_key("limit") || params.contains_key("offset")).then(|| page(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_or_default_table() {
        let cases = [
            (None, 10),
            (Some(""), 10),
            (Some("abc"), 10),
            (Some("0"), 10),
            (Some("-5"), 10),
            (Some("+"), 10),
            (Some("3"), 3),
            (Some("  7"), 7),
            (Some("+4"), 4),
            (Some("12abc"), 12),
            (Some("99999999999999999999"), 10),
        ];
        for (raw, want) in cases {
            assert_eq!(parse_or_default(raw, DEFAULT_LIMIT), want, "input {:?}", raw);
        }
    }

    #[test]
    fn page_defaults_each_field_independently() {
        assert_eq!(
            page(&query(&[("limit", "2")])),
            Page { limit: 2, offset: 0 }
        );
        assert_eq!(
            page(&query(&[("offset", "x"), ("limit", "oops")])),
            Page { limit: 10, offset: 0 }
        );
        assert_eq!(page(&HashMap::new()), Page { limit: 10, offset: 0 });
    }

    #[test]
    fn page_only_when_requested() {
        assert_eq!(page_if_requested(&HashMap::new()), None);
        assert_eq!(page_if_requested(&query(&[("name", "Luke")])), None);
        assert_eq!(
            page_if_requested(&query(&[("offset", "")])),
            Some(Page { limit: 10, offset: 0 })
        );
        assert_eq!(
            page_if_requested(&query(&[("limit", "2"), ("offset", "3")])),
            Some(Page { limit: 2, offset: 3 })
        );
    }
}
