//! Recipient name taken from the `to` query parameter.

use std::borrow::Cow;

/// Display-only name. The browser layer writes it with `textContent`, so markup in
/// the query string shows up as literal text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipientName(String);

impl RecipientName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Read `to` from a `location.search`-style string (leading `?` optional).
    /// Missing or blank values fall back to `default`.
    pub fn from_query(query: &str, default: &str) -> Self {
        match query_param(query, "to") {
            Some(name) if !name.trim().is_empty() => Self(name),
            _ => Self(default.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn heading(&self) -> String {
        format!("{}, will you be my Valentine?", self.0)
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => spaced,
    }
}

/// First value for `key`, percent-decoded.
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(k) == key).then(|| decode(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_to_param() {
        let r = RecipientName::from_query("?to=Sam", "My Love");
        assert_eq!(r.as_str(), "Sam");
        assert!(r.heading().contains("Sam"));
    }

    #[test]
    fn missing_or_blank_uses_default() {
        assert_eq!(RecipientName::from_query("", "My Love").as_str(), "My Love");
        assert_eq!(RecipientName::from_query("?from=Alex", "My Love").as_str(), "My Love");
        assert_eq!(RecipientName::from_query("?to=", "My Love").as_str(), "My Love");
    }

    #[test]
    fn decodes_percent_and_plus() {
        assert_eq!(query_param("?x=1&to=Mary+Jane%20%E2%9D%A4", "to").as_deref(), Some("Mary Jane ❤"));
    }

    #[test]
    fn markup_is_kept_verbatim() {
        let r = RecipientName::from_query("to=%3Cb%3ESam%3C%2Fb%3E", "My Love");
        assert_eq!(r.as_str(), "<b>Sam</b>");
    }

    #[test]
    fn first_occurrence_wins() {
        assert_eq!(query_param("to=A&to=B", "to").as_deref(), Some("A"));
    }
}
