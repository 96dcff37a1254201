use std::borrow::Cow;
use std::fmt;

/// Ordered query-string parameters, `application/x-www-form-urlencoded` on the wire.
///
/// Duplicate names survive a parse; `set` collapses them to one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string. A leading `?` is ignored, as are empty segments.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((name, value)) => (decode(name), decode(value)),
                None => (decode(segment), String::new()),
            })
            .collect();
        Self { pairs }
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set `name` to `value`: the first existing entry keeps its position,
    /// later duplicates are dropped. Appends when `name` is absent.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.pairs.iter().position(|(n, _)| n == name) {
            Some(first) => {
                self.pairs[first].1 = value.to_string();
                let mut index = 0;
                self.pairs.retain(|(n, _)| {
                    let keep = index <= first || n != name;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((name.to_string(), value.to_string())),
        }
    }

    /// Remove every entry named `name`.
    pub fn delete(&mut self, name: &str) {
        self.pairs.retain(|(n, _)| n != name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(n, _)| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", encode(name), encode(value))?;
        }
        Ok(())
    }
}

/// A path plus its query parameters, e.g. `/search?query=dune`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub params: QueryParams,
}

impl Location {
    /// Split an href into path and query. Any `#fragment` is discarded and an
    /// empty path becomes `/`.
    pub fn parse(href: &str) -> Self {
        let href = href.split('#').next().unwrap_or_default();
        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        let path = if path.is_empty() { "/" } else { path };
        Self {
            path: path.to_string(),
            params: QueryParams::parse(query),
        }
    }

    /// Same path with different parameters
    pub fn with_params(&self, params: QueryParams) -> Self {
        Self {
            path: self.path.clone(),
            params,
        }
    }

    /// Rendered `path?query`, or the bare path when there are no parameters.
    pub fn href(&self) -> String {
        if self.params.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.params)
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

// Form encoding: spaces become `+`; alphanumerics and `*-._` pass through,
// everything else is percent-encoded.
fn encode(raw: &str) -> String {
    let encoded = urlencoding::encode(raw);
    if encoded.contains(['%', '~']) {
        encoded
            .replace("%20", "+")
            .replace("%2A", "*")
            .replace('~', "%7E")
    } else {
        encoded.into_owned()
    }
}

fn decode(raw: &str) -> String {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_order_and_duplicates() {
        let params = QueryParams::parse("?b=2&a=1&b=3");
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("b", "2"), ("a", "1"), ("b", "3")]);
        assert_eq!(params.get("b"), Some("2"));
    }

    #[test]
    fn parse_handles_bare_names_and_empty_segments() {
        let params = QueryParams::parse("flag&&x=");
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("x"), Some(""));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn set_replaces_first_and_drops_duplicates() {
        let mut params = QueryParams::parse("b=2&a=1&b=3");
        params.set("b", "9");
        assert_eq!(params.to_string(), "b=9&a=1");
    }

    #[test]
    fn set_appends_missing_name() {
        let mut params = QueryParams::parse("a=1");
        params.set("query", "dune");
        assert_eq!(params.to_string(), "a=1&query=dune");
    }

    #[test]
    fn delete_removes_every_entry() {
        let mut params = QueryParams::parse("q=1&x=2&q=3");
        params.delete("q");
        assert_eq!(params.to_string(), "x=2");
        assert!(!params.contains("q"));
    }

    #[test]
    fn encodes_spaces_as_plus_and_escapes_reserved() {
        let mut params = QueryParams::new();
        params.set("query", "war & peace");
        assert_eq!(params.to_string(), "query=war+%26+peace");
    }

    #[test]
    fn decodes_plus_and_percent_escapes() {
        let params = QueryParams::parse("query=war+%26+peace&t=caf%C3%A9");
        assert_eq!(params.get("query"), Some("war & peace"));
        assert_eq!(params.get("t"), Some("café"));
    }

    #[test]
    fn star_passes_through_and_tilde_is_escaped() {
        let mut params = QueryParams::new();
        params.set("query", "a*b~c");
        let text = params.to_string();
        assert_eq!(text, "query=a*b%7Ec");
        assert_eq!(QueryParams::parse(&text).get("query"), Some("a*b~c"));
    }

    #[test]
    fn literal_plus_survives() {
        let mut params = QueryParams::new();
        params.set("query", "c++");
        let text = params.to_string();
        assert_eq!(text, "query=c%2B%2B");
        assert_eq!(QueryParams::parse(&text).get("query"), Some("c++"));
    }

    #[test]
    fn location_splits_path_and_query() {
        let location = Location::parse("/search?query=foo&category=books#top");
        assert_eq!(location.path, "/search");
        assert_eq!(location.params.get("query"), Some("foo"));
        assert_eq!(location.params.get("category"), Some("books"));
    }

    #[test]
    fn href_omits_question_mark_when_empty() {
        assert_eq!(Location::parse("/search?").href(), "/search");
        assert_eq!(Location::parse("").href(), "/");
        assert_eq!(Location::parse("/s?a=1").href(), "/s?a=1");
    }
}
