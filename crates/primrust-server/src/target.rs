//! Request-target parsing (origin form).
//!
//! Splits `/path?key=value&flag#fragment` into a path and query pairs.
//! Values are kept verbatim; percent-decoding is left to the caller.

/// A parsed origin-form request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: String,
    query: Vec<(String, Option<String>)>,
}

impl Target {
    /// Parses an origin-form target. Returns `None` when the target does not
    /// start with `/` or contains whitespace or control bytes.
    pub fn parse(raw: &str) -> Option<Target> {
        if !raw.starts_with('/') {
            return None;
        }
        if raw.bytes().any(|b| b <= b' ' || b == 0x7f) {
            return None;
        }
        let without_fragment = raw.split('#').next().unwrap_or(raw);
        let (path, query_str) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, query),
            None => (without_fragment, ""),
        };
        let mut query = Vec::new();
        for item in query_str.split('&').filter(|item| !item.is_empty()) {
            match item.split_once('=') {
                Some((key, value)) => query.push((key.to_string(), Some(value.to_string()))),
                None => query.push((item.to_string(), None)),
            }
        }
        Some(Target {
            path: path.to_string(),
            query,
        })
    }

    /// First value of a `key=value` query parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Whether the query contains `key`, valued or as a bare flag.
    pub fn has(&self, key: &str) -> bool {
        self.query.iter().any(|(name, _)| name == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path() {
        let target = Target::parse("/prime").unwrap();
        assert_eq!(target.path, "/prime");
        assert!(!target.has("fast"));
    }

    #[test]
    fn query_pairs_and_flags() {
        let target = Target::parse("/prime?number=97&fast").unwrap();
        assert_eq!(target.path, "/prime");
        assert_eq!(target.get("number"), Some("97"));
        assert!(target.has("fast"));
        assert_eq!(target.get("fast"), None); // bare flag has no value
        assert!(!target.has("slow"));
    }

    #[test]
    fn fragment_is_discarded() {
        let target = Target::parse("/factor?number=12#anchor").unwrap();
        assert_eq!(target.path, "/factor");
        assert_eq!(target.get("number"), Some("12"));
    }

    #[test]
    fn malformed_targets_rejected() {
        assert!(Target::parse("prime").is_none());
        assert!(Target::parse("").is_none());
        assert!(Target::parse("/pri me").is_none());
        assert!(Target::parse("/prime\r\n").is_none());
        assert!(Target::parse("http://host/prime").is_none());
    }

    #[test]
    fn duplicate_keys_first_wins() {
        let target = Target::parse("/x?a=1&a=2").unwrap();
        assert_eq!(target.get("a"), Some("1"));
    }
}
