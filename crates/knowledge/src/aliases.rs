//! Static lookup tables for the Redis corpus.

/// Category prefixes tried, in order, when a topic is not an exact rule key.
pub const TOPIC_PREFIXES: &[&str] = &[
    "data-",
    "conn-",
    "ram-",
    "json-",
    "rqe-",
    "vector-",
    "semantic-cache-",
    "stream-",
    "cluster-",
    "security-",
    "observe-",
];

/// User-facing category names → section prefixes. Unlisted names map to themselves.
pub const CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("data", "data"),
    ("connection", "conn"),
    ("memory", "ram"),
    ("security", "security"),
    ("json", "json"),
    ("streams", "stream"),
    ("clustering", "cluster"),
    ("vector", "vector"),
    ("semantic-cache", "semantic-cache"),
    ("observability", "observe"),
];

/// Code example pattern names → rule prefixes. Unlisted names are used as topics.
pub const PATTERN_ALIASES: &[(&str, &str)] = &[
    ("connection-pool", "conn-pooling"),
    ("pipeline", "conn-pipelining"),
    ("pipelining", "conn-pipelining"),
    ("transaction", "conn-pipelining"),
    ("pub-sub", "stream-choosing-pattern"),
    ("pubsub", "stream-choosing-pattern"),
    ("stream-consumer", "stream-choosing-pattern"),
    ("streams", "stream-choosing-pattern"),
    ("rate-limiter", "data-choose-structure"),
    ("cache-aside", "ram-ttl"),
    ("session-store", "data-choose-structure"),
    ("leaderboard", "data-choose-structure"),
    ("vector-search", "vector-algorithm-choice"),
    ("semantic-cache", "semantic-cache-best-practices"),
    ("key-naming", "data-key-naming"),
    ("hash-tags", "cluster-hash-tags"),
];

/// Pattern names advertised when a code example cannot be found.
pub const CODE_EXAMPLE_PATTERNS: &[&str] = &[
    "connection-pool",
    "pipeline",
    "pub-sub",
    "stream-consumer",
    "rate-limiter",
    "cache-aside",
    "session-store",
    "leaderboard",
    "vector-search",
    "semantic-cache",
    "key-naming",
    "hash-tags",
];

/// Languages advertised alongside [`CODE_EXAMPLE_PATTERNS`].
pub const CODE_EXAMPLE_LANGUAGES: &[&str] = &["python", "javascript", "java"];

pub fn category_prefix(category: &str) -> &str {
    lookup(CATEGORY_ALIASES, category).unwrap_or(category)
}

pub fn pattern_topic(pattern: &str) -> &str {
    lookup(PATTERN_ALIASES, pattern).unwrap_or(pattern)
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, target)| *target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_and_fall_back_to_identity() {
        assert_eq!(category_prefix("connection"), "conn");
        assert_eq!(category_prefix("observability"), "observe");
        assert_eq!(category_prefix("rqe"), "rqe");
        assert_eq!(pattern_topic("pub-sub"), "stream-choosing-pattern");
        assert_eq!(pattern_topic("conn-pooling"), "conn-pooling");
    }

    #[test]
    fn every_advertised_pattern_has_an_alias() {
        for pattern in CODE_EXAMPLE_PATTERNS {
            assert_ne!(pattern_topic(pattern), *pattern, "{pattern} has no alias");
        }
    }
}
