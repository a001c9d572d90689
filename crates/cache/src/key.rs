//! Structured cache keys.

use std::fmt;

/// A cache key built from a source tag and an ordered parameter list.
///
/// Parameters are sorted at construction, so two logically identical
/// queries produce identical keys regardless of the order the caller
/// supplied them in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    source: String,
    params: Vec<String>,
}

impl CacheKey {
    pub fn new(source: &str, params: &[String]) -> Self {
        let mut params: Vec<String> = params.to_vec();
        params.sort();
        Self {
            source: source.to_string(),
            params,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.params.join(","))
    }
}
