//! Strongly-typed identifiers used across the domain.

use serde::{Deserialize, Serialize};

/// Identifier of an article.
///
/// Article ids are opaque strings in the catalog documents; ids assigned by
/// this service are decimal counters (see [`IdSequence`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, if it is a plain decimal counter.
    pub fn as_counter(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl core::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ArticleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ArticleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl core::borrow::Borrow<str> for ArticleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Monotonic id allocator, tracked independently of list length.
///
/// Seeded past both the entry count and the largest numeric id already in
/// use, so a contiguous catalog `"1"..="n"` gets `"n+1"` next and a sparse
/// one never collides. Values are never handed out twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Start a sequence at an explicit value (tests, migrations).
    pub fn starting_at(next: u64) -> Self {
        Self { next: next.max(1) }
    }

    /// Seed from the ids already present.
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a ArticleId>) -> Self {
        let mut count = 0u64;
        let mut max_numeric = 0u64;
        for id in existing {
            count += 1;
            if let Some(n) = id.as_counter() {
                max_numeric = max_numeric.max(n);
            }
        }
        Self::starting_at(count.max(max_numeric).saturating_add(1))
    }

    /// Peek at the value the next allocation starts from.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Allocate the next id for which `taken` returns false.
    pub fn allocate(&mut self, mut taken: impl FnMut(&ArticleId) -> bool) -> ArticleId {
        loop {
            let candidate = ArticleId::new(self.next.to_string());
            self.next = self.next.saturating_add(1);
            if !taken(&candidate) {
                return candidate;
            }
        }
    }
}
