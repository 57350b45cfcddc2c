use serde::{Deserialize, Serialize};

/// Unique identifier for a book in the catalog.
///
/// Ordering is plain string ordering, which is what the order index sorts by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isbn(pub String);

impl Isbn {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Isbn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Isbn {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Isbn {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
