//! Document addressing

use std::fmt;

/// Address of a document: an optional collection plus a name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    collection: Option<String>,
    name: String,
}

impl DocumentKey {
    /// Key of a top-level document
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            collection: None,
            name: name.into(),
        }
    }

    /// Key of a document inside a collection
    pub fn in_collection(collection: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            collection: Some(collection.into()),
            name: name.into(),
        }
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.collection {
            Some(collection) => write!(f, "{}/{}", collection, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Encode one key segment into a file name stem.
///
/// ASCII letters, digits, `-` and `_` pass through; every other byte becomes
/// `%XX`. The mapping is injective and never yields `.` or `/`, so an encoded
/// segment always names a plain file inside its parent directory.
pub(crate) fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}
