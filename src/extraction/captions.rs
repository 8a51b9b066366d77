use std::collections::HashSet;

// @module: Caption filtering and the run-wide seen set

/// Captions already written during one extractor run
///
/// Membership is exact and case-sensitive; iteration follows insertion order.
#[derive(Debug, Default, Clone)]
pub struct SeenCaptions {
    order: Vec<String>,
    index: HashSet<String>,
}

impl SeenCaptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `caption` was already recorded, compared exactly
    pub fn contains(&self, caption: &str) -> bool {
        self.index.contains(caption)
    }

    /// Record `caption`, returning false if it was already present
    pub fn insert(&mut self, caption: &str) -> bool {
        if self.index.contains(caption) {
            return false;
        }

        self.index.insert(caption.to_string());
        self.order.push(caption.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// Whether a caption value should be offered for translation
///
/// Empty values and values made only of decimal digits are placeholders, not text.
pub fn is_translatable(caption: &str) -> bool {
    !caption.is_empty() && !caption.bytes().all(|b| b.is_ascii_digit())
}
