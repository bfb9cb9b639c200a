use std::collections::HashMap;

/// Tracks natural keys seen within a single import call.
#[derive(Debug, Default)]
pub struct DuplicateDetector {
    seen: HashMap<String, usize>,
}

impl DuplicateDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key` for `row_number`.
    ///
    /// Returns the row number of the first occurrence when `key` was already
    /// seen. Blank keys are never tracked.
    pub fn check(&mut self, key: &str, row_number: usize) -> Option<usize> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        match self.seen.get(key) {
            Some(first) => Some(*first),
            None => {
                self.seen.insert(key.to_string(), row_number);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
