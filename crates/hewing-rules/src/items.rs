use std::collections::BTreeSet;

use hewing_core::types::normalize_code;

use crate::wildcard::glob_match;

/// Read access to the world's item/block catalog.
pub trait ItemCatalog {
    /// Whether an item or block with this exact code exists.
    fn contains(&self, code: &str) -> bool;

    /// Every known code, in a stable order.
    fn codes(&self) -> Vec<&str>;

    /// Every known code matching a `*` glob, in the order of [`codes`](Self::codes).
    fn matching(&self, pattern: &str) -> Vec<String> {
        self.codes()
            .into_iter()
            .filter(|code| glob_match(pattern, code))
            .map(str::to_string)
            .collect()
    }
}

/// Set-backed item catalog. Codes are stored normalized and sorted.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    codes: BTreeSet<String>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for code in codes {
            registry.insert(code.as_ref());
        }
        registry
    }

    pub fn insert(&mut self, code: &str) -> bool {
        self.codes.insert(normalize_code(code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl ItemCatalog for ItemRegistry {
    fn contains(&self, code: &str) -> bool {
        self.codes.contains(&normalize_code(code))
    }

    fn codes(&self) -> Vec<&str> {
        self.codes.iter().map(String::as_str).collect()
    }
}
