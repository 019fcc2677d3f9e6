//! Identifier alias table.
//!
//! Maps `(owner, method)` pairs to a replacement identifier. No rendering
//! rule consults it yet; a writer owns one table so that a future rule can
//! look up a shorter spelling before falling back to the method name.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AliasKey {
    pub owner: String,
    pub method: String,
}

impl AliasKey {
    pub fn new(owner: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            method: method.into(),
        }
    }
}

const DEFAULT_ALIASES: &[(&str, &str, &str)] = &[("Kernel", "p", "p"), ("Object", "dup", "dup")];

#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: HashMap<AliasKey, String>,
}

impl AliasTable {
    /// Table holding the default entries.
    pub fn new() -> Self {
        let entries = DEFAULT_ALIASES
            .iter()
            .map(|(owner, method, alias)| (AliasKey::new(*owner, *method), alias.to_string()))
            .collect();
        Self { entries }
    }

    /// Insert or overwrite an alias, returning the previous one.
    pub fn set(&mut self, key: AliasKey, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key, value.into())
    }

    pub fn get(&self, key: &AliasKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AliasKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}
