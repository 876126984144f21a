//! Per-compilation name generation and shared helper table
//!
//! A `Scope` lives for exactly one compilation session. Keywords register
//! shared helpers with [`Scope::scope_value`], which inserts on first use and
//! hands back the existing binding on every later call with the same key.
//! Entries are never replaced or removed.

use crate::codegen::Name;
use std::collections::HashMap;

/// Runtime signature of a shared string predicate
pub type HelperFn = fn(&str) -> bool;

/// A shared helper that generated code may call
#[derive(Debug, Clone, Copy)]
pub struct ScopeValue {
    /// Identity used for de-duplication
    pub key: &'static str,

    /// Implementation used by the validator
    pub func: HelperFn,

    /// Expression that loads the helper in generated source
    pub code: &'static str,
}

/// A helper bound to a name in the scope
#[derive(Debug, Clone)]
pub struct ScopeEntry {
    pub name: Name,
    pub value: ScopeValue,
}

#[derive(Debug, Default)]
pub struct Scope {
    /// Registered helpers in registration order
    entries: Vec<ScopeEntry>,

    /// Helper key -> index into `entries`
    by_key: HashMap<&'static str, usize>,

    /// Next free suffix per name prefix
    counters: HashMap<String, usize>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh name with the given prefix (`data0`, `data1`, ...)
    pub fn name(&mut self, prefix: &str) -> Name {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        let name = Name::new(format!("{}{}", prefix, counter));
        *counter += 1;
        name
    }

    /// Bind a helper, or return the binding already registered under its key
    pub fn scope_value(&mut self, prefix: &str, value: ScopeValue) -> Name {
        if let Some(&index) = self.by_key.get(value.key) {
            let name = self.entries[index].name.clone();
            tracing::trace!(key = value.key, name = %name, "reusing scope value");
            return name;
        }

        let name = self.name(prefix);
        tracing::trace!(key = value.key, name = %name, "registering scope value");
        self.by_key.insert(value.key, self.entries.len());
        self.entries.push(ScopeEntry {
            name: name.clone(),
            value,
        });
        name
    }

    /// Look up a helper by its bound name
    pub fn get(&self, name: &Name) -> Option<&ScopeValue> {
        self.entries
            .iter()
            .find(|entry| &entry.name == name)
            .map(|entry| &entry.value)
    }

    /// Registered helpers in registration order
    pub fn entries(&self) -> &[ScopeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
