//! Code emitter and the per-keyword compilation context

use crate::codegen::{Code, Name};
use crate::scope::{Scope, ScopeValue};
use serde_json::{Map, Value};

/// A recorded failure condition
///
/// At validation time the check fails when `condition` evaluates to true
/// with `data` bound to the value at `instance_path`.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// JSON Pointer of the checked value
    pub instance_path: String,

    /// JSON Pointer of the keyword in the schema
    pub schema_path: String,

    /// Keyword that produced the check
    pub keyword: &'static str,

    /// Keyword value, kept for error messages
    pub schema: Value,

    /// Name the checked value is bound to
    pub data: Name,

    /// Condition that signals a failure
    pub condition: Code,
}

/// Accumulates checks and shared helpers for one compilation session
#[derive(Debug, Default)]
pub struct CodeGen {
    scope: Scope,
    checks: Vec<Check>,
}

impl CodeGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh name
    pub fn name(&mut self, prefix: &str) -> Name {
        self.scope.name(prefix)
    }

    /// Register a shared helper once per session
    pub fn scope_value(&mut self, prefix: &str, value: ScopeValue) -> Name {
        self.scope.scope_value(prefix, value)
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub(crate) fn push_check(&mut self, check: Check) {
        self.checks.push(check);
    }

    pub(crate) fn into_parts(self) -> (Scope, Vec<Check>) {
        (self.scope, self.checks)
    }
}

/// Everything a keyword sees while it emits code
pub struct KeywordCxt<'a> {
    /// Session emitter
    pub gen: &'a mut CodeGen,

    /// Keyword being compiled
    pub keyword: &'static str,

    /// Name bound to the data value under validation
    pub data: Name,

    /// The keyword's own value
    pub schema: &'a Value,

    /// The schema object that contains the keyword
    pub parent_schema: &'a Map<String, Value>,

    /// JSON Pointer of the data value
    pub instance_path: &'a str,

    /// JSON Pointer of the keyword in the schema
    pub schema_path: String,
}

impl<'a> KeywordCxt<'a> {
    /// Record that validation fails wherever `condition` holds
    pub fn fail(&mut self, condition: Code) {
        self.gen.push_check(Check {
            instance_path: self.instance_path.to_string(),
            schema_path: self.schema_path.clone(),
            keyword: self.keyword,
            schema: self.schema.clone(),
            data: self.data.clone(),
            condition,
        });
    }

    /// Read a boolean sibling keyword, `false` when absent
    pub fn parent_flag(&self, keyword: &str) -> bool {
        self.parent_schema
            .get(keyword)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}
