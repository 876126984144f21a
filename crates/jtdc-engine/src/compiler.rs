//! Host compiler
//!
//! Validates schema nodes, runs their keywords, and packages the result into a
//! [`Validator`]. Every node added to one [`Session`] shares the same scope, so
//! a helper such as the date-time predicate is bound once however many
//! timestamp fields the session compiles.

use crate::codegen::Name;
use crate::context::CodeGen;
use crate::error::CompileError;
use crate::keyword::{compile_keyword, SchemaType, Site};
use crate::keywords::TypeKeyword;
use crate::validator::Validator;
use jtdc_core::Config;
use serde_json::{Map, Value};

/// Keywords a schema node may carry
pub const ALLOWED_KEYWORDS: [&str; 3] = ["type", "nullable", "metadata"];

/// Compiles schema nodes into validators
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: Config,
}

impl Compiler {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Start a session that compiles several nodes into one validator
    pub fn session(&self) -> Session {
        Session::new(self.config.clone())
    }

    /// Compile a single node that validates the whole document
    pub fn compile(&self, node: &Value) -> Result<Validator, CompileError> {
        let mut session = self.session();
        session.add("", "", node)?;
        Ok(session.finish())
    }

    /// Compile one node per top-level field of the document
    pub fn compile_fields(&self, fields: &Map<String, Value>) -> Result<Validator, CompileError> {
        let mut session = self.session();
        for (field, node) in fields {
            let path = format!("/{}", escape_token(field));
            session.add(&path, &path, node)?;
        }
        Ok(session.finish())
    }
}

/// One compilation: a shared scope plus the checks emitted so far
#[derive(Debug)]
pub struct Session {
    gen: CodeGen,
    root: Name,
    config: Config,
}

impl Session {
    fn new(config: Config) -> Self {
        let mut gen = CodeGen::new();
        let root = gen.name("data");
        Self { gen, root, config }
    }

    /// Compile `node` against the value at `instance_path`
    ///
    /// `schema_path` locates the node in its schema document and prefixes the
    /// schema paths of the emitted checks. On error no checks are recorded.
    pub fn add(
        &mut self,
        instance_path: &str,
        schema_path: &str,
        node: &Value,
    ) -> Result<(), CompileError> {
        if !instance_path.is_empty() && !instance_path.starts_with('/') {
            return Err(CompileError::InvalidDataPath(instance_path.to_string()));
        }
        let node = check_node(node, schema_path)?;

        let data = if instance_path.is_empty() {
            self.root.clone()
        } else {
            self.gen.name("data")
        };
        let site = Site {
            data,
            instance_path,
            schema_path,
        };

        if !compile_keyword::<TypeKeyword>(&mut self.gen, node, site)? {
            tracing::debug!(instance_path, "empty form, no checks emitted");
        }
        Ok(())
    }

    /// Checks emitted so far
    pub fn len(&self) -> usize {
        self.gen.checks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.gen.checks().is_empty()
    }

    pub fn finish(self) -> Validator {
        let (scope, checks) = self.gen.into_parts();
        tracing::debug!(
            checks = checks.len(),
            helpers = scope.len(),
            "compilation finished"
        );
        Validator::new(scope, checks, self.root, self.config)
    }
}

/// Host-level checks on the node's shape, before any keyword runs
fn check_node<'v>(node: &'v Value, schema_path: &str) -> Result<&'v Map<String, Value>, CompileError> {
    let Some(node) = node.as_object() else {
        return Err(CompileError::NotObject {
            schema_path: schema_path.to_string(),
        });
    };

    if let Some(keyword) = node.keys().find(|k| !ALLOWED_KEYWORDS.contains(&k.as_str())) {
        return Err(CompileError::UnsupportedKeyword {
            keyword: keyword.clone(),
            schema_path: format!("{}/{}", schema_path, escape_token(keyword)),
        });
    }

    if let Some(nullable) = node.get("nullable") {
        if !SchemaType::Boolean.matches(nullable) {
            return Err(CompileError::KeywordType {
                keyword: "nullable".to_string(),
                expected: SchemaType::Boolean,
                schema_path: format!("{}/nullable", schema_path),
            });
        }
    }

    if let Some(metadata) = node.get("metadata") {
        if !SchemaType::Object.matches(metadata) {
            return Err(CompileError::KeywordType {
                keyword: "metadata".to_string(),
                expected: SchemaType::Object,
                schema_path: format!("{}/metadata", schema_path),
            });
        }
    }

    Ok(node)
}

/// Escape a JSON Pointer reference token
pub fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
