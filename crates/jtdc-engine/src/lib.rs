//! jtdc engine - keyword compiler
//!
//! This crate turns JSON Type Definition schema nodes into validators:
//! - Predicate expressions and their source rendering
//! - Per-compilation scope with de-duplicated shared helpers
//! - Keyword contract and the `type` keyword
//! - Host compiler and compiled validator

pub mod codegen;
pub mod compiler;
pub mod context;
pub mod error;
pub mod eval;
pub mod keyword;
pub mod keywords;
pub mod scope;
pub mod validator;

pub use codegen::{CmpOp, Code, Name};
pub use compiler::{Compiler, Session, ALLOWED_KEYWORDS};
pub use context::{Check, CodeGen, KeywordCxt};
pub use error::{CompileError, EvalError};
pub use eval::Env;
pub use keyword::{compile_keyword, KeywordDefinition, MetaSchema, SchemaType, Site};
pub use keywords::{TypeKeyword, VALID_DATE};
pub use scope::{HelperFn, Scope, ScopeEntry, ScopeValue};
pub use validator::{ValidationError, Validator};
