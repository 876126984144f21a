//! Keyword contract between the compiler and keyword implementations
//!
//! The compiler checks a keyword's value against `schema_type` and
//! `meta_schema` before `code` runs, then hands `code` the value already
//! decoded into `Schema`. Keywords therefore never see an ill-formed value.

use crate::codegen::Name;
use crate::context::{CodeGen, KeywordCxt};
use crate::error::CompileError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// JSON type a keyword value must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    String,
    Boolean,
    Number,
    Object,
    Array,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::Number => value.is_number(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Constraint on a keyword value beyond its JSON type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaSchema {
    /// No further constraint
    Any,

    /// Value must be one of these strings
    Enum(&'static [&'static str]),
}

impl MetaSchema {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Enum(allowed) => value
                .as_str()
                .is_some_and(|s| allowed.contains(&s)),
        }
    }
}

/// A keyword that compiles to failure checks
pub trait KeywordDefinition {
    /// Decoded keyword value
    type Schema: DeserializeOwned;

    /// Keyword name as it appears in schemas
    const KEYWORD: &'static str;

    fn schema_type() -> SchemaType;

    fn meta_schema() -> MetaSchema;

    /// Emit checks for one occurrence of the keyword
    fn code(cxt: &mut KeywordCxt<'_>, schema: &Self::Schema);
}

/// Where in the data and schema a keyword is being compiled
pub struct Site<'a> {
    pub data: Name,
    pub instance_path: &'a str,
    pub schema_path: &'a str,
}

/// Check a keyword value against its contract and run the keyword
///
/// Returns `Ok(false)` without touching `gen` when the keyword is absent.
pub fn compile_keyword<K: KeywordDefinition>(
    gen: &mut CodeGen,
    parent_schema: &Map<String, Value>,
    site: Site<'_>,
) -> Result<bool, CompileError> {
    let Some(value) = parent_schema.get(K::KEYWORD) else {
        return Ok(false);
    };
    let schema_path = format!("{}/{}", site.schema_path, K::KEYWORD);

    let expected = K::schema_type();
    if !expected.matches(value) {
        return Err(CompileError::KeywordType {
            keyword: K::KEYWORD.to_string(),
            expected,
            schema_path,
        });
    }

    let meta = K::meta_schema();
    if !meta.accepts(value) {
        let allowed = match meta {
            MetaSchema::Enum(allowed) => allowed
                .iter()
                .map(|s| format!("{:?}", s))
                .collect::<Vec<_>>()
                .join(", "),
            MetaSchema::Any => String::new(),
        };
        return Err(CompileError::KeywordEnum {
            keyword: K::KEYWORD.to_string(),
            allowed,
            found: value.to_string(),
            schema_path,
        });
    }

    let schema: K::Schema = serde_json::from_value(value.clone()).map_err(|e| {
        CompileError::InvalidKeywordValue {
            keyword: K::KEYWORD.to_string(),
            message: e.to_string(),
            schema_path: schema_path.clone(),
        }
    })?;

    let mut cxt = KeywordCxt {
        gen,
        keyword: K::KEYWORD,
        data: site.data,
        schema: value,
        parent_schema,
        instance_path: site.instance_path,
        schema_path,
    };
    K::code(&mut cxt, &schema);

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Code;
    use serde_json::json;

    /// Fails when the value is null; accepts `"on"` or `"off"`
    struct Switch;

    impl KeywordDefinition for Switch {
        type Schema = String;
        const KEYWORD: &'static str = "switch";

        fn schema_type() -> SchemaType {
            SchemaType::String
        }

        fn meta_schema() -> MetaSchema {
            MetaSchema::Enum(&["on", "off"])
        }

        fn code(cxt: &mut KeywordCxt<'_>, schema: &String) {
            if schema == "on" {
                let data = cxt.data.clone();
                cxt.fail(crate::codegen::not(Code::NotNull(data)));
            }
        }
    }

    fn run(node: Value) -> (CodeGen, Result<bool, CompileError>) {
        let mut gen = CodeGen::new();
        let data = gen.name("data");
        let result = compile_keyword::<Switch>(
            &mut gen,
            node.as_object().unwrap(),
            Site { data, instance_path: "", schema_path: "" },
        );
        (gen, result)
    }

    #[test]
    fn schema_type_checks() {
        assert!(SchemaType::String.matches(&json!("x")));
        assert!(!SchemaType::String.matches(&json!(1)));
        assert!(SchemaType::Boolean.matches(&json!(false)));
        assert!(MetaSchema::Enum(&["a"]).accepts(&json!("a")));
        assert!(!MetaSchema::Enum(&["a"]).accepts(&json!("b")));
        assert!(MetaSchema::Any.accepts(&json!(null)));
    }

    #[test]
    fn absent_keyword_is_skipped() {
        let (gen, result) = run(json!({}));
        assert_eq!(result, Ok(false));
        assert!(gen.checks().is_empty());
    }

    #[test]
    fn keyword_runs_after_checks() {
        let (gen, result) = run(json!({"switch": "on"}));
        assert_eq!(result, Ok(true));
        assert_eq!(gen.checks().len(), 1);
        assert_eq!(gen.checks()[0].schema_path, "/switch");
    }

    #[test]
    fn wrong_json_type_is_rejected() {
        let (gen, result) = run(json!({"switch": true}));
        assert!(matches!(
            result,
            Err(CompileError::KeywordType { expected: SchemaType::String, .. })
        ));
        assert!(gen.checks().is_empty());
    }

    #[test]
    fn value_outside_enum_is_rejected() {
        let (_, result) = run(json!({"switch": "dim"}));
        match result {
            Err(CompileError::KeywordEnum { allowed, found, .. }) => {
                assert_eq!(allowed, "\"on\", \"off\"");
                assert_eq!(found, "\"dim\"");
            }
            other => panic!("expected enum error, got {:?}", other),
        }
    }
}
