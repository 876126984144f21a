//! Compiled validator
//!
//! Holds the checks and shared helpers of one compilation. The same artifact
//! is evaluated directly against [`Data`] and rendered as source by
//! [`Validator::source`].

use crate::codegen::Name;
use crate::context::Check;
use crate::error::EvalError;
use crate::eval::Env;
use crate::scope::Scope;
use jtdc_core::{Config, Data, Diagnostic, DiagnosticCode, Location, Severity};
use serde::Serialize;
use serde_json::Value;

/// One failed check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// JSON Pointer of the failing value
    pub instance_path: String,

    /// JSON Pointer of the keyword that failed
    pub schema_path: String,

    pub keyword: String,

    /// Keyword value
    pub schema: Value,
}

#[derive(Debug)]
pub struct Validator {
    scope: Scope,
    checks: Vec<Check>,
    root: Name,
    config: Config,
}

impl Validator {
    pub(crate) fn new(scope: Scope, checks: Vec<Check>, root: Name, config: Config) -> Self {
        Self {
            scope,
            checks,
            root,
            config,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Name the whole document is bound to
    pub fn root(&self) -> &Name {
        &self.root
    }

    /// Run every check against `data`
    ///
    /// Checks whose instance path does not exist in `data` are skipped. With
    /// `all_errors` disabled, stops after the first failure.
    pub fn validate(&self, data: &Data) -> Result<Vec<ValidationError>, EvalError> {
        let mut errors = Vec::new();

        for check in &self.checks {
            let Some(value) = data.pointer(&check.instance_path) else {
                tracing::trace!(instance_path = %check.instance_path, "no value, check skipped");
                continue;
            };

            let mut env = Env::new(&self.scope);
            env.bind(check.data.clone(), value);
            let failed = check.condition.evaluate(&env)?;
            tracing::trace!(
                instance_path = %check.instance_path,
                schema_path = %check.schema_path,
                failed,
                "evaluated check"
            );

            if failed {
                errors.push(ValidationError {
                    instance_path: check.instance_path.clone(),
                    schema_path: check.schema_path.clone(),
                    keyword: check.keyword.to_string(),
                    schema: check.schema.clone(),
                });
                if !self.config.all_errors {
                    break;
                }
            }
        }

        Ok(errors)
    }

    pub fn is_valid(&self, data: &Data) -> Result<bool, EvalError> {
        Ok(self.validate(data)?.is_empty())
    }

    /// Convert failures into report diagnostics
    pub fn diagnostics(&self, errors: &[ValidationError], data: &Data) -> Vec<Diagnostic> {
        let severity = self
            .config
            .severity
            .get_severity(DiagnosticCode::ValidationTypeMismatch, Severity::Error);

        errors
            .iter()
            .map(|error| {
                let expected = match &error.schema {
                    Value::String(tag) => tag.clone(),
                    other => other.to_string(),
                };
                let actual = if self.config.redact_sensitive_data {
                    "<redacted>".to_string()
                } else {
                    data.pointer(&error.instance_path)
                        .map(Data::describe)
                        .unwrap_or_else(|| "missing".to_string())
                };
                let at = if error.instance_path.is_empty() {
                    "/"
                } else {
                    error.instance_path.as_str()
                };

                Diagnostic::new(
                    DiagnosticCode::ValidationTypeMismatch,
                    severity,
                    format!("value at {} must be {}", at, expected),
                )
                .with_location(Location::new(&error.instance_path, &error.schema_path))
                .with_comparison(expected, actual)
            })
            .collect()
    }

    /// Render the validator as source
    pub fn source(&self) -> String {
        let mut head = Vec::new();
        for entry in self.scope.entries() {
            head.push(format!("const {} = {};", entry.name, entry.value.code));
        }

        let mut body = vec!["const errors = [];".to_string()];
        for check in &self.checks {
            let error = format!(
                "{{instancePath: {}, schemaPath: {}, keyword: {}}}",
                Value::from(check.instance_path.as_str()),
                Value::from(check.schema_path.as_str()),
                Value::from(check.keyword),
            );
            let action = if self.config.all_errors {
                format!("errors.push({});", error)
            } else {
                format!("return [{}];", error)
            };

            if check.data == self.root {
                body.push(format!("if ({}) {}", check.condition, action));
            } else {
                body.push(format!(
                    "const {} = {}{};",
                    check.data,
                    self.root,
                    access_path(&check.instance_path)
                ));
                body.push(format!(
                    "if ({} !== undefined && ({})) {}",
                    check.data, check.condition, action
                ));
            }
        }
        body.push("return errors;".to_string());

        let open = format!("function validate({}) {{", self.root);
        if self.config.code.lines {
            let mut lines = head;
            lines.push(open);
            lines.extend(body.into_iter().map(|line| format!("  {}", line)));
            lines.push("}".to_string());
            lines.join("\n") + "\n"
        } else {
            let mut parts = head;
            parts.push(open);
            parts.extend(body);
            parts.push("}".to_string());
            parts.join(" ")
        }
    }
}

/// Optional-chaining member access for a JSON Pointer
fn access_path(pointer: &str) -> String {
    pointer
        .split('/')
        .skip(1)
        .map(|token| {
            let token = token.replace("~1", "/").replace("~0", "~");
            format!("?.[{}]", Value::from(token))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::Compiler;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fields_validator(config: Config) -> Validator {
        let fields = json!({
            "age": {"type": "uint8"},
            "name": {"type": "string", "nullable": true},
            "seen": {"type": "timestamp"}
        });
        Compiler::new(config)
            .compile_fields(fields.as_object().unwrap())
            .unwrap()
    }

    #[test]
    fn validator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
    }

    #[test]
    fn collects_all_errors() {
        let validator = fields_validator(Config::default());
        let data = Data::from(json!({"age": 300, "name": 1, "seen": "yesterday"}));
        let errors = validator.validate(&data).unwrap();

        let paths: Vec<_> = errors.iter().map(|e| e.instance_path.as_str()).collect();
        assert_eq!(paths, ["/age", "/name", "/seen"]);
        assert_eq!(errors[0].schema_path, "/age/type");
        assert_eq!(errors[0].schema, json!("uint8"));
    }

    #[test]
    fn stops_at_first_error() {
        let config = Config { all_errors: false, ..Config::default() };
        let validator = fields_validator(config);
        let data = Data::from(json!({"age": -1, "name": 1}));
        assert_eq!(validator.validate(&data).unwrap().len(), 1);
    }

    #[test]
    fn missing_values_are_skipped() {
        let validator = fields_validator(Config::default());
        assert!(validator.is_valid(&Data::from(json!({}))).unwrap());
        assert!(validator.is_valid(&Data::from(json!("not an object"))).unwrap());
        assert!(validator
            .is_valid(&Data::from(json!({"age": 0, "name": null, "seen": "2024-01-01T00:00:00Z"})))
            .unwrap());
    }

    #[test]
    fn diagnostics_describe_values() {
        let validator = fields_validator(Config::default());
        let data = Data::from(json!({"age": 1.5}));
        let errors = validator.validate(&data).unwrap();
        let diags = validator.diagnostics(&errors, &data);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::ValidationTypeMismatch);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].message, "value at /age must be uint8");
        assert_eq!(diags[0].expected.as_deref(), Some("uint8"));
        assert_eq!(diags[0].actual.as_deref(), Some("1.5"));
    }

    #[test]
    fn diagnostics_honor_config() {
        let mut config = Config { redact_sensitive_data: true, ..Config::default() };
        config
            .severity
            .set_override(DiagnosticCode::ValidationTypeMismatch, Severity::Warn);
        let validator = fields_validator(config);
        let data = Data::from(json!({"name": "secret", "age": "secret"}));
        let errors = validator.validate(&data).unwrap();
        let diags = validator.diagnostics(&errors, &data);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warn);
        assert_eq!(diags[0].actual.as_deref(), Some("<redacted>"));
    }

    #[test]
    fn renders_root_source() {
        let validator = Compiler::default()
            .compile(&json!({"type": "boolean", "nullable": true}))
            .unwrap();
        assert_eq!(
            validator.source(),
            concat!(
                "function validate(data0) {\n",
                "  const errors = [];\n",
                "  if (typeof data0 !== \"boolean\" && data0 !== null) ",
                "errors.push({instancePath: \"\", schemaPath: \"/type\", keyword: \"type\"});\n",
                "  return errors;\n",
                "}\n",
            )
        );
    }

    #[test]
    fn renders_field_source_with_shared_helper() {
        let fields = json!({
            "a": {"type": "timestamp"},
            "b": {"type": "timestamp"}
        });
        let config = Config { all_errors: false, ..Config::default() };
        let validator = Compiler::new(config)
            .compile_fields(fields.as_object().unwrap())
            .unwrap();
        let source = validator.source();

        assert_eq!(source.matches("const func0 = ").count(), 1);
        assert!(source.starts_with("const func0 = require(\"jtdc/valid_date\").default;\n"));
        assert!(source.contains("  const data1 = data0?.[\"a\"];\n"));
        assert!(source.contains(
            "  if (data2 !== undefined && (!(data2 instanceof Date || (typeof data2 == \"string\" && func0(data2))))) return [{instancePath: \"/b\", schemaPath: \"/b/type\", keyword: \"type\"}];\n"
        ));
    }

    #[test]
    fn single_line_source() {
        let mut config = Config::default();
        config.code.lines = false;
        let validator = Compiler::new(config).compile(&json!({"type": "string"})).unwrap();
        assert!(!validator.source().contains('\n'));
    }

    #[test]
    fn access_paths() {
        assert_eq!(access_path("/a/0"), "?.[\"a\"]?.[\"0\"]");
        assert_eq!(access_path("/a~1b"), "?.[\"a/b\"]");
    }
}
