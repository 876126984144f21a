//! Evaluating compiled conditions against data

use crate::codegen::{CmpOp, Code, Name};
use crate::error::EvalError;
use crate::scope::Scope;
use jtdc_core::{Data, Kind};
use std::collections::HashMap;

/// Bindings visible while evaluating a condition
pub struct Env<'a> {
    scope: &'a Scope,
    data: HashMap<Name, &'a Data>,
}

impl<'a> Env<'a> {
    pub fn new(scope: &'a Scope) -> Self {
        Self {
            scope,
            data: HashMap::new(),
        }
    }

    /// Bind a data name to a value
    pub fn bind(&mut self, name: Name, value: &'a Data) {
        self.data.insert(name, value);
    }

    fn lookup(&self, name: &Name) -> Result<&'a Data, EvalError> {
        self.data
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UnboundData(name.clone()))
    }
}

impl Code {
    /// Evaluate with short-circuiting `&&` and `||`
    pub fn evaluate(&self, env: &Env<'_>) -> Result<bool, EvalError> {
        Ok(match self {
            Self::Bool(b) => *b,
            Self::KindIs { data, kind } => env.lookup(data)?.kind() == *kind,
            Self::IsDateTime(data) => env.lookup(data)?.kind() == Kind::DateTime,
            Self::IsFinite(data) => env.lookup(data)?.as_f64().is_some_and(f64::is_finite),
            Self::Compare { data, op, bound } => {
                let bound = *bound as f64;
                match env.lookup(data)?.as_f64() {
                    Some(n) => match op {
                        CmpOp::Ge => n >= bound,
                        CmpOp::Le => n <= bound,
                    },
                    None => false,
                }
            }
            Self::IsIntegral(data) => env
                .lookup(data)?
                .as_f64()
                .is_some_and(|n| n.is_finite() && n % 1.0 == 0.0),
            Self::NotNull(data) => !env.lookup(data)?.is_null(),
            Self::Call { func, arg } => {
                let helper = env
                    .scope
                    .get(func)
                    .ok_or_else(|| EvalError::UnknownHelper(func.clone()))?;
                // helpers only accept strings; anything else fails them
                env.lookup(arg)?.as_str().is_some_and(helper.func)
            }
            Self::Not(inner) => !inner.evaluate(env)?,
            Self::And(items) => {
                for item in items {
                    if !item.evaluate(env)? {
                        return Ok(false);
                    }
                }
                true
            }
            Self::Or(items) => {
                for item in items {
                    if item.evaluate(env)? {
                        return Ok(true);
                    }
                }
                false
            }
        })
    }
}
