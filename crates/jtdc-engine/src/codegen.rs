//! Predicate expressions emitted by keywords
//!
//! A `Code` value is both the artifact the compiler emits (rendered as
//! JavaScript-flavoured source by its `Display` impl) and the program the
//! validator evaluates. Keywords build them with the `and`/`or`/`not` helpers,
//! which keep the tree flat so rendering needs no redundant parentheses.

use jtdc_core::Kind;
use std::fmt;
use std::sync::Arc;

/// An identifier in generated code (`data0`, `func0`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    pub(crate) fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric comparison against an integer bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// `>=`
    Ge,
    /// `<=`
    Le,
}

impl CmpOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ge => ">=",
            Self::Le => "<=",
        }
    }
}

/// Boolean expression over named data values
#[derive(Debug, Clone, PartialEq)]
pub enum Code {
    /// Constant
    Bool(bool),

    /// `typeof data == "kind"`
    KindIs { data: Name, kind: Kind },

    /// `data instanceof Date`
    IsDateTime(Name),

    /// `isFinite(data)`
    IsFinite(Name),

    /// `data >= bound`, `data <= bound`
    Compare { data: Name, op: CmpOp, bound: i64 },

    /// `!(data % 1)`
    IsIntegral(Name),

    /// `data !== null`
    NotNull(Name),

    /// `func(arg)` where `func` is a scope binding
    Call { func: Name, arg: Name },

    Not(Box<Code>),
    And(Vec<Code>),
    Or(Vec<Code>),
}

/// Conjunction of two conditions
pub fn and(left: Code, right: Code) -> Code {
    all([left, right])
}

/// Disjunction of two conditions
pub fn or(left: Code, right: Code) -> Code {
    any([left, right])
}

/// Conjunction of any number of conditions (`true` when empty)
pub fn all(items: impl IntoIterator<Item = Code>) -> Code {
    let mut flat = Vec::new();
    for item in items {
        match item {
            Code::And(inner) => flat.extend(inner),
            Code::Bool(true) => {}
            other => flat.push(other),
        }
    }
    match flat.len() {
        0 => Code::Bool(true),
        1 => flat.remove(0),
        _ => Code::And(flat),
    }
}

/// Disjunction of any number of conditions (`false` when empty)
pub fn any(items: impl IntoIterator<Item = Code>) -> Code {
    let mut flat = Vec::new();
    for item in items {
        match item {
            Code::Or(inner) => flat.extend(inner),
            Code::Bool(false) => {}
            other => flat.push(other),
        }
    }
    match flat.len() {
        0 => Code::Bool(false),
        1 => flat.remove(0),
        _ => Code::Or(flat),
    }
}

/// Negation, folding constants and double negation
pub fn not(code: Code) -> Code {
    match code {
        Code::Bool(b) => Code::Bool(!b),
        Code::Not(inner) => *inner,
        other => Code::Not(Box::new(other)),
    }
}

impl Code {
    fn is_compound(&self) -> bool {
        matches!(self, Self::And(_) | Self::Or(_))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::KindIs { data, kind } => write!(f, "typeof {} == \"{}\"", data, kind),
            Self::IsDateTime(data) => write!(f, "{} instanceof Date", data),
            Self::IsFinite(data) => write!(f, "isFinite({})", data),
            Self::Compare { data, op, bound } => write!(f, "{} {} {}", data, op.as_str(), bound),
            Self::IsIntegral(data) => write!(f, "!({} % 1)", data),
            Self::NotNull(data) => write!(f, "{} !== null", data),
            Self::Call { func, arg } => write!(f, "{}({})", func, arg),
            Self::Not(inner) => match inner.as_ref() {
                Self::KindIs { data, kind } => write!(f, "typeof {} !== \"{}\"", data, kind),
                Self::NotNull(data) => write!(f, "{} === null", data),
                Self::Bool(_) | Self::IsFinite(_) | Self::Call { .. } | Self::IsIntegral(_) => {
                    write!(f, "!{}", inner)
                }
                _ => write!(f, "!({})", inner),
            },
            Self::And(items) => write_joined(f, items, " && "),
            Self::Or(items) => write_joined(f, items, " || "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Code], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        if item.is_compound() {
            write!(f, "({})", item)?;
        } else {
            write!(f, "{}", item)?;
        }
    }
    Ok(())
}
