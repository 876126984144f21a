//! Type tags and the integer range table

use serde::{Deserialize, Serialize};

/// Primitive type tag accepted by the `type` keyword
///
/// The set is closed: any other string is rejected by the meta-schema
/// check before a keyword ever sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// `true` or `false`
    Boolean,

    /// Any string, including the empty string
    String,

    /// A native date-time, or a string holding an RFC 3339 date-time
    Timestamp,

    /// Any number (no width check)
    Float32,

    /// Any number (no width check)
    Float64,

    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
}

impl TypeTag {
    /// Every legal tag, in meta-schema order
    pub const ALL: [TypeTag; 11] = [
        TypeTag::Boolean,
        TypeTag::Timestamp,
        TypeTag::String,
        TypeTag::Float32,
        TypeTag::Float64,
        TypeTag::Int8,
        TypeTag::Uint8,
        TypeTag::Int16,
        TypeTag::Uint16,
        TypeTag::Int32,
        TypeTag::Uint32,
    ];

    /// Tag names as they appear in schemas, in meta-schema order
    pub const NAMES: [&'static str; 11] = [
        "boolean",
        "timestamp",
        "string",
        "float32",
        "float64",
        "int8",
        "uint8",
        "int16",
        "uint16",
        "int32",
        "uint32",
    ];

    /// Get the tag as it is spelled in a schema
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Timestamp => "timestamp",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
        }
    }

    /// The fixed-width integer type behind this tag, if any
    pub fn int_type(&self) -> Option<IntType> {
        match self {
            Self::Int8 => Some(IntType::Int8),
            Self::Uint8 => Some(IntType::Uint8),
            Self::Int16 => Some(IntType::Int16),
            Self::Uint16 => Some(IntType::Uint16),
            Self::Int32 => Some(IntType::Int32),
            Self::Uint32 => Some(IntType::Uint32),
            Self::Boolean | Self::String | Self::Timestamp | Self::Float32 | Self::Float64 => None,
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TypeTag {
    type Err = UnknownTypeTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownTypeTag(s.to_string()))
    }
}

/// A string that names none of the legal type tags
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown type tag '{0}'")]
pub struct UnknownTypeTag(pub String);

/// Fixed-width integer types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
}

impl IntType {
    pub const ALL: [IntType; 6] = [
        IntType::Int8,
        IntType::Uint8,
        IntType::Int16,
        IntType::Uint16,
        IntType::Int32,
        IntType::Uint32,
    ];

    /// Inclusive range of representable values
    pub const fn range(self) -> IntRange {
        match self {
            Self::Int8 => IntRange::new(i8::MIN as i64, i8::MAX as i64),
            Self::Uint8 => IntRange::new(0, u8::MAX as i64),
            Self::Int16 => IntRange::new(i16::MIN as i64, i16::MAX as i64),
            Self::Uint16 => IntRange::new(0, u16::MAX as i64),
            Self::Int32 => IntRange::new(i32::MIN as i64, i32::MAX as i64),
            Self::Uint32 => IntRange::new(0, u32::MAX as i64),
        }
    }

    /// The type tag spelling this integer type
    pub fn tag(self) -> TypeTag {
        match self {
            Self::Int8 => TypeTag::Int8,
            Self::Uint8 => TypeTag::Uint8,
            Self::Int16 => TypeTag::Int16,
            Self::Uint16 => TypeTag::Uint16,
            Self::Int32 => TypeTag::Int32,
            Self::Uint32 => TypeTag::Uint32,
        }
    }
}

/// Inclusive `[min, max]` bounds of an integer type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Check whether a number is an integer within the bounds
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite()
            && value >= self.min as f64
            && value <= self.max as f64
            && value % 1.0 == 0.0
    }
}

impl std::fmt::Display for IntRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// A schema node of the type form: `{"type": ..., "nullable": ...}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeSchema {
    /// Declared type tag
    #[serde(rename = "type")]
    pub type_tag: TypeTag,

    /// Whether `null` is accepted in addition to the tag's values
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
}

impl TypeSchema {
    /// Create a non-nullable node
    pub fn new(type_tag: TypeTag) -> Self {
        Self {
            type_tag,
            nullable: false,
        }
    }

    /// Set nullability
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Render as a JSON schema node
    pub fn to_value(&self) -> serde_json::Value {
        let mut node = serde_json::Map::new();
        node.insert("type".to_string(), self.type_tag.as_str().into());
        if self.nullable {
            node.insert("nullable".to_string(), true.into());
        }
        serde_json::Value::Object(node)
    }
}
