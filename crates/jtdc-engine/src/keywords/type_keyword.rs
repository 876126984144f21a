//! The `type` keyword
//!
//! Compiles a type tag into the condition under which a value violates it:
//!
//! - `boolean`, `string`: wrong runtime kind
//! - `timestamp`: neither a native date-time nor a string the shared
//!   date-time helper accepts
//! - `float32`, `float64`: not a number (NaN and infinities are numbers)
//! - integer tags: not a finite integer inside the tag's inclusive range
//!
//! With a sibling `nullable: true` the condition additionally requires the
//! value to be non-null.

use crate::codegen::{all, and, not, or, CmpOp, Code, Name};
use crate::context::{CodeGen, KeywordCxt};
use crate::keyword::{KeywordDefinition, MetaSchema, SchemaType};
use crate::scope::ScopeValue;
use jtdc_core::{valid_date_time, IntType, Kind, TypeTag};

/// Shared date-time helper, bound at most once per compilation
pub const VALID_DATE: ScopeValue = ScopeValue {
    key: "jtdc_core::date::valid_date_time",
    func: valid_date_time,
    code: "require(\"jtdc/valid_date\").default",
};

pub struct TypeKeyword;

impl KeywordDefinition for TypeKeyword {
    type Schema = TypeTag;
    const KEYWORD: &'static str = "type";

    fn schema_type() -> SchemaType {
        SchemaType::String
    }

    fn meta_schema() -> MetaSchema {
        MetaSchema::Enum(&TypeTag::NAMES)
    }

    fn code(cxt: &mut KeywordCxt<'_>, tag: &TypeTag) {
        let data = cxt.data.clone();
        let nullable = cxt.parent_flag("nullable");

        let cond = invalid_condition(cxt.gen, *tag, &data);
        let cond = if nullable {
            and(cond, Code::NotNull(data))
        } else {
            cond
        };

        tracing::debug!(
            tag = %tag,
            nullable,
            instance_path = cxt.instance_path,
            "compiled type keyword"
        );
        cxt.fail(cond);
    }
}

/// Condition under which `data` does not conform to `tag`
pub fn invalid_condition(gen: &mut CodeGen, tag: TypeTag, data: &Name) -> Code {
    match tag {
        TypeTag::Boolean => not(kind_is(data, Kind::Boolean)),
        TypeTag::String => not(kind_is(data, Kind::String)),
        TypeTag::Timestamp => {
            let valid_date = gen.scope_value("func", VALID_DATE);
            not(or(
                Code::IsDateTime(data.clone()),
                and(
                    kind_is(data, Kind::String),
                    Code::Call {
                        func: valid_date,
                        arg: data.clone(),
                    },
                ),
            ))
        }
        TypeTag::Float32 | TypeTag::Float64 => not(kind_is(data, Kind::Number)),
        TypeTag::Int8 => not_integer(data, IntType::Int8),
        TypeTag::Uint8 => not_integer(data, IntType::Uint8),
        TypeTag::Int16 => not_integer(data, IntType::Int16),
        TypeTag::Uint16 => not_integer(data, IntType::Uint16),
        TypeTag::Int32 => not_integer(data, IntType::Int32),
        TypeTag::Uint32 => not_integer(data, IntType::Uint32),
    }
}

fn kind_is(data: &Name, kind: Kind) -> Code {
    Code::KindIs {
        data: data.clone(),
        kind,
    }
}

fn not_integer(data: &Name, int_type: IntType) -> Code {
    let range = int_type.range();
    not(all([
        kind_is(data, Kind::Number),
        Code::IsFinite(data.clone()),
        Code::Compare {
            data: data.clone(),
            op: CmpOp::Ge,
            bound: range.min,
        },
        Code::Compare {
            data: data.clone(),
            op: CmpOp::Le,
            bound: range.max,
        },
        Code::IsIntegral(data.clone()),
    ]))
}
