//! Keyword implementations

pub mod type_keyword;

pub use type_keyword::{TypeKeyword, VALID_DATE};
