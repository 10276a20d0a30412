//! Caller arguments
//!
//! Heuristic parsing of the loosely-typed `INPUT` list into tagged values, and
//! the Java runtime type each value carries into method resolution.

pub mod parser;

pub use parser::parse;

use crate::resolve::java_type::{JavaType, Primitive, DOUBLE, INTEGER, LONG, STRING};

/// One typed value produced from a single comma-delimited segment.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedArgument {
    Integer(i64),
    Float(f64),
    Str(String),
    IntegerArray(Vec<i64>),
    StringArray(Vec<String>),
}

fn fits_int(value: i64) -> bool {
    i32::try_from(value).is_ok()
}

impl ParsedArgument {
    /// Runtime type the value has once handed to the JVM.
    ///
    /// Integers outside the 32-bit range become `Long` (or `long[]`).
    pub fn java_type(&self) -> JavaType {
        match self {
            ParsedArgument::Integer(v) if fits_int(*v) => JavaType::class(INTEGER),
            ParsedArgument::Integer(_) => JavaType::class(LONG),
            ParsedArgument::Float(_) => JavaType::class(DOUBLE),
            ParsedArgument::Str(_) => JavaType::class(STRING),
            ParsedArgument::IntegerArray(values) if values.iter().copied().all(fits_int) => {
                JavaType::array_of(JavaType::Primitive(Primitive::Int))
            }
            ParsedArgument::IntegerArray(_) => {
                JavaType::array_of(JavaType::Primitive(Primitive::Long))
            }
            ParsedArgument::StringArray(_) => JavaType::array_of(JavaType::class(STRING)),
        }
    }
}
