//! Value types consumed and produced by the modifier pipeline.

pub mod string;
pub mod value;

pub use string::{Placeholder, SigmaString, SpecialChar, StringPart};
pub use value::{
    CompareOperator, SigmaCompareExpression, SigmaNumber, SigmaRegularExpression, SigmaValue,
    ValueKind,
};
