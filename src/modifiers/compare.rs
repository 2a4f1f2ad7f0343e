//! Numeric comparison modifiers: `lt`, `lte`, `gt`, `gte`.

use super::{ModifierContext, Transformed, ValueModifier, ValueShape};
use crate::error::{ModifierError, Result};
use crate::types::{CompareOperator, SigmaCompareExpression, SigmaValue, ValueKind};

const NUMBER: ValueShape = ValueShape::Plain(ValueKind::Number);

fn compare(modifier: &str, value: SigmaValue, op: CompareOperator) -> Result<Transformed> {
    match value {
        SigmaValue::Number(number) => {
            Ok(SigmaValue::Compare(SigmaCompareExpression::new(number, op)).into())
        }
        other => Err(ModifierError::type_mismatch(modifier, other)),
    }
}

/// `lt`: match numbers strictly below the value.
#[derive(Debug, Default, Clone, Copy)]
pub struct LessThanModifier;

impl ValueModifier for LessThanModifier {
    const IDENTIFIER: &'static str = "lt";
    const SHAPE: ValueShape = NUMBER;

    fn modify(&self, _ctx: &ModifierContext<'_>, value: SigmaValue) -> Result<Transformed> {
        compare(Self::IDENTIFIER, value, CompareOperator::Lt)
    }
}

/// `lte`: match numbers at or below the value.
#[derive(Debug, Default, Clone, Copy)]
pub struct LessThanEqualModifier;

impl ValueModifier for LessThanEqualModifier {
    const IDENTIFIER: &'static str = "lte";
    const SHAPE: ValueShape = NUMBER;

    fn modify(&self, _ctx: &ModifierContext<'_>, value: SigmaValue) -> Result<Transformed> {
        compare(Self::IDENTIFIER, value, CompareOperator::Lte)
    }
}

/// `gt`: match numbers strictly above the value.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreaterThanModifier;

impl ValueModifier for GreaterThanModifier {
    const IDENTIFIER: &'static str = "gt";
    const SHAPE: ValueShape = NUMBER;

    fn modify(&self, _ctx: &ModifierContext<'_>, value: SigmaValue) -> Result<Transformed> {
        compare(Self::IDENTIFIER, value, CompareOperator::Gt)
    }
}

/// `gte`: match numbers at or above the value.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreaterThanEqualModifier;

impl ValueModifier for GreaterThanEqualModifier {
    const IDENTIFIER: &'static str = "gte";
    const SHAPE: ValueShape = NUMBER;

    fn modify(&self, _ctx: &ModifierContext<'_>, value: SigmaValue) -> Result<Transformed> {
        compare(Self::IDENTIFIER, value, CompareOperator::Gte)
    }
}
