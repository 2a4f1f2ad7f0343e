//! Value linking modifier `all`.

use super::{ListModifier, ModifierContext, Transformed, ValueShape};
use crate::detection::ValueLinking;
use crate::error::Result;
use crate::types::SigmaValue;

/// `all`: every value of the detection item must match.
///
/// Leaves the values untouched and asks the chain runner to link them with
/// AND instead of the default OR.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllModifier;

impl ListModifier for AllModifier {
    const IDENTIFIER: &'static str = "all";
    const SHAPE: ValueShape = ValueShape::Sequence(&ValueShape::Any);

    fn modify(&self, _ctx: &ModifierContext<'_>, values: Vec<SigmaValue>) -> Result<Transformed> {
        Ok(values.into())
    }

    fn linking(&self) -> Option<ValueLinking> {
        Some(ValueLinking::And)
    }
}
