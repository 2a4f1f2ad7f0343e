//! Wildcard, placeholder and regular expression modifiers for string values.

use super::{expect_string, ModifierContext, Transformed, ValueModifier, ValueShape};
use crate::error::{ModifierError, Result};
use crate::types::{SigmaRegularExpression, SigmaValue, ValueKind};

const STRING: ValueShape = ValueShape::Plain(ValueKind::String);

/// `contains`: wrap the value in multi-character wildcards.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContainsModifier;

impl ValueModifier for ContainsModifier {
    const IDENTIFIER: &'static str = "contains";
    const SHAPE: ValueShape = STRING;

    fn modify(&self, _ctx: &ModifierContext<'_>, value: SigmaValue) -> Result<Transformed> {
        let mut s = expect_string(Self::IDENTIFIER, value)?;
        if !s.starts_with_wildcard() {
            s = s.prepend_wildcard();
        }
        if !s.ends_with_wildcard() {
            s = s.append_wildcard();
        }
        Ok(SigmaValue::String(s).into())
    }
}

/// `startswith`: append a trailing wildcard.
#[derive(Debug, Default, Clone, Copy)]
pub struct StartswithModifier;

impl ValueModifier for StartswithModifier {
    const IDENTIFIER: &'static str = "startswith";
    const SHAPE: ValueShape = STRING;

    fn modify(&self, _ctx: &ModifierContext<'_>, value: SigmaValue) -> Result<Transformed> {
        let s = expect_string(Self::IDENTIFIER, value)?;
        let s = if s.ends_with_wildcard() {
            s
        } else {
            s.append_wildcard()
        };
        Ok(SigmaValue::String(s).into())
    }
}

/// `endswith`: prepend a leading wildcard.
#[derive(Debug, Default, Clone, Copy)]
pub struct EndswithModifier;

impl ValueModifier for EndswithModifier {
    const IDENTIFIER: &'static str = "endswith";
    const SHAPE: ValueShape = STRING;

    fn modify(&self, _ctx: &ModifierContext<'_>, value: SigmaValue) -> Result<Transformed> {
        let s = expect_string(Self::IDENTIFIER, value)?;
        let s = if s.starts_with_wildcard() {
            s
        } else {
            s.prepend_wildcard()
        };
        Ok(SigmaValue::String(s).into())
    }
}

/// `re`: treat the value as a regular expression.
///
/// Only valid on unmodified values, i.e. as the first modifier of a chain.
/// The pattern is taken from the text the rule author wrote, before wildcard
/// parsing.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegularExpressionModifier;

impl ValueModifier for RegularExpressionModifier {
    const IDENTIFIER: &'static str = "re";
    const SHAPE: ValueShape = STRING;

    fn modify(&self, ctx: &ModifierContext<'_>, value: SigmaValue) -> Result<Transformed> {
        if !ctx.is_first() {
            return Err(ModifierError::value_constraint(
                Self::IDENTIFIER,
                format!(
                    "regular expression modifier only applicable to unmodified values, \
                     applied after '{}'",
                    ctx.applied_identifiers().join("|")
                ),
            ));
        }
        let s = expect_string(Self::IDENTIFIER, value)?;
        let regex = SigmaRegularExpression::new(s.original())?;
        Ok(SigmaValue::Regex(regex).into())
    }
}

/// `expand`: mark `%name%` tokens as placeholders for a later pipeline stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpandModifier;

impl ValueModifier for ExpandModifier {
    const IDENTIFIER: &'static str = "expand";
    const SHAPE: ValueShape = STRING;

    fn modify(&self, _ctx: &ModifierContext<'_>, value: SigmaValue) -> Result<Transformed> {
        let s = expect_string(Self::IDENTIFIER, value)?;
        Ok(SigmaValue::String(s.insert_placeholders()?).into())
    }
}
