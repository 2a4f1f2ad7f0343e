//! Value modifiers for SIGMA detection items.
//!
//! A modifier is a named transformation applied to the values of a detection
//! item before they reach the condition evaluator, e.g. `contains`, `base64`
//! or `gte`. Every modifier implements the [`Modifier`] capability:
//!
//! 1. **Type check**: the incoming values are matched against the modifier's
//!    declared [`ValueShape`]. A mismatch raises
//!    [`ModifierError::TypeMismatch`].
//! 2. **Transform**: the modifier-specific logic runs and may fail with
//!    [`ModifierError::ValueConstraint`] when the value content is unsuitable.
//! 3. **Normalize**: single results become one-element lists so every step of
//!    a chain is list-in, list-out.
//!
//! Concrete modifiers are written against one of two narrower traits:
//! [`ValueModifier`] handles one value at a time and is adapted with
//! [`PerValue`]; [`ListModifier`] sees the whole value list and is adapted
//! with [`PerGroup`]. The chain runner only ever talks to [`Modifier`].

pub mod compare;
pub mod encoding;
pub mod linking;
pub mod string;

use crate::detection::ValueLinking;
use crate::error::{ModifierError, Result};
use crate::types::{SigmaValue, ValueKind};
use std::fmt;
use tracing::trace;

pub use compare::{
    GreaterThanEqualModifier, GreaterThanModifier, LessThanEqualModifier, LessThanModifier,
};
pub use encoding::{Base64Modifier, Base64OffsetModifier, WideModifier};
pub use linking::AllModifier;
pub use string::{
    ContainsModifier, EndswithModifier, ExpandModifier, RegularExpressionModifier,
    StartswithModifier,
};

/// Input shape a modifier accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Any single value.
    Any,
    /// Exactly one value variant.
    Plain(ValueKind),
    /// One of several value variants.
    Union(&'static [ValueKind]),
    /// An ordered list whose every element matches the inner shape.
    Sequence(&'static ValueShape),
}

impl ValueShape {
    /// Check a single value against this shape.
    pub fn accepts(&self, value: &SigmaValue) -> bool {
        match self {
            ValueShape::Any => true,
            ValueShape::Plain(kind) => value.kind() == *kind,
            ValueShape::Union(kinds) => kinds.contains(&value.kind()),
            ValueShape::Sequence(_) => false,
        }
    }

    /// Check a whole value list. Only sequence shapes accept lists; each
    /// element is checked against the element shape.
    pub fn accepts_list(&self, values: &[SigmaValue]) -> bool {
        match self {
            ValueShape::Sequence(inner) => values.iter().all(|v| inner.accepts(v)),
            _ => false,
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Any => f.write_str("any"),
            ValueShape::Plain(kind) => write!(f, "{kind}"),
            ValueShape::Union(kinds) => {
                let names: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
                f.write_str(&names.join(" | "))
            }
            ValueShape::Sequence(inner) => write!(f, "sequence of {inner}"),
        }
    }
}

/// Read-only view of the chain position a modifier is applied at.
#[derive(Debug, Clone, Copy)]
pub struct ModifierContext<'a> {
    applied: &'a [Box<dyn Modifier>],
}

impl<'a> ModifierContext<'a> {
    /// `applied` holds the modifiers that ran before the current one.
    pub fn new(applied: &'a [Box<dyn Modifier>]) -> Self {
        Self { applied }
    }

    pub fn applied(&self) -> &'a [Box<dyn Modifier>] {
        self.applied
    }

    pub fn applied_identifiers(&self) -> Vec<&'static str> {
        self.applied.iter().map(|m| m.identifier()).collect()
    }

    pub fn is_first(&self) -> bool {
        self.applied.is_empty()
    }
}

impl Default for ModifierContext<'_> {
    fn default() -> Self {
        Self { applied: &[] }
    }
}

/// Result of one modifier step.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierOutput {
    pub values: Vec<SigmaValue>,
    /// Requested change of the detection item's value linking.
    pub linking: Option<ValueLinking>,
}

/// Raw transformation result before list normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed {
    One(SigmaValue),
    Many(Vec<SigmaValue>),
}

impl Transformed {
    pub fn into_values(self) -> Vec<SigmaValue> {
        match self {
            Transformed::One(value) => vec![value],
            Transformed::Many(values) => values,
        }
    }
}

impl From<SigmaValue> for Transformed {
    fn from(value: SigmaValue) -> Self {
        Transformed::One(value)
    }
}

impl From<Vec<SigmaValue>> for Transformed {
    fn from(values: Vec<SigmaValue>) -> Self {
        Transformed::Many(values)
    }
}

/// Capability shared by every modifier in a chain.
pub trait Modifier: fmt::Debug + Send + Sync {
    /// Registry identifier, e.g. `"contains"`.
    fn identifier(&self) -> &'static str;

    fn input_shape(&self) -> ValueShape;

    /// Type-check, transform and normalize the current value list.
    fn apply(&self, ctx: &ModifierContext<'_>, values: Vec<SigmaValue>)
        -> Result<ModifierOutput>;
}

/// Modifier operating on each value of a detection item separately.
pub trait ValueModifier: fmt::Debug + Send + Sync {
    const IDENTIFIER: &'static str;
    const SHAPE: ValueShape;

    fn modify(&self, ctx: &ModifierContext<'_>, value: SigmaValue) -> Result<Transformed>;
}

/// Modifier operating on all values of a detection item as a whole.
pub trait ListModifier: fmt::Debug + Send + Sync {
    const IDENTIFIER: &'static str;
    /// Must be a [`ValueShape::Sequence`].
    const SHAPE: ValueShape;

    fn modify(&self, ctx: &ModifierContext<'_>, values: Vec<SigmaValue>) -> Result<Transformed>;

    fn linking(&self) -> Option<ValueLinking> {
        None
    }
}

/// Adapter spreading a [`ValueModifier`] over every value of the list.
#[derive(Debug, Default, Clone, Copy)]
pub struct PerValue<M>(pub M);

impl<M: ValueModifier> Modifier for PerValue<M> {
    fn identifier(&self) -> &'static str {
        M::IDENTIFIER
    }

    fn input_shape(&self) -> ValueShape {
        M::SHAPE
    }

    fn apply(
        &self,
        ctx: &ModifierContext<'_>,
        values: Vec<SigmaValue>,
    ) -> Result<ModifierOutput> {
        if let Some(bad) = values.iter().find(|v| !M::SHAPE.accepts(v)) {
            return Err(ModifierError::type_mismatch(M::IDENTIFIER, bad));
        }

        let mut out = Vec::with_capacity(values.len());
        for value in values {
            let transformed = self.0.modify(ctx, value)?.into_values();
            trace!(
                modifier = M::IDENTIFIER,
                produced = transformed.len(),
                "transformed value"
            );
            out.extend(transformed);
        }

        Ok(ModifierOutput {
            values: out,
            linking: None,
        })
    }
}

/// Adapter handing the whole value list to a [`ListModifier`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PerGroup<M>(pub M);

impl<M: ListModifier> Modifier for PerGroup<M> {
    fn identifier(&self) -> &'static str {
        M::IDENTIFIER
    }

    fn input_shape(&self) -> ValueShape {
        M::SHAPE
    }

    fn apply(
        &self,
        ctx: &ModifierContext<'_>,
        values: Vec<SigmaValue>,
    ) -> Result<ModifierOutput> {
        if !M::SHAPE.accepts_list(&values) {
            let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            return Err(ModifierError::type_mismatch(
                M::IDENTIFIER,
                format!("[{}]", rendered.join(", ")),
            ));
        }

        Ok(ModifierOutput {
            values: self.0.modify(ctx, values)?.into_values(),
            linking: self.0.linking(),
        })
    }
}

/// Extract the string payload of a value already accepted by a string shape.
pub(crate) fn expect_string(
    modifier: &str,
    value: SigmaValue,
) -> Result<crate::types::SigmaString> {
    match value {
        SigmaValue::String(s) => Ok(s),
        other => Err(ModifierError::type_mismatch(modifier, other)),
    }
}
