//! Typed detection values: numbers, regular expressions, comparison
//! expressions and the [`SigmaValue`] union the modifier pipeline folds over.

use crate::error::{ModifierError, Result};
use crate::types::SigmaString;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Variant tag of a [`SigmaValue`], used by modifier input shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueKind {
    String,
    Number,
    Regex,
    Compare,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Regex => "regular expression",
            ValueKind::Compare => "comparison expression",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SigmaNumber {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for SigmaNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigmaNumber::Integer(i) => write!(f, "{i}"),
            SigmaNumber::Float(x) => write!(f, "{x}"),
        }
    }
}

/// Regular expression value produced by the `re` modifier.
///
/// The pattern is checked with `regex` on construction so invalid expressions
/// are reported while the rule is loaded rather than at match time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigmaRegularExpression {
    pattern: String,
}

impl SigmaRegularExpression {
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        Regex::new(&pattern).map_err(|e| ModifierError::InvalidRegex {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for SigmaRegularExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompareOperator {
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOperator::Lt => "<",
            CompareOperator::Lte => "<=",
            CompareOperator::Gt => ">",
            CompareOperator::Gte => ">=",
        }
    }
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A number paired with a relational operator for numeric matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SigmaCompareExpression {
    pub number: SigmaNumber,
    pub op: CompareOperator,
}

impl SigmaCompareExpression {
    pub fn new(number: SigmaNumber, op: CompareOperator) -> Self {
        Self { number, op }
    }
}

impl fmt::Display for SigmaCompareExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.number)
    }
}

/// A typed value attached to a detection item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SigmaValue {
    String(SigmaString),
    Number(SigmaNumber),
    Regex(SigmaRegularExpression),
    Compare(SigmaCompareExpression),
}

impl SigmaValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            SigmaValue::String(_) => ValueKind::String,
            SigmaValue::Number(_) => ValueKind::Number,
            SigmaValue::Regex(_) => ValueKind::Regex,
            SigmaValue::Compare(_) => ValueKind::Compare,
        }
    }

    pub fn as_string(&self) -> Option<&SigmaString> {
        match self {
            SigmaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<SigmaNumber> {
        match self {
            SigmaValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Convert a scalar YAML value as found in a rule's detection section.
    pub fn from_yaml(value: &serde_yaml::Value) -> Result<Self> {
        match value {
            serde_yaml::Value::String(s) => Ok(SigmaValue::String(SigmaString::new(s))),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(SigmaValue::Number(SigmaNumber::Integer(i)))
                } else if let Some(f) = n.as_f64() {
                    Ok(SigmaValue::Number(SigmaNumber::Float(f)))
                } else {
                    Err(ModifierError::InvalidValue(format!(
                        "number out of range: {n}"
                    )))
                }
            }
            serde_yaml::Value::Bool(b) => {
                Ok(SigmaValue::String(SigmaString::new(&b.to_string())))
            }
            other => Err(ModifierError::InvalidValue(format!(
                "unsupported detection value: {other:?}"
            ))),
        }
    }

    /// Convert a YAML scalar or sequence of scalars into a value list.
    pub fn from_yaml_list(value: &serde_yaml::Value) -> Result<Vec<Self>> {
        match value {
            serde_yaml::Value::Sequence(items) => items.iter().map(Self::from_yaml).collect(),
            scalar => Ok(vec![Self::from_yaml(scalar)?]),
        }
    }
}

impl fmt::Display for SigmaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigmaValue::String(s) => write!(f, "{s}"),
            SigmaValue::Number(n) => write!(f, "{n}"),
            SigmaValue::Regex(r) => write!(f, "{r}"),
            SigmaValue::Compare(c) => write!(f, "{c}"),
        }
    }
}

impl From<SigmaString> for SigmaValue {
    fn from(s: SigmaString) -> Self {
        SigmaValue::String(s)
    }
}

impl From<&str> for SigmaValue {
    fn from(s: &str) -> Self {
        SigmaValue::String(SigmaString::new(s))
    }
}

impl From<String> for SigmaValue {
    fn from(s: String) -> Self {
        SigmaValue::String(SigmaString::new(&s))
    }
}

impl From<i64> for SigmaValue {
    fn from(i: i64) -> Self {
        SigmaValue::Number(SigmaNumber::Integer(i))
    }
}

impl From<f64> for SigmaValue {
    fn from(f: f64) -> Self {
        SigmaValue::Number(SigmaNumber::Float(f))
    }
}
