//! Detection items: raw values, their modifier chain and value linking.

use crate::chain::ModifierChain;
use crate::config::ModifierConfig;
use crate::error::Result;
use crate::types::SigmaValue;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How the values of one detection item are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValueLinking {
    /// Any value may match (SIGMA default).
    #[default]
    Or,
    /// Every value must match (`all` modifier).
    And,
}

impl fmt::Display for ValueLinking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueLinking::Or => f.write_str("or"),
            ValueLinking::And => f.write_str("and"),
        }
    }
}

/// One field/value matching unit of a detection.
///
/// The chain is applied once with [`DetectionItem::apply_modifiers`]. Until
/// then [`values`](DetectionItem::values) returns the raw values. A failed
/// application leaves the item exactly as it was.
#[derive(Debug)]
pub struct DetectionItem {
    field: Option<String>,
    modifiers: ModifierChain,
    original_values: Vec<SigmaValue>,
    values: Vec<SigmaValue>,
    value_linking: ValueLinking,
    applied: bool,
}

impl DetectionItem {
    pub fn new(field: Option<String>, modifiers: ModifierChain, values: Vec<SigmaValue>) -> Self {
        Self {
            field,
            modifiers,
            original_values: values.clone(),
            values,
            value_linking: ValueLinking::default(),
            applied: false,
        }
    }

    /// Build an item from a detection key such as `CommandLine|contains|all`.
    ///
    /// An empty field part (`|re`) yields a keyless item.
    pub fn from_key(key: &str, values: Vec<SigmaValue>) -> Result<Self> {
        let mut tokens = key.split('|');
        let field = tokens
            .next()
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        let identifiers: Vec<&str> = tokens.collect();
        let modifiers = ModifierChain::from_identifiers(&identifiers)?;
        Ok(Self::new(field, modifiers, values))
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn modifiers(&self) -> &ModifierChain {
        &self.modifiers
    }

    pub fn original_values(&self) -> &[SigmaValue] {
        &self.original_values
    }

    pub fn values(&self) -> &[SigmaValue] {
        &self.values
    }

    pub fn value_linking(&self) -> ValueLinking {
        self.value_linking
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn apply_modifiers(&mut self) -> Result<()> {
        self.apply_modifiers_with(&ModifierConfig::default())
    }

    /// Run the modifier chain over the raw values and commit the result.
    ///
    /// Calling this again after a successful application is a no-op.
    pub fn apply_modifiers_with(&mut self, config: &ModifierConfig) -> Result<()> {
        if self.applied {
            debug!(field = ?self.field, "modifiers already applied");
            return Ok(());
        }

        let output = self
            .modifiers
            .apply_with_config(self.original_values.clone(), config)?;

        self.values = output.values;
        if let Some(linking) = output.linking {
            self.value_linking = linking;
        }
        self.applied = true;

        debug!(
            field = ?self.field,
            modifiers = ?self.modifiers.identifiers(),
            values = self.values.len(),
            linking = %self.value_linking,
            "applied modifier chain"
        );
        Ok(())
    }
}

/// Apply the chains of many independent detection items.
///
/// Items are processed in parallel once the batch reaches
/// `config.parallel_threshold`. Results are returned in item order and a
/// failing item never affects the others.
pub fn apply_all(items: &mut [DetectionItem], config: &ModifierConfig) -> Vec<Result<()>> {
    if items.len() >= config.parallel_threshold {
        debug!(items = items.len(), "applying modifier chains in parallel");
        items
            .par_iter_mut()
            .map(|item| item.apply_modifiers_with(config))
            .collect()
    } else {
        items
            .iter_mut()
            .map(|item| item.apply_modifiers_with(config))
            .collect()
    }
}
