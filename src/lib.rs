//! # SIGMA Value Modifiers
//!
//! The value-modifier pipeline of a [SIGMA](https://github.com/SigmaHQ/sigma)
//! rule front end. Detection items carry raw values and an ordered chain of
//! modifiers such as `contains`, `base64offset` or `gte`; applying the chain
//! turns the raw values into the values the condition evaluator matches on.
//!
//! ## Quick Start
//!
//! ```rust
//! use sigma_modifiers::{DetectionItem, SigmaValue, ValueLinking};
//!
//! let mut item = DetectionItem::from_key(
//!     "CommandLine|contains|all",
//!     vec![SigmaValue::from("powershell"), SigmaValue::from("-enc")],
//! )?;
//! item.apply_modifiers()?;
//!
//! let values: Vec<String> = item.values().iter().map(|v| v.to_string()).collect();
//! assert_eq!(values, vec!["*powershell*", "*-enc*"]);
//! assert_eq!(item.value_linking(), ValueLinking::And);
//! # Ok::<(), sigma_modifiers::ModifierError>(())
//! ```
//!
//! ### Encoded Payloads
//!
//! ```rust
//! use sigma_modifiers::{ModifierChain, SigmaValue};
//!
//! let chain = ModifierChain::from_identifiers(&["base64offset", "contains"])?;
//! let output = chain.apply(vec![SigmaValue::from("/bin/sh")])?;
//! assert_eq!(output.values.len(), 3);
//! # Ok::<(), sigma_modifiers::ModifierError>(())
//! ```
//!
//! ### Batches
//!
//! ```rust
//! use sigma_modifiers::{apply_all, DetectionItem, ModifierConfig, SigmaValue};
//!
//! let mut items = vec![
//!     DetectionItem::from_key("Image|endswith", vec![SigmaValue::from("\\cmd.exe")])?,
//!     DetectionItem::from_key("EventID|gte", vec![SigmaValue::from(4624i64)])?,
//! ];
//! let results = apply_all(&mut items, &ModifierConfig::default());
//! assert!(results.iter().all(|r| r.is_ok()));
//! # Ok::<(), sigma_modifiers::ModifierError>(())
//! ```

pub mod chain;
pub mod config;
pub mod detection;
pub mod error;
pub mod modifiers;
pub mod registry;
pub mod types;

pub use chain::{ChainOutput, ModifierChain};
pub use config::ModifierConfig;
pub use detection::{apply_all, DetectionItem, ValueLinking};
pub use error::{ModifierError, Result};
pub use modifiers::{
    ListModifier, Modifier, ModifierContext, ModifierOutput, PerGroup, PerValue, Transformed,
    ValueModifier, ValueShape,
};
pub use registry::ModifierConstructor;
pub use types::{
    CompareOperator, Placeholder, SigmaCompareExpression, SigmaNumber, SigmaRegularExpression,
    SigmaString, SigmaValue, SpecialChar, StringPart, ValueKind,
};
