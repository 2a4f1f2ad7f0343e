//! Ordered modifier chains and their left-to-right application.

use crate::config::ModifierConfig;
use crate::detection::ValueLinking;
use crate::error::{ModifierError, Result};
use crate::modifiers::{Modifier, ModifierContext};
use crate::registry;
use crate::types::SigmaValue;
use tracing::{debug, warn};

/// Final values of a chain plus the value linking requested along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainOutput {
    pub values: Vec<SigmaValue>,
    pub linking: Option<ValueLinking>,
}

/// Modifiers applied to one detection item, in declaration order.
#[derive(Debug, Default)]
pub struct ModifierChain {
    modifiers: Vec<Box<dyn Modifier>>,
}

impl ModifierChain {
    /// An empty chain; values pass through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_modifiers(modifiers: Vec<Box<dyn Modifier>>) -> Self {
        Self { modifiers }
    }

    /// Build a chain from registry identifiers, e.g. `["contains", "all"]`.
    pub fn from_identifiers<S: AsRef<str>>(identifiers: &[S]) -> Result<Self> {
        let modifiers = identifiers
            .iter()
            .map(|id| registry::create(id.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { modifiers })
    }

    /// Append a modifier to the end of the chain.
    pub fn push(&mut self, modifier: Box<dyn Modifier>) {
        self.modifiers.push(modifier);
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    pub fn modifiers(&self) -> &[Box<dyn Modifier>] {
        &self.modifiers
    }

    pub fn identifiers(&self) -> Vec<&'static str> {
        self.modifiers.iter().map(|m| m.identifier()).collect()
    }

    pub fn apply(&self, values: Vec<SigmaValue>) -> Result<ChainOutput> {
        self.apply_with_config(values, &ModifierConfig::default())
    }

    /// Fold every modifier over the value list.
    ///
    /// Each modifier sees only the modifiers before it. The first error
    /// aborts the fold; nothing is returned for partially applied chains.
    pub fn apply_with_config(
        &self,
        values: Vec<SigmaValue>,
        config: &ModifierConfig,
    ) -> Result<ChainOutput> {
        check_limit("input", values.len(), config)?;
        let mut current = values;
        let mut linking = None;

        for (position, modifier) in self.modifiers.iter().enumerate() {
            let ctx = ModifierContext::new(&self.modifiers[..position]);
            debug!(
                modifier = modifier.identifier(),
                position,
                input_values = current.len(),
                "applying modifier"
            );

            let output = modifier.apply(&ctx, current).map_err(|err| {
                warn!(
                    modifier = modifier.identifier(),
                    position,
                    error = %err,
                    "modifier chain aborted"
                );
                err
            })?;

            check_limit(modifier.identifier(), output.values.len(), config)?;

            if output.linking.is_some() {
                linking = output.linking;
            }
            current = output.values;
        }

        Ok(ChainOutput {
            values: current,
            linking,
        })
    }
}

fn check_limit(stage: &str, count: usize, config: &ModifierConfig) -> Result<()> {
    if count > config.max_values {
        warn!(
            stage,
            produced = count,
            limit = config.max_values,
            "modifier chain exceeded value limit"
        );
        return Err(ModifierError::TooManyValues {
            limit: config.max_values,
            actual: count,
        });
    }
    Ok(())
}

impl From<Vec<Box<dyn Modifier>>> for ModifierChain {
    fn from(modifiers: Vec<Box<dyn Modifier>>) -> Self {
        Self::from_modifiers(modifiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CompareOperator, SigmaString};

    fn chain(ids: &[&str]) -> ModifierChain {
        ModifierChain::from_identifiers(ids).unwrap()
    }

    fn strings(values: &[SigmaValue]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_empty_chain_passes_values_through() {
        let values = vec![SigmaValue::from("foo"), SigmaValue::from(3i64)];
        let output = ModifierChain::new().apply(values.clone()).unwrap();
        assert_eq!(output.values, values);
        assert_eq!(output.linking, None);
    }

    #[test]
    fn test_fold_order() {
        let output = chain(&["startswith", "endswith"])
            .apply(vec![SigmaValue::from("foo")])
            .unwrap();
        assert_eq!(strings(&output.values), vec!["*foo*"]);
    }

    #[test]
    fn test_per_value_flattening() {
        let output = chain(&["base64offset", "contains"])
            .apply(vec![SigmaValue::from("abc"), SigmaValue::from("foobar")])
            .unwrap();
        assert_eq!(
            strings(&output.values),
            vec!["*YWJj*", "*FiY*", "*hYm*", "*Zm9vYmFy*", "*Zvb2Jhc*", "*mb29iYX*"]
        );
    }

    #[test]
    fn test_wide_base64offset_contains() {
        let output = chain(&["wide", "base64offset", "contains"])
            .apply(vec![SigmaValue::from("ping")])
            .unwrap();
        assert_eq!(output.values.len(), 3);
        for value in &output.values {
            let s = value.as_string().unwrap();
            assert!(s.starts_with_wildcard() && s.ends_with_wildcard());
        }
    }

    #[test]
    fn test_all_sets_linking() {
        let output = chain(&["contains", "all"])
            .apply(vec![SigmaValue::from("a"), SigmaValue::from("b")])
            .unwrap();
        assert_eq!(strings(&output.values), vec!["*a*", "*b*"]);
        assert_eq!(output.linking, Some(ValueLinking::And));
    }

    #[test]
    fn test_re_must_be_first() {
        let output = chain(&["re"]).apply(vec![SigmaValue::from("a.*b")]).unwrap();
        assert!(matches!(output.values[0], SigmaValue::Regex(_)));

        let err = chain(&["contains", "re"])
            .apply(vec![SigmaValue::from("a.*b")])
            .unwrap_err();
        assert!(matches!(err, ModifierError::ValueConstraint { ref modifier, .. } if modifier == "re"));
    }

    #[test]
    fn test_type_mismatch_aborts_chain() {
        let err = chain(&["contains", "gt"])
            .apply(vec![SigmaValue::from("foo")])
            .unwrap_err();
        assert!(matches!(err, ModifierError::TypeMismatch { ref modifier, .. } if modifier == "gt"));
    }

    #[test]
    fn test_comparison_chain() {
        let output = chain(&["gte"]).apply(vec![SigmaValue::from(5i64)]).unwrap();
        match &output.values[..] {
            [SigmaValue::Compare(expr)] => assert_eq!(expr.op, CompareOperator::Gte),
            other => panic!("Expected comparison, got {other:?}"),
        }
    }

    #[test]
    fn test_value_limit() {
        let config = ModifierConfig::default().with_max_values(4);
        let err = chain(&["base64offset"])
            .apply_with_config(
                vec![SigmaValue::from("abc"), SigmaValue::from("def")],
                &config,
            )
            .unwrap_err();
        assert_eq!(err, ModifierError::TooManyValues { limit: 4, actual: 6 });
    }

    #[test]
    fn test_value_limit_checks_raw_input() {
        let config = ModifierConfig::default().with_max_values(2);
        let values = vec![
            SigmaValue::from("a"),
            SigmaValue::from("b"),
            SigmaValue::from("c"),
        ];

        let err = ModifierChain::new()
            .apply_with_config(values.clone(), &config)
            .unwrap_err();
        assert_eq!(err, ModifierError::TooManyValues { limit: 2, actual: 3 });

        let err = chain(&["contains"])
            .apply_with_config(values, &config)
            .unwrap_err();
        assert_eq!(err, ModifierError::TooManyValues { limit: 2, actual: 3 });
    }

    #[test]
    fn test_default_config_has_no_value_limit() {
        let values: Vec<SigmaValue> = (0..5000).map(|i| SigmaValue::from(format!("v{i}"))).collect();
        let output = chain(&["contains"]).apply(values.clone()).unwrap();
        assert_eq!(output.values.len(), 5000);

        let output = chain(&["base64offset"]).apply(values[..1400].to_vec()).unwrap();
        assert_eq!(output.values.len(), 4200);
    }

    #[test]
    fn test_expand_then_contains() {
        let output = chain(&["expand", "contains"])
            .apply(vec![SigmaValue::from("%dir%\\cmd.exe")])
            .unwrap();
        let s = output.values[0].as_string().unwrap();
        assert!(s.contains_placeholder());
        assert!(s.starts_with_wildcard());
        assert_ne!(s, &SigmaString::new("*%dir%\\cmd.exe*"));
    }

    #[test]
    fn test_unknown_identifier() {
        let err = ModifierChain::from_identifiers(&["contains", "bogus"]).unwrap_err();
        assert_eq!(err, ModifierError::UnknownModifier("bogus".to_string()));
    }

    #[test]
    fn test_chain_accessors() {
        let mut c = chain(&["contains"]);
        c.push(crate::registry::create("all").unwrap());
        assert_eq!(c.len(), 2);
        assert!(!c.is_empty());
        assert_eq!(c.identifiers(), vec!["contains", "all"]);
    }
}
