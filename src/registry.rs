//! Static registry mapping modifier identifiers to constructors.
//!
//! Rule loaders split keys such as `CommandLine|contains|all` on `|` and
//! resolve each token here. Identifiers are case-sensitive.

use crate::error::{ModifierError, Result};
use crate::modifiers::{
    AllModifier, Base64Modifier, Base64OffsetModifier, ContainsModifier, EndswithModifier,
    ExpandModifier, GreaterThanEqualModifier, GreaterThanModifier, LessThanEqualModifier,
    LessThanModifier, Modifier, PerGroup, PerValue, RegularExpressionModifier,
    StartswithModifier, WideModifier,
};

/// Creates a fresh modifier instance for one detection item.
pub type ModifierConstructor = fn() -> Box<dyn Modifier>;

fn per_value<M: crate::modifiers::ValueModifier + Default + 'static>() -> Box<dyn Modifier> {
    Box::new(PerValue(M::default()))
}

fn per_group<M: crate::modifiers::ListModifier + Default + 'static>() -> Box<dyn Modifier> {
    Box::new(PerGroup(M::default()))
}

static MODIFIER_REGISTRY: &[(&str, ModifierConstructor)] = &[
    ("contains", per_value::<ContainsModifier>),
    ("startswith", per_value::<StartswithModifier>),
    ("endswith", per_value::<EndswithModifier>),
    ("base64", per_value::<Base64Modifier>),
    ("base64offset", per_value::<Base64OffsetModifier>),
    ("wide", per_value::<WideModifier>),
    ("re", per_value::<RegularExpressionModifier>),
    ("all", per_group::<AllModifier>),
    ("lt", per_value::<LessThanModifier>),
    ("lte", per_value::<LessThanEqualModifier>),
    ("gt", per_value::<GreaterThanModifier>),
    ("gte", per_value::<GreaterThanEqualModifier>),
    ("expand", per_value::<ExpandModifier>),
];

/// Constructor registered under `identifier`. Matching is case-sensitive.
pub fn lookup(identifier: &str) -> Option<ModifierConstructor> {
    MODIFIER_REGISTRY
        .iter()
        .find(|(id, _)| *id == identifier)
        .map(|(_, constructor)| *constructor)
}

/// Instantiate the modifier registered under `identifier`.
pub fn create(identifier: &str) -> Result<Box<dyn Modifier>> {
    lookup(identifier)
        .map(|constructor| constructor())
        .ok_or_else(|| ModifierError::UnknownModifier(identifier.to_string()))
}

/// Returns `true` if `identifier` names a known modifier.
pub fn is_registered(identifier: &str) -> bool {
    lookup(identifier).is_some()
}

/// All registered identifiers in registration order.
pub fn identifiers() -> impl Iterator<Item = &'static str> {
    MODIFIER_REGISTRY.iter().map(|(id, _)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_modifiers_registered() {
        let expected = [
            "contains",
            "startswith",
            "endswith",
            "base64",
            "base64offset",
            "wide",
            "re",
            "all",
            "lt",
            "lte",
            "gt",
            "gte",
            "expand",
        ];
        for id in expected {
            assert!(is_registered(id), "Missing modifier: {id}");
        }
        assert_eq!(identifiers().count(), expected.len());
    }

    #[test]
    fn test_identifiers_unique() {
        let unique: HashSet<&str> = identifiers().collect();
        assert_eq!(unique.len(), identifiers().count());
    }

    #[test]
    fn test_constructor_identifier_matches_key() {
        for id in identifiers() {
            let modifier = create(id).unwrap();
            assert_eq!(modifier.identifier(), id);
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup("contains").is_some());
        assert!(lookup("Contains").is_none());
        assert!(lookup("CONTAINS").is_none());
    }

    #[test]
    fn test_unknown_modifier() {
        let err = create("containz").unwrap_err();
        assert_eq!(err, ModifierError::UnknownModifier("containz".to_string()));
    }
}
