//! SIGMA Specification Validation Tests
//!
//! Detection sections of real-world style rules are turned into detection
//! items the way a rule loader would and checked after modifier application.

use sigma_modifiers::{
    apply_all, DetectionItem, ModifierConfig, ModifierError, SigmaValue, ValueLinking,
};

/// Build detection items from the first selection of a rule's detection block.
fn selection_items(rule_yaml: &str, selection: &str) -> Vec<DetectionItem> {
    let rule: serde_yaml::Value = serde_yaml::from_str(rule_yaml).expect("valid rule yaml");
    let mapping = rule["detection"][selection]
        .as_mapping()
        .expect("selection mapping");

    mapping
        .iter()
        .map(|(key, value)| {
            let key = key.as_str().expect("string key");
            let values = SigmaValue::from_yaml_list(value).expect("supported values");
            DetectionItem::from_key(key, values).expect("known modifiers")
        })
        .collect()
}

fn rendered(item: &DetectionItem) -> Vec<String> {
    item.values().iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_sigma_spec_process_creation() {
    let rule_yaml = r#"
title: Suspicious Encoded PowerShell
status: experimental
logsource:
    category: process_creation
    product: windows
detection:
    selection:
        Image|endswith: '\powershell.exe'
        CommandLine|contains|all:
            - ' -nop '
            - ' -w hidden '
        ParentImage|startswith: 'C:\Windows\'
    condition: selection
level: high
"#;

    let mut items = selection_items(rule_yaml, "selection");
    let results = apply_all(&mut items, &ModifierConfig::default());
    assert!(results.iter().all(|r| r.is_ok()));

    assert_eq!(items[0].field(), Some("Image"));
    assert_eq!(rendered(&items[0]), vec![r"*\\powershell.exe"]);

    assert_eq!(items[1].value_linking(), ValueLinking::And);
    assert_eq!(rendered(&items[1]), vec!["* -nop *", "* -w hidden *"]);

    assert_eq!(rendered(&items[2]), vec![r"C:\\Windows\\*"]);
}

#[test]
fn test_sigma_spec_base64_payloads() {
    let rule_yaml = r#"
title: Base64 Encoded Shell
logsource:
    product: linux
detection:
    selection:
        CommandLine|base64offset|contains:
            - '/bin/bash'
            - '/bin/sh'
    condition: selection
"#;

    let mut items = selection_items(rule_yaml, "selection");
    items[0].apply_modifiers().unwrap();

    assert_eq!(items[0].values().len(), 6);
    assert_eq!(
        &rendered(&items[0])[3..],
        &["*L2Jpbi9za*", "*9iaW4vc2*", "*vYmluL3No*"]
    );
}

#[test]
fn test_sigma_spec_numeric_comparison() {
    let rule_yaml = r#"
title: Large Transfer
logsource:
    category: network
detection:
    selection:
        BytesSent|gte: 1048576
        DestinationPort|lt: 1024
    condition: selection
"#;

    let mut items = selection_items(rule_yaml, "selection");
    for item in &mut items {
        item.apply_modifiers().unwrap();
    }
    assert_eq!(rendered(&items[0]), vec![">=1048576"]);
    assert_eq!(rendered(&items[1]), vec!["<1024"]);
}

#[test]
fn test_sigma_spec_keyless_regex() {
    let rule_yaml = r#"
title: Keyword Regex
logsource:
    product: linux
detection:
    keywords:
        '|re': 'wget .*\.sh'
    condition: keywords
"#;

    let mut items = selection_items(rule_yaml, "keywords");
    items[0].apply_modifiers().unwrap();
    assert_eq!(items[0].field(), None);
    match &items[0].values()[0] {
        SigmaValue::Regex(re) => assert_eq!(re.pattern(), r"wget .*\.sh"),
        other => panic!("Expected regex, got {other:?}"),
    }
}

#[test]
fn test_sigma_spec_invalid_modifier_combinations() {
    let rule_yaml = r#"
title: Broken Rule
logsource:
    product: windows
detection:
    selection:
        CommandLine|contains|re: 'foo'
        Image|base64: 'evil*.exe'
        EventID|lt: 'four'
    condition: selection
"#;

    let mut items = selection_items(rule_yaml, "selection");
    let results = apply_all(&mut items, &ModifierConfig::default());

    assert!(matches!(
        results[0],
        Err(ModifierError::ValueConstraint { ref modifier, .. }) if modifier == "re"
    ));
    assert!(matches!(
        results[1],
        Err(ModifierError::ValueConstraint { ref modifier, .. }) if modifier == "base64"
    ));
    assert!(matches!(
        results[2],
        Err(ModifierError::TypeMismatch { ref modifier, .. }) if modifier == "lt"
    ));
    assert!(items.iter().all(|item| !item.is_applied()));
}

#[test]
fn test_sigma_spec_unknown_modifier() {
    let err = DetectionItem::from_key("Image|endswithh", vec!["x".into()]).unwrap_err();
    assert_eq!(err.to_string(), "Unknown modifier: endswithh");
}
