use bid_core::{Call, CallGrammar};
use std::collections::BTreeMap;
use std::fs;

#[test]
fn test_spelling_variants_normalize_to_one_token() {
    let yaml_content = fs::read_to_string("../../tests/labels/spellings.yaml")
        .expect("Failed to read spelling vectors");
    let vectors: BTreeMap<String, Vec<String>> =
        serde_yaml::from_str(&yaml_content).expect("Failed to parse spelling vectors");

    let grammar = CallGrammar::standard();
    for (canonical, spellings) in &vectors {
        for spelling in spellings {
            assert_eq!(
                grammar.normalize(spelling),
                *canonical,
                "{:?} should normalize to {}",
                spelling,
                canonical
            );
        }
    }
}

#[test]
fn test_canonical_tokens_are_fixed_points() {
    let yaml_content = fs::read_to_string("../../tests/labels/spellings.yaml")
        .expect("Failed to read spelling vectors");
    let vectors: BTreeMap<String, Vec<String>> = serde_yaml::from_str(&yaml_content).unwrap();

    let grammar = CallGrammar::standard();
    for canonical in vectors.keys() {
        assert_eq!(grammar.normalize(canonical), *canonical);
        if let Ok(call) = canonical.parse::<Call>() {
            assert_eq!(call.render(), *canonical);
        }
    }
}
