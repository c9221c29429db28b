//! End-to-end engine behavior through the public API.
//!
//! Uses the recording fakes for call-level assertions and the default
//! collaborators for shared-store and reprocessing scenarios.

use std::sync::Arc;
use std::thread;

use normalizer::io::assets::BundledAssetResolver;
use normalizer::io::color::NativeColorResolver;
use normalizer::io::ids::SequentialIdProvider;
use normalizer::io::store::MemoryPropsStore;
use normalizer::test_support::{Fakes, tree};
use normalizer::{Field, OptionValue, OptionsProcessor};
use serde_json::json;

/// Full stack screen: root props, a titled top bar with buttons, and a nested
/// component with its own options.
#[test]
fn screen_options_are_fully_normalized() {
    let fakes = Fakes::default();
    let mut options = tree(json!({
        "passProps": {"userId": 7},
        "topBar": {
            "background": {"color": "white"},
            "title": {"component": {"name": "Logo", "passProps": {"size": "s"}}},
            "rightButtons": [
                {"id": "btn1", "passProps": {"c": 3}, "icon": "add.png"},
                {"id": "btn2", "color": null}
            ]
        }
    }));

    fakes
        .processor()
        .process_options(&mut options, Some("comp-1"))
        .expect("process");

    assert_eq!(
        serde_json::to_value(&options).expect("json"),
        json!({
            "topBar": {
                "background": {"color": {"native": "white"}},
                "title": {"component": {"name": "Logo", "componentId": "generated-1"}},
                "rightButtons": [
                    {"id": "btn1", "icon": {"asset": "add.png"}},
                    {"id": "btn2", "color": "NoColor"}
                ]
            }
        })
    );
    assert_eq!(
        fakes.store.writes(),
        vec![
            ("comp-1".to_string(), tree(json!({"userId": 7}))),
            ("generated-1".to_string(), tree(json!({"size": "s"}))),
            ("btn1".to_string(), tree(json!({"c": 3}))),
        ]
    );
    assert_eq!(fakes.ids.categories(), vec!["CustomComponent".to_string()]);
}

#[test]
fn buttons_without_props_keep_their_shape() {
    let fakes = Fakes::default();
    let mut options = tree(json!({"rightButtons": [{"id": "btn1", "passProps": {"c": 3}}, {"id": "btn2"}]}));

    fakes
        .processor()
        .process_options(&mut options, None)
        .expect("process");

    let buttons = options
        .get("rightButtons")
        .and_then(OptionValue::as_sequence)
        .expect("buttons");
    assert!(!buttons[1].as_mapping().expect("btn2").contains_key("passProps"));
    assert_eq!(buttons[0].as_mapping().expect("btn1").field("passProps"), Field::Unset);
    assert_eq!(fakes.store.write_count(), 1);
}

#[test]
fn reprocessing_with_default_resolvers_is_stable() {
    let store = MemoryPropsStore::new();
    let processor = OptionsProcessor::new(
        &store,
        SequentialIdProvider::new(),
        NativeColorResolver::default(),
        BundledAssetResolver::default(),
    );
    let mut options = tree(json!({
        "passProps": {"a": 1},
        "layout": {"backgroundColor": "#102030"},
        "component": {"id": "main", "passProps": {"b": 2}},
        "leftButtons": [{"id": "back", "icon": "back.png", "passProps": {"c": 3}}]
    }));

    processor
        .process_options(&mut options, Some("root"))
        .expect("first pass");
    let first = options.clone();
    let stored_after_first = store.snapshot().expect("snapshot");

    processor
        .process_options(&mut options, Some("root"))
        .expect("second pass");

    assert_eq!(options, first);
    assert_eq!(store.snapshot().expect("snapshot"), stored_after_first);
    assert_eq!(
        stored_after_first.keys().cloned().collect::<Vec<_>>(),
        vec!["back".to_string(), "main".to_string(), "root".to_string()]
    );
}

#[test]
fn one_store_serves_concurrent_calls() {
    let store = Arc::new(MemoryPropsStore::new());
    let ids = Arc::new(SequentialIdProvider::new());

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let store = Arc::clone(&store);
            let ids = Arc::clone(&ids);
            thread::spawn(move || {
                let processor = OptionsProcessor::new(
                    store,
                    ids,
                    NativeColorResolver::default(),
                    BundledAssetResolver::default(),
                );
                let mut options = tree(json!({
                    "passProps": {"screen": n},
                    "component": {"passProps": {"inner": n}}
                }));
                let owner = format!("screen-{n}");
                processor
                    .process_options(&mut options, Some(owner.as_str()))
                    .expect("process");
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("join");
    }

    let stored = store.snapshot().expect("snapshot");
    assert_eq!(stored.len(), 8);
    for n in 0..4 {
        assert_eq!(
            stored.get(&format!("screen-{n}")),
            Some(&tree(json!({"screen": n})))
        );
    }
}
