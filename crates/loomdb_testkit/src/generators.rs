//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random field values and records.
//! The value domain deliberately includes nulls, empty strings, NaN, and
//! nested data, since ordering edge cases live there.

use proptest::prelude::*;

use loomdb_value::{Record, Value};

/// Strategy for generating arbitrary field values.
///
/// Leaves cover every scalar kind (including the empty string and NaN);
/// lists and structs nest up to two levels deep.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        prop_oneof![
            (-1.0e9f64..1.0e9f64).prop_map(Value::Number),
            Just(Value::Number(f64::NAN)),
        ],
        prop::string::string_regex("[a-cA-C ]{0,4}")
            .expect("Invalid regex")
            .prop_map(Value::Text),
    ];
    leaf.prop_recursive(2, 16, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::List),
            prop::collection::btree_map(
                prop::string::string_regex("[a-z]{1,3}").expect("Invalid regex"),
                inner,
                0..3
            )
            .prop_map(Value::Struct),
        ]
    })
}

/// Strategy for generating records over a fixed key set.
///
/// Each key is independently absent or bound to a random value, so sorts
/// see both missing fields and every value kind.
pub fn record_strategy(field_keys: &[&str]) -> impl Strategy<Value = Record> {
    let fields: Vec<_> = field_keys
        .iter()
        .map(|key| {
            let key = (*key).to_owned();
            prop::option::of(value_strategy()).prop_map(move |value| (key.clone(), value))
        })
        .collect();

    fields.prop_map(|pairs| {
        pairs
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect()
    })
}
