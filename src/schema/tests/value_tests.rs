//! Unit tests for the dynamic value model.

use crate::schema::domain::Value;
use chrono::NaiveDate;
use rstest::rstest;
use rust_decimal::Decimal;
use serde_json::json;
use std::cmp::Ordering;
use std::str::FromStr;

#[rstest]
#[case::null(Value::Null, true)]
#[case::empty_text(Value::from(""), true)]
#[case::empty_list(Value::List(vec![]), true)]
#[case::empty_map(Value::Map(indexmap::IndexMap::new()), true)]
#[case::blank_text(Value::from("  "), false)]
#[case::zero(Value::Int(0), false)]
#[case::false_flag(Value::Bool(false), false)]
fn missing_values(#[case] value: Value, #[case] expected: bool) {
    assert_eq!(value.is_missing(), expected);
}

#[rstest]
#[case::int_float(Value::Int(1), Value::Float(1.0), Some(Ordering::Equal))]
#[case::decimal_int(Value::Decimal(Decimal::new(25, 1)), Value::Int(2), Some(Ordering::Greater))]
#[case::float_decimal(Value::Float(0.5), Value::Decimal(Decimal::new(75, 2)), Some(Ordering::Less))]
#[case::huge_float_int(Value::Float(1e30), Value::Int(0), Some(Ordering::Greater))]
#[case::int_huge_negative_float(Value::Int(0), Value::Float(-1e30), Some(Ordering::Greater))]
#[case::infinity_decimal(Value::Float(f64::INFINITY), Value::Decimal(Decimal::MAX), Some(Ordering::Greater))]
#[case::nan_int(Value::Float(f64::NAN), Value::Int(0), None)]
#[case::text(Value::from("a"), Value::from("b"), Some(Ordering::Less))]
#[case::text_number(Value::from("1"), Value::Int(1), None)]
#[case::date_time_mix(
    Value::Date(NaiveDate::from_ymd_opt(2015, 1, 1).expect("valid date")),
    Value::Int(1),
    None
)]
fn values_compare_across_numeric_kinds(
    #[case] left: Value,
    #[case] right: Value,
    #[case] expected: Option<Ordering>,
) {
    assert_eq!(left.compare(&right), expected);
}

#[rstest]
fn same_as_treats_equal_numbers_as_equal() {
    assert!(Value::Int(3).same_as(&Value::Float(3.0)));
    assert!(!Value::Int(3).same_as(&Value::from("3")));
    assert!(Value::list([1, 2]).same_as(&Value::list([1, 2])));
}

#[rstest]
#[case::float(Value::Float(42.0), "42.0")]
#[case::fraction(Value::Float(2.5), "2.5")]
#[case::list(Value::list([1, 33]), "[1, 33]")]
#[case::decimal(Value::Decimal(Decimal::from_str("1.50").expect("valid decimal")), "1.50")]
#[case::date(
    Value::Date(NaiveDate::from_ymd_opt(2015, 1, 1).expect("valid date")),
    "2015-01-01"
)]
#[case::boolean(Value::Bool(true), "true")]
fn values_render_as_text(#[case] value: Value, #[case] expected: &str) {
    assert_eq!(value.to_string(), expected);
}

#[rstest]
fn measured_length_counts_characters_and_items() {
    assert_eq!(Value::from("héllo").measured_len(), 5);
    assert_eq!(Value::list(["a", "b", "c"]).measured_len(), 3);
    assert_eq!(Value::Int(12345).measured_len(), 5);
}

#[rstest]
fn json_values_convert_structurally() {
    let value = Value::from(json!({"name": "Ada", "tags": [1, "x"], "score": 1.5, "gone": null}));

    let Value::Map(entries) = value else {
        panic!("expected a map");
    };
    assert_eq!(entries.get("name"), Some(&Value::from("Ada")));
    assert_eq!(
        entries.get("tags"),
        Some(&Value::List(vec![Value::Int(1), Value::from("x")]))
    );
    assert_eq!(entries.get("score"), Some(&Value::Float(1.5)));
    assert_eq!(entries.get("gone"), Some(&Value::Null));
}

#[rstest]
fn serialization_renders_exact_kinds_as_strings() {
    let decimal = Value::Decimal(Decimal::from_str("1.50").expect("valid decimal"));
    let date = Value::Date(NaiveDate::from_ymd_opt(2020, 2, 29).expect("valid date"));

    assert_eq!(serde_json::to_value(&decimal).expect("serializes"), json!("1.50"));
    assert_eq!(serde_json::to_value(&date).expect("serializes"), json!("2020-02-29"));
    assert_eq!(
        serde_json::to_value(Value::list([1, 2])).expect("serializes"),
        json!([1, 2])
    );
}

#[rstest]
fn options_convert_to_null_when_absent() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some("x")), Value::from("x"));
}
