//! Unit tests for per-kind coercions.

use crate::schema::domain::coerce::{
    to_boolean, to_date, to_datetime, to_decimal, to_float, to_integer, to_reference_key,
    to_reference_keys, to_text, to_time,
};
use crate::schema::domain::{Data, Value};
use chrono::{NaiveDate, NaiveTime};
use rstest::rstest;
use rust_decimal::Decimal;
use std::str::FromStr;

fn date(year: i32, month: u32, day: u32) -> Value {
    Value::Date(NaiveDate::from_ymd_opt(year, month, day).expect("valid date"))
}

fn time(hour: u32, minute: u32, second: u32) -> Value {
    Value::Time(NaiveTime::from_hms_opt(hour, minute, second).expect("valid time"))
}

fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Value {
    Value::DateTime(
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .expect("valid datetime"),
    )
}

// ============================================================================
// Numbers
// ============================================================================

#[rstest]
#[case::text(Value::from("42"), 42)]
#[case::padded_text(Value::from(" 7 "), 7)]
#[case::float_truncates(Value::Float(3.9), 3)]
#[case::negative_float_truncates(Value::Float(-3.9), -3)]
#[case::decimal(Value::Decimal(Decimal::new(1299, 2)), 12)]
#[case::boolean(Value::Bool(true), 1)]
fn integers_coerce(#[case] raw: Value, #[case] expected: i64) {
    assert_eq!(to_integer(raw).expect("coerces"), Value::Int(expected));
}

#[rstest]
#[case::word(Value::from("abc"))]
#[case::fraction_text(Value::from("3.5"))]
#[case::empty_text(Value::from(""))]
#[case::list(Value::list([1]))]
fn integers_reject_non_integer_input(#[case] raw: Value) {
    let err = to_integer(raw).expect_err("should fail");
    assert_eq!(err.key, "coerce_int");
}

#[rstest]
fn floats_coerce_text_and_numbers() {
    assert_eq!(to_float(Value::from("1.5")).expect("coerces"), Value::Float(1.5));
    assert_eq!(to_float(Value::Int(2)).expect("coerces"), Value::Float(2.0));
    assert_eq!(to_float(Value::from("")).expect("coerces"), Value::Null);
    assert_eq!(
        to_float(Value::from("one")).expect_err("should fail").key,
        "coerce_float"
    );
}

#[rstest]
fn decimals_keep_exact_text() {
    assert_eq!(
        to_decimal(Value::from("10.25")).expect("coerces"),
        Value::Decimal(Decimal::from_str("10.25").expect("valid decimal"))
    );
    assert_eq!(
        to_decimal(Value::Int(3)).expect("coerces"),
        Value::Decimal(Decimal::from(3))
    );
    assert_eq!(to_decimal(Value::from("  ")).expect("coerces"), Value::Null);
    assert_eq!(
        to_decimal(Value::from("ten")).expect_err("should fail").key,
        "coerce_decimal"
    );
}

// ============================================================================
// Dates and times
// ============================================================================

#[rstest]
#[case::iso("2015-01-01", date(2015, 1, 1))]
#[case::slashes_year_first("2015/03/04", date(2015, 3, 4))]
#[case::slashes_month_first("01/02/2015", date(2015, 1, 2))]
#[case::dotted("24.12.2015", date(2015, 12, 24))]
#[case::short_month("jan 1, 2015", date(2015, 1, 1))]
#[case::long_month("1 January 2015", date(2015, 1, 1))]
#[case::from_datetime_text("2015-01-01T15:20:00", date(2015, 1, 1))]
fn dates_parse_common_forms(#[case] raw: &str, #[case] expected: Value) {
    assert_eq!(to_date(Value::from(raw)).expect("coerces"), expected);
}

#[rstest]
fn dates_take_the_date_part_of_datetimes() {
    assert_eq!(
        to_date(datetime(2015, 1, 1, 15, 20)).expect("coerces"),
        date(2015, 1, 1)
    );
}

#[rstest]
#[case::word(Value::from("not a date"))]
#[case::number(Value::Int(20150101))]
fn dates_reject_unparseable_input(#[case] raw: Value) {
    assert_eq!(to_date(raw).expect_err("should fail").key, "coerce_date");
}

#[rstest]
#[case::twenty_four_hour("15:20", time(15, 20, 0))]
#[case::seconds("15:20:30", time(15, 20, 30))]
#[case::meridiem("3:20 pm", time(15, 20, 0))]
#[case::meridiem_without_space("3:20pm", time(15, 20, 0))]
#[case::bare_hour("9 am", time(9, 0, 0))]
#[case::from_datetime_text("2015-01-01 08:15", time(8, 15, 0))]
fn times_parse_common_forms(#[case] raw: &str, #[case] expected: Value) {
    assert_eq!(to_time(Value::from(raw)).expect("coerces"), expected);
}

#[rstest]
fn times_reject_impossible_values() {
    assert_eq!(
        to_time(Value::from("25:61")).expect_err("should fail").key,
        "coerce_time"
    );
}

#[rstest]
#[case::iso("2015-01-01T15:20:00", datetime(2015, 1, 1, 15, 20))]
#[case::spaced("2015-01-01 15:20", datetime(2015, 1, 1, 15, 20))]
#[case::month_name("jan 1, 2015 3:20 pm", datetime(2015, 1, 1, 15, 20))]
#[case::date_only("2015-01-01", datetime(2015, 1, 1, 0, 0))]
#[case::offset("2015-01-01T15:20:00+02:00", datetime(2015, 1, 1, 15, 20))]
fn datetimes_parse_common_forms(#[case] raw: &str, #[case] expected: Value) {
    assert_eq!(to_datetime(Value::from(raw)).expect("coerces"), expected);
}

#[rstest]
fn datetimes_place_dates_at_midnight() {
    assert_eq!(
        to_datetime(date(2015, 1, 1)).expect("coerces"),
        datetime(2015, 1, 1, 0, 0)
    );
    assert_eq!(to_datetime(Value::from("")).expect("coerces"), Value::Null);
}

// ============================================================================
// Booleans, text and references
// ============================================================================

#[rstest]
#[case::zero_text(Value::from("0"), false)]
#[case::empty_braces(Value::from("{}"), false)]
#[case::empty_brackets(Value::from("[]"), false)]
#[case::none_word(Value::from("None"), false)]
#[case::false_word(Value::from("FALSE"), false)]
#[case::zero(Value::Int(0), false)]
#[case::empty_list(Value::List(vec![]), false)]
#[case::one(Value::Int(1), true)]
#[case::yes(Value::from("yes"), true)]
#[case::empty_text(Value::from(""), true)]
#[case::flag(Value::Bool(false), false)]
fn booleans_coerce_by_text_form(#[case] raw: Value, #[case] expected: bool) {
    assert_eq!(to_boolean(&raw), Value::Bool(expected));
}

#[rstest]
fn text_renders_scalars() {
    assert_eq!(to_text(Value::Int(5)), Value::from("5"));
    assert_eq!(to_text(Value::from("x")), Value::from("x"));
    assert_eq!(to_text(Value::Float(1.0)), Value::from("1.0"));
}

fn keyed(id: i64) -> Value {
    let mut entries = Data::new();
    entries.insert("id".to_owned(), Value::Int(id));
    entries.insert("name".to_owned(), Value::from("row"));
    Value::Map(entries)
}

#[rstest]
fn single_references_take_the_lookup_column() {
    assert_eq!(to_reference_key("id", keyed(4)), Value::Int(4));
    assert_eq!(to_reference_key("id", Value::Int(9)), Value::Int(9));
    assert_eq!(to_reference_key("missing", keyed(4)), Value::Null);
}

#[rstest]
fn many_references_wrap_single_values() {
    assert_eq!(
        to_reference_keys("id", Value::list([keyed(1), keyed(2)])),
        Value::list([1, 2])
    );
    assert_eq!(to_reference_keys("id", keyed(3)), Value::list([3]));
    assert_eq!(to_reference_keys("id", Value::Int(5)), Value::list([5]));
}
