//! Tests for PostgreSQL value decoding and JSON conversion

use super::helpers::*;
use super::parse::{self, ArrayLiteral, TimeOfDay};
use super::*;
use chrono::{FixedOffset, NaiveDate, NaiveTime};
use serde_json::{Value as JsonValue, json};
use tokio_postgres::types::{Kind, Type};

fn value(ty: &Type, text: &str) -> PgValue {
    PgValue::from_text(ty, Some(text)).unwrap()
}

fn to_json(value: PgValue) -> JsonValue {
    JsonConverter::new().convert(&value)
}

fn render(ty: &Type, text: &str) -> JsonValue {
    to_json(value(ty, text))
}

fn hours(h: i32) -> FixedOffset {
    FixedOffset::east_opt(h * 3600).unwrap()
}

// ===== Zone offsets and times =====

#[test]
fn test_offset_forms() {
    assert_eq!(parse::offset("+03"), Some(hours(3)));
    assert_eq!(parse::offset("-05"), Some(hours(-5)));
    assert_eq!(parse::offset("+05:30"), FixedOffset::east_opt(19_800));
    assert_eq!(parse::offset("-00:44:30"), FixedOffset::east_opt(-2_670));
}

#[test]
fn test_offset_rejects_garbage() {
    assert_eq!(parse::offset(""), None);
    assert_eq!(parse::offset("03"), None);
    assert_eq!(parse::offset("+3"), None);
    assert_eq!(parse::offset("+03:0"), None);
    assert_eq!(parse::offset("+03:00:00:00"), None);
}

#[test]
fn test_offset_to_string() {
    assert_eq!(offset_to_string(&hours(0)), "+00:00");
    assert_eq!(offset_to_string(&hours(-8)), "-08:00");
    assert_eq!(offset_to_string(&FixedOffset::east_opt(19_800).unwrap()), "+05:30");
    assert_eq!(offset_to_string(&FixedOffset::east_opt(-2_670).unwrap()), "-00:44:30");
}

#[test]
fn test_time_end_of_day() {
    assert_eq!(parse::time("24:00:00"), Some(TimeOfDay::EndOfDay));
    assert_eq!(parse::time("24:00:00.000"), Some(TimeOfDay::EndOfDay));
    assert_eq!(parse::time("24:00:00.5"), None);
    assert_eq!(parse::time("24:00:01"), None);
    assert_eq!(
        parse::time("12:00:00.5"),
        Some(TimeOfDay::Time(NaiveTime::from_hms_milli_opt(12, 0, 0, 500).unwrap()))
    );
}

// ===== Array literals =====

#[test]
fn test_array_literal_plain() {
    assert_eq!(
        parse::array("{1,NULL,3}", ',').unwrap(),
        vec![
            ArrayLiteral::Element("1".to_string()),
            ArrayLiteral::Null,
            ArrayLiteral::Element("3".to_string()),
        ]
    );
    assert_eq!(parse::array("{}", ',').unwrap(), vec![]);
}

#[test]
fn test_array_literal_quoted() {
    assert_eq!(
        parse::array(r#"{"a b","NULL","q\"x\\y",plain}"#, ',').unwrap(),
        vec![
            ArrayLiteral::Element("a b".to_string()),
            ArrayLiteral::Element("NULL".to_string()),
            ArrayLiteral::Element(r#"q"x\y"#.to_string()),
            ArrayLiteral::Element("plain".to_string()),
        ]
    );
}

#[test]
fn test_array_literal_nested_and_bounds() {
    let nested = vec![
        ArrayLiteral::Array(vec![
            ArrayLiteral::Element("1".to_string()),
            ArrayLiteral::Element("2".to_string()),
        ]),
        ArrayLiteral::Array(vec![ArrayLiteral::Element("3".to_string()), ArrayLiteral::Null]),
    ];
    assert_eq!(parse::array("{{1,2},{3,NULL}}", ',').unwrap(), nested);
    assert_eq!(parse::array("[0:1][1:2]={{1,2},{3,NULL}}", ',').unwrap(), nested);
}

#[test]
fn test_array_literal_box_delimiter() {
    assert_eq!(
        parse::array("{(1,1),(0,0);(2,2),(1,1)}", ';').unwrap(),
        vec![
            ArrayLiteral::Element("(1,1),(0,0)".to_string()),
            ArrayLiteral::Element("(2,2),(1,1)".to_string()),
        ]
    );
}

#[test]
fn test_array_literal_rejects_garbage() {
    assert!(parse::array("1,2", ',').is_err());
    assert!(parse::array("{1,2", ',').is_err());
    assert!(parse::array("{1,,2}", ',').is_err());
    assert!(parse::array("{1}x", ',').is_err());
    assert!(parse::array(r#"{"open}"#, ',').is_err());
}

// ===== Scalars from text =====

#[test]
fn test_null() {
    assert_eq!(PgValue::from_text(&Type::INT4, None).unwrap(), PgValue::Null);
    assert_eq!(PgValue::from_text(&Type::INET, None).unwrap(), PgValue::Null);
}

#[test]
fn test_scalars() {
    assert_eq!(value(&Type::BOOL, "t"), PgValue::Bool(true));
    assert_eq!(value(&Type::BOOL, "f"), PgValue::Bool(false));
    assert_eq!(value(&Type::INT2, "-7"), PgValue::Int(-7));
    assert_eq!(value(&Type::INT8, "9223372036854775807"), PgValue::Int(i64::MAX));
    assert_eq!(value(&Type::OID, "4294967295"), PgValue::Int(4_294_967_295));
    assert_eq!(value(&Type::TEXT, "hello"), PgValue::Text("hello".to_string()));
    assert_eq!(value(&Type::CHAR, "r"), PgValue::Text("r".to_string()));
    assert_eq!(value(&Type::NUMERIC, "-1.50"), PgValue::Numeric("-1.50".to_string()));
}

#[test]
fn test_floats() {
    assert_eq!(value(&Type::FLOAT4, "0.1"), PgValue::Float(0.1));
    assert_eq!(render(&Type::FLOAT4, "0.1"), json!(0.1));
    assert_eq!(render(&Type::FLOAT8, "NaN"), json!("NaN"));
    assert_eq!(render(&Type::FLOAT8, "Infinity"), json!("Infinity"));
    assert_eq!(render(&Type::FLOAT8, "-Infinity"), json!("-Infinity"));
    assert_eq!(render(&Type::FLOAT8, "1e+100"), json!(1e100));
}

#[test]
fn test_json_uuid_bytea() {
    assert_eq!(
        value(&Type::JSONB, r#"{"a": [1, 2]}"#),
        PgValue::Json(json!({"a": [1, 2]}))
    );
    assert_eq!(
        render(&Type::UUID, "67e55044-10b1-426f-9247-bb680e5fe0c8"),
        json!("67e55044-10b1-426f-9247-bb680e5fe0c8")
    );
    assert_eq!(value(&Type::BYTEA, "\\xdead01"), PgValue::Bytes(vec![0xde, 0xad, 0x01]));
    assert_eq!(render(&Type::BYTEA, "\\xdead01"), json!("\\xdead01"));
    // bytea_output = 'escape'
    assert_eq!(render(&Type::BYTEA, "abc\\000"), json!("abc\\000"));
}

#[test]
fn test_types_without_rule_keep_server_text() {
    assert_eq!(render(&Type::INET, "10.0.0.1"), json!("10.0.0.1"));
    assert_eq!(render(&Type::CIDR, "10.0.0.0/8"), json!("10.0.0.0/8"));
    assert_eq!(render(&Type::MACADDR, "08:00:2b:01:02:03"), json!("08:00:2b:01:02:03"));
    assert_eq!(render(&Type::MONEY, "$12.50"), json!("$12.50"));
    assert_eq!(render(&Type::XML, "<a>x</a>"), json!("<a>x</a>"));
    assert_eq!(render(&Type::BIT, "101"), json!("101"));
    assert_eq!(render(&Type::POINT, "(1,2)"), json!("(1,2)"));
    assert_eq!(render(&Type::INT4_RANGE, "[1,5)"), json!("[1,5)"));
}

#[test]
fn test_enum_and_domain() {
    let mood = Type::new(
        "mood".to_string(),
        90_001,
        Kind::Enum(vec!["happy".to_string(), "sad".to_string()]),
        "public".to_string(),
    );
    assert_eq!(render(&mood, "happy"), json!("happy"));

    let port = Type::new(
        "port_number".to_string(),
        90_002,
        Kind::Domain(Type::INT4),
        "public".to_string(),
    );
    assert_eq!(value(&port, "5432"), PgValue::Int(5432));
}

#[test]
fn test_malformed_values_are_errors() {
    assert!(PgValue::from_text(&Type::INT4, Some("abc")).is_err());
    assert!(PgValue::from_text(&Type::BOOL, Some("yes")).is_err());
    assert!(PgValue::from_text(&Type::JSON, Some("{")).is_err());
    assert!(PgValue::from_text(&Type::INT4_ARRAY, Some("{1,2")).is_err());
}

// ===== Date/time from text =====

#[test]
fn test_timestamp() {
    assert_eq!(render(&Type::TIMESTAMP, "2024-03-01 13:45:00"), json!("2024-03-01 13:45:00"));
    assert_eq!(
        render(&Type::TIMESTAMP, "2000-01-02 00:00:00.5"),
        json!("2000-01-02 00:00:00.500000")
    );
}

#[test]
fn test_timestamptz_keeps_session_zone() {
    assert_eq!(
        render(&Type::TIMESTAMPTZ, "2024-07-01 15:00:00+03"),
        json!("2024-07-01 15:00:00+03:00")
    );
    assert_eq!(
        render(&Type::TIMESTAMPTZ, "2024-07-01 07:00:00.25-05"),
        json!("2024-07-01 07:00:00.250000-05:00")
    );
    assert_eq!(
        render(&Type::TIMESTAMPTZ, "2024-07-01 17:30:00+05:30"),
        json!("2024-07-01 17:30:00+05:30")
    );
    assert_eq!(
        render(&Type::TIMESTAMPTZ, "1890-01-01 00:00:00+01:24:04"),
        json!("1890-01-01 00:00:00+01:24:04")
    );
}

#[test]
fn test_time_and_timetz() {
    assert_eq!(render(&Type::TIME, "08:30:00"), json!("08:30:00"));
    assert_eq!(render(&Type::TIME, "08:30:00.000120"), json!("08:30:00.000120"));
    assert_eq!(
        render(&Type::TIMETZ, "12:00:00.25+02"),
        json!("12:00:00.250000+02:00")
    );
    assert_eq!(
        value(&Type::TIMETZ, "12:00:00-03:30"),
        PgValue::TimeTz(
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            FixedOffset::west_opt(12_600).unwrap()
        )
    );
}

#[test]
fn test_end_of_day_time() {
    assert_eq!(value(&Type::TIME, "24:00:00"), PgValue::EndOfDay(None));
    assert_eq!(render(&Type::TIME, "24:00:00"), json!("24:00:00"));
    assert_eq!(render(&Type::TIMETZ, "24:00:00+03"), json!("24:00:00+03:00"));
}

#[test]
fn test_date() {
    assert_eq!(
        value(&Type::DATE, "1999-12-31"),
        PgValue::Date(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap())
    );
    assert_eq!(render(&Type::DATE, "1999-12-31"), json!("1999-12-31"));
}

#[test]
fn test_infinite_dates_and_timestamps() {
    assert_eq!(value(&Type::DATE, "infinity"), PgValue::Infinite { negative: false });
    assert_eq!(render(&Type::TIMESTAMP, "-infinity"), json!("-infinity"));
    assert_eq!(render(&Type::TIMESTAMPTZ, "infinity"), json!("infinity"));
}

#[test]
fn test_unparsed_temporal_text_is_kept() {
    assert_eq!(render(&Type::DATE, "0044-03-15 BC"), json!("0044-03-15 BC"));
    assert_eq!(
        render(&Type::TIMESTAMPTZ, "0044-03-15 12:00:00+00 BC"),
        json!("0044-03-15 12:00:00+00 BC")
    );
}

#[test]
fn test_interval_uses_server_rendering() {
    assert_eq!(render(&Type::INTERVAL, "1 year 2 mons 3 days 04:05:06.5"), json!("1 year 2 mons 3 days 04:05:06.5"));
    assert_eq!(render(&Type::INTERVAL, "-1 mons +2 days"), json!("-1 mons +2 days"));
    assert_eq!(render(&Type::INTERVAL, "-1 days +01:00:00"), json!("-1 days +01:00:00"));
    assert_eq!(render(&Type::INTERVAL, "00:00:00"), json!("00:00:00"));
}

// ===== Arrays from text =====

#[test]
fn test_int_array_with_null() {
    let array = value(&Type::INT4_ARRAY, "{1,NULL,3}");
    assert_eq!(
        array,
        PgValue::Array(vec![PgValue::Int(1), PgValue::Null, PgValue::Int(3)])
    );
    assert_eq!(to_json(array), json!([1, null, 3]));
}

#[test]
fn test_text_array() {
    assert_eq!(
        render(&Type::TEXT_ARRAY, r#"{"a b",NULL,"NULL","q\"x"}"#),
        json!(["a b", null, "NULL", "q\"x"])
    );
}

#[test]
fn test_multidimensional_array() {
    assert_eq!(
        render(&Type::INT4_ARRAY, "{{1,2},{3,4}}"),
        json!([[1, 2], [3, 4]])
    );
}

#[test]
fn test_temporal_and_fallback_arrays() {
    assert_eq!(
        render(&Type::TIMESTAMPTZ_ARRAY, r#"{"2024-07-01 15:00:00+03",NULL}"#),
        json!(["2024-07-01 15:00:00+03:00", null])
    );
    assert_eq!(
        render(&Type::INET_ARRAY, "{10.0.0.1,::1}"),
        json!(["10.0.0.1", "::1"])
    );
    assert_eq!(
        render(&Type::BOX_ARRAY, "{(1,1),(0,0);(2,2),(1,1)}"),
        json!(["(1,1),(0,0)", "(2,2),(1,1)"])
    );
}

// ===== JSON conversion =====

#[test]
fn test_convert_scalars() {
    assert_eq!(to_json(PgValue::Null), JsonValue::Null);
    assert_eq!(to_json(PgValue::Bool(false)), json!(false));
    assert_eq!(to_json(PgValue::Int(42)), json!(42));
    assert_eq!(to_json(PgValue::Float(1.25)), json!(1.25));
    assert_eq!(to_json(PgValue::Text("x".to_string())), json!("x"));
}

#[test]
fn test_convert_numeric() {
    assert_eq!(to_json(PgValue::Numeric("123".to_string())), json!(123));
    assert_eq!(to_json(PgValue::Numeric("1.50".to_string())), json!(1.5));
    assert_eq!(
        to_json(PgValue::Numeric("123456789012345678901234567890".to_string())),
        json!("123456789012345678901234567890")
    );
    assert_eq!(
        to_json(PgValue::Numeric("0.12345678901234567890".to_string())),
        json!("0.12345678901234567890")
    );
    assert_eq!(to_json(PgValue::Numeric("NaN".to_string())), json!("NaN"));
}

#[test]
fn test_convert_json_is_embedded() {
    let doc = json!({"nested": {"k": [true, null]}});
    assert_eq!(to_json(PgValue::Json(doc.clone())), doc);
}

#[test]
fn test_convert_row_keeps_column_order() {
    let columns = vec!["z".to_string(), "a".to_string(), "m".to_string()];
    let values = vec![PgValue::Int(1), PgValue::Int(2), PgValue::Int(3)];
    let row = JsonConverter::new().convert_row(&columns, &values);
    let keys: Vec<&str> = row.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_convert_row_duplicate_columns() {
    let columns = vec!["id".to_string(), "name".to_string(), "id".to_string()];
    let values = vec![
        PgValue::Int(1),
        PgValue::Text("a".to_string()),
        PgValue::Int(2),
    ];
    let row = JsonConverter::new().convert_row(&columns, &values);
    assert_eq!(row.len(), 2);
    let keys: Vec<&str> = row.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "name"]);
    assert_eq!(row["id"], json!(2));
}
