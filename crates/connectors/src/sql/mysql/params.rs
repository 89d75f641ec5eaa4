use chrono::{Datelike, NaiveDateTime, Timelike};
use model::core::value::Value;
use mysql_async::Value as MySqlValue;
use mysql_common::params::Params;

pub fn to_mysql_value(value: &Value) -> MySqlValue {
    match value {
        Value::Int(i) => MySqlValue::Int(*i),
        Value::Uint(u) => MySqlValue::UInt(*u),
        Value::Float(f) => MySqlValue::Double(*f),
        Value::String(s) => MySqlValue::Bytes(s.clone().into_bytes()),
        Value::Boolean(b) => MySqlValue::Int(i64::from(*b)),
        Value::Json(j) => MySqlValue::Bytes(j.to_string().into_bytes()),
        Value::Uuid(u) => MySqlValue::Bytes(u.to_string().into_bytes()),
        Value::Bytes(b) => MySqlValue::Bytes(b.clone()),
        Value::Date(d) => {
            MySqlValue::Date(d.year() as u16, d.month() as u8, d.day() as u8, 0, 0, 0, 0)
        }
        Value::Timestamp(ts) => datetime(&ts.naive_utc()),
        Value::TimestampNaive(ts) => datetime(ts),
        Value::Null => MySqlValue::NULL,
    }
}

fn datetime(ts: &NaiveDateTime) -> MySqlValue {
    MySqlValue::Date(
        ts.year() as u16,
        ts.month() as u8,
        ts.day() as u8,
        ts.hour() as u8,
        ts.minute() as u8,
        ts.second() as u8,
        ts.and_utc().timestamp_subsec_micros(),
    )
}

/// Positional parameters for the `?` placeholders, `Params::Empty` when
/// there are none.
pub fn to_mysql_params(values: &[Value]) -> Params {
    if values.is_empty() {
        return Params::Empty;
    }
    Params::Positional(values.iter().map(to_mysql_value).collect())
}
