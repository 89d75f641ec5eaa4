use model::core::value::Value;
use rusqlite::types::Value as SqliteValue;

/// SQLite has no dedicated date, uuid or json storage; those bind as text.
pub fn to_sqlite_value(value: &Value) -> SqliteValue {
    match value {
        Value::Int(v) => SqliteValue::Integer(*v),
        Value::Uint(v) => SqliteValue::Integer(i64::try_from(*v).unwrap_or(i64::MAX)),
        Value::Float(v) => SqliteValue::Real(*v),
        Value::String(v) => SqliteValue::Text(v.clone()),
        Value::Boolean(v) => SqliteValue::Integer(i64::from(*v)),
        Value::Json(v) => SqliteValue::Text(v.to_string()),
        Value::Uuid(v) => SqliteValue::Text(v.to_string()),
        Value::Bytes(v) => SqliteValue::Blob(v.clone()),
        Value::Date(v) => SqliteValue::Text(v.format("%Y-%m-%d").to_string()),
        Value::Timestamp(v) => SqliteValue::Text(v.to_rfc3339()),
        Value::TimestampNaive(v) => SqliteValue::Text(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        Value::Null => SqliteValue::Null,
    }
}

pub fn to_sqlite_values(values: &[Value]) -> Vec<SqliteValue> {
    values.iter().map(to_sqlite_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_value_mapping() {
        assert_eq!(to_sqlite_value(&Value::Boolean(true)), SqliteValue::Integer(1));
        assert_eq!(
            to_sqlite_value(&Value::Uint(u64::MAX)),
            SqliteValue::Integer(i64::MAX)
        );
        assert_eq!(
            to_sqlite_value(&Value::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())),
            SqliteValue::Text("2024-01-02".into())
        );
        assert_eq!(to_sqlite_value(&Value::Null), SqliteValue::Null);
    }
}
