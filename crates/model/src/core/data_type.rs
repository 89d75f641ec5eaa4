use crate::{core::value::Value, error::ModelError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};
use uuid::Uuid;

/// Logical column type used to coerce raw request strings into typed values
/// and to interpret values read back from a database.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    Text,
    Int,
    Float,
    Boolean,
    Date,
    Timestamp,
    Uuid,
    Json,
    Bytes,
}

lazy_static! {
    static ref DB_TYPE_MAP: HashMap<&'static str, DataType> = build_db_type_map();
}

impl DataType {
    /// Maps a database column type name (Postgres, MySQL or SQLite spelling)
    /// onto a logical type. Unknown names yield `None`.
    pub fn from_db_type(type_name: &str) -> Option<Self> {
        let normalized = Self::normalize_type_name(type_name);
        if let Some(data_type) = DB_TYPE_MAP.get(normalized.as_str()) {
            return Some(*data_type);
        }

        // Parameterized names such as VARCHAR(255) or DECIMAL(10,2)
        let base = normalized
            .split('(')
            .next()
            .map(str::trim)
            .unwrap_or_default();
        DB_TYPE_MAP.get(base).copied()
    }

    /// Converts a raw, already trimmed request value into a typed [`Value`].
    pub fn coerce(&self, raw: &str) -> Result<Value, ModelError> {
        let invalid = |reason: String| ModelError::InvalidValue {
            raw: raw.to_string(),
            data_type: *self,
            reason,
        };

        match self {
            DataType::Text => Ok(Value::String(raw.to_string())),
            DataType::Int => raw
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| invalid(e.to_string())),
            DataType::Float => raw
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| invalid(e.to_string())),
            DataType::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "t" | "yes" => Ok(Value::Boolean(true)),
                "false" | "0" | "f" | "no" => Ok(Value::Boolean(false)),
                _ => Err(invalid("expected a boolean".into())),
            },
            DataType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|e| invalid(e.to_string())),
            DataType::Timestamp => parse_timestamp(raw).ok_or_else(|| {
                invalid("expected RFC 3339 or 'YYYY-MM-DD[ HH:MM:SS]'".into())
            }),
            DataType::Uuid => Uuid::parse_str(raw)
                .map(Value::Uuid)
                .map_err(|e| invalid(e.to_string())),
            DataType::Json => serde_json::from_str(raw)
                .map(Value::Json)
                .map_err(|e| invalid(e.to_string())),
            DataType::Bytes => Ok(Value::Bytes(raw.as_bytes().to_vec())),
        }
    }

    fn normalize_type_name(type_name: &str) -> String {
        type_name.trim().to_uppercase()
    }
}

fn parse_timestamp(raw: &str) -> Option<Value> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(Value::Timestamp(ts.with_timezone(&Utc)));
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Value::TimestampNaive(naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(Value::TimestampNaive)
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Text => "text",
            DataType::Int => "integer",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::Timestamp => "timestamp",
            DataType::Uuid => "uuid",
            DataType::Json => "json",
            DataType::Bytes => "bytes",
        };
        f.write_str(name)
    }
}

fn build_db_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("BOOLEAN", Boolean),
        ("BOOL", Boolean),
        ("TINYINT", Int),
        ("SMALLINT", Int),
        ("MEDIUMINT", Int),
        ("INT", Int),
        ("INTEGER", Int),
        ("BIGINT", Int),
        ("INT2", Int),
        ("INT4", Int),
        ("INT8", Int),
        ("SMALLSERIAL", Int),
        ("SERIAL", Int),
        ("BIGSERIAL", Int),
        ("YEAR", Int),
        ("FLOAT", Float),
        ("FLOAT4", Float),
        ("FLOAT8", Float),
        ("REAL", Float),
        ("DOUBLE", Float),
        ("DOUBLE PRECISION", Float),
        ("DECIMAL", Float),
        ("NUMERIC", Float),
        ("DATE", Date),
        ("DATETIME", Timestamp),
        ("TIMESTAMP", Timestamp),
        ("TIMESTAMPTZ", Timestamp),
        ("TIMESTAMP WITHOUT TIME ZONE", Timestamp),
        ("TIMESTAMP WITH TIME ZONE", Timestamp),
        ("UUID", Uuid),
        ("JSON", Json),
        ("JSONB", Json),
        ("CHAR", Text),
        ("CHARACTER", Text),
        ("BPCHAR", Text),
        ("VARCHAR", Text),
        ("CHARACTER VARYING", Text),
        ("TEXT", Text),
        ("TINYTEXT", Text),
        ("MEDIUMTEXT", Text),
        ("LONGTEXT", Text),
        ("NAME", Text),
        ("ENUM", Text),
        ("BYTEA", Bytes),
        ("BLOB", Bytes),
        ("TINYBLOB", Bytes),
        ("MEDIUMBLOB", Bytes),
        ("LONGBLOB", Bytes),
        ("BINARY", Bytes),
        ("VARBINARY", Bytes),
    ];

    let mut map = HashMap::new();
    for (name, data_type) in entries {
        map.insert(name, data_type);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_db_type_handles_dialect_spellings() {
        assert_eq!(DataType::from_db_type("int4"), Some(DataType::Int));
        assert_eq!(DataType::from_db_type("BIGINT"), Some(DataType::Int));
        assert_eq!(DataType::from_db_type("varchar(255)"), Some(DataType::Text));
        assert_eq!(
            DataType::from_db_type("timestamp with time zone"),
            Some(DataType::Timestamp)
        );
        assert_eq!(DataType::from_db_type("geometry"), None);
    }

    #[test]
    fn test_coerce_scalars() {
        assert_eq!(DataType::Int.coerce("42").unwrap(), Value::Int(42));
        assert_eq!(DataType::Float.coerce("1.5").unwrap(), Value::Float(1.5));
        assert_eq!(
            DataType::Boolean.coerce("TRUE").unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            DataType::Text.coerce("hello").unwrap(),
            Value::String("hello".into())
        );
    }

    #[test]
    fn test_coerce_uuid_and_dates() {
        let id = Uuid::new_v4();
        assert_eq!(
            DataType::Uuid.coerce(&id.to_string()).unwrap(),
            Value::Uuid(id)
        );

        let date = DataType::Date.coerce("2024-02-29").unwrap();
        assert_eq!(
            date,
            Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );

        assert!(matches!(
            DataType::Timestamp.coerce("2024-01-01T10:00:00Z").unwrap(),
            Value::Timestamp(_)
        ));
        assert!(matches!(
            DataType::Timestamp.coerce("2024-01-01 10:00:00").unwrap(),
            Value::TimestampNaive(_)
        ));
        assert!(matches!(
            DataType::Timestamp.coerce("2024-01-01").unwrap(),
            Value::TimestampNaive(_)
        ));
    }

    #[test]
    fn test_coerce_rejects_malformed_input() {
        let err = DataType::Int.coerce("abc").unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidValue {
                data_type: DataType::Int,
                ..
            }
        ));
        assert!(DataType::Boolean.coerce("maybe").is_err());
        assert!(DataType::Date.coerce("29/02/2024").is_err());
    }
}
