use core::fmt;
use model::{
    core::{
        data_type::DataType,
        value::{FieldValue, Value},
    },
    records::row::RowData,
};
use mysql_async::{Row as MySqlRow, consts::ColumnType};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::fmt::Formatter;
use tokio_postgres::{Row as PgRow, types::Json as PgJson};
use tracing::warn;
use uuid::Uuid;

/// MySQL marks binary strings with this character set id.
const MYSQL_BINARY_CHARSET: u16 = 63;

pub enum DbRow<'a> {
    MySqlRow(&'a MySqlRow),
    PostgresRow(&'a PgRow),
}

impl DbRow<'_> {
    pub fn to_row_data(&self, table: &str) -> RowData {
        let field_values = self
            .columns()
            .into_iter()
            .enumerate()
            .map(|(idx, (name, type_name))| {
                let data_type = DataType::from_db_type(&type_name).unwrap_or_else(|| {
                    warn!(column = %name, db_type = %type_name, "Unknown column type, reading as text");
                    DataType::Text
                });

                FieldValue {
                    value: self.get_value(idx, data_type),
                    name,
                }
            })
            .collect();

        RowData::new(table, field_values)
    }

    pub fn get_value(&self, idx: usize, data_type: DataType) -> Option<Value> {
        match data_type {
            DataType::Int => self.try_get_i64(idx).map(Value::Int),
            DataType::Float => self.try_get_f64(idx).map(Value::Float),
            DataType::Text => self.try_get_string(idx).map(Value::String),
            DataType::Boolean => self.try_get_bool(idx).map(Value::Boolean),
            DataType::Json => self.try_get_json(idx).map(Value::Json),
            DataType::Timestamp => self.try_get_timestamp(idx),
            DataType::Date => self.try_get_date(idx).map(Value::Date),
            DataType::Uuid => self.try_get_uuid(idx).map(Value::Uuid),
            DataType::Bytes => self.try_get_bytes(idx).map(Value::Bytes),
        }
    }

    /// Column names with their database type names, in select order.
    pub fn columns(&self) -> Vec<(String, String)> {
        match self {
            DbRow::MySqlRow(row) => row
                .columns_ref()
                .iter()
                .map(|col| {
                    let binary = col.character_set() == MYSQL_BINARY_CHARSET;
                    (
                        col.name_str().into_owned(),
                        mysql_type_name(col.column_type(), binary).to_string(),
                    )
                })
                .collect(),
            DbRow::PostgresRow(row) => row
                .columns()
                .iter()
                .map(|col| (col.name().to_string(), col.type_().name().to_string()))
                .collect(),
        }
    }

    pub fn try_get_i64(&self, idx: usize) -> Option<i64> {
        match self {
            DbRow::MySqlRow(row) => row.get_opt::<i64, _>(idx).and_then(|res| res.ok()),
            DbRow::PostgresRow(row) => row
                .try_get::<_, i64>(idx)
                .ok()
                .or_else(|| row.try_get::<_, i32>(idx).ok().map(i64::from))
                .or_else(|| row.try_get::<_, i16>(idx).ok().map(i64::from)),
        }
    }

    pub fn try_get_f64(&self, idx: usize) -> Option<f64> {
        match self {
            DbRow::MySqlRow(row) => row.get_opt::<f64, _>(idx).and_then(|res| res.ok()),
            DbRow::PostgresRow(row) => row
                .try_get::<_, f64>(idx)
                .ok()
                .or_else(|| row.try_get::<_, f32>(idx).ok().map(f64::from))
                .or_else(|| {
                    row.try_get::<_, Decimal>(idx)
                        .ok()
                        .and_then(|v| v.to_f64())
                }),
        }
    }

    pub fn try_get_string(&self, idx: usize) -> Option<String> {
        match self {
            DbRow::MySqlRow(row) => row.get_opt::<String, _>(idx).and_then(|res| res.ok()),
            DbRow::PostgresRow(row) => row.try_get::<_, String>(idx).ok(),
        }
    }

    pub fn try_get_bool(&self, idx: usize) -> Option<bool> {
        match self {
            DbRow::MySqlRow(row) => row.get_opt::<bool, _>(idx).and_then(|res| res.ok()),
            DbRow::PostgresRow(row) => row.try_get::<_, bool>(idx).ok(),
        }
    }

    pub fn try_get_json(&self, idx: usize) -> Option<serde_json::Value> {
        match self {
            DbRow::MySqlRow(row) => row
                .get_opt::<serde_json::Value, _>(idx)
                .and_then(|res| res.ok()),
            DbRow::PostgresRow(row) => row
                .try_get::<_, PgJson<serde_json::Value>>(idx)
                .ok()
                .map(|json| json.0),
        }
    }

    pub fn try_get_timestamp(&self, idx: usize) -> Option<Value> {
        match self {
            DbRow::MySqlRow(row) => row
                .get_opt::<chrono::NaiveDateTime, _>(idx)
                .and_then(|res| res.ok())
                .map(Value::TimestampNaive),
            DbRow::PostgresRow(row) => row
                .try_get::<_, chrono::DateTime<chrono::Utc>>(idx)
                .ok()
                .map(Value::Timestamp)
                .or_else(|| {
                    row.try_get::<_, chrono::NaiveDateTime>(idx)
                        .ok()
                        .map(Value::TimestampNaive)
                }),
        }
    }

    pub fn try_get_date(&self, idx: usize) -> Option<chrono::NaiveDate> {
        match self {
            DbRow::MySqlRow(row) => row
                .get_opt::<chrono::NaiveDate, _>(idx)
                .and_then(|res| res.ok()),
            DbRow::PostgresRow(row) => row.try_get::<_, chrono::NaiveDate>(idx).ok(),
        }
    }

    pub fn try_get_uuid(&self, idx: usize) -> Option<Uuid> {
        match self {
            DbRow::MySqlRow(_) => self
                .try_get_string(idx)
                .and_then(|s| Uuid::parse_str(&s).ok()),
            DbRow::PostgresRow(row) => row.try_get::<_, Uuid>(idx).ok(),
        }
    }

    pub fn try_get_bytes(&self, idx: usize) -> Option<Vec<u8>> {
        match self {
            DbRow::MySqlRow(row) => row.get_opt::<Vec<u8>, _>(idx).and_then(|res| res.ok()),
            DbRow::PostgresRow(row) => row.try_get::<_, Vec<u8>>(idx).ok(),
        }
    }
}

fn mysql_type_name(column_type: ColumnType, binary: bool) -> &'static str {
    match column_type {
        ColumnType::MYSQL_TYPE_TINY => "TINYINT",
        ColumnType::MYSQL_TYPE_SHORT => "SMALLINT",
        ColumnType::MYSQL_TYPE_INT24 => "MEDIUMINT",
        ColumnType::MYSQL_TYPE_LONG => "INT",
        ColumnType::MYSQL_TYPE_LONGLONG => "BIGINT",
        ColumnType::MYSQL_TYPE_YEAR => "YEAR",
        ColumnType::MYSQL_TYPE_FLOAT => "FLOAT",
        ColumnType::MYSQL_TYPE_DOUBLE => "DOUBLE",
        ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL => "DECIMAL",
        ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE => "DATE",
        ColumnType::MYSQL_TYPE_DATETIME
        | ColumnType::MYSQL_TYPE_DATETIME2
        | ColumnType::MYSQL_TYPE_TIMESTAMP
        | ColumnType::MYSQL_TYPE_TIMESTAMP2 => "DATETIME",
        ColumnType::MYSQL_TYPE_JSON => "JSON",
        ColumnType::MYSQL_TYPE_TINY_BLOB
        | ColumnType::MYSQL_TYPE_MEDIUM_BLOB
        | ColumnType::MYSQL_TYPE_LONG_BLOB
        | ColumnType::MYSQL_TYPE_BLOB
        | ColumnType::MYSQL_TYPE_VAR_STRING
        | ColumnType::MYSQL_TYPE_STRING
        | ColumnType::MYSQL_TYPE_VARCHAR
            if binary =>
        {
            "BLOB"
        }
        ColumnType::MYSQL_TYPE_GEOMETRY | ColumnType::MYSQL_TYPE_BIT => "BLOB",
        _ => "VARCHAR",
    }
}

impl fmt::Debug for DbRow<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DbRow::MySqlRow(row) => write!(f, "{row:?}"),
            DbRow::PostgresRow(row) => write!(f, "{row:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_type_names_resolve() {
        assert_eq!(
            DataType::from_db_type(mysql_type_name(ColumnType::MYSQL_TYPE_LONGLONG, false)),
            Some(DataType::Int)
        );
        assert_eq!(
            DataType::from_db_type(mysql_type_name(ColumnType::MYSQL_TYPE_BLOB, false)),
            Some(DataType::Text)
        );
        assert_eq!(
            DataType::from_db_type(mysql_type_name(ColumnType::MYSQL_TYPE_BLOB, true)),
            Some(DataType::Bytes)
        );
        assert_eq!(
            DataType::from_db_type(mysql_type_name(ColumnType::MYSQL_TYPE_TIMESTAMP2, false)),
            Some(DataType::Timestamp)
        );
    }
}
