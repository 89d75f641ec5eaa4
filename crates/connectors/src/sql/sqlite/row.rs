use crate::sql::base::error::DbError;
use model::{
    core::{
        data_type::DataType,
        value::{FieldValue, Value},
    },
    records::row::RowData,
};
use rusqlite::{Row, Statement, types::ValueRef};

/// Name and declared type of each result column.
pub type SqliteColumns = Vec<(String, Option<DataType>)>;

pub fn statement_columns(stmt: &Statement<'_>) -> SqliteColumns {
    stmt.columns()
        .iter()
        .map(|col| {
            let data_type = col.decl_type().and_then(DataType::from_db_type);
            (col.name().to_string(), data_type)
        })
        .collect()
}

pub fn to_row_data(
    table: &str,
    columns: &SqliteColumns,
    row: &Row<'_>,
) -> Result<RowData, DbError> {
    let mut field_values = Vec::with_capacity(columns.len());
    for (idx, (name, data_type)) in columns.iter().enumerate() {
        let value = read_value(row.get_ref(idx)?, *data_type);
        field_values.push(FieldValue {
            name: name.clone(),
            value,
        });
    }
    Ok(RowData::new(table, field_values))
}

fn read_value(raw: ValueRef<'_>, data_type: Option<DataType>) -> Option<Value> {
    match raw {
        ValueRef::Null => None,
        ValueRef::Integer(i) if data_type == Some(DataType::Boolean) => {
            Some(Value::Boolean(i != 0))
        }
        ValueRef::Integer(i) => Some(Value::Int(i)),
        ValueRef::Real(f) => Some(Value::Float(f)),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            if data_type == Some(DataType::Json) {
                if let Ok(json) = serde_json::from_str(&text) {
                    return Some(Value::Json(json));
                }
            }
            Some(Value::String(text))
        }
        ValueRef::Blob(bytes) => Some(Value::Bytes(bytes.to_vec())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_value_uses_declared_type() {
        assert_eq!(
            read_value(ValueRef::Integer(1), Some(DataType::Boolean)),
            Some(Value::Boolean(true))
        );
        assert_eq!(
            read_value(ValueRef::Integer(1), Some(DataType::Int)),
            Some(Value::Int(1))
        );
        assert_eq!(
            read_value(ValueRef::Text(br#"{"a":1}"#), Some(DataType::Json)),
            Some(Value::Json(json!({"a": 1})))
        );
        assert_eq!(
            read_value(ValueRef::Text(b"plain"), Some(DataType::Json)),
            Some(Value::from("plain"))
        );
        assert_eq!(read_value(ValueRef::Null, None), None);
    }
}
