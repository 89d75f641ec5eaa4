use crate::sql::base::error::DbError;
use model::core::{data_type::DataType, value::Value};
use rust_decimal::Decimal;
use std::str::FromStr;
use tokio_postgres::types::{Json as PgJson, ToSql, Type};

pub type PgParam = Box<dyn ToSql + Sync + Send>;

pub fn to_pg_param(value: Value) -> PgParam {
    match value {
        Value::Int(v) => Box::new(v),
        // Postgres has no unsigned types; bound against an int8 cast.
        Value::Uint(v) => Box::new(i64::try_from(v).unwrap_or(i64::MAX)),
        Value::Float(v) => Box::new(v),
        Value::String(v) => Box::new(v),
        Value::Boolean(v) => Box::new(v),
        Value::Json(v) => Box::new(PgJson(v)),
        Value::Uuid(v) => Box::new(v),
        Value::Bytes(v) => Box::new(v),
        Value::Date(v) => Box::new(v),
        Value::Timestamp(v) => Box::new(v),
        Value::TimestampNaive(v) => Box::new(v),
        Value::Null => Box::new(Option::<String>::None),
    }
}

/// Binds values against the parameter types of a prepared statement.
///
/// Typed values carry their own cast and bind as-is. Strings come from
/// fields without a type hint and are parsed into the type the server
/// inferred for their placeholder, so `id:gt=90` compares as a number.
pub fn to_typed_pg_params(values: Vec<Value>, types: &[Type]) -> Result<Vec<PgParam>, DbError> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| match (value, types.get(i)) {
            (Value::String(raw), Some(ty)) => parse_as(&raw, ty),
            (value, _) => Ok(to_pg_param(value)),
        })
        .collect()
}

fn parse_as(raw: &str, ty: &Type) -> Result<PgParam, DbError> {
    let invalid = |reason: String| DbError::InvalidParam {
        value: raw.to_string(),
        sql_type: ty.name().to_string(),
        reason,
    };

    // Narrow numeric types need the matching Rust width.
    let param: PgParam = match ty.name() {
        "int2" => Box::new(raw.parse::<i16>().map_err(|e| invalid(e.to_string()))?),
        "int4" => Box::new(raw.parse::<i32>().map_err(|e| invalid(e.to_string()))?),
        "float4" => Box::new(raw.parse::<f32>().map_err(|e| invalid(e.to_string()))?),
        "numeric" => Box::new(Decimal::from_str(raw).map_err(|e| invalid(e.to_string()))?),
        name => match DataType::from_db_type(name) {
            None | Some(DataType::Text) => Box::new(raw.to_string()),
            Some(data_type) => {
                let value = data_type.coerce(raw).map_err(|e| invalid(e.to_string()))?;
                to_pg_param(align_timestamp(value, ty))
            }
        },
    };
    Ok(param)
}

fn align_timestamp(value: Value, ty: &Type) -> Value {
    match value {
        Value::TimestampNaive(ts) if *ty == Type::TIMESTAMPTZ => Value::Timestamp(ts.and_utc()),
        Value::Timestamp(ts) if *ty == Type::TIMESTAMP => Value::TimestampNaive(ts.naive_utc()),
        other => other,
    }
}

/// Borrowed view in the shape `Client::query` expects.
pub fn param_refs(params: &[PgParam]) -> Vec<&(dyn ToSql + Sync)> {
    params
        .iter()
        .map(|p| p.as_ref() as &(dyn ToSql + Sync))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint_saturates() {
        let values = vec![Value::Uint(u64::MAX), Value::Uint(7), Value::Null];
        let params = to_typed_pg_params(values, &[]).unwrap();
        assert_eq!(format!("{:?}", params[0]), i64::MAX.to_string());
        assert_eq!(format!("{:?}", params[1]), "7");
        assert_eq!(format!("{:?}", params[2]), "None");
        assert_eq!(param_refs(&params).len(), 3);
    }

    #[test]
    fn test_untyped_strings_follow_param_types() {
        let values = vec![
            Value::from("90"),
            Value::from("7"),
            Value::from("1.50"),
            Value::from("alice"),
            Value::Int(3),
        ];
        let types = [Type::INT8, Type::INT4, Type::NUMERIC, Type::VARCHAR, Type::INT4];

        let params = to_typed_pg_params(values, &types).unwrap();
        let rendered: Vec<String> = params.iter().map(|p| format!("{p:?}")).collect();
        assert_eq!(rendered, vec!["90", "7", "1.50", r#""alice""#, "3"]);
    }

    #[test]
    fn test_untyped_timestamp_matches_zone() {
        let params = to_typed_pg_params(
            vec![Value::from("2024-01-02 03:04:05"), Value::from("2024-01-02T03:04:05Z")],
            &[Type::TIMESTAMPTZ, Type::TIMESTAMP],
        )
        .unwrap();
        assert_eq!(format!("{:?}", params[0]), "2024-01-02T03:04:05Z");
        assert_eq!(format!("{:?}", params[1]), "2024-01-02T03:04:05");
    }

    #[test]
    fn test_unparseable_string_is_rejected() {
        let err = to_typed_pg_params(vec![Value::from("abc")], &[Type::INT8]).unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidParam { ref value, ref sql_type, .. } if value == "abc" && sql_type == "int8"
        ));
    }
}
