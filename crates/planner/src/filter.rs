//! Filter compilation.
//!
//! Each request entry is keyed `field` or `field:op` and becomes one
//! predicate. Entries are independent and AND-combined by the caller.

use crate::{
    error::PlanError,
    options::{CompileOptions, FieldPolicy},
    predicate::{CompareOp, Predicate},
    resolve::{FieldMap, FieldTarget},
};
use model::{core::value::Value, schema::Namespace};
use std::{collections::BTreeMap, fmt, str::FromStr};
use tracing::debug;

pub const OPERATOR_SEPARATOR: char = ':';
pub const LIST_SEPARATOR: char = ',';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterOperator {
    #[default]
    Eq,
    Ne,
    Like,
    Contain,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Ne => "ne",
            FilterOperator::Like => "like",
            FilterOperator::Contain => "contain",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::In => "in",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(FilterOperator::Eq),
            "ne" => Ok(FilterOperator::Ne),
            "like" => Ok(FilterOperator::Like),
            "contain" => Ok(FilterOperator::Contain),
            "gt" => Ok(FilterOperator::Gt),
            "gte" => Ok(FilterOperator::Gte),
            "lt" => Ok(FilterOperator::Lt),
            "lte" => Ok(FilterOperator::Lte),
            "in" => Ok(FilterOperator::In),
            other => Err(format!("Unknown filter operator: {other}")),
        }
    }
}

/// Splits `field:op` at the first separator. A key without one is `eq`.
pub fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once(OPERATOR_SEPARATOR) {
        Some((field, op)) => (field, Some(op)),
        None => (key, None),
    }
}

pub fn compile_filter(
    map: &FieldMap,
    filters: &BTreeMap<String, String>,
    options: &CompileOptions,
) -> Result<Vec<Predicate>, PlanError> {
    let mut predicates = Vec::with_capacity(filters.len());

    for (key, raw) in filters {
        match compile_entry(map, key, raw) {
            Ok(predicate) => predicates.push(predicate),
            Err(err) if options.policy == FieldPolicy::Strict => return Err(err),
            Err(err) => debug!(key = %key, error = %err, "Skipping filter entry"),
        }
    }

    Ok(predicates)
}

fn compile_entry(map: &FieldMap, key: &str, raw: &str) -> Result<Predicate, PlanError> {
    let (field, op) = split_key(key);

    let target = map.get(field).ok_or_else(|| PlanError::UnknownField {
        namespace: Namespace::Filter,
        field: field.to_string(),
    })?;
    let column = target.column();
    if column.is_empty() {
        return Err(PlanError::UnknownField {
            namespace: Namespace::Filter,
            field: field.to_string(),
        });
    }

    let op = match op {
        Some(op) => op.parse::<FilterOperator>().map_err(|_| PlanError::UnknownOperator {
            field: field.to_string(),
            operator: op.to_string(),
        })?,
        None => FilterOperator::default(),
    };

    let value = raw.trim();
    if value.is_empty() {
        return Err(PlanError::InvalidValue {
            field: field.to_string(),
            reason: "empty value".to_string(),
        });
    }

    let compare_op = match op {
        FilterOperator::Like | FilterOperator::Contain => {
            return Ok(Predicate::contains(column, value, false));
        }
        FilterOperator::In => {
            let values = value
                .split(LIST_SEPARATOR)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| coerce(field, target, part))
                .collect::<Result<Vec<_>, _>>()?;
            if values.is_empty() {
                return Err(PlanError::InvalidValue {
                    field: field.to_string(),
                    reason: "empty value list".to_string(),
                });
            }
            return Ok(Predicate::In { column, values });
        }
        FilterOperator::Eq => CompareOp::Eq,
        FilterOperator::Ne => CompareOp::Ne,
        FilterOperator::Gt => CompareOp::Gt,
        FilterOperator::Gte => CompareOp::Gte,
        FilterOperator::Lt => CompareOp::Lt,
        FilterOperator::Lte => CompareOp::Lte,
    };

    Ok(Predicate::compare(
        column,
        compare_op,
        coerce(field, target, value)?,
    ))
}

fn coerce(field: &str, target: &FieldTarget, raw: &str) -> Result<Value, PlanError> {
    match target.data_type {
        Some(data_type) => data_type
            .coerce(raw)
            .map_err(|err| PlanError::InvalidValue {
                field: field.to_string(),
                reason: err.to_string(),
            }),
        None => Ok(Value::String(raw.to_string())),
    }
}
