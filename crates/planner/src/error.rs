use model::schema::Namespace;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Unknown {namespace} field: {field}")]
    UnknownField { namespace: Namespace, field: String },

    #[error("Unknown filter operator '{operator}' on field '{field}'")]
    UnknownOperator { field: String, operator: String },

    #[error("Invalid value for filter '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Unknown relation '{relation}' on table '{table}'")]
    UnknownRelation { table: String, relation: String },

    #[error("Relation '{relation}' on table '{table}' declares no join keys")]
    MissingJoinKeys { table: String, relation: String },
}
