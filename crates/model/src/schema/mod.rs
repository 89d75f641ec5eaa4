//! Statically declared field metadata for record types.
//!
//! A record type describes which of its fields are searchable, filterable and
//! sortable by implementing [`Entity`] and returning an [`EntitySchema`]
//! built once, typically behind a `lazy_static!` or `OnceLock`.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub mod field;

pub use field::{FieldDef, FieldKind, JoinKeys};

/// Lazily resolves a schema. Relations hold one of these instead of the
/// schema itself so that mutually referencing entities can be declared.
pub type SchemaFn = fn() -> &'static EntitySchema;

/// Tag namespaces a field can be exposed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Search,
    Filter,
    Sort,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [Namespace::Search, Namespace::Filter, Namespace::Sort];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Search => "search",
            Namespace::Filter => "filter",
            Namespace::Sort => "sort",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(Namespace::Search),
            "filter" => Ok(Namespace::Filter),
            "sort" => Ok(Namespace::Sort),
            other => Err(format!("Unknown tag namespace: {other}")),
        }
    }
}

/// A record type that can be paginated.
pub trait Entity {
    fn schema() -> &'static EntitySchema;
}

#[derive(Debug, Clone)]
pub struct EntitySchema {
    pub table: String,
    pub fields: Vec<FieldDef>,
}

impl EntitySchema {
    pub fn builder(table: &str) -> EntitySchemaBuilder {
        EntitySchemaBuilder {
            schema: EntitySchema {
                table: table.to_string(),
                fields: Vec::new(),
            },
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Finds a relation field, including ones brought in by embedded groups,
    /// by its physical name, any of its tags, or its field name.
    pub fn relation(&self, name: &str) -> Option<&FieldDef> {
        self.relations().into_iter().find(|f| f.answers_to(name))
    }

    /// Relation fields reachable through embedded groups, flattened.
    pub fn relations(&self) -> Vec<&FieldDef> {
        let mut relations = Vec::new();
        for field in &self.fields {
            match &field.kind {
                FieldKind::Relation { .. } => relations.push(field),
                FieldKind::Embedded(schema) => relations.extend(schema().relations()),
                FieldKind::Scalar => {}
            }
        }
        relations
    }
}

pub struct EntitySchemaBuilder {
    schema: EntitySchema,
}

impl EntitySchemaBuilder {
    pub fn field(mut self, field: FieldDef) -> Self {
        self.schema.fields.push(field);
        self
    }

    /// Includes every field of `schema` without a prefix.
    pub fn embed(self, name: &str, schema: SchemaFn) -> Self {
        self.field(FieldDef::embedded(name, schema))
    }

    pub fn build(self) -> EntitySchema {
        self.schema
    }
}
