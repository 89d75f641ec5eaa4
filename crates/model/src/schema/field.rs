use crate::{
    core::data_type::DataType,
    schema::{Namespace, SchemaFn},
};

/// Columns linking a parent table to a related one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinKeys {
    /// Column on the parent side, e.g. `user_id`.
    pub local: String,
    /// Column on the related side, e.g. `id`.
    pub remote: String,
}

impl JoinKeys {
    pub fn new(local: &str, remote: &str) -> Self {
        Self {
            local: local.to_string(),
            remote: remote.to_string(),
        }
    }
}

#[derive(Clone)]
pub enum FieldKind {
    Scalar,
    /// Fields of another schema included without a prefix.
    Embedded(SchemaFn),
    /// A named related entity, exposed under a dotted prefix.
    Relation {
        schema: SchemaFn,
        join: Option<JoinKeys>,
    },
}

impl std::fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Scalar => write!(f, "Scalar"),
            FieldKind::Embedded(schema) => write!(f, "Embedded({})", schema().table),
            FieldKind::Relation { schema, join } => f
                .debug_struct("Relation")
                .field("table", &schema().table)
                .field("join", join)
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub exported: bool,
    pub search: Option<String>,
    pub filter: Option<String>,
    pub sort: Option<String>,
    /// Physical column override; the tag value is used when absent.
    pub column: Option<String>,
    pub data_type: Option<DataType>,
    pub kind: FieldKind,
}

impl FieldDef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            exported: true,
            search: None,
            filter: None,
            sort: None,
            column: None,
            data_type: None,
            kind: FieldKind::Scalar,
        }
    }

    pub fn embedded(name: &str, schema: SchemaFn) -> Self {
        Self {
            kind: FieldKind::Embedded(schema),
            ..Self::new(name)
        }
    }

    pub fn relation(name: &str, schema: SchemaFn) -> Self {
        Self {
            kind: FieldKind::Relation { schema, join: None },
            ..Self::new(name)
        }
    }

    pub fn search(mut self, logical: &str) -> Self {
        self.search = Some(logical.to_string());
        self
    }

    pub fn filter(mut self, logical: &str) -> Self {
        self.filter = Some(logical.to_string());
        self
    }

    pub fn sort(mut self, logical: &str) -> Self {
        self.sort = Some(logical.to_string());
        self
    }

    pub fn column(mut self, column: &str) -> Self {
        self.column = Some(column.to_string());
        self
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Declares how the relation is joined. Ignored for non-relation fields.
    pub fn join_on(mut self, local: &str, remote: &str) -> Self {
        if let FieldKind::Relation { join, .. } = &mut self.kind {
            *join = Some(JoinKeys::new(local, remote));
        }
        self
    }

    pub fn tag(&self, namespace: Namespace) -> Option<&str> {
        let tag = match namespace {
            Namespace::Search => self.search.as_deref(),
            Namespace::Filter => self.filter.as_deref(),
            Namespace::Sort => self.sort.as_deref(),
        };
        tag.filter(|t| !t.is_empty())
    }

    /// Whether `name` refers to this field under any of its declared names.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name
            || self.column.as_deref() == Some(name)
            || Namespace::ALL
                .iter()
                .any(|ns| self.tag(*ns) == Some(name))
    }
}
