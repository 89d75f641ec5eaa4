//! Caller-supplied refinements applied to the scoped query before the
//! request's own search and filter predicates.

use connectors::ScopedQuery;
use model::schema::EntitySchema;
use planner::{
    PlanError, Predicate,
    address::relation_alias,
    join::plan_joins,
    query::ast::common::JoinKind,
};

pub trait Scope: Send + Sync {
    fn apply(&self, schema: &EntitySchema, query: &mut ScopedQuery) -> Result<(), PlanError>;
}

impl<F> Scope for F
where
    F: Fn(&EntitySchema, &mut ScopedQuery) -> Result<(), PlanError> + Send + Sync,
{
    fn apply(&self, schema: &EntitySchema, query: &mut ScopedQuery) -> Result<(), PlanError> {
        self(schema, query)
    }
}

/// Joins a relation path such as `Post` or `Post.User`, one join per hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRelation {
    path: String,
    kind: JoinKind,
}

impl JoinRelation {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: JoinKind::Left,
        }
    }

    /// Same as [`JoinRelation::new`] but drops base rows without a match.
    pub fn inner(path: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: JoinKind::Inner,
        }
    }

    pub fn alias(&self) -> String {
        let segments: Vec<&str> = self.path.split('.').collect();
        relation_alias(&segments)
    }
}

impl Scope for JoinRelation {
    fn apply(&self, schema: &EntitySchema, query: &mut ScopedQuery) -> Result<(), PlanError> {
        for mut plan in plan_joins(schema, &self.alias())? {
            plan.kind = self.kind;
            query.join(plan);
        }
        Ok(())
    }
}

/// A fixed predicate ANDed with the request's own.
#[derive(Debug, Clone, PartialEq)]
pub struct Where(pub Predicate);

impl Scope for Where {
    fn apply(&self, _schema: &EntitySchema, query: &mut ScopedQuery) -> Result<(), PlanError> {
        query.filter(self.0.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{
        core::value::Value,
        pagination::column::ColumnRef,
        schema::FieldDef,
    };
    use planner::CompareOp;
    use std::sync::OnceLock;

    fn user_schema() -> &'static EntitySchema {
        static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            EntitySchema::builder("users")
                .field(FieldDef::new("name").filter("name"))
                .build()
        })
    }

    fn post_schema() -> &'static EntitySchema {
        static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            EntitySchema::builder("posts")
                .field(FieldDef::new("title").filter("title"))
                .field(
                    FieldDef::relation("user", user_schema)
                        .filter("User")
                        .join_on("user_id", "id"),
                )
                .build()
        })
    }

    fn comment_schema() -> &'static EntitySchema {
        static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            EntitySchema::builder("comments")
                .field(
                    FieldDef::relation("post", post_schema)
                        .filter("Post")
                        .join_on("post_id", "id"),
                )
                .build()
        })
    }

    #[test]
    fn test_join_relation_dotted_path() {
        let schema = comment_schema();
        let mut query = ScopedQuery::new(&schema.table);

        JoinRelation::new("Post.User").apply(schema, &mut query).unwrap();

        let aliases: Vec<&str> = query.joins.iter().map(|j| j.alias.as_str()).collect();
        assert_eq!(aliases, vec!["Post", "Post__User"]);
        assert!(query.joins.iter().all(|j| j.kind == JoinKind::Left));
    }

    #[test]
    fn test_inner_join_relation() {
        let schema = comment_schema();
        let mut query = ScopedQuery::new(&schema.table);

        JoinRelation::inner("Post").apply(schema, &mut query).unwrap();
        // Already joined, not planned twice.
        JoinRelation::new("Post").apply(schema, &mut query).unwrap();

        assert_eq!(query.joins.len(), 1);
        assert_eq!(query.joins[0].kind, JoinKind::Inner);
        assert_eq!(query.joins[0].table, "posts");
    }

    #[test]
    fn test_join_relation_unknown() {
        let schema = comment_schema();
        let mut query = ScopedQuery::new(&schema.table);

        let err = JoinRelation::new("Author").apply(schema, &mut query).unwrap_err();
        assert!(matches!(err, PlanError::UnknownRelation { .. }));
        assert!(query.joins.is_empty());
    }

    #[test]
    fn test_where_and_closure_scopes() {
        let schema = comment_schema();
        let mut query = ScopedQuery::new(&schema.table);

        let published = Where(Predicate::compare(
            ColumnRef::current("published"),
            CompareOp::Eq,
            Value::Boolean(true),
        ));
        let not_deleted = |_: &EntitySchema, q: &mut ScopedQuery| -> Result<(), PlanError> {
            q.filter(Predicate::compare(
                ColumnRef::current("deleted"),
                CompareOp::Eq,
                Value::Boolean(false),
            ));
            Ok(())
        };

        let scopes: [&dyn Scope; 2] = [&published, &not_deleted];
        for scope in scopes {
            scope.apply(schema, &mut query).unwrap();
        }

        assert_eq!(query.predicates.len(), 2);
        assert_eq!(query.predicates[0], published.0);
    }
}
