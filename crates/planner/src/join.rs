//! Plans the joins that make a relation alias addressable.

use crate::{
    address::{RELATION_SEPARATOR, relation_alias},
    error::PlanError,
    query::ast::common::JoinKind,
};
use model::{
    pagination::column::ColumnRef,
    schema::{EntitySchema, FieldKind},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPlan {
    pub kind: JoinKind,
    /// Physical table of the related entity.
    pub table: String,
    pub alias: String,
    /// `left = right`, left being the parent side.
    pub on: (ColumnRef, ColumnRef),
}

/// Plans one join per hop of `alias`, e.g. `Post__User` yields a join to
/// `Post` followed by a join from `Post` to `Post__User`.
pub fn plan_joins(schema: &EntitySchema, alias: &str) -> Result<Vec<JoinPlan>, PlanError> {
    let segments: Vec<&str> = alias.split(RELATION_SEPARATOR).collect();
    let mut plans = Vec::with_capacity(segments.len());
    let mut current = schema;

    for (hop, segment) in segments.iter().enumerate() {
        let unknown = || PlanError::UnknownRelation {
            table: current.table.clone(),
            relation: segment.to_string(),
        };

        let field = current.relation(segment).ok_or_else(unknown)?;
        let FieldKind::Relation {
            schema: related,
            join,
        } = &field.kind
        else {
            return Err(unknown());
        };
        let keys = join.as_ref().ok_or_else(|| PlanError::MissingJoinKeys {
            table: current.table.clone(),
            relation: segment.to_string(),
        })?;

        let related = related();
        let hop_alias = relation_alias(&segments[..=hop]);
        let left = if hop == 0 {
            ColumnRef::current(&keys.local)
        } else {
            ColumnRef::relation(&relation_alias(&segments[..hop]), &keys.local)
        };

        plans.push(JoinPlan {
            kind: JoinKind::Left,
            table: related.table.clone(),
            alias: hop_alias.clone(),
            on: (left, ColumnRef::relation(&hop_alias, &keys.remote)),
        });
        current = related;
    }

    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::schema::FieldDef;
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
                .field(FieldDef::relation("editor", user_schema).filter("Editor"))
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
    fn test_single_hop() {
        let plans = plan_joins(comment_schema(), "Post").unwrap();
        assert_eq!(
            plans,
            vec![JoinPlan {
                kind: JoinKind::Left,
                table: "posts".into(),
                alias: "Post".into(),
                on: (
                    ColumnRef::current("post_id"),
                    ColumnRef::relation("Post", "id")
                ),
            }]
        );
    }

    #[test]
    fn test_chained_hops() {
        let plans = plan_joins(comment_schema(), "Post__User").unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[1].table, "users");
        assert_eq!(plans[1].alias, "Post__User");
        assert_eq!(
            plans[1].on,
            (
                ColumnRef::relation("Post", "user_id"),
                ColumnRef::relation("Post__User", "id")
            )
        );
    }

    #[test]
    fn test_unknown_relation() {
        let err = plan_joins(comment_schema(), "Author").unwrap_err();
        assert_eq!(
            err,
            PlanError::UnknownRelation {
                table: "comments".into(),
                relation: "Author".into()
            }
        );
    }

    #[test]
    fn test_missing_join_keys() {
        let err = plan_joins(comment_schema(), "Post__Editor").unwrap_err();
        assert_eq!(
            err,
            PlanError::MissingJoinKeys {
                table: "posts".into(),
                relation: "Editor".into()
            }
        );
    }
}
