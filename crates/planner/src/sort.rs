use crate::{address::column_ref, resolve::FieldMap};
use model::pagination::column::ColumnRef;
use serde::{Deserialize, Serialize};

pub const SORT_SEPARATOR: char = ',';
pub const DESCENDING_PREFIX: char = '-';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: ColumnRef,
    pub descending: bool,
}

impl OrderBy {
    pub fn asc(column: ColumnRef) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    pub fn desc(column: ColumnRef) -> Self {
        Self {
            column,
            descending: true,
        }
    }
}

/// Compiles a sort spec like `-id,created_at`.
///
/// Names are looked up in the sort map; a name without an entry is used as
/// a physical path verbatim.
pub fn compile_sort(map: &FieldMap, spec: &str) -> Vec<OrderBy> {
    spec.trim()
        .split(SORT_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter_map(|item| {
            let (name, descending) = match item.strip_prefix(DESCENDING_PREFIX) {
                Some(rest) => (rest.trim(), true),
                None => (item, false),
            };
            if name.is_empty() {
                return None;
            }

            let path = map.path(name).unwrap_or(name);
            Some(OrderBy {
                column: column_ref(path),
                descending,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use model::schema::{EntitySchema, FieldDef, Namespace};
    use std::sync::OnceLock;

    fn sort_map(schema: &EntitySchema) -> FieldMap {
        resolve(Some(schema), Namespace::Sort)
    }

    fn user_schema() -> &'static EntitySchema {
        static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            EntitySchema::builder("users")
                .field(FieldDef::new("id").sort("id"))
                .build()
        })
    }

    #[test]
    fn test_asc_sort() {
        let schema = EntitySchema::builder("posts")
            .field(FieldDef::new("id").sort("id"))
            .build();
        assert_eq!(
            compile_sort(&sort_map(&schema), "id"),
            vec![OrderBy::asc(ColumnRef::current("id"))]
        );
    }

    #[test]
    fn test_desc_sort() {
        let schema = EntitySchema::builder("posts")
            .field(FieldDef::new("id"))
            .build();
        assert_eq!(
            compile_sort(&sort_map(&schema), "-id"),
            vec![OrderBy::desc(ColumnRef::current("id"))]
        );
    }

    #[test]
    fn test_column_alias_sort() {
        let schema = EntitySchema::builder("posts")
            .field(FieldDef::new("id").sort("id").column("post_id"))
            .build();
        assert_eq!(
            compile_sort(&sort_map(&schema), "id"),
            vec![OrderBy::asc(ColumnRef::current("post_id"))]
        );
    }

    #[test]
    fn test_multi_sort() {
        let schema = EntitySchema::builder("posts")
            .field(FieldDef::new("id"))
            .field(FieldDef::new("created_at").sort("created_at"))
            .build();
        assert_eq!(
            compile_sort(&sort_map(&schema), "id,created_at"),
            vec![
                OrderBy::asc(ColumnRef::current("id")),
                OrderBy::asc(ColumnRef::current("created_at")),
            ]
        );
    }

    #[test]
    fn test_nested_sort() {
        let schema = EntitySchema::builder("posts")
            .field(FieldDef::relation("user", user_schema).sort("User"))
            .build();
        assert_eq!(
            compile_sort(&sort_map(&schema), "User.id"),
            vec![OrderBy::asc(ColumnRef::relation("User", "id"))]
        );
    }

    #[test]
    fn test_blank_items_are_skipped() {
        assert!(compile_sort(&FieldMap::new(), "").is_empty());
        assert!(compile_sort(&FieldMap::new(), "  ").is_empty());
        assert_eq!(
            compile_sort(&FieldMap::new(), " -id , ,-, name "),
            vec![
                OrderBy::desc(ColumnRef::current("id")),
                OrderBy::asc(ColumnRef::current("name")),
            ]
        );
    }
}
