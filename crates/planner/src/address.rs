//! Maps physical dotted paths onto table-qualified column references.
//!
//! A top-level path (`title`) addresses the base table. Every leading segment
//! of a longer path names a relation, and the relation chain is addressed
//! through a single alias built by [`relation_alias`]: `Post.User.name`
//! becomes column `name` of alias `Post__User`.

use model::pagination::column::ColumnRef;

/// Joins the segments of a relation chain into one table alias.
pub const RELATION_SEPARATOR: &str = "__";

pub fn relation_alias<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(RELATION_SEPARATOR)
}

pub fn column_ref(path: &str) -> ColumnRef {
    if path.is_empty() {
        return ColumnRef::empty();
    }

    let segments: Vec<&str> = path.split('.').collect();
    match segments.split_last() {
        Some((column, [])) => ColumnRef::current(column),
        Some((column, relations)) => ColumnRef::relation(&relation_alias(relations), column),
        None => ColumnRef::empty(),
    }
}
