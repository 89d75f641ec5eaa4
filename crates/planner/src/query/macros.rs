/// `TableRef` from a table name.
#[macro_export]
macro_rules! table_ref {
    ($name:expr) => {
        $crate::query::ast::common::TableRef {
            name: $name.to_string(),
        }
    };
}
