use crate::{
    options::{CompileOptions, SearchMode},
    predicate::Predicate,
    resolve::FieldMap,
};

/// One `LIKE '%term%'` per searchable column, OR-combined in declaration
/// order. `None` when there is nothing to search for or nothing to search in.
pub fn compile_search(map: &FieldMap, term: &str, options: &CompileOptions) -> Option<Predicate> {
    let term = term.trim();
    if term.is_empty() || map.is_empty() {
        return None;
    }

    let case_insensitive = options.search_mode == SearchMode::CaseInsensitive;
    let likes: Vec<Predicate> = map
        .iter()
        .map(|(_, target)| target.column())
        .filter(|column| !column.is_empty())
        .map(|column| Predicate::contains(column, term, case_insensitive))
        .collect();

    if likes.is_empty() {
        None
    } else {
        Some(Predicate::Or(likes))
    }
}
