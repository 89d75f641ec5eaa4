use crate::{scope::Scope, settings::PaginateSettings};
use connectors::{FetchRowsRequest, FetchRowsRequestBuilder, ScopedQuery};
use model::{
    pagination::request::{PageWindow, Pagination},
    schema::{Entity, EntitySchema, Namespace},
};
use planner::{
    FieldMapCache, OrderBy, PlanError, filter::compile_filter, join::plan_joins,
    search::compile_search, sort::compile_sort,
};
use tracing::debug;

/// Everything needed to count and fetch one page, before any I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub window: PageWindow,
    pub request: FetchRowsRequest,
}

impl CompiledQuery {
    /// The table, joins and predicates the count runs against.
    pub fn scope(&self) -> &ScopedQuery {
        &self.request.scope
    }

    pub fn order(&self) -> &[OrderBy] {
        &self.request.order
    }
}

pub fn compile<T: Entity + 'static>(
    request: &impl Pagination,
    scopes: &[&dyn Scope],
    settings: &PaginateSettings,
) -> Result<CompiledQuery, PlanError> {
    let window = PageWindow::normalize(
        request.page(),
        request.size(),
        settings.default_page_size,
        settings.max_page_size,
    );
    let options = settings.compile_options();
    let cache = FieldMapCache::global();
    let search = cache.get_or_resolve::<T>(Namespace::Search, options.max_relation_depth);
    let filter = cache.get_or_resolve::<T>(Namespace::Filter, options.max_relation_depth);
    let sort = cache.get_or_resolve::<T>(Namespace::Sort, options.max_relation_depth);

    let schema = T::schema();
    let mut scope = ScopedQuery::new(&schema.table);
    for extra in scopes {
        extra.apply(schema, &mut scope)?;
    }

    if let Some(predicate) = compile_search(&search, request.search(), &options) {
        scope.filter(predicate);
    }
    for predicate in compile_filter(&filter, request.filter(), &options)? {
        scope.filter(predicate);
    }

    let order = compile_sort(&sort, request.sort());
    if settings.auto_join {
        auto_join(schema, &mut scope, &order);
    }

    let request = FetchRowsRequestBuilder::new(scope)
        .order(order)
        .limit(window.limit())
        .offset(window.offset())
        .build();

    Ok(CompiledQuery { window, request })
}

/// Joins every relation alias the predicates or the order reference that is
/// not joined yet. Relations that cannot be planned are left to caller scopes.
fn auto_join(schema: &EntitySchema, scope: &mut ScopedQuery, order: &[OrderBy]) {
    let mut aliases: Vec<String> = Vec::new();
    let referenced = scope
        .predicates
        .iter()
        .flat_map(|p| p.relations())
        .chain(order.iter().filter_map(|o| o.column.table.relation()));
    for alias in referenced {
        if !aliases.iter().any(|a| a == alias) {
            aliases.push(alias.to_string());
        }
    }

    for alias in aliases {
        if scope.has_join(&alias) {
            continue;
        }
        match plan_joins(schema, &alias) {
            Ok(plans) => plans.into_iter().for_each(|plan| scope.join(plan)),
            Err(e) => debug!(alias = %alias, error = %e, "Relation not joined automatically"),
        }
    }
}
