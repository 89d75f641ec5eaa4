use planner::{
    OrderBy, Predicate,
    join::JoinPlan,
};

/// Table, joins and predicates shared by the count and the fetch query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopedQuery {
    pub table: String,
    pub joins: Vec<JoinPlan>,
    pub predicates: Vec<Predicate>,
}

impl ScopedQuery {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            joins: Vec::new(),
            predicates: Vec::new(),
        }
    }

    /// Adds a join unless one with the same alias is already present.
    pub fn join(&mut self, plan: JoinPlan) {
        if !self.has_join(&plan.alias) {
            self.joins.push(plan);
        }
    }

    pub fn has_join(&self, alias: &str) -> bool {
        self.joins.iter().any(|j| j.alias == alias)
    }

    pub fn filter(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchRowsRequest {
    pub scope: ScopedQuery,
    pub order: Vec<OrderBy>,
    pub limit: u64,
    pub offset: u64,
}

pub struct FetchRowsRequestBuilder {
    scope: ScopedQuery,
    order: Vec<OrderBy>,
    limit: u64,
    offset: u64,
}

impl FetchRowsRequestBuilder {
    pub fn new(scope: ScopedQuery) -> Self {
        FetchRowsRequestBuilder {
            scope,
            order: Vec::new(),
            limit: 0,
            offset: 0,
        }
    }

    pub fn order(mut self, order: Vec<OrderBy>) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn build(self) -> FetchRowsRequest {
        FetchRowsRequest {
            scope: self.scope,
            order: self.order,
            limit: self.limit,
            offset: self.offset,
        }
    }
}
