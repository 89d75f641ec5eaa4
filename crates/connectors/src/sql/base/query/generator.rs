use crate::sql::base::{
    filter::where_expr,
    requests::{FetchRowsRequest, ScopedQuery},
};
use model::core::value::Value;
use planner::query::{
    ast::{
        common::OrderDir,
        expr::{BinaryOperator, Expr},
        select::Select,
    },
    builder::select::{Open, SelectBuilder},
    column,
    dialect::Dialect,
    renderer::{Render, Renderer},
    value,
};
use planner::table_ref;

pub struct QueryGenerator<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> QueryGenerator<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// `SELECT COUNT(*)` over the scoped query.
    pub fn count(&self, query: &ScopedQuery) -> (String, Vec<Value>) {
        let select = SelectBuilder::count(table_ref!(&query.table));
        self.render_ast(Self::apply_scope(select, query).build())
    }

    /// Generates a SQL SELECT statement for one page and its parameters.
    pub fn select(&self, request: &FetchRowsRequest) -> (String, Vec<Value>) {
        let scope = &request.scope;
        let mut select = Self::apply_scope(SelectBuilder::rows(table_ref!(&scope.table)), scope);

        for order in request.order.iter().filter(|o| !o.column.is_empty()) {
            let direction = if order.descending {
                OrderDir::Desc
            } else {
                OrderDir::Asc
            };
            select = select.order_by(column(&scope.table, &order.column), direction);
        }

        let select_ast = select
            .page(
                value(Value::Uint(request.limit)),
                value(Value::Uint(request.offset)),
            )
            .build();

        self.render_ast(select_ast)
    }

    fn apply_scope(mut select: SelectBuilder<Open>, scope: &ScopedQuery) -> SelectBuilder<Open> {
        for join in &scope.joins {
            let on = Expr::binary(
                column(&scope.table, &join.on.0),
                BinaryOperator::Eq,
                column(&scope.table, &join.on.1),
            );
            select = select.join(join.kind, table_ref!(&join.table), &join.alias, on);
        }

        if let Some(condition) = where_expr(&scope.table, &scope.predicates) {
            select = select.and_where(condition);
        }
        select
    }

    fn render_ast(&self, ast: Select) -> (String, Vec<Value>) {
        let mut renderer = Renderer::new(self.dialect);
        ast.render(&mut renderer);
        renderer.finish()
    }
}
