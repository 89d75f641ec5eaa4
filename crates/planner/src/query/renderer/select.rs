use crate::query::{
    ast::select::{FromClause, JoinClause, OrderByExpr, Select},
    renderer::{Render, Renderer},
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("SELECT ");
        r.render_list(&self.columns);

        if let Some(from) = &self.from {
            r.sql.push(' ');
            from.render(r);
        }
        for join in &self.joins {
            r.sql.push(' ');
            join.render(r);
        }
        if let Some(condition) = &self.where_clause {
            r.render_clause("WHERE", condition);
        }
        if !self.order_by.is_empty() {
            r.sql.push_str(" ORDER BY ");
            r.render_list(&self.order_by);
        }
        // Window parameters are bound last on every dialect.
        if let Some(limit) = &self.limit {
            r.render_clause("LIMIT", limit);
        }
        if let Some(offset) = &self.offset {
            r.render_clause("OFFSET", offset);
        }
    }
}

impl Render for FromClause {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("FROM ");
        r.render_table_ref(&self.table);
    }
}

impl Render for JoinClause {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(self.kind.keyword());
        r.sql.push(' ');
        r.render_table_ref(&self.table);
        r.render_alias(&self.alias);
        r.render_clause("ON", &self.on);
    }
}

impl Render for OrderByExpr {
    fn render(&self, r: &mut Renderer) {
        self.expr.render(r);
        if let Some(direction) = self.direction {
            r.sql.push(' ');
            r.sql.push_str(direction.keyword());
        }
    }
}
