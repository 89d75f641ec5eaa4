use crate::query::{
    ast::expr::{BinaryOp, BinaryOperator, Expr, FunctionCall, Ident},
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Wildcard { qualifier } => {
                if let Some(qualifier) = qualifier {
                    r.sql.push_str(&r.dialect.quote_identifier(qualifier));
                    r.sql.push('.');
                }
                r.sql.push('*');
            }
            Expr::Value(val) => r.add_param(val.clone()),
            Expr::BinaryOp(op) => op.render(r),
            // Nothing is a member of an empty set.
            Expr::InList { list, .. } if list.is_empty() => r.sql.push_str("(1 = 0)"),
            Expr::InList { expr, list } => {
                r.sql.push('(');
                expr.render(r);
                r.sql.push_str(" IN (");
                r.render_list(list);
                r.sql.push_str("))");
            }
            Expr::FunctionCall(func) => func.render(r),
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) {
        if let Some(qualifier) = &self.qualifier {
            r.sql.push_str(&r.dialect.quote_identifier(qualifier));
            r.sql.push('.');
        }
        r.sql.push_str(&r.dialect.quote_identifier(&self.name));
    }
}

impl Render for BinaryOp {
    fn render(&self, r: &mut Renderer) {
        if self.op == BinaryOperator::ILike && !r.dialect.supports_ilike() {
            let lower = |expr: &Expr| {
                Expr::FunctionCall(FunctionCall {
                    name: "LOWER".into(),
                    args: vec![expr.clone()],
                    wildcard: false,
                })
            };
            return Expr::binary(lower(&self.left), BinaryOperator::Like, lower(&self.right))
                .render(r);
        }

        r.sql.push('(');
        self.left.render(r);
        r.sql.push(' ');
        r.sql.push_str(self.op.symbol());
        r.sql.push(' ');
        self.right.render(r);
        r.sql.push(')');
    }
}

impl Render for FunctionCall {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&self.name);
        r.sql.push('(');
        if self.wildcard {
            r.sql.push('*');
        } else {
            r.render_list(&self.args);
        }
        r.sql.push(')');
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::query::{
        ast::expr::{BinaryOperator, Expr, Ident},
        dialect::{MySql, Postgres, Sqlite},
        renderer::{Render, Renderer},
    };

    fn qual_ident(qualifier: &str, name: &str) -> Expr {
        Expr::Identifier(Ident {
            qualifier: Some(qualifier.to_string()),
            name: name.to_string(),
        })
    }

    #[test]
    fn test_render_in_list() {
        let expr = Expr::InList {
            expr: Box::new(qual_ident("users", "age")),
            list: vec![
                Expr::Value(Value::Int(1)),
                Expr::Value(Value::Int(2)),
                Expr::Value(Value::Int(3)),
            ],
        };

        let dialect = MySql;
        let mut renderer = Renderer::new(&dialect);
        expr.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(sql, "(`users`.`age` IN (?, ?, ?))");
        assert_eq!(params, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_render_empty_in_list() {
        let expr = Expr::InList {
            expr: Box::new(qual_ident("users", "age")),
            list: Vec::new(),
        };

        let dialect = Sqlite;
        let mut renderer = Renderer::new(&dialect);
        expr.render(&mut renderer);
        assert_eq!(renderer.finish(), ("(1 = 0)".to_string(), Vec::new()));
    }

    #[test]
    fn test_render_ilike_per_dialect() {
        let expr = Expr::binary(
            qual_ident("posts", "title"),
            BinaryOperator::ILike,
            Expr::Value(Value::from("%foo%")),
        );

        let pg = Postgres;
        let mut renderer = Renderer::new(&pg);
        expr.render(&mut renderer);
        let (sql, _) = renderer.finish();
        assert_eq!(sql, r#"("posts"."title" ILIKE $1)"#);

        let sqlite = Sqlite;
        let mut renderer = Renderer::new(&sqlite);
        expr.render(&mut renderer);
        let (sql, params) = renderer.finish();
        assert_eq!(sql, r#"(LOWER("posts"."title") LIKE LOWER(?1))"#);
        assert_eq!(params, vec![Value::from("%foo%")]);
    }

    #[test]
    fn test_render_count_and_wildcard() {
        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        Expr::count_all().render(&mut renderer);
        renderer.sql.push_str(", ");
        Expr::Wildcard {
            qualifier: Some("posts".into()),
        }
        .render(&mut renderer);
        let (sql, _) = renderer.finish();
        assert_eq!(sql, r#"COUNT(*), "posts".*"#);
    }
}
