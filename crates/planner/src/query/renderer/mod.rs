//! Defines the core rendering trait and context for converting AST to SQL.

use crate::query::{ast::common::TableRef, dialect::Dialect};
use model::core::value::Value;

pub mod expr;
pub mod select;

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the SQL string and the parameters, and provides
/// access to the dialect for syntax-specific details.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Value>,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    pub fn add_param(&mut self, value: Value) {
        let placeholder = self.dialect.param_placeholder(self.params.len(), &value);
        self.params.push(value);
        self.sql.push_str(&placeholder);
    }

    /// ` KEYWORD <node>`.
    pub fn render_clause(&mut self, keyword: &str, node: &impl Render) {
        self.sql.push(' ');
        self.sql.push_str(keyword);
        self.sql.push(' ');
        node.render(self);
    }

    /// Comma separated nodes.
    pub fn render_list<T: Render>(&mut self, nodes: &[T]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            node.render(self);
        }
    }

    pub fn render_alias(&mut self, alias: &str) {
        self.sql.push_str(" AS ");
        self.sql.push_str(&self.dialect.quote_identifier(alias));
    }

    pub fn render_table_ref(&mut self, table: &TableRef) {
        self.sql.push_str(&self.dialect.quote_identifier(&table.name));
    }
}
