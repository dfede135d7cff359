//! DELETE statement builder and assembly.

use crate::compile::{self, ParameterizedQuery, SqlMode};
use crate::error::{QueryError, QueryResult};
use crate::expr::{Expr, IntoExpr};
use crate::predicate::Predicate;
use crate::query::select::join_fragments;
use crate::value::Value;

/// Accumulates a DELETE: target plus AND-joined WHERE predicates. An empty
/// WHERE list compiles to an unconditional delete.
#[derive(Debug, Clone, Default)]
pub struct DeleteBuilder {
    target: Option<Expr>,
    where_list: Vec<Predicate>,
}

impl DeleteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target table.
    pub fn from(mut self, target: impl IntoExpr) -> Self {
        self.target = Some(target.into_expr());
        self
    }

    /// Append a WHERE predicate; predicates are AND-joined.
    pub fn and_where(mut self, predicate: Predicate) -> Self {
        self.where_list.push(predicate);
        self
    }

    /// Freeze into an immutable statement.
    pub fn build(self) -> DeleteStatement {
        DeleteStatement {
            target: self.target,
            where_list: self.where_list,
        }
    }
}

/// A frozen DELETE statement.
#[derive(Debug, Clone)]
pub struct DeleteStatement {
    pub(crate) target: Option<Expr>,
    pub(crate) where_list: Vec<Predicate>,
}

impl DeleteStatement {
    /// Compile to SQL with values inlined as literals.
    pub fn to_sql(&self) -> QueryResult<String> {
        self.sql_internal(SqlMode::Literal)
    }

    /// Compile to placeholder SQL plus the ordered parameter list.
    pub fn to_parameterized(&self) -> QueryResult<ParameterizedQuery> {
        Ok(ParameterizedQuery {
            sql: self.sql_internal(SqlMode::Placeholder)?,
            params: self.parameters()?,
        })
    }

    /// The bound values, in placeholder order.
    pub fn parameters(&self) -> QueryResult<Vec<Value>> {
        self.target()?;
        let mut out = Vec::new();
        for predicate in &self.where_list {
            compile::params::collect_predicate(predicate, &mut out)?;
        }
        Ok(out)
    }

    fn target(&self) -> QueryResult<&Expr> {
        self.target.as_ref().ok_or(QueryError::MissingTarget("DELETE"))
    }

    fn sql_internal(&self, mode: SqlMode) -> QueryResult<String> {
        let target = self.target()?;

        let mut sql = String::from("DELETE FROM ");
        sql.push_str(&mode.expr_sql(target)?);

        if !self.where_list.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&join_fragments(&self.where_list, " AND ", |p| {
                mode.predicate_sql(p)
            })?);
        }

        Ok(sql)
    }
}
