//! UPDATE statement builder and assembly.

use crate::compile::{self, ParameterizedQuery, SqlMode};
use crate::error::{QueryError, QueryResult};
use crate::expr::{Expr, IntoExpr};
use crate::path::{ColumnRef, Path};
use crate::predicate::Predicate;
use crate::query::select::join_fragments;
use crate::value::{IntoValue, Value};
use serde::Serialize;
use std::sync::Arc;

/// One SET assignment: a plain value or an expression (which permits
/// `col = col` self-assignment and CASE-valued updates).
#[derive(Debug, Clone)]
pub(crate) enum SetValue {
    Value(Value),
    Expr(Expr),
}

/// Accumulates an UPDATE: target, SET assignments in insertion order, and
/// AND-joined WHERE predicates.
#[derive(Debug, Clone, Default)]
pub struct UpdateBuilder {
    target: Option<Expr>,
    set_list: Vec<(Arc<Path>, SetValue)>,
    where_list: Vec<Predicate>,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target table.
    pub fn table(mut self, target: impl IntoExpr) -> Self {
        self.target = Some(target.into_expr());
        self
    }

    fn push_set(mut self, column: Arc<Path>, value: SetValue) -> Self {
        // A later assignment to the same column replaces the earlier one in
        // place, keeping its original position.
        let path = column.full_path();
        if let Some(slot) = self
            .set_list
            .iter_mut()
            .find(|(existing, _)| existing.full_path() == path)
        {
            slot.1 = value;
        } else {
            self.set_list.push((column, value));
        }
        self
    }

    /// Assign a column to a value.
    pub fn set(self, column: &impl ColumnRef, value: impl IntoValue) -> Self {
        self.push_set(column.column_path(), SetValue::Value(value.into_value()))
    }

    /// Assign a column to the result of an expression.
    pub fn set_expr(self, column: &impl ColumnRef, expr: impl IntoExpr) -> Self {
        self.push_set(column.column_path(), SetValue::Expr(expr.into_expr()))
    }

    /// Assign a column to a serialized JSON value.
    pub fn set_json(self, column: &impl ColumnRef, value: &impl Serialize) -> serde_json::Result<Self> {
        let json = serde_json::to_string(value)?;
        Ok(self.set(column, json))
    }

    /// Append a WHERE predicate; predicates are AND-joined.
    pub fn and_where(mut self, predicate: Predicate) -> Self {
        self.where_list.push(predicate);
        self
    }

    /// Freeze into an immutable statement.
    pub fn build(self) -> UpdateStatement {
        UpdateStatement {
            target: self.target,
            set_list: self.set_list,
            where_list: self.where_list,
        }
    }
}

/// A frozen UPDATE statement.
#[derive(Debug, Clone)]
pub struct UpdateStatement {
    pub(crate) target: Option<Expr>,
    pub(crate) set_list: Vec<(Arc<Path>, SetValue)>,
    pub(crate) where_list: Vec<Predicate>,
}

impl UpdateStatement {
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

    /// The bound values: SET values in assignment order, then WHERE
    /// parameters.
    pub fn parameters(&self) -> QueryResult<Vec<Value>> {
        self.check()?;
        let mut out = Vec::new();
        for (_, set) in &self.set_list {
            match set {
                SetValue::Value(value) => out.push(value.clone()),
                SetValue::Expr(expr) => compile::params::collect_expr(expr, &mut out)?,
            }
        }
        for predicate in &self.where_list {
            compile::params::collect_predicate(predicate, &mut out)?;
        }
        Ok(out)
    }

    fn check(&self) -> QueryResult<&Expr> {
        let target = self.target.as_ref().ok_or(QueryError::MissingTarget("UPDATE"))?;
        if self.set_list.is_empty() {
            return Err(QueryError::EmptySetClause);
        }
        Ok(target)
    }

    fn sql_internal(&self, mode: SqlMode) -> QueryResult<String> {
        let target = self.check()?;

        let mut sql = String::from("UPDATE ");
        sql.push_str(&mode.expr_sql(target)?);

        sql.push_str(" SET ");
        sql.push_str(&join_fragments(&self.set_list, ", ", |(column, set)| {
            let rendered = match (mode, set) {
                (SqlMode::Literal, SetValue::Value(value)) => value.as_literal(),
                (SqlMode::Placeholder, SetValue::Value(_)) => "?".to_string(),
                (_, SetValue::Expr(expr)) => mode.expr_sql(expr)?,
            };
            Ok(format!("{} = {}", column.full_path(), rendered))
        })?);

        if !self.where_list.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&join_fragments(&self.where_list, " AND ", |p| {
                mode.predicate_sql(p)
            })?);
        }

        Ok(sql)
    }
}
