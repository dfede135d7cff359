//! INSERT statement builder and assembly.

use crate::compile::{ParameterizedQuery, SqlMode};
use crate::error::{QueryError, QueryResult};
use crate::expr::{Expr, IntoExpr};
use crate::path::{ColumnRef, Path};
use crate::query::select::join_fragments;
use crate::value::{IntoValue, Value};
use serde::Serialize;
use std::sync::Arc;

/// Accumulates an INSERT in either column/value mode
/// ([`InsertBuilder::column`] + [`InsertBuilder::value`]) or set mode
/// ([`InsertBuilder::set`]); set mode wins when both are used.
#[derive(Debug, Clone, Default)]
pub struct InsertBuilder {
    target: Option<Expr>,
    columns: Vec<Arc<Path>>,
    values: Vec<Value>,
    set_list: Vec<(Arc<Path>, Value)>,
}

impl InsertBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target table.
    pub fn into_table(mut self, target: impl IntoExpr) -> Self {
        self.target = Some(target.into_expr());
        self
    }

    /// Append a column to the column list.
    pub fn column(mut self, column: &impl ColumnRef) -> Self {
        self.columns.push(column.column_path());
        self
    }

    /// Append a value to the value list.
    pub fn value(mut self, value: impl IntoValue) -> Self {
        self.values.push(value.into_value());
        self
    }

    /// Assign a column directly; pairs keep insertion order.
    pub fn set(mut self, column: &impl ColumnRef, value: impl IntoValue) -> Self {
        self.set_list.push((column.column_path(), value.into_value()));
        self
    }

    /// Assign a column to a serialized JSON value.
    pub fn set_json(self, column: &impl ColumnRef, value: &impl Serialize) -> serde_json::Result<Self> {
        let json = serde_json::to_string(value)?;
        Ok(self.set(column, json))
    }

    /// Freeze into an immutable statement.
    pub fn build(self) -> InsertStatement {
        InsertStatement {
            target: self.target,
            columns: self.columns,
            values: self.values,
            set_list: self.set_list,
        }
    }
}

/// A frozen INSERT statement.
#[derive(Debug, Clone)]
pub struct InsertStatement {
    pub(crate) target: Option<Expr>,
    pub(crate) columns: Vec<Arc<Path>>,
    pub(crate) values: Vec<Value>,
    pub(crate) set_list: Vec<(Arc<Path>, Value)>,
}

impl InsertStatement {
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
        let (_, values) = self.parts()?;
        Ok(values)
    }

    fn target(&self) -> QueryResult<&Expr> {
        self.target.as_ref().ok_or(QueryError::MissingTarget("INSERT"))
    }

    fn parts(&self) -> QueryResult<(Vec<&Arc<Path>>, Vec<Value>)> {
        if self.set_list.is_empty() {
            if !self.columns.is_empty()
                && !self.values.is_empty()
                && self.columns.len() != self.values.len()
            {
                return Err(QueryError::ColumnValueMismatch {
                    columns: self.columns.len(),
                    values: self.values.len(),
                });
            }
            Ok((self.columns.iter().collect(), self.values.clone()))
        } else {
            Ok((
                self.set_list.iter().map(|(col, _)| col).collect(),
                self.set_list.iter().map(|(_, val)| val.clone()).collect(),
            ))
        }
    }

    fn sql_internal(&self, mode: SqlMode) -> QueryResult<String> {
        let target = self.target()?;
        let (columns, values) = self.parts()?;
        if values.is_empty() {
            return Err(QueryError::EmptyValues);
        }

        let mut sql = String::from("INSERT INTO ");
        sql.push_str(&mode.expr_sql(target)?);

        if !columns.is_empty() {
            sql.push_str(" (");
            sql.push_str(&join_fragments(&columns, ", ", |c| Ok(c.full_path()))?);
            sql.push(')');
        }

        sql.push_str(" VALUES (");
        match mode {
            SqlMode::Literal => {
                sql.push_str(&join_fragments(&values, ", ", |v| Ok(v.as_literal()))?);
            }
            SqlMode::Placeholder => {
                sql.push_str(&values.iter().map(|_| "?").collect::<Vec<_>>().join(", "));
            }
        }
        sql.push(')');

        Ok(sql)
    }
}
