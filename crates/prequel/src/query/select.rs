//! SELECT statement builder and assembly.

use crate::compile::{self, ParameterizedQuery, SqlMode};
use crate::error::{QueryError, QueryResult};
use crate::expr::{Expr, IntoExpr, IntoOrderSpec, OrderSpec};
use crate::predicate::Predicate;
use crate::query::source::{Join, JoinKind, TableSource};
use crate::value::Value;

/// Accumulates SELECT clauses in insertion order, then freezes into an
/// immutable [`SelectStatement`] via [`SelectBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    select_list: Vec<Expr>,
    from_list: Vec<TableSource>,
    joins: Vec<Join>,
    where_list: Vec<Predicate>,
    group_by_list: Vec<Expr>,
    having_list: Vec<Predicate>,
    order_by_list: Vec<OrderSpec>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a select-list expression. With none, the statement compiles
    /// to `SELECT *`.
    pub fn select(mut self, expr: impl IntoExpr) -> Self {
        self.select_list.push(expr.into_expr());
        self
    }

    /// Append a FROM source.
    pub fn from(mut self, source: impl IntoExpr) -> Self {
        self.from_list.push(TableSource::new(source));
        self
    }

    /// Append an aliased FROM source.
    pub fn from_as(mut self, source: impl IntoExpr, alias: impl Into<String>) -> Self {
        self.from_list.push(TableSource::aliased(source, alias));
        self
    }

    fn join(mut self, kind: JoinKind, target: impl IntoExpr, alias: Option<String>, on: Option<Predicate>) -> Self {
        self.joins.push(Join::new(kind, target, alias, on));
        self
    }

    pub fn inner_join(self, target: impl IntoExpr, on: Predicate) -> Self {
        self.join(JoinKind::Inner, target, None, Some(on))
    }

    pub fn inner_join_as(self, target: impl IntoExpr, alias: impl Into<String>, on: Predicate) -> Self {
        self.join(JoinKind::Inner, target, Some(alias.into()), Some(on))
    }

    pub fn left_join(self, target: impl IntoExpr, on: Predicate) -> Self {
        self.join(JoinKind::Left, target, None, Some(on))
    }

    pub fn left_join_as(self, target: impl IntoExpr, alias: impl Into<String>, on: Predicate) -> Self {
        self.join(JoinKind::Left, target, Some(alias.into()), Some(on))
    }

    pub fn right_join(self, target: impl IntoExpr, on: Predicate) -> Self {
        self.join(JoinKind::Right, target, None, Some(on))
    }

    pub fn right_join_as(self, target: impl IntoExpr, alias: impl Into<String>, on: Predicate) -> Self {
        self.join(JoinKind::Right, target, Some(alias.into()), Some(on))
    }

    pub fn full_outer_join(self, target: impl IntoExpr, on: Predicate) -> Self {
        self.join(JoinKind::FullOuter, target, None, Some(on))
    }

    pub fn full_outer_join_as(self, target: impl IntoExpr, alias: impl Into<String>, on: Predicate) -> Self {
        self.join(JoinKind::FullOuter, target, Some(alias.into()), Some(on))
    }

    pub fn cross_join(self, target: impl IntoExpr) -> Self {
        self.join(JoinKind::Cross, target, None, None)
    }

    pub fn cross_join_as(self, target: impl IntoExpr, alias: impl Into<String>) -> Self {
        self.join(JoinKind::Cross, target, Some(alias.into()), None)
    }

    /// Append a WHERE predicate; predicates are AND-joined.
    pub fn and_where(mut self, predicate: Predicate) -> Self {
        self.where_list.push(predicate);
        self
    }

    /// Append a GROUP BY expression.
    pub fn group_by(mut self, expr: impl IntoExpr) -> Self {
        self.group_by_list.push(expr.into_expr());
        self
    }

    /// Append a HAVING predicate; predicates are AND-joined.
    pub fn and_having(mut self, predicate: Predicate) -> Self {
        self.having_list.push(predicate);
        self
    }

    /// Append an ORDER BY entry.
    pub fn order_by(mut self, spec: impl IntoOrderSpec) -> Self {
        self.order_by_list.push(spec.into_order_spec());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Freeze into an immutable statement.
    pub fn build(self) -> SelectStatement {
        SelectStatement {
            select_list: self.select_list,
            from_list: self.from_list,
            joins: self.joins,
            where_list: self.where_list,
            group_by_list: self.group_by_list,
            having_list: self.having_list,
            order_by_list: self.order_by_list,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// A frozen SELECT statement. Compilation is pure: the same statement
/// always yields byte-identical SQL.
#[derive(Debug, Clone)]
pub struct SelectStatement {
    pub(crate) select_list: Vec<Expr>,
    pub(crate) from_list: Vec<TableSource>,
    pub(crate) joins: Vec<Join>,
    pub(crate) where_list: Vec<Predicate>,
    pub(crate) group_by_list: Vec<Expr>,
    pub(crate) having_list: Vec<Predicate>,
    pub(crate) order_by_list: Vec<OrderSpec>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
}

impl SelectStatement {
    /// Compile to SQL with values inlined as literals.
    pub fn to_sql(&self) -> QueryResult<String> {
        self.sql_internal(SqlMode::Literal, false)
    }

    /// Compile to placeholder SQL plus the ordered parameter list.
    pub fn to_parameterized(&self) -> QueryResult<ParameterizedQuery> {
        Ok(ParameterizedQuery {
            sql: self.sql_internal(SqlMode::Placeholder, false)?,
            params: self.collect_parameters(false)?,
        })
    }

    /// Derive the count query: select list replaced by `COUNT(*)`,
    /// FROM/JOIN/WHERE/GROUP BY/HAVING preserved, ordering and paging
    /// dropped.
    pub fn to_count_sql(&self) -> QueryResult<String> {
        self.sql_internal(SqlMode::Literal, true)
    }

    /// Parameterized form of the derived count query.
    pub fn to_parameterized_count(&self) -> QueryResult<ParameterizedQuery> {
        Ok(ParameterizedQuery {
            sql: self.sql_internal(SqlMode::Placeholder, true)?,
            params: self.collect_parameters(true)?,
        })
    }

    /// The bound values, in placeholder order.
    pub fn parameters(&self) -> QueryResult<Vec<Value>> {
        self.collect_parameters(false)
    }

    fn sql_internal(&self, mode: SqlMode, count: bool) -> QueryResult<String> {
        if self.from_list.is_empty() {
            return Err(QueryError::MissingSource);
        }

        let mut sql = String::new();

        if count {
            sql.push_str("SELECT COUNT(*)");
        } else if self.select_list.is_empty() {
            sql.push_str("SELECT *");
        } else {
            sql.push_str("SELECT ");
            sql.push_str(&join_fragments(&self.select_list, ", ", |e| mode.expr_sql(e))?);
        }

        sql.push_str(" FROM ");
        sql.push_str(&join_fragments(&self.from_list, ", ", |t| mode.table_sql(t))?);

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&mode.join_sql(join)?);
        }

        if !self.where_list.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&join_fragments(&self.where_list, " AND ", |p| {
                mode.predicate_sql(p)
            })?);
        }

        if !self.group_by_list.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&join_fragments(&self.group_by_list, ", ", |e| mode.expr_sql(e))?);
        }

        if !self.having_list.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&join_fragments(&self.having_list, " AND ", |p| {
                mode.predicate_sql(p)
            })?);
        }

        if !count {
            if !self.order_by_list.is_empty() {
                sql.push_str(" ORDER BY ");
                sql.push_str(&join_fragments(&self.order_by_list, ", ", |o| {
                    let mut entry = mode.expr_sql(&o.expr)?;
                    if o.descending {
                        entry.push_str(" DESC");
                    }
                    Ok(entry)
                })?);
            }

            if let Some(limit) = self.limit {
                sql.push_str(&format!(" LIMIT {limit}"));
            }

            if let Some(offset) = self.offset {
                sql.push_str(&format!(" OFFSET {offset}"));
            }
        }

        Ok(sql)
    }

    /// Walk every clause in assembly order so parameters line up with the
    /// placeholders wherever they appear, select list and join conditions
    /// included.
    fn collect_parameters(&self, count: bool) -> QueryResult<Vec<Value>> {
        if self.from_list.is_empty() {
            return Err(QueryError::MissingSource);
        }

        let mut out = Vec::new();
        if !count {
            for expr in &self.select_list {
                compile::params::collect_expr(expr, &mut out)?;
            }
        }
        for table in &self.from_list {
            compile::params::collect_expr(&table.source, &mut out)?;
        }
        for join in &self.joins {
            join.validate()?;
            compile::params::collect_expr(&join.target, &mut out)?;
            if let Some(condition) = &join.condition {
                compile::params::collect_predicate(condition, &mut out)?;
            }
        }
        for predicate in &self.where_list {
            compile::params::collect_predicate(predicate, &mut out)?;
        }
        for expr in &self.group_by_list {
            compile::params::collect_expr(expr, &mut out)?;
        }
        for predicate in &self.having_list {
            compile::params::collect_predicate(predicate, &mut out)?;
        }
        if !count {
            for order in &self.order_by_list {
                compile::params::collect_expr(&order.expr, &mut out)?;
            }
        }
        Ok(out)
    }
}

pub(crate) fn join_fragments<T>(
    items: &[T],
    separator: &str,
    mut render: impl FnMut(&T) -> QueryResult<String>,
) -> QueryResult<String> {
    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        parts.push(render(item)?);
    }
    Ok(parts.join(separator))
}
