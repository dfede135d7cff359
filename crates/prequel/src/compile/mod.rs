//! Dual compilation of expression trees to SQL.
//!
//! Three structurally identical traversals walk the same tree:
//!
//! - [`literal`] renders values inline as SQL literals, for display and
//!   logging;
//! - [`placeholder`] emits a `?` token at every literal operand position,
//!   for prepared-statement execution;
//! - [`params`] collects the bound values in exactly the order the
//!   placeholder traversal emits `?` tokens, applying the same value
//!   transforms the literal traversal applies.
//!
//! The load-bearing invariant: for any compiled statement, the N-th `?` in
//! the placeholder SQL corresponds to the N-th element of the collected
//! parameter list. Nothing downstream re-checks this, so the three modules
//! mirror each other arm for arm.

pub(crate) mod literal;
pub(crate) mod params;
pub(crate) mod placeholder;

use crate::error::QueryResult;
use crate::expr::Expr;
use crate::predicate::Predicate;
use crate::query::source::{Join, TableSource};
use crate::value::Value;
use tokio_postgres::types::ToSql;

/// Which of the two text renderings a statement assembler is producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SqlMode {
    Literal,
    Placeholder,
}

impl SqlMode {
    pub(crate) fn expr_sql(self, expr: &Expr) -> QueryResult<String> {
        match self {
            SqlMode::Literal => literal::expr_sql(expr),
            SqlMode::Placeholder => placeholder::expr_sql(expr),
        }
    }

    pub(crate) fn predicate_sql(self, predicate: &Predicate) -> QueryResult<String> {
        match self {
            SqlMode::Literal => literal::predicate_sql(predicate),
            SqlMode::Placeholder => placeholder::predicate_sql(predicate),
        }
    }

    pub(crate) fn table_sql(self, table: &TableSource) -> QueryResult<String> {
        match self {
            SqlMode::Literal => literal::table_sql(table),
            SqlMode::Placeholder => placeholder::table_sql(table),
        }
    }

    pub(crate) fn join_sql(self, join: &Join) -> QueryResult<String> {
        match self {
            SqlMode::Literal => literal::join_sql(join),
            SqlMode::Placeholder => placeholder::join_sql(join),
        }
    }
}

/// A compiled statement: placeholder SQL plus its ordered parameter list.
#[derive(Debug, Clone)]
pub struct ParameterizedQuery {
    /// SQL text with dialect-neutral `?` placeholders
    pub sql: String,
    /// Bound values, one per placeholder, in placeholder order
    pub params: Vec<Value>,
}

impl ParameterizedQuery {
    /// Count the `?` placeholders in the SQL, ignoring any inside quoted
    /// string literals.
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(&self.sql)
    }

    /// The SQL with `?` placeholders renumbered to `$1..$n`, the form the
    /// PostgreSQL wire protocol expects.
    pub fn numbered_sql(&self) -> String {
        number_placeholders(&self.sql)
    }

    /// Parameters as trait-object references for the driver.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }
}

/// Count `?` placeholders outside quoted literals.
pub(crate) fn count_placeholders(sql: &str) -> usize {
    let mut count = 0usize;
    let mut chars = sql.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '?' => count += 1,
            '\'' => {
                while let Some(c) = chars.next() {
                    if c == '\'' {
                        if chars.peek() == Some(&'\'') {
                            chars.next();
                        } else {
                            break;
                        }
                    }
                }
            }
            _ => {}
        }
    }
    count
}

/// Rewrite `?` placeholders outside quoted literals to `$1..$n`.
pub(crate) fn number_placeholders(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut n = 0usize;
    let mut chars = sql.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '?' => {
                n += 1;
                out.push('$');
                out.push_str(&n.to_string());
            }
            '\'' => {
                out.push('\'');
                // copy quoted content verbatim, honoring '' escapes
                while let Some(c) = chars.next() {
                    out.push(c);
                    if c == '\'' {
                        if chars.peek() == Some(&'\'') {
                            out.push(chars.next().expect("peeked"));
                        } else {
                            break;
                        }
                    }
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests;
