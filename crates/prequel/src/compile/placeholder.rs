//! Placeholder SQL rendering: `?` at every literal operand position.
//!
//! Identical traversal shape to [`super::literal`]; expression-valued
//! operands recurse and are never replaced by a placeholder, and embedded
//! constants ([`Expr::Constant`]) stay inline so they contribute no
//! parameters. [`super::params`] must emit values in exactly the order this
//! module emits `?` tokens.

use crate::error::{QueryError, QueryResult};
use crate::expr::{Aggregate, CaseExpr, Expr, Operand};
use crate::predicate::Predicate;
use crate::query::source::{Join, TableSource};

pub(crate) fn expr_sql(expr: &Expr) -> QueryResult<String> {
    match expr {
        Expr::Path(path) => Ok(path.full_path()),
        Expr::Constant(value) => Ok(value.as_literal()),
        Expr::Aggregate(agg) => aggregate_sql(agg),
        Expr::Case(case) => case_sql(case),
        Expr::Predicate(pred) => predicate_sql(pred),
        Expr::Table(table) => table_sql(table),
        Expr::Join(join) => join_sql(join),
    }
}

fn operand_sql(operand: &Operand) -> QueryResult<String> {
    match operand {
        Operand::Expr(expr) => expr_sql(expr),
        Operand::Value(value) => Ok(value.as_literal()),
    }
}

/// A value-side operand: `?` for a bare value, recursive compilation for a
/// sub-expression.
fn value_operand_sql(operand: &Operand) -> QueryResult<String> {
    match operand {
        Operand::Expr(expr) => expr_sql(expr),
        Operand::Value(_) => Ok("?".to_string()),
    }
}

pub(crate) fn predicate_sql(predicate: &Predicate) -> QueryResult<String> {
    match predicate {
        Predicate::Compare { op, lhs, rhs } => Ok(format!(
            "({} {} {})",
            operand_sql(lhs)?,
            op.symbol(),
            value_operand_sql(rhs)?
        )),
        Predicate::Match { lhs, rhs, .. } => Ok(format!(
            "({} LIKE {})",
            operand_sql(lhs)?,
            value_operand_sql(rhs)?
        )),
        Predicate::Nullness { lhs, negated } => {
            let keyword = if *negated { "IS NOT NULL" } else { "IS NULL" };
            Ok(format!("({} {})", operand_sql(lhs)?, keyword))
        }
        Predicate::Emptiness { lhs, negated } => {
            let field = operand_sql(lhs)?;
            if *negated {
                Ok(format!("({field} != '' AND {field} IS NOT NULL)"))
            } else {
                Ok(format!("({field} = '' OR {field} IS NULL)"))
            }
        }
        Predicate::Between { lhs, low, high } => Ok(format!(
            "({} BETWEEN {} AND {})",
            operand_sql(lhs)?,
            value_operand_sql(low)?,
            value_operand_sql(high)?
        )),
        Predicate::In { lhs, values } => {
            if values.is_empty() {
                return Err(QueryError::EmptyInList);
            }
            let list = values.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
            Ok(format!("({} IN ({}))", operand_sql(lhs)?, list))
        }
        Predicate::And(left, right) => Ok(format!(
            "({} AND {})",
            predicate_sql(left)?,
            predicate_sql(right)?
        )),
        Predicate::Or(left, right) => Ok(format!(
            "({} OR {})",
            predicate_sql(left)?,
            predicate_sql(right)?
        )),
        Predicate::Not(inner) => Ok(format!("(NOT {})", predicate_sql(inner)?)),
    }
}

fn aggregate_sql(agg: &Aggregate) -> QueryResult<String> {
    match &agg.arg {
        None => Ok(format!("{}(*)", agg.func.keyword())),
        Some(arg) => Ok(format!("{}({})", agg.func.keyword(), expr_sql(arg)?)),
    }
}

fn case_sql(case: &CaseExpr) -> QueryResult<String> {
    let mut sql = String::from("CASE");
    for when in &case.whens {
        sql.push_str(" WHEN ");
        sql.push_str(&predicate_sql(&when.condition)?);
        sql.push_str(" THEN ");
        sql.push_str(&expr_sql(&when.value)?);
    }
    if let Some(else_value) = &case.else_value {
        sql.push_str(" ELSE ");
        sql.push_str(&expr_sql(else_value)?);
    }
    sql.push_str(" END");
    Ok(sql)
}

pub(crate) fn table_sql(table: &TableSource) -> QueryResult<String> {
    let mut sql = expr_sql(&table.source)?;
    if let Some(alias) = table.effective_alias() {
        sql.push_str(" AS ");
        sql.push_str(alias);
    }
    Ok(sql)
}

pub(crate) fn join_sql(join: &Join) -> QueryResult<String> {
    join.validate()?;
    let mut sql = String::from(join.kind.keyword());
    sql.push(' ');
    sql.push_str(&expr_sql(&join.target)?);
    if let Some(alias) = join.effective_alias() {
        sql.push_str(" AS ");
        sql.push_str(alias);
    }
    if let Some(condition) = &join.condition {
        sql.push_str(" ON ");
        sql.push_str(&predicate_sql(condition)?);
    }
    Ok(sql)
}
