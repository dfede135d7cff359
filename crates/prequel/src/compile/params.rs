//! Parameter extraction: the bound values behind the `?` placeholders.
//!
//! Visits operands in exactly the order [`super::placeholder`] emits `?`
//! tokens, and applies the same value transform the literal renderer
//! applies (the wildcard wrap for CONTAINS/STARTS_WITH/ENDS_WITH comes from
//! [`MatchMode::pattern`], the one shared transform function).

use crate::error::{QueryError, QueryResult};
use crate::expr::{Expr, Operand};
use crate::predicate::Predicate;
use crate::value::Value;

pub(crate) fn collect_expr(expr: &Expr, out: &mut Vec<Value>) -> QueryResult<()> {
    match expr {
        Expr::Path(_) | Expr::Constant(_) => Ok(()),
        Expr::Aggregate(agg) => match &agg.arg {
            Some(arg) => collect_expr(arg, out),
            None => Ok(()),
        },
        Expr::Case(case) => {
            for when in &case.whens {
                collect_predicate(&when.condition, out)?;
                collect_expr(&when.value, out)?;
            }
            if let Some(else_value) = &case.else_value {
                collect_expr(else_value, out)?;
            }
            Ok(())
        }
        Expr::Predicate(pred) => collect_predicate(pred, out),
        Expr::Table(table) => collect_expr(&table.source, out),
        Expr::Join(join) => {
            join.validate()?;
            collect_expr(&join.target, out)?;
            if let Some(condition) = &join.condition {
                collect_predicate(condition, out)?;
            }
            Ok(())
        }
    }
}

/// A field-side operand: never a placeholder, but a sub-expression may
/// carry placeholders of its own.
fn collect_field_operand(operand: &Operand, out: &mut Vec<Value>) -> QueryResult<()> {
    match operand {
        Operand::Expr(expr) => collect_expr(expr, out),
        Operand::Value(_) => Ok(()),
    }
}

/// A value-side operand: a bare value is a placeholder, a sub-expression
/// recurses.
fn collect_value_operand(operand: &Operand, out: &mut Vec<Value>) -> QueryResult<()> {
    match operand {
        Operand::Expr(expr) => collect_expr(expr, out),
        Operand::Value(value) => {
            out.push(value.clone());
            Ok(())
        }
    }
}

pub(crate) fn collect_predicate(predicate: &Predicate, out: &mut Vec<Value>) -> QueryResult<()> {
    match predicate {
        Predicate::Compare { lhs, rhs, .. } => {
            collect_field_operand(lhs, out)?;
            collect_value_operand(rhs, out)
        }
        Predicate::Match { mode, lhs, rhs } => {
            collect_field_operand(lhs, out)?;
            match rhs {
                Operand::Value(value) => {
                    out.push(mode.pattern(value));
                    Ok(())
                }
                Operand::Expr(expr) => collect_expr(expr, out),
            }
        }
        Predicate::Nullness { lhs, .. } | Predicate::Emptiness { lhs, .. } => {
            collect_field_operand(lhs, out)
        }
        Predicate::Between { lhs, low, high } => {
            collect_field_operand(lhs, out)?;
            collect_value_operand(low, out)?;
            collect_value_operand(high, out)
        }
        Predicate::In { lhs, values } => {
            if values.is_empty() {
                return Err(QueryError::EmptyInList);
            }
            collect_field_operand(lhs, out)?;
            out.extend(values.iter().cloned());
            Ok(())
        }
        Predicate::And(left, right) | Predicate::Or(left, right) => {
            collect_predicate(left, out)?;
            collect_predicate(right, out)
        }
        Predicate::Not(inner) => collect_predicate(inner, out),
    }
}
