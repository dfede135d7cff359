//! Boolean-valued expressions for WHERE/HAVING/JOIN-ON/CASE-WHEN.
//!
//! [`Predicate`] is a closed sum type: every compilation traversal matches it
//! exhaustively, so adding a variant is a compile error at each site that
//! must handle it. Operand arity is fixed per variant. The combinators
//! ([`Predicate::and`], [`Predicate::or`], [`Predicate::not`]) always wrap
//! their inputs in a new node; predicates are cheap to clone and safe to
//! reuse across trees.

use crate::expr::{Expr, IntoExpr, Operand};
use crate::value::{IntoValue, Value};

/// Comparison operators with a value or expression on the right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    /// Less-or-equal
    Loe,
    /// Greater-or-equal
    Goe,
}

impl CompareOp {
    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Loe => "<=",
            CompareOp::Goe => ">=",
        }
    }
}

/// String-matching modes, all compiled to `LIKE`.
///
/// [`MatchMode::pattern`] is the single place the wildcard transform lives:
/// the literal compiler calls it to build the inline pattern and the
/// parameter extractor calls it to produce the bound value, so the two can
/// never disagree about what gets matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Pattern used verbatim
    Like,
    /// `%value%`
    Contains,
    /// `value%`
    StartsWith,
    /// `%value`
    EndsWith,
}

impl MatchMode {
    /// Apply the wildcard transform for this mode to a raw value.
    pub fn pattern(&self, value: &Value) -> Value {
        match self {
            MatchMode::Like => value.clone(),
            MatchMode::Contains => Value::Text(format!("%{value}%")),
            MatchMode::StartsWith => Value::Text(format!("{value}%")),
            MatchMode::EndsWith => Value::Text(format!("%{value}")),
        }
    }
}

/// A Boolean-valued expression tree.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Binary comparison: `(lhs op rhs)`
    Compare {
        op: CompareOp,
        lhs: Operand,
        rhs: Operand,
    },
    /// String match, compiled as `(lhs LIKE pattern)`
    Match {
        mode: MatchMode,
        lhs: Operand,
        rhs: Operand,
    },
    /// `(expr IS NULL)` / `(expr IS NOT NULL)`
    Nullness { lhs: Operand, negated: bool },
    /// `(expr = '' OR expr IS NULL)` / `(expr != '' AND expr IS NOT NULL)`
    ///
    /// The two forms are not logical complements of each other under SQL
    /// three-valued logic; they are independent predicates.
    Emptiness { lhs: Operand, negated: bool },
    /// Inclusive range: `(lhs BETWEEN low AND high)`
    Between {
        lhs: Operand,
        low: Operand,
        high: Operand,
    },
    /// Set membership over a literal list; the list must not be empty.
    In { lhs: Operand, values: Vec<Value> },
    /// Conjunction of two predicates
    And(Box<Predicate>, Box<Predicate>),
    /// Disjunction of two predicates
    Or(Box<Predicate>, Box<Predicate>),
    /// Negation: `(NOT inner)`
    Not(Box<Predicate>),
}

impl Predicate {
    /// Combine with another predicate using AND.
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::And(Box::new(self), Box::new(other))
    }

    /// Combine with another predicate using OR.
    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    /// Negate this predicate.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }

    /// This predicate as an expression operand.
    pub fn expr(self) -> Expr {
        Expr::Predicate(Box::new(self))
    }
}

fn compare(op: CompareOp, lhs: impl IntoExpr, value: impl IntoValue) -> Predicate {
    Predicate::Compare {
        op,
        lhs: Operand::Expr(lhs.into_expr()),
        rhs: Operand::Value(value.into_value()),
    }
}

/// `lhs = value`
pub fn eq(lhs: impl IntoExpr, value: impl IntoValue) -> Predicate {
    compare(CompareOp::Eq, lhs, value)
}

/// `lhs != value`
pub fn ne(lhs: impl IntoExpr, value: impl IntoValue) -> Predicate {
    compare(CompareOp::Ne, lhs, value)
}

/// `lhs < value`
pub fn lt(lhs: impl IntoExpr, value: impl IntoValue) -> Predicate {
    compare(CompareOp::Lt, lhs, value)
}

/// `lhs <= value`
pub fn loe(lhs: impl IntoExpr, value: impl IntoValue) -> Predicate {
    compare(CompareOp::Loe, lhs, value)
}

/// `lhs > value`
pub fn gt(lhs: impl IntoExpr, value: impl IntoValue) -> Predicate {
    compare(CompareOp::Gt, lhs, value)
}

/// `lhs >= value`
pub fn goe(lhs: impl IntoExpr, value: impl IntoValue) -> Predicate {
    compare(CompareOp::Goe, lhs, value)
}

/// Compare two expressions, e.g. a column against another column.
pub fn eq_expr(lhs: impl IntoExpr, rhs: impl IntoExpr) -> Predicate {
    Predicate::Compare {
        op: CompareOp::Eq,
        lhs: Operand::Expr(lhs.into_expr()),
        rhs: Operand::Expr(rhs.into_expr()),
    }
}

/// `lhs BETWEEN min AND max`, bounds inclusive.
pub fn between(lhs: impl IntoExpr, min: impl IntoValue, max: impl IntoValue) -> Predicate {
    Predicate::Between {
        lhs: Operand::Expr(lhs.into_expr()),
        low: Operand::Value(min.into_value()),
        high: Operand::Value(max.into_value()),
    }
}

/// `lhs IN (values…)`. An empty list is rejected when the statement is
/// compiled.
pub fn in_values<I, V>(lhs: impl IntoExpr, values: I) -> Predicate
where
    I: IntoIterator<Item = V>,
    V: IntoValue,
{
    Predicate::In {
        lhs: Operand::Expr(lhs.into_expr()),
        values: values.into_iter().map(IntoValue::into_value).collect(),
    }
}

fn string_match(mode: MatchMode, lhs: impl IntoExpr, value: impl Into<String>) -> Predicate {
    Predicate::Match {
        mode,
        lhs: Operand::Expr(lhs.into_expr()),
        rhs: Operand::Value(Value::Text(value.into())),
    }
}

/// `lhs LIKE pattern`, pattern used verbatim.
pub fn like(lhs: impl IntoExpr, pattern: impl Into<String>) -> Predicate {
    string_match(MatchMode::Like, lhs, pattern)
}

/// Substring match: `lhs LIKE '%value%'`.
pub fn contains(lhs: impl IntoExpr, substring: impl Into<String>) -> Predicate {
    string_match(MatchMode::Contains, lhs, substring)
}

/// Prefix match: `lhs LIKE 'value%'`.
pub fn starts_with(lhs: impl IntoExpr, prefix: impl Into<String>) -> Predicate {
    string_match(MatchMode::StartsWith, lhs, prefix)
}

/// Suffix match: `lhs LIKE '%value'`.
pub fn ends_with(lhs: impl IntoExpr, suffix: impl Into<String>) -> Predicate {
    string_match(MatchMode::EndsWith, lhs, suffix)
}

/// `lhs IS NULL`
pub fn is_null(lhs: impl IntoExpr) -> Predicate {
    Predicate::Nullness {
        lhs: Operand::Expr(lhs.into_expr()),
        negated: false,
    }
}

/// `lhs IS NOT NULL`
pub fn is_not_null(lhs: impl IntoExpr) -> Predicate {
    Predicate::Nullness {
        lhs: Operand::Expr(lhs.into_expr()),
        negated: true,
    }
}

/// `(lhs = '' OR lhs IS NULL)`
pub fn is_empty(lhs: impl IntoExpr) -> Predicate {
    Predicate::Emptiness {
        lhs: Operand::Expr(lhs.into_expr()),
        negated: false,
    }
}

/// `(lhs != '' AND lhs IS NOT NULL)`
pub fn is_not_empty(lhs: impl IntoExpr) -> Predicate {
    Predicate::Emptiness {
        lhs: Operand::Expr(lhs.into_expr()),
        negated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_transforms() {
        let v = Value::Text("oh".to_string());
        assert_eq!(MatchMode::Contains.pattern(&v), Value::Text("%oh%".to_string()));
        assert_eq!(MatchMode::StartsWith.pattern(&v), Value::Text("oh%".to_string()));
        assert_eq!(MatchMode::EndsWith.pattern(&v), Value::Text("%oh".to_string()));
        assert_eq!(MatchMode::Like.pattern(&v), v);
    }

    #[test]
    fn pattern_wraps_non_text_values() {
        let v = Value::Int(5);
        assert_eq!(MatchMode::Contains.pattern(&v), Value::Text("%5%".to_string()));
    }

    #[test]
    fn combinators_wrap_without_mutating() {
        let base = eq(crate::path::StringPath::new("a").expr(), "x");
        let combined = base.clone().and(base.clone().not());
        assert!(matches!(combined, Predicate::And(..)));
        // original still usable
        assert!(matches!(base, Predicate::Compare { .. }));
    }
}
