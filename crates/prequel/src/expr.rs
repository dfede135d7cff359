//! The expression tree compiled to SQL.
//!
//! [`Expr`] is the closed set of node kinds the compilation traversals
//! accept. The tree is persistent and append-only: every combinator returns
//! a new node, nothing is mutated after construction.

use crate::path::Path;
use crate::predicate::{self, Predicate};
use crate::query::source::{Join, TableSource};
use crate::value::{IntoValue, Value};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// An expression node.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A dotted column or table reference
    Path(Arc<Path>),
    /// An inline constant, rendered as a SQL literal in both compilation
    /// modes and never parameterized
    Constant(Value),
    /// An aggregate function call
    Aggregate(Aggregate),
    /// A CASE WHEN construct
    Case(Box<CaseExpr>),
    /// A Boolean expression used as a value
    Predicate(Box<Predicate>),
    /// A FROM-clause source with optional alias
    Table(Box<TableSource>),
    /// A JOIN clause
    Join(Box<Join>),
}

/// A predicate operand: either a sub-expression or a bare value.
#[derive(Debug, Clone)]
pub enum Operand {
    Expr(Expr),
    Value(Value),
}

/// Conversion into an [`Expr`] node.
pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl IntoExpr for &Expr {
    fn into_expr(self) -> Expr {
        self.clone()
    }
}

impl IntoExpr for Predicate {
    fn into_expr(self) -> Expr {
        Expr::Predicate(Box::new(self))
    }
}

impl IntoExpr for Aggregate {
    fn into_expr(self) -> Expr {
        Expr::Aggregate(self)
    }
}

impl IntoExpr for CaseExpr {
    fn into_expr(self) -> Expr {
        Expr::Case(Box::new(self))
    }
}

impl IntoExpr for Value {
    fn into_expr(self) -> Expr {
        Expr::Constant(self)
    }
}

impl IntoExpr for &str {
    fn into_expr(self) -> Expr {
        Expr::Constant(self.into_value())
    }
}

impl IntoExpr for String {
    fn into_expr(self) -> Expr {
        Expr::Constant(self.into_value())
    }
}

impl IntoExpr for i32 {
    fn into_expr(self) -> Expr {
        Expr::Constant(self.into_value())
    }
}

impl IntoExpr for i64 {
    fn into_expr(self) -> Expr {
        Expr::Constant(self.into_value())
    }
}

impl IntoExpr for f64 {
    fn into_expr(self) -> Expr {
        Expr::Constant(self.into_value())
    }
}

impl IntoExpr for bool {
    fn into_expr(self) -> Expr {
        Expr::Constant(self.into_value())
    }
}

/// Aggregate function kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFn {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFn {
    pub(crate) fn keyword(&self) -> &'static str {
        match self {
            AggregateFn::Count => "COUNT",
            AggregateFn::Sum => "SUM",
            AggregateFn::Avg => "AVG",
            AggregateFn::Min => "MIN",
            AggregateFn::Max => "MAX",
        }
    }
}

/// An aggregate function call. `arg` is `None` only for `COUNT(*)`.
#[derive(Debug, Clone)]
pub struct Aggregate {
    pub func: AggregateFn,
    pub arg: Option<Box<Expr>>,
}

/// `COUNT(*)`
pub fn count_all() -> Expr {
    Expr::Aggregate(Aggregate {
        func: AggregateFn::Count,
        arg: None,
    })
}

/// `COUNT(expr)`
pub fn count(arg: impl IntoExpr) -> Expr {
    aggregate(AggregateFn::Count, arg)
}

/// `SUM(expr)`
pub fn sum(arg: impl IntoExpr) -> Expr {
    aggregate(AggregateFn::Sum, arg)
}

/// `AVG(expr)`
pub fn avg(arg: impl IntoExpr) -> Expr {
    aggregate(AggregateFn::Avg, arg)
}

/// `MIN(expr)`
pub fn min(arg: impl IntoExpr) -> Expr {
    aggregate(AggregateFn::Min, arg)
}

/// `MAX(expr)`
pub fn max(arg: impl IntoExpr) -> Expr {
    aggregate(AggregateFn::Max, arg)
}

fn aggregate(func: AggregateFn, arg: impl IntoExpr) -> Expr {
    Expr::Aggregate(Aggregate {
        func,
        arg: Some(Box::new(arg.into_expr())),
    })
}

/// A number-typed expression, carrying its result type as a phantom tag.
///
/// Produced by the aggregate methods on
/// [`NumberPath`](crate::path::NumberPath); supports the comparison
/// combinators so aggregates compose into HAVING predicates:
///
/// ```ignore
/// let seniors = user.age.avg().gt(40.0);
/// ```
pub struct NumberExpr<N> {
    expr: Expr,
    _number: PhantomData<fn() -> N>,
}

impl<N> NumberExpr<N> {
    fn new(expr: Expr) -> Self {
        Self {
            expr,
            _number: PhantomData,
        }
    }

    pub(crate) fn sum(arg: Expr) -> NumberExpr<N> {
        NumberExpr::new(aggregate(AggregateFn::Sum, arg))
    }

    pub(crate) fn min(arg: Expr) -> NumberExpr<N> {
        NumberExpr::new(aggregate(AggregateFn::Min, arg))
    }

    pub(crate) fn max(arg: Expr) -> NumberExpr<N> {
        NumberExpr::new(aggregate(AggregateFn::Max, arg))
    }

    /// The underlying expression.
    pub fn expr(&self) -> Expr {
        self.expr.clone()
    }

    pub fn asc(&self) -> OrderSpec {
        OrderSpec::asc(self.expr())
    }

    pub fn desc(&self) -> OrderSpec {
        OrderSpec::desc(self.expr())
    }
}

impl NumberExpr<f64> {
    pub(crate) fn avg(arg: Expr) -> NumberExpr<f64> {
        NumberExpr::new(aggregate(AggregateFn::Avg, arg))
    }
}

impl NumberExpr<i64> {
    pub(crate) fn count(arg: Expr) -> NumberExpr<i64> {
        NumberExpr::new(aggregate(AggregateFn::Count, arg))
    }

    /// `COUNT(*)` as a typed expression.
    pub fn count_all() -> NumberExpr<i64> {
        NumberExpr::new(count_all())
    }
}

impl<N: IntoValue> NumberExpr<N> {
    pub fn eq(&self, value: N) -> Predicate {
        predicate::eq(self.expr(), value)
    }

    pub fn ne(&self, value: N) -> Predicate {
        predicate::ne(self.expr(), value)
    }

    pub fn lt(&self, value: N) -> Predicate {
        predicate::lt(self.expr(), value)
    }

    pub fn loe(&self, value: N) -> Predicate {
        predicate::loe(self.expr(), value)
    }

    pub fn gt(&self, value: N) -> Predicate {
        predicate::gt(self.expr(), value)
    }

    pub fn goe(&self, value: N) -> Predicate {
        predicate::goe(self.expr(), value)
    }

    pub fn between(&self, min: N, max: N) -> Predicate {
        predicate::between(self.expr(), min, max)
    }
}

impl<N> Clone for NumberExpr<N> {
    fn clone(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            _number: PhantomData,
        }
    }
}

impl<N> fmt::Debug for NumberExpr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NumberExpr").field(&self.expr).finish()
    }
}

impl<N> IntoExpr for NumberExpr<N> {
    fn into_expr(self) -> Expr {
        self.expr
    }
}

impl<N> IntoExpr for &NumberExpr<N> {
    fn into_expr(self) -> Expr {
        self.expr()
    }
}

/// One `WHEN condition THEN value` arm of a CASE expression.
#[derive(Debug, Clone)]
pub struct WhenClause {
    pub condition: Predicate,
    pub value: Expr,
}

/// A SQL `CASE WHEN … THEN … [ELSE …] END` expression.
///
/// Arms are evaluated top to bottom, first match wins. Without an ELSE arm
/// the expression yields SQL NULL when nothing matches.
#[derive(Debug, Clone)]
pub struct CaseExpr {
    pub whens: Vec<WhenClause>,
    pub else_value: Option<Expr>,
}

/// Start a CASE expression with its first WHEN arm.
pub fn case_when(condition: Predicate, value: impl IntoExpr) -> CaseBuilder {
    CaseBuilder { whens: Vec::new() }.when(condition, value)
}

/// Builder for [`CaseExpr`].
#[derive(Debug, Clone, Default)]
pub struct CaseBuilder {
    whens: Vec<WhenClause>,
}

impl CaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `WHEN condition THEN value` arm.
    pub fn when(mut self, condition: Predicate, value: impl IntoExpr) -> Self {
        self.whens.push(WhenClause {
            condition,
            value: value.into_expr(),
        });
        self
    }

    /// Finish with an ELSE arm.
    pub fn otherwise(self, value: impl IntoExpr) -> CaseExpr {
        CaseExpr {
            whens: self.whens,
            else_value: Some(value.into_expr()),
        }
    }

    /// Finish without an ELSE arm.
    pub fn end(self) -> CaseExpr {
        CaseExpr {
            whens: self.whens,
            else_value: None,
        }
    }
}

/// An ORDER BY entry: an expression plus direction.
#[derive(Debug, Clone)]
pub struct OrderSpec {
    pub expr: Expr,
    pub descending: bool,
}

impl OrderSpec {
    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            descending: false,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            descending: true,
        }
    }
}

/// Conversion into an [`OrderSpec`]; bare expressions sort ascending.
pub trait IntoOrderSpec {
    fn into_order_spec(self) -> OrderSpec;
}

impl IntoOrderSpec for OrderSpec {
    fn into_order_spec(self) -> OrderSpec {
        self
    }
}

impl IntoOrderSpec for Expr {
    fn into_order_spec(self) -> OrderSpec {
        OrderSpec::asc(self)
    }
}

impl IntoOrderSpec for &crate::path::StringPath {
    fn into_order_spec(self) -> OrderSpec {
        OrderSpec::asc(self.expr())
    }
}

impl<N> IntoOrderSpec for &crate::path::NumberPath<N> {
    fn into_order_spec(self) -> OrderSpec {
        OrderSpec::asc(self.expr())
    }
}

impl<N> IntoOrderSpec for NumberExpr<N> {
    fn into_order_spec(self) -> OrderSpec {
        OrderSpec::asc(self.into_expr())
    }
}
