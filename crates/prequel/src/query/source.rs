//! FROM-clause sources and JOIN specifications.

use crate::error::{QueryError, QueryResult};
use crate::expr::{Expr, IntoExpr};
use crate::predicate::Predicate;

/// A FROM-clause entry: a source expression with an optional alias.
///
/// A blank or whitespace-only alias is treated as absent.
#[derive(Debug, Clone)]
pub struct TableSource {
    pub source: Expr,
    pub alias: Option<String>,
}

impl TableSource {
    /// Create a source without an alias.
    pub fn new(source: impl IntoExpr) -> Self {
        Self {
            source: source.into_expr(),
            alias: None,
        }
    }

    /// Create a source with an alias.
    pub fn aliased(source: impl IntoExpr, alias: impl Into<String>) -> Self {
        Self {
            source: source.into_expr(),
            alias: Some(alias.into()),
        }
    }

    /// The alias, with blank aliases normalized to `None`.
    pub fn effective_alias(&self) -> Option<&str> {
        self.alias
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}

/// SQL join kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    FullOuter,
    Cross,
}

impl JoinKind {
    pub(crate) fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// A JOIN against a target source, with an optional alias and, for every
/// kind except CROSS, an ON condition.
#[derive(Debug, Clone)]
pub struct Join {
    pub kind: JoinKind,
    pub target: Expr,
    pub alias: Option<String>,
    pub condition: Option<Predicate>,
}

impl Join {
    pub fn new(
        kind: JoinKind,
        target: impl IntoExpr,
        alias: Option<String>,
        condition: Option<Predicate>,
    ) -> Self {
        Self {
            kind,
            target: target.into_expr(),
            alias,
            condition,
        }
    }

    /// The alias, with blank aliases normalized to `None`.
    pub fn effective_alias(&self) -> Option<&str> {
        self.alias
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }

    /// CROSS joins must not carry a condition; every other kind must.
    pub(crate) fn validate(&self) -> QueryResult<()> {
        match (self.kind, &self.condition) {
            (JoinKind::Cross, Some(_)) => Err(QueryError::CrossJoinWithCondition),
            (JoinKind::Cross, None) => Ok(()),
            (_, Some(_)) => Ok(()),
            (kind, None) => Err(QueryError::MissingJoinCondition(kind.keyword())),
        }
    }
}
