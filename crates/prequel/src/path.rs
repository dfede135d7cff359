//! Dotted column and table references.
//!
//! A [`Path`] is a name plus an optional shared parent, rendered as a dotted
//! identifier (`user.firstName`). Paths are built once when entity metadata
//! is constructed and never mutated afterwards; parents are shared through
//! [`Arc`] so a table path can back any number of column paths.
//!
//! The typed facades ([`EntityPath`], [`StringPath`], [`NumberPath`]) carry a
//! phantom result type that exists purely for API-level type checking — SQL
//! compilation never consults it.

use crate::expr::{Expr, IntoExpr, NumberExpr, OrderSpec};
use crate::predicate::{self, Predicate};
use crate::value::IntoValue;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A single segment of a dotted reference to a table or column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    name: String,
    parent: Option<Arc<Path>>,
}

impl Path {
    /// Create a root path.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    /// Create a path under a shared parent.
    pub fn with_parent(name: impl Into<String>, parent: Arc<Path>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
        }
    }

    /// The name of this path segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent path, if any.
    pub fn parent(&self) -> Option<&Arc<Path>> {
        self.parent.as_ref()
    }

    /// The full dotted path from the root to this segment.
    pub fn full_path(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}.{}", parent.full_path(), self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = &self.parent {
            write!(f, "{parent}.")?;
        }
        write!(f, "{}", self.name)
    }
}

/// Anything that names a single column for INSERT/UPDATE targets.
pub trait ColumnRef {
    fn column_path(&self) -> Arc<Path>;
}

/// A reference to a table or entity, and the factory for its column paths.
pub struct EntityPath<T> {
    path: Arc<Path>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> EntityPath<T> {
    /// Create an entity path for the given table name.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            path: Arc::new(Path::new(table)),
            _entity: PhantomData,
        }
    }

    fn child(path: Arc<Path>) -> Self {
        Self {
            path,
            _entity: PhantomData,
        }
    }

    /// The underlying path.
    pub fn path(&self) -> &Arc<Path> {
        &self.path
    }

    /// Create a string-typed column path under this entity.
    pub fn string(&self, column: impl Into<String>) -> StringPath {
        StringPath {
            path: Arc::new(Path::with_parent(column, self.path.clone())),
        }
    }

    /// Create a number-typed column path under this entity.
    pub fn number<N>(&self, column: impl Into<String>) -> NumberPath<N> {
        NumberPath {
            path: Arc::new(Path::with_parent(column, self.path.clone())),
            _number: PhantomData,
        }
    }

    /// Create a nested entity path for an association.
    pub fn entity<E>(&self, name: impl Into<String>) -> EntityPath<E> {
        EntityPath::child(Arc::new(Path::with_parent(name, self.path.clone())))
    }

    /// This path as an expression.
    pub fn expr(&self) -> Expr {
        Expr::Path(self.path.clone())
    }
}

impl<T> Clone for EntityPath<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for EntityPath<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityPath").field(&self.path.full_path()).finish()
    }
}

impl<T> ColumnRef for EntityPath<T> {
    fn column_path(&self) -> Arc<Path> {
        self.path.clone()
    }
}

/// A string-typed column path.
#[derive(Clone)]
pub struct StringPath {
    path: Arc<Path>,
}

impl StringPath {
    /// Create a root-level string path.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            path: Arc::new(Path::new(name)),
        }
    }

    /// The underlying path.
    pub fn path(&self) -> &Arc<Path> {
        &self.path
    }

    /// This path as an expression.
    pub fn expr(&self) -> Expr {
        Expr::Path(self.path.clone())
    }

    pub fn eq(&self, value: impl Into<String>) -> Predicate {
        predicate::eq(self, Into::<String>::into(value))
    }

    pub fn ne(&self, value: impl Into<String>) -> Predicate {
        predicate::ne(self, Into::<String>::into(value))
    }

    pub fn lt(&self, value: impl Into<String>) -> Predicate {
        predicate::lt(self, Into::<String>::into(value))
    }

    pub fn loe(&self, value: impl Into<String>) -> Predicate {
        predicate::loe(self, Into::<String>::into(value))
    }

    pub fn gt(&self, value: impl Into<String>) -> Predicate {
        predicate::gt(self, Into::<String>::into(value))
    }

    pub fn goe(&self, value: impl Into<String>) -> Predicate {
        predicate::goe(self, Into::<String>::into(value))
    }

    /// Compare against another column.
    pub fn eq_path(&self, other: &StringPath) -> Predicate {
        predicate::eq_expr(self, other)
    }

    pub fn between(&self, min: impl Into<String>, max: impl Into<String>) -> Predicate {
        predicate::between(self, Into::<String>::into(min), Into::<String>::into(max))
    }

    pub fn in_list<I, S>(&self, values: I) -> Predicate
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        predicate::in_values(self, values)
    }

    /// `LIKE` with the pattern used verbatim.
    pub fn like(&self, pattern: impl Into<String>) -> Predicate {
        predicate::like(self, pattern)
    }

    /// Substring match, compiled as `LIKE '%value%'`.
    pub fn contains(&self, substring: impl Into<String>) -> Predicate {
        predicate::contains(self, substring)
    }

    /// Prefix match, compiled as `LIKE 'value%'`.
    pub fn starts_with(&self, prefix: impl Into<String>) -> Predicate {
        predicate::starts_with(self, prefix)
    }

    /// Suffix match, compiled as `LIKE '%value'`.
    pub fn ends_with(&self, suffix: impl Into<String>) -> Predicate {
        predicate::ends_with(self, suffix)
    }

    pub fn is_null(&self) -> Predicate {
        predicate::is_null(self)
    }

    pub fn is_not_null(&self) -> Predicate {
        predicate::is_not_null(self)
    }

    /// Empty-or-null check: `(col = '' OR col IS NULL)`.
    pub fn is_empty(&self) -> Predicate {
        predicate::is_empty(self)
    }

    /// Non-empty check: `(col != '' AND col IS NOT NULL)`.
    ///
    /// Not the logical complement of [`StringPath::is_empty`] under SQL
    /// three-valued logic; treat the two as independent predicates.
    pub fn is_not_empty(&self) -> Predicate {
        predicate::is_not_empty(self)
    }

    pub fn asc(&self) -> OrderSpec {
        OrderSpec::asc(self.expr())
    }

    pub fn desc(&self) -> OrderSpec {
        OrderSpec::desc(self.expr())
    }
}

impl fmt::Debug for StringPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StringPath").field(&self.path.full_path()).finish()
    }
}

impl ColumnRef for StringPath {
    fn column_path(&self) -> Arc<Path> {
        self.path.clone()
    }
}

/// A number-typed column path.
pub struct NumberPath<N> {
    path: Arc<Path>,
    _number: PhantomData<fn() -> N>,
}

impl<N> NumberPath<N> {
    /// Create a root-level number path.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            path: Arc::new(Path::new(name)),
            _number: PhantomData,
        }
    }

    /// The underlying path.
    pub fn path(&self) -> &Arc<Path> {
        &self.path
    }

    /// This path as an expression.
    pub fn expr(&self) -> Expr {
        Expr::Path(self.path.clone())
    }

    /// Compare against another column.
    pub fn eq_path(&self, other: &NumberPath<N>) -> Predicate {
        predicate::eq_expr(self, other)
    }

    pub fn is_null(&self) -> Predicate {
        predicate::is_null(self)
    }

    pub fn is_not_null(&self) -> Predicate {
        predicate::is_not_null(self)
    }

    /// `SUM(col)`, preserving the column's numeric type.
    pub fn sum(&self) -> NumberExpr<N> {
        NumberExpr::sum(self.expr())
    }

    /// `AVG(col)`, widened to a floating-point result.
    pub fn avg(&self) -> NumberExpr<f64> {
        NumberExpr::avg(self.expr())
    }

    /// `MIN(col)`.
    pub fn min(&self) -> NumberExpr<N> {
        NumberExpr::min(self.expr())
    }

    /// `MAX(col)`.
    pub fn max(&self) -> NumberExpr<N> {
        NumberExpr::max(self.expr())
    }

    /// `COUNT(col)`, always a 64-bit count.
    pub fn count(&self) -> NumberExpr<i64> {
        NumberExpr::count(self.expr())
    }

    pub fn asc(&self) -> OrderSpec {
        OrderSpec::asc(self.expr())
    }

    pub fn desc(&self) -> OrderSpec {
        OrderSpec::desc(self.expr())
    }
}

impl<N: IntoValue> NumberPath<N> {
    pub fn eq(&self, value: N) -> Predicate {
        predicate::eq(self, value)
    }

    pub fn ne(&self, value: N) -> Predicate {
        predicate::ne(self, value)
    }

    pub fn lt(&self, value: N) -> Predicate {
        predicate::lt(self, value)
    }

    pub fn loe(&self, value: N) -> Predicate {
        predicate::loe(self, value)
    }

    pub fn gt(&self, value: N) -> Predicate {
        predicate::gt(self, value)
    }

    pub fn goe(&self, value: N) -> Predicate {
        predicate::goe(self, value)
    }

    /// Inclusive range check.
    pub fn between(&self, min: N, max: N) -> Predicate {
        predicate::between(self, min, max)
    }

    pub fn in_list<I: IntoIterator<Item = N>>(&self, values: I) -> Predicate {
        predicate::in_values(self, values)
    }
}

impl<N> Clone for NumberPath<N> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _number: PhantomData,
        }
    }
}

impl<N> fmt::Debug for NumberPath<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NumberPath").field(&self.path.full_path()).finish()
    }
}

impl<N> ColumnRef for NumberPath<N> {
    fn column_path(&self) -> Arc<Path> {
        self.path.clone()
    }
}

impl<T> IntoExpr for &EntityPath<T> {
    fn into_expr(self) -> Expr {
        self.expr()
    }
}

impl IntoExpr for &StringPath {
    fn into_expr(self) -> Expr {
        self.expr()
    }
}

impl<N> IntoExpr for &NumberPath<N> {
    fn into_expr(self) -> Expr {
        self.expr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct User;

    #[test]
    fn root_path_is_bare_name() {
        assert_eq!(Path::new("user").full_path(), "user");
    }

    #[test]
    fn child_path_is_dotted() {
        let user = EntityPath::<User>::new("user");
        assert_eq!(user.string("firstName").path().full_path(), "user.firstName");
    }

    #[test]
    fn nested_entity_paths_chain() {
        let user = EntityPath::<User>::new("user");
        let address = user.entity::<()>("address");
        assert_eq!(address.string("city").path().full_path(), "user.address.city");
    }

    #[test]
    fn parents_are_shared() {
        let user = EntityPath::<User>::new("user");
        let a = user.string("a");
        let b = user.string("b");
        assert!(Arc::ptr_eq(
            a.path().parent().unwrap(),
            b.path().parent().unwrap()
        ));
    }
}
