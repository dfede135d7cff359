//! # prequel
//!
//! A typed, composable SQL query builder. Statements are assembled as
//! immutable expression trees and compiled into two synchronized forms:
//!
//! - **literal SQL** — values inlined, for inspection and logging;
//! - **parameterized SQL** — `?` placeholders plus an ordered parameter
//!   list, for prepared-statement execution.
//!
//! The two forms are produced by structurally identical traversals over the
//! same tree, so the N-th placeholder always lines up with the N-th
//! parameter.
//!
//! ## Example
//!
//! ```ignore
//! use prequel::{query, EntityPath};
//!
//! struct User;
//!
//! let user = EntityPath::<User>::new("user");
//! let first_name = user.string("firstName");
//! let age = user.number::<i32>("age");
//!
//! let stmt = query::select_from(&user)
//!     .and_where(first_name.eq("John").and(age.goe(18)))
//!     .order_by(age.desc())
//!     .limit(20)
//!     .build();
//!
//! assert!(stmt.to_sql()?.contains("(user.firstName = 'John')"));
//!
//! let q = stmt.to_parameterized()?;
//! let users: Vec<(String, i32)> = stmt.fetch(&client).await?;
//! ```

pub mod compile;
pub mod error;
pub mod executor;
pub mod expr;
pub mod path;
pub mod predicate;
pub mod query;
pub mod row;
pub mod value;

pub use compile::ParameterizedQuery;
pub use error::{QueryError, QueryResult};
pub use executor::Executor;
pub use expr::{
    Aggregate, AggregateFn, CaseBuilder, CaseExpr, Expr, IntoExpr, IntoOrderSpec, NumberExpr,
    Operand, OrderSpec, WhenClause, avg, case_when, count, count_all, max, min, sum,
};
pub use path::{ColumnRef, EntityPath, NumberPath, Path, StringPath};
pub use predicate::{CompareOp, MatchMode, Predicate};
pub use query::{
    DeleteBuilder, DeleteStatement, InsertBuilder, InsertStatement, Join, JoinKind, SelectBuilder,
    SelectStatement, TableSource, UpdateBuilder, UpdateStatement, delete_from, insert, insert_into,
    select, select_from, update,
};
pub use row::FromRow;
pub use value::{IntoValue, Value};
