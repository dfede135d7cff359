//! Statement builders and assembly.
//!
//! Each statement kind pairs a mutable, single-owner builder with an
//! immutable frozen form produced by `build()`. Builders accumulate clauses
//! in insertion order; compilation happens only on the frozen statement.
//!
//! ```ignore
//! use prequel::{query, EntityPath};
//!
//! let user = EntityPath::<User>::new("user");
//! let age = user.number::<i32>("age");
//!
//! let stmt = query::select_from(&user)
//!     .and_where(age.goe(18))
//!     .order_by(age.desc())
//!     .limit(20)
//!     .build();
//!
//! let q = stmt.to_parameterized()?;
//! ```

pub mod delete;
pub mod insert;
pub mod select;
pub mod source;
pub mod update;

pub use delete::{DeleteBuilder, DeleteStatement};
pub use insert::{InsertBuilder, InsertStatement};
pub use select::{SelectBuilder, SelectStatement};
pub use source::{Join, JoinKind, TableSource};
pub use update::{UpdateBuilder, UpdateStatement};

use crate::expr::IntoExpr;
use crate::path::EntityPath;

/// Start a SELECT with one select-list expression; add sources with
/// [`SelectBuilder::from`].
pub fn select(expr: impl IntoExpr) -> SelectBuilder {
    SelectBuilder::new().select(expr)
}

/// Start a `SELECT *` over the given entity.
pub fn select_from<T>(entity: &EntityPath<T>) -> SelectBuilder {
    SelectBuilder::new().from(entity)
}

/// Start an INSERT without a target; set it with
/// [`InsertBuilder::into_table`].
pub fn insert() -> InsertBuilder {
    InsertBuilder::new()
}

/// Start an INSERT into the given entity.
pub fn insert_into<T>(entity: &EntityPath<T>) -> InsertBuilder {
    InsertBuilder::new().into_table(entity)
}

/// Start an UPDATE of the given entity.
pub fn update<T>(entity: &EntityPath<T>) -> UpdateBuilder {
    UpdateBuilder::new().table(entity)
}

/// Start a DELETE from the given entity.
pub fn delete_from<T>(entity: &EntityPath<T>) -> DeleteBuilder {
    DeleteBuilder::new().from(entity)
}
