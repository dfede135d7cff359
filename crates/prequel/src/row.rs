//! Row mapping.

use crate::error::{QueryError, QueryResult};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

/// Maps a result row to a host value.
///
/// Scalar impls read column 0; tuple impls read columns left to right.
/// Structs implement this by hand (or through whatever mapping layer sits
/// on top of this crate).
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> QueryResult<Self>;
}

fn get<'a, T: FromSql<'a>>(row: &'a Row, idx: usize) -> QueryResult<T> {
    row.try_get(idx)
        .map_err(|e| QueryError::decode(idx.to_string(), e.to_string()))
}

macro_rules! impl_from_row_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromRow for $ty {
                fn from_row(row: &Row) -> QueryResult<Self> {
                    get(row, 0)
                }
            }
        )*
    };
}

impl_from_row_scalar!(
    bool,
    i16,
    i32,
    i64,
    f32,
    f64,
    String,
    uuid::Uuid,
    chrono::NaiveDate,
    chrono::NaiveDateTime,
    serde_json::Value,
);

impl<T> FromRow for Option<T>
where
    T: FromRow,
    for<'a> T: FromSql<'a>,
{
    fn from_row(row: &Row) -> QueryResult<Self> {
        get(row, 0)
    }
}

macro_rules! impl_from_row_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name),+> FromRow for ($($name,)+)
        where
            $(for<'a> $name: FromSql<'a>,)+
        {
            fn from_row(row: &Row) -> QueryResult<Self> {
                Ok(($(get::<$name>(row, $idx)?,)+))
            }
        }
    };
}

impl_from_row_tuple!(A: 0, B: 1);
impl_from_row_tuple!(A: 0, B: 1, C: 2);
impl_from_row_tuple!(A: 0, B: 1, C: 2, D: 3);
