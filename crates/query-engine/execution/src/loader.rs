//! Keyed batch loads.
//!
//! A loader query selects the rows of many parents at once. It takes the array of keys as
//! its only parameter, usually as `WHERE <key> = ANY($1)`.

use std::collections::HashMap;
use std::hash::Hash;

use sqlx::postgres::PgRow;
use sqlx::{Decode, FromRow, Postgres, Row, Type};

use crate::error::Error;

/// The column a many-key load reads the parent key from.
pub const KEY_BULK_LOAD: &str = "__loader_key";

/// The column a [`Value`] is read from.
pub const VALUE_COLUMN: &str = "__value";

/// Rows that know their own key.
pub trait WithId<I> {
    fn id(&self) -> &I;
}

/// A single value read from the `__value` column, for loads of plain ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Value<T>(pub T);

impl<'r, T> FromRow<'r, PgRow> for Value<T>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Value(row.try_get(VALUE_COLUMN)?))
    }
}

/// Each key is sent once, however often it was requested.
fn unique_keys(keys: &[i32]) -> Vec<i32> {
    let mut keys = keys.to_vec();
    keys.sort_unstable();
    keys.dedup();
    keys
}

/// Load at most one row per key, indexed by the id of the row.
///
/// Keys without a row are absent from the result.
pub async fn load_one_by_key<T>(
    pool: &sqlx::PgPool,
    query: &str,
    keys: &[i32],
) -> Result<HashMap<i32, T>, Error>
where
    T: WithId<i32> + for<'r> FromRow<'r, PgRow>,
{
    tracing::debug!(query, keys = keys.len(), "load one by key");

    let rows = sqlx::query(query)
        .bind(unique_keys(keys))
        .fetch_all(pool)
        .await?;

    let mut result = HashMap::with_capacity(rows.len());
    for row in &rows {
        let value = T::from_row(row)?;
        result.insert(*value.id(), value);
    }

    Ok(result)
}

/// Load any number of rows per key, grouped by the `__loader_key` column.
///
/// Rows of one key keep the order the database returned them in.
pub async fn load_many_by_key<T, I>(
    pool: &sqlx::PgPool,
    query: &str,
    keys: &[i32],
) -> Result<HashMap<I, Vec<T>>, Error>
where
    T: for<'r> FromRow<'r, PgRow>,
    I: for<'r> Decode<'r, Postgres> + Type<Postgres> + Eq + Hash,
{
    tracing::debug!(query, keys = keys.len(), "load many by key");

    let rows = sqlx::query(query)
        .bind(unique_keys(keys))
        .fetch_all(pool)
        .await?;

    let mut result: HashMap<I, Vec<T>> = HashMap::new();
    for row in &rows {
        let key: I = row.try_get(KEY_BULK_LOAD)?;
        let value = T::from_row(row)?;
        result.entry(key).or_default().push(value);
    }

    Ok(result)
}
