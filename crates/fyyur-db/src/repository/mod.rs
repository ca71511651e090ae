//! Directory queries and writes.
//!
//! Every function takes the store handle explicitly. Reads accept any
//! `ConnectionTrait` (a pool or an open transaction); writes open their own
//! transaction on the handle, commit on success and roll back on error.

use sea_orm::DatabaseTransaction;
use serde::Serialize;

use crate::error::Result;

pub mod artists;
pub mod shows;
pub mod venues;

/// Id and display name of a venue or artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntityRef>,
}

/// Case-sensitive substring match over `(id, name)` rows in store order.
///
/// Matching happens here rather than in SQL so the rule is the same on every
/// backend: SQLite's `LIKE` folds ASCII case, Postgres' does not. Wildcard
/// characters in `term` are literal.
pub(crate) fn match_names(rows: Vec<(i32, String)>, term: &str) -> SearchResults {
    let data: Vec<EntityRef> = rows
        .into_iter()
        .filter(|(_, name)| name.contains(term))
        .map(|(id, name)| EntityRef { id, name })
        .collect();
    SearchResults {
        count: data.len(),
        data,
    }
}

/// Commit `txn` if `result` is ok, otherwise roll it back and hand the
/// original error back.
pub(crate) async fn finish<T>(txn: DatabaseTransaction, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(error = %err, "rolling back write");
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("rollback failed: {rollback_err}");
            }
            Err(err)
        }
    }
}
