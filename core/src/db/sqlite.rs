// Entregas
// Copyright 2025 The Entregas Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Common utilities to interact with an SQLite database.

use crate::db::{BareTx, Db, DbError, DbResult};
use async_trait::async_trait;
use derivative::Derivative;
use sqlx::Transaction;
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::marker::PhantomData;
use std::str::FromStr;

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::RowNotFound => DbError::NotFound,
        e if e.to_string().contains("FOREIGN KEY constraint failed") => DbError::NotFound,
        e if e.to_string().contains("UNIQUE constraint failed") => DbError::AlreadyExists,
        e => DbError::BackendError(e.to_string()),
    }
}

/// Opens a connection pool to the database given in `conn_str` and wraps it so that transactions
/// are exposed as instances of `T`.
///
/// SQLite only supports one writer at a time and in-memory databases only live as long as one of
/// their connections is open, so the pool keeps exactly one connection alive forever.
pub async fn connect<T>(conn_str: &str) -> DbResult<SqliteDb<T>> {
    let options = SqliteConnectOptions::from_str(conn_str)
        .map_err(map_sqlx_error)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(map_sqlx_error)?;
    Ok(SqliteDb { pool, _tx: PhantomData })
}

/// A database instance backed by an SQLite database, yielding transactions of type `T`.
#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub struct SqliteDb<T> {
    /// Shared SQLite connection pool.  This is a cloneable type that all concurrent
    /// transactions can use concurrently.
    pool: SqlitePool,

    /// Marker for the transaction type produced by `begin`.
    _tx: PhantomData<fn() -> T>,
}

#[async_trait]
impl<T> Db for SqliteDb<T>
where
    T: BareTx + From<Transaction<'static, Sqlite>> + 'static,
{
    type Tx = T;

    async fn begin(&self) -> DbResult<T> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(T::from(tx))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Helper function to initialize the database with a schema.
///
/// The `schema` can contain multiple statements separated by semicolons.
pub async fn run_schema(tx: &mut Transaction<'static, Sqlite>, schema: &str) -> DbResult<()> {
    sqlx::Executor::execute(&mut **tx, sqlx::raw_sql(schema)).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Test utilities for the SQLite connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Initializes an empty in-memory test database whose transactions are of type `T`.
    pub async fn setup<T>() -> SqliteDb<T> {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        connect(":memory:").await.unwrap()
    }
}
