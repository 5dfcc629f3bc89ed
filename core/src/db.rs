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

//! Generic abstraction to access different database systems.
//!
//! The facilities in this module provide an abstraction over different database systems such as
//! PostgreSQL and SQLite.  The PostgreSQL backend is for production use and the SQLite backend is
//! primarily intended to support unit tests.
//!
//! Services define their own transaction trait extending `BareTx` with domain-specific
//! operations, implement it once per backend, and get instances of it via `Db::begin`.  The
//! business logic only ever sees the `Db` trait, which allows injecting any backend.

use crate::model::ModelError;
use async_trait::async_trait;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Database errors.  Any unexpected errors that come from the database are classified as
/// `BackendError`, but errors we know about have more specific types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DbError {
    /// Indicates that a request to create an entry failed because it already exists.
    #[error("Already exists")]
    AlreadyExists,

    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates a failure processing the data that already exists in the database.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,

    /// Indicates that the database is not available (maybe because of too many active concurrent
    /// connections).
    #[error("Unavailable")]
    Unavailable,
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;

/// Validates that a statement that should have modified exactly one row did so.
///
/// The `what` parameter names the kind of statement for error reporting purposes.
pub fn ensure_one_row(what: &str, rows_affected: u64) -> DbResult<()> {
    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        n => Err(DbError::BackendError(format!("{} affected {} rows", what, n))),
    }
}

/// Common operations for all transaction types.
///
/// Dropping a transaction without calling `commit` rolls it back.
#[async_trait]
pub trait BareTx: Send {
    /// Commits the transaction.
    async fn commit(self) -> DbResult<()>;

    /// Ensures the database schema exists.  Must be idempotent.
    async fn migrate(&mut self) -> DbResult<()>;
}

/// Abstraction over the database connection.
#[async_trait]
pub trait Db: Send + Sync {
    /// Type of the transactions returned by this database.
    type Tx: BareTx;

    /// Begins a transaction.
    ///
    /// It is the responsibility of the caller to call `commit` on the returned transaction.
    /// Otherwise the transaction is rolled back on drop.
    async fn begin(&self) -> DbResult<Self::Tx>;

    /// Closes the connection pool, waiting for all outstanding connections to be released.
    async fn close(&self);
}

/// Initializes the schema of `db` within a single transaction.
pub async fn init_schema<D: Db>(db: &D) -> DbResult<()> {
    let mut tx = db.begin().await?;
    tx.migrate().await?;
    tx.commit().await
}

/// Macros to help instantiate tests for multiple database systems.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    pub use paste::paste;

    /// Instantiates the `module::name` test for the database configured by `setup`.
    ///
    /// The `extra` metadata parameter can be used to tag the generated tests.
    #[macro_export]
    macro_rules! generate_one_test [
        ( $name:ident, $setup:expr, $module:path $(, #[$extra:meta] )? ) => {
            #[tokio::test]
            $(#[$extra])?
            async fn $name() {
                $crate::db::testutils::paste! {
                    $module :: [< $name >]($setup).await;
                }
            }
        }
    ];

    pub use generate_one_test;

    /// Instantiates a collection of tests for a specific database system.
    ///
    /// The database implementation to run the tests against is determined by the `setup`
    /// expression, which needs to return a database object parameterized with the desired
    /// transaction type.  The returned database should also have been initialized with the
    /// desired schema.
    ///
    /// The `extra` metadata parameter can be used to tag the generated tests.
    #[macro_export]
    macro_rules! generate_tests [
        ( #[$extra:meta], $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module, #[$extra]);
            )+
        };

        ( $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module);
            )+
        };
    ];

    pub use generate_tests;
}
