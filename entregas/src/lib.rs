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

//! Backend for a delivery business: customers, the orders they place and the priced deliveries
//! that fulfill those orders.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use entregas_core::db::init_schema;
use entregas_core::db::postgres::{PostgresDb, PostgresOptions};
use log::info;
use std::error::Error;
use std::net::SocketAddr;

pub(crate) mod db;
use db::postgres::PostgresEntregasTx;
pub(crate) mod driver;
use driver::Driver;
pub(crate) mod model;
mod rest;
use rest::app;

/// Connects to the database described by `db_opts`, ensures its schema exists and serves the
/// REST API on `bind_addr` until the server fails.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db_opts: PostgresOptions,
) -> Result<(), Box<dyn Error>> {
    let db = PostgresDb::<PostgresEntregasTx>::connect(db_opts)?;
    init_schema(&db).await?;
    let driver = Driver::new(db);
    let app = app(driver);

    let bind_addr = bind_addr.into();
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", bind_addr);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
