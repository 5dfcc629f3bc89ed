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

//! Server entry point for the delivery backend.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use entregas::serve;
use entregas_core::db::postgres::PostgresOptions;
use entregas_core::env::get_optional_var;
use log::{error, info};
use std::error::Error;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::process;

/// Default port to listen on when `ENTREGAS_PORT` is not set.
const DEFAULT_PORT: u16 = 3000;

/// Prefix of the environment variables that configure the server.
const ENV_PREFIX: &str = "ENTREGAS";

/// Prefix of the environment variables that configure the production database.
const DB_ENV_PREFIX: &str = "PGSQL_PROD";

/// Computes the address to listen on from the `ENTREGAS_BIND_ADDR` and `ENTREGAS_PORT`
/// environment variables.
fn bind_addr_from_env() -> Result<SocketAddr, String> {
    let ip = get_optional_var::<IpAddr>(ENV_PREFIX, "BIND_ADDR")?
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
    let port = get_optional_var::<u16>(ENV_PREFIX, "PORT")?.unwrap_or(DEFAULT_PORT);
    Ok(SocketAddr::new(ip, port))
}

/// Loads the configuration from the environment and runs the server.
async fn run() -> Result<(), Box<dyn Error>> {
    let addr = bind_addr_from_env()?;
    let db_opts = PostgresOptions::from_env(DB_ENV_PREFIX)?;

    info!("Starting server on {} against database at {}:{}", addr, db_opts.host, db_opts.port);
    serve(addr, db_opts).await
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        error!("{}", e);
        process::exit(1);
    }
}
