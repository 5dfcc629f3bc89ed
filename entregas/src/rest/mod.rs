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

//! Entry point to the REST server.

use crate::db::EntregasTx;
use crate::driver::Driver;
use axum::Router;
use entregas_core::db::Db;
use tower_http::cors::CorsLayer;

mod customer_delete;
mod customer_get;
mod customer_put;
mod customers_get;
mod customers_post;
mod deliveries_get;
mod deliveries_post;
mod delivery_delete;
mod delivery_get;
mod delivery_put;
mod order_delete;
mod order_get;
mod order_put;
mod orders_get;
mod orders_post;
#[cfg(test)]
mod testutils;

/// Creates the router for the application.
pub(crate) fn app<D>(driver: Driver<D>) -> Router
where
    D: Db + 'static,
    D::Tx: EntregasTx,
{
    use axum::routing::get;
    Router::new()
        .route("/customers", get(customers_get::handler).post(customers_post::handler))
        .route(
            "/customers/:id",
            get(customer_get::handler).put(customer_put::handler).delete(customer_delete::handler),
        )
        .route("/orders", get(orders_get::handler).post(orders_post::handler))
        .route(
            "/orders/:id",
            get(order_get::handler).put(order_put::handler).delete(order_delete::handler),
        )
        .route("/deliveries", get(deliveries_get::handler).post(deliveries_post::handler))
        .route(
            "/deliveries/:id",
            get(delivery_get::handler).put(delivery_put::handler).delete(delivery_delete::handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(driver)
}
