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

//! API to create the delivery of an order.

use crate::db::EntregasTx;
use crate::driver::Driver;
use crate::model::DeliveryFields;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, http};
use entregas_core::db::Db;
use entregas_core::rest::{JsonBody, RestError};

/// API handler.
pub(crate) async fn handler<D>(
    State(driver): State<Driver<D>>,
    JsonBody(fields): JsonBody<DeliveryFields>,
) -> Result<impl IntoResponse, RestError>
where
    D: Db + 'static,
    D::Tx: EntregasTx,
{
    let delivery = driver.create_delivery(fields).await?;
    Ok((http::StatusCode::CREATED, Json(delivery)))
}
