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

//! API to update a delivery, recomputing its price from its order.

use crate::db::EntregasTx;
use crate::driver::Driver;
use crate::model::{DeliveryFields, DeliveryId};
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use entregas_core::db::Db;
use entregas_core::rest::{JsonBody, PathId, RestError};

/// API handler.
pub(crate) async fn handler<D>(
    State(driver): State<Driver<D>>,
    PathId(id): PathId<DeliveryId>,
    JsonBody(fields): JsonBody<DeliveryFields>,
) -> Result<impl IntoResponse, RestError>
where
    D: Db + 'static,
    D::Tx: EntregasTx,
{
    let delivery = driver.update_delivery(id, fields).await?;
    Ok(Json(delivery))
}
