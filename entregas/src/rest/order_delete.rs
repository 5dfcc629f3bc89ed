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

//! API to delete an order along with its delivery.

use crate::db::EntregasTx;
use crate::driver::Driver;
use crate::model::OrderId;
use axum::extract::State;
use axum::http;
use entregas_core::db::Db;
use entregas_core::rest::{EmptyBody, PathId, RestError};

/// API handler.
pub(crate) async fn handler<D>(
    State(driver): State<Driver<D>>,
    PathId(id): PathId<OrderId>,
    _: EmptyBody,
) -> Result<http::StatusCode, RestError>
where
    D: Db + 'static,
    D::Tx: EntregasTx,
{
    driver.delete_order(id).await?;
    Ok(http::StatusCode::NO_CONTENT)
}
