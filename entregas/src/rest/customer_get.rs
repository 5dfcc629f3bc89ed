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

//! API to get a single customer.

use crate::db::EntregasTx;
use crate::driver::Driver;
use crate::model::CustomerId;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use entregas_core::db::Db;
use entregas_core::rest::{EmptyBody, PathId, RestError};

/// API handler.
pub(crate) async fn handler<D>(
    State(driver): State<Driver<D>>,
    PathId(id): PathId<CustomerId>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError>
where
    D: Db + 'static,
    D::Tx: EntregasTx,
{
    let customer = driver.get_customer(id).await?;
    Ok(Json(customer))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use entregas_core::rest::testutils::*;
    use entregas_core::test_payload_must_be_empty;

    fn route(id: CustomerId) -> (http::Method, String) {
        (http::Method::GET, format!("/customers/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        context.create_customer(1).await;
        let customer = context.create_customer(2).await;

        let response = OneShotBuilder::new(context.app(), route(*customer.id()))
            .send_empty()
            .await
            .expect_json::<Customer>()
            .await;
        assert_eq!(customer, response);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route(CustomerId::new(8)))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Customer 8 not found")
            .await;
    }

    #[tokio::test]
    async fn test_bad_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), (http::Method::GET, "/customers/abc"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Invalid URL.*abc")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(CustomerId::new(1)));
}
