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

//! API to register a new customer.

use crate::db::EntregasTx;
use crate::driver::Driver;
use crate::model::CustomerFields;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, http};
use entregas_core::db::Db;
use entregas_core::rest::{JsonBody, RestError};

/// API handler.
pub(crate) async fn handler<D>(
    State(driver): State<Driver<D>>,
    JsonBody(fields): JsonBody<CustomerFields>,
) -> Result<impl IntoResponse, RestError>
where
    D: Db + 'static,
    D::Tx: EntregasTx,
{
    let customer = driver.create_customer(fields).await?;
    Ok((http::StatusCode::CREATED, Json(customer)))
}

#[cfg(test)]
mod tests {
    use crate::db::EntregasTx;
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use entregas_core::rest::testutils::*;
    use entregas_core::test_payload_must_be_json;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/customers".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_json(CustomerFields::valid(3))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Customer>()
            .await;
        assert_eq!(&CustomerDetails::valid(3), response.details());

        let stored = context.tx().await.find_customer_by_id(*response.id()).await.unwrap();
        assert_eq!(Some(response), stored);
    }

    #[tokio::test]
    async fn test_missing_field() {
        let context = TestContext::setup().await;

        let request = CustomerFields { phone: None, ..CustomerFields::valid(3) };
        OneShotBuilder::new(context.into_app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Missing required field phone")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_tax_id() {
        let context = TestContext::setup().await;

        let request = CustomerFields { tax_id: Some("123".to_owned()), ..CustomerFields::valid(3) };
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("exactly 11 digits")
            .await;

        assert!(context.tx().await.get_customers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let context = TestContext::setup().await;

        let existing = context.create_customer(1).await;

        let request = CustomerFields {
            email: Some(existing.details().email().as_str().to_owned()),
            ..CustomerFields::valid(2)
        };
        OneShotBuilder::new(context.into_app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CONFLICT)
            .expect_error("Email .* is already registered")
            .await;
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route());
}
