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

//! API to place a new order.

use crate::db::EntregasTx;
use crate::driver::Driver;
use crate::model::OrderFields;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, http};
use entregas_core::db::Db;
use entregas_core::rest::{JsonBody, RestError};

/// API handler.
pub(crate) async fn handler<D>(
    State(driver): State<Driver<D>>,
    JsonBody(fields): JsonBody<OrderFields>,
) -> Result<impl IntoResponse, RestError>
where
    D: Db + 'static,
    D::Tx: EntregasTx,
{
    let quoted = driver.create_order(fields).await?;
    Ok((http::StatusCode::CREATED, Json(quoted)))
}

#[cfg(test)]
mod tests {
    use crate::db::EntregasTx;
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use entregas_core::rest::testutils::*;
    use entregas_core::test_payload_must_be_json;
    use serde_json::json;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/orders".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let customer = context.create_customer(1).await;

        let request = OrderFields { urgent: Some(true), ..OrderFields::valid(*customer.id()) };
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<QuotedOrder>()
            .await;
        assert!(*response.order().details().urgent());
        assert!((14.0 - response.quote().surcharge()).abs() < 1e-9);
        assert!((84.0 - response.quote().final_price()).abs() < 1e-9);

        let stored = context.tx().await.find_order_by_id(*response.order().id()).await.unwrap();
        assert_eq!(Some(response.order().clone()), stored);
    }

    #[tokio::test]
    async fn test_defaults() {
        let context = TestContext::setup().await;

        let customer = context.create_customer(1).await;

        let request = json!({
            "date": "2025-06-30",
            "distance": 12.5,
            "weight": 3.0,
            "rate_per_km": 1.0,
            "rate_per_kg": 1.0,
            "customer_id": customer.id(),
        });
        let response = OneShotBuilder::new(context.into_app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<QuotedOrder>()
            .await;
        assert!(!*response.order().details().urgent());
        assert_eq!(DeliveryStatus::Calculated, *response.order().details().status());
        assert!((15.5 - response.quote().final_price()).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_customer() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(OrderFields::valid(CustomerId::new(42)))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Customer 42 does not exist")
            .await;

        assert!(context.tx().await.get_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_price_out_of_range() {
        let context = TestContext::setup().await;

        let customer = context.create_customer(1).await;

        let request = json!({
            "date": "2025-03-14",
            "distance": 1e308,
            "weight": 10.0,
            "rate_per_km": 10.0,
            "rate_per_kg": 2.0,
            "customer_id": customer.id(),
        });
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("too large to compute a price")
            .await;

        assert!(context.tx().await.get_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_fields() {
        let context = TestContext::setup().await;

        let customer = context.create_customer(1).await;

        let valid = || OrderFields::valid(*customer.id());
        for (request, exp_error) in [
            (OrderFields { distance: Some(0.0), ..valid() }, "positive"),
            (OrderFields { date: Some("14/03/2025".to_owned()), ..valid() }, "date"),
            (OrderFields { status: Some("lost".to_owned()), ..valid() }, "Invalid status"),
            (OrderFields { rate_per_kg: None, ..valid() }, "rate_per_kg"),
        ] {
            OneShotBuilder::new(context.app(), route())
                .send_json(request)
                .await
                .expect_status(http::StatusCode::BAD_REQUEST)
                .expect_error(exp_error)
                .await;
        }
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route());
}
